// Copyright contributors to the X-program attacker project
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Quadratic-residue number theory underlying the benchmark generator (C10).

/// Trial-division primality test. The primes this module is exercised with
/// are small enough (benchmark sizes, not cryptographic ones) that this is
/// fast and exact.
pub fn is_prime(q: u64) -> bool {
    if q < 2 {
        return false;
    }
    if q % 2 == 0 {
        return q == 2;
    }
    let mut d = 3u64;
    while d.saturating_mul(d) <= q {
        if q % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Whether `q` is a prime congruent to 7 mod 8, the family the
/// quadratic-residue construction requires (§6.2/§9 GLOSSARY).
pub fn is_valid_modulus(q: u64) -> bool {
    is_prime(q) && q % 8 == 7
}

/// The set of nonzero quadratic residues mod `q`, as a boolean indicator of
/// length `q`: `residues[j]` is true iff `j` is a nonzero square mod `q`.
///
/// For prime `q` there are exactly `(q - 1) / 2` such residues.
pub fn quadratic_residue_indicator(q: u64) -> Vec<bool> {
    let mut indicator = vec![false; q as usize];
    for x in 1..q {
        let r = (x * x) % q;
        indicator[r as usize] = true;
    }
    indicator
}

/// Cyclically shift `indicator` (conceptually indexed mod `q`) by `shift`
/// and truncate (or zero-extend, for degenerate small `q`) to `len` entries.
pub fn cyclic_shift(indicator: &[bool], shift: u64, len: usize) -> Vec<bool> {
    let q = indicator.len() as u64;
    (0..len)
        .map(|i| indicator[((i as u64 + shift) % q) as usize])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_prime_matches_known_small_primes() {
        for p in [2, 3, 5, 7, 11, 13, 103] {
            assert!(is_prime(p), "{p} should be prime");
        }
        for c in [1, 0, 4, 6, 9, 15, 100, 102] {
            assert!(!is_prime(c), "{c} should not be prime");
        }
    }

    #[test]
    fn valid_modulus_requires_7_mod_8() {
        assert!(is_valid_modulus(103)); // 103 = 12*8 + 7
        assert!(is_valid_modulus(7));
        assert!(!is_valid_modulus(11)); // 11 mod 8 == 3
        assert!(!is_valid_modulus(9)); // not prime
    }

    #[test]
    fn residue_count_matches_group_theory() {
        let q = 103;
        let indicator = quadratic_residue_indicator(q);
        let count = indicator.iter().filter(|&&b| b).count();
        assert_eq!(count as u64, (q - 1) / 2);
    }

    #[test]
    fn cyclic_shift_preserves_weight() {
        let q = 23;
        let indicator = quadratic_residue_indicator(q);
        let shifted = cyclic_shift(&indicator, 5, q as usize);
        let weight_before = indicator.iter().filter(|&&b| b).count();
        let weight_after = shifted.iter().filter(|&&b| b).count();
        assert_eq!(weight_before, weight_after);
    }
}
