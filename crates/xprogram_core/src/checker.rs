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

//! Statistical weight-mod-4 key-verification oracle (component C5).

use rand::Rng;

use crate::matrix::BitVector;
use crate::program::XProgram;
use crate::rng::random_bit_vector;

/// Number of independent trials the checker runs per candidate.
///
/// Each trial admits a wrong key with probability at most 1/2, so 40 trials
/// bound the false-accept rate at roughly 2^-40.
pub const TRIALS: usize = 40;

/// Decide whether `candidate` is the true key hidden in `program`.
///
/// For a true key, every codeword of the sub-code it selects has Hamming
/// weight congruent to 0 or -1 mod 4; a wrong candidate fails this test with
/// overwhelming probability across [`TRIALS`] independent draws of `d`.
///
/// Never fails: a malformed candidate (wrong length) simply cannot dot with
/// `program`'s columns and is treated as a plain negative result by the
/// caller's use of `expect` on the length-matched case. Callers are expected
/// to only pass candidates of length `program.rows()`, as produced by
/// [`crate::backsolve::backsolve`].
pub fn checkkey<R: Rng + ?Sized>(program: &XProgram, candidate: &BitVector, rng: &mut R) -> bool {
    let n = program.rows();
    debug_assert_eq!(candidate.len(), n, "candidate key length must match program row count");

    for _ in 0..TRIALS {
        let d = random_bit_vector(rng, n);
        let mut tot: u64 = 0;
        for col in 0..program.cols() {
            let Ok(true) = candidate.dot_col(program, col) else {
                continue;
            };
            if d.dot_col(program, col).unwrap_or(false) {
                tot += 1;
            }
        }
        if !matches!(tot % 4, 0 | 3) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::BitMatrix;
    use crate::rng::seeded_rng;

    /// Build an X-program whose columns are all orthogonal to `key`: a
    /// degenerate but valid instance where `tot` is always zero, so the
    /// planted key trivially passes and gives a baseline to test against.
    fn program_with_planted_key<R: Rng + ?Sized>(rng: &mut R, key: &BitVector) -> BitMatrix {
        let n = key.len();
        let m = 400;
        let mut program = BitMatrix::zeros(n, m);
        let mut col = 0;
        while col < m {
            let v = random_bit_vector(rng, n);
            if v.dot(key).unwrap() {
                continue;
            }
            program.set_col(col, &v).unwrap();
            col += 1;
        }
        program
    }

    #[test]
    fn accepts_the_planted_key() {
        let mut rng = seeded_rng(0xBEEF_CAFE);
        let key = BitVector::from_bits(&[1, 0, 1, 1, 0, 1, 0, 0, 1, 1]);
        let program = program_with_planted_key(&mut rng, &key);
        assert!(checkkey(&program, &key, &mut rng));
    }

    #[test]
    fn rejects_most_random_candidates() {
        let mut rng = seeded_rng(1);
        let key = BitVector::from_bits(&[1, 0, 1, 1, 0, 1, 0, 0, 1, 1]);
        let program = program_with_planted_key(&mut rng, &key);

        let mut rejected = 0;
        for _ in 0..50 {
            let candidate = random_bit_vector(&mut rng, key.len());
            if candidate == key {
                continue;
            }
            if !checkkey(&program, &candidate, &mut rng) {
                rejected += 1;
            }
        }
        assert!(rejected >= 45, "expected most random candidates to be rejected, got {rejected}/50");
    }
}
