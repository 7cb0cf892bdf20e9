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

//! Builds the upper-triangular GF(2) system the back-solver consumes
//! (component C3).

use log::trace;
use rand::Rng;

use crate::error::MatrixError;
use crate::matrix::{BitMatrix, BitVector};
use crate::program::XProgram;
use crate::rng::random_bit_vector;
use crate::sample::gensample;

/// `ceil(1.2 * n)`, the system builder's default retry budget.
pub fn default_maxiters(n: usize) -> usize {
    (1.2 * n as f64).ceil() as usize
}

/// Accumulate independent samples of `program` into an `(n+1) x n`
/// upper-triangular system. Column `k`, if nonzero, is pivoted at row `k`;
/// row `n` carries the augmented constant for that column's equation.
///
/// Returns early once the system reaches full rank `n`; otherwise runs for
/// `maxiters` samples and returns whatever rank was reached, leaving it to
/// the back-solver to enumerate the resulting (possibly nontrivial)
/// solution space.
pub fn gensystem<R: Rng + ?Sized>(
    program: &XProgram,
    maxiters: usize,
    rng: &mut R,
) -> Result<BitMatrix, MatrixError> {
    let n = program.rows();
    let mut system = BitMatrix::zeros(n + 1, n);
    let d = random_bit_vector(rng, n);
    let mut rank = 0;

    for _ in 0..maxiters {
        if rank == n {
            break;
        }
        let v = gensample(program, &d, rng)?;
        let mut augmented = BitVector::zeros(n + 1);
        for i in 0..n {
            augmented.set(i, v.get(i));
        }
        augmented.set(n, true);

        for k in 0..n {
            if !augmented.get(k) {
                continue;
            }
            if system.get(k, k) {
                augmented.add_col(&system, k)?;
            } else {
                system.set_col(k, &augmented)?;
                rank += 1;
                trace!("gensystem: pivoted column {k}, rank now {rank}/{n}");
                break;
            }
        }
    }
    Ok(system)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded_rng;

    fn random_program<R: Rng + ?Sized>(rng: &mut R, n: usize, m: usize) -> XProgram {
        let mut program = BitMatrix::zeros(n, m);
        for col in 0..m {
            program.set_col(col, &random_bit_vector(rng, n)).unwrap();
        }
        program
    }

    #[test]
    fn default_maxiters_matches_contract() {
        assert_eq!(default_maxiters(10), 12);
        assert_eq!(default_maxiters(5), 6);
    }

    #[test]
    fn pivoted_columns_are_upper_triangular() {
        let mut rng = seeded_rng(0xBEEF_CAFE);
        let n = 16;
        let program = random_program(&mut rng, n, 200);
        let system = gensystem(&program, default_maxiters(n) * 4, &mut rng).unwrap();

        for k in 0..n {
            if (0..=n).any(|row| system.get(row, k)) {
                // a nonzero column must have its first set bit exactly at row k
                for row in 0..k {
                    assert!(!system.get(row, k), "column {k} has an entry above its pivot row");
                }
            }
        }
    }

    #[test]
    fn small_system_reaches_full_rank_with_enough_samples() {
        let mut rng = seeded_rng(1);
        let n = 6;
        let program = random_program(&mut rng, n, 500);
        let system = gensystem(&program, 500, &mut rng).unwrap();
        let rank = (0..n).filter(|&k| system.get(k, k)).count();
        assert_eq!(rank, n, "expected full rank with a generous sample budget");
    }
}
