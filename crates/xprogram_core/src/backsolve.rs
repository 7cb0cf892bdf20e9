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

//! Enumerates the solution set of an upper-triangular GF(2) system
//! (component C4).

use log::debug;

use crate::error::SolveError;
use crate::matrix::{BitMatrix, BitVector};

/// Refuse to enumerate more than `2^20` candidates rather than allocate an
/// unbounded witness set.
pub const MAX_FREE_COLUMNS: usize = 20;

/// Enumerate every solution of the `(n+1) x n` upper-triangular system
/// produced by [`crate::system::gensystem`].
///
/// Processes columns from `n-1` down to `0`. A column without its own pivot
/// is free: its pivot bit is forced to one and every witness row collected
/// so far is duplicated, with the duplicate's bit at that column set. Each
/// column is then back-eliminated against every row above it. The witness
/// rows (row `n` onward) are the candidate keys on return.
pub fn backsolve(system: &BitMatrix) -> Result<Vec<BitVector>, SolveError> {
    let n = system.cols();
    debug_assert_eq!(system.rows(), n + 1, "expected an (n+1) x n augmented system");

    let mut rows: Vec<BitVector> = (0..=n).map(|r| system.row(r)).collect();
    let mut free_columns = 0usize;

    for k in (0..n).rev() {
        if !rows[k].get(k) {
            free_columns += 1;
            if free_columns > MAX_FREE_COLUMNS {
                return Err(SolveError::TooManyFreeColumns {
                    free: free_columns,
                    limit: MAX_FREE_COLUMNS,
                });
            }
            rows[k].set(k, true);

            let duplicates: Vec<BitVector> = rows[n..]
                .iter()
                .cloned()
                .map(|mut w| {
                    w.set(k, true);
                    w
                })
                .collect();
            rows.extend(duplicates);
        }

        for j in (0..k).rev() {
            if !rows[k].get(j) {
                continue;
            }
            for row in rows.iter_mut() {
                if row.get(k) {
                    let updated = row.get(j) ^ true;
                    row.set(j, updated);
                }
            }
        }
    }

    let free = free_columns;
    let candidates: Vec<BitVector> = rows.split_off(n);
    debug!(
        "backsolve: rank {}, {} free column(s), {} candidate(s)",
        n - free,
        free,
        candidates.len()
    );
    Ok(candidates)
}
