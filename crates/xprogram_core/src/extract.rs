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

//! Outer key-extraction loop composing C2-C5 (component C6).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};
use rand::Rng;

use crate::backsolve::backsolve;
use crate::checker::checkkey;
use crate::error::SolveError;
use crate::matrix::BitVector;
use crate::program::XProgram;
use crate::system::gensystem;

/// Default number of outer attempts before giving up.
pub const DEFAULT_MAXIT: usize = 100;

/// Default ratio of samples to unknowns the system builder is given per
/// attempt (`floor(n * sysmaxit)`).
pub const DEFAULT_SYSMAXIT: f64 = 1.2;

/// A shareable flag an external caller can set to abort an in-flight
/// extraction between outer attempts.
///
/// Checked once per attempt, never mid-attempt: cancellation takes effect at
/// the next attempt boundary, leaving `program` untouched either way.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Tunable parameters for [`extractkey`].
#[derive(Debug, Clone, Copy)]
pub struct ExtractConfig {
    pub maxit: usize,
    pub sysmaxit: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            maxit: DEFAULT_MAXIT,
            sysmaxit: DEFAULT_SYSMAXIT,
        }
    }
}

/// The result of a successful extraction: the recovered key, the number of
/// outer attempts it took to find it, and the number of candidate keys
/// actually evaluated by [`checkkey`] across every attempt, for benchmarking.
#[derive(Debug, Clone)]
pub struct ExtractOutcome {
    pub key: BitVector,
    pub attempts: usize,
    pub keys_tried: usize,
}

/// Recover the secret key hidden in `program`, retrying up to
/// `config.maxit` times.
///
/// Each attempt builds a fresh triangular system (C3), enumerates its
/// solution set (C4), and tests every candidate (C5) until one passes or the
/// candidate set is exhausted; the next attempt then starts from a fresh
/// system. Returns [`SolveError::MaxIterationsExceeded`] if no attempt
/// succeeds, or [`SolveError::Cancelled`] if `token` was set before an
/// attempt that did not already start.
pub fn extractkey<R: Rng + ?Sized>(
    program: &XProgram,
    config: ExtractConfig,
    token: Option<&CancellationToken>,
    rng: &mut R,
) -> Result<ExtractOutcome, SolveError> {
    let n = program.rows();
    let sys_budget = ((n as f64) * config.sysmaxit).floor() as usize;
    let mut keys_tried = 0usize;

    for attempt in 1..=config.maxit {
        if token.is_some_and(CancellationToken::is_cancelled) {
            return Err(SolveError::Cancelled);
        }

        let system = gensystem(program, sys_budget, rng)?;
        let candidates = backsolve(&system)?;
        debug!(
            "extractkey: attempt {attempt}/{}, {} candidate(s) to check",
            config.maxit,
            candidates.len()
        );

        for candidate in candidates {
            keys_tried += 1;
            if checkkey(program, &candidate, rng) {
                info!("extractkey: recovered key after {attempt} attempt(s), {keys_tried} candidate(s) tried");
                return Ok(ExtractOutcome { key: candidate, attempts: attempt, keys_tried });
            }
        }
    }

    Err(SolveError::MaxIterationsExceeded { attempts: config.maxit })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::BitMatrix;
    use crate::rng::seeded_rng;

    /// Build a toy X-program whose hidden key is `key`: every column is
    /// orthogonal to `key`, so `checkkey` trivially accepts it and any
    /// candidate orthogonal to every column the system builder can produce.
    /// This exercises the extractor's control flow end to end without
    /// depending on the quadratic-residue benchmark generator.
    fn program_with_planted_key<R: Rng + ?Sized>(rng: &mut R, n: usize, m: usize, key: &BitVector) -> BitMatrix {
        let mut program = BitMatrix::zeros(n, m);
        let mut col = 0;
        while col < m {
            let v = crate::rng::random_bit_vector(rng, n);
            if v.dot(key).unwrap() {
                continue;
            }
            program.set_col(col, &v).unwrap();
            col += 1;
        }
        program
    }

    #[test]
    fn extractor_recovers_a_planted_key() {
        let mut rng = seeded_rng(0xBEEF_CAFE);
        let key = BitVector::from_bits(&[1, 0, 1, 1, 0, 1, 0, 0]);
        let program = program_with_planted_key(&mut rng, key.len(), 600, &key);

        let outcome = extractkey(&program, ExtractConfig::default(), None, &mut rng).unwrap();
        assert!(checkkey(&program, &outcome.key, &mut rng));
        assert!(outcome.keys_tried >= 1);
        assert!((1..=ExtractConfig::default().maxit).contains(&outcome.attempts));
    }

    #[test]
    fn cancellation_is_observed_before_any_attempt() {
        let mut rng = seeded_rng(1);
        let key = BitVector::from_bits(&[1, 0, 1, 1]);
        let program = program_with_planted_key(&mut rng, key.len(), 64, &key);

        let token = CancellationToken::new();
        token.cancel();
        let err = extractkey(&program, ExtractConfig::default(), Some(&token), &mut rng).unwrap_err();
        assert!(matches!(err, SolveError::Cancelled));
    }

    #[test]
    fn zero_attempt_budget_reports_max_iterations() {
        let mut rng = seeded_rng(2);
        let key = BitVector::from_bits(&[1, 0, 1, 1, 0, 1, 0, 0, 1, 1, 0, 1]);
        let program = program_with_planted_key(&mut rng, key.len(), 200, &key);
        let config = ExtractConfig { maxit: 0, sysmaxit: 1.2 };
        let err = extractkey(&program, config, None, &mut rng).unwrap_err();
        assert!(matches!(err, SolveError::MaxIterationsExceeded { attempts: 0 }));
    }
}
