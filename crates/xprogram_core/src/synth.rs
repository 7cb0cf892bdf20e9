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

//! Biased sample synthesizer (component C7, `gensamples`).
//!
//! Given a known secret key, produces bitstrings whose bias towards the
//! key's affine subspace mimics the IQP sampling distribution a quantum
//! device would produce for this X-program.

use rand::Rng;
use std::f64::consts::PI;

use crate::matrix::{BitMatrix, BitVector};
use crate::rng::{random_bit_vector, random_unit_interval};

/// `1 / cos^2(pi/8) - 1`, the acceptance bias for samples orthogonal to the
/// key: roughly 17% of accepted samples are admitted purely by this escape
/// hatch, the rest because they are non-orthogonal to `key`.
pub fn theta() -> f64 {
    1.0 / (PI / 8.0).cos().powi(2) - 1.0
}

/// Draw `nsamples` biased samples of length `key.len()`, returned as the
/// columns of an `n x nsamples` matrix.
///
/// A candidate vector `v` is accepted if `dot(v, key) = 1`, or (independent
/// of that dot product) with probability `theta`. This reproduces the
/// roughly 85%-non-orthogonal bias of the IQP distribution without ever
/// sampling the true quantum process.
pub fn gensamples<R: Rng + ?Sized>(key: &BitVector, nsamples: usize, rng: &mut R) -> BitMatrix {
    let n = key.len();
    let theta = theta();
    let mut out = BitMatrix::zeros(n, nsamples);
    let mut accepted = 0;
    while accepted < nsamples {
        let v = random_bit_vector(rng, n);
        let non_orthogonal = v.dot(key).unwrap_or(false);
        let escapes = random_unit_interval(rng) < theta;
        if non_orthogonal || escapes {
            out.set_col(accepted, &v).unwrap();
            accepted += 1;
        }
    }
    out
}
