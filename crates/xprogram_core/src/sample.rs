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

//! Draws one sample vector from an X-program (component C2).

use log::trace;
use rand::Rng;

use crate::error::MatrixError;
use crate::matrix::BitVector;
use crate::program::XProgram;
use crate::rng::random_bit_vector;

/// Draw a single sample: XOR together every generator column orthogonal to
/// `d` or orthogonal to a fresh random `e`.
///
/// With probability 1/2 the result is orthogonal to the hidden key.
pub fn gensample<R: Rng + ?Sized>(
    program: &XProgram,
    d: &BitVector,
    rng: &mut R,
) -> Result<BitVector, MatrixError> {
    let n = program.rows();
    let e = random_bit_vector(rng, n);
    let mut sample = BitVector::zeros(n);

    for col in 0..program.cols() {
        let alpha = d.dot_col(program, col)?;
        let beta = e.dot_col(program, col)?;
        // "alpha + beta < 2" simplifies to "not (alpha and beta)".
        if !(alpha && beta) {
            sample.add_col(program, col)?;
        }
    }
    trace!("gensample: drew sample of weight {}", sample.weight());
    Ok(sample)
}
