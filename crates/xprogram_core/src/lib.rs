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

//! Classical key-recovery attacker for the Shepherd-Bremner IQP X-program
//! challenge.
//!
//! The crate is organized leaves-first, mirroring the data flow of the
//! attack: [`matrix`] is the bit-packed GF(2) primitive everything else is
//! built on; [`sample`] and [`system`] build a linear system from random
//! samples of an X-program; [`backsolve`] enumerates its solution space;
//! [`checker`] tests candidates statistically; [`extract`] composes all of
//! the above into the outer retry loop; [`synth`] runs the reverse
//! direction, synthesizing biased samples from a known key. [`program`] and
//! [`encoding`] are the file-format and key-encoding collaborators.

pub mod backsolve;
pub mod checker;
pub mod encoding;
pub mod error;
pub mod extract;
pub mod matrix;
pub mod program;
pub mod rng;
pub mod sample;
pub mod synth;
pub mod system;

pub use backsolve::backsolve;
pub use checker::checkkey;
pub use error::{EncodingError, MatrixError, ProgramFileError, SolveError};
pub use extract::{CancellationToken, ExtractConfig, ExtractOutcome, extractkey};
pub use matrix::{BitMatrix, BitVector};
pub use rng::rng_for_seed;
pub use program::{XProgram, read_program, write_program};
pub use sample::gensample;
pub use synth::gensamples;
pub use system::gensystem;
