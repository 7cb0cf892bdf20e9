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

//! Quadratic-residue X-program generator (component C10), used to produce
//! benchmark and test instances for [`xprogram_core`]'s extractor.

pub mod gauss_jordan;
pub mod generate;
pub mod qr;

pub use generate::{BenchError, GeneratedProgram, generate};
