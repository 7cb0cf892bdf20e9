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

//! The single uniform bit/real source the solver draws from.
//!
//! Every randomized component (C2, C5, C7, and the benchmark generator) is
//! generic over `rand::Rng` so tests can seed a [`rand::rngs::StdRng`] for
//! reproducibility; binaries default to the thread-local generator.

use rand::{Rng, RngCore};

use crate::matrix::BitVector;

/// Seed a deterministic generator from a 32-bit value, matching the test
/// suite's documented seed (`0xBEEFCAFE`).
pub fn seeded_rng(seed: u32) -> rand::rngs::StdRng {
    use rand::SeedableRng;
    rand::rngs::StdRng::seed_from_u64(u64::from(seed))
}

/// Either a seeded, reproducible generator or the process's thread-local
/// one, picked once at startup by [`rng_for_seed`].
///
/// Binaries expose `--seed` for reproducible runs; without it they fall
/// back to `rand::rng()` so repeated invocations aren't identical.
pub enum AnyRng {
    Seeded(rand::rngs::StdRng),
    Thread(rand::rngs::ThreadRng),
}

impl RngCore for AnyRng {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Seeded(rng) => rng.next_u32(),
            Self::Thread(rng) => rng.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Self::Seeded(rng) => rng.next_u64(),
            Self::Thread(rng) => rng.next_u64(),
        }
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        match self {
            Self::Seeded(rng) => rng.fill_bytes(dst),
            Self::Thread(rng) => rng.fill_bytes(dst),
        }
    }
}

/// Pick a reproducible generator when `seed` is given, otherwise the
/// thread-local one.
pub fn rng_for_seed(seed: Option<u32>) -> AnyRng {
    match seed {
        Some(seed) => AnyRng::Seeded(seeded_rng(seed)),
        None => AnyRng::Thread(rand::rng()),
    }
}

/// Draw a uniformly random bit vector of the given length.
pub fn random_bit_vector<R: Rng + ?Sized>(rng: &mut R, len: usize) -> BitVector {
    let mut out = BitVector::zeros(len);
    for i in 0..len {
        out.set(i, rng.random());
    }
    out
}

/// Draw a uniform real in `[0, 1)`.
pub fn random_unit_interval<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.random::<f64>()
}
