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

//! Bin and base64 key encodings (component C9, §6.3).

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;

use crate::error::EncodingError;
use crate::matrix::BitVector;

/// Render `key` as an ASCII string of `0`/`1`, bit 0 first.
pub fn vectobin(key: &BitVector) -> String {
    (0..key.len()).map(|i| if key.get(i) { '1' } else { '0' }).collect()
}

/// Parse a `vectobin`-style string back into a bit vector.
pub fn bin_decode(s: &str) -> Result<BitVector, EncodingError> {
    let mut out = BitVector::zeros(s.len());
    for (i, ch) in s.chars().enumerate() {
        match ch {
            '0' => out.set(i, false),
            '1' => out.set(i, true),
            other => return Err(EncodingError::InvalidBit { index: i, found: other }),
        }
    }
    Ok(out)
}

/// Left-pad `key` to a whole number of bytes and render as standard base64.
///
/// Bit 0 of the vector becomes the MSB of the first packed byte; the pad
/// width is `7 - ((n - 1) mod 8)` zero bits, matching the wire contract that
/// lets [`b64_decode`] reconstruct the original length.
pub fn vectob64(key: &BitVector) -> String {
    let n = key.len();
    if n == 0 {
        return B64.encode([]);
    }
    let pad = 7 - ((n - 1) % 8);
    let total_bits = pad + n;
    let mut bytes = vec![0u8; total_bits / 8];
    for i in 0..n {
        if key.get(i) {
            let bit_pos = pad + i;
            let byte = bit_pos / 8;
            let shift = 7 - (bit_pos % 8);
            bytes[byte] |= 1 << shift;
        }
    }
    B64.encode(bytes)
}

/// Decode a `vectob64`-style string into a bit vector of the given length.
pub fn b64_decode(s: &str, n: usize) -> Result<BitVector, EncodingError> {
    let bytes = B64
        .decode(s)
        .map_err(|err| EncodingError::InvalidBase64 { message: err.to_string() })?;
    if n == 0 {
        return Ok(BitVector::zeros(0));
    }
    let pad = 7 - ((n - 1) % 8);
    let total_bits = pad + n;
    if bytes.len() * 8 != total_bits {
        return Err(EncodingError::LengthMismatch {
            expected: total_bits,
            found: bytes.len() * 8,
        });
    }
    let mut out = BitVector::zeros(n);
    for i in 0..n {
        let bit_pos = pad + i;
        let byte = bit_pos / 8;
        let shift = 7 - (bit_pos % 8);
        out.set(i, (bytes[byte] >> shift) & 1 == 1);
    }
    Ok(out)
}
