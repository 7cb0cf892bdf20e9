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

use std::fmt::{Display, Formatter};

/// Errors surfaced by the GF(2) bit-matrix primitive (C1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    DimensionMismatch { expected: usize, found: usize },
    OutOfBounds { index: usize, bound: usize },
}

impl Display for MatrixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DimensionMismatch { expected, found } => write!(
                f,
                "dimension mismatch: expected length {expected}, found {found}"
            ),
            Self::OutOfBounds { index, bound } => {
                write!(f, "index {index} out of bounds (limit {bound})")
            }
        }
    }
}

impl std::error::Error for MatrixError {}

/// Errors surfaced by the system builder, back-solver and extractor (C3-C6).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    Matrix(MatrixError),
    TooManyFreeColumns { free: usize, limit: usize },
    MaxIterationsExceeded { attempts: usize },
    Cancelled,
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matrix(err) => write!(f, "matrix operation failed: {err}"),
            Self::TooManyFreeColumns { free, limit } => write!(
                f,
                "back-solver would enumerate 2^{free} candidates, above the limit of 2^{limit}"
            ),
            Self::MaxIterationsExceeded { attempts } => {
                write!(f, "max iterations reached after {attempts} attempts")
            }
            Self::Cancelled => write!(f, "extraction was cancelled"),
        }
    }
}

impl std::error::Error for SolveError {}

impl From<MatrixError> for SolveError {
    fn from(err: MatrixError) -> Self {
        Self::Matrix(err)
    }
}

/// Errors surfaced by the X-program file reader/writer (C8).
#[derive(Debug)]
pub enum ProgramFileError {
    Parse { line: usize, message: String },
    Io(std::io::Error),
}

impl Display for ProgramFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { line, message } => write!(f, "parse error on line {line}: {message}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for ProgramFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse { .. } => None,
        }
    }
}

impl From<std::io::Error> for ProgramFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Errors surfaced by the key encoding/decoding routines (C9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    InvalidBit { index: usize, found: char },
    InvalidBase64 { message: String },
    LengthMismatch { expected: usize, found: usize },
}

impl Display for EncodingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBit { index, found } => {
                write!(f, "invalid bit character {found:?} at position {index}")
            }
            Self::InvalidBase64 { message } => write!(f, "invalid base64: {message}"),
            Self::LengthMismatch { expected, found } => write!(
                f,
                "decoded bit length mismatch: expected {expected}, found {found}"
            ),
        }
    }
}

impl std::error::Error for EncodingError {}
