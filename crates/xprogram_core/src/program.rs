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

//! The text X-program file format (component C8, §6.1).
//!
//! ```text
//! nr = <integer>
//! nc = <integer>
//! <nc space-separated 0/1 tokens>        (repeated nr times)
//! =====
//!
//! ```
//!
//! The loader stores the program transposed: file row `i`, column `j` lands
//! at matrix bit `(j, i)`, so the in-memory [`BitMatrix`] has `nc` rows and
//! `nr` columns, ready for column-major reads by the solver.

use std::io::{BufRead, BufReader, Read, Write};

use crate::error::ProgramFileError;
use crate::matrix::BitMatrix;

/// An X-program, stored transposed: `rows()` is the generator length `N`,
/// `cols()` is the number of generators `M`.
pub type XProgram = BitMatrix;

/// Parse the `nr = <int>` / `nc = <int>` style header line by stripping the
/// fixed 5-character prefix, per the file-format contract.
fn parse_header_line(line: &str, line_no: usize, label: &str) -> Result<usize, ProgramFileError> {
    if line.len() < 5 {
        return Err(ProgramFileError::Parse {
            line: line_no,
            message: format!("expected `{label} = <int>` header"),
        });
    }
    let (prefix, rest) = line.split_at(5);
    let expected_prefix = format!("{label} = ");
    if prefix != expected_prefix {
        return Err(ProgramFileError::Parse {
            line: line_no,
            message: format!("expected header to start with `{expected_prefix}`, got `{prefix}`"),
        });
    }
    rest.trim().parse::<usize>().map_err(|_| ProgramFileError::Parse {
        line: line_no,
        message: format!("could not parse integer from `{rest}`"),
    })
}

/// Read an X-program from the text format described above.
pub fn read_program<R: Read>(reader: R) -> Result<XProgram, ProgramFileError> {
    let mut lines = BufReader::new(reader).lines();

    let nr_line = lines
        .next()
        .ok_or_else(|| ProgramFileError::Parse {
            line: 1,
            message: "missing `nr = <int>` header".to_string(),
        })??;
    let nr = parse_header_line(&nr_line, 1, "nr")?;

    let nc_line = lines
        .next()
        .ok_or_else(|| ProgramFileError::Parse {
            line: 2,
            message: "missing `nc = <int>` header".to_string(),
        })??;
    let nc = parse_header_line(&nc_line, 2, "nc")?;

    let mut grid = Vec::with_capacity(nr);
    for row in 0..nr {
        let line_no = row + 3;
        let line = lines
            .next()
            .ok_or_else(|| ProgramFileError::Parse {
                line: line_no,
                message: format!("expected {nr} data rows, found {row}"),
            })??;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != nc {
            return Err(ProgramFileError::Parse {
                line: line_no,
                message: format!("expected {nc} tokens, found {}", tokens.len()),
            });
        }
        let mut values = Vec::with_capacity(nc);
        for (col, token) in tokens.iter().enumerate() {
            let value = match *token {
                "0" => 0u8,
                "1" => 1u8,
                other => {
                    return Err(ProgramFileError::Parse {
                        line: line_no,
                        message: format!("non-binary token `{other}` at column {col}"),
                    });
                }
            };
            values.push(value);
        }
        grid.push(values);
    }
    // Remaining lines (the `=====` footer and anything after) are tolerated
    // and intentionally ignored.

    Ok(BitMatrix::from_rows_transposed(&grid))
}

/// Write an X-program in the text format described above.
pub fn write_program<W: Write>(mut writer: W, program: &XProgram) -> Result<(), ProgramFileError> {
    let nr = program.cols();
    let nc = program.rows();
    writeln!(writer, "nr = {nr}")?;
    writeln!(writer, "nc = {nc}")?;
    for grid_row in program.to_rows_transposed() {
        let mut line = String::with_capacity(grid_row.len() * 2);
        for value in grid_row {
            line.push_str(if value != 0 { "1" } else { "0" });
            line.push(' ');
        }
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "=====")?;
    writeln!(writer)?;
    Ok(())
}
