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

//! `xprogram-bench`: generates quadratic-residue X-program instances for
//! testing and benchmarking the extractor.

use std::error::Error;
use std::fs::File;
use std::io::{self, Write};

use clap::Parser;
use log::info;
use serde::Serialize;

use xprogram_bench::generate;
use xprogram_core::encoding::vectobin;
use xprogram_core::program::write_program;
use xprogram_core::rng::rng_for_seed;

#[derive(Parser)]
struct Cli {
    /// Prime modulus q, must satisfy q = 7 (mod 8).
    q: u64,

    /// Number of generator rows in the synthesized program.
    #[arg(short = 'm', long, default_value_t = 4096)]
    generators: usize,

    /// Output path for the generated X-program file.
    #[arg(short = 'o', long, default_value = "bench.prog")]
    output: String,

    /// Seed the random generator for reproducible instances.
    #[arg(long)]
    seed: Option<u32>,

    /// Print the planted key (in `bin` encoding) to stdout instead of
    /// writing the program file.
    #[arg(short = 's', long)]
    show_key: bool,

    /// After generating, print a JSON manifest line describing the instance
    /// (modulus, shape, planted key) to stdout.
    #[arg(long)]
    manifest: bool,
}

#[derive(Serialize)]
struct Manifest {
    q: u64,
    n: usize,
    m: usize,
    key_bin: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut rng = rng_for_seed(cli.seed);
    let generated = generate(cli.q, cli.generators, &mut rng)?;

    if cli.manifest {
        let manifest = Manifest {
            q: cli.q,
            n: generated.program.rows(),
            m: generated.program.cols(),
            key_bin: vectobin(&generated.key),
        };
        let mut line = serde_json::to_string(&manifest)?;
        line.push('\n');
        io::stdout().write_all(line.as_bytes())?;
    }

    if cli.show_key {
        println!("{}", vectobin(&generated.key));
        return Ok(());
    }

    let file = File::create(&cli.output)?;
    write_program(file, &generated.program)?;
    info!(
        "wrote X-program (n={}, m={}) to {}",
        generated.program.rows(),
        generated.program.cols(),
        cli.output
    );
    Ok(())
}
