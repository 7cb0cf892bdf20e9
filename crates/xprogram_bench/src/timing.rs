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

//! `xprogram-timing`: sweeps a list of quadratic-residue moduli and reports
//! per-trial extraction timing as CSV (component C12, ambient per §9A).

use std::error::Error;
use std::io;
use std::time::Instant;

use clap::Parser;
use log::debug;
use serde::Serialize;

use xprogram_bench::generate;
use xprogram_core::extract::{ExtractConfig, extractkey};
use xprogram_core::rng::rng_for_seed;

#[derive(Parser)]
struct Cli {
    /// Prime moduli (each must satisfy q = 7 mod 8) to sweep.
    #[arg(required = true)]
    moduli: Vec<u64>,

    /// Number of generator rows per synthesized program.
    #[arg(short = 'm', long, default_value_t = 4096)]
    generators: usize,

    /// Number of independent trials per modulus.
    #[arg(short = 't', long, default_value_t = 10)]
    trials: usize,

    #[arg(long)]
    seed: Option<u32>,
}

#[derive(Serialize)]
struct Row {
    n: usize,
    trial: usize,
    attempts: usize,
    keys_tried: usize,
    elapsed_ms: f64,
    success: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = rng_for_seed(cli.seed);

    let mut wtr = csv::Writer::from_writer(io::stdout());
    for &q in &cli.moduli {
        for trial in 0..cli.trials {
            let generated = generate(q, cli.generators, &mut rng)?;
            let n = generated.program.rows();
            let config = ExtractConfig::default();

            let start = Instant::now();
            let outcome = extractkey(&generated.program, config, None, &mut rng);
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

            let row = match outcome {
                Ok(result) => Row {
                    n,
                    trial,
                    attempts: result.attempts,
                    keys_tried: result.keys_tried,
                    elapsed_ms,
                    success: true,
                },
                Err(err) => {
                    debug!("trial failed for q={q}: {err}");
                    Row {
                        n,
                        trial,
                        attempts: config.maxit,
                        keys_tried: 0,
                        elapsed_ms,
                        success: false,
                    }
                }
            };
            wtr.serialize(row)?;
        }
    }
    wtr.flush()?;
    Ok(())
}
