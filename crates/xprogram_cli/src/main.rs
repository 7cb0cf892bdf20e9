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

//! `xprogram`: CLI front-end (component C11). Loads an X-program, recovers
//! its secret key, then either prints the key or synthesizes biased
//! samples that mimic the IQP sampling distribution for it.

use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;

use xprogram_core::encoding::{vectob64, vectobin};
use xprogram_core::extract::{ExtractConfig, extractkey};
use xprogram_core::program::{read_program, write_program};
use xprogram_core::rng::rng_for_seed;
use xprogram_core::synth::gensamples;

#[derive(Clone, Copy, ValueEnum)]
enum KeyEncoding {
    Bin,
    Base64,
}

#[derive(Parser)]
struct Cli {
    /// Path to the X-program file to attack.
    program: PathBuf,

    /// Number of samples to synthesize once the key is recovered.
    #[arg(short = 'N', default_value_t = 4096)]
    n_samples: usize,

    /// Output path for synthesized samples.
    #[arg(short = 'o', default_value = "samples.dat")]
    output: PathBuf,

    /// Print the recovered key in the given encoding instead of
    /// synthesizing samples.
    #[arg(short = 's', value_enum)]
    show_key: Option<KeyEncoding>,

    /// Seed the random generator for reproducible runs.
    #[arg(long)]
    seed: Option<u32>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let program = read_program(File::open(&cli.program)?)?;
    let mut rng = rng_for_seed(cli.seed);

    let outcome = extractkey(&program, ExtractConfig::default(), None, &mut rng)?;
    info!("recovered key after {} candidate(s) tried", outcome.keys_tried);

    if let Some(encoding) = cli.show_key {
        let rendered = match encoding {
            KeyEncoding::Bin => vectobin(&outcome.key),
            KeyEncoding::Base64 => vectob64(&outcome.key),
        };
        println!("{rendered}");
        return Ok(());
    }

    let samples = gensamples(&outcome.key, cli.n_samples, &mut rng);
    let file = File::create(&cli.output)?;
    write_program(file, &samples)?;
    info!("wrote {} sample(s) to {}", cli.n_samples, cli.output.display());
    Ok(())
}
