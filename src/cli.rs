use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vtapatch")]
#[command(about = "Patch element class lists inside a raw Visual Tree Asset")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// More logging, repeat for trace output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the header counts, every element and the footer tables
    Inspect {
        /// Raw VTA blob as extracted from the bundle
        file: PathBuf,
    },

    /// Check that the blob decodes and re-encodes to the exact same bytes
    Verify {
        /// Raw VTA blob as extracted from the bundle
        file: PathBuf,
    },

    /// Apply a patch plan
    Patch {
        /// TOML patch plan
        #[arg(short, long, value_name = "FILE")]
        plan: PathBuf,

        /// Raw VTA blob as extracted from the bundle
        input: PathBuf,

        /// Where to write the patched blob, defaults to overwriting the input
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
