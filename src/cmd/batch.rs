//! Batch command - quote every row of a CSV file

use crate::cmd::open_input;
use crate::core::{run_batch, RateConfig};
use clap::Args;
use std::io;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// CSV file of quote rows. Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,
}

impl BatchCommand {
    pub fn exec(&self, rates: &RateConfig) -> anyhow::Result<()> {
        let reader = open_input(&self.file)?;
        let stdout = io::stdout();
        run_batch(reader, stdout.lock(), rates)?;
        Ok(())
    }
}
