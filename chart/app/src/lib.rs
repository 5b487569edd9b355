use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use chart_config::CONFIG;
use chart_rest_api::contract::Contract;
use chart_rest_api::validation::ValidationRules;

#[derive(Debug, Parser)]
#[command(name = "chart", about = "Checks documents against the chart API contracts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate JSON files against one contract
    Validate {
        /// Contract name, f.e. `pair-history`
        contract: Contract,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List known contracts with their endpoints
    Contracts,
}

pub fn run(cli: Cli) -> Result<()> {
    info!("▶ {} running...", CONFIG.application.name);
    match cli.command {
        Command::Validate { contract, files } => validate_files(contract, &files, &rules()),
        Command::Contracts => {
            for line in contract_lines() {
                println!("{line}");
            }
            Ok(())
        }
    }
}

pub fn rules() -> ValidationRules {
    ValidationRules {
        confidence_min: CONFIG.validation.confidence_min,
        confidence_max: CONFIG.validation.confidence_max,
        require_signal_family: CONFIG.validation.require_signal_family,
    }
}

pub fn validate_files(contract: Contract, files: &[PathBuf], rules: &ValidationRules) -> Result<()> {
    let failed = files.iter()
        .filter(|file| match validate_file(contract, file, rules) {
            Ok(()) => {
                info!("{} is a valid {contract}", file.display());
                false
            }
            Err(err) => {
                error!("{} is not a valid {contract}: {err:#}", file.display());
                true
            }
        })
        .count();
    if failed > 0 {
        bail!("{failed} of {} files failed validation", files.len());
    }
    Ok(())
}

pub fn validate_file(contract: Contract, file: &Path, rules: &ValidationRules) -> Result<()> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("Error reading {}", file.display()))?;
    contract.validate_json(&json, rules)?;
    Ok(())
}

pub fn contract_lines() -> Vec<String> {
    Contract::ALL.iter()
        .map(|contract| match contract.endpoint() {
            Some(endpoint) => format!("{contract:<24}{endpoint}"),
            None => format!("{contract:<24}-"),
        })
        .collect()
}
