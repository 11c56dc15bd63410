// Tue Jan 20 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ktrace-gen")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Generates the packed C header for kernel trace-buffer entries", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "info")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the trace event header
    Generate(GenerateArgs),
    /// Print member offsets of one type
    Offsets(OffsetsArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// JSON type database extracted from the kernel's debug info
    #[arg(short, long)]
    pub types: PathBuf,

    /// Overrides `output_file` from the configuration
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct OffsetsArgs {
    pub type_name: String,

    #[arg(short, long)]
    pub types: PathBuf,

    /// Also list members without storage
    #[arg(short, long)]
    pub all: bool,
}

impl GenerateArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.types.exists() {
            return Err(format!("Type database does not exist: {}", self.types.display()));
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {}", config.display()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_generate() {
        let args = Args::try_parse_from([
            "ktrace-gen", "--log-level", "debug", "generate", "-t", "fiasco.json", "-o", "out.h",
        ])
        .unwrap();
        assert_eq!(args.log_level, "debug");
        match args.command {
            Command::Generate(g) => {
                assert_eq!(g.types, PathBuf::from("fiasco.json"));
                assert_eq!(g.output, Some(PathBuf::from("out.h")));
                assert!(g.config.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_offsets() {
        let args = Args::try_parse_from([
            "ktrace-gen", "offsets", "Tb_entry_pf", "--types", "fiasco.json", "--all", "-q",
        ])
        .unwrap();
        assert!(args.quiet);
        match args.command {
            Command::Offsets(o) => {
                assert_eq!(o.type_name, "Tb_entry_pf");
                assert!(o.all);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_generate_requires_types() {
        assert!(Args::try_parse_from(["ktrace-gen", "generate"]).is_err());
    }

    #[test]
    fn test_validate_missing_database() {
        let args = GenerateArgs {
            types: PathBuf::from("/nonexistent/fiasco.json"),
            output: None,
            config: None,
        };
        assert!(args.validate().is_err());
    }
}
