// Tue Jan 20 2026 - Alex

use super::args::{Args, Command, GenerateArgs, OffsetsArgs};
use crate::config::Config;
use crate::engine::Engine;
use crate::reflect::TypeDatabase;
use crate::ui::spinner::ProgressSpinner;
use crate::ui::{print_info, print_success};
use anyhow::Context;
use colored::Colorize;

pub struct CommandHandler {
    quiet: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn execute(&mut self, args: Args) -> anyhow::Result<()> {
        self.quiet = args.quiet;
        if args.no_color {
            colored::control::set_override(false);
        }
        self.setup_logging(&args)?;

        match args.command {
            Command::Generate(gen_args) => self.handle_generate(gen_args),
            Command::Offsets(offsets_args) => self.handle_offsets(offsets_args),
        }
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Info,
        };
        let level = if self.quiet { log::LevelFilter::Error } else { level };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }

    fn load_types(&self, path: &std::path::Path) -> anyhow::Result<TypeDatabase> {
        let db = TypeDatabase::load(path)
            .with_context(|| format!("Failed to load type database {}", path.display()))?;
        if !self.quiet {
            print_info(&format!(
                "Loaded {} types from {}",
                db.type_count(),
                path.display()
            ));
        }
        Ok(db)
    }

    fn handle_generate(&self, args: GenerateArgs) -> anyhow::Result<()> {
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(output) = args.output {
            config = config.with_output_file(output);
        }

        let db = self.load_types(&args.types)?;
        let spinner = if self.quiet {
            ProgressSpinner::hidden()
        } else {
            ProgressSpinner::new("Laying out trace entry types")
        };

        let mut engine = Engine::new(&db, config);
        let artifact = match engine.run_and_write() {
            Ok(artifact) => artifact,
            Err(e) => {
                spinner.failure("Generation failed");
                return Err(e.into());
            }
        };
        spinner.success(&format!("Done in {:.2}s", spinner.elapsed().as_secs_f64()));

        if !self.quiet {
            let summary = artifact.summary();
            println!(
                "  Entry size: {}, base block: {} bytes",
                summary.entry_size.to_string().green(),
                summary.base_block_size.to_string().green()
            );
            println!(
                "  Subtypes: {}, typedefs: {}",
                summary.members.len().to_string().green(),
                summary.typedefs.to_string().green()
            );
            print_success(&format!(
                "Output written to: {}",
                engine.config().output_file.display()
            ));
        }
        Ok(())
    }

    fn handle_offsets(&self, args: OffsetsArgs) -> anyhow::Result<()> {
        let db = self.load_types(&args.types)?;
        let engine = Engine::new(&db, Config::default());
        print!("{}", engine.dump_offsets(&args.type_name, args.all)?);
        Ok(())
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
