use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use rayforge_package_core::ValidationError;
use rayforge_package_validate::{
    Expectations, Progress, Report, ValidationMode, ValidationPipeline, ValidatorConfig,
};
use tracing_subscriber::EnvFilter;

const SUCCESS_MESSAGE: &str = "SUCCESS: Your package metadata looks great!";

#[derive(Debug, Parser)]
#[command(name = "rayforge-validate", version)]
#[command(about = "Validate a Rayforge package's rayforge-package.yaml")]
struct Cli {
    /// Package root directory.
    #[arg(default_value = ".")]
    path: PathBuf,
    /// Expected release tag, e.g. v1.2.3.
    #[arg(long)]
    tag: Option<String>,
    /// Expected package name.
    #[arg(long)]
    name: Option<String>,
    /// Validator configuration file (YAML).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Report every failure instead of stopping at the first.
    #[arg(long)]
    all: bool,
    /// Log resolution details to stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn log_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(if self.verbose {
                "debug"
            } else if self.quiet {
                "error"
            } else {
                "warn"
            })
        })
    }

    fn expectations(&self) -> Expectations {
        Expectations {
            tag: self.tag.clone(),
            name: self.name.clone(),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(cli.log_filter())
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();

    let config = match load_config(cli.config.as_deref(), cli.all) {
        Ok(config) => config,
        Err(err) => {
            print_failures(&mut io::stderr(), std::slice::from_ref(&err));
            return ExitCode::FAILURE;
        }
    };

    let mut console = ConsoleProgress::new(io::stdout());
    let report = ValidationPipeline::new(config).run(&cli.path, &cli.expectations(), &mut console);
    finish(&report, &mut io::stdout(), &mut io::stderr());
    ExitCode::from(report.exit_code())
}

fn load_config(path: Option<&Path>, all: bool) -> Result<ValidatorConfig, ValidationError> {
    let mut config = match path {
        Some(path) => ValidatorConfig::load(path).map_err(|err| {
            ValidationError::Unexpected(format!(
                "failed to load config '{}': {err}",
                path.display()
            ))
        })?,
        None => ValidatorConfig::default(),
    };
    if all {
        config.mode = ValidationMode::CollectAll;
    }
    tracing::debug!(?config, "loaded validator config");
    Ok(config)
}

/// Renders pipeline progress as console lines.
struct ConsoleProgress<W: Write> {
    out: W,
}

impl<W: Write> ConsoleProgress<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Progress for ConsoleProgress<W> {
    fn begin(&mut self, root: &Path) {
        let _ = writeln!(self.out, "Validating package at: {}", root.display());
    }

    fn phase(&mut self, message: &str) {
        let _ = writeln!(self.out, "-> {message}");
    }

    fn passed(&mut self, message: &str) {
        let _ = writeln!(self.out, "   ... {message}");
    }
}

fn finish(report: &Report, out: &mut impl Write, err: &mut impl Write) {
    if report.is_success() {
        let _ = writeln!(out, "\n{SUCCESS_MESSAGE}");
    } else {
        print_failures(err, report.failures());
    }
}

fn print_failures(err: &mut impl Write, failures: &[ValidationError]) {
    for failure in failures {
        let _ = writeln!(err, "\n{}", error_line(failure));
    }
}

/// Formats one failure the way the console reports it.
fn error_line(failure: &ValidationError) -> String {
    if failure.kind().is_check_failure() {
        format!("ERROR: Validation failed. {failure}")
    } else {
        format!("ERROR: {failure}")
    }
}
