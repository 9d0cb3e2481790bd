//! enginelint - main entry point
//!
//! Loads page data, runs the linter and maps the outcome to an exit status:
//! 0 clean (or warnings only), 1 findings that fail the run, 2 unusable input.

use anyhow::Context;
use std::path::Path;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use enginelint::cli::{Cli, Commands};
use enginelint::report;
use enginelint::{LintConfig, Linter, OutputFormat, PageData};

const EXIT_FINDINGS: i32 = 1;
const EXIT_BAD_INPUT: i32 = 2;

/// Initialize the tracing subscriber on stderr so stdout stays machine-readable
fn init_logger(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    // RUST_LOG overrides the -v flags
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_logger(cli.verbose);
    debug!("CLI arguments parsed");

    match cli.command {
        Commands::Lint {
            data,
            config,
            format,
            brand,
            engine,
            deny_warnings,
        } => {
            let config = match config {
                Some(path) => {
                    info!("Loading lint configuration: {:?}", path);
                    LintConfig::load_from_file(&path).unwrap_or_else(|e| fail_input(&e))
                }
                None => LintConfig::default(),
            };
            let data = load_data(&data);
            run_lint(&data, config, format, brand.as_deref(), engine.as_deref(), deny_warnings)?;
        }
        Commands::List { data } => {
            let data = load_data(&data);
            print!("{}", report::render_listing(&data));
        }
        Commands::Jsonld {
            data,
            brand,
            engine,
            script_tag,
        } => {
            let data = load_data(&data);
            let page = data
                .engine(&brand, &engine)
                .unwrap_or_else(|e| fail_input(&e));
            println!("{}", report::render_jsonld(&page.schema, script_tag)?);
        }
        Commands::InitConfig { path } => {
            LintConfig::default()
                .save_to_file(&path)
                .with_context(|| format!("Failed to initialize {:?}", path))?;
            info!("Wrote default lint configuration to {:?}", path);
            println!("✓ Wrote default lint configuration to {}", path.display());
        }
    }

    Ok(())
}

fn run_lint(
    data: &PageData,
    config: LintConfig,
    format: OutputFormat,
    brand: Option<&str>,
    engine: Option<&str>,
    deny_warnings: bool,
) -> anyhow::Result<()> {
    let linter = Linter::new(config);
    let report = linter
        .lint_filtered(data, brand, engine)
        .unwrap_or_else(|e| fail_input(&e));

    print!("{}", report::render(&report, format)?);
    if format == OutputFormat::Json {
        println!();
    }

    let failed = report.has_errors() || (deny_warnings && report.warning_count() > 0);
    if failed {
        error!(
            "Lint failed: {} error(s), {} warning(s)",
            report.error_count(),
            report.warning_count()
        );
        std::process::exit(EXIT_FINDINGS);
    }
    Ok(())
}

fn load_data(path: &Path) -> PageData {
    info!("Loading page data: {:?}", path);
    PageData::load_from_file(path).unwrap_or_else(|e| fail_input(&e))
}

/// Report input that cannot be linted at all and exit
fn fail_input(err: &dyn std::fmt::Display) -> ! {
    error!("{}", err);
    eprintln!("✗ {}", err);
    std::process::exit(EXIT_BAD_INPUT);
}
