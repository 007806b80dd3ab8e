//! # Zakat Calculator CLI
//!
//! Computes Zakat on cash, gold, silver and other assets from the command
//! line, through a guided wizard or in a full-screen dashboard.
//!
//! ## Usage
//! ```bash
//! # One-shot calculation
//! zakat-calc calculate --cash 50000 --gold-tola 10
//!
//! # Guided prompts
//! zakat-calc wizard
//!
//! # Interactive dashboard
//! zakat-calc dashboard --gold-tola 10 --silver-tola 3
//!
//! # JSON schemas for the engine types
//! zakat-calc schema
//! ```

use clap::{Args as ClapArgs, Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use zakat_calc::prelude::*;

mod config_loader;
mod display;
mod tui;
mod wizard;

use config_loader::{CliConfig, Overrides};
use tui::{App, handle_events, ui};

/// Zakat calculator for cash, gold, silver and other assets
#[derive(Parser, Debug)]
#[command(name = "zakat-calc")]
#[command(author = "zakat-calc contributors")]
#[command(version)]
#[command(about = "Calculate Zakat on cash, gold, silver and other assets", long_about = None)]
struct Args {
    /// Enable file logging to logs/ directory
    #[arg(long, global = true, default_value = "false")]
    log: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute Zakat for the given holdings and print the result
    Calculate {
        #[command(flatten)]
        input: InputArgs,

        /// Print the report as JSON
        #[arg(long, default_value = "false")]
        json: bool,

        /// Print the step-by-step calculation trace
        #[arg(long, default_value = "false")]
        explain: bool,

        /// Write the report to this file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Report format when exporting (text, json)
        #[arg(long, default_value = "text")]
        format: ExportFormat,
    },
    /// Prompt for each holding, then show the result (default)
    Wizard {
        #[command(flatten)]
        pricing: PricingArgs,
    },
    /// Open the interactive dashboard for the given holdings
    Dashboard {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Print JSON schemas for the input, configuration and report
    Schema,
}

#[derive(ClapArgs, Debug, Clone)]
struct InputArgs {
    /// Cash in hand
    #[arg(long, default_value = "0")]
    cash: Decimal,

    /// Gold held, in tola
    #[arg(long, default_value = "0")]
    gold_tola: Decimal,

    /// Silver held, in tola
    #[arg(long, default_value = "0")]
    silver_tola: Decimal,

    /// Other zakatable assets, in currency
    #[arg(long, default_value = "0")]
    other_assets: Decimal,

    #[command(flatten)]
    pricing: PricingArgs,
}

impl InputArgs {
    fn asset_input(&self) -> Result<AssetInput, ZakatError> {
        AssetInput::new(self.cash, self.gold_tola, self.silver_tola, self.other_assets)
    }
}

#[derive(ClapArgs, Debug, Clone, Default)]
struct PricingArgs {
    /// Gold price per gram (overrides environment and config file)
    #[arg(long)]
    gold_price: Option<Decimal>,

    /// Silver price per gram (overrides environment and config file)
    #[arg(long)]
    silver_price: Option<Decimal>,

    /// Nisab policy (value-based, unit-threshold)
    #[arg(long)]
    policy: Option<NisabPolicy>,

    /// Nisab standard for the value-based policy (gold, silver, lower-of-two)
    #[arg(long)]
    nisab_standard: Option<NisabStandard>,
}

impl From<&PricingArgs> for Overrides {
    fn from(args: &PricingArgs) -> Self {
        Self {
            gold_price: args.gold_price,
            silver_price: args.silver_price,
            nisab_policy: args.policy,
            nisab_standard: args.nisab_standard,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cli_config = CliConfig::load()?;

    // Initialize tracing with optional file logging
    // NOTE: The dashboard only logs to file (no console) to avoid corrupting the UI
    let is_tui_mode = matches!(args.command, Some(Commands::Dashboard { .. }));
    let _file_guard = init_tracing(args.log || cli_config.enable_logging.unwrap_or(false), is_tui_mode)?;

    match args.command.unwrap_or(Commands::Wizard {
        pricing: PricingArgs::default(),
    }) {
        Commands::Calculate {
            input,
            json,
            explain,
            export,
            format,
        } => run_calculate(&cli_config, &input, json, explain, export, format),
        Commands::Wizard { pricing } => run_wizard(&cli_config, &pricing),
        Commands::Dashboard { input } => run_dashboard(&cli_config, &input),
        Commands::Schema => run_schema(),
    }
}

fn init_tracing(
    log_to_file: bool,
    is_tui_mode: bool,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    if log_to_file {
        std::fs::create_dir_all("logs")?;

        let file_appender = tracing_appender::rolling::daily("logs", "zakat.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zakat_calc=debug"));
        // Only add console layer if NOT in TUI mode
        if is_tui_mode {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .init();
        }

        tracing::info!("--- Zakat Calculation Session Started [{}] ---", chrono::Utc::now());
        return Ok(Some(guard));
    }

    // Without --log the dashboard keeps tracing off entirely
    if !is_tui_mode {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("zakat_calc=info")))
            .init();
    }
    Ok(None)
}

fn run_calculate(
    cli_config: &CliConfig,
    input: &InputArgs,
    json: bool,
    explain: bool,
    export: Option<PathBuf>,
    format: ExportFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli_config.resolve(&Overrides::from(&input.pricing))?;
    let report = input.asset_input()?.calculate_zakat(&config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", display::render_report(&report)?);
    }

    if explain {
        println!("{}", report.explain());
    }

    if let Some(path) = export {
        finish_export(&report, &FileExporter::new(path, format))?;
    }

    Ok(())
}

fn run_wizard(cli_config: &CliConfig, pricing: &PricingArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli_config.resolve(&Overrides::from(pricing))?;
    let input = wizard::run_wizard_mode(&config.currency_code)?;
    let report = input.calculate_zakat(&config)?;

    println!();
    println!("{}", display::render_report(&report)?);

    if wizard::confirm_export()? {
        let exporter = FileExporter::in_dir(cli_config.export_dir(), ExportFormat::Text);
        finish_export(&report, &exporter)?;
    }

    Ok(())
}

/// A failed write is reported but leaves the shown result standing.
fn finish_export(report: &ZakatReport, exporter: &dyn ReportExporter) -> Result<(), ZakatError> {
    match display::export_with_feedback(report, exporter) {
        Err(e) if !e.is_recoverable() => Err(e),
        _ => Ok(()),
    }
}

fn run_dashboard(cli_config: &CliConfig, input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = cli_config.resolve(&Overrides::from(&input.pricing))?;
    let report = input.asset_input()?.calculate_zakat(&config)?;
    let exporter = FileExporter::in_dir(cli_config.export_dir(), ExportFormat::Text);

    let mut app = App::new(report, config, Box::new(exporter));

    // Initialize terminal
    let mut terminal = ratatui::init();

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    ratatui::restore();

    result
}

/// Main application loop
fn run_app(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| ui(frame, app))?;

        if handle_events(app)? {
            break;
        }
    }

    Ok(())
}

fn run_schema() -> Result<(), Box<dyn std::error::Error>> {
    let schemas = serde_json::json!({
        "AssetInput": schemars::schema_for!(AssetInput),
        "ZakatConfig": schemars::schema_for!(ZakatConfig),
        "ZakatReport": schemars::schema_for!(ZakatReport),
    });
    println!("{}", serde_json::to_string_pretty(&schemas)?);
    Ok(())
}
