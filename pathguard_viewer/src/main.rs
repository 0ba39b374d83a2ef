//! PathGuard CLI
//!
//! Classify a recorded flight against its plan and terrain horizon, then
//! render it headless, step through it, or open the terminal dashboard.

use clap::Parser;
use pathguard_core::{
    run_reveal, ConfigError, ProjectionView, VisualCategory, Workbench, WorkbenchConfig, WorkbenchError,
};
use pathguard_env::TokioClock;
use pathguard_viewer::{demo_flight, ClassificationSummary, DemoConfig, SyntheticError};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Errors that end a CLI run.
#[derive(Debug, Error)]
enum CliError {
    #[error("no input given; pass a file or --demo")]
    NoInput,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Workbench(#[from] WorkbenchError),

    #[error(transparent)]
    Synthetic(#[from] SyntheticError),

    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// PathGuard trajectory safety viewer
#[derive(Parser, Debug)]
#[command(name = "pathguard")]
#[command(about = "Check a recorded flight against its plan and terrain horizon", long_about = None)]
struct Args {
    /// Input file (text format, or a JSON document ending in .json)
    input: Option<PathBuf>,

    /// Use a seeded synthetic flight instead of an input file
    #[arg(long, conflicts_with = "input")]
    demo: bool,

    /// Seed for the synthetic flight
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Step through the trajectory one sample per frame
    #[arg(short, long)]
    animate: bool,

    /// Delay between reveal frames, overriding the config
    #[arg(long)]
    frame_delay_ms: Option<u64>,

    /// Workbench configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON classification summary on stdout
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Open the terminal dashboard
    #[cfg(feature = "dashboard")]
    #[arg(long)]
    dashboard: bool,
}

fn main() {
    let args = Args::parse();

    // Initialize logging; stdout is reserved for --json. RUST_LOG overrides
    // the --verbose level.
    let level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    if let Err(e) = run(args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let mut config = match &args.config {
        Some(path) => WorkbenchConfig::from_json_file(path)?,
        None => WorkbenchConfig::default(),
    };
    if let Some(delay) = args.frame_delay_ms {
        config.frame_delay_ms = delay;
    }

    let mut workbench = Workbench::new(&config).with_status_listener(|status| {
        if !status.to_string().is_empty() {
            debug!("{}", status);
        }
    });

    let source = if args.demo {
        info!("Generating demo flight (seed={})", args.seed);
        let data = demo_flight(&DemoConfig {
            seed: args.seed,
            ..DemoConfig::default()
        })?;
        workbench.load_data(data)?;
        format!("demo (seed={})", args.seed)
    } else {
        let path = args.input.as_ref().ok_or(CliError::NoInput)?;
        workbench.load_file(path)?;
        path.display().to_string()
    };

    #[cfg(feature = "dashboard")]
    {
        if args.dashboard {
            let mut dashboard = pathguard_viewer::ViewerDashboard::new(workbench, TokioClock::new(), source);
            if args.animate {
                dashboard.start_reveal();
            }
            dashboard.run()?;
            return Ok(());
        }
    }

    if args.animate {
        reveal(&mut workbench)?;
    }

    if args.json {
        let summary = ClassificationSummary::from_session(source, workbench.session());
        let output = serde_json::json!({
            "summary": summary,
            "views": workbench.views().iter().map(view_json).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let report = workbench.session().report();
        info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        info!("{}", source);
        if report.is_clear() {
            info!("✓ No danger points or horizon crossings");
        } else {
            info!(
                "✗ {} off-plan samples, {} horizon crossings",
                report.danger_points.len(),
                report.danger_segment_starts.len()
            );
        }
        for view in workbench.views().iter() {
            log_view(view);
        }
    }

    Ok(())
}

/// Steps through the trajectory in real time.
fn reveal(workbench: &mut Workbench) -> Result<(), CliError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let clock = TokioClock::new();
    let total = workbench.session().data().trajectory.len();

    let summary = runtime.block_on(run_reveal(workbench, &clock, |wb, index| {
        let flagged = wb.session().report().is_danger_point(index);
        info!(
            "frame {}/{}{}",
            index + 1,
            total.max(1),
            if flagged { "  ⚠ off-plan" } else { "" }
        );
    }))?;

    debug!("Reveal finished after {} frames", summary.frames);
    Ok(())
}

fn log_view(view: &ProjectionView) {
    let h = view.horizontal_range();
    let v = view.vertical_range();
    info!(
        "{}: {} [{:.1}, {:.1}] x {} [{:.1}, {:.1}], {} trajectory / {} danger points",
        view.title(),
        view.horizontal_axis().title(),
        h.min,
        h.max,
        view.vertical_axis().title(),
        v.min,
        v.max,
        view.points(VisualCategory::Trajectory).len(),
        view.points(VisualCategory::Danger).len()
    );
}

fn view_json(view: &ProjectionView) -> serde_json::Value {
    serde_json::json!({
        "title": view.title(),
        "horizontal_axis": view.horizontal_axis().title(),
        "vertical_axis": view.vertical_axis().title(),
        "horizontal_range": view.horizontal_range(),
        "vertical_range": view.vertical_range(),
        "series": view.series().len(),
    })
}
