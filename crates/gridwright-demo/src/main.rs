//! Runs a placement scene headlessly and prints the result.
//!
//! Run with: `cargo run --package gridwright-demo -- scenes/living_room.ron`

use clap::Parser;
use gridwright_demo::{RunReport, SceneData, SceneError, load_scene, render_board, run_scene};
use gridwright_session::{SessionConfig, SessionEvent};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_SCENE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/scenes/living_room.ron");

#[derive(Parser)]
#[command(name = "gridwright-demo")]
#[command(version, about = "Play a scripted placement scene and print the board")]
struct Cli {
    /// Scene file to run (defaults to the bundled living room)
    #[arg(value_name = "SCENE")]
    scene: Option<PathBuf>,

    /// Session configuration (.ron, .toml or .json)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print a one-line summary instead of the board and event log
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SceneError> {
    let scene_path = cli
        .scene
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCENE));
    let scene = load_scene(&scene_path)?;
    let config = cli
        .config
        .as_deref()
        .map(SessionConfig::from_file)
        .transpose()?;

    let report = run_scene(&scene, config.as_ref())?;

    if cli.quiet {
        println!(
            "{}: {} objects, {} events, {} stored",
            scene.title,
            report.scene.board.len(),
            report.events.len(),
            report.session.storage().iter().map(|(_, n)| n).sum::<u32>()
        );
    } else {
        print_report(&scene, &report);
    }
    Ok(())
}

fn print_report(scene: &SceneData, report: &RunReport) {
    println!("=== {} ===", scene.title);
    if !scene.description.is_empty() {
        println!("{}", scene.description);
    }
    println!();
    print!("{}", render_board(&report.scene.board));

    println!("\nStorage:");
    let mut stored = report.session.storage().iter().peekable();
    if stored.peek().is_none() {
        println!("  (empty)");
    }
    for (kind, count) in stored {
        println!("  {kind:>12} x{count}");
    }

    println!("\nEvents:");
    for event in &report.events {
        println!("  {}", describe(report, event));
    }
    if report.dropped_events > 0 {
        println!("  ({} earlier events dropped)", report.dropped_events);
    }
}

fn describe(report: &RunReport, event: &SessionEvent) -> String {
    let name = |id| report.scene.name_of(id).unwrap_or("?");
    match event {
        SessionEvent::EditingChanged { enabled } => format!("editing {enabled}"),
        SessionEvent::HoldStarted { id, origin } => {
            format!("hold {} at {:?}", name(*id), origin)
        }
        SessionEvent::Moved { id, origin, valid } => {
            let verdict = if *valid { "ok" } else { "blocked" };
            format!("move {} to {:?} ({verdict})", name(*id), origin)
        }
        SessionEvent::Rotated { id, rotation } => {
            format!("rotate {} to {} degrees", name(*id), rotation.degrees())
        }
        SessionEvent::Placed { id, footprint } => {
            format!("place {} at {:?}", name(*id), footprint.origin)
        }
        SessionEvent::ConfirmRejected { id, blocked } => {
            format!("reject {} ({blocked} blocked cells)", name(*id))
        }
        SessionEvent::Reverted { id, footprint } => {
            format!("revert {} to {:?}", name(*id), footprint.origin)
        }
        SessionEvent::Stored { id, kind } => format!("store {} as {kind}", name(*id)),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
