use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use pullapart_core::{
    decompose, repair_session, ConfigFile, GameHost, GameSnapshot, KeyCode, KeyPressOutcome,
    PopupLog, PullApart, PullApartOutcome, RepairSummary, Result, VISIBLE_WAREHOUSES,
};

#[derive(Debug, Parser)]
#[command(
    name = "pullapart",
    version,
    about = "Pull apart every group in a Car Mechanic Simulator inventory"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate the pull apart key press against a game snapshot.
    Press {
        #[arg(long)]
        snapshot: PathBuf,

        /// Where to write the result. Defaults to overwriting the snapshot.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Settings file. Defaults to the per-user settings location.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Key to press. Defaults to the configured key.
        #[arg(long)]
        key: Option<KeyCode>,
    },

    /// Pull apart every group, ignoring open windows and settings.
    Decompose {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Run the broken part repair on the inventory and every warehouse.
    Repair {
        #[arg(long)]
        snapshot: PathBuf,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Inspect or change the settings file.
    Config {
        #[arg(long, global = true)]
        config: Option<PathBuf>,

        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    Init,
    SetKey { key: KeyCode },
    EnableFix,
    DisableFix,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn open_config(path: Option<&Path>) -> Result<ConfigFile> {
    match path {
        Some(path) => ConfigFile::load_or_create(path),
        None => ConfigFile::load_default(),
    }
}

fn save_snapshot(snapshot: &GameSnapshot, input: &Path, output: Option<&Path>) -> Result<()> {
    let target = output.unwrap_or(input);
    snapshot.save(target)?;
    tracing::info!(path = %target.display(), "snapshot written");
    Ok(())
}

fn print_popups(popups: &PopupLog) {
    for popup in popups.popups() {
        println!("[{}] {}", popup.title, popup.message);
    }
}

fn summary_line(summary: &RepairSummary) -> String {
    format!(
        "Fixed Items: Inventory: {} Warehouse: {} Deleted: {}",
        summary.inventory_fixed,
        summary.warehouse_total(),
        summary.deleted
    )
}

/// Per-warehouse lines for the warehouses the player can see, then the totals.
fn repair_report_lines(summary: &RepairSummary) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .warehouse_fixed
        .iter()
        .enumerate()
        .take(VISIBLE_WAREHOUSES)
        .map(|(index, count)| format!("Warehouse {} Items Fixed: {}", index + 1, count))
        .collect();
    lines.push(summary_line(summary));
    lines
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Press {
            snapshot: snapshot_path,
            output,
            config,
            key,
        } => {
            let mut snapshot = GameSnapshot::load(&snapshot_path)?;
            let mut app = PullApart::new(open_config(config.as_deref())?);
            app.on_scene_initialized(&snapshot.scene);

            let key = key.unwrap_or(app.config().pull_apart_groups);
            let mut popups = PopupLog::default();
            let outcome = app.on_key_down(key, &mut snapshot, &mut popups)?;
            print_popups(&popups);

            match outcome {
                KeyPressOutcome::Ignored => {
                    println!("{key} is not bound to pull apart; nothing to do");
                    return Ok(());
                }
                KeyPressOutcome::InputFocused => {
                    println!("A text field has focus; nothing to do");
                    return Ok(());
                }
                KeyPressOutcome::Handled { repair, pull_apart } => {
                    if let Some(summary) = &repair {
                        println!("{}", summary_line(summary));
                    }
                    if let PullApartOutcome::Decomposed(report) = pull_apart {
                        println!(
                            "Groups: {} Parts moved: {} Consumables dropped: {}",
                            report.groups_decomposed,
                            report.items_transferred,
                            report.items_dropped
                        );
                    }
                }
            }

            save_snapshot(&snapshot, &snapshot_path, output.as_deref())
        }

        Command::Decompose {
            snapshot: snapshot_path,
            output,
        } => {
            let mut snapshot = GameSnapshot::load(&snapshot_path)?;
            let session = snapshot.session();
            let Some(inventory) = session.inventory else {
                println!("Snapshot has no inventory; nothing to do");
                return Ok(());
            };

            let report = decompose(&mut inventory.groups, &mut inventory.items, session.classifier);
            println!("{} Groups Pulled Apart.", report.groups_decomposed);

            save_snapshot(&snapshot, &snapshot_path, output.as_deref())
        }

        Command::Repair {
            snapshot: snapshot_path,
            output,
        } => {
            let mut snapshot = GameSnapshot::load(&snapshot_path)?;
            let summary = repair_session(&mut snapshot.session());
            for line in repair_report_lines(&summary) {
                println!("{line}");
            }

            save_snapshot(&snapshot, &snapshot_path, output.as_deref())
        }

        Command::Config { config, action } => {
            let mut file = open_config(config.as_deref())?;
            match action {
                ConfigAction::Show | ConfigAction::Init => {}
                ConfigAction::SetKey { key } => file.set_pull_apart_groups(key)?,
                ConfigAction::EnableFix => file.set_fix_broken_parts(true)?,
                ConfigAction::DisableFix => file.set_fix_broken_parts(false)?,
            }

            let settings = file.config();
            println!("Settings: {}", file.path().display());
            println!("  PullApartGroups = {}", settings.pull_apart_groups);
            println!("  FixBrokenParts  = {}", settings.fix_broken_parts);
            if let Some(version) = &settings.last_repair_version {
                println!("  Last repair     = {version}");
            }
            Ok(())
        }
    }
}

fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
