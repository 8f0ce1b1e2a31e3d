//! `cavern`: run, plan and verify cavern episodes from the command line.
//!
//! ```text
//! cavern run <fixture.json> [--selection linear|heap] [--max-moves N]
//!            [--verify-budget] [--no-gold] [--out DIR]
//! cavern run --world ring4
//! cavern plan <fixture.json>
//! cavern verify <DIR>
//! cavern world <NAME>
//! ```

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cavern_harness::fixture::CavernFixture;
use cavern_harness::logging;
use cavern_harness::report_dir::{read_report_dir, write_report_dir};
use cavern_harness::runner::{run_episode, RunConfig};
use cavern_harness::worlds;
use cavern_kernel::proof::canon::canonical_json_line;
use cavern_search::escape::plan_escape;
use cavern_search::policy::{BudgetCheck, EscapePolicy, ExplorePolicy, SelectionStrategy};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "cavern", version, about = "Find the orb, then escape the cavern")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Explore to the orb, escape to the exit, print the episode report.
    Run {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        selection: Selection,
        /// Cap on exploration moves.
        #[arg(long)]
        max_moves: Option<u64>,
        /// Refuse to escape if the route is longer than the time left.
        #[arg(long)]
        verify_budget: bool,
        /// Walk the escape route without picking up gold.
        #[arg(long)]
        no_gold: bool,
        /// Also write the report directory here.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the escape route from the orb to the exit without running.
    Plan {
        #[command(flatten)]
        source: Source,
        #[command(flatten)]
        selection: Selection,
    },
    /// Check a report directory written by `run --out`.
    Verify { dir: PathBuf },
    /// Print a canned world as fixture JSON (`list` prints the names).
    World { name: String },
}

#[derive(Args)]
struct Source {
    /// Fixture file.
    #[arg(required_unless_present = "world", conflicts_with = "world")]
    fixture: Option<PathBuf>,
    /// Canned world name instead of a fixture file.
    #[arg(long)]
    world: Option<String>,
}

#[derive(Args)]
struct Selection {
    /// Dijkstra selection strategy.
    #[arg(long, value_enum, default_value_t = SelectionArg::Linear)]
    selection: SelectionArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum SelectionArg {
    Linear,
    Heap,
}

impl From<SelectionArg> for SelectionStrategy {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::Linear => Self::LinearScan,
            SelectionArg::Heap => Self::BinaryHeap,
        }
    }
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            source,
            selection,
            max_moves,
            verify_budget,
            no_gold,
            out,
        } => {
            let config = RunConfig {
                explore: ExplorePolicy {
                    max_moves: max_moves.unwrap_or(ExplorePolicy::default().max_moves),
                },
                escape: EscapePolicy {
                    selection: selection.selection.into(),
                    collect_gold: !no_gold,
                    budget_check: if verify_budget {
                        BudgetCheck::Verify
                    } else {
                        BudgetCheck::Trust
                    },
                },
            };
            cmd_run(&source, &config, out.as_deref())
        }
        Command::Plan { source, selection } => cmd_plan(&source, selection.selection.into()),
        Command::Verify { dir } => cmd_verify(&dir),
        Command::World { name } => cmd_world(&name),
    }
}

fn load(source: &Source) -> Result<CavernFixture> {
    match (&source.fixture, &source.world) {
        (Some(path), _) => {
            CavernFixture::load(path).with_context(|| format!("loading {}", path.display()))
        }
        (None, Some(name)) => match worlds::by_name(name) {
            Some(fixture) => Ok(fixture),
            None => bail!("unknown world {name:?}; known: {}", worlds::NAMES.join(", ")),
        },
        (None, None) => bail!("give a fixture path or --world"),
    }
}

fn cmd_run(source: &Source, config: &RunConfig, out: Option<&Path>) -> Result<()> {
    let mut world = load(source)?.into_world().context("building world")?;
    let run = run_episode(&mut world, config).context("running episode")?;
    if let Some(dir) = out {
        write_report_dir(&run, dir)
            .with_context(|| format!("writing report directory {}", dir.display()))?;
    }
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&canonical_json_line(&run.report.to_json())?)?;
    writeln!(stdout, "report_digest={}", run.report_digest)?;
    Ok(())
}

fn cmd_plan(source: &Source, selection: SelectionStrategy) -> Result<()> {
    let world = load(source)?.into_world().context("building world")?;
    let layout = world.layout();
    let policy = EscapePolicy {
        selection,
        ..EscapePolicy::default()
    };
    let plan = plan_escape(world.cavern(), layout.orb, layout.exit, &policy)
        .context("planning escape")?;
    let gold: u64 = plan
        .path
        .steps
        .iter()
        .map(|s| u64::from(world.gold_at(s.node)))
        .sum();
    let summary = serde_json::json!({
        "gold_on_path": gold,
        "path": plan.path.to_json(),
        "reachable": plan.tree.reachable_count(),
        "time_budget": world.time_budget(),
    });
    std::io::stdout().write_all(&canonical_json_line(&summary)?)?;
    Ok(())
}

fn cmd_verify(dir: &Path) -> Result<()> {
    let loaded = read_report_dir(dir)
        .with_context(|| format!("verifying report directory {}", dir.display()))?;
    println!("ok report_digest={}", loaded.report_digest);
    Ok(())
}

fn cmd_world(name: &str) -> Result<()> {
    if name == "list" {
        for known in worlds::NAMES {
            println!("{known}");
        }
        return Ok(());
    }
    let Some(fixture) = worlds::by_name(name) else {
        bail!("unknown world {name:?}; known: {}", worlds::NAMES.join(", "));
    };
    println!("{}", fixture.to_json_pretty()?);
    Ok(())
}
