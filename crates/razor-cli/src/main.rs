use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use razor_client::config::RazorConfig;
use razor_client::{SharedWorld, World, WorldSnapshot};
use razor_runner::{init_logging, run_action_consumer, LoggingConsumer, Scheduler};
use razor_scripting_host::{FlatScript, ScriptExit, ScriptRunner};
use tokio::sync::{mpsc, watch};
use tracing::{info, warn};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a script against a world snapshot until it finishes
    Run {
        /// Script file, absolute or relative to the configured script directory
        script: PathBuf,

        /// TOML world snapshot to run against
        #[arg(short, long)]
        world: Option<PathBuf>,

        /// Override the scheduler period in milliseconds
        #[arg(long)]
        tick_ms: Option<u64>,

        /// Seed for random object selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Parse a script and report verbs the command table does not know
    Check { script: PathBuf },
    /// List every registered command and expression
    Verbs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => RazorConfig::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => RazorConfig::load_or_default().context("loading config")?,
    };
    let _log_guard = init_logging("cli", config.logging.file).context("initializing logging")?;

    match cli.command {
        Command::Run {
            script,
            world,
            tick_ms,
            seed,
        } => {
            if let Some(tick_ms) = tick_ms {
                config.scripting.tick_interval_ms = tick_ms;
            }
            if seed.is_some() {
                config.scripting.seed = seed;
            }
            run(&config, &script, world.as_deref()).await
        }
        Command::Check { script } => check(&config, &script),
        Command::Verbs => {
            let (action_tx, _action_rx) = mpsc::unbounded_channel();
            let runner = ScriptRunner::new(SharedWorld::default(), action_tx);
            println!("Commands ({}):", runner.commands().len());
            for name in runner.commands().names() {
                println!("  {}", name);
            }
            println!("Expressions ({}):", runner.expressions().len());
            for name in runner.expressions().names() {
                println!("  {}", name);
            }
            Ok(())
        }
    }
}

fn resolve_script(config: &RazorConfig, script: &Path) -> PathBuf {
    if script.exists() || script.is_absolute() {
        return script.to_path_buf();
    }
    let in_script_dir = config.scripting.script_dir().join(script);
    if in_script_dir.exists() {
        in_script_dir
    } else {
        script.to_path_buf()
    }
}

fn load_script(config: &RazorConfig, script: &Path) -> anyhow::Result<FlatScript> {
    let path = resolve_script(config, script);
    let source = fs::read_to_string(&path)
        .with_context(|| format!("reading script {}", path.display()))?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "script".to_string());
    FlatScript::parse(name, &source).with_context(|| format!("parsing {}", path.display()))
}

fn load_world(path: Option<&Path>) -> anyhow::Result<World> {
    let Some(path) = path else {
        warn!("No world snapshot given, running against an empty world");
        return Ok(World::new());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading world snapshot {}", path.display()))?;
    let snapshot = WorldSnapshot::from_toml_str(&content)
        .with_context(|| format!("parsing world snapshot {}", path.display()))?;
    Ok(snapshot.into_world())
}

async fn run(config: &RazorConfig, script: &Path, world: Option<&Path>) -> anyhow::Result<()> {
    if !config.scripting.enabled {
        bail!("scripting is disabled in the config");
    }

    let script = load_script(config, script)?;
    let world = SharedWorld::new(load_world(world)?);

    let (action_tx, action_rx) = mpsc::unbounded_channel();
    let mut runner = ScriptRunner::from_config(&config.scripting, world.clone(), action_tx);
    let id = runner.start_script(Box::new(script));
    info!("Started script {}", id);

    let consumer = tokio::spawn(async move {
        let mut consumer = LoggingConsumer::new(world);
        run_action_consumer(action_rx, &mut consumer).await;
        consumer.handled()
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, stopping scripts");
            let _ = shutdown_tx.send(true);
        }
    });

    let mut scheduler = Scheduler::from_config(runner, &config.scripting);
    let exits = scheduler.run(shutdown_rx, true).await;

    // Dropping the runner closes the action channel so the consumer drains and exits
    drop(scheduler);
    let handled = consumer.await.context("action consumer task failed")?;
    info!("Handled {} client actions", handled);

    for (id, name, exit) in exits {
        match exit {
            ScriptExit::Completed | ScriptExit::Stopped => {}
            ScriptExit::Aborted(err) => bail!("script {} ({}) aborted: {}", name, id, err),
            ScriptExit::Panicked => bail!("script {} ({}) panicked", name, id),
        }
    }
    Ok(())
}

fn check(config: &RazorConfig, script: &Path) -> anyhow::Result<()> {
    let script = load_script(config, script)?;
    let (action_tx, _action_rx) = mpsc::unbounded_channel();
    let runner = ScriptRunner::new(SharedWorld::default(), action_tx);

    let mut unknown = 0;
    for instruction in script.instructions() {
        if !runner.commands().contains(&instruction.verb) {
            println!(
                "line {}: unknown command '{}'",
                instruction.line, instruction.verb
            );
            unknown += 1;
        }
    }
    println!(
        "{} instructions, {} unknown",
        script.instructions().len(),
        unknown
    );
    if unknown > 0 {
        bail!("{} unknown commands", unknown);
    }
    Ok(())
}
