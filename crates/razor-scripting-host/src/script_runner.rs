use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use razor_client::config::scripting_config::ScriptingConfig;
use razor_client::{ClientAction, SharedWorld};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

use crate::commands::CommandTable;
use crate::context::ScriptContext;
use crate::engine::{Interpreter, ScriptEngine, StepOutcome};
use crate::error::ScriptError;
use crate::expressions::ExpressionTable;
use crate::gate::PauseGate;
use crate::store::{MemoryStore, ScriptStore};

/// Instructions one script may advance in a single firing
pub const DEFAULT_MAX_STEPS_PER_TICK: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptId(u64);

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a script left the runner
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptExit {
    Completed,
    Stopped,
    Aborted(ScriptError),
    Panicked,
}

struct ScriptInstance {
    id: ScriptId,
    name: String,
    engine: Box<dyn ScriptEngine>,
    gate: PauseGate,
}

/// Runs every started script once per firing.
///
/// Each firing takes one read guard on the world and drives the scripts in
/// start order. Each script has its own pause gate; the alias, list and
/// timer store is shared by all of them.
pub struct ScriptRunner {
    scripts: Vec<ScriptInstance>,
    commands: CommandTable,
    expressions: ExpressionTable,
    store: Box<dyn ScriptStore>,
    world: SharedWorld,
    action_tx: UnboundedSender<ClientAction>,
    rng: StdRng,
    max_steps_per_tick: usize,
    next_id: u64,
    finished: Vec<(ScriptId, String, ScriptExit)>,
}

impl ScriptRunner {
    pub fn new(world: SharedWorld, action_tx: UnboundedSender<ClientAction>) -> Self {
        Self {
            scripts: Vec::new(),
            commands: CommandTable::with_defaults(),
            expressions: ExpressionTable::with_defaults(),
            store: Box::new(MemoryStore::new()),
            world,
            action_tx,
            rng: StdRng::from_entropy(),
            max_steps_per_tick: DEFAULT_MAX_STEPS_PER_TICK,
            next_id: 1,
            finished: Vec::new(),
        }
    }

    /// Runner configured from the `[scripting]` table. The sensor range is
    /// written into the world so searches use it.
    pub fn from_config(
        config: &ScriptingConfig,
        world: SharedWorld,
        action_tx: UnboundedSender<ClientAction>,
    ) -> Self {
        world.update(|w| w.sensor_range = config.sensor_range);
        let mut runner = Self::new(world, action_tx).with_max_steps(config.max_steps_per_tick);
        if let Some(seed) = config.seed {
            runner = runner.with_rng_seed(seed);
        }
        runner
    }

    pub fn with_store(mut self, store: Box<dyn ScriptStore>) -> Self {
        self.store = store;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps_per_tick = max_steps.max(1);
        self
    }

    /// Host-side additions or overrides; the last registration of a name wins
    pub fn commands_mut(&mut self) -> &mut CommandTable {
        &mut self.commands
    }

    pub fn expressions_mut(&mut self) -> &mut ExpressionTable {
        &mut self.expressions
    }

    pub fn commands(&self) -> &CommandTable {
        &self.commands
    }

    pub fn expressions(&self) -> &ExpressionTable {
        &self.expressions
    }

    pub fn store(&self) -> &dyn ScriptStore {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> &mut dyn ScriptStore {
        self.store.as_mut()
    }

    pub fn start_script(&mut self, engine: Box<dyn ScriptEngine>) -> ScriptId {
        let id = ScriptId(self.next_id);
        self.next_id += 1;
        let name = engine.name().to_string();
        info!(target: "scripting", "Starting script {} ({})", name, id);
        self.scripts.push(ScriptInstance {
            id,
            name,
            engine,
            gate: PauseGate::new(),
        });
        id
    }

    /// Stop a script before its next firing. Returns false when it is not
    /// running.
    pub fn stop_script(&mut self, id: ScriptId) -> bool {
        let Some(idx) = self.scripts.iter().position(|s| s.id == id) else {
            return false;
        };
        let script = self.scripts.remove(idx);
        info!(target: "scripting", "Stopped script {} ({})", script.name, id);
        self.finished.push((id, script.name, ScriptExit::Stopped));
        true
    }

    pub fn stop_all(&mut self) {
        let ids: Vec<ScriptId> = self.scripts.iter().map(|s| s.id).collect();
        for id in ids {
            self.stop_script(id);
        }
    }

    pub fn is_running(&self, id: ScriptId) -> bool {
        self.scripts.iter().any(|s| s.id == id)
    }

    pub fn script_count(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_idle(&self) -> bool {
        self.scripts.is_empty()
    }

    /// Scripts that left the runner since the last call, oldest first
    pub fn take_finished(&mut self) -> Vec<(ScriptId, String, ScriptExit)> {
        std::mem::take(&mut self.finished)
    }

    /// One scheduler firing
    pub fn fire(&mut self, now: Instant) {
        if self.scripts.is_empty() {
            return;
        }

        let Self {
            scripts,
            commands,
            expressions,
            store,
            world,
            action_tx,
            rng,
            max_steps_per_tick,
            finished,
            ..
        } = self;

        let guard = world.read();
        let mut exits = Vec::new();
        for (idx, script) in scripts.iter_mut().enumerate() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                let mut ctx = ScriptContext::new(
                    &guard,
                    store.as_mut(),
                    &mut script.gate,
                    action_tx,
                    rng,
                    now,
                    &script.name,
                );
                let mut interp = Interpreter::new(&mut ctx, commands, expressions);
                run_steps(script.engine.as_mut(), &mut interp, *max_steps_per_tick)
            }));

            match result {
                Ok(Ok(StepOutcome::Finished)) => exits.push((idx, ScriptExit::Completed)),
                Ok(Ok(_)) => {}
                Ok(Err(err)) => {
                    match script.engine.line() {
                        Some(line) => error!(
                            target: "scripting",
                            "Script {} ({}) aborted at line {}: {}",
                            script.name,
                            script.id,
                            line,
                            err
                        ),
                        None => error!(
                            target: "scripting",
                            "Script {} ({}) aborted: {}",
                            script.name,
                            script.id,
                            err
                        ),
                    }
                    let feed = err.feed_text(&script.name);
                    let _ = action_tx.send(ClientAction::system_message(feed));
                    exits.push((idx, ScriptExit::Aborted(err)));
                }
                Err(e) => {
                    error!(
                        target: "scripting",
                        "Script {} ({}) panicked during firing: {:?}",
                        script.name,
                        script.id,
                        e
                    );
                    exits.push((idx, ScriptExit::Panicked));
                }
            }
        }
        drop(guard);

        // Back to front so earlier indices stay valid
        let mut removed: Vec<_> = exits
            .into_iter()
            .rev()
            .map(|(idx, exit)| (scripts.remove(idx), exit))
            .collect();
        removed.reverse();
        for (script, exit) in removed {
            if exit == ScriptExit::Completed {
                info!(target: "scripting", "Script {} ({}) completed", script.name, script.id);
            }
            finished.push((script.id, script.name, exit));
        }
        debug!(target: "scripting", "{} script(s) still running", scripts.len());
    }
}

fn run_steps(
    engine: &mut dyn ScriptEngine,
    interp: &mut Interpreter<'_, '_>,
    max_steps: usize,
) -> Result<StepOutcome, ScriptError> {
    for _ in 0..max_steps {
        match engine.step(interp)? {
            StepOutcome::Advanced => continue,
            outcome => return Ok(outcome),
        }
    }
    Ok(StepOutcome::Advanced)
}
