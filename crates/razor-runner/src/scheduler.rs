//! Fixed-period driver for the script runner.
//!
//! Every tick awaits one synchronous [`ScriptRunner::fire`] in this task, so
//! firings never overlap; a tick that comes due while a firing is still
//! running is skipped rather than queued.

use std::time::Duration;

use razor_client::config::ScriptingConfig;
use razor_scripting_host::{ScriptExit, ScriptId, ScriptRunner};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

pub struct Scheduler {
    runner: ScriptRunner,
    period: Duration,
}

impl Scheduler {
    pub fn new(runner: ScriptRunner, period: Duration) -> Self {
        Self {
            runner,
            period: period.max(Duration::from_millis(1)),
        }
    }

    pub fn from_config(runner: ScriptRunner, config: &ScriptingConfig) -> Self {
        Self::new(runner, config.tick_interval())
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn runner(&self) -> &ScriptRunner {
        &self.runner
    }

    pub fn runner_mut(&mut self) -> &mut ScriptRunner {
        &mut self.runner
    }

    pub fn into_runner(self) -> ScriptRunner {
        self.runner
    }

    /// Fire until shutdown is signalled, or until no script is left when
    /// `stop_when_idle` is set. Returns every script exit seen meanwhile.
    pub async fn run(
        &mut self,
        mut shutdown_rx: watch::Receiver<bool>,
        stop_when_idle: bool,
    ) -> Vec<(ScriptId, String, ScriptExit)> {
        let mut interval = time::interval(self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut exits = Vec::new();

        info!(target: "scripting", "Scheduler started ({:?} period)", self.period);
        loop {
            tokio::select! {
                tick = interval.tick() => {
                    self.runner.fire(tick.into_std());
                    for (id, name, exit) in self.runner.take_finished() {
                        match &exit {
                            ScriptExit::Completed | ScriptExit::Stopped => {
                                debug!(
                                    target: "scripting",
                                    "Script {} ({}) finished: {:?}",
                                    name,
                                    id,
                                    exit
                                );
                            }
                            ScriptExit::Aborted(_) | ScriptExit::Panicked => {
                                warn!(
                                    target: "scripting",
                                    "Script {} ({}) ended early: {:?}",
                                    name,
                                    id,
                                    exit
                                );
                            }
                        }
                        exits.push((id, name, exit));
                    }
                    if stop_when_idle && self.runner.is_idle() {
                        info!(target: "scripting", "No scripts left to run");
                        break;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        info!(target: "scripting", "Scheduler received shutdown signal");
                        break;
                    }
                }
            }
        }
        exits
    }
}
