use std::fmt::Display;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use razor_client::{ClientAction, Serial, World};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::alias;
use crate::argument::Argument;
use crate::commands::Continuation;
use crate::gate::{GateStatus, PauseGate};
use crate::locator::{self, LocateError, LocateRequest, SearchSource};
use crate::store::ScriptStore;

/// Alias bound by the locating expressions
pub const FOUND_ALIAS: &str = "found";

/// Everything a command handler can touch during one firing.
///
/// The world is borrowed from the firing's read guard, so every
/// instruction in one firing sees the same state.
pub struct ScriptContext<'a> {
    world: &'a World,
    store: &'a mut dyn ScriptStore,
    gate: &'a mut PauseGate,
    action_tx: &'a UnboundedSender<ClientAction>,
    rng: &'a mut StdRng,
    now: Instant,
    script_name: &'a str,
}

impl<'a> ScriptContext<'a> {
    pub fn new(
        world: &'a World,
        store: &'a mut dyn ScriptStore,
        gate: &'a mut PauseGate,
        action_tx: &'a UnboundedSender<ClientAction>,
        rng: &'a mut StdRng,
        now: Instant,
        script_name: &'a str,
    ) -> Self {
        Self {
            world,
            store,
            gate,
            action_tx,
            rng,
            now,
            script_name,
        }
    }

    pub fn world(&self) -> &'a World {
        self.world
    }

    pub fn store(&self) -> &dyn ScriptStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut (dyn ScriptStore + 'a) {
        &mut *self.store
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn script_name(&self) -> &str {
        self.script_name
    }

    pub fn send_action(&self, action: ClientAction) {
        let _ = self.action_tx.send(action);
    }

    /// Report a recoverable problem. The player sees it unless `quiet`;
    /// the log always gets it.
    pub fn soft_error(&self, quiet: bool, message: impl Display) {
        debug!(target: "scripting", script = self.script_name, quiet, "{}", message);
        if !quiet {
            self.send_action(ClientAction::system_message(format!(
                "Script {} error => {}",
                self.script_name, message
            )));
        }
    }

    pub fn resolve_serial(&self, arg: &Argument) -> Serial {
        alias::resolve_serial(self.world, &*self.store, arg)
    }

    pub fn resolve_alias(&self, name: &str) -> Serial {
        alias::resolve_alias(self.world, &*self.store, name)
    }

    /// `world`/`ground`/`any`, or a container serial or alias
    pub fn search_source(&self, arg: &Argument) -> SearchSource {
        SearchSource::from_keyword(arg.as_str())
            .unwrap_or_else(|| SearchSource::Container(self.resolve_serial(arg)))
    }

    pub fn locate(&mut self, request: &LocateRequest) -> Result<Option<Serial>, LocateError> {
        locator::locate(self.world, request, &mut *self.rng)
    }

    pub fn bind_found(&mut self, serial: Serial) {
        self.store.set_alias(FOUND_ALIAS, serial);
    }

    /// The shape every blocking verb shares: done when `satisfied`,
    /// otherwise wait on the gate until `timeout` runs out.
    pub fn wait_until(&mut self, satisfied: bool, timeout: Duration) -> Continuation {
        if satisfied {
            self.gate.cancel();
            return Continuation::Advance;
        }
        match self.gate.check_and_arm(self.now, timeout) {
            GateStatus::Pending => Continuation::Retry,
            GateStatus::Expired => Continuation::Advance,
        }
    }
}

/// Restricted view handed to expression handlers.
///
/// Expressions read the store but never write it, apart from binding the
/// `found` alias after a successful search.
pub struct ExpressionContext<'c, 'a> {
    inner: &'c mut ScriptContext<'a>,
}

impl<'c, 'a> ExpressionContext<'c, 'a> {
    pub fn new(inner: &'c mut ScriptContext<'a>) -> Self {
        Self { inner }
    }

    pub fn world(&self) -> &'a World {
        self.inner.world
    }

    pub fn store(&self) -> &dyn ScriptStore {
        self.inner.store()
    }

    pub fn now(&self) -> Instant {
        self.inner.now
    }

    pub fn soft_error(&self, quiet: bool, message: impl Display) {
        self.inner.soft_error(quiet, message);
    }

    pub fn resolve_serial(&self, arg: &Argument) -> Serial {
        self.inner.resolve_serial(arg)
    }

    pub fn resolve_alias(&self, name: &str) -> Serial {
        self.inner.resolve_alias(name)
    }

    pub fn search_source(&self, arg: &Argument) -> SearchSource {
        self.inner.search_source(arg)
    }

    pub fn locate(&mut self, request: &LocateRequest) -> Result<Option<Serial>, LocateError> {
        self.inner.locate(request)
    }

    pub fn bind_found(&mut self, serial: Serial) {
        self.inner.bind_found(serial);
    }
}
