use razor_client::{ClientAction, SharedWorld};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

/// Receives every action scripts send to the client
pub trait ActionConsumer: Send {
    fn handle_action(&mut self, action: ClientAction);
}

/// Consumer for running without a server: logs each action and applies the
/// part the client tracks locally (last target, closed gumps, ...)
pub struct LoggingConsumer {
    world: SharedWorld,
    handled: usize,
}

impl LoggingConsumer {
    pub fn new(world: SharedWorld) -> Self {
        Self { world, handled: 0 }
    }

    pub fn handled(&self) -> usize {
        self.handled
    }
}

impl ActionConsumer for LoggingConsumer {
    fn handle_action(&mut self, action: ClientAction) {
        match &action {
            ClientAction::SystemMessage { text, .. } => {
                info!(target: "feed", "{}", text);
            }
            ClientAction::Speech { kind, text, .. } => {
                info!(target: "feed", "[{:?}] {}", kind, text);
            }
            ClientAction::OverheadMessage { serial, text, .. } => {
                info!(target: "feed", "[{}] {}", serial, text);
            }
            other => {
                debug!(target: "actions", "{:?}", other);
            }
        }
        self.world.update(|world| world.apply_local(&action));
        self.handled += 1;
    }
}

/// Feed actions to `consumer` until every sender is gone
pub async fn run_action_consumer(
    mut action_rx: UnboundedReceiver<ClientAction>,
    consumer: &mut dyn ActionConsumer,
) {
    while let Some(action) = action_rx.recv().await {
        consumer.handle_action(action);
    }
    debug!(target: "actions", "Action channel closed");
}
