mod action_consumer;
pub mod logging;
mod scheduler;

pub use action_consumer::{run_action_consumer, ActionConsumer, LoggingConsumer};
pub use logging::init_logging;
pub use scheduler::Scheduler;
