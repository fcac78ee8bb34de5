//! Actions taken after a record has been written
//!
//! Fatal records end the process and panic records raise a panic. Both go
//! through an [`ActionHandler`] so embedders and tests can replace them.

use super::config::ModeFlags;
use super::log_level::Level;

/// What happens once a record has been written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostLogAction {
    None,
    RaisePanic,
    Terminate,
}

impl PostLogAction {
    pub fn resolve(level: Level, modes: &ModeFlags) -> Self {
        match level {
            Level::Fatal if !modes.suppress_exit_on_fatal => PostLogAction::Terminate,
            Level::Panic if !modes.suppress_panic_on_panic => PostLogAction::RaisePanic,
            _ => PostLogAction::None,
        }
    }

    /// Hand the action to `handler`. `message` is the formatted record body.
    pub fn apply(self, handler: &dyn ActionHandler, message: String) {
        match self {
            PostLogAction::None => {}
            PostLogAction::RaisePanic => handler.raise_panic(message),
            PostLogAction::Terminate => handler.terminate(&message),
        }
    }
}

/// Carries out [`PostLogAction`]s
pub trait ActionHandler: Send + Sync {
    /// End the process. The default handler does not return.
    fn terminate(&self, message: &str);

    /// Raise a panic carrying `message` as its payload.
    fn raise_panic(&self, message: String);
}

/// Exits with status 1 and panics with a `String` payload
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessActionHandler;

impl ActionHandler for ProcessActionHandler {
    fn terminate(&self, _message: &str) {
        std::process::exit(1);
    }

    fn raise_panic(&self, message: String) {
        std::panic::panic_any(message);
    }
}
