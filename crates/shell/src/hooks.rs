//! Session event hooks.
//!
//! Hooks are cloned out of their slot before invocation, so a hook may call
//! back into the session, including replacing itself.

use std::rc::Rc;

use lectern_registry::ShellOps;

/// Observes every change to the accumulated input buffer. Receives the new
/// buffer contents, empty after a clear.
pub type BufferChangedFn = Rc<dyn Fn(&mut dyn ShellOps, &str)>;

/// Last-chance handler for a submission whose command is unknown. Returning
/// true marks the submission as handled.
pub type UnknownCommandFn = Rc<dyn Fn(&mut dyn ShellOps, &str) -> bool>;

#[derive(Default)]
pub(crate) struct Hooks {
	pub buffer_changed: Option<BufferChangedFn>,
	pub unknown_command: Option<UnknownCommandFn>,
}
