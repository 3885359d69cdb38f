//! One-shot inputbar dialogs.
//!
//! A dialog borrows the inputbar: it installs a prompt, optionally obscures
//! the text, and waits for a single activation. Leaving the inputbar mode
//! before activating drops the dialog without invoking it.

use lectern_primitives::Key;
use lectern_registry::{ShellError, ShellOps};

/// Runs once when the dialog is activated, receiving the entered text.
pub type DialogActivate = Box<dyn FnOnce(&mut dyn ShellOps, &str) -> Result<(), ShellError>>;

/// Filters keys while the dialog is open. Returning true consumes the key.
pub type DialogKey = Box<dyn FnMut(&mut dyn ShellOps, Key) -> bool>;

/// An armed dialog, held by the session while the inputbar mode is active.
pub struct Dialog {
	pub(crate) activate: Option<DialogActivate>,
	pub(crate) key: Option<DialogKey>,
}
