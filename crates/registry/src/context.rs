//! The capability surface handlers run against.
//!
//! Every handler registered in a table receives `&mut dyn ShellOps` instead
//! of the session itself. The session crate implements the trait; handlers
//! may re-enter any of its operations because they are cloned out of the
//! tables before invocation.

use std::any::Any;
use std::rc::Rc;

use lectern_primitives::{ModeId, MouseEvent};

use crate::completion::Completion;
use crate::error::ShellError;
use crate::options::OptionValue;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Level {
	/// Informational message (default).
	#[default]
	Info,
	/// Warning message.
	Warning,
	/// Error message.
	Error,
}

impl Level {
	/// Normalizes a raw integer level. Unrecognized values become `Info`.
	pub fn from_raw(raw: i32) -> Self {
		match raw {
			1 => Level::Warning,
			2 => Level::Error,
			_ => Level::Info,
		}
	}

	/// Returns the lowercase display name.
	pub fn as_str(self) -> &'static str {
		match self {
			Level::Info => "info",
			Level::Warning => "warning",
			Level::Error => "error",
		}
	}
}

/// Optional payload attached to a binding at registration time and handed
/// back to its handler at dispatch time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Argument {
	/// Numeric identifier, resolved through the argument mapping table for
	/// config-defined bindings.
	pub n: Option<i32>,
	/// Free-form textual payload.
	pub text: Option<String>,
}

impl Argument {
	/// An argument carrying only a number.
	pub fn number(n: i32) -> Self {
		Self {
			n: Some(n),
			text: None,
		}
	}

	/// An argument carrying only text.
	pub fn with_text(text: impl Into<String>) -> Self {
		Self {
			n: None,
			text: Some(text.into()),
		}
	}
}

/// Session operations available to handlers.
///
/// The trait is deliberately wider than any single handler needs; it is the
/// shared seam between the registries and the session, so every built-in
/// handler family (shortcuts, commands, specials, completers) draws from
/// the same surface.
pub trait ShellOps {
	/// Delivers a leveled message through the notification service.
	fn notify(&mut self, level: Level, message: &str);
	/// Delivers a message through the desktop notification sink.
	fn external_notify(&mut self, summary: &str, body: &str);

	/// Returns the current mode.
	fn mode(&self) -> ModeId;
	/// Switches the current mode.
	fn set_mode(&mut self, mode: ModeId) -> Result<(), ShellError>;
	/// Returns the built-in normal mode's id.
	fn normal_mode(&self) -> ModeId;
	/// Returns the built-in inputbar mode's id.
	fn inputbar_mode(&self) -> ModeId;

	/// Returns a copy of the accumulated input buffer.
	fn buffer(&self) -> String;
	/// Empties the input buffer.
	fn clear_buffer(&mut self);

	/// Reads an option value.
	fn option(&self, name: &str) -> Option<OptionValue>;
	/// Lists `(name, description)` for every registered option, sorted.
	fn option_entries(&self) -> Vec<(String, String)>;
	/// Writes an option from its textual form, parsed per the registered type.
	fn set_option(&mut self, name: &str, value: &str) -> Result<(), ShellError>;

	/// Reads the inputbar's current text, when a view is attached.
	fn inputbar_text(&self) -> Option<String>;
	/// Replaces the inputbar's text.
	fn set_inputbar_text(&mut self, text: &str) -> Result<(), ShellError>;

	/// Steps the history cursor toward older entries.
	fn history_previous(&mut self) -> Option<String>;
	/// Steps the history cursor back toward newer entries.
	fn history_next(&mut self) -> Option<String>;
	/// Clears the history cursor.
	fn reset_history_cursor(&mut self);

	/// Sets the window title through the chrome collaborator.
	fn set_window_title(&mut self, title: &str) -> Result<(), ShellError>;
	/// Sets the window icon through the chrome collaborator.
	fn set_window_icon(&mut self, name: &str) -> Result<(), ShellError>;

	/// Applies a `map` directive: `[mode] <keyspec> <shortcut> [argument]`.
	fn map_directive(&mut self, args: &[String]) -> Result<(), ShellError>;
	/// Applies an `unmap` directive: `[mode] <keyspec>`.
	fn unmap_directive(&mut self, args: &[String]) -> Result<(), ShellError>;

	/// Returns the session-scoped user data, if any was attached.
	fn user_data(&mut self) -> Option<&mut dyn Any>;
}

/// Handler for a key shortcut. Receives the binding's argument and the
/// effective repeat count (1 when no count prefix was typed).
pub type ShortcutFn = Rc<dyn Fn(&mut dyn ShellOps, &Argument, u32) -> Result<(), ShellError>>;

/// Handler for a mouse binding. Receives the full event for its position.
pub type MouseFn = Rc<dyn Fn(&mut dyn ShellOps, &Argument, &MouseEvent, u32) -> Result<(), ShellError>>;

/// Handler for a named command. Receives the tokenized arguments.
pub type CommandFn = Rc<dyn Fn(&mut dyn ShellOps, &[String]) -> Result<(), ShellError>>;

/// Completer for a command's arguments. Receives the text after the
/// command name and returns candidate groups.
pub type CompletionFn = Rc<dyn Fn(&mut dyn ShellOps, &str) -> Completion>;

/// Handler for a special command. Receives the input after the trigger
/// character and the registration-time argument.
pub type SpecialFn = Rc<dyn Fn(&mut dyn ShellOps, &str, &Argument) -> Result<(), ShellError>>;
