//! Session aggregate for the modal interaction shell.
//!
//! This crate owns the [`Session`]: the object an embedding application
//! creates, initializes, feeds input events, and eventually destroys. It
//! builds on the runtime tables from `lectern-registry` and adds the mode
//! registry, input buffer, submission history, dialogs, notification
//! routing, and the textual configuration format.

pub mod buffer;
pub mod config;
pub mod dialog;
pub mod history;
pub mod hooks;
pub mod modes;
pub mod notify;
pub mod session;
pub mod view;

pub use buffer::InputBuffer;
pub use config::config_load;
pub use dialog::{Dialog, DialogActivate, DialogKey};
pub use history::{HistoryIo, InputHistory};
pub use hooks::{BufferChangedFn, UnknownCommandFn};
pub use modes::ModeRegistry;
pub use notify::{DesktopNotifier, NotificationSink};
pub use session::{KeyOutcome, Session};
pub use view::{InputbarView, Template, WindowChrome};

pub use lectern_registry::{
	Argument, Command, CommandFn, Completion, CompletionEntry, CompletionFn, CompletionGroup,
	Level, MouseFn, OptionCallback, OptionStore, OptionType, OptionValue, ShellError, ShellOps,
	ShortcutFn, SpecialCommand, SpecialFn, tokenize,
};
