//! Runtime registries for the interaction shell.
//!
//! Each session owns one instance of every table defined here: key and
//! mouse bindings, inputbar shortcuts, commands and special commands, and
//! typed options. All tables are mutated at runtime through the session's
//! registration API; nothing is collected at link time.
//!
//! Handlers never see the session type itself. They receive
//! [`ShellOps`](context::ShellOps), the capability trait the session
//! implements, which keeps this crate free of a dependency on the session
//! crate and keeps handler code testable against a stub.

pub mod bindings;
pub mod commands;
pub mod completion;
pub mod context;
pub mod error;
pub mod options;

#[cfg(test)]
mod testutil;

pub use bindings::{InputbarMap, MouseEntry, MouseMap, ShortcutEntry, ShortcutMap};
pub use commands::{Command, CommandTable, SpecialCommand, SpecialTable, tokenize};
pub use completion::{Completion, CompletionEntry, CompletionGroup};
pub use context::{Argument, CommandFn, CompletionFn, Level, MouseFn, ShellOps, ShortcutFn, SpecialFn};
pub use error::ShellError;
pub use options::{OptionCallback, OptionStore, OptionType, OptionValue};
