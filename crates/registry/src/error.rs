use thiserror::Error;

/// Errors produced by the registries and the session.
///
/// This error type is shared between the registry and session crates to
/// avoid circular dependencies; the session crate re-exports it.
///
/// Unmatched key or pointer events are not errors. Dispatch reports them
/// through its outcome value and the caller decides what to do.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShellError {
	/// A name, id, or value was rejected: empty or duplicate names, unknown
	/// mode ids, type-mismatched option writes, malformed config lines,
	/// removal of an absent binding.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// A command prefix matched more than one registered command.
	#[error("ambiguous command '{input}': {}", .candidates.join(", "))]
	AmbiguousCommand {
		/// The submitted input.
		input: String,
		/// Matching command names, sorted.
		candidates: Vec<String>,
	},
	/// Nothing resolved the input and no hook accepted it.
	#[error("unknown command: {0}")]
	UnknownCommand(String),
	/// A command handler reported failure.
	#[error("command failed: {0}")]
	CommandFailed(String),
	/// The session is in the wrong lifecycle state for the operation.
	#[error("invalid session state: {0}")]
	InvalidState(&'static str),
	/// The operation requires a collaborator that is not wired.
	#[error("unsupported operation: {0}")]
	Unsupported(&'static str),
	/// A collaborator could not be set up during initialization.
	#[error("resource acquisition failed: {0}")]
	ResourceAcquisition(String),
}
