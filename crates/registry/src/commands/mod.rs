//! Named commands and single-character special commands.
//!
//! Commands are resolved from the first token of a submission. Resolution
//! prefers an exact name, then an exact abbreviation, then a unique prefix
//! over both namespaces. Special commands claim the whole submission when
//! its first character matches a registered trigger.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::completion::CompletionEntry;
use crate::context::{Argument, CommandFn, CompletionFn, SpecialFn};
use crate::error::ShellError;


/// A registered named command.
#[derive(Clone)]
pub struct Command {
	pub name: String,
	pub abbreviation: Option<String>,
	pub description: String,
	pub handler: CommandFn,
	pub completer: Option<CompletionFn>,
}

/// Named command table.
///
/// Registration order is preserved so that abbreviation conflicts resolve
/// toward the most recent registration.
#[derive(Default)]
pub struct CommandTable {
	commands: Vec<Command>,
	by_name: FxHashMap<String, usize>,
}

impl CommandTable {
	/// Registers a command. Re-registering a name replaces the previous
	/// command in place.
	pub fn register(&mut self, command: Command) -> Result<(), ShellError> {
		if command.name.is_empty() {
			return Err(ShellError::InvalidArgument("empty command name".into()));
		}
		if let Some(&index) = self.by_name.get(&command.name) {
			debug!(name = %command.name, "command re-registered");
			self.commands[index] = command;
			return Ok(());
		}
		self.by_name.insert(command.name.clone(), self.commands.len());
		self.commands.push(command);
		Ok(())
	}

	/// Resolves the first token of a submission to a command.
	///
	/// Exact names win over exact abbreviations, which win over unique
	/// prefixes. A prefix shared by several commands is ambiguous; the
	/// error carries the sorted candidate names.
	pub fn resolve(&self, token: &str) -> Result<&Command, ShellError> {
		if let Some(&index) = self.by_name.get(token) {
			return Ok(&self.commands[index]);
		}
		// Latest registration wins among duplicate abbreviations.
		if let Some(command) = self
			.commands
			.iter()
			.rev()
			.find(|c| c.abbreviation.as_deref() == Some(token))
		{
			return Ok(command);
		}
		let mut candidates: Vec<&Command> = Vec::new();
		for command in &self.commands {
			let hit = command.name.starts_with(token)
				|| command
					.abbreviation
					.as_deref()
					.is_some_and(|a| a.starts_with(token));
			if hit {
				candidates.push(command);
			}
		}
		match candidates.len() {
			0 => Err(ShellError::UnknownCommand(token.to_string())),
			1 => Ok(candidates[0]),
			_ => {
				let mut names: Vec<String> = candidates.iter().map(|c| c.name.clone()).collect();
				names.sort();
				names.dedup();
				Err(ShellError::AmbiguousCommand {
					input: token.to_string(),
					candidates: names,
				})
			}
		}
	}

	/// Returns `(name, description)` candidates whose name starts with the
	/// given prefix, sorted by name.
	pub fn completion_candidates(&self, prefix: &str) -> Vec<CompletionEntry> {
		let mut entries: Vec<CompletionEntry> = self
			.commands
			.iter()
			.filter(|c| c.name.starts_with(prefix))
			.map(|c| CompletionEntry {
				value: c.name.clone(),
				description: Some(c.description.clone()),
			})
			.collect();
		entries.sort_by(|a, b| a.value.cmp(&b.value));
		entries
	}

	/// Iterates over all registered commands in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &Command> {
		self.commands.iter()
	}
}

/// A registered special command.
#[derive(Clone)]
pub struct SpecialCommand {
	pub trigger: char,
	pub handler: SpecialFn,
	/// When set, the handler also runs on every inputbar text change that
	/// starts with the trigger, not only on submission.
	pub always_listen: bool,
	pub argument: Argument,
}

/// Special command table, keyed by trigger character.
#[derive(Default)]
pub struct SpecialTable {
	entries: FxHashMap<char, SpecialCommand>,
}

impl SpecialTable {
	/// Registers a special command. Trigger collisions are rejected.
	pub fn register(&mut self, special: SpecialCommand) -> Result<(), ShellError> {
		if self.entries.contains_key(&special.trigger) {
			return Err(ShellError::InvalidArgument(format!(
				"special command '{}' already registered",
				special.trigger
			)));
		}
		self.entries.insert(special.trigger, special);
		Ok(())
	}

	/// Looks up the special command for a trigger character.
	pub fn get(&self, trigger: char) -> Option<&SpecialCommand> {
		self.entries.get(&trigger)
	}

	/// Iterates over the specials that listen to live text changes.
	pub fn always_listening(&self) -> impl Iterator<Item = &SpecialCommand> {
		self.entries.values().filter(|s| s.always_listen)
	}
}

/// Splits a submission into tokens.
///
/// Double quotes group words into one token and backslash escapes the next
/// character, inside or outside quotes. An unterminated quote runs to the
/// end of input. Quoted empty strings produce empty tokens.
pub fn tokenize(input: &str) -> Vec<String> {
	let mut tokens = Vec::new();
	let mut current = String::new();
	let mut pending = false;
	let mut in_quotes = false;
	let mut chars = input.chars();
	while let Some(ch) = chars.next() {
		match ch {
			'\\' => {
				if let Some(escaped) = chars.next() {
					current.push(escaped);
					pending = true;
				}
			}
			'"' => {
				in_quotes = !in_quotes;
				pending = true;
			}
			c if c.is_whitespace() && !in_quotes => {
				if pending {
					tokens.push(std::mem::take(&mut current));
					pending = false;
				}
			}
			c => {
				current.push(c);
				pending = true;
			}
		}
	}
	if pending {
		tokens.push(current);
	}
	tokens
}
