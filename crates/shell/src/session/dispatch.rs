//! Event dispatch and submission routing.

use lectern_primitives::{Key, MouseEvent};
use lectern_registry::{Completion, ShellError, ShellOps, tokenize};
use tracing::debug;

use super::Session;

/// What the session did with an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
	/// A handler ran.
	Dispatched,
	/// The key was appended to the input buffer.
	Buffered,
	/// Nothing matched; the embedder may process the event itself.
	Unhandled,
}

impl Session {
	/// Dispatches one key press.
	///
	/// In the inputbar mode an armed dialog's key filter sees the key
	/// first, then the inputbar shortcut table; text editing itself lives
	/// in the external widget. In every other mode an exact binding wins
	/// over buffering, and a freshly extended buffer is matched against
	/// the sequence table after its count prefix is stripped.
	pub fn handle_key(&mut self, key: Key) -> Result<KeyOutcome, ShellError> {
		self.ensure_initialized()?;
		if self.current_mode == self.inputbar_id {
			if let Some(mut dialog) = self.dialog.take() {
				let handled = match dialog.key.as_mut() {
					Some(filter) => filter(self, key),
					None => false,
				};
				if self.current_mode == self.inputbar_id && self.dialog.is_none() {
					self.dialog = Some(dialog);
				}
				if handled {
					return Ok(KeyOutcome::Dispatched);
				}
			}
			if let Some(entry) = self.inputbar_shortcuts.resolve(key) {
				(entry.handler)(self, &entry.argument, 1)?;
				return Ok(KeyOutcome::Dispatched);
			}
			return Ok(KeyOutcome::Unhandled);
		}
		if let Some(entry) = self.shortcuts.resolve(self.current_mode, key) {
			let count = self.buffer.split_count().0.unwrap_or(1);
			self.clear_buffer_and_notify();
			(entry.handler)(self, &entry.argument, count)?;
			return Ok(KeyOutcome::Dispatched);
		}
		if let Some(ch) = key.printable() {
			self.buffer.push(ch);
			self.fire_buffer_changed();
			let (count, rest) = self.buffer.split_count();
			let count = count.unwrap_or(1);
			let rest = rest.to_string();
			if !rest.is_empty()
				&& let Some(entry) = self.shortcuts.resolve_sequence(self.current_mode, &rest)
			{
				self.clear_buffer_and_notify();
				(entry.handler)(self, &entry.argument, count)?;
				return Ok(KeyOutcome::Dispatched);
			}
			return Ok(KeyOutcome::Buffered);
		}
		debug!(?key, mode = self.current_mode.raw(), "unhandled key");
		Ok(KeyOutcome::Unhandled)
	}

	/// Dispatches one pointer event. A matching binding consumes the
	/// pending count prefix the same way a key binding does.
	pub fn handle_mouse(&mut self, event: MouseEvent) -> Result<KeyOutcome, ShellError> {
		self.ensure_initialized()?;
		let Some(entry) = self.mouse.resolve(self.current_mode, event.button, event.modifiers, event.phase) else {
			return Ok(KeyOutcome::Unhandled);
		};
		let count = self.buffer.split_count().0.unwrap_or(1);
		self.clear_buffer_and_notify();
		(entry.handler)(self, &entry.argument, &event, count)?;
		Ok(KeyOutcome::Dispatched)
	}

	/// Routes one submission and, on success, appends its raw text to the
	/// history. Special commands and inputs accepted by the unknown-command
	/// hook count as successes.
	pub fn submit(&mut self, input: &str) -> Result<(), ShellError> {
		self.ensure_initialized()?;
		let result = self.route_submission(input);
		if result.is_ok() {
			self.history.append(input);
		}
		result
	}

	/// Handles the inputbar's activation, consuming an armed dialog or
	/// submitting the text.
	///
	/// A leading `:` is the command-entry identifier placed there by the
	/// focus shortcut and is not part of the submission. The inputbar text
	/// is cleared and the normal mode restored unless the handler itself
	/// switched modes.
	pub fn inputbar_activate(&mut self) -> Result<(), ShellError> {
		self.ensure_initialized()?;
		let text = self.inputbar_text().unwrap_or_default();
		if let Some(dialog) = self.dialog.take() {
			self.reset_view();
			let result = match dialog.activate {
				Some(activate) => activate(self, &text),
				None => Ok(()),
			};
			let normal = self.normal_id;
			if self.current_mode == self.inputbar_id {
				self.set_mode(normal)?;
			}
			return result;
		}
		let input = text.strip_prefix(':').unwrap_or(&text).to_string();
		let result = self.submit(&input);
		self.history.reset_cursor();
		let _ = self.set_inputbar_text("");
		let normal = self.normal_id;
		if self.current_mode == self.inputbar_id {
			self.set_mode(normal)?;
		}
		result
	}

	/// Reacts to an inputbar text change by running the matching
	/// always-listening special command. Inert while a dialog is armed.
	pub fn inputbar_changed(&mut self) -> Result<(), ShellError> {
		self.ensure_initialized()?;
		if self.dialog.is_some() {
			return Ok(());
		}
		let Some(text) = self.inputbar_text() else {
			return Ok(());
		};
		let mut chars = text.chars();
		let Some(trigger) = chars.next() else {
			return Ok(());
		};
		let special = self
			.specials
			.get(trigger)
			.filter(|special| special.always_listen)
			.map(|special| (special.handler.clone(), special.argument.clone()));
		if let Some((handler, argument)) = special {
			let rest: String = chars.collect();
			handler(self, &rest, &argument)?;
		}
		Ok(())
	}

	/// Produces completion candidates for a partial submission: command
	/// names before the first whitespace, the resolved command's completer
	/// after it.
	pub fn complete(&mut self, input: &str) -> Completion {
		if self.ensure_initialized().is_err() {
			return Completion::default();
		}
		match input.split_once(char::is_whitespace) {
			None => Completion::single_group(self.commands.completion_candidates(input)),
			Some((name, tail)) => {
				let completer = self
					.commands
					.resolve(name)
					.ok()
					.and_then(|command| command.completer.clone());
				match completer {
					Some(completer) => completer(self, tail),
					None => Completion::default(),
				}
			}
		}
	}

	fn route_submission(&mut self, input: &str) -> Result<(), ShellError> {
		if input.is_empty() {
			return Ok(());
		}
		let mut chars = input.chars();
		if let Some(trigger) = chars.next()
			&& let Some(special) = self.specials.get(trigger)
		{
			let handler = special.handler.clone();
			let argument = special.argument.clone();
			let rest: String = chars.collect();
			return handler(self, &rest, &argument);
		}
		let tokens = tokenize(input);
		let Some((name, args)) = tokens.split_first() else {
			return Ok(());
		};
		let resolved = self
			.commands
			.resolve(name)
			.map(|command| (command.name.clone(), command.handler.clone()));
		match resolved {
			Ok((name, handler)) => {
				debug!(command = %name, "command dispatched");
				handler(self, args)
			}
			Err(ShellError::UnknownCommand(_)) => {
				if let Some(hook) = self.hooks.unknown_command.take() {
					let handled = hook(self, input);
					if self.hooks.unknown_command.is_none() {
						self.hooks.unknown_command = Some(hook);
					}
					if handled {
						return Ok(());
					}
				}
				Err(ShellError::UnknownCommand(input.to_string()))
			}
			Err(err) => Err(err),
		}
	}
}
