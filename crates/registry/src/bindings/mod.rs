//! Key, sequence, mouse, and inputbar binding tables.
//!
//! All tables are exact-keyed insert-or-replace maps. Lookup consults the
//! requested mode first and falls back to [`ModeId::ANY`]; there is no
//! wildcard or prefix matching for single events. Sequence bindings are
//! keyed by the literal character string matched against the accumulated
//! buffer after the count prefix has been stripped.

use lectern_primitives::{EventPhase, Key, ModeId, Modifiers, MouseButton};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::context::{Argument, MouseFn, ShortcutFn};
use crate::error::ShellError;

#[cfg(test)]
mod tests;

/// A registered shortcut: handler plus its registration-time argument.
#[derive(Clone)]
pub struct ShortcutEntry {
	pub handler: ShortcutFn,
	pub argument: Argument,
}

/// A registered mouse binding.
#[derive(Clone)]
pub struct MouseEntry {
	pub handler: MouseFn,
	pub argument: Argument,
}

/// Key and sequence bindings, keyed by mode.
#[derive(Default)]
pub struct ShortcutMap {
	keys: FxHashMap<(ModeId, Key), ShortcutEntry>,
	sequences: FxHashMap<(ModeId, String), ShortcutEntry>,
}

impl ShortcutMap {
	/// Binds a single key. Rebinding the same `(mode, key)` replaces the
	/// previous entry.
	pub fn bind(&mut self, mode: ModeId, key: Key, handler: ShortcutFn, argument: Argument) {
		let entry = ShortcutEntry { handler, argument };
		if self.keys.insert((mode, key), entry).is_some() {
			debug!(mode = mode.raw(), ?key, "shortcut rebound");
		}
	}

	/// Removes a key binding.
	pub fn unbind(&mut self, mode: ModeId, key: Key) -> Result<(), ShellError> {
		match self.keys.remove(&(mode, key)) {
			Some(_) => Ok(()),
			None => Err(ShellError::InvalidArgument(format!(
				"no shortcut bound to {key:?} in mode {}",
				mode.raw()
			))),
		}
	}

	/// Binds a character sequence matched against the buffer.
	pub fn bind_sequence(&mut self, mode: ModeId, sequence: &str, handler: ShortcutFn, argument: Argument) -> Result<(), ShellError> {
		if sequence.is_empty() {
			return Err(ShellError::InvalidArgument("empty shortcut sequence".into()));
		}
		let entry = ShortcutEntry { handler, argument };
		if self.sequences.insert((mode, sequence.to_string()), entry).is_some() {
			debug!(mode = mode.raw(), sequence, "sequence rebound");
		}
		Ok(())
	}

	/// Removes a sequence binding.
	pub fn unbind_sequence(&mut self, mode: ModeId, sequence: &str) -> Result<(), ShellError> {
		match self.sequences.remove(&(mode, sequence.to_string())) {
			Some(_) => Ok(()),
			None => Err(ShellError::InvalidArgument(format!(
				"no sequence '{sequence}' bound in mode {}",
				mode.raw()
			))),
		}
	}

	/// Resolves a key in the given mode, falling back to `ANY`.
	pub fn resolve(&self, mode: ModeId, key: Key) -> Option<ShortcutEntry> {
		self.keys
			.get(&(mode, key))
			.or_else(|| self.keys.get(&(ModeId::ANY, key)))
			.cloned()
	}

	/// Resolves a buffered sequence in the given mode, falling back to `ANY`.
	pub fn resolve_sequence(&self, mode: ModeId, sequence: &str) -> Option<ShortcutEntry> {
		self.sequences
			.get(&(mode, sequence.to_string()))
			.or_else(|| self.sequences.get(&(ModeId::ANY, sequence.to_string())))
			.cloned()
	}
}

/// Mouse bindings, keyed by mode, button, modifiers and event phase.
#[derive(Default)]
pub struct MouseMap {
	entries: FxHashMap<(ModeId, MouseButton, Modifiers, EventPhase), MouseEntry>,
}

impl MouseMap {
	/// Binds a pointer event. Rebinding the same tuple replaces.
	pub fn bind(
		&mut self,
		mode: ModeId,
		button: MouseButton,
		modifiers: Modifiers,
		phase: EventPhase,
		handler: MouseFn,
		argument: Argument,
	) {
		let entry = MouseEntry { handler, argument };
		if self.entries.insert((mode, button, modifiers, phase), entry).is_some() {
			debug!(mode = mode.raw(), ?button, ?phase, "mouse binding rebound");
		}
	}

	/// Removes a pointer binding.
	pub fn unbind(&mut self, mode: ModeId, button: MouseButton, modifiers: Modifiers, phase: EventPhase) -> Result<(), ShellError> {
		match self.entries.remove(&(mode, button, modifiers, phase)) {
			Some(_) => Ok(()),
			None => Err(ShellError::InvalidArgument(format!(
				"no mouse binding for {button:?} {phase:?} in mode {}",
				mode.raw()
			))),
		}
	}

	/// Resolves a pointer event, falling back to `ANY`.
	pub fn resolve(&self, mode: ModeId, button: MouseButton, modifiers: Modifiers, phase: EventPhase) -> Option<MouseEntry> {
		self.entries
			.get(&(mode, button, modifiers, phase))
			.or_else(|| self.entries.get(&(ModeId::ANY, button, modifiers, phase)))
			.cloned()
	}
}

/// Key bindings active only while the inputbar has focus.
///
/// Independent of the mode-keyed tables: the inputbar's text editing is
/// owned by the external widget, so only explicitly bound keys are
/// intercepted here.
#[derive(Default)]
pub struct InputbarMap {
	entries: FxHashMap<Key, ShortcutEntry>,
}

impl InputbarMap {
	/// Binds a key. Rebinding replaces.
	pub fn bind(&mut self, key: Key, handler: ShortcutFn, argument: Argument) {
		let entry = ShortcutEntry { handler, argument };
		if self.entries.insert(key, entry).is_some() {
			debug!(?key, "inputbar shortcut rebound");
		}
	}

	/// Removes a binding.
	pub fn unbind(&mut self, key: Key) -> Result<(), ShellError> {
		match self.entries.remove(&key) {
			Some(_) => Ok(()),
			None => Err(ShellError::InvalidArgument(format!("no inputbar shortcut bound to {key:?}"))),
		}
	}

	/// Resolves a key.
	pub fn resolve(&self, key: Key) -> Option<ShortcutEntry> {
		self.entries.get(&key).cloned()
	}
}
