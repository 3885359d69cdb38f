//! Key event types consumed by the binding tables.

mod modifiers;


pub use modifiers::Modifiers;

/// Symbolic identity of a pressed key, independent of modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
	/// A printable character. Uppercase letters arrive as their uppercase
	/// form; Shift is not additionally set for them unless the event source
	/// reports it.
	Char(char),
	/// Function key (F1 through F35).
	F(u8),
	Enter,
	Escape,
	Backspace,
	Tab,
	Up,
	Down,
	Left,
	Right,
	Home,
	End,
	PageUp,
	PageDown,
	Insert,
	Delete,
}

/// A key press: a [`KeyCode`] plus the modifier state at press time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
	pub code: KeyCode,
	pub modifiers: Modifiers,
}

impl Key {
	/// Creates a key from a code and explicit modifiers.
	pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
		Self { code, modifiers }
	}

	/// Creates an unmodified character key.
	pub const fn char(c: char) -> Self {
		Self::new(KeyCode::Char(c), Modifiers::NONE)
	}

	/// Creates a Ctrl-modified character key.
	pub const fn ctrl(c: char) -> Self {
		Self::new(KeyCode::Char(c), Modifiers::CTRL)
	}

	/// Creates an unmodified non-character key.
	pub const fn code(code: KeyCode) -> Self {
		Self::new(code, Modifiers::NONE)
	}

	/// Returns the digit value for an unmodified `0`-`9` key.
	pub fn as_digit(self) -> Option<u32> {
		match self.code {
			KeyCode::Char(c) if self.modifiers.is_empty() => c.to_digit(10),
			_ => None,
		}
	}

	/// Returns true for the Escape key regardless of modifiers.
	pub const fn is_escape(self) -> bool {
		matches!(self.code, KeyCode::Escape)
	}

	/// Returns the character this key inserts, if it inserts one.
	///
	/// Ctrl- and Alt-modified characters are chords, not text, and return
	/// `None`. Shift is allowed since shifted characters already arrive as
	/// their shifted form.
	pub fn printable(self) -> Option<char> {
		match self.code {
			KeyCode::Char(c) if !self.modifiers.ctrl && !self.modifiers.alt => Some(c),
			_ => None,
		}
	}
}
