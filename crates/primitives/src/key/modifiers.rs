//! Modifier state attached to key and pointer events.

/// Modifier keys held during an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
	/// Ctrl held.
	pub ctrl: bool,
	/// Alt held.
	pub alt: bool,
	/// Shift held.
	pub shift: bool,
}

impl Modifiers {
	/// No modifier held.
	pub const NONE: Self = Self {
		ctrl: false,
		alt: false,
		shift: false,
	};

	/// Ctrl alone.
	pub const CTRL: Self = Self {
		ctrl: true,
		alt: false,
		shift: false,
	};

	/// Alt alone.
	pub const ALT: Self = Self {
		ctrl: false,
		alt: true,
		shift: false,
	};

	/// Shift alone.
	pub const SHIFT: Self = Self {
		ctrl: false,
		alt: false,
		shift: true,
	};

	/// Returns a copy with Ctrl set.
	pub const fn ctrl(self) -> Self {
		Self { ctrl: true, ..self }
	}

	/// Returns a copy with Alt set.
	pub const fn alt(self) -> Self {
		Self { alt: true, ..self }
	}

	/// Returns a copy with Shift set.
	pub const fn shift(self) -> Self {
		Self { shift: true, ..self }
	}

	/// Returns true when no modifier is held.
	pub const fn is_empty(self) -> bool {
		!self.ctrl && !self.alt && !self.shift
	}
}
