//! External widget surfaces the session drives.
//!
//! The shell owns no rendering. The embedding UI implements these traits
//! and attaches them to the session; every operation that needs a widget
//! degrades gracefully when none is attached.

/// The inputbar text widget.
pub trait InputbarView {
	/// Current text, without the prompt.
	fn text(&self) -> String;
	fn set_text(&mut self, text: &str);
	/// Prompt rendered ahead of the editable text.
	fn set_prompt(&mut self, prompt: &str);
	/// Masks the text, for password-style dialogs.
	fn set_obscured(&mut self, obscured: bool);
}

/// Window title and icon.
pub trait WindowChrome {
	fn set_title(&mut self, title: &str);
	fn set_icon(&mut self, name: &str);
}

/// Styling template with named string variables.
pub trait Template {
	fn set_variable(&mut self, name: &str, value: &str);
}
