//! Minimal [`ShellOps`] stub for table-level unit tests.

use std::any::Any;

use lectern_primitives::ModeId;

use crate::context::{Level, ShellOps};
use crate::error::ShellError;
use crate::options::OptionValue;

/// Records notifications and mode changes; everything else is inert.
#[derive(Default)]
pub(crate) struct StubOps {
	pub notifications: Vec<(Level, String)>,
	pub mode: u32,
}

impl ShellOps for StubOps {
	fn notify(&mut self, level: Level, message: &str) {
		self.notifications.push((level, message.to_string()));
	}

	fn external_notify(&mut self, _summary: &str, _body: &str) {}

	fn mode(&self) -> ModeId {
		ModeId::from_raw(self.mode)
	}

	fn set_mode(&mut self, mode: ModeId) -> Result<(), ShellError> {
		self.mode = mode.raw();
		Ok(())
	}

	fn normal_mode(&self) -> ModeId {
		ModeId::from_raw(1)
	}

	fn inputbar_mode(&self) -> ModeId {
		ModeId::from_raw(2)
	}

	fn buffer(&self) -> String {
		String::new()
	}

	fn clear_buffer(&mut self) {}

	fn option(&self, _name: &str) -> Option<OptionValue> {
		None
	}

	fn option_entries(&self) -> Vec<(String, String)> {
		Vec::new()
	}

	fn set_option(&mut self, name: &str, _value: &str) -> Result<(), ShellError> {
		Err(ShellError::InvalidArgument(format!("unknown option '{name}'")))
	}

	fn inputbar_text(&self) -> Option<String> {
		None
	}

	fn set_inputbar_text(&mut self, _text: &str) -> Result<(), ShellError> {
		Err(ShellError::Unsupported("inputbar view not attached"))
	}

	fn history_previous(&mut self) -> Option<String> {
		None
	}

	fn history_next(&mut self) -> Option<String> {
		None
	}

	fn reset_history_cursor(&mut self) {}

	fn set_window_title(&mut self, _title: &str) -> Result<(), ShellError> {
		Err(ShellError::Unsupported("window chrome not attached"))
	}

	fn set_window_icon(&mut self, _name: &str) -> Result<(), ShellError> {
		Err(ShellError::Unsupported("window chrome not attached"))
	}

	fn map_directive(&mut self, _args: &[String]) -> Result<(), ShellError> {
		Err(ShellError::Unsupported("not a session"))
	}

	fn unmap_directive(&mut self, _args: &[String]) -> Result<(), ShellError> {
		Err(ShellError::Unsupported("not a session"))
	}

	fn user_data(&mut self) -> Option<&mut dyn Any> {
		None
	}
}
