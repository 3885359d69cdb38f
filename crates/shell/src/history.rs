//! Inputbar submission history.
//!
//! The history is a list ordered oldest to newest with a cursor that steps
//! backward through it. An optional IO backend persists entries; its
//! failures are logged and never surface to the caller.

use tracing::warn;

use lectern_registry::ShellError;

/// Persistence backend for the input history.
pub trait HistoryIo {
	/// Reads all persisted entries, oldest first.
	fn read(&mut self) -> Result<Vec<String>, ShellError>;
	/// Appends one entry.
	fn append(&mut self, line: &str) -> Result<(), ShellError>;
}

/// In-memory history with an optional persistence backend.
#[derive(Default)]
pub struct InputHistory {
	entries: Vec<String>,
	cursor: Option<usize>,
	io: Option<Box<dyn HistoryIo>>,
}

impl InputHistory {
	/// Attaches a backend and replaces the in-memory list with its contents.
	pub fn set_io(&mut self, mut io: Box<dyn HistoryIo>) {
		match io.read() {
			Ok(entries) => self.entries = entries,
			Err(err) => {
				warn!(%err, "history backend read failed");
				self.entries.clear();
			}
		}
		self.cursor = None;
		self.io = Some(io);
	}

	/// Appends an entry verbatim and resets the cursor. Empty lines are
	/// skipped; duplicates are kept.
	pub fn append(&mut self, line: &str) {
		self.cursor = None;
		if line.is_empty() {
			return;
		}
		self.entries.push(line.to_string());
		if let Some(io) = self.io.as_mut()
			&& let Err(err) = io.append(line)
		{
			warn!(%err, "history backend append failed");
		}
	}

	/// Steps toward older entries. At the oldest entry the cursor stays put
	/// and the oldest entry is returned again.
	pub fn previous(&mut self) -> Option<String> {
		if self.entries.is_empty() {
			return None;
		}
		let index = match self.cursor {
			None => self.entries.len() - 1,
			Some(0) => 0,
			Some(index) => index - 1,
		};
		self.cursor = Some(index);
		Some(self.entries[index].clone())
	}

	/// Steps back toward newer entries. Past the newest entry the cursor
	/// clears and `None` signals the caller to restore its own text.
	pub fn next(&mut self) -> Option<String> {
		let index = self.cursor?;
		if index + 1 < self.entries.len() {
			self.cursor = Some(index + 1);
			Some(self.entries[index + 1].clone())
		} else {
			self.cursor = None;
			None
		}
	}

	/// Clears the cursor. With a backend attached the entry list is re-read,
	/// picking up lines other writers appended to the shared store.
	pub fn reset_cursor(&mut self) {
		self.cursor = None;
		if let Some(io) = self.io.as_mut() {
			match io.read() {
				Ok(entries) => self.entries = entries,
				Err(err) => warn!(%err, "history backend read failed"),
			}
		}
	}

	pub fn entries(&self) -> &[String] {
		&self.entries
	}
}
