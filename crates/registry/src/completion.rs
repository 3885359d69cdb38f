//! Completion candidate lists returned by completers.

/// One completion candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
	pub value: String,
	pub description: Option<String>,
}

impl CompletionEntry {
	/// An entry with no description.
	pub fn plain(value: impl Into<String>) -> Self {
		Self {
			value: value.into(),
			description: None,
		}
	}
}

/// A labeled group of candidates, rendered as one section in the UI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionGroup {
	/// Section heading. `None` for the anonymous default group.
	pub label: Option<String>,
	pub entries: Vec<CompletionEntry>,
}

/// The full candidate set for one completion request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
	pub groups: Vec<CompletionGroup>,
}

impl Completion {
	/// Wraps entries in a single anonymous group. Empty input produces an
	/// empty completion with no groups.
	pub fn single_group(entries: Vec<CompletionEntry>) -> Self {
		if entries.is_empty() {
			return Self::default();
		}
		Self {
			groups: vec![CompletionGroup {
				label: None,
				entries,
			}],
		}
	}

	/// True when no group carries any entry.
	pub fn is_empty(&self) -> bool {
		self.groups.iter().all(|g| g.entries.is_empty())
	}
}
