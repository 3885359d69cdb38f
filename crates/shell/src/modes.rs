//! Mode identity allocation.
//!
//! Modes are named states registered at runtime. Ids are handed out
//! sequentially starting at 1; id 0 is the `ANY` sentinel and is never a
//! registered mode.

use lectern_primitives::ModeId;
use rustc_hash::FxHashMap;

/// Allocates and resolves mode ids.
#[derive(Default)]
pub struct ModeRegistry {
	names: Vec<String>,
	by_name: FxHashMap<String, ModeId>,
}

impl ModeRegistry {
	/// Registers a mode and returns its id. Registering an existing name
	/// returns the id allocated for it before.
	pub fn add(&mut self, name: &str) -> ModeId {
		if let Some(&id) = self.by_name.get(name) {
			return id;
		}
		self.names.push(name.to_string());
		let id = ModeId::from_raw(self.names.len() as u32);
		self.by_name.insert(name.to_string(), id);
		id
	}

	/// True for ids handed out by [`add`](Self::add). `ANY` is not a mode.
	pub fn contains(&self, id: ModeId) -> bool {
		let raw = id.raw();
		raw >= 1 && raw as usize <= self.names.len()
	}

	/// Resolves a registered mode's name.
	pub fn name(&self, id: ModeId) -> Option<&str> {
		let raw = id.raw();
		if raw == 0 {
			return None;
		}
		self.names.get(raw as usize - 1).map(String::as_str)
	}

	/// Resolves a name to its id.
	pub fn id(&self, name: &str) -> Option<ModeId> {
		self.by_name.get(name).copied()
	}
}

#[cfg(test)]
mod tests {
	use super::ModeRegistry;
	use lectern_primitives::ModeId;

	#[test]
	fn ids_start_at_one_and_round_trip() {
		let mut modes = ModeRegistry::default();
		let normal = modes.add("normal");
		let insert = modes.add("insert");
		assert_eq!(normal.raw(), 1);
		assert_eq!(insert.raw(), 2);
		assert_eq!(modes.name(normal), Some("normal"));
		assert_eq!(modes.id("insert"), Some(insert));
	}

	#[test]
	fn re_adding_a_name_returns_the_same_id() {
		let mut modes = ModeRegistry::default();
		let first = modes.add("normal");
		assert_eq!(modes.add("normal"), first);
	}

	#[test]
	fn any_is_never_contained() {
		let mut modes = ModeRegistry::default();
		modes.add("normal");
		assert!(!modes.contains(ModeId::ANY));
		assert!(modes.contains(ModeId::from_raw(1)));
		assert!(!modes.contains(ModeId::from_raw(2)));
	}
}
