//! Typed runtime options.
//!
//! Options are declared during initialization with a name, type, default
//! value, and optional change callback. After the store is sealed, options
//! marked init-only reject further writes. Values are parsed from text per
//! the declared type; a type mismatch on a typed write is an error.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::context::ShellOps;
use crate::error::ShellError;


/// The type an option was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
	Bool,
	Int,
	Float,
	String,
}

impl OptionType {
	pub fn name(self) -> &'static str {
		match self {
			OptionType::Bool => "boolean",
			OptionType::Int => "integer",
			OptionType::Float => "float",
			OptionType::String => "string",
		}
	}
}

/// A typed option value.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
}

impl OptionValue {
	pub fn option_type(&self) -> OptionType {
		match self {
			OptionValue::Bool(_) => OptionType::Bool,
			OptionValue::Int(_) => OptionType::Int,
			OptionValue::Float(_) => OptionType::Float,
			OptionValue::String(_) => OptionType::String,
		}
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			OptionValue::Bool(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_int(&self) -> Option<i64> {
		match self {
			OptionValue::Int(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_float(&self) -> Option<f64> {
		match self {
			OptionValue::Float(value) => Some(*value),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			OptionValue::String(value) => Some(value),
			_ => None,
		}
	}

	/// Parses a textual value according to the given type.
	pub fn parse(option_type: OptionType, text: &str) -> Result<Self, ShellError> {
		match option_type {
			OptionType::Bool => match text {
				"true" | "1" => Ok(OptionValue::Bool(true)),
				"false" | "0" => Ok(OptionValue::Bool(false)),
				_ => Err(ShellError::InvalidArgument(format!("'{text}' is not a boolean"))),
			},
			OptionType::Int => text
				.parse::<i64>()
				.map(OptionValue::Int)
				.map_err(|_| ShellError::InvalidArgument(format!("'{text}' is not an integer"))),
			OptionType::Float => text
				.parse::<f64>()
				.map(OptionValue::Float)
				.map_err(|_| ShellError::InvalidArgument(format!("'{text}' is not a float"))),
			OptionType::String => Ok(OptionValue::String(text.to_string())),
		}
	}
}

impl fmt::Display for OptionValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			OptionValue::Bool(value) => write!(f, "{value}"),
			OptionValue::Int(value) => write!(f, "{value}"),
			OptionValue::Float(value) => write!(f, "{value}"),
			OptionValue::String(value) => write!(f, "{value}"),
		}
	}
}

impl From<bool> for OptionValue {
	fn from(value: bool) -> Self {
		OptionValue::Bool(value)
	}
}

impl From<i64> for OptionValue {
	fn from(value: i64) -> Self {
		OptionValue::Int(value)
	}
}

impl From<f64> for OptionValue {
	fn from(value: f64) -> Self {
		OptionValue::Float(value)
	}
}

impl From<&str> for OptionValue {
	fn from(value: &str) -> Self {
		OptionValue::String(value.to_string())
	}
}

impl From<String> for OptionValue {
	fn from(value: String) -> Self {
		OptionValue::String(value)
	}
}

/// Invoked after an option's value changes. Receives the option name and
/// the new value.
pub type OptionCallback = Rc<dyn Fn(&mut dyn ShellOps, &str, &OptionValue)>;

struct Slot {
	value: OptionValue,
	description: String,
	init_only: bool,
	callback: Option<OptionCallback>,
}

/// The per-session option store.
///
/// Writes return the slot's callback so the caller can invoke it with the
/// full session surface; the store itself never re-enters handlers.
#[derive(Default)]
pub struct OptionStore {
	slots: FxHashMap<String, Slot>,
	sealed: bool,
}

impl OptionStore {
	/// Declares an option. Redeclaring a name is rejected.
	pub fn add(
		&mut self,
		name: &str,
		value: OptionValue,
		description: &str,
		init_only: bool,
		callback: Option<OptionCallback>,
	) -> Result<(), ShellError> {
		if name.is_empty() {
			return Err(ShellError::InvalidArgument("empty option name".into()));
		}
		if self.slots.contains_key(name) {
			return Err(ShellError::InvalidArgument(format!("option '{name}' already declared")));
		}
		self.slots.insert(
			name.to_string(),
			Slot {
				value,
				description: description.to_string(),
				init_only,
				callback,
			},
		);
		Ok(())
	}

	/// Marks the end of initialization. Init-only options become read-only.
	pub fn seal(&mut self) {
		self.sealed = true;
	}

	/// Reads an option's current value.
	pub fn get(&self, name: &str) -> Option<OptionValue> {
		self.slots.get(name).map(|slot| slot.value.clone())
	}

	/// Writes a typed value. The type must match the declared type.
	pub fn set(&mut self, name: &str, value: OptionValue) -> Result<Option<OptionCallback>, ShellError> {
		let slot = self
			.slots
			.get_mut(name)
			.ok_or_else(|| ShellError::InvalidArgument(format!("unknown option '{name}'")))?;
		if self.sealed && slot.init_only {
			return Err(ShellError::InvalidArgument(format!(
				"option '{name}' can only be set at startup"
			)));
		}
		if value.option_type() != slot.value.option_type() {
			return Err(ShellError::InvalidArgument(format!(
				"option '{name}' expects a {}",
				slot.value.option_type().name()
			)));
		}
		debug!(name, value = %value, "option set");
		slot.value = value;
		Ok(slot.callback.clone())
	}

	/// Writes an option from its textual form, parsed per the declared type.
	pub fn set_from_str(&mut self, name: &str, text: &str) -> Result<Option<OptionCallback>, ShellError> {
		let option_type = self
			.slots
			.get(name)
			.map(|slot| slot.value.option_type())
			.ok_or_else(|| ShellError::InvalidArgument(format!("unknown option '{name}'")))?;
		let value = OptionValue::parse(option_type, text)?;
		self.set(name, value)
	}

	/// Lists `(name, value)` for every declared option, sorted by name.
	pub fn values(&self) -> Vec<(String, OptionValue)> {
		let mut values: Vec<(String, OptionValue)> = self
			.slots
			.iter()
			.map(|(name, slot)| (name.clone(), slot.value.clone()))
			.collect();
		values.sort_by(|a, b| a.0.cmp(&b.0));
		values
	}

	/// Lists `(name, description)` for every declared option, sorted by name.
	pub fn entries(&self) -> Vec<(String, String)> {
		let mut entries: Vec<(String, String)> = self
			.slots
			.iter()
			.map(|(name, slot)| (name.clone(), slot.description.clone()))
			.collect();
		entries.sort();
		entries
	}
}
