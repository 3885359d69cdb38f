//! Textual configuration: `set`, `map`, and `unmap` directives.
//!
//! A configuration source is processed line by line. Blank lines and lines
//! starting with `#` are skipped; every other line is tokenized with the
//! submission tokenizer, so quoting works the same in both places. The
//! first failing line aborts the load and its number is carried in the
//! error.

use lectern_primitives::{Key, KeyCode, Modifiers};
use lectern_registry::{ShellError, ShellOps, tokenize};

use crate::session::Session;


/// A parsed key specification from a directive.
pub(crate) enum KeySpec {
	Single(Key),
	Sequence(String),
}

/// Parses a key specification.
///
/// A spec containing spaces is a buffered sequence; each step must be a
/// single character (`"g g"`). Anything else is a single key: an optional
/// run of `ctrl-`, `alt-`, `shift-` prefixes followed by a named key, an
/// `f<n>` function key, or one character.
pub(crate) fn parse_keyspec(spec: &str) -> Result<KeySpec, ShellError> {
	if spec.is_empty() {
		return Err(ShellError::InvalidArgument("empty key specification".into()));
	}
	if spec.contains(' ') {
		let mut sequence = String::new();
		for step in spec.split(' ').filter(|step| !step.is_empty()) {
			let mut chars = step.chars();
			match (chars.next(), chars.next()) {
				(Some(ch), None) => sequence.push(ch),
				_ => {
					return Err(ShellError::InvalidArgument(format!(
						"sequence steps must be single characters, got '{step}'"
					)));
				}
			}
		}
		if sequence.is_empty() {
			return Err(ShellError::InvalidArgument("empty key specification".into()));
		}
		return Ok(KeySpec::Sequence(sequence));
	}
	let mut modifiers = Modifiers::NONE;
	let mut rest = spec;
	loop {
		if let Some(tail) = rest.strip_prefix("ctrl-") {
			modifiers = modifiers.ctrl();
			rest = tail;
		} else if let Some(tail) = rest.strip_prefix("alt-") {
			modifiers = modifiers.alt();
			rest = tail;
		} else if let Some(tail) = rest.strip_prefix("shift-") {
			modifiers = modifiers.shift();
			rest = tail;
		} else {
			break;
		}
	}
	Ok(KeySpec::Single(Key::new(parse_code(rest)?, modifiers)))
}

fn parse_code(text: &str) -> Result<KeyCode, ShellError> {
	let code = match text {
		"esc" | "escape" => KeyCode::Escape,
		"cr" | "enter" | "return" => KeyCode::Enter,
		"space" => KeyCode::Char(' '),
		"tab" => KeyCode::Tab,
		"bs" | "backspace" => KeyCode::Backspace,
		"up" => KeyCode::Up,
		"down" => KeyCode::Down,
		"left" => KeyCode::Left,
		"right" => KeyCode::Right,
		"home" => KeyCode::Home,
		"end" => KeyCode::End,
		"pageup" => KeyCode::PageUp,
		"pagedown" => KeyCode::PageDown,
		"insert" => KeyCode::Insert,
		"del" | "delete" => KeyCode::Delete,
		_ => {
			let mut chars = text.chars();
			if let (Some(ch), None) = (chars.next(), chars.next()) {
				KeyCode::Char(ch)
			} else if let Some(number) = text.strip_prefix('f').and_then(|n| n.parse::<u8>().ok())
				&& (1..=35).contains(&number)
			{
				KeyCode::F(number)
			} else {
				return Err(ShellError::InvalidArgument(format!("unknown key '{text}'")));
			}
		}
	};
	Ok(code)
}

/// Applies a configuration source to an initialized session.
pub fn config_load(session: &mut Session, source: &str) -> Result<(), ShellError> {
	session.ensure_initialized()?;
	for (index, line) in source.lines().enumerate() {
		let line = line.trim();
		if line.is_empty() || line.starts_with('#') {
			continue;
		}
		apply_line(session, line)
			.map_err(|err| ShellError::InvalidArgument(format!("line {}: {err}", index + 1)))?;
	}
	Ok(())
}

fn apply_line(session: &mut Session, line: &str) -> Result<(), ShellError> {
	let tokens = tokenize(line);
	let Some((directive, args)) = tokens.split_first() else {
		return Ok(());
	};
	match directive.as_str() {
		"set" => match args {
			[name, rest @ ..] if !rest.is_empty() => session.set_option(name, &rest.join(" ")),
			_ => Err(ShellError::InvalidArgument("set expects <name> <value>".into())),
		},
		"map" => session.map_directive(args),
		"unmap" => session.unmap_directive(args),
		other => Err(ShellError::InvalidArgument(format!("unknown directive '{other}'"))),
	}
}
