//! Built-in bindings, commands, and shortcut names installed at init.

use std::rc::Rc;

use lectern_primitives::{Key, KeyCode, ModeId};
use lectern_registry::{
	Argument, Command, Completion, CompletionEntry, Level, OptionValue, ShellError, ShellOps,
};

use super::Session;

pub(super) fn install(session: &mut Session) -> Result<(), ShellError> {
	session.register_shortcut_name("abort", Rc::new(sc_abort))?;
	session.register_shortcut_name("focus_inputbar", Rc::new(sc_focus_inputbar))?;

	let normal = session.normal_mode();
	session.bind_shortcut(normal, Key::char(':'), Rc::new(sc_focus_inputbar), Argument::with_text(":"))?;
	session.bind_shortcut(ModeId::ANY, Key::code(KeyCode::Escape), Rc::new(sc_abort), Argument::default())?;

	session.bind_inputbar_shortcut(Key::code(KeyCode::Escape), Rc::new(sc_abort), Argument::default())?;
	session.bind_inputbar_shortcut(Key::code(KeyCode::Up), Rc::new(isc_history_previous), Argument::default())?;
	session.bind_inputbar_shortcut(Key::code(KeyCode::Down), Rc::new(isc_history_next), Argument::default())?;

	session.register_command(Command {
		name: "set".into(),
		abbreviation: None,
		description: "Set or toggle an option".into(),
		handler: Rc::new(cmd_set),
		completer: Some(Rc::new(complete_set)),
	})?;
	session.register_command(Command {
		name: "map".into(),
		abbreviation: None,
		description: "Map a shortcut".into(),
		handler: Rc::new(|ops, args| ops.map_directive(args)),
		completer: None,
	})?;
	session.register_command(Command {
		name: "unmap".into(),
		abbreviation: None,
		description: "Remove a shortcut mapping".into(),
		handler: Rc::new(|ops, args| ops.unmap_directive(args)),
		completer: None,
	})?;
	Ok(())
}

/// Swallows the missing-widget error; the operation is otherwise the same
/// with and without an attached view.
fn set_text_if_attached(ops: &mut dyn ShellOps, text: &str) -> Result<(), ShellError> {
	match ops.set_inputbar_text(text) {
		Ok(()) | Err(ShellError::Unsupported(_)) => Ok(()),
		Err(err) => Err(err),
	}
}

fn sc_abort(ops: &mut dyn ShellOps, _argument: &Argument, _count: u32) -> Result<(), ShellError> {
	ops.clear_buffer();
	ops.reset_history_cursor();
	set_text_if_attached(ops, "")?;
	let normal = ops.normal_mode();
	ops.set_mode(normal)
}

fn sc_focus_inputbar(ops: &mut dyn ShellOps, argument: &Argument, _count: u32) -> Result<(), ShellError> {
	let inputbar = ops.inputbar_mode();
	ops.set_mode(inputbar)?;
	if let Some(text) = argument.text.as_deref() {
		set_text_if_attached(ops, text)?;
	}
	Ok(())
}

fn isc_history_previous(ops: &mut dyn ShellOps, _argument: &Argument, _count: u32) -> Result<(), ShellError> {
	match ops.history_previous() {
		Some(line) => set_text_if_attached(ops, &line),
		None => Ok(()),
	}
}

fn isc_history_next(ops: &mut dyn ShellOps, _argument: &Argument, _count: u32) -> Result<(), ShellError> {
	match ops.history_next() {
		Some(line) => set_text_if_attached(ops, &line),
		None => set_text_if_attached(ops, ""),
	}
}

fn cmd_set(ops: &mut dyn ShellOps, args: &[String]) -> Result<(), ShellError> {
	match args {
		[] => Err(ShellError::InvalidArgument("set expects an option name".into())),
		[name] => match ops.option(name) {
			Some(OptionValue::Bool(value)) => ops.set_option(name, if value { "false" } else { "true" }),
			Some(value) => {
				ops.notify(Level::Info, &format!("{name} = {value}"));
				Ok(())
			}
			None => Err(ShellError::InvalidArgument(format!("unknown option '{name}'"))),
		},
		[name, rest @ ..] => ops.set_option(name, &rest.join(" ")),
	}
}

fn complete_set(ops: &mut dyn ShellOps, tail: &str) -> Completion {
	let prefix = tail.trim_start();
	let entries = ops
		.option_entries()
		.into_iter()
		.filter(|(name, _)| name.starts_with(prefix))
		.map(|(name, description)| CompletionEntry {
			value: name,
			description: Some(description),
		})
		.collect();
	Completion::single_group(entries)
}
