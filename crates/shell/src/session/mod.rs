//! The session aggregate.
//!
//! A session owns every runtime table plus the input buffer, history, and
//! the slots for external collaborators. It moves through three lifecycle
//! states: registration is open from creation until [`destroy`], while
//! mode switching and event dispatch require a prior [`init`].
//!
//! [`init`]: Session::init
//! [`destroy`]: Session::destroy

mod defaults;
mod dispatch;

pub use dispatch::KeyOutcome;

use std::any::Any;

use lectern_primitives::{EventPhase, Key, ModeId, Modifiers, MouseButton};
use lectern_registry::{
	Argument, Command, CommandTable, InputbarMap, Level, MouseFn, MouseMap, OptionCallback,
	OptionStore, OptionValue, ShellError, ShellOps, ShortcutFn, ShortcutMap, SpecialCommand,
	SpecialTable,
};
use rustc_hash::FxHashMap;
use tracing::{debug, error, info, warn};

use crate::buffer::InputBuffer;
use crate::config::{self, KeySpec};
use crate::dialog::{Dialog, DialogActivate, DialogKey};
use crate::history::{HistoryIo, InputHistory};
use crate::hooks::{BufferChangedFn, Hooks, UnknownCommandFn};
use crate::modes::ModeRegistry;
use crate::notify::{DesktopNotifier, NotificationSink};
use crate::view::{InputbarView, Template, WindowChrome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
	Uninitialized,
	Initialized,
	Destroyed,
}

/// One modal interaction shell.
pub struct Session {
	state: Lifecycle,
	appname: String,

	modes: ModeRegistry,
	normal_id: ModeId,
	inputbar_id: ModeId,
	current_mode: ModeId,

	shortcuts: ShortcutMap,
	inputbar_shortcuts: InputbarMap,
	mouse: MouseMap,
	commands: CommandTable,
	specials: SpecialTable,
	options: OptionStore,

	buffer: InputBuffer,
	history: InputHistory,

	shortcut_names: FxHashMap<String, ShortcutFn>,
	argument_names: FxHashMap<String, i32>,
	hooks: Hooks,

	dialog: Option<Dialog>,
	view: Option<Box<dyn InputbarView>>,
	chrome: Option<Box<dyn WindowChrome>>,
	template: Option<Box<dyn Template>>,
	notifications: Option<Box<dyn NotificationSink>>,
	desktop: Option<Box<dyn DesktopNotifier>>,
	view_slot: Option<Box<dyn Any>>,
	user_data: Option<Box<dyn Any>>,
}

impl Session {
	pub fn new() -> Self {
		Self::with_appname("lectern")
	}

	/// Creates a session carrying the embedding application's name, used for
	/// the initial window title.
	pub fn with_appname(appname: impl Into<String>) -> Self {
		Self {
			state: Lifecycle::Uninitialized,
			appname: appname.into(),
			modes: ModeRegistry::default(),
			normal_id: ModeId::ANY,
			inputbar_id: ModeId::ANY,
			current_mode: ModeId::ANY,
			shortcuts: ShortcutMap::default(),
			inputbar_shortcuts: InputbarMap::default(),
			mouse: MouseMap::default(),
			commands: CommandTable::default(),
			specials: SpecialTable::default(),
			options: OptionStore::default(),
			buffer: InputBuffer::default(),
			history: InputHistory::default(),
			shortcut_names: FxHashMap::default(),
			argument_names: FxHashMap::default(),
			hooks: Hooks::default(),
			dialog: None,
			view: None,
			chrome: None,
			template: None,
			notifications: None,
			desktop: None,
			view_slot: None,
			user_data: None,
		}
	}

	pub fn appname(&self) -> &str {
		&self.appname
	}

	pub fn initialized(&self) -> bool {
		self.state == Lifecycle::Initialized
	}

	/// Finishes construction: registers the built-in modes, installs the
	/// default bindings and commands, and seals init-only options.
	pub fn init(&mut self) -> Result<(), ShellError> {
		match self.state {
			Lifecycle::Uninitialized => {}
			Lifecycle::Initialized => return Err(ShellError::InvalidState("session already initialized")),
			Lifecycle::Destroyed => return Err(ShellError::InvalidState("session destroyed")),
		}
		self.normal_id = self.modes.add("normal");
		self.inputbar_id = self.modes.add("inputbar");
		self.current_mode = self.normal_id;
		defaults::install(self).map_err(|err| ShellError::ResourceAcquisition(err.to_string()))?;
		self.options.seal();
		if let Some(chrome) = self.chrome.as_mut() {
			chrome.set_title(&self.appname);
		}
		self.state = Lifecycle::Initialized;
		info!(appname = %self.appname, "session initialized");
		Ok(())
	}

	/// Tears the session down. Every table is emptied and every collaborator
	/// dropped; only [`ShellError::InvalidState`] remains for later calls.
	pub fn destroy(&mut self) -> Result<(), ShellError> {
		if self.state == Lifecycle::Destroyed {
			return Err(ShellError::InvalidState("session already destroyed"));
		}
		self.shortcuts = ShortcutMap::default();
		self.inputbar_shortcuts = InputbarMap::default();
		self.mouse = MouseMap::default();
		self.commands = CommandTable::default();
		self.specials = SpecialTable::default();
		self.options = OptionStore::default();
		self.buffer.clear();
		self.history = InputHistory::default();
		self.shortcut_names.clear();
		self.argument_names.clear();
		self.hooks = Hooks::default();
		self.dialog = None;
		self.view = None;
		self.chrome = None;
		self.template = None;
		self.notifications = None;
		self.desktop = None;
		self.view_slot = None;
		self.user_data = None;
		self.state = Lifecycle::Destroyed;
		debug!("session destroyed");
		Ok(())
	}

	fn ensure_live(&self) -> Result<(), ShellError> {
		if self.state == Lifecycle::Destroyed {
			return Err(ShellError::InvalidState("session destroyed"));
		}
		Ok(())
	}

	pub(crate) fn ensure_initialized(&self) -> Result<(), ShellError> {
		match self.state {
			Lifecycle::Initialized => Ok(()),
			Lifecycle::Uninitialized => Err(ShellError::InvalidState("session not initialized")),
			Lifecycle::Destroyed => Err(ShellError::InvalidState("session destroyed")),
		}
	}

	/// Registers a mode. Re-registering a name returns its existing id.
	pub fn register_mode(&mut self, name: &str) -> Result<ModeId, ShellError> {
		self.ensure_live()?;
		if name.is_empty() {
			return Err(ShellError::InvalidArgument("empty mode name".into()));
		}
		Ok(self.modes.add(name))
	}

	pub fn mode_name(&self, id: ModeId) -> Option<&str> {
		self.modes.name(id)
	}

	pub fn bind_shortcut(&mut self, mode: ModeId, key: Key, handler: ShortcutFn, argument: Argument) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.shortcuts.bind(mode, key, handler, argument);
		Ok(())
	}

	pub fn unbind_shortcut(&mut self, mode: ModeId, key: Key) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.shortcuts.unbind(mode, key)
	}

	pub fn bind_sequence(&mut self, mode: ModeId, sequence: &str, handler: ShortcutFn, argument: Argument) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.shortcuts.bind_sequence(mode, sequence, handler, argument)
	}

	pub fn unbind_sequence(&mut self, mode: ModeId, sequence: &str) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.shortcuts.unbind_sequence(mode, sequence)
	}

	pub fn bind_inputbar_shortcut(&mut self, key: Key, handler: ShortcutFn, argument: Argument) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.inputbar_shortcuts.bind(key, handler, argument);
		Ok(())
	}

	pub fn unbind_inputbar_shortcut(&mut self, key: Key) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.inputbar_shortcuts.unbind(key)
	}

	pub fn bind_mouse(
		&mut self,
		mode: ModeId,
		button: MouseButton,
		modifiers: Modifiers,
		phase: EventPhase,
		handler: MouseFn,
		argument: Argument,
	) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.mouse.bind(mode, button, modifiers, phase, handler, argument);
		Ok(())
	}

	pub fn unbind_mouse(&mut self, mode: ModeId, button: MouseButton, modifiers: Modifiers, phase: EventPhase) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.mouse.unbind(mode, button, modifiers, phase)
	}

	pub fn register_command(&mut self, command: Command) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.commands.register(command)
	}

	pub fn register_special(&mut self, special: SpecialCommand) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.specials.register(special)
	}

	pub fn add_option(
		&mut self,
		name: &str,
		value: OptionValue,
		description: &str,
		init_only: bool,
		callback: Option<OptionCallback>,
	) -> Result<(), ShellError> {
		self.ensure_live()?;
		self.options.add(name, value, description, init_only, callback)
	}

	/// Names a shortcut handler so `map` directives can reference it.
	pub fn register_shortcut_name(&mut self, name: &str, handler: ShortcutFn) -> Result<(), ShellError> {
		self.ensure_live()?;
		if name.is_empty() {
			return Err(ShellError::InvalidArgument("empty shortcut name".into()));
		}
		if self.shortcut_names.insert(name.to_string(), handler).is_some() {
			debug!(name, "shortcut name rebound");
		}
		Ok(())
	}

	/// Names a numeric argument so `map` directives can reference it.
	pub fn register_argument_name(&mut self, name: &str, n: i32) -> Result<(), ShellError> {
		self.ensure_live()?;
		if name.is_empty() {
			return Err(ShellError::InvalidArgument("empty argument name".into()));
		}
		if self.argument_names.insert(name.to_string(), n).is_some() {
			debug!(name, "argument name rebound");
		}
		Ok(())
	}

	pub fn on_buffer_changed(&mut self, hook: BufferChangedFn) {
		self.hooks.buffer_changed = Some(hook);
	}

	pub fn on_unknown_command(&mut self, hook: UnknownCommandFn) {
		self.hooks.unknown_command = Some(hook);
	}

	pub fn attach_inputbar_view(&mut self, view: Box<dyn InputbarView>) {
		self.view = Some(view);
	}

	pub fn attach_window_chrome(&mut self, chrome: Box<dyn WindowChrome>) {
		self.chrome = Some(chrome);
	}

	pub fn attach_notification_sink(&mut self, sink: Box<dyn NotificationSink>) {
		self.notifications = Some(sink);
	}

	pub fn attach_desktop_notifier(&mut self, notifier: Box<dyn DesktopNotifier>) {
		self.desktop = Some(notifier);
	}

	pub fn set_history_io(&mut self, io: Box<dyn HistoryIo>) {
		self.history.set_io(io);
	}

	pub fn attach_user_data(&mut self, data: Box<dyn Any>) {
		self.user_data = Some(data);
	}

	/// Stores the embedder's opaque view handle. The session keeps it
	/// without interpreting it.
	pub fn set_view(&mut self, view: Box<dyn Any>) {
		self.view_slot = Some(view);
	}

	pub fn view(&mut self) -> Option<&mut dyn Any> {
		self.view_slot.as_mut().map(|view| view.as_mut())
	}

	/// Wires the styling template. With `init_variables`, every registered
	/// option's current value is seeded into it as a string variable.
	pub fn set_template(&mut self, mut template: Box<dyn Template>, init_variables: bool) {
		if init_variables {
			for (name, value) in self.options.values() {
				template.set_variable(&name, &value.to_string());
			}
		}
		self.template = Some(template);
	}

	pub fn template(&mut self) -> Option<&mut (dyn Template + 'static)> {
		self.template.as_deref_mut()
	}

	/// Writes one variable through the template collaborator.
	pub fn set_template_variable(&mut self, name: &str, value: &str) -> Result<(), ShellError> {
		match self.template.as_mut() {
			Some(template) => {
				template.set_variable(name, value);
				Ok(())
			}
			None => Err(ShellError::Unsupported("template not attached")),
		}
	}

	/// Ordered, oldest-first view of successfully submitted inputs.
	pub fn command_history(&self) -> &[String] {
		self.history.entries()
	}

	/// Copy of the accumulated input buffer.
	pub fn buffer_get(&self) -> Result<String, ShellError> {
		self.ensure_live()?;
		Ok(self.buffer.as_str().to_string())
	}

	/// Opens a one-shot dialog in the inputbar. The dialog is dropped
	/// without being invoked if the inputbar mode is left before activation.
	pub fn dialog(
		&mut self,
		prompt: &str,
		obscured: bool,
		activate: Option<DialogActivate>,
		key: Option<DialogKey>,
	) -> Result<(), ShellError> {
		self.ensure_initialized()?;
		let inputbar = self.inputbar_id;
		self.set_mode(inputbar)?;
		if let Some(view) = self.view.as_mut() {
			view.set_prompt(prompt);
			view.set_obscured(obscured);
			view.set_text("");
		}
		self.dialog = Some(Dialog { activate, key });
		Ok(())
	}

	pub(crate) fn fire_buffer_changed(&mut self) {
		if let Some(hook) = self.hooks.buffer_changed.take() {
			let text = self.buffer.as_str().to_string();
			hook(self, &text);
			if self.hooks.buffer_changed.is_none() {
				self.hooks.buffer_changed = Some(hook);
			}
		}
	}

	pub(crate) fn clear_buffer_and_notify(&mut self) {
		if self.buffer.is_empty() {
			return;
		}
		self.buffer.clear();
		self.fire_buffer_changed();
	}

	fn reset_view(&mut self) {
		if let Some(view) = self.view.as_mut() {
			view.set_text("");
			view.set_prompt("");
			view.set_obscured(false);
		}
	}

	pub(crate) fn map_args(&mut self, args: &[String]) -> Result<(), ShellError> {
		let (mode, rest) = self.directive_mode(args)?;
		let [keyspec, shortcut, tail @ ..] = rest else {
			return Err(ShellError::InvalidArgument("map expects <keyspec> <shortcut>".into()));
		};
		let handler = self
			.shortcut_names
			.get(shortcut.as_str())
			.cloned()
			.ok_or_else(|| ShellError::InvalidArgument(format!("unknown shortcut '{shortcut}'")))?;
		let argument = match tail {
			[] => Argument::default(),
			[arg] => match self.argument_names.get(arg.as_str()) {
				Some(&n) => Argument::number(n),
				None => Argument::with_text(arg.as_str()),
			},
			_ => return Err(ShellError::InvalidArgument("too many arguments to map".into())),
		};
		match config::parse_keyspec(keyspec)? {
			KeySpec::Single(key) => {
				self.shortcuts.bind(mode, key, handler, argument);
				Ok(())
			}
			KeySpec::Sequence(sequence) => self.shortcuts.bind_sequence(mode, &sequence, handler, argument),
		}
	}

	pub(crate) fn unmap_args(&mut self, args: &[String]) -> Result<(), ShellError> {
		let (mode, rest) = self.directive_mode(args)?;
		let [keyspec] = rest else {
			return Err(ShellError::InvalidArgument("unmap expects <keyspec>".into()));
		};
		match config::parse_keyspec(keyspec)? {
			KeySpec::Single(key) => self.shortcuts.unbind(mode, key),
			KeySpec::Sequence(sequence) => self.shortcuts.unbind_sequence(mode, &sequence),
		}
	}

	/// Peels an optional leading `[mode]` token off a directive argument
	/// list. Directives without one target the normal mode.
	fn directive_mode<'a>(&self, args: &'a [String]) -> Result<(ModeId, &'a [String]), ShellError> {
		if let Some(first) = args.first()
			&& let Some(name) = first.strip_prefix('[').and_then(|s| s.strip_suffix(']'))
		{
			let id = self
				.modes
				.id(name)
				.ok_or_else(|| ShellError::InvalidArgument(format!("unknown mode '{name}'")))?;
			return Ok((id, &args[1..]));
		}
		Ok((self.normal_id, args))
	}
}

impl Default for Session {
	fn default() -> Self {
		Self::new()
	}
}

impl ShellOps for Session {
	fn notify(&mut self, level: Level, message: &str) {
		match level {
			Level::Info => info!("{message}"),
			Level::Warning => warn!("{message}"),
			Level::Error => error!("{message}"),
		}
		if let Some(sink) = self.notifications.as_mut()
			&& let Err(err) = sink.deliver(level, message)
		{
			warn!(%err, "notification sink failed");
		}
	}

	fn external_notify(&mut self, summary: &str, body: &str) {
		if let Some(notifier) = self.desktop.as_mut()
			&& let Err(err) = notifier.send(summary, body)
		{
			warn!(%err, "desktop notifier failed");
		}
	}

	fn mode(&self) -> ModeId {
		self.current_mode
	}

	fn set_mode(&mut self, mode: ModeId) -> Result<(), ShellError> {
		self.ensure_initialized()?;
		if !self.modes.contains(mode) {
			return Err(ShellError::InvalidArgument(format!("unknown mode id {}", mode.raw())));
		}
		if mode == self.current_mode {
			return Ok(());
		}
		let crossing_inputbar = (self.current_mode == self.inputbar_id) != (mode == self.inputbar_id);
		if crossing_inputbar {
			self.clear_buffer_and_notify();
		}
		if self.current_mode == self.inputbar_id {
			if self.dialog.take().is_some() {
				debug!("pending dialog dropped");
			}
			self.reset_view();
		}
		debug!(from = self.current_mode.raw(), to = mode.raw(), "mode switched");
		self.current_mode = mode;
		Ok(())
	}

	fn normal_mode(&self) -> ModeId {
		self.normal_id
	}

	fn inputbar_mode(&self) -> ModeId {
		self.inputbar_id
	}

	fn buffer(&self) -> String {
		self.buffer.as_str().to_string()
	}

	fn clear_buffer(&mut self) {
		self.clear_buffer_and_notify();
	}

	fn option(&self, name: &str) -> Option<OptionValue> {
		self.options.get(name)
	}

	fn option_entries(&self) -> Vec<(String, String)> {
		self.options.entries()
	}

	fn set_option(&mut self, name: &str, value: &str) -> Result<(), ShellError> {
		let callback = self.options.set_from_str(name, value)?;
		if let Some(callback) = callback
			&& let Some(value) = self.options.get(name)
		{
			callback(self, name, &value);
		}
		Ok(())
	}

	fn inputbar_text(&self) -> Option<String> {
		self.view.as_ref().map(|view| view.text())
	}

	fn set_inputbar_text(&mut self, text: &str) -> Result<(), ShellError> {
		match self.view.as_mut() {
			Some(view) => {
				view.set_text(text);
				Ok(())
			}
			None => Err(ShellError::Unsupported("inputbar view not attached")),
		}
	}

	fn history_previous(&mut self) -> Option<String> {
		self.history.previous()
	}

	fn history_next(&mut self) -> Option<String> {
		self.history.next()
	}

	fn reset_history_cursor(&mut self) {
		self.history.reset_cursor();
	}

	fn set_window_title(&mut self, title: &str) -> Result<(), ShellError> {
		match self.chrome.as_mut() {
			Some(chrome) => {
				chrome.set_title(title);
				Ok(())
			}
			None => Err(ShellError::Unsupported("window chrome not attached")),
		}
	}

	fn set_window_icon(&mut self, name: &str) -> Result<(), ShellError> {
		match self.chrome.as_mut() {
			Some(chrome) => {
				chrome.set_icon(name);
				Ok(())
			}
			None => Err(ShellError::Unsupported("window chrome not attached")),
		}
	}

	fn map_directive(&mut self, args: &[String]) -> Result<(), ShellError> {
		self.map_args(args)
	}

	fn unmap_directive(&mut self, args: &[String]) -> Result<(), ShellError> {
		self.unmap_args(args)
	}

	fn user_data(&mut self) -> Option<&mut dyn Any> {
		self.user_data.as_mut().map(|data| data.as_mut())
	}
}
