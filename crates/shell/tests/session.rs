//! End-to-end exercises of the session: lifecycle, dispatch, submission
//! routing, history, options, dialogs, and collaborator wiring.

use std::cell::RefCell;
use std::rc::Rc;

use lectern_primitives::{EventPhase, Key, KeyCode, ModeId, Modifiers, MouseButton, MouseEvent};
use lectern_shell::{
	Argument, Command, Completion, CompletionEntry, CompletionFn, DialogActivate, DialogKey,
	InputbarView, KeyOutcome, Level, MouseFn, NotificationSink, OptionCallback, OptionValue,
	Session, ShellError, ShellOps, ShortcutFn, SpecialCommand, SpecialFn, Template, WindowChrome,
};

#[derive(Default)]
struct ViewState {
	text: String,
	prompt: String,
	obscured: bool,
}

struct TestView(Rc<RefCell<ViewState>>);

impl InputbarView for TestView {
	fn text(&self) -> String {
		self.0.borrow().text.clone()
	}

	fn set_text(&mut self, text: &str) {
		self.0.borrow_mut().text = text.to_string();
	}

	fn set_prompt(&mut self, prompt: &str) {
		self.0.borrow_mut().prompt = prompt.to_string();
	}

	fn set_obscured(&mut self, obscured: bool) {
		self.0.borrow_mut().obscured = obscured;
	}
}

struct TestSink(Rc<RefCell<Vec<(Level, String)>>>);

impl NotificationSink for TestSink {
	fn deliver(&mut self, level: Level, message: &str) -> Result<(), ShellError> {
		self.0.borrow_mut().push((level, message.to_string()));
		Ok(())
	}
}

struct TestChrome(Rc<RefCell<Vec<String>>>);

impl WindowChrome for TestChrome {
	fn set_title(&mut self, title: &str) {
		self.0.borrow_mut().push(format!("title:{title}"));
	}

	fn set_icon(&mut self, name: &str) {
		self.0.borrow_mut().push(format!("icon:{name}"));
	}
}

struct TestTemplate(Rc<RefCell<Vec<(String, String)>>>);

impl Template for TestTemplate {
	fn set_variable(&mut self, name: &str, value: &str) {
		self.0.borrow_mut().push((name.to_string(), value.to_string()));
	}
}

fn session() -> Session {
	let mut session = Session::new();
	session.init().unwrap();
	session
}

fn attach_view(session: &mut Session) -> Rc<RefCell<ViewState>> {
	let state = Rc::new(RefCell::new(ViewState::default()));
	session.attach_inputbar_view(Box::new(TestView(state.clone())));
	state
}

fn counting(log: &Rc<RefCell<Vec<u32>>>) -> ShortcutFn {
	let log = log.clone();
	Rc::new(move |_, _, count| {
		log.borrow_mut().push(count);
		Ok(())
	})
}

fn marking(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> ShortcutFn {
	let log = log.clone();
	Rc::new(move |_, _, _| {
		log.borrow_mut().push(tag);
		Ok(())
	})
}

fn logging_command(name: &str, log: &Rc<RefCell<Vec<Vec<String>>>>) -> Command {
	let log = log.clone();
	Command {
		name: name.to_string(),
		abbreviation: None,
		description: format!("{name} command"),
		handler: Rc::new(move |_, args| {
			log.borrow_mut().push(args.to_vec());
			Ok(())
		}),
		completer: None,
	}
}

#[test]
fn dispatch_requires_initialization() {
	let mut session = Session::new();
	assert!(matches!(session.handle_key(Key::char('a')), Err(ShellError::InvalidState(_))));
	assert!(matches!(session.submit("quit"), Err(ShellError::InvalidState(_))));
	session.init().unwrap();
	assert!(matches!(session.init(), Err(ShellError::InvalidState(_))));
}

#[test]
fn destroy_is_terminal_from_either_state() {
	let mut fresh = Session::new();
	fresh.destroy().unwrap();
	assert!(matches!(fresh.destroy(), Err(ShellError::InvalidState(_))));
	assert!(matches!(fresh.init(), Err(ShellError::InvalidState(_))));

	let mut initialized = session();
	initialized.destroy().unwrap();
	assert!(matches!(initialized.handle_key(Key::char('a')), Err(ShellError::InvalidState(_))));
	assert!(matches!(initialized.buffer_get(), Err(ShellError::InvalidState(_))));
}

#[test]
fn modes_round_trip_and_reject_unknown_ids() {
	let mut session = Session::new();
	let custom = session.register_mode("presentation").unwrap();
	assert_eq!(session.register_mode("presentation").unwrap(), custom);
	session.init().unwrap();
	session.set_mode(custom).unwrap();
	assert_eq!(session.mode(), custom);
	assert_eq!(session.mode_name(custom), Some("presentation"));
	assert!(matches!(session.set_mode(ModeId::from_raw(99)), Err(ShellError::InvalidArgument(_))));
	assert!(matches!(session.set_mode(ModeId::ANY), Err(ShellError::InvalidArgument(_))));
}

#[test]
fn entering_the_inputbar_clears_the_buffer() {
	let mut session = session();
	session.handle_key(Key::char('2')).unwrap();
	session.handle_key(Key::char('g')).unwrap();
	assert_eq!(session.buffer_get().unwrap(), "2g");
	let inputbar = session.inputbar_mode();
	session.set_mode(inputbar).unwrap();
	assert_eq!(session.buffer_get().unwrap(), "");
}

#[test]
fn rebinding_a_key_replaces_the_action() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let normal = session.normal_mode();
	session.bind_shortcut(normal, Key::char('q'), marking(&log, "first"), Argument::default()).unwrap();
	session.bind_shortcut(normal, Key::char('q'), marking(&log, "second"), Argument::default()).unwrap();
	session.handle_key(Key::char('q')).unwrap();
	assert_eq!(*log.borrow(), vec!["second"]);
}

#[test]
fn counted_sequences_dispatch_and_clear_the_buffer() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let normal = session.normal_mode();
	session.bind_sequence(normal, "gg", counting(&log), Argument::default()).unwrap();
	assert_eq!(session.handle_key(Key::char('2')).unwrap(), KeyOutcome::Buffered);
	assert_eq!(session.handle_key(Key::char('g')).unwrap(), KeyOutcome::Buffered);
	assert_eq!(session.handle_key(Key::char('g')).unwrap(), KeyOutcome::Dispatched);
	assert_eq!(*log.borrow(), vec![2]);
	assert_eq!(session.buffer_get().unwrap(), "");
}

#[test]
fn mistyped_sequences_persist_until_abort() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let normal = session.normal_mode();
	session.bind_sequence(normal, "gg", counting(&log), Argument::default()).unwrap();
	session.handle_key(Key::char('g')).unwrap();
	session.handle_key(Key::char('x')).unwrap();
	assert_eq!(session.buffer_get().unwrap(), "gx");
	assert!(log.borrow().is_empty());
	assert_eq!(session.handle_key(Key::code(KeyCode::Escape)).unwrap(), KeyOutcome::Dispatched);
	assert_eq!(session.buffer_get().unwrap(), "");
}

#[test]
fn any_mode_bindings_fall_back_and_are_shadowed() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = Session::new();
	let other = session.register_mode("presentation").unwrap();
	session.bind_shortcut(ModeId::ANY, Key::char('x'), marking(&log, "any"), Argument::default()).unwrap();
	session.init().unwrap();
	let normal = session.normal_mode();
	session.bind_shortcut(normal, Key::char('x'), marking(&log, "normal"), Argument::default()).unwrap();

	session.handle_key(Key::char('x')).unwrap();
	session.set_mode(other).unwrap();
	session.handle_key(Key::char('x')).unwrap();
	assert_eq!(*log.borrow(), vec!["normal", "any"]);
}

#[test]
fn mouse_bindings_consume_the_pending_count() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let normal = session.normal_mode();
	let handler: MouseFn = {
		let log = log.clone();
		Rc::new(move |_, _, event, count| {
			log.borrow_mut().push((count, event.x as i64, event.y as i64));
			Ok(())
		})
	};
	session
		.bind_mouse(normal, MouseButton::Left, Modifiers::NONE, EventPhase::Press, handler, Argument::default())
		.unwrap();

	session.handle_key(Key::char('3')).unwrap();
	let event = MouseEvent::new(MouseButton::Left, Modifiers::NONE, EventPhase::Press, 10.0, 4.0);
	assert_eq!(session.handle_mouse(event).unwrap(), KeyOutcome::Dispatched);
	assert_eq!(session.buffer_get().unwrap(), "");
	assert_eq!(*log.borrow(), vec![(3, 10, 4)]);

	let release = MouseEvent::new(MouseButton::Left, Modifiers::NONE, EventPhase::Release, 10.0, 4.0);
	assert_eq!(session.handle_mouse(release).unwrap(), KeyOutcome::Unhandled);
}

#[test]
fn submissions_resolve_commands_with_args() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	session.register_command(logging_command("quit", &log)).unwrap();
	session.register_command(logging_command("quiet", &log)).unwrap();

	assert!(matches!(session.submit("qui"), Err(ShellError::AmbiguousCommand { .. })));
	session.submit("quit").unwrap();
	session.submit("quit now \"two words\"").unwrap();
	assert_eq!(
		*log.borrow(),
		vec![Vec::<String>::new(), vec!["now".to_string(), "two words".to_string()]]
	);
}

#[test]
fn successful_submissions_reach_the_history_in_order() {
	let mut session = session();
	session.on_unknown_command(Rc::new(|_, _| true));
	session.submit("a").unwrap();
	session.submit("b").unwrap();
	session.submit("c").unwrap();
	assert_eq!(session.command_history(), ["a", "b", "c"]);
}

#[test]
fn failed_submissions_are_not_recorded() {
	let mut session = session();
	assert!(matches!(session.submit("nope"), Err(ShellError::UnknownCommand(_))));
	assert!(session.command_history().is_empty());
}

#[test]
fn unknown_command_hook_gets_the_raw_input() {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	{
		let seen = seen.clone();
		session.on_unknown_command(Rc::new(move |_, input| {
			seen.borrow_mut().push(input.to_string());
			input.starts_with("open")
		}));
	}
	session.submit("open file.pdf").unwrap();
	assert!(matches!(session.submit("close"), Err(ShellError::UnknownCommand(_))));
	assert_eq!(*seen.borrow(), vec!["open file.pdf".to_string(), "close".to_string()]);
	assert_eq!(session.command_history(), ["open file.pdf"]);
}

#[test]
fn colon_focuses_the_inputbar_and_activation_submits() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let view = attach_view(&mut session);
	session.register_command(logging_command("open", &log)).unwrap();

	session.handle_key(Key::char(':')).unwrap();
	assert_eq!(session.mode(), session.inputbar_mode());
	assert_eq!(view.borrow().text, ":");

	view.borrow_mut().text = ":open file.pdf".to_string();
	session.inputbar_activate().unwrap();
	assert_eq!(session.mode(), session.normal_mode());
	assert_eq!(view.borrow().text, "");
	assert_eq!(*log.borrow(), vec![vec!["file.pdf".to_string()]]);
	assert_eq!(session.command_history(), ["open file.pdf"]);
}

#[test]
fn escape_in_the_inputbar_aborts_to_normal() {
	let mut session = session();
	let view = attach_view(&mut session);
	session.handle_key(Key::char(':')).unwrap();
	view.borrow_mut().text = ":half typed".to_string();
	assert_eq!(session.handle_key(Key::code(KeyCode::Escape)).unwrap(), KeyOutcome::Dispatched);
	assert_eq!(session.mode(), session.normal_mode());
	assert_eq!(view.borrow().text, "");
	assert!(session.command_history().is_empty());
}

#[test]
fn arrow_keys_recall_history_in_the_inputbar() {
	let mut session = session();
	let view = attach_view(&mut session);
	session.on_unknown_command(Rc::new(|_, _| true));
	session.submit("first").unwrap();
	session.submit("second").unwrap();

	session.handle_key(Key::char(':')).unwrap();
	session.handle_key(Key::code(KeyCode::Up)).unwrap();
	assert_eq!(view.borrow().text, "second");
	session.handle_key(Key::code(KeyCode::Up)).unwrap();
	assert_eq!(view.borrow().text, "first");
	session.handle_key(Key::code(KeyCode::Up)).unwrap();
	assert_eq!(view.borrow().text, "first");
	session.handle_key(Key::code(KeyCode::Down)).unwrap();
	assert_eq!(view.borrow().text, "second");
	session.handle_key(Key::code(KeyCode::Down)).unwrap();
	assert_eq!(view.borrow().text, "");
}

#[test]
fn always_listening_specials_see_every_edit() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let view = attach_view(&mut session);
	let handler: SpecialFn = {
		let log = log.clone();
		Rc::new(move |_, text, _| {
			log.borrow_mut().push(text.to_string());
			Ok(())
		})
	};
	session
		.register_special(SpecialCommand {
			trigger: '/',
			handler,
			always_listen: true,
			argument: Argument::default(),
		})
		.unwrap();

	view.borrow_mut().text = "/a".to_string();
	session.inputbar_changed().unwrap();
	view.borrow_mut().text = "/ab".to_string();
	session.inputbar_changed().unwrap();
	session.submit("/ab").unwrap();
	assert_eq!(*log.borrow(), vec!["a".to_string(), "ab".to_string(), "ab".to_string()]);
	assert_eq!(session.command_history(), ["/ab"]);
}

#[test]
fn passive_specials_run_only_on_submission() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let view = attach_view(&mut session);
	let handler: SpecialFn = {
		let log = log.clone();
		Rc::new(move |_, text, _| {
			log.borrow_mut().push(text.to_string());
			Ok(())
		})
	};
	session
		.register_special(SpecialCommand {
			trigger: '?',
			handler,
			always_listen: false,
			argument: Argument::default(),
		})
		.unwrap();

	view.borrow_mut().text = "?backwards".to_string();
	session.inputbar_changed().unwrap();
	assert!(log.borrow().is_empty());
	session.submit("?backwards").unwrap();
	assert_eq!(*log.borrow(), vec!["backwards".to_string()]);
}

#[test]
fn dialog_activation_is_one_shot_and_restores_normal() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let view = attach_view(&mut session);
	let activate: DialogActivate = {
		let log = log.clone();
		Box::new(move |_, text| {
			log.borrow_mut().push(text.to_string());
			Ok(())
		})
	};
	session.dialog("password:", true, Some(activate), None).unwrap();
	assert_eq!(session.mode(), session.inputbar_mode());
	assert_eq!(view.borrow().prompt, "password:");
	assert!(view.borrow().obscured);

	view.borrow_mut().text = "hunter2".to_string();
	session.inputbar_activate().unwrap();
	assert_eq!(session.mode(), session.normal_mode());
	assert_eq!(*log.borrow(), vec!["hunter2".to_string()]);
	assert!(session.command_history().is_empty());
	assert!(view.borrow().prompt.is_empty());
	assert!(!view.borrow().obscured);

	session.inputbar_activate().unwrap();
	assert_eq!(*log.borrow(), vec!["hunter2".to_string()]);
}

#[test]
fn aborting_a_dialog_drops_it_uninvoked() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let view = attach_view(&mut session);
	let activate: DialogActivate = {
		let log = log.clone();
		Box::new(move |_, text| {
			log.borrow_mut().push(text.to_string());
			Ok(())
		})
	};
	session.dialog("confirm:", false, Some(activate), None).unwrap();
	session.handle_key(Key::code(KeyCode::Escape)).unwrap();
	assert_eq!(session.mode(), session.normal_mode());
	assert!(view.borrow().prompt.is_empty());

	session.inputbar_activate().unwrap();
	assert!(log.borrow().is_empty());
}

#[test]
fn dialog_key_filters_run_before_inputbar_shortcuts() {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	attach_view(&mut session);
	let filter: DialogKey = {
		let seen = seen.clone();
		Box::new(move |_, key| {
			seen.borrow_mut().push(key);
			key == Key::char('q')
		})
	};
	session.dialog("choice:", false, None, Some(filter)).unwrap();

	assert_eq!(session.handle_key(Key::char('q')).unwrap(), KeyOutcome::Dispatched);
	assert_eq!(session.mode(), session.inputbar_mode());
	assert_eq!(session.handle_key(Key::code(KeyCode::Escape)).unwrap(), KeyOutcome::Dispatched);
	assert_eq!(session.mode(), session.normal_mode());
	assert_eq!(*seen.borrow(), vec![Key::char('q'), Key::code(KeyCode::Escape)]);
}

#[test]
fn set_command_toggles_and_reports_options() {
	let mut session = Session::new();
	session.add_option("statusbar", OptionValue::Bool(true), "show the statusbar", false, None).unwrap();
	session.add_option("title", OptionValue::String("doc".into()), "window title", false, None).unwrap();
	session.init().unwrap();
	let notes = Rc::new(RefCell::new(Vec::new()));
	session.attach_notification_sink(Box::new(TestSink(notes.clone())));

	session.submit("set statusbar").unwrap();
	assert_eq!(session.option("statusbar"), Some(OptionValue::Bool(false)));
	session.submit("set title new title").unwrap();
	assert_eq!(session.option("title"), Some(OptionValue::String("new title".into())));
	session.submit("set title").unwrap();
	assert_eq!(
		notes.borrow().as_slice(),
		[(Level::Info, "title = new title".to_string())]
	);
}

#[test]
fn option_callbacks_run_with_session_capabilities() {
	let mut session = Session::new();
	let callback: OptionCallback = Rc::new(|ops, name, value| {
		ops.notify(Level::Info, &format!("{name} -> {value}"));
	});
	session.add_option("zoom", OptionValue::Int(100), "zoom level", false, Some(callback)).unwrap();
	session.init().unwrap();
	let notes = Rc::new(RefCell::new(Vec::new()));
	session.attach_notification_sink(Box::new(TestSink(notes.clone())));

	session.set_option("zoom", "150").unwrap();
	assert_eq!(session.option("zoom"), Some(OptionValue::Int(150)));
	assert_eq!(notes.borrow().as_slice(), [(Level::Info, "zoom -> 150".to_string())]);
}

#[test]
fn completion_lists_commands_then_defers_to_completers() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	let completer: CompletionFn = Rc::new(|_, tail| {
		Completion::single_group(vec![CompletionEntry::plain(format!("file-{tail}"))])
	});
	let mut open = logging_command("open", &log);
	open.completer = Some(completer);
	session.register_command(open).unwrap();
	session.register_command(logging_command("other", &log)).unwrap();

	let names: Vec<String> = session
		.complete("o")
		.groups
		.into_iter()
		.flat_map(|group| group.entries)
		.map(|entry| entry.value)
		.collect();
	assert_eq!(names, vec!["open".to_string(), "other".to_string()]);

	let completion = session.complete("open do");
	assert_eq!(completion.groups[0].entries[0].value, "file-do");

	assert!(session.complete("unknown tail").is_empty());
}

#[test]
fn templates_are_seeded_with_option_values() {
	let vars = Rc::new(RefCell::new(Vec::new()));
	let mut session = Session::new();
	session.add_option("zoom", OptionValue::Int(100), "zoom level", false, None).unwrap();
	session.init().unwrap();
	assert!(matches!(
		session.set_template_variable("fg", "#fff"),
		Err(ShellError::Unsupported(_))
	));

	session.set_template(Box::new(TestTemplate(vars.clone())), true);
	session.set_template_variable("fg", "#fff").unwrap();
	assert_eq!(
		vars.borrow().as_slice(),
		[
			("zoom".to_string(), "100".to_string()),
			("fg".to_string(), "#fff".to_string()),
		]
	);
}

#[test]
fn init_pushes_the_appname_to_the_chrome() {
	let calls = Rc::new(RefCell::new(Vec::new()));
	let mut app = Session::with_appname("lectern-demo");
	app.attach_window_chrome(Box::new(TestChrome(calls.clone())));
	app.init().unwrap();
	app.set_window_title("chapter 2").unwrap();
	app.set_window_icon("book").unwrap();
	assert_eq!(
		calls.borrow().as_slice(),
		[
			"title:lectern-demo".to_string(),
			"title:chapter 2".to_string(),
			"icon:book".to_string(),
		]
	);

	let mut bare = session();
	assert!(matches!(bare.set_window_title("x"), Err(ShellError::Unsupported(_))));
}

#[test]
fn buffer_changed_hook_observes_edits_and_clears() {
	let seen = Rc::new(RefCell::new(Vec::new()));
	let mut session = session();
	{
		let seen = seen.clone();
		session.on_buffer_changed(Rc::new(move |_, text| {
			seen.borrow_mut().push(text.to_string());
		}));
	}
	session.handle_key(Key::char('2')).unwrap();
	session.handle_key(Key::char('g')).unwrap();
	session.handle_key(Key::code(KeyCode::Escape)).unwrap();
	assert_eq!(
		*seen.borrow(),
		vec!["2".to_string(), "2g".to_string(), String::new()]
	);
}

#[test]
fn user_data_round_trips() {
	let mut session = session();
	session.attach_user_data(Box::new(5_i32));
	{
		let data = session.user_data().unwrap();
		*data.downcast_mut::<i32>().unwrap() += 1;
	}
	let data = session.user_data().unwrap();
	assert_eq!(*data.downcast_mut::<i32>().unwrap(), 6);
}
