use std::cell::RefCell;
use std::rc::Rc;

use lectern_primitives::{EventPhase, Key, ModeId, Modifiers, MouseButton};

use super::{InputbarMap, MouseMap, ShortcutMap};
use crate::context::{Argument, ShortcutFn};
use crate::error::ShellError;
use crate::testutil::StubOps;

fn marker(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> ShortcutFn {
	let log = log.clone();
	Rc::new(move |_, _, _| {
		log.borrow_mut().push(tag);
		Ok(())
	})
}

fn noop() -> ShortcutFn {
	Rc::new(|_, _, _| Ok(()))
}

const NORMAL: ModeId = ModeId::from_raw(1);
const OTHER: ModeId = ModeId::from_raw(2);

#[test]
fn rebinding_replaces_the_entry() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut map = ShortcutMap::default();
	map.bind(NORMAL, Key::char('q'), marker(&log, "first"), Argument::default());
	map.bind(NORMAL, Key::char('q'), marker(&log, "second"), Argument::default());

	let entry = map.resolve(NORMAL, Key::char('q')).unwrap();
	let mut ops = StubOps::default();
	(entry.handler)(&mut ops, &entry.argument, 1).unwrap();
	assert_eq!(*log.borrow(), vec!["second"]);
}

#[test]
fn any_mode_is_a_fallback_not_an_override() {
	let log = Rc::new(RefCell::new(Vec::new()));
	let mut map = ShortcutMap::default();
	map.bind(ModeId::ANY, Key::char('x'), marker(&log, "any"), Argument::default());
	map.bind(NORMAL, Key::char('x'), marker(&log, "normal"), Argument::default());

	let mut ops = StubOps::default();
	let entry = map.resolve(NORMAL, Key::char('x')).unwrap();
	(entry.handler)(&mut ops, &entry.argument, 1).unwrap();
	let entry = map.resolve(OTHER, Key::char('x')).unwrap();
	(entry.handler)(&mut ops, &entry.argument, 1).unwrap();
	assert_eq!(*log.borrow(), vec!["normal", "any"]);
}

#[test]
fn unbind_of_absent_binding_is_an_error() {
	let mut map = ShortcutMap::default();
	assert!(matches!(
		map.unbind(NORMAL, Key::char('z')),
		Err(ShellError::InvalidArgument(_))
	));

	map.bind(NORMAL, Key::char('z'), noop(), Argument::default());
	map.unbind(NORMAL, Key::char('z')).unwrap();
	assert!(map.resolve(NORMAL, Key::char('z')).is_none());
}

#[test]
fn empty_sequence_is_rejected() {
	let mut map = ShortcutMap::default();
	assert!(matches!(
		map.bind_sequence(NORMAL, "", noop(), Argument::default()),
		Err(ShellError::InvalidArgument(_))
	));
}

#[test]
fn sequences_resolve_per_mode_with_any_fallback() {
	let mut map = ShortcutMap::default();
	map.bind_sequence(ModeId::ANY, "gg", noop(), Argument::default()).unwrap();
	assert!(map.resolve_sequence(OTHER, "gg").is_some());
	assert!(map.resolve_sequence(OTHER, "g").is_none());
	map.unbind_sequence(ModeId::ANY, "gg").unwrap();
	assert!(map.resolve_sequence(OTHER, "gg").is_none());
}

#[test]
fn mouse_bindings_key_on_phase() {
	let mut map = MouseMap::default();
	map.bind(
		NORMAL,
		MouseButton::Left,
		Modifiers::NONE,
		EventPhase::Press,
		Rc::new(|_, _, _, _| Ok(())),
		Argument::default(),
	);
	assert!(map.resolve(NORMAL, MouseButton::Left, Modifiers::NONE, EventPhase::Press).is_some());
	assert!(map.resolve(NORMAL, MouseButton::Left, Modifiers::NONE, EventPhase::Release).is_none());
	assert!(map.resolve(NORMAL, MouseButton::Left, Modifiers::CTRL, EventPhase::Press).is_none());
}

#[test]
fn inputbar_map_is_mode_independent() {
	let mut map = InputbarMap::default();
	map.bind(Key::ctrl('u'), noop(), Argument::default());
	assert!(map.resolve(Key::ctrl('u')).is_some());
	map.unbind(Key::ctrl('u')).unwrap();
	assert!(matches!(map.unbind(Key::ctrl('u')), Err(ShellError::InvalidArgument(_))));
}
