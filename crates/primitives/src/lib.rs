//! Vocabulary types shared across the interaction shell.
//!
//! Keys, modifiers, pointer events, and mode identifiers. The embedding
//! application constructs these from its own event source; the registry and
//! session crates consume them. Deliberately free of third-party
//! dependencies so event construction never pulls the rest of the shell in.

pub mod key;
pub mod mode;
pub mod mouse;

pub use key::{Key, KeyCode, Modifiers};
pub use mode::ModeId;
pub use mouse::{EventPhase, MouseButton, MouseEvent, ScrollDirection};
