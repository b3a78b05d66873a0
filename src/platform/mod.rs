//! Platform abstraction layer
//!
//! Contracts for the windowing side of a game:
//! - Keyboard events and handler dispatch
//! - Frame timing
//!
//! Nothing here opens a window or reads a device; a frontend feeds raw events
//! in and the game reacts through these types.

pub mod input;
pub mod time;

pub use input::{Key, KeyDispatcher, KeyEvent, KeyEventKind, KeyHandler};
pub use time::FrameClock;
