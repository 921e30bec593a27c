//! Editor core for quill.
//!
//! A [`Session`] owns buffers, windows, the keymap and the command
//! registry. The interaction loop is [`Session::step`]: read a chord,
//! resolve it through the keymap, run the bound command, then update the
//! numeric argument, macro recording and the focused window's viewport.
//!
//! Input arrives through a [`ChordSource`], so the same loop runs against
//! a terminal, a replayed keyboard macro or a scripted test queue.

mod bindings;
mod command;
mod commands;
mod display;
mod error;
mod input;
mod minibuf;
mod session;
mod window;

pub use bindings::DEFAULT_BINDINGS;
pub use command::{Command, CommandFn, CommandId, Registry};
pub use commands::visit_file;
pub use display::{char_width, make_char_printable, string_width};
pub use error::{Error, Result};
pub use input::ChordSource;
pub use session::{CommandFlags, Outcome, Session, StatusMessage, SCRATCH_BUFFER};
pub use window::{Layout, Window, MIN_WINDOW_HEIGHT};
