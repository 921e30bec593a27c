//! Text storage for quill.
//!
//! [`EncodedText`] is a byte string paired with its end-of-line
//! convention; all line navigation is done in byte offsets against that
//! convention. [`Buffer`] adds a name, point, mark and mode flags.

mod buffer;
mod region;
mod text;

pub use buffer::{Buffer, BufferFlags, DEFAULT_TAB_WIDTH};
pub use region::Region;
pub use text::{EncodedText, Eol};
