//! Built-in commands.
//!
//! Every command has the same shape: it receives the session, the chord
//! source for any further reads, and the repeat count. Recoverable
//! failures are returned as [`Error::UserInput`](crate::Error::UserInput).
//! Edits check first and change nothing when they fail; motions stop at
//! the buffer boundary and then report it.

mod control;
mod edit;
mod file;
mod help;
mod macros;
mod mark;
mod motion;
mod window;

pub use file::visit_file;

use crate::command::{CommandFn, Registry};
use crate::{Error, Result, Session};

pub const SELF_INSERT_COMMAND: &str = "self-insert-command";
pub const UNIVERSAL_ARGUMENT: &str = "universal-argument";

const BUILTIN: &[(&str, &str, CommandFn)] = &[
    // Motion
    ("forward-char", "Move point right N characters (left if N is negative).", motion::forward_char),
    ("backward-char", "Move point left N characters (right if N is negative).", motion::backward_char),
    ("next-line", "Move cursor vertically down N lines.", motion::next_line),
    ("previous-line", "Move cursor vertically up N lines.", motion::previous_line),
    ("beginning-of-line", "Move point to beginning of current line.", motion::beginning_of_line),
    ("end-of-line", "Move point to end of current line.", motion::end_of_line),
    ("beginning-of-buffer", "Move point to the beginning of the buffer.", motion::beginning_of_buffer),
    ("end-of-buffer", "Move point to the end of the buffer.", motion::end_of_buffer),
    // Editing
    (SELF_INSERT_COMMAND, "Insert the character you type.", edit::self_insert_command),
    ("newline", "Insert a newline at the current point position.", edit::newline),
    ("delete-char", "Delete the following N characters.", edit::delete_char),
    ("backward-delete-char", "Delete the previous N characters.", edit::backward_delete_char),
    ("delete-region", "Delete the text between point and mark.", edit::delete_region),
    (
        "quoted-insert",
        "Read next input character and insert it.\nYou may also type up to 3 octal digits, to insert a character with that code.",
        edit::quoted_insert,
    ),
    ("toggle-read-only", "Change whether this buffer is visiting its file read-only.", edit::toggle_read_only),
    ("overwrite-mode", "Toggle overwrite mode.", edit::overwrite_mode),
    ("auto-fill-mode", "Toggle Auto Fill mode.", edit::auto_fill_mode),
    // Mark
    ("set-mark-command", "Set the mark where point is.", mark::set_mark_command),
    ("exchange-point-and-mark", "Put the mark where point is now, and point where the mark is now.", mark::exchange_point_and_mark),
    ("mark-whole-buffer", "Put point at beginning and mark at end of buffer.", mark::mark_whole_buffer),
    // Control
    ("keyboard-quit", "Cancel current command.", control::keyboard_quit),
    (
        UNIVERSAL_ARGUMENT,
        "Begin a numeric argument for the following command.\nDigits or minus sign following C-u make up the numeric argument.\nC-u following the digits or minus sign ends the argument.\nC-u without digits or minus sign provides 4 as argument.",
        control::universal_argument,
    ),
    ("execute-extended-command", "Read a command name, then call it.", control::execute_extended_command),
    // Windows
    ("split-window", "Split current window into two windows, one above the other.", window::split_window),
    ("delete-window", "Remove the current window from the screen.", window::delete_window),
    ("delete-other-windows", "Make the selected window fill the screen.", window::delete_other_windows),
    ("other-window", "Select the N'th different window.", window::other_window),
    // Files
    ("find-file", "Edit a file, creating an empty buffer if it does not exist.", file::find_file),
    ("save-buffer", "Save current buffer in visited file if modified.", file::save_buffer),
    ("save-buffers-kill-emacs", "Offer to save each modified buffer, then exit.", file::save_buffers_kill_emacs),
    // Help and bindings
    ("global-set-key", "Bind a command to a key sequence.", help::global_set_key),
    ("where-is", "Print message listing key sequences that invoke a command.", help::where_is),
    ("describe-key", "Display the command invoked by a key sequence.", help::describe_key),
    ("describe-bindings", "Show a list of all defined keys, and their definitions.", help::describe_bindings),
    // Macros
    ("start-kbd-macro", "Record subsequent keyboard input, defining a keyboard macro.", macros::start_kbd_macro),
    ("end-kbd-macro", "Finish defining a keyboard macro.", macros::end_kbd_macro),
    ("call-last-kbd-macro", "Call the last keyboard macro that you defined.", macros::call_last_kbd_macro),
];

/// Register every built-in command.
pub(crate) fn register_builtin(registry: &mut Registry) {
    for &(name, doc, func) in BUILTIN {
        registry.register(name, doc, func);
    }
}

/// Refuse to edit a read-only buffer.
pub(crate) fn check_writable(session: &Session) -> Result<()> {
    if session.current_buffer().flags.read_only {
        return Err(Error::user("Buffer is read-only"));
    }
    Ok(())
}
