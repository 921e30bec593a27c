//! Default key bindings.
//!
//! Printing characters are bound to `self-insert-command` separately; this
//! table holds everything else. Every literal must parse: a bad entry is a
//! startup error.

pub const DEFAULT_BINDINGS: &[(&str, &str)] = &[
    // Motion
    ("C-f", "forward-char"),
    ("<right>", "forward-char"),
    ("C-b", "backward-char"),
    ("<left>", "backward-char"),
    ("C-n", "next-line"),
    ("<down>", "next-line"),
    ("C-p", "previous-line"),
    ("<up>", "previous-line"),
    ("C-a", "beginning-of-line"),
    ("<home>", "beginning-of-line"),
    ("C-e", "end-of-line"),
    ("<end>", "end-of-line"),
    ("M-<", "beginning-of-buffer"),
    ("M->", "end-of-buffer"),
    // Editing
    ("RET", "newline"),
    ("TAB", "self-insert-command"),
    ("C-d", "delete-char"),
    ("<delete>", "delete-char"),
    ("DEL", "backward-delete-char"),
    ("<backspace>", "backward-delete-char"),
    ("C-w", "delete-region"),
    ("C-q", "quoted-insert"),
    ("<insert>", "overwrite-mode"),
    ("C-x C-q", "toggle-read-only"),
    // Mark
    ("C-@", "set-mark-command"),
    ("C-SPC", "set-mark-command"),
    ("C-x C-x", "exchange-point-and-mark"),
    ("C-x h", "mark-whole-buffer"),
    // Control
    ("C-g", "keyboard-quit"),
    ("C-u", "universal-argument"),
    ("M-x", "execute-extended-command"),
    // Windows
    ("C-x 2", "split-window"),
    ("C-x 0", "delete-window"),
    ("C-x 1", "delete-other-windows"),
    ("C-x o", "other-window"),
    // Files
    ("C-x C-f", "find-file"),
    ("C-x C-s", "save-buffer"),
    ("C-x C-c", "save-buffers-kill-emacs"),
    // Help
    ("C-h b", "describe-bindings"),
    ("C-h k", "describe-key"),
    ("C-h w", "where-is"),
    ("<f1> b", "describe-bindings"),
    ("<f1> k", "describe-key"),
    ("<f1> w", "where-is"),
    // Macros
    ("C-x (", "start-kbd-macro"),
    ("C-x )", "end-kbd-macro"),
    ("C-x e", "call-last-kbd-macro"),
];
