//! Editor session.
//!
//! The session owns everything one interaction cycle touches: buffers,
//! windows, the keymap, the command registry, the echo-area message, the
//! numeric argument and the macro recording. There is no global state;
//! every entry point takes `&mut Session`.

use std::collections::{BTreeMap, VecDeque};
use std::path::Path;

use quill_buffer::{Buffer, EncodedText};
use quill_config::EditorSettings;
use quill_keyboard::{parse_sequence, sequence_to_string, Chord};
use quill_keymap::{prefix_prompt, Keymap, Resolution};

use crate::bindings::DEFAULT_BINDINGS;
use crate::commands::{self, SELF_INSERT_COMMAND, UNIVERSAL_ARGUMENT};
use crate::{ChordSource, CommandId, Error, Layout, Registry, Result, Window};

/// Name of the scratch buffer created at startup.
pub const SCRATCH_BUFFER: &str = "*scratch*";

/// Flags a command leaves for the bookkeeping after it (and for the next
/// command, once rolled over into the "last" flags).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommandFlags {
    /// A keyboard macro is being recorded.
    pub defining_macro: bool,
    /// The command set the numeric argument for the next command.
    pub set_uniarg: bool,
    /// A numeric argument was started without digits.
    pub uniarg_empty: bool,
    /// The command was a vertical line motion (goal column is kept).
    pub line_motion: bool,
    /// The session should end.
    pub quit: bool,
    /// The command reported a recoverable error.
    pub failed: bool,
}

/// How a dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A command ran (it may have reported a recoverable error).
    Executed(CommandId),
    /// The chords read match no binding.
    Undefined(Vec<Chord>),
    /// The cancel chord aborted a multi-chord read.
    Cancelled,
}

/// Text for the echo area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub error: bool,
}

/// The editor session.
pub struct Session {
    pub(crate) buffers: Vec<Buffer>,
    pub(crate) layout: Layout,
    keymap: Keymap<CommandId>,
    registry: Registry,
    pub(crate) settings: EditorSettings,
    message: Option<StatusMessage>,
    pub(crate) this_flags: CommandFlags,
    pub(crate) last_flags: CommandFlags,
    /// Repeat count for the next command
    pub(crate) uniarg: i32,
    pub(crate) goal_column: usize,
    last_key: Option<Chord>,
    /// Chords pushed back for re-reading
    pending: VecDeque<Chord>,
    /// Chords read by the current dispatch
    command_keys: Vec<Chord>,
    pub(crate) macro_keys: Vec<Chord>,
    pub(crate) last_macro: Option<Vec<Chord>>,
    /// A macro is being replayed
    pub(crate) executing_macro: bool,
    universal_argument: CommandId,
}

impl Session {
    /// Session with the built-in commands and the default bindings, on a
    /// terminal of `width` x `height`.
    ///
    /// A malformed default binding is an [`Error::Config`].
    pub fn new(settings: EditorSettings, width: usize, height: usize) -> Result<Self> {
        let mut session = Self::bare(settings, width, height)?;
        let count = session.install_bindings(DEFAULT_BINDINGS)?;
        log::info!("installed {} default bindings", count);
        Ok(session)
    }

    /// Session with the built-in commands but no bindings.
    pub fn bare(settings: EditorSettings, width: usize, height: usize) -> Result<Self> {
        let mut registry = Registry::new();
        commands::register_builtin(&mut registry);
        let universal_argument = registry
            .lookup(UNIVERSAL_ARGUMENT)
            .ok_or_else(|| Error::Config(format!("missing command `{}'", UNIVERSAL_ARGUMENT)))?;

        let mut scratch = Buffer::new(SCRATCH_BUFFER);
        scratch.tab_width = settings.tab_width;

        Ok(Self {
            buffers: vec![scratch],
            layout: Layout::new(0, width, height)?,
            keymap: Keymap::new(),
            registry,
            settings,
            message: None,
            this_flags: CommandFlags::default(),
            last_flags: CommandFlags::default(),
            uniarg: 1,
            goal_column: 0,
            last_key: None,
            pending: VecDeque::new(),
            command_keys: Vec::new(),
            macro_keys: Vec::new(),
            last_macro: None,
            executing_macro: false,
            universal_argument,
        })
    }

    // ========================================================================
    // Bindings
    // ========================================================================

    /// Bind every printing character to self-insertion, then each
    /// `(literal, command name)` of `table`. Returns the number of bindings
    /// made.
    ///
    /// The whole table is checked first: a malformed literal or unknown
    /// name is an [`Error::Config`] and nothing is bound.
    pub fn install_bindings(&mut self, table: &[(&str, &str)]) -> Result<usize> {
        let self_insert = self.command_id(SELF_INSERT_COMMAND)?;
        let entries = table
            .iter()
            .map(|&(literal, name)| {
                let keys = parse_sequence(literal)
                    .map_err(|e| Error::Config(format!("{}: {}", literal, e)))?;
                Ok((keys, self.command_id(name)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut count = 0;
        for byte in 0x20..=0x7eu8 {
            self.keymap.bind(&[Chord::key(byte)], self_insert);
            count += 1;
        }
        for (keys, command) in entries {
            self.keymap.bind(&keys, command);
            count += 1;
        }
        Ok(count)
    }

    fn command_id(&self, name: &str) -> Result<CommandId> {
        self.registry
            .lookup(name)
            .ok_or_else(|| Error::Config(format!("no such command `{}'", name)))
    }

    /// Bind `command` to `keys`.
    pub fn bind(&mut self, keys: &[Chord], command: CommandId) {
        self.keymap.bind(keys, command);
    }

    /// Runtime rebind from text. Failures are [`Error::UserInput`] and leave
    /// the keymap unchanged.
    pub fn bind_literal(&mut self, literal: &str, name: &str) -> Result<()> {
        let keys = parse_sequence(literal)
            .map_err(|_| Error::user(format!("Key sequence {} is invalid", literal)))?;
        let command = self
            .registry
            .lookup(name)
            .ok_or_else(|| Error::user(format!("No such function `{}'", name)))?;

        self.keymap.bind(&keys, command);
        log::info!("bound {} to {}", sequence_to_string(&keys), name);
        Ok(())
    }

    /// Apply user bindings from configuration. Bad entries are logged and
    /// skipped; the first failure is left in the echo area. Returns the
    /// number applied.
    pub fn apply_user_bindings(&mut self, bindings: &BTreeMap<String, String>) -> usize {
        let mut applied = 0;
        let mut first_error = None;
        for (literal, name) in bindings {
            match self.bind_literal(literal, name) {
                Ok(()) => applied += 1,
                Err(e) => {
                    log::warn!("skipping user binding {} = {}: {}", literal, name, e);
                    first_error.get_or_insert(e.to_string());
                }
            }
        }
        if let Some(text) = first_error {
            self.set_error(text);
        }
        applied
    }

    pub fn keymap(&self) -> &Keymap<CommandId> {
        &self.keymap
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Command bound to exactly `keys`.
    pub fn lookup_exact(&self, keys: &[Chord]) -> Option<CommandId> {
        self.keymap.lookup_exact(keys)
    }

    /// Human-readable sequences that invoke `command`.
    pub fn bindings_of(&self, command: CommandId) -> Vec<String> {
        self.keymap
            .bindings_of(command)
            .iter()
            .map(|keys| sequence_to_string(keys))
            .collect()
    }

    /// Every binding as `(sequence, command name)`, in chord order.
    pub fn enumerate_bindings(&self) -> Vec<(String, &'static str)> {
        self.keymap
            .enumerate()
            .into_iter()
            .map(|(keys, command)| (sequence_to_string(&keys), self.registry.name(command)))
            .collect()
    }

    // ========================================================================
    // Buffers and windows
    // ========================================================================

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn buffer(&self, index: usize) -> &Buffer {
        &self.buffers[index]
    }

    /// Buffer shown in the focused window.
    pub fn current_buffer(&self) -> &Buffer {
        &self.buffers[self.layout.focused().buffer]
    }

    pub fn current_buffer_mut(&mut self) -> &mut Buffer {
        let index = self.layout.focused().buffer;
        &mut self.buffers[index]
    }

    /// Add a buffer, returning its index.
    pub fn add_buffer(&mut self, buffer: Buffer) -> usize {
        self.buffers.push(buffer);
        self.buffers.len() - 1
    }

    pub fn find_buffer(&self, name: &str) -> Option<usize> {
        self.buffers.iter().position(|b| b.name() == name)
    }

    pub fn find_buffer_by_path(&self, path: &Path) -> Option<usize> {
        self.buffers.iter().position(|b| b.path() == Some(path))
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn windows(&self) -> &[Window] {
        self.layout.windows()
    }

    pub fn focus(&self) -> usize {
        self.layout.focus()
    }

    /// Point of window `index`: the buffer's point for the focused window,
    /// the saved point for the others, kept inside the buffer when edits
    /// elsewhere have shrunk it.
    pub fn window_point(&self, index: usize) -> usize {
        let window = self.layout.window(index);
        let buffer = &self.buffers[window.buffer];
        if index == self.layout.focus() {
            buffer.point()
        } else {
            window.saved_point.min(buffer.size())
        }
    }

    /// Show buffer `index` in the focused window.
    pub fn switch_to_buffer(&mut self, index: usize) {
        let point = self.buffers[index].point();
        let line = self.buffers[index].text().line_number(point);
        let window = self.layout.focused_mut();
        window.buffer = index;
        window.saved_point = point;
        window.lastpointn = line;
        window.recenter(line);
    }

    /// Move focus to window `index`, carrying points across.
    pub fn set_focus(&mut self, index: usize) {
        let current = self.layout.focus();
        let point = self.current_buffer().point();
        self.layout.focused_mut().saved_point = point;
        if index != current {
            self.layout.set_focus(index);
            self.adopt_window_point();
        }
    }

    /// Load the focused window's saved point into its buffer.
    pub(crate) fn adopt_window_point(&mut self) {
        let window = self.layout.focused();
        let (buffer, point) = (window.buffer, window.saved_point);
        self.buffers[buffer].set_point(point);
    }

    /// Fit the layout to a new terminal size.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        let point = self.current_buffer().point();
        self.layout.focused_mut().saved_point = point;
        let focused = self.layout.focus();
        self.layout.resize(width, height)?;
        if self.layout.focus() != focused {
            self.adopt_window_point();
        }
        Ok(())
    }

    /// Update the focused window's viewport row from point's line.
    pub fn resync(&mut self) {
        let buffer = self.current_buffer();
        let line = buffer.text().line_number(buffer.point());
        self.layout.focused_mut().resync(line);
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    // ========================================================================
    // Echo area and flags
    // ========================================================================

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            error: false,
        });
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            error: true,
        });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn is_defining_macro(&self) -> bool {
        self.this_flags.defining_macro
    }

    pub fn should_quit(&self) -> bool {
        self.this_flags.quit || self.last_flags.quit
    }

    /// Repeat count the next command will receive.
    pub fn uniarg(&self) -> i32 {
        self.uniarg
    }

    pub fn last_key(&self) -> Option<Chord> {
        self.last_key
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Read one chord: pushed-back chords first, then `input`. Every chord
    /// read is recorded for the macro tap.
    pub fn read_key(&mut self, input: &mut dyn ChordSource, echo: &str) -> Result<Chord> {
        let chord = match self.pending.pop_front() {
            Some(chord) => chord,
            None => input.read_chord(echo)?,
        };
        self.command_keys.push(chord);
        self.last_key = Some(chord);
        Ok(chord)
    }

    /// Chords pushed back and not yet re-read.
    pub fn has_pending_keys(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Push `chord` back so the next read returns it. It is dropped from
    /// the current recording.
    pub fn unread_key(&mut self, chord: Chord) {
        self.pending.push_front(chord);
        self.command_keys.pop();
    }

    /// Echo prefix for a pending numeric argument, e.g. `"C-u 4 "`.
    pub(crate) fn echo_prefix(&self) -> String {
        let flags = self.last_flags;
        if !(flags.set_uniarg || flags.uniarg_empty) {
            return String::new();
        }

        let mut prefix = String::from("C-u ");
        if flags.set_uniarg {
            if self.uniarg < 0 {
                prefix.push_str("- ");
            }
            prefix.push_str(&format!("{} ", self.uniarg.unsigned_abs()));
        }
        prefix
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Resolve a key sequence starting with `first` and run its command.
    ///
    /// `M-<digit>` starts a numeric argument without consulting the keymap.
    /// While the chords read form a prefix, the prompt is echoed and one
    /// more chord is read. An undefined sequence reports
    /// "`<keys>` is undefined" and changes nothing.
    pub fn dispatch(&mut self, first: Chord, input: &mut dyn ChordSource) -> Result<Outcome> {
        let prefix = self.echo_prefix();
        let Some(first) = self.fold_escape(first, input, &prefix)? else {
            self.set_error("Quit");
            return Ok(Outcome::Cancelled);
        };
        self.last_key = Some(first);

        if first.is_meta() && first.digit().is_some() {
            let command = self.universal_argument;
            self.call_command(command, input, self.uniarg)?;
            return Ok(Outcome::Executed(command));
        }

        match self.resolve_keys(first, input, &prefix)? {
            Resolution::Command { command, .. } => {
                self.call_command(command, input, self.uniarg)?;
                Ok(Outcome::Executed(command))
            }
            Resolution::Undefined(keys) => {
                let sequence = sequence_to_string(&keys);
                log::debug!("undefined key sequence {}", sequence);
                self.set_error(format!("{} is undefined", sequence));
                Ok(Outcome::Undefined(keys))
            }
            Resolution::Cancelled(_) => {
                self.set_error("Quit");
                Ok(Outcome::Cancelled)
            }
        }
    }

    /// `ESC` followed by a chord reads as that chord with meta, for
    /// terminals that send meta keys that way. `None` when the chord after
    /// `ESC` is the cancel chord.
    fn fold_escape(
        &mut self,
        first: Chord,
        input: &mut dyn ChordSource,
        prefix: &str,
    ) -> Result<Option<Chord>> {
        if first != Chord::ESC {
            return Ok(Some(first));
        }
        let next = self.read_key(input, &format!("{}ESC-", prefix))?;
        Ok((next != Chord::CANCEL).then(|| next.with_meta()))
    }

    /// Read chords after `first` while they form a prefix, echoing
    /// `prefix` before the chords read so far.
    fn resolve_keys(
        &mut self,
        first: Chord,
        input: &mut dyn ChordSource,
        prefix: &str,
    ) -> Result<Resolution<CommandId>> {
        let keymap = std::mem::take(&mut self.keymap);
        let resolved = keymap.resolve(first, |keys| {
            let echo = format!("{}{}", prefix, prefix_prompt(keys));
            self.read_key(input, &echo)
        });
        self.keymap = keymap;
        resolved
    }

    /// Read a whole key sequence after `prompt` and resolve it without
    /// running anything.
    pub fn read_key_sequence(
        &mut self,
        input: &mut dyn ChordSource,
        prompt: &str,
    ) -> Result<Resolution<CommandId>> {
        let first = self.read_key(input, prompt)?;
        let Some(first) = self.fold_escape(first, input, prompt)? else {
            return Ok(Resolution::Cancelled(vec![Chord::ESC]));
        };
        if first.is_meta() && first.digit().is_some() {
            return Ok(Resolution::Command {
                command: self.universal_argument,
                keys: vec![first],
            });
        }
        self.resolve_keys(first, input, prompt)
    }

    /// Run a command with repeat count `n`. A recoverable error becomes
    /// the echo-area message.
    pub fn call_command(
        &mut self,
        command: CommandId,
        input: &mut dyn ChordSource,
        n: i32,
    ) -> Result<()> {
        let func = self.registry.get(command).func;
        match func(self, input, n) {
            Err(Error::UserInput(text)) => {
                self.set_error(text);
                self.this_flags.failed = true;
                Ok(())
            }
            other => other,
        }
    }

    /// Run a command by name.
    pub fn execute(&mut self, name: &str, input: &mut dyn ChordSource, n: i32) -> Result<()> {
        let command = self
            .registry
            .lookup(name)
            .ok_or_else(|| Error::user(format!("No such function `{}'", name)))?;
        self.call_command(command, input, n)
    }

    /// One interaction cycle, without redisplay.
    ///
    /// Reads a chord, dispatches it, records it for the macro being
    /// defined, and rolls the command flags over.
    pub fn step(&mut self, input: &mut dyn ChordSource) -> Result<Outcome> {
        self.this_flags = CommandFlags {
            defining_macro: self.last_flags.defining_macro,
            ..CommandFlags::default()
        };
        self.command_keys.clear();

        let first = self.read_key(input, "")?;
        self.clear_message();
        let outcome = self.dispatch(first, input)?;

        // Recording must already be on before the command ran, so the
        // chords of start-kbd-macro itself are left out. Refused commands
        // are not recorded either.
        if self.last_flags.defining_macro
            && self.this_flags.defining_macro
            && !self.this_flags.failed
        {
            self.macro_keys.append(&mut self.command_keys);
        }
        if !self.this_flags.set_uniarg {
            self.uniarg = 1;
        }
        self.last_flags = self.this_flags;
        self.resync();

        Ok(outcome)
    }

    /// Fill the temporary buffer `name` with text produced by `fill` and
    /// show it in another window. Focus stays where it is.
    pub fn write_temp_buffer(&mut self, name: &str, fill: impl FnOnce(&mut String)) {
        let mut text = String::new();
        fill(&mut text);

        let index = match self.find_buffer(name) {
            Some(index) => index,
            None => self.add_buffer(Buffer::new(name)),
        };
        let buffer = &mut self.buffers[index];
        buffer.set_text(EncodedText::new(text.into_bytes()));
        buffer.tab_width = self.settings.tab_width;
        buffer.flags.temporary = true;
        buffer.flags.read_only = true;
        buffer.flags.modified = false;

        let home = self.layout.focus();
        if self.layout.len() == 1 {
            let line = self.current_buffer().text().line_number(self.current_buffer().point());
            if self.layout.split(line).is_ok() {
                let point = self.current_buffer().point();
                self.layout.window_mut(home + 1).saved_point = point;
            }
        }

        let target = if self.layout.len() > 1 {
            self.layout.cycle(home, 1)
        } else {
            home
        };
        if target == home {
            self.switch_to_buffer(index);
        } else {
            let window = self.layout.window_mut(target);
            window.buffer = index;
            window.saved_point = 0;
            window.topdelta = 0;
            window.lastpointn = 0;
        }
    }
}
