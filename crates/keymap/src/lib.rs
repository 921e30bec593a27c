//! Key sequence dispatch trie for quill.
//!
//! Maps chord sequences to opaque command handles. A handle is any small
//! `Copy + PartialEq` value (the editor uses registry indices), which makes
//! reverse lookup a plain equality scan over the bound leaves.
//!
//! ```text
//! root ── C-x ──┬── C-f   (find-file)
//!               └── C-s   (save-buffer)
//!      ── C-g             (keyboard-quit)
//! ```

mod node;

pub use node::BindingNode;

use quill_keyboard::{sequence_to_string, Chord};

/// Result of looking up a complete sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<C> {
    /// The sequence reaches a leaf.
    Command(C),
    /// The sequence is a strict prefix of longer bindings.
    Prefix,
    /// Nothing is bound along the sequence.
    Missing,
}

/// How an interactive resolution ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<C> {
    /// A leaf was reached.
    Command { command: C, keys: Vec<Chord> },
    /// The chords read so far match nothing.
    Undefined(Vec<Chord>),
    /// The cancel chord was read before a leaf was reached.
    Cancelled(Vec<Chord>),
}

/// The binding tree.
#[derive(Debug, Clone)]
pub struct Keymap<C> {
    root: BindingNode<C>,
}

impl<C: Copy + PartialEq> Default for Keymap<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Copy + PartialEq> Keymap<C> {
    pub fn new() -> Self {
        Self {
            root: BindingNode::root(),
        }
    }

    /// Root node of the tree.
    pub fn root(&self) -> &BindingNode<C> {
        &self.root
    }

    /// Bind `command` to `keys`, creating prefix nodes as needed.
    ///
    /// Rebinding an existing sequence overwrites its command. Binding a
    /// sequence that passes through a former leaf turns that leaf into a
    /// prefix; binding a sequence that ends on a prefix turns it into a
    /// leaf. An empty sequence is ignored.
    pub fn bind(&mut self, keys: &[Chord], command: C) {
        let Some((last, init)) = keys.split_last() else {
            return;
        };

        let mut node = &mut self.root;
        for chord in init {
            node = node.child_or_insert(*chord);
        }
        node.child_or_insert(*last).set_command(command);
    }

    /// Node reached by `keys`, if any.
    pub fn node(&self, keys: &[Chord]) -> Option<&BindingNode<C>> {
        keys.iter()
            .try_fold(&self.root, |node, chord| node.child(*chord))
    }

    /// Classify a complete sequence.
    pub fn lookup(&self, keys: &[Chord]) -> Lookup<C> {
        match self.node(keys) {
            Some(node) if keys.is_empty() => {
                if node.is_prefix() {
                    Lookup::Prefix
                } else {
                    Lookup::Missing
                }
            }
            Some(node) => match node.command() {
                Some(command) => Lookup::Command(command),
                None if node.is_prefix() => Lookup::Prefix,
                None => Lookup::Missing,
            },
            None => Lookup::Missing,
        }
    }

    /// Command bound to exactly `keys`.
    pub fn lookup_exact(&self, keys: &[Chord]) -> Option<C> {
        match self.lookup(keys) {
            Lookup::Command(command) => Some(command),
            _ => None,
        }
    }

    /// Resolve a sequence interactively, starting from `first`.
    ///
    /// While the chords read so far form a prefix, `read_more` is called
    /// with them and must block for the next chord. Reading
    /// [`Chord::CANCEL`] at that point aborts the resolution.
    pub fn resolve<E>(
        &self,
        first: Chord,
        mut read_more: impl FnMut(&[Chord]) -> Result<Chord, E>,
    ) -> Result<Resolution<C>, E> {
        let mut keys = vec![first];

        loop {
            match self.lookup(&keys) {
                Lookup::Command(command) => return Ok(Resolution::Command { command, keys }),
                Lookup::Missing => return Ok(Resolution::Undefined(keys)),
                Lookup::Prefix => {
                    let next = read_more(&keys)?;
                    if next == Chord::CANCEL {
                        return Ok(Resolution::Cancelled(keys));
                    }
                    keys.push(next);
                }
            }
        }
    }

    /// Every bound sequence with its command, in depth-first chord order.
    pub fn enumerate(&self) -> Vec<(Vec<Chord>, C)> {
        let mut bindings = Vec::new();
        self.root.walk(&mut Vec::new(), &mut |keys: &[Chord], command: C| {
            bindings.push((keys.to_vec(), command));
        });
        bindings
    }

    /// Sequences that invoke `command`.
    pub fn bindings_of(&self, command: C) -> Vec<Vec<Chord>> {
        let mut found = Vec::new();
        self.root.walk(&mut Vec::new(), &mut |keys: &[Chord], bound: C| {
            if bound == command {
                found.push(keys.to_vec());
            }
        });
        found
    }
}

/// Echo text shown while waiting for the next chord of a prefix.
pub fn prefix_prompt(keys: &[Chord]) -> String {
    format!("{}-", sequence_to_string(keys))
}
