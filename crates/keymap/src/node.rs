//! Binding tree nodes.

use quill_keyboard::Chord;

/// One node of the binding tree.
///
/// A node is either a leaf (command set, no children) or a prefix
/// (no command, at least one child). The root is the only node that may
/// be empty, and its chord is meaningless.
#[derive(Debug, Clone)]
pub struct BindingNode<C> {
    chord: Chord,
    command: Option<C>,
    /// Sorted ascending by chord, no duplicates
    children: Vec<BindingNode<C>>,
}

impl<C: Copy + PartialEq> BindingNode<C> {
    pub(crate) fn root() -> Self {
        Self::new(Chord::from_code(0))
    }

    fn new(chord: Chord) -> Self {
        Self {
            chord,
            command: None,
            children: Vec::new(),
        }
    }

    /// Chord that leads to this node from its parent.
    pub fn chord(&self) -> Chord {
        self.chord
    }

    /// Command bound here, if this is a leaf.
    pub fn command(&self) -> Option<C> {
        self.command
    }

    /// Children in ascending chord order.
    pub fn children(&self) -> &[BindingNode<C>] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.command.is_some()
    }

    pub fn is_prefix(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn child(&self, chord: Chord) -> Option<&BindingNode<C>> {
        self.children
            .binary_search_by_key(&chord, |node| node.chord)
            .ok()
            .map(|i| &self.children[i])
    }

    /// Find the child for `chord`, creating it at its sorted position.
    pub(crate) fn child_or_insert(&mut self, chord: Chord) -> &mut BindingNode<C> {
        let index = match self.children.binary_search_by_key(&chord, |node| node.chord) {
            Ok(i) => i,
            Err(i) => {
                // A prefix carries no command
                if self.children.is_empty() {
                    self.command = None;
                }
                self.children.insert(i, BindingNode::new(chord));
                i
            }
        };
        &mut self.children[index]
    }

    /// Turn this node into a leaf for `command`.
    pub(crate) fn set_command(&mut self, command: C) {
        self.children.clear();
        self.command = Some(command);
    }

    /// Depth-first walk over leaves, rebuilding each leaf's full sequence.
    pub(crate) fn walk(&self, path: &mut Vec<Chord>, visit: &mut dyn FnMut(&[Chord], C)) {
        for child in &self.children {
            path.push(child.chord);
            match child.command {
                Some(command) => visit(path, command),
                None => child.walk(path, visit),
            }
            path.pop();
        }
    }
}
