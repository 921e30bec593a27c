//! Command registry.
//!
//! Commands are registered under a stable name and addressed by a
//! [`CommandId`], a small copyable handle stored in the keymap. Reverse
//! lookup ("which keys run X") compares handles.

use std::collections::HashMap;

use crate::{ChordSource, Result, Session};

/// Handle of a registered command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandId(usize);

/// Command body. The `i32` is the repeat count (numeric argument).
pub type CommandFn = fn(&mut Session, &mut dyn ChordSource, i32) -> Result<()>;

/// A registered command.
#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub doc: &'static str,
    pub func: CommandFn,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command").field("name", &self.name).finish()
    }
}

/// All commands known to a session.
#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Command>,
    by_name: HashMap<&'static str, CommandId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. Registering an existing name replaces its body
    /// and keeps its handle.
    pub fn register(&mut self, name: &'static str, doc: &'static str, func: CommandFn) -> CommandId {
        let command = Command { name, doc, func };
        if let Some(&id) = self.by_name.get(name) {
            self.commands[id.0] = command;
            return id;
        }

        let id = CommandId(self.commands.len());
        self.commands.push(command);
        self.by_name.insert(name, id);
        id
    }

    /// Resolve a command by name.
    pub fn lookup(&self, name: &str) -> Option<CommandId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: CommandId) -> &Command {
        &self.commands[id.0]
    }

    /// Display name of a command.
    pub fn name(&self, id: CommandId) -> &'static str {
        self.commands[id.0].name
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &mut Session, _: &mut dyn ChordSource, _: i32) -> Result<()> {
        Ok(())
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = Registry::new();
        let a = registry.register("alpha", "", noop);
        let b = registry.register("beta", "Second.", noop);

        assert_ne!(a, b);
        assert_eq!(registry.lookup("alpha"), Some(a));
        assert_eq!(registry.lookup("gamma"), None);
        assert_eq!(registry.name(b), "beta");
        assert_eq!(registry.get(b).doc, "Second.");
    }

    #[test]
    fn test_reregister_keeps_handle() {
        let mut registry = Registry::new();
        let first = registry.register("alpha", "old", noop);
        let second = registry.register("alpha", "new", noop);
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(first).doc, "new");
    }
}
