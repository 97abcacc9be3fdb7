/// Command registry — maps command names to their registrations.
///
/// Filled at startup, read-only while serving requests.
use std::collections::HashMap;

use tracing::{info, warn};

use crate::types::{CommandSpec, Registration};

#[derive(Debug, Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Registration>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a command. A later registration for the same name replaces
    /// the earlier one.
    pub fn register(&mut self, command: impl Into<String>, spec: CommandSpec) {
        let command = command.into();
        let registration = spec.into_registration();
        info!(
            command = %command,
            methods = ?registration.methods,
            secured = registration.required_token().is_some(),
            "[Commands] Registered command"
        );
        if self.commands.insert(command.clone(), registration).is_some() {
            warn!(command = %command, "[Commands] Command registered twice; keeping the latest");
        }
    }

    pub fn lookup(&self, command: &str) -> Option<&Registration> {
        self.commands.get(command)
    }

    /// Registered command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
