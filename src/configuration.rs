//! This module defines machine configurations, the `History` arena that owns every
//! configuration created during a run, and successor generation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::machine::Machine;
use crate::table::Rule;
use crate::tape::Tape;
use crate::types::{NtmError, State, Symbol};

/// Index of a configuration in its run's [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigId(usize);

impl ConfigId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An instantaneous snapshot of the machine. Configurations are never modified after they are
/// created; each one owns its tape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub state: State,
    pub tape: Tape,
    /// Number of transitions between the root and this configuration.
    pub depth: usize,
    /// Back-link used only to reconstruct paths. `None` for the root.
    pub parent: Option<ConfigId>,
}

/// What a configuration contributes to the next generation.
#[derive(Debug, PartialEq, Eq)]
pub enum Expansion<'m> {
    /// The state is an accept state.
    Accepting,
    /// The state is an explicit reject state.
    Rejecting,
    /// No rule applies to the state and the symbol under the head.
    DeadEnd,
    /// The applicable rules, in declaration order.
    Branches(Vec<&'m Rule>),
}

impl Configuration {
    /// The configuration a run starts from: start state, head on the first input symbol.
    pub fn root(state: impl Into<State>, input: &[Symbol]) -> Self {
        Self {
            state: state.into(),
            tape: Tape::new(input),
            depth: 0,
            parent: None,
        }
    }

    /// The symbol under the head.
    pub fn symbol(&self) -> Symbol {
        self.tape.read()
    }

    /// Classifies this configuration against `machine`. Accept states take precedence over
    /// rules; a reject state never branches.
    pub fn expand<'m>(&self, machine: &'m Machine) -> Expansion<'m> {
        if machine.is_accepting(&self.state) {
            return Expansion::Accepting;
        }

        if machine.is_rejecting(&self.state) {
            return Expansion::Rejecting;
        }

        let rules = machine.transitions.lookup(&self.state, self.symbol());
        if rules.is_empty() {
            Expansion::DeadEnd
        } else {
            Expansion::Branches(rules)
        }
    }

    /// Applies `rule` to this configuration, whose id is `id`: write, shift, change state.
    pub fn successor(&self, id: ConfigId, rule: &Rule) -> Self {
        Self {
            state: rule.next_state.clone(),
            tape: self.tape.apply(rule.write, rule.direction),
            depth: self.depth + 1,
            parent: Some(id),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.state, self.tape)
    }
}

/// Arena owning every configuration created during a run. Ids are handed out in creation
/// order, which is generation order.
#[derive(Debug, Clone, Default)]
pub struct History {
    configurations: Vec<Configuration>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, configuration: Configuration) -> ConfigId {
        self.configurations.push(configuration);
        ConfigId(self.configurations.len() - 1)
    }

    pub fn get(&self, id: ConfigId) -> Result<&Configuration, NtmError> {
        self.configurations
            .get(id.0)
            .ok_or(NtmError::UnknownConfiguration(id))
    }

    pub fn len(&self) -> usize {
        self.configurations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configurations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigId, &Configuration)> {
        self.configurations
            .iter()
            .enumerate()
            .map(|(i, configuration)| (ConfigId(i), configuration))
    }
}

impl Index<ConfigId> for History {
    type Output = Configuration;

    /// Panics if `id` was not handed out by this history.
    fn index(&self, id: ConfigId) -> &Configuration {
        match self.get(id) {
            Ok(configuration) => configuration,
            Err(e) => panic!("{e}"),
        }
    }
}
