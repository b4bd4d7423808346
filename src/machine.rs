//! This module defines the `Machine` description consumed by the explorer, and the
//! `MachineBuilder` used to assemble one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::analyzer::analyze;
use crate::explorer::{Explorer, Run};
use crate::table::{Rule, TransitionTable};
use crate::types::{Mode, NtmError, State, Symbol, BLANK};

/// A nondeterministic Turing machine description.
///
/// Descriptions built through [`MachineBuilder`] have been analyzed; descriptions deserialized
/// from elsewhere should go through [`Machine::validate`] before they are explored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    /// The name of the machine.
    pub name: String,
    /// Policy for configurations with no applicable rule.
    #[serde(default)]
    pub mode: Mode,
    pub states: BTreeSet<State>,
    pub input_alphabet: BTreeSet<Symbol>,
    /// Always contains [`BLANK`].
    pub tape_alphabet: BTreeSet<Symbol>,
    pub start_state: State,
    pub accept_states: BTreeSet<State>,
    /// May be empty, in which case stuck branches are simply dead ends.
    #[serde(default)]
    pub reject_states: BTreeSet<State>,
    pub transitions: TransitionTable,
}

impl Machine {
    /// Runs the structural checks of [`analyze`] on this description.
    pub fn validate(&self) -> Result<(), NtmError> {
        analyze(self)
    }

    pub fn is_accepting(&self, state: &str) -> bool {
        self.accept_states.contains(state)
    }

    pub fn is_rejecting(&self, state: &str) -> bool {
        self.reject_states.contains(state)
    }

    /// Explores every computation of this machine on `input`, applying at most `budget`
    /// transitions.
    pub fn simulate(&self, input: &str, budget: usize) -> Result<Run, NtmError> {
        Ok(Explorer::new(self, input, budget)?.run())
    }
}

/// Assembles a [`Machine`] and analyzes it on [`MachineBuilder::build`].
///
/// The blank symbol is added to the tape alphabet, and every input symbol is added to the tape
/// alphabet, so callers only list the extra tape symbols.
#[derive(Debug, Clone)]
pub struct MachineBuilder {
    machine: Machine,
}

impl MachineBuilder {
    pub fn new(name: impl Into<String>, start_state: impl Into<State>) -> Self {
        let start_state = start_state.into();

        Self {
            machine: Machine {
                name: name.into(),
                mode: Mode::default(),
                states: BTreeSet::from([start_state.clone()]),
                input_alphabet: BTreeSet::new(),
                tape_alphabet: BTreeSet::from([BLANK]),
                start_state,
                accept_states: BTreeSet::new(),
                reject_states: BTreeSet::new(),
                transitions: TransitionTable::new(),
            },
        }
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.machine.mode = mode;
        self
    }

    pub fn states<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.machine
            .states
            .extend(states.into_iter().map(Into::into));
        self
    }

    pub fn input_alphabet(mut self, symbols: &str) -> Self {
        for symbol in symbols.chars() {
            self.machine.input_alphabet.insert(symbol);
            self.machine.tape_alphabet.insert(symbol);
        }
        self
    }

    pub fn tape_alphabet(mut self, symbols: &str) -> Self {
        self.machine.tape_alphabet.extend(symbols.chars());
        self
    }

    pub fn accept<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.machine
            .accept_states
            .extend(states.into_iter().map(Into::into));
        self
    }

    pub fn reject<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<State>,
    {
        self.machine
            .reject_states
            .extend(states.into_iter().map(Into::into));
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.machine.transitions.insert(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        for rule in rules {
            self.machine.transitions.insert(rule);
        }
        self
    }

    /// Analyzes the description and returns it.
    pub fn build(self) -> Result<Machine, NtmError> {
        analyze(&self.machine)?;
        Ok(self.machine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Move, Outcome};

    fn single_step_builder() -> MachineBuilder {
        MachineBuilder::new("Single step", "q0")
            .states(["qf"])
            .input_alphabet("ab")
            .accept(["qf"])
            .rule(Rule::new("q0", 'a', "qf", 'a', Move::Right))
    }

    #[test]
    fn test_builder_fills_alphabets() {
        let machine = single_step_builder().tape_alphabet("X").build().unwrap();

        assert_eq!(machine.name, "Single step");
        assert_eq!(machine.mode, Mode::Prune);
        assert!(machine.tape_alphabet.contains(&BLANK));
        assert!(machine.tape_alphabet.contains(&'a'));
        assert!(machine.tape_alphabet.contains(&'X'));
        assert!(!machine.input_alphabet.contains(&BLANK));
        assert!(machine.states.contains("q0"));
    }

    #[test]
    fn test_builder_rejects_undeclared_state() {
        let result = single_step_builder()
            .rule(Rule::new("q0", 'b', "nowhere", 'b', Move::Right))
            .build();

        assert!(matches!(result, Err(NtmError::ValidationError(_))));
    }

    #[test]
    fn test_halting_state_predicates() {
        let machine = single_step_builder()
            .states(["qr"])
            .reject(["qr"])
            .build()
            .unwrap();

        assert!(machine.is_accepting("qf"));
        assert!(!machine.is_accepting("q0"));
        assert!(machine.is_rejecting("qr"));
        assert!(!machine.is_rejecting("qf"));
    }

    #[test]
    fn test_simulate() {
        let machine = single_step_builder().build().unwrap();
        let run = machine.simulate("a", 10).unwrap();

        assert_eq!(run.outcome(), Outcome::Accepted);
    }

    #[test]
    fn test_json_round_trip_keeps_rule_order() {
        let machine = single_step_builder()
            .rule(Rule::new("q0", 'a', "q0", 'b', Move::Left))
            .build()
            .unwrap();

        let json = serde_json::to_string(&machine).unwrap();
        let decoded: Machine = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, machine);
        assert!(decoded.validate().is_ok());
        assert_eq!(decoded.transitions.lookup("q0", 'a')[1].next_state, "q0");
    }

    #[test]
    fn test_deserialize_defaults_mode_and_reject_states() {
        let json = r#"{
            "name": "Minimal",
            "states": ["q0", "qf"],
            "input_alphabet": ["a"],
            "tape_alphabet": ["a", "_"],
            "start_state": "q0",
            "accept_states": ["qf"],
            "transitions": [
                {"state": "q0", "read": "a", "next_state": "qf", "write": "a", "direction": "Right"}
            ]
        }"#;

        let machine: Machine = serde_json::from_str(json).unwrap();

        assert_eq!(machine.mode, Mode::Prune);
        assert!(machine.reject_states.is_empty());
        assert!(machine.validate().is_ok());
    }
}
