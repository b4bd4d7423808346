//! This module provides the structural checks a machine description must pass before it is
//! explored: declared start state, declared halting and rule states, disjoint accept and reject
//! sets, and consistent alphabets. It does not judge what the machine computes; unreachable
//! states are reported as warnings only.

use crate::machine::Machine;
use crate::types::{NtmError, Symbol, BLANK};
use std::collections::BTreeSet;
use tracing::warn;

/// Represents the problems that can be found while analyzing a machine description.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// The start state is not a member of the declared states.
    InvalidStartState(String),
    /// Halting states or rules reference states that were never declared.
    UndeclaredStates(Vec<String>),
    /// States that are both accepting and rejecting.
    OverlappingHaltStates(Vec<String>),
    /// Input symbols or rule symbols missing from the tape alphabet.
    UndeclaredSymbols(Vec<Symbol>),
    /// Problems with the alphabets themselves.
    StructuralError(String),
}

impl From<AnalysisError> for NtmError {
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::InvalidStartState(state) => {
                NtmError::ValidationError(format!("Invalid start state: {}", state))
            }
            AnalysisError::UndeclaredStates(states) => {
                NtmError::ValidationError(format!("Undeclared states: {:?}", states))
            }
            AnalysisError::OverlappingHaltStates(states) => NtmError::ValidationError(format!(
                "States are both accepting and rejecting: {:?}",
                states
            )),
            AnalysisError::UndeclaredSymbols(symbols) => NtmError::ValidationError(format!(
                "Symbols missing from the tape alphabet: {:?}",
                symbols
            )),
            AnalysisError::StructuralError(msg) => NtmError::ValidationError(msg),
        }
    }
}

/// Analyzes a machine description, returning the first problem found.
///
/// Unreachable states do not fail the analysis; they are logged at `warn` level.
pub fn analyze(machine: &Machine) -> Result<(), NtmError> {
    let first_error = [
        check_alphabets,
        check_start_state,
        check_declared_states,
        check_halting_states,
        check_rule_symbols,
    ]
    .iter()
    .find_map(|f| f(machine).err());

    if let Some(error) = first_error {
        return Err(error.into());
    }

    let unreachable = unreachable_states(machine);
    if !unreachable.is_empty() {
        warn!(machine = %machine.name, states = ?unreachable, "unreachable states");
    }

    Ok(())
}

/// Checks that the blank is a tape symbol but not an input symbol, and that every input
/// symbol is a tape symbol.
fn check_alphabets(machine: &Machine) -> Result<(), AnalysisError> {
    if !machine.tape_alphabet.contains(&BLANK) {
        return Err(AnalysisError::StructuralError(format!(
            "Tape alphabet does not contain the blank symbol '{}'",
            BLANK
        )));
    }

    if machine.input_alphabet.contains(&BLANK) {
        return Err(AnalysisError::StructuralError(format!(
            "Input alphabet contains the blank symbol '{}'",
            BLANK
        )));
    }

    let missing: Vec<Symbol> = machine
        .input_alphabet
        .difference(&machine.tape_alphabet)
        .copied()
        .collect();

    if !missing.is_empty() {
        return Err(AnalysisError::UndeclaredSymbols(missing));
    }

    Ok(())
}

fn check_start_state(machine: &Machine) -> Result<(), AnalysisError> {
    if !machine.states.contains(&machine.start_state) {
        return Err(AnalysisError::InvalidStartState(
            machine.start_state.clone(),
        ));
    }

    Ok(())
}

/// Checks that halting states and both ends of every rule are declared states.
fn check_declared_states(machine: &Machine) -> Result<(), AnalysisError> {
    let referenced = machine
        .accept_states
        .iter()
        .chain(&machine.reject_states)
        .chain(
            machine
                .transitions
                .rules()
                .iter()
                .flat_map(|rule| [&rule.state, &rule.next_state]),
        );

    // BTreeSet keeps the report sorted and free of duplicates.
    let undeclared: BTreeSet<String> = referenced
        .filter(|state| !machine.states.contains(*state))
        .cloned()
        .collect();

    if !undeclared.is_empty() {
        return Err(AnalysisError::UndeclaredStates(
            undeclared.into_iter().collect(),
        ));
    }

    Ok(())
}

fn check_halting_states(machine: &Machine) -> Result<(), AnalysisError> {
    let overlap: Vec<String> = machine
        .accept_states
        .intersection(&machine.reject_states)
        .cloned()
        .collect();

    if !overlap.is_empty() {
        return Err(AnalysisError::OverlappingHaltStates(overlap));
    }

    Ok(())
}

/// Checks that every symbol a rule reads or writes is a tape symbol.
fn check_rule_symbols(machine: &Machine) -> Result<(), AnalysisError> {
    let missing: BTreeSet<Symbol> = machine
        .transitions
        .rules()
        .iter()
        .flat_map(|rule| [rule.read, rule.write])
        .filter(|symbol| !machine.tape_alphabet.contains(symbol))
        .collect();

    if !missing.is_empty() {
        return Err(AnalysisError::UndeclaredSymbols(
            missing.into_iter().collect(),
        ));
    }

    Ok(())
}

/// Returns the declared states that no sequence of rules leads to from the start state,
/// in sorted order.
pub fn unreachable_states(machine: &Machine) -> Vec<String> {
    let mut visited = BTreeSet::new();
    let mut queue = vec![machine.start_state.as_str()];

    while let Some(state) = queue.pop() {
        if !visited.insert(state) {
            continue;
        }

        for rule in machine.transitions.rules() {
            if rule.state == state && !visited.contains(rule.next_state.as_str()) {
                queue.push(&rule.next_state);
            }
        }
    }

    machine
        .states
        .iter()
        .filter(|state| !visited.contains(state.as_str()))
        .cloned()
        .collect()
}
