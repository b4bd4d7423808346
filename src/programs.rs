//! A catalogue of built-in sample machines, useful for trying the explorer out and as test
//! fixtures.

use crate::machine::{Machine, MachineBuilder};
use crate::table::Rule;
use crate::types::{Mode, Move, NtmError, BLANK};
use tracing::warn;

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Machine> = builtin_programs();
}

/// Builds every sample machine, skipping (and logging) any that fail analysis.
fn builtin_programs() -> Vec<Machine> {
    [single_step(), contains_aba(), even_length(), equal_as_then_bs()]
        .into_iter()
        .filter_map(|program| match program {
            Ok(machine) => Some(machine),
            Err(e) => {
                warn!(error = %e, "failed to build sample machine");
                None
            }
        })
        .collect()
}

/// Accepts exactly the strings starting with `a`, in one step.
fn single_step() -> Result<Machine, NtmError> {
    MachineBuilder::new("Single step", "q0")
        .states(["qf"])
        .input_alphabet("ab")
        .accept(["qf"])
        .rule(Rule::new("q0", 'a', "qf", 'a', Move::Right))
        .build()
}

/// Guesses where an `aba` substring starts. Wrong guesses die out as dead ends.
fn contains_aba() -> Result<Machine, NtmError> {
    MachineBuilder::new("Contains aba", "scan")
        .states(["a", "ab", "found"])
        .input_alphabet("ab")
        .accept(["found"])
        .rules([
            Rule::pass("scan", 'a', "scan"),
            Rule::pass("scan", 'b', "scan"),
            Rule::pass("scan", 'a', "a"),
            Rule::pass("a", 'b', "ab"),
            Rule::pass("ab", 'a', "found"),
        ])
        .build()
}

/// Deterministic parity check with an explicit reject state.
fn even_length() -> Result<Machine, NtmError> {
    MachineBuilder::new("Even length", "even")
        .states(["odd", "accept", "reject"])
        .input_alphabet("ab")
        .accept(["accept"])
        .reject(["reject"])
        .rules([
            Rule::pass("even", 'a', "odd"),
            Rule::pass("even", 'b', "odd"),
            Rule::pass("odd", 'a', "even"),
            Rule::pass("odd", 'b', "even"),
            Rule::pass("even", BLANK, "accept"),
            Rule::pass("odd", BLANK, "reject"),
        ])
        .build()
}

/// Recognizes aⁿbⁿ by crossing off matching pairs. Missing rules reject.
fn equal_as_then_bs() -> Result<Machine, NtmError> {
    MachineBuilder::new("Equal as then bs", "q0")
        .states(["q1", "q2", "q3", "accept"])
        .input_alphabet("ab")
        .tape_alphabet("XY")
        .accept(["accept"])
        .mode(Mode::Reject)
        .rules([
            Rule::new("q0", 'a', "q1", 'X', Move::Right),
            Rule::new("q0", 'Y', "q3", 'Y', Move::Right),
            Rule::new("q0", BLANK, "accept", BLANK, Move::Right),
            Rule::new("q1", 'a', "q1", 'a', Move::Right),
            Rule::new("q1", 'Y', "q1", 'Y', Move::Right),
            Rule::new("q1", 'b', "q2", 'Y', Move::Left),
            Rule::new("q2", 'a', "q2", 'a', Move::Left),
            Rule::new("q2", 'Y', "q2", 'Y', Move::Left),
            Rule::new("q2", 'X', "q0", 'X', Move::Right),
            Rule::new("q3", 'Y', "q3", 'Y', Move::Right),
            Rule::new("q3", BLANK, "accept", BLANK, Move::Right),
        ])
        .build()
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Machine, NtmError> {
        PROGRAMS
            .get(index)
            .cloned()
            .ok_or_else(|| NtmError::ProgramNotFound(format!("index {}", index)))
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Machine, NtmError> {
        PROGRAMS
            .iter()
            .find(|machine| machine.name == name)
            .cloned()
            .ok_or_else(|| NtmError::ProgramNotFound(name.to_string()))
    }

    /// List all program names
    pub fn list_program_names() -> Vec<String> {
        PROGRAMS.iter().map(|machine| machine.name.clone()).collect()
    }

    /// Search for programs by name
    pub fn search_programs(query: &str) -> Vec<usize> {
        let query = query.to_lowercase();

        PROGRAMS
            .iter()
            .enumerate()
            .filter(|(_, machine)| machine.name.to_lowercase().contains(&query))
            .map(|(index, _)| index)
            .collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, NtmError> {
        let machine = Self::get_program_by_index(index)?;
        let nondeterministic = machine.transitions.rules().iter().any(|rule| {
            machine.transitions.lookup(&rule.state, rule.read).len() > 1
        });

        Ok(ProgramInfo {
            index,
            name: machine.name.clone(),
            start_state: machine.start_state.clone(),
            state_count: machine.states.len(),
            transition_count: machine.transitions.len(),
            nondeterministic,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: String,
    pub start_state: String,
    pub state_count: usize,
    pub transition_count: usize,
    /// Whether some `(state, symbol)` pair has more than one rule.
    pub nondeterministic: bool,
}
