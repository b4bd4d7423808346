//! This module defines the `Explorer`, which runs a nondeterministic machine breadth-first:
//! every configuration of one generation is expanded before any configuration of the next.
//! The first accepting configuration found is therefore reached by a shortest path, with ties
//! broken by rule declaration order.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::configuration::{ConfigId, Configuration, Expansion, History};
use crate::machine::Machine;
use crate::path::reconstruct;
use crate::types::{Mode, NtmError, Outcome, Step, Symbol};

/// Counters accumulated while exploring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Index of the deepest generation whose configurations were examined.
    pub max_depth_reached: usize,
    /// Transition applications performed, never more than the budget.
    pub total_transitions_explored: usize,
    /// Configurations created, the root included.
    pub configurations: usize,
    /// Branches dropped because no rule applied.
    pub dead_ends: usize,
    /// Branches that reached a reject state, or were routed to rejection by [`Mode::Reject`].
    pub rejected: usize,
}

enum Visit {
    Continue,
    Halt(Outcome),
}

/// Breadth-first scheduler over the configurations of one machine and one input.
///
/// [`Explorer::step`] expands a single generation; [`Explorer::run`] steps until the
/// exploration halts and hands back the resulting [`Run`].
pub struct Explorer<'m> {
    machine: &'m Machine,
    input: String,
    budget: usize,
    history: History,
    frontier: Vec<ConfigId>,
    depth: usize,
    stats: Stats,
    witness: Option<ConfigId>,
    halted: Option<Outcome>,
}

impl<'m> Explorer<'m> {
    /// Creates an explorer whose generation 0 is the root configuration for `input`.
    ///
    /// # Arguments
    ///
    /// * `machine` - The machine description, assumed valid.
    /// * `input` - The input string; every symbol must be in the input alphabet.
    /// * `budget` - The maximum number of transitions to apply.
    ///
    /// # Returns
    ///
    /// * `Err(NtmError::InvalidInput)` if `input` holds a symbol outside the input alphabet.
    pub fn new(machine: &'m Machine, input: &str, budget: usize) -> Result<Self, NtmError> {
        let symbols = check_input(machine, input)?;

        let mut history = History::new();
        let root = history.push(Configuration::root(machine.start_state.clone(), &symbols));

        debug!(machine = %machine.name, input, budget, "starting exploration");

        Ok(Self {
            machine,
            input: input.to_string(),
            budget,
            history,
            frontier: vec![root],
            depth: 0,
            stats: Stats {
                configurations: 1,
                ..Stats::default()
            },
            witness: None,
            halted: None,
        })
    }

    /// Examines every configuration of the current generation in order.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if the next generation is non-empty and ready to be examined.
    /// * `Step::Halt(Outcome::Accepted)` as soon as an accepting configuration is examined.
    /// * `Step::Halt(Outcome::Rejected)` if the generation produced no successors.
    /// * `Step::Halt(Outcome::Inconclusive)` if a transition was needed and the budget was spent.
    pub fn step(&mut self) -> Step {
        if let Some(outcome) = self.halted {
            return Step::Halt(outcome);
        }

        if self.budget == 0 {
            return self.halt(Outcome::Inconclusive);
        }

        self.stats.max_depth_reached = self.depth;
        trace!(
            depth = self.depth,
            frontier = self.frontier.len(),
            transitions = self.stats.total_transitions_explored,
            "expanding generation"
        );

        let frontier = std::mem::take(&mut self.frontier);
        let mut next = Vec::new();

        for id in frontier {
            if let Visit::Halt(outcome) = self.visit(id, &mut next) {
                return self.halt(outcome);
            }
        }

        if next.is_empty() {
            return self.halt(Outcome::Rejected);
        }

        self.frontier = next;
        self.depth += 1;

        Step::Continue
    }

    /// Steps until the exploration halts.
    pub fn run(mut self) -> Run {
        let outcome = loop {
            if let Step::Halt(outcome) = self.step() {
                break outcome;
            }
        };

        Run {
            machine: self.machine.name.clone(),
            input: self.input,
            outcome,
            stats: self.stats,
            witness: self.witness,
            history: self.history,
        }
    }

    /// Examines one configuration, appending its successors to `next`.
    fn visit(&mut self, id: ConfigId, next: &mut Vec<ConfigId>) -> Visit {
        let machine = self.machine;
        let configuration = &self.history[id];

        let children: Vec<Configuration> = match configuration.expand(machine) {
            Expansion::Accepting => {
                self.witness = Some(id);
                return Visit::Halt(Outcome::Accepted);
            }
            Expansion::Rejecting => {
                self.stats.rejected += 1;
                return Visit::Continue;
            }
            Expansion::DeadEnd => {
                match machine.mode {
                    Mode::Prune => self.stats.dead_ends += 1,
                    Mode::Reject => {
                        if self.remaining() == 0 {
                            return Visit::Halt(Outcome::Inconclusive);
                        }
                        self.stats.total_transitions_explored += 1;
                        self.stats.rejected += 1;
                    }
                }
                return Visit::Continue;
            }
            Expansion::Branches(rules) => {
                let remaining = self.remaining();
                let children: Vec<Configuration> = rules
                    .iter()
                    .take(remaining)
                    .map(|rule| configuration.successor(id, rule))
                    .collect();

                if children.len() < rules.len() {
                    // Keep what was explored before running out.
                    self.record(children, next);
                    return Visit::Halt(Outcome::Inconclusive);
                }

                children
            }
        };

        self.record(children, next);
        Visit::Continue
    }

    fn record(&mut self, children: Vec<Configuration>, next: &mut Vec<ConfigId>) {
        self.stats.total_transitions_explored += children.len();
        self.stats.configurations += children.len();
        next.extend(children.into_iter().map(|child| self.history.push(child)));
    }

    fn remaining(&self) -> usize {
        self.budget
            .saturating_sub(self.stats.total_transitions_explored)
    }

    fn halt(&mut self, outcome: Outcome) -> Step {
        debug!(
            ?outcome,
            depth = self.stats.max_depth_reached,
            transitions = self.stats.total_transitions_explored,
            configurations = self.stats.configurations,
            "exploration halted"
        );

        self.halted = Some(outcome);
        Step::Halt(outcome)
    }

    /// Returns the outcome once the exploration has halted.
    pub fn outcome(&self) -> Option<Outcome> {
        self.halted
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    /// Index of the generation the next call to [`Explorer::step`] examines.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The configurations waiting in the current generation.
    pub fn frontier(&self) -> impl Iterator<Item = &Configuration> {
        self.frontier.iter().map(|&id| &self.history[id])
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn budget(&self) -> usize {
        self.budget
    }
}

/// Converts `input` to symbols, refusing any outside the input alphabet.
fn check_input(machine: &Machine, input: &str) -> Result<Vec<Symbol>, NtmError> {
    input
        .chars()
        .enumerate()
        .map(|(position, symbol)| {
            if machine.input_alphabet.contains(&symbol) {
                Ok(symbol)
            } else {
                Err(NtmError::InvalidInput { symbol, position })
            }
        })
        .collect()
}

/// The result of exploring one input: outcome, counters, and every configuration created.
#[derive(Debug, Clone)]
pub struct Run {
    machine: String,
    input: String,
    outcome: Outcome,
    stats: Stats,
    witness: Option<ConfigId>,
    history: History,
}

impl Run {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_accepted(&self) -> bool {
        self.outcome == Outcome::Accepted
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn max_depth_reached(&self) -> usize {
        self.stats.max_depth_reached
    }

    pub fn total_transitions_explored(&self) -> usize {
        self.stats.total_transitions_explored
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The accepting configuration, if the run was accepted.
    pub fn witness(&self) -> Option<&Configuration> {
        self.witness.map(|id| &self.history[id])
    }

    pub fn witness_id(&self) -> Option<ConfigId> {
        self.witness
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// The accepting computation, root first.
    ///
    /// # Returns
    ///
    /// * `Err(NtmError::NoWitness)` unless the run was accepted.
    pub fn path(&self) -> Result<Vec<&Configuration>, NtmError> {
        reconstruct(&self.history, self.witness)
    }

    /// A self-contained summary of the run for report writers.
    pub fn report(&self) -> Report {
        Report {
            machine: self.machine.clone(),
            input: self.input.clone(),
            outcome: self.outcome,
            stats: self.stats,
            path: self
                .path()
                .ok()
                .map(|path| path.into_iter().cloned().collect()),
        }
    }
}

/// A serializable summary of a [`Run`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub machine: String,
    pub input: String,
    pub outcome: Outcome,
    #[serde(flatten)]
    pub stats: Stats,
    /// The accepting path, present only when `outcome` is `Accepted`.
    pub path: Option<Vec<Configuration>>,
}
