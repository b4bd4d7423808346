//! This module defines transition rules and the `TransitionTable` that maps a
//! `(state, symbol)` pair to every rule applicable to it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Move, State, Symbol};

/// A single transition: in `state` reading `read`, write `write`, move `direction` and
/// continue in `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub state: State,
    pub read: Symbol,
    pub next_state: State,
    pub write: Symbol,
    pub direction: Move,
}

impl Rule {
    pub fn new(
        state: impl Into<State>,
        read: Symbol,
        next_state: impl Into<State>,
        write: Symbol,
        direction: Move,
    ) -> Self {
        Self {
            state: state.into(),
            read,
            next_state: next_state.into(),
            write,
            direction,
        }
    }

    /// The abbreviated form: write back the symbol that was read and move right.
    pub fn pass(state: impl Into<State>, read: Symbol, next_state: impl Into<State>) -> Self {
        Self::new(state, read, next_state, read, Move::Right)
    }
}

/// The transition relation of a machine.
///
/// Rules are kept in declaration order. A lookup returns the applicable rules in that order,
/// which is the order the explorer expands them in. More than one rule for a key is what makes
/// the machine nondeterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Rule>", into = "Vec<Rule>")]
pub struct TransitionTable {
    rules: Vec<Rule>,
    index: HashMap<State, HashMap<Symbol, Vec<usize>>>,
}

impl TransitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule. Duplicate rules are kept; each is a separate branch.
    pub fn insert(&mut self, rule: Rule) {
        self.index
            .entry(rule.state.clone())
            .or_default()
            .entry(rule.read)
            .or_default()
            .push(self.rules.len());
        self.rules.push(rule);
    }

    /// Returns the rules applicable in `state` reading `symbol`, in declaration order.
    /// An empty result means no move is defined.
    pub fn lookup(&self, state: &str, symbol: Symbol) -> Vec<&Rule> {
        self.index
            .get(state)
            .and_then(|by_symbol| by_symbol.get(&symbol))
            .map(|indices| indices.iter().map(|&i| &self.rules[i]).collect())
            .unwrap_or_default()
    }

    /// Returns true when at least one rule applies to `(state, symbol)`.
    pub fn contains(&self, state: &str, symbol: Symbol) -> bool {
        !self.lookup(state, symbol).is_empty()
    }

    /// All rules in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<Rule>> for TransitionTable {
    fn from(rules: Vec<Rule>) -> Self {
        rules.into_iter().collect()
    }
}

impl From<TransitionTable> for Vec<Rule> {
    fn from(table: TransitionTable) -> Self {
        table.rules
    }
}

impl FromIterator<Rule> for TransitionTable {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut table = Self::new();
        for rule in iter {
            table.insert(rule);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branching_table() -> TransitionTable {
        TransitionTable::from(vec![
            Rule::new("q0", 'a', "loop", 'a', Move::Right),
            Rule::new("q0", 'b', "q1", 'x', Move::Left),
            Rule::new("q0", 'a', "accept", 'y', Move::Left),
        ])
    }

    #[test]
    fn test_lookup_returns_declaration_order() {
        let table = branching_table();
        let rules = table.lookup("q0", 'a');

        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].next_state, "loop");
        assert_eq!(rules[1].next_state, "accept");
    }

    #[test]
    fn test_lookup_missing_key_is_empty() {
        let table = branching_table();

        assert!(table.lookup("q0", 'c').is_empty());
        assert!(table.lookup("q9", 'a').is_empty());
        assert!(!table.contains("q1", 'a'));
        assert!(table.contains("q0", 'b'));
    }

    #[test]
    fn test_pass_rule() {
        let rule = Rule::pass("q0", 'a', "q1");

        assert_eq!(rule.write, 'a');
        assert_eq!(rule.direction, Move::Right);
        assert_eq!(rule.next_state, "q1");
    }

    #[test]
    fn test_serializes_as_rule_list() {
        let table = branching_table();
        let json = serde_json::to_value(&table).unwrap();

        assert!(json.is_array());
        assert_eq!(json.as_array().unwrap().len(), 3);
        assert_eq!(json[2]["next_state"], "accept");

        let decoded: TransitionTable = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, table);
        assert_eq!(decoded.lookup("q0", 'a')[1].next_state, "accept");
    }
}
