//! This module defines the `Tape`, an unbounded-in-both-directions sequence of symbols with a
//! single head. The tape is a zipper: the cells left of the head, the head cell, and the cells
//! right of the head. Both sides are stored with the cell adjacent to the head at the end of the
//! vector, so moving the head is a `pop` on one side and a `push` on the other.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{Move, Symbol, BLANK};

/// A tape snapshot. Operations return a new tape and never mutate the receiver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tape {
    /// Cells left of the head, far end first.
    left: Vec<Symbol>,
    /// The cell under the head.
    head: Symbol,
    /// Cells right of the head, far end first.
    right: Vec<Symbol>,
    /// Head offset from the cell that held the first input symbol.
    position: i64,
}

impl Tape {
    /// Creates a tape holding `input` with the head on its first symbol.
    /// An empty input leaves the head on a blank cell.
    pub fn new(input: &[Symbol]) -> Self {
        let (head, rest) = match input.split_first() {
            Some((&head, rest)) => (head, rest),
            None => (BLANK, &[][..]),
        };

        Self {
            left: Vec::new(),
            head,
            right: rest.iter().rev().copied().collect(),
            position: 0,
        }
    }

    /// Returns the symbol under the head.
    pub fn read(&self) -> Symbol {
        self.head
    }

    /// Returns a copy of this tape with the head cell set to `symbol`.
    pub fn write(&self, symbol: Symbol) -> Self {
        let mut tape = self.clone();
        tape.head = symbol;
        tape
    }

    /// Returns a copy of this tape with the head moved one cell in `direction`.
    /// Moving past either end of the window materializes a blank cell.
    pub fn shift(&self, direction: Move) -> Self {
        let mut tape = self.clone();
        tape.shift_in_place(direction);
        tape
    }

    /// Writes `symbol` then moves in `direction`, cloning the receiver once.
    pub fn apply(&self, symbol: Symbol, direction: Move) -> Self {
        let mut tape = self.clone();
        tape.head = symbol;
        tape.shift_in_place(direction);
        tape
    }

    fn shift_in_place(&mut self, direction: Move) {
        match direction {
            Move::Left => {
                self.right.push(self.head);
                self.head = self.left.pop().unwrap_or(BLANK);
                self.position -= 1;
            }
            Move::Right => {
                self.left.push(self.head);
                self.head = self.right.pop().unwrap_or(BLANK);
                self.position += 1;
            }
        }
    }

    /// Head offset from the cell that held the first input symbol. Negative when the head is
    /// left of the input.
    pub fn position(&self) -> i64 {
        self.position
    }

    /// Returns the materialized window, left to right, blanks included.
    pub fn render(&self) -> Vec<Symbol> {
        let mut cells = Vec::with_capacity(self.left.len() + 1 + self.right.len());
        cells.extend_from_slice(&self.left);
        cells.push(self.head);
        cells.extend(self.right.iter().rev());
        cells
    }

    /// Index of the head within [`Tape::render`].
    pub fn head_index(&self) -> usize {
        self.left.len()
    }

    /// Returns the rendered window with blanks stripped from both ends.
    pub fn trimmed(&self) -> Vec<Symbol> {
        let cells = self.render();
        let start = cells.iter().position(|&c| c != BLANK);
        let end = cells.iter().rposition(|&c| c != BLANK);

        match (start, end) {
            (Some(start), Some(end)) => cells[start..=end].to_vec(),
            _ => Vec::new(),
        }
    }

    /// Returns an equivalent tape with the blank cells at the far ends of the window dropped.
    pub fn compact(&self) -> Self {
        Self {
            left: far_trimmed(&self.left).to_vec(),
            head: self.head,
            right: far_trimmed(&self.right).to_vec(),
            position: self.position,
        }
    }
}

/// Drops the blanks at the far end (the front) of one side of the zipper.
fn far_trimmed(cells: &[Symbol]) -> &[Symbol] {
    let start = cells.iter().position(|&c| c != BLANK).unwrap_or(cells.len());
    &cells[start..]
}

/// Two tapes are equal when they hold the same symbols at the same absolute cells and their
/// heads are on the same cell. How much blank window each has materialized is irrelevant.
impl PartialEq for Tape {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.head == other.head
            && far_trimmed(&self.left) == far_trimmed(&other.left)
            && far_trimmed(&self.right) == far_trimmed(&other.right)
    }
}

impl Eq for Tape {}

impl From<&str> for Tape {
    fn from(input: &str) -> Self {
        Self::new(&input.chars().collect::<Vec<_>>())
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.left {
            write!(f, "{c}")?;
        }
        write!(f, "[{}]", self.head)?;
        for c in self.right.iter().rev() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_tape() {
        let tape = Tape::from("abc");

        assert_eq!(tape.read(), 'a');
        assert_eq!(tape.position(), 0);
        assert_eq!(tape.render(), vec!['a', 'b', 'c']);
        assert_eq!(tape.head_index(), 0);
    }

    #[test]
    fn test_empty_input_reads_blank() {
        let tape = Tape::from("");

        assert_eq!(tape.read(), BLANK);
        assert_eq!(tape.render(), vec![BLANK]);
    }

    #[test]
    fn test_write_does_not_mutate_receiver() {
        let tape = Tape::from("ab");
        let written = tape.write('x');

        assert_eq!(tape.read(), 'a');
        assert_eq!(written.read(), 'x');
        assert_eq!(written.render(), vec!['x', 'b']);
    }

    #[test]
    fn test_shift_right_walks_input_then_extends() {
        let tape = Tape::from("ab").shift(Move::Right);
        assert_eq!(tape.read(), 'b');
        assert_eq!(tape.position(), 1);

        let tape = tape.shift(Move::Right);
        assert_eq!(tape.read(), BLANK);
        assert_eq!(tape.position(), 2);
        assert_eq!(tape.render(), vec!['a', 'b', BLANK]);
        assert_eq!(tape.head_index(), 2);
    }

    #[test]
    fn test_shift_left_extends_with_blank() {
        let tape = Tape::from("ab").shift(Move::Left);

        assert_eq!(tape.read(), BLANK);
        assert_eq!(tape.position(), -1);
        assert_eq!(tape.render(), vec![BLANK, 'a', 'b']);
        assert_eq!(tape.head_index(), 0);
    }

    #[test]
    fn test_apply_writes_then_moves() {
        let tape = Tape::from("ab").apply('x', Move::Right);

        assert_eq!(tape.read(), 'b');
        assert_eq!(tape.render(), vec!['x', 'b']);
        assert_eq!(tape, Tape::from("ab").write('x').shift(Move::Right));
    }

    #[test]
    fn test_left_then_right_restores_tape() {
        let tape = Tape::from("ab");
        let back = tape.shift(Move::Left).shift(Move::Right);

        assert_eq!(back.read(), tape.read());
        assert_eq!(back, tape);
        // The blank cell materialized on the left is still there.
        assert_eq!(back.render(), vec![BLANK, 'a', 'b']);
    }

    #[test]
    fn test_equality_respects_position() {
        let a = Tape::from("_a").shift(Move::Right);
        let b = Tape::from("a");

        assert_eq!(a.read(), b.read());
        assert_ne!(a, b);
    }

    #[test]
    fn test_trimmed_and_compact() {
        let tape = Tape::from("ab").shift(Move::Left).shift(Move::Right).shift(Move::Right);

        assert_eq!(tape.trimmed(), vec!['a', 'b']);

        let compact = tape.compact();
        assert_eq!(compact.render(), vec!['a', 'b']);
        assert_eq!(compact, tape);
    }

    #[test]
    fn test_trimmed_all_blank() {
        let tape = Tape::from("").shift(Move::Right);
        assert!(tape.trimmed().is_empty());
    }

    #[test]
    fn test_display_marks_head() {
        let tape = Tape::from("abc").shift(Move::Right);
        assert_eq!(tape.to_string(), "a[b]c");
    }
}
