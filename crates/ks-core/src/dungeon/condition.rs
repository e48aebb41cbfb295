//! Room preconditions
//!
//! A [`Condition`] is the set of symbols a player must hold to enter a room.
//! Holding more symbols never makes a room harder to reach, so conditions
//! form a partial order by set inclusion.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::symbol::{SwitchState, Symbol};

/// Immutable conjunction of symbols
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    symbols: BTreeSet<Symbol>,
}

impl Condition {
    /// The empty condition, satisfied unconditionally
    pub fn new() -> Self {
        Self::default()
    }

    /// A condition requiring a single symbol
    pub fn with(symbol: Symbol) -> Self {
        Self::new().and(symbol)
    }

    /// This condition plus `symbol`
    pub fn and(&self, symbol: Symbol) -> Self {
        let mut symbols = self.symbols.clone();
        symbols.insert(symbol);
        Self { symbols }
    }

    /// Conjunction of both conditions
    pub fn and_condition(&self, other: &Condition) -> Self {
        Self {
            symbols: self.symbols.union(&other.symbols).copied().collect(),
        }
    }

    /// True if anyone meeting `self` also meets `other`
    ///
    /// Holds iff every symbol of `other` is in `self`, so a room whose
    /// precondition implies another's is reachable no earlier than it.
    pub fn implies(&self, other: &Condition) -> bool {
        other.symbols.is_subset(&self.symbols)
    }

    /// The one symbol separating two conditions, if there is exactly one
    pub fn single_symbol_difference(&self, other: &Condition) -> Option<Symbol> {
        let mut difference = self.symbols.symmetric_difference(&other.symbols);
        let first = difference.next().copied();
        match difference.next() {
            None => first,
            Some(_) => None,
        }
    }

    /// Number of keys required
    pub fn key_level(&self) -> usize {
        self.symbols.iter().filter(|s| s.is_key()).count()
    }

    /// Switch position required, `Either` if none
    pub fn switch_state(&self) -> SwitchState {
        self.symbols
            .iter()
            .find(|s| s.is_switch_state())
            .map_or(SwitchState::Either, |s| s.switch_state())
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.symbols.iter().copied()
    }
}

impl FromIterator<Symbol> for Condition {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbols.is_empty() {
            return write!(f, "true");
        }
        for (i, symbol) in self.symbols.iter().enumerate() {
            if i > 0 {
                write!(f, "+")?;
            }
            write!(f, "{}", symbol)?;
        }
        Ok(())
    }
}
