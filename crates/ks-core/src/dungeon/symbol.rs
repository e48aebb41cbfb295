//! Symbols: keys, switch states and room markers
//!
//! A symbol is either something a player can hold (a key, a switch position)
//! or a marker item placed in a room (start, goal, boss, the switch itself).

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Position of the dungeon's switch
///
/// `Either` only appears while a state is being chosen; it never ends up on
/// an edge or in a precondition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum SwitchState {
    On,
    Off,
    #[default]
    Either,
}

impl SwitchState {
    /// The opposite position (`Either` stays `Either`)
    pub fn invert(self) -> Self {
        match self {
            SwitchState::On => SwitchState::Off,
            SwitchState::Off => SwitchState::On,
            SwitchState::Either => SwitchState::Either,
        }
    }

    /// The lock symbol for this state, if it is a concrete position
    pub fn to_symbol(self) -> Option<Symbol> {
        match self {
            SwitchState::On => Some(Symbol::SwitchOn),
            SwitchState::Off => Some(Symbol::SwitchOff),
            SwitchState::Either => None,
        }
    }
}

/// A lock, key, or room marker
///
/// Ordering is by variant then value, so sets of symbols iterate
/// deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    /// Key number `n`; a room needing it sits at key level `n + 1` or deeper
    Key(u32),
    /// Switch must be on to pass
    SwitchOn,
    /// Switch must be off to pass
    SwitchOff,
    /// The switch item itself
    Switch,
    /// Dungeon entrance marker
    Start,
    /// Final reward room marker
    Goal,
    /// Boss room marker
    Boss,
}

impl Symbol {
    pub fn is_key(self) -> bool {
        matches!(self, Symbol::Key(_))
    }

    /// The key number, if this is a key
    pub fn key_value(self) -> Option<u32> {
        match self {
            Symbol::Key(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_switch_state(self) -> bool {
        matches!(self, Symbol::SwitchOn | Symbol::SwitchOff)
    }

    /// Switch state represented by this symbol (`Either` for non-switch symbols)
    pub fn switch_state(self) -> SwitchState {
        match self {
            Symbol::SwitchOn => SwitchState::On,
            Symbol::SwitchOff => SwitchState::Off,
            _ => SwitchState::Either,
        }
    }

    pub fn is_switch(self) -> bool {
        self == Symbol::Switch
    }

    pub fn is_start(self) -> bool {
        self == Symbol::Start
    }

    pub fn is_goal(self) -> bool {
        self == Symbol::Goal
    }

    pub fn is_boss(self) -> bool {
        self == Symbol::Boss
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // A, B, ... Z, then numbered past the alphabet
            Symbol::Key(n) if *n < 26 => {
                let letter = char::from(b'A' + *n as u8);
                write!(f, "{}", letter)
            }
            Symbol::Key(n) => write!(f, "K{}", n),
            Symbol::SwitchOn => write!(f, "ON"),
            Symbol::SwitchOff => write!(f, "OFF"),
            Symbol::Switch => write!(f, "SW"),
            Symbol::Start => write!(f, "Start"),
            Symbol::Goal => write!(f, "Goal"),
            Symbol::Boss => write!(f, "Boss"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_key_display() {
        assert_eq!(Symbol::Key(0).to_string(), "A");
        assert_eq!(Symbol::Key(2).to_string(), "C");
        assert_eq!(Symbol::Key(25).to_string(), "Z");
        assert_eq!(Symbol::Key(30).to_string(), "K30");
    }

    #[test]
    fn test_marker_display() {
        assert_eq!(Symbol::Start.to_string(), "Start");
        assert_eq!(Symbol::Boss.to_string(), "Boss");
        assert_eq!(Symbol::Switch.to_string(), "SW");
        assert_eq!(Symbol::SwitchOff.to_string(), "OFF");
    }

    #[test]
    fn test_switch_state_round_trip() {
        for state in SwitchState::iter() {
            match state.to_symbol() {
                Some(sym) => {
                    assert!(sym.is_switch_state());
                    assert_eq!(sym.switch_state(), state);
                }
                None => assert_eq!(state, SwitchState::Either),
            }
        }
    }

    #[test]
    fn test_invert() {
        assert_eq!(SwitchState::On.invert(), SwitchState::Off);
        assert_eq!(SwitchState::Off.invert(), SwitchState::On);
        assert_eq!(SwitchState::Either.invert(), SwitchState::Either);
    }

    #[test]
    fn test_predicates() {
        assert!(Symbol::Key(1).is_key());
        assert_eq!(Symbol::Key(4).key_value(), Some(4));
        assert_eq!(Symbol::Goal.key_value(), None);
        assert!(!Symbol::Switch.is_switch_state());
        assert!(Symbol::Switch.is_switch());
        assert!(Symbol::Start.is_start());
    }
}
