//! Open/closed state of every door tile. Door tiles themselves never change kind.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::Pos;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorStates {
    open: BTreeMap<Pos, bool>,
}

impl DoorStates {
    pub fn all_closed(doors: &[Pos]) -> Self {
        Self { open: doors.iter().map(|pos| (*pos, false)).collect() }
    }

    /// Unknown positions read as closed.
    pub fn is_open(&self, pos: Pos) -> bool {
        self.open.get(&pos).copied().unwrap_or(false)
    }

    pub fn contains(&self, pos: Pos) -> bool {
        self.open.contains_key(&pos)
    }

    /// Returns false when `pos` is not a door.
    pub fn set_open(&mut self, pos: Pos, open: bool) -> bool {
        match self.open.get_mut(&pos) {
            Some(state) => {
                *state = open;
                true
            }
            None => false,
        }
    }

    /// Flips the door and returns its new state.
    pub fn toggle(&mut self, pos: Pos) -> Option<bool> {
        let state = self.open.get_mut(&pos)?;
        *state = !*state;
        Some(*state)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Pos, bool)> + '_ {
        self.open.iter().map(|(pos, open)| (*pos, *open))
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doors_start_closed_and_toggle() {
        let door = Pos { y: 2, x: 3 };
        let mut doors = DoorStates::all_closed(&[door]);
        assert!(!doors.is_open(door));
        assert_eq!(doors.toggle(door), Some(true));
        assert!(doors.is_open(door));
        assert_eq!(doors.toggle(door), Some(false));
    }

    #[test]
    fn unknown_positions_are_closed_and_immutable() {
        let mut doors = DoorStates::all_closed(&[]);
        let pos = Pos { y: 0, x: 0 };
        assert!(!doors.is_open(pos));
        assert_eq!(doors.toggle(pos), None);
        assert!(!doors.set_open(pos, true));
        assert!(!doors.is_open(pos));
    }
}
