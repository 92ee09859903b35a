#![cfg(not(target_arch = "wasm32"))]

use std::cell::Cell;
use std::rc::Rc;

use braintwist_tape::{BeginningOfHistory, Opcode, TokenHistory};
use proptest::prelude::*;

/// Opcode at stream position `index`, derived from `salt` so each case sees a different stream.
fn opcode_at(salt: u64, index: usize) -> Opcode {
    let mixed = (index as u64 ^ salt).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    Opcode::ALL[(mixed >> 61) as usize]
}

struct Indexed {
    salt: u64,
    pulls: Rc<Cell<usize>>,
}

impl Iterator for Indexed {
    type Item = Opcode;

    fn next(&mut self) -> Option<Opcode> {
        let index = self.pulls.get();
        self.pulls.set(index + 1);
        Some(opcode_at(self.salt, index))
    }
}

#[derive(Debug, Clone, Copy)]
enum Move {
    Advance,
    Retreat,
}

fn moves() -> impl Strategy<Value = Vec<Move>> {
    proptest::collection::vec(
        prop_oneof![3 => Just(Move::Advance), 2 => Just(Move::Retreat)],
        0..256,
    )
}

proptest! {
    #[test]
    fn replay_is_stable_and_never_regenerates(salt in any::<u64>(), moves in moves()) {
        let pulls = Rc::new(Cell::new(0));
        let mut history = TokenHistory::new(Indexed { salt, pulls: pulls.clone() });
        let mut furthest = 0usize;

        for m in moves {
            let cursor = history.cursor();
            match m {
                Move::Advance => {
                    let op = history.advance();
                    prop_assert_eq!(op, Some(opcode_at(salt, cursor)));
                    prop_assert_eq!(history.cursor(), cursor + 1);
                    furthest = furthest.max(cursor + 1);
                }
                Move::Retreat => {
                    let op = history.retreat();
                    if cursor <= 1 {
                        prop_assert_eq!(op, Err(BeginningOfHistory));
                        prop_assert_eq!(history.cursor(), cursor);
                    } else {
                        prop_assert_eq!(op, Ok(opcode_at(salt, cursor - 2)));
                        prop_assert_eq!(history.cursor(), cursor - 1);
                    }
                }
            }
            prop_assert_eq!(pulls.get(), furthest);
            prop_assert_eq!(history.len(), furthest);
        }
    }
}
