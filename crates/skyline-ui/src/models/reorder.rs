//! Reorder rules for position-significant lists.
//!
//! Every operation validates indices against the current length before
//! touching the slice, so a failed request leaves the order unchanged.
//! Exactly one element is relocated per call; the others keep their relative
//! order and shift by at most one position.

use thiserror::Error;

/// A requested move of one element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveIntent {
    Up,
    Down,
    ToTop,
    ToBottom,
    /// Drag relocation: the element ends at this index.
    RelocateTo(usize),
}

impl MoveIntent {
    /// Menu label for the discrete commands.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Up => "Move up",
            Self::Down => "Move down",
            Self::ToTop => "Move to top",
            Self::ToBottom => "Move to bottom",
            Self::RelocateTo(_) => "Move here",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReorderError {
    #[error("position {index} is not valid for a list of {len}")]
    InvalidPosition { index: usize, len: usize },

    #[error("no move commands apply to a list of {len}")]
    NotApplicable { len: usize },
}

const FIRST_ROW_MOVES: &[MoveIntent] = &[MoveIntent::Down, MoveIntent::ToBottom];
const LAST_ROW_MOVES: &[MoveIntent] = &[MoveIntent::Up, MoveIntent::ToTop];
const INTERIOR_ROW_MOVES: &[MoveIntent] = &[
    MoveIntent::Up,
    MoveIntent::Down,
    MoveIntent::ToTop,
    MoveIntent::ToBottom,
];

/// Discrete commands offered for the row at `index`.
pub fn available_moves(index: usize, len: usize) -> Result<&'static [MoveIntent], ReorderError> {
    if len <= 1 {
        return Err(ReorderError::NotApplicable { len });
    }
    if index >= len {
        return Err(ReorderError::InvalidPosition { index, len });
    }

    Ok(match index {
        0 => FIRST_ROW_MOVES,
        i if i == len - 1 => LAST_ROW_MOVES,
        _ => INTERIOR_ROW_MOVES,
    })
}

/// Apply `intent` to the element at `index`, returning its new index.
///
/// Boundary commands that would not move anything (up from the first row,
/// down from the last, and so on) are rejected as `InvalidPosition`.
pub fn apply<T>(items: &mut [T], index: usize, intent: MoveIntent) -> Result<usize, ReorderError> {
    let len = items.len();
    let invalid = ReorderError::InvalidPosition { index, len };
    if index >= len {
        return Err(invalid);
    }

    match intent {
        MoveIntent::Up => {
            if index == 0 {
                return Err(invalid);
            }
            items.swap(index - 1, index);
            Ok(index - 1)
        }
        MoveIntent::Down => {
            if index + 1 >= len {
                return Err(invalid);
            }
            items.swap(index, index + 1);
            Ok(index + 1)
        }
        MoveIntent::ToTop => {
            if index == 0 {
                return Err(invalid);
            }
            items[..=index].rotate_right(1);
            Ok(0)
        }
        MoveIntent::ToBottom => {
            if index == len - 1 {
                return Err(invalid);
            }
            items[index..].rotate_left(1);
            Ok(len - 1)
        }
        MoveIntent::RelocateTo(target) => relocate(items, index, target),
    }
}

/// Move the element at `from` so it ends at `to`, stepping one adjacent swap
/// at a time. Elements strictly between the two shift by one; nothing outside
/// `[min(from, to), max(from, to)]` moves.
pub fn relocate<T>(items: &mut [T], from: usize, to: usize) -> Result<usize, ReorderError> {
    let len = items.len();
    if from >= len {
        return Err(ReorderError::InvalidPosition { index: from, len });
    }
    if to >= len {
        return Err(ReorderError::InvalidPosition { index: to, len });
    }

    if from < to {
        for i in from..to {
            items.swap(i, i + 1);
        }
    } else {
        for i in (to + 1..=from).rev() {
            items.swap(i, i - 1);
        }
    }
    Ok(to)
}

/// Non-mutating form of [`apply`].
pub fn reordered<T: Clone>(
    items: &[T],
    index: usize,
    intent: MoveIntent,
) -> Result<Vec<T>, ReorderError> {
    let mut next = items.to_vec();
    apply(&mut next, index, intent)?;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(names: &[&'static str]) -> Vec<&'static str> {
        names.to_vec()
    }

    /// Sequences 0..n with distinct values, for n in 0..=6.
    fn all_lengths() -> impl Iterator<Item = Vec<usize>> {
        (0..=6).map(|n| (0..n).collect())
    }

    #[test]
    fn move_to_bottom_scenario() {
        let out = reordered(&seq(&["Seoul", "Busan", "Incheon"]), 0, MoveIntent::ToBottom).unwrap();
        assert_eq!(out, seq(&["Busan", "Incheon", "Seoul"]));
    }

    #[test]
    fn relocate_last_to_first_scenario() {
        let out = reordered(&seq(&["A", "B", "C", "D"]), 3, MoveIntent::RelocateTo(0)).unwrap();
        assert_eq!(out, seq(&["D", "A", "B", "C"]));
    }

    #[test]
    fn move_up_from_first_row_is_invalid_and_leaves_order() {
        for items in all_lengths().filter(|v| !v.is_empty()) {
            let mut work = items.clone();
            let err = apply(&mut work, 0, MoveIntent::Up).unwrap_err();
            assert_eq!(
                err,
                ReorderError::InvalidPosition {
                    index: 0,
                    len: items.len()
                }
            );
            assert_eq!(work, items);
        }
    }

    #[test]
    fn out_of_range_requests_leave_order() {
        let items = vec![1, 2, 3];
        for intent in [
            MoveIntent::Up,
            MoveIntent::Down,
            MoveIntent::ToTop,
            MoveIntent::ToBottom,
            MoveIntent::RelocateTo(0),
        ] {
            let mut work = items.clone();
            assert!(apply(&mut work, 3, intent).is_err());
            assert_eq!(work, items);
        }

        let mut work = items.clone();
        assert_eq!(
            apply(&mut work, 1, MoveIntent::RelocateTo(3)),
            Err(ReorderError::InvalidPosition { index: 3, len: 3 })
        );
        assert_eq!(work, items);

        let mut empty: Vec<u8> = Vec::new();
        assert!(apply(&mut empty, 0, MoveIntent::Down).is_err());
    }

    #[test]
    fn boundary_commands_are_rejected() {
        let items = vec![1, 2, 3];
        assert!(reordered(&items, 2, MoveIntent::Down).is_err());
        assert!(reordered(&items, 2, MoveIntent::ToBottom).is_err());
        assert!(reordered(&items, 0, MoveIntent::ToTop).is_err());
    }

    #[test]
    fn up_then_down_restores_sequence() {
        for items in all_lengths() {
            for i in 1..items.len() {
                let mut work = items.clone();
                let moved_to = apply(&mut work, i, MoveIntent::Up).unwrap();
                assert_eq!(moved_to, i - 1);
                apply(&mut work, moved_to, MoveIntent::Down).unwrap();
                assert_eq!(work, items);
            }
        }
    }

    #[test]
    fn to_top_and_to_bottom_keep_relative_order() {
        for items in all_lengths() {
            let len = items.len();
            for i in 1..len {
                let out = reordered(&items, i, MoveIntent::ToTop).unwrap();
                assert_eq!(out[0], items[i]);
                let rest: Vec<_> = items.iter().copied().filter(|&v| v != items[i]).collect();
                assert_eq!(&out[1..], rest.as_slice());
            }
            for i in 0..len.saturating_sub(1) {
                let out = reordered(&items, i, MoveIntent::ToBottom).unwrap();
                assert_eq!(out[len - 1], items[i]);
                let rest: Vec<_> = items.iter().copied().filter(|&v| v != items[i]).collect();
                assert_eq!(&out[..len - 1], rest.as_slice());
            }
        }
    }

    #[test]
    fn relocate_moves_only_the_spanned_range() {
        for items in all_lengths() {
            let len = items.len();
            for i in 0..len {
                for j in 0..len {
                    let out = reordered(&items, i, MoveIntent::RelocateTo(j)).unwrap();
                    assert_eq!(out.len(), len);
                    assert_eq!(out[j], items[i]);

                    let (lo, hi) = (i.min(j), i.max(j));
                    for k in 0..len {
                        let pos = out.iter().position(|&v| v == items[k]).unwrap();
                        if k == i {
                            continue;
                        }
                        if k < lo || k > hi {
                            assert_eq!(pos, k, "element outside the range moved");
                        } else if i < j {
                            assert_eq!(pos, k - 1);
                        } else {
                            assert_eq!(pos, k + 1);
                        }
                    }

                    let mut sorted = out.clone();
                    sorted.sort_unstable();
                    assert_eq!(sorted, items);
                }
            }
        }
    }

    #[test]
    fn available_moves_by_position() {
        assert_eq!(available_moves(0, 3).unwrap(), FIRST_ROW_MOVES);
        assert_eq!(available_moves(2, 3).unwrap(), LAST_ROW_MOVES);
        assert_eq!(available_moves(1, 3).unwrap(), INTERIOR_ROW_MOVES);
        assert_eq!(
            available_moves(0, 1),
            Err(ReorderError::NotApplicable { len: 1 })
        );
        assert_eq!(
            available_moves(0, 0),
            Err(ReorderError::NotApplicable { len: 0 })
        );
        assert_eq!(
            available_moves(5, 3),
            Err(ReorderError::InvalidPosition { index: 5, len: 3 })
        );
    }

    #[test]
    fn every_offered_command_succeeds() {
        for len in 2..=5 {
            let items: Vec<usize> = (0..len).collect();
            for i in 0..len {
                for &intent in available_moves(i, len).unwrap() {
                    assert!(
                        reordered(&items, i, intent).is_ok(),
                        "{intent:?} offered at {i} of {len} but rejected"
                    );
                }
            }
        }
    }
}
