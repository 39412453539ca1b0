use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::package::default_active;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub is_active: bool,
    pub sort_order: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFaq {
    #[validate(length(min = 1, message = "is required"))]
    pub question: String,
    #[validate(length(min = 1, message = "is required"))]
    pub answer: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateFaq {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub question: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub answer: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReorderFaqs {
    pub ids: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Swaps the entry at `index` with its neighbour in `direction`.
///
/// Returns `None` when the move would leave the list.
pub fn move_adjacent<T: Clone>(items: &[T], index: usize, direction: Direction) -> Option<Vec<T>> {
    let target = match direction {
        Direction::Up => index.checked_sub(1)?,
        Direction::Down => index.checked_add(1).filter(|t| *t < items.len())?,
    };
    if index >= items.len() {
        return None;
    }

    let mut moved = items.to_vec();
    moved.swap(index, target);
    Some(moved)
}

/// True when `ids` names every id in `existing` exactly once.
pub fn is_permutation(existing: &[i64], ids: &[i64]) -> bool {
    let mut a = existing.to_vec();
    let mut b = ids.to_vec();
    a.sort_unstable();
    b.sort_unstable();
    a == b
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_swaps_exactly_two_neighbours() {
        let ids = [10, 20, 30, 40];

        assert_eq!(move_adjacent(&ids, 2, Direction::Up), Some(vec![10, 30, 20, 40]));
        assert_eq!(move_adjacent(&ids, 1, Direction::Down), Some(vec![10, 30, 20, 40]));

        let moved = move_adjacent(&ids, 0, Direction::Down).unwrap();
        let changed = ids.iter().zip(&moved).filter(|(a, b)| a != b).count();
        assert_eq!(changed, 2);
    }

    #[test]
    fn test_move_off_the_ends() {
        let ids = [1, 2, 3];
        assert_eq!(move_adjacent(&ids, 0, Direction::Up), None);
        assert_eq!(move_adjacent(&ids, 2, Direction::Down), None);
        assert_eq!(move_adjacent(&ids, 7, Direction::Up), None);
        assert_eq!(move_adjacent::<i64>(&[], 0, Direction::Down), None);
    }

    #[test]
    fn test_permutation_check() {
        assert!(is_permutation(&[1, 2, 3], &[3, 1, 2]));
        assert!(!is_permutation(&[1, 2, 3], &[1, 2]));
        assert!(!is_permutation(&[1, 2, 3], &[1, 2, 2]));
        assert!(!is_permutation(&[1, 2, 3], &[1, 2, 3, 4]));
    }
}
