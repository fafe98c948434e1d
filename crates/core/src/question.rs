//! Picks the next combat question for an enemy of a given level.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::rng::SeededRandom;

/// A pooled question with the player's rating for it, `None` while never answered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionCandidate {
    pub id: u32,
    pub elo: Option<u8>,
}

/// Highest question rating an enemy of `level` may ask. Stronger enemies ask harder questions.
pub fn max_question_elo(level: u8) -> i32 {
    11 - i32::from(level)
}

/// Selects a question and records it in `asked`. Once every question was asked the set is
/// cleared and the whole pool is eligible again. Returns `None` only for an empty pool.
pub fn select_question(
    pool: &[QuestionCandidate],
    enemy_level: u8,
    asked: &mut BTreeSet<u32>,
    rng: &mut SeededRandom,
) -> Option<QuestionCandidate> {
    if pool.is_empty() {
        return None;
    }
    let mut available: Vec<QuestionCandidate> =
        pool.iter().copied().filter(|question| !asked.contains(&question.id)).collect();
    if available.is_empty() {
        log::debug!("question pool exhausted, reusing {} questions", pool.len());
        asked.clear();
        available = pool.to_vec();
    }

    let ceiling = max_question_elo(enemy_level);
    let suitable = available
        .iter()
        .filter_map(|question| question.elo.map(|elo| (elo, *question)))
        .filter(|(elo, _)| i32::from(*elo) <= ceiling)
        .min_by_key(|(elo, _)| *elo)
        .map(|(_, question)| question);

    let chosen = match suitable {
        Some(question) => question,
        None => {
            let unanswered: Vec<QuestionCandidate> =
                available.iter().copied().filter(|question| question.elo.is_none()).collect();
            if unanswered.is_empty() {
                *available.iter().min_by_key(|question| question.elo)?
            } else {
                unanswered[rng.next_index(unanswered.len())]
            }
        }
    };
    asked.insert(chosen.id);
    Some(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rated(id: u32, elo: u8) -> QuestionCandidate {
        QuestionCandidate { id, elo: Some(elo) }
    }

    fn fresh(id: u32) -> QuestionCandidate {
        QuestionCandidate { id, elo: None }
    }

    #[test]
    fn picks_hardest_question_within_reach() {
        let pool = [rated(1, 6), rated(2, 3), rated(3, 9), rated(4, 3)];
        let mut asked = BTreeSet::new();
        let mut rng = SeededRandom::new(1);
        let chosen = select_question(&pool, 5, &mut asked, &mut rng);
        assert_eq!(chosen, Some(rated(2, 3)));
        assert!(asked.contains(&2));
        assert_eq!(select_question(&pool, 5, &mut asked, &mut rng), Some(rated(4, 3)));
    }

    #[test]
    fn falls_back_to_unanswered_then_lowest() {
        let pool = [rated(1, 8), fresh(2), rated(3, 7)];
        let mut asked = BTreeSet::new();
        let mut rng = SeededRandom::new(9);
        assert_eq!(select_question(&pool, 10, &mut asked, &mut rng), Some(fresh(2)));
        assert_eq!(select_question(&pool, 10, &mut asked, &mut rng), Some(rated(3, 7)));
        assert_eq!(select_question(&pool, 10, &mut asked, &mut rng), Some(rated(1, 8)));
    }

    #[test]
    fn exhausted_pool_starts_over() {
        let pool = [rated(1, 2)];
        let mut asked = BTreeSet::from([1]);
        let mut rng = SeededRandom::new(3);
        assert_eq!(select_question(&pool, 1, &mut asked, &mut rng), Some(rated(1, 2)));
        assert_eq!(asked, BTreeSet::from([1]));
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let mut asked = BTreeSet::new();
        assert_eq!(select_question(&[], 4, &mut asked, &mut SeededRandom::new(0)), None);
        assert!(asked.is_empty());
    }

    #[test]
    fn unanswered_draw_is_seeded() {
        let pool = [fresh(10), fresh(11), fresh(12), fresh(13)];
        let first = select_question(&pool, 9, &mut BTreeSet::new(), &mut SeededRandom::new(77));
        let again = select_question(&pool, 9, &mut BTreeSet::new(), &mut SeededRandom::new(77));
        assert_eq!(first, again);
        assert!(first.is_some_and(|question| question.elo.is_none()));
    }
}
