//! Progressive skill rating over an ordered answer history.
//! Ratings run from 1 (the player struggles) to 10 (the player has mastered it).

use serde::{Deserialize, Serialize};

pub const STARTING_ELO: f64 = 5.0;
pub const MIN_ELO: f64 = 1.0;
pub const MAX_ELO: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerOutcome {
    Correct,
    Wrong,
    Timeout,
}

fn apply(elo: f64, outcome: AnswerOutcome) -> f64 {
    match outcome {
        AnswerOutcome::Correct => ((elo + (MAX_ELO - elo) / 3.0) * 10.0).ceil() / 10.0,
        AnswerOutcome::Wrong | AnswerOutcome::Timeout => {
            ((elo - (elo - MIN_ELO) / 4.0) * 10.0).floor() / 10.0
        }
    }
}

/// Rating after replaying `answers` in order from [`STARTING_ELO`], kept to one decimal.
/// `None` when nothing was answered yet.
pub fn progressive_elo(answers: &[AnswerOutcome]) -> Option<f64> {
    if answers.is_empty() {
        return None;
    }
    Some(answers.iter().fold(STARTING_ELO, |elo, outcome| apply(elo, *outcome)))
}

pub fn rounded_elo(answers: &[AnswerOutcome]) -> Option<u8> {
    progressive_elo(answers).map(|elo| elo.round() as u8)
}

/// Average over a subject's questions, unanswered ones counting as [`STARTING_ELO`].
/// Unrounded per-question ratings feed the mean; the result is rounded.
pub fn subject_average<'a>(questions: impl IntoIterator<Item = &'a [AnswerOutcome]>) -> Option<u8> {
    let (sum, count) = questions.into_iter().fold((0.0, 0_usize), |(sum, count), answers| {
        (sum + progressive_elo(answers).unwrap_or(STARTING_ELO), count + 1)
    });
    if count == 0 {
        return None;
    }
    Some((sum / count as f64).round() as u8)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerTally {
    pub correct: u32,
    pub wrong: u32,
    pub timeout: u32,
}

impl AnswerTally {
    pub fn from_answers(answers: &[AnswerOutcome]) -> Self {
        let mut tally = Self::default();
        for outcome in answers {
            tally.record(*outcome);
        }
        tally
    }

    pub fn record(&mut self, outcome: AnswerOutcome) {
        match outcome {
            AnswerOutcome::Correct => self.correct += 1,
            AnswerOutcome::Wrong => self.wrong += 1,
            AnswerOutcome::Timeout => self.timeout += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.correct + self.wrong + self.timeout
    }
}
