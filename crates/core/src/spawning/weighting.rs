//! Subject selection biased toward the player's weaker subjects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::rng::SeededRandom;

pub const DEFAULT_SUBJECT: &str = "general";
/// Rating assumed for a subject the player has no rating in.
pub const DEFAULT_ELO: f64 = 5.0;
const MAX_ELO: f64 = 10.0;

/// Player ratings per subject plus the subjects enemies may be drawn from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillProfile {
    #[serde(default)]
    pub available_subjects: Vec<String>,
    #[serde(default)]
    pub ratings: BTreeMap<String, f64>,
}

impl SkillProfile {
    pub fn new<I, S>(available_subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available_subjects: available_subjects.into_iter().map(Into::into).collect(),
            ratings: BTreeMap::new(),
        }
    }

    pub fn with_rating(mut self, subject: impl Into<String>, elo: f64) -> Self {
        self.ratings.insert(subject.into(), elo);
        self
    }

    pub fn rating(&self, subject: &str) -> Option<f64> {
        self.ratings.get(subject).copied()
    }

    /// Rating used for level sampling and aggro: the stored one, else the default.
    pub fn effective_rating(&self, subject: &str) -> f64 {
        self.rating(subject).unwrap_or(DEFAULT_ELO)
    }
}

/// Normalized subject probabilities in a fixed order.
#[derive(Clone, Debug, PartialEq)]
pub struct SubjectWeights {
    entries: Vec<(String, f64)>,
}

impl SubjectWeights {
    pub fn from_profile(profile: &SkillProfile) -> Self {
        if profile.ratings.is_empty() {
            return Self::uniform(&profile.available_subjects);
        }

        let mut raw: BTreeMap<&str, f64> = BTreeMap::new();
        for subject in &profile.available_subjects {
            raw.insert(subject, MAX_ELO + 1.0);
        }
        for (subject, elo) in &profile.ratings {
            raw.insert(subject, MAX_ELO + 1.0 - elo.clamp(0.0, MAX_ELO));
        }
        let total: f64 = raw.values().sum();
        let entries =
            raw.into_iter().map(|(subject, weight)| (subject.to_owned(), weight / total)).collect();
        Self { entries }
    }

    pub fn uniform(subjects: &[String]) -> Self {
        let mut unique: Vec<&String> = subjects.iter().collect();
        unique.sort();
        unique.dedup();
        if unique.is_empty() {
            log::debug!("no subjects available, enemies use {DEFAULT_SUBJECT}");
        }
        let share = 1.0 / unique.len().max(1) as f64;
        Self { entries: unique.into_iter().map(|subject| (subject.clone(), share)).collect() }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn weight(&self, subject: &str) -> Option<f64> {
        self.entries.iter().find(|(name, _)| name == subject).map(|(_, weight)| *weight)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(subject, weight)| (subject.as_str(), *weight))
    }

    /// Roulette draw; falls back to the first subject, or the default one when empty.
    pub fn select(&self, rng: &mut SeededRandom) -> &str {
        let Some((first, _)) = self.entries.first() else {
            return DEFAULT_SUBJECT;
        };
        let mut roll = rng.next_f64();
        for (subject, weight) in &self.entries {
            roll -= weight;
            if roll <= 0.0 {
                return subject;
            }
        }
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weaker_subjects_weigh_more() {
        let profile = SkillProfile::new(["math", "history"])
            .with_rating("math", 2.0)
            .with_rating("history", 9.0);
        let weights = SubjectWeights::from_profile(&profile);
        let math = weights.weight("math").unwrap_or_default();
        let history = weights.weight("history").unwrap_or_default();
        assert!((math - 9.0 / 11.0).abs() < 1e-9);
        assert!((history - 2.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn unrated_available_subject_counts_as_zero_elo() {
        let profile = SkillProfile::new(["math", "art"]).with_rating("math", 10.0);
        let weights = SubjectWeights::from_profile(&profile);
        assert!((weights.weight("art").unwrap_or_default() - 11.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn ratings_are_clamped() {
        let profile =
            SkillProfile::new(Vec::<String>::new()).with_rating("a", 42.0).with_rating("b", -3.0);
        let weights = SubjectWeights::from_profile(&profile);
        assert!((weights.weight("a").unwrap_or_default() - 1.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn no_ratings_means_uniform() {
        let profile = SkillProfile::new(["a", "b", "c", "d"]);
        let weights = SubjectWeights::from_profile(&profile);
        assert!(weights.iter().all(|(_, weight)| (weight - 0.25).abs() < 1e-12));
    }

    #[test]
    fn empty_profile_selects_default_subject() {
        let weights = SubjectWeights::from_profile(&SkillProfile::default());
        let mut rng = SeededRandom::new(1);
        assert!(weights.is_empty());
        assert_eq!(weights.select(&mut rng), DEFAULT_SUBJECT);
    }

    #[test]
    fn selection_follows_weights() {
        let profile = SkillProfile::new(["weak", "strong"])
            .with_rating("weak", 1.0)
            .with_rating("strong", 10.0);
        let weights = SubjectWeights::from_profile(&profile);
        let mut rng = SeededRandom::new(77);
        let weak = (0..2_000).filter(|_| weights.select(&mut rng) == "weak").count();
        assert!(weak > 1_600, "weak picked {weak} times");
    }
}
