use constants::survey::{ITEM_COUNT, MAX_ANSWER, MIN_ANSWER};
use serde::{Deserialize, Serialize};

use super::profile::PersonalityProfile;

/// Reverse-scoring pivot: an answer `x` on a 1-7 scale reverses to `8 - x`.
const REVERSE_PIVOT: u8 = MIN_ANSWER + MAX_ANSWER;

/// Error types for profile computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// One or more items were left unanswered (1-based item numbers).
    IncompleteInput { missing: Vec<usize> },
    AnswerOutOfRange { item: usize, value: u8 },
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::IncompleteInput { missing } => {
                let items: Vec<String> = missing.iter().map(|i| i.to_string()).collect();
                write!(f, "Please answer every item (missing: {})", items.join(", "))
            }
            ProfileError::AnswerOutOfRange { item, value } => write!(
                f,
                "Answer {} for item {} is outside {}..={}",
                value, item, MIN_ANSWER, MAX_ANSWER
            ),
        }
    }
}

impl std::error::Error for ProfileError {}

/// Currently selected value per questionnaire item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Answers([Option<u8>; ITEM_COUNT]);

impl Answers {
    pub fn new(values: [Option<u8>; ITEM_COUNT]) -> Self {
        Self(values)
    }

    /// All ten items answered.
    pub fn complete(values: [u8; ITEM_COUNT]) -> Self {
        Self(values.map(Some))
    }

    /// Selected value for item `item` (1-based), or `None` when absent.
    pub fn get(&self, item: usize) -> Option<u8> {
        item.checked_sub(1)
            .and_then(|index| self.0.get(index))
            .copied()
            .flatten()
    }

    pub fn set(&mut self, item: usize, value: Option<u8>) {
        if let Some(slot) = item.checked_sub(1).and_then(|index| self.0.get_mut(index)) {
            *slot = value;
        }
    }

    pub fn missing(&self) -> Vec<usize> {
        (1..=ITEM_COUNT).filter(|&item| self.get(item).is_none()).collect()
    }
}

impl From<[u8; ITEM_COUNT]> for Answers {
    fn from(values: [u8; ITEM_COUNT]) -> Self {
        Self::complete(values)
    }
}

/// Compute the profile. Fails without a partial result when any item is absent.
pub fn score(answers: &Answers) -> Result<PersonalityProfile, ProfileError> {
    let missing = answers.missing();
    if !missing.is_empty() {
        return Err(ProfileError::IncompleteInput { missing });
    }

    let mut items = [0u8; ITEM_COUNT];
    for (index, slot) in items.iter_mut().enumerate() {
        let item = index + 1;
        let value = answers
            .get(item)
            .ok_or_else(|| ProfileError::IncompleteInput { missing: vec![item] })?;
        if !(MIN_ANSWER..=MAX_ANSWER).contains(&value) {
            return Err(ProfileError::AnswerOutOfRange { item, value });
        }
        *slot = value;
    }

    let item = |n: usize| items[n - 1];
    let reversed = |n: usize| REVERSE_PIVOT - items[n - 1];

    Ok(PersonalityProfile {
        extroversion: pair_percentage(item(1), reversed(6)),
        agreeableness: pair_percentage(reversed(2), item(7)),
        conscientiousness: pair_percentage(item(3), reversed(8)),
        neuroticism: pair_percentage(item(4), reversed(9)),
        openness: pair_percentage(item(5), reversed(10)),
    })
}

/// round((mean - 1) * 100 / 6), half-up, on the pair sum.
///
/// With `sum` in 2..=14 this is `round((sum - 2) * 100 / 12)`; the exact
/// quotient never lands on .5, so half-up and half-to-even agree.
fn pair_percentage(first: u8, second: u8) -> u8 {
    let sum = u32::from(first) + u32::from(second);
    let scaled = (sum - 2 * u32::from(MIN_ANSWER)) * 100;
    let span = 2 * u32::from(MAX_ANSWER - MIN_ANSWER);
    ((scaled + span / 2) / span) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternating_answers_match_hand_computed_percentages() {
        // E = (6 + (8-2)) / 2 = 6 -> 83; A = ((8-2) + 6) / 2 = 6 -> 83;
        // C = 6 -> 83; N = (2 + (8-6)) / 2 = 2 -> 17; O = 6 -> 83.
        let answers = Answers::complete([6, 2, 6, 2, 6, 2, 6, 2, 6, 2]);
        let profile = score(&answers).unwrap();

        assert_eq!(
            profile,
            PersonalityProfile {
                extroversion: 83,
                agreeableness: 83,
                conscientiousness: 83,
                neuroticism: 17,
                openness: 83,
            }
        );
    }

    #[test]
    fn extremes_map_to_zero_and_one_hundred() {
        let high = score(&Answers::complete([7, 1, 7, 7, 7, 1, 7, 1, 1, 1])).unwrap();
        assert_eq!(high, PersonalityProfile::uniform(100));

        let low = score(&Answers::complete([1, 7, 1, 1, 1, 7, 1, 7, 7, 7])).unwrap();
        assert_eq!(low, PersonalityProfile::uniform(0));
    }

    #[test]
    fn neutral_answers_give_fifty_percent() {
        let profile = score(&Answers::complete([4; ITEM_COUNT])).unwrap();
        assert_eq!(profile, PersonalityProfile::uniform(50));
    }

    #[test]
    fn missing_answers_are_all_reported() {
        let mut answers = Answers::complete([4; ITEM_COUNT]);
        answers.set(3, None);
        answers.set(10, None);

        assert_eq!(
            score(&answers),
            Err(ProfileError::IncompleteInput {
                missing: vec![3, 10]
            })
        );
    }

    #[test]
    fn empty_answers_fail_without_partial_profile() {
        let err = score(&Answers::default()).unwrap_err();
        match err {
            ProfileError::IncompleteInput { missing } => assert_eq!(missing.len(), ITEM_COUNT),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let mut answers = Answers::complete([4; ITEM_COUNT]);
        answers.set(5, Some(9));
        assert_eq!(
            score(&answers),
            Err(ProfileError::AnswerOutOfRange { item: 5, value: 9 })
        );
    }

    #[test]
    fn every_pair_sum_stays_in_range_and_is_monotonic() {
        let mut previous = None;
        for sum in 2u8..=14 {
            let first = (sum - 1).min(7);
            let second = sum - first;
            let pct = pair_percentage(first, second);
            assert!(pct <= 100);
            if let Some(prev) = previous {
                assert!(pct > prev);
            }
            previous = Some(pct);
        }
        assert_eq!(pair_percentage(1, 1), 0);
        assert_eq!(pair_percentage(1, 2), 8);
        assert_eq!(pair_percentage(2, 2), 17);
        assert_eq!(pair_percentage(7, 7), 100);
    }

    #[test]
    fn scoring_is_deterministic() {
        let answers = Answers::complete([3, 5, 2, 6, 7, 1, 4, 4, 2, 5]);
        assert_eq!(score(&answers), score(&answers));
    }

    #[test]
    fn accessor_ignores_out_of_bounds_items() {
        let answers = Answers::complete([4; ITEM_COUNT]);
        assert_eq!(answers.get(0), None);
        assert_eq!(answers.get(11), None);
        assert_eq!(answers.get(1), Some(4));
    }
}
