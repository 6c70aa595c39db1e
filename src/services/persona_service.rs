use std::collections::BTreeMap;
use std::num::IntErrorKind;

use crate::models::persona::Persona;
use crate::models::survey_response::SurveyAnswer;

/// Interest score used when q9 is missing, unparsable, or parses to zero.
/// Out-of-range values are kept as-is, not clamped.
pub const DEFAULT_INTEREST_SCORE: i64 = 3;
/// q9 at or above this counts as high knowledge interest.
pub const HIGH_INTEREST_THRESHOLD: i64 = 4;

/// q10: which internship task appeals more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskFocus {
    /// A: organisation-wide energy rules and corporate inventory.
    Organization,
    /// B: one flagship product, from sourcing to recycling.
    Product,
}

impl TaskFocus {
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "A" => Some(TaskFocus::Organization),
            "B" => Some(TaskFocus::Product),
            _ => None,
        }
    }
}

pub struct PersonaService;

impl PersonaService {
    /// Classify from the raw q7 / q9 / q10 choices.
    pub fn classify(q7: Option<&str>, q9: Option<&str>, q10: Option<&str>) -> Persona {
        let high_interest = parse_interest_score(q9) >= HIGH_INTEREST_THRESHOLD;
        let high_commitment = matches!(q7, Some("B") | Some("C"));
        let focus = q10.and_then(TaskFocus::from_choice);

        match (high_interest, high_commitment, focus) {
            (true, true, Some(TaskFocus::Organization)) => Persona::Leader,
            (true, true, Some(TaskFocus::Product)) => Persona::Researcher,
            (true, false, Some(TaskFocus::Organization)) => Persona::PolicyAnalyst,
            (true, false, Some(TaskFocus::Product)) => Persona::TechEnthusiast,
            (false, true, Some(TaskFocus::Organization)) => Persona::Activist,
            (false, true, Some(TaskFocus::Product)) => Persona::GreenLifestyler,
            (false, false, Some(TaskFocus::Organization)) => Persona::ManagementNovice,
            (_, _, _) => Persona::ConsciousConsumer,
        }
    }

    /// Classify from a full initial-survey answer map.
    pub fn classify_answers(answers: &BTreeMap<String, SurveyAnswer>) -> Persona {
        let choice = |id: &str| answers.get(id).and_then(SurveyAnswer::as_choice);
        Self::classify(choice("q7"), choice("q9"), choice("q10"))
    }
}

/// Reads the leading integer of a scale answer ("4", " 5", "4.5" -> 4).
/// Anything without one, and an explicit zero, falls back to
/// [`DEFAULT_INTEREST_SCORE`]. Runs too long for `i64` saturate.
pub fn parse_interest_score(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_INTEREST_SCORE;
    };
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    match digits[..end].parse::<i64>() {
        Ok(0) => DEFAULT_INTEREST_SCORE,
        Ok(value) => sign * value,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => sign * i64::MAX,
        Err(_) => DEFAULT_INTEREST_SCORE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_truth_table() {
        let cases = [
            ("B", "4", "A", Persona::Leader),
            ("C", "5", "B", Persona::Researcher),
            ("A", "4", "A", Persona::PolicyAnalyst),
            ("A", "5", "B", Persona::TechEnthusiast),
            ("B", "3", "A", Persona::Activist),
            ("C", "1", "B", Persona::GreenLifestyler),
            ("A", "2", "A", Persona::ManagementNovice),
            ("A", "2", "B", Persona::ConsciousConsumer),
        ];
        for (q7, q9, q10, expected) in cases {
            assert_eq!(
                PersonaService::classify(Some(q7), Some(q9), Some(q10)),
                expected,
                "q7={q7} q9={q9} q10={q10}"
            );
        }
    }

    #[test]
    fn reference_example_is_management_novice() {
        assert_eq!(
            PersonaService::classify(Some("A"), Some("2"), Some("A")),
            Persona::ManagementNovice
        );
    }

    #[test]
    fn missing_or_malformed_focus_falls_back_to_conscious_consumer() {
        for q7 in ["A", "B", "C"] {
            for q9 in ["1", "5"] {
                assert_eq!(
                    PersonaService::classify(Some(q7), Some(q9), None),
                    Persona::ConsciousConsumer
                );
                assert_eq!(
                    PersonaService::classify(Some(q7), Some(q9), Some("Z")),
                    Persona::ConsciousConsumer
                );
            }
        }
    }

    #[test]
    fn missing_interest_defaults_to_three_which_is_low() {
        assert_eq!(
            PersonaService::classify(Some("B"), None, Some("A")),
            Persona::Activist
        );
    }

    #[test]
    fn interest_parsing_follows_leading_integer() {
        assert_eq!(parse_interest_score(Some("4")), 4);
        assert_eq!(parse_interest_score(Some(" 5 ")), 5);
        assert_eq!(parse_interest_score(Some("4.9")), 4);
        assert_eq!(parse_interest_score(Some("abc")), DEFAULT_INTEREST_SCORE);
        assert_eq!(parse_interest_score(Some("")), DEFAULT_INTEREST_SCORE);
        assert_eq!(parse_interest_score(Some("0")), DEFAULT_INTEREST_SCORE);
        assert_eq!(parse_interest_score(Some("-2")), -2);
        assert_eq!(parse_interest_score(Some("9")), 9);
        assert_eq!(parse_interest_score(None), DEFAULT_INTEREST_SCORE);
    }

    #[test]
    fn oversized_interest_saturates_instead_of_defaulting() {
        assert_eq!(parse_interest_score(Some("99999999999999999999")), i64::MAX);
        assert_eq!(parse_interest_score(Some("-99999999999999999999")), -i64::MAX);
        assert_eq!(parse_interest_score(Some("0000000000000000000000004")), 4);
        assert_eq!(
            PersonaService::classify(Some("A"), Some("99999999999999999999"), Some("A")),
            Persona::PolicyAnalyst
        );
    }

    #[test]
    fn multi_select_answers_do_not_count_as_choices() {
        let answers = BTreeMap::from([
            ("q7".to_string(), SurveyAnswer::Multi(vec!["B".into()])),
            ("q9".to_string(), SurveyAnswer::Choice("5".into())),
            ("q10".to_string(), SurveyAnswer::Choice("A".into())),
        ]);
        assert_eq!(
            PersonaService::classify_answers(&answers),
            Persona::PolicyAnalyst
        );
    }
}
