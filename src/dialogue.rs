//! Bartender dialogue puzzle.
//!
//! The bartender asks three yes/no questions. Only one exact sequence of
//! answers convinces him to point the player at the basement. Wrong answers
//! cost nothing; the puzzle can be retried on every visit to the bar.

/// A recognized yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

/// Parse a player response into an [`Answer`], if recognized.
pub fn parse_answer(input: &str) -> Option<Answer> {
    match input.trim().to_lowercase().as_str() {
        "yes" => Some(Answer::Yes),
        "no" => Some(Answer::No),
        _ => None,
    }
}

/// The bartender's three questions, asked in order.
pub const BARTENDER_QUESTIONS: [&str; 3] = [
    "Bartender: \"You new 'round here? (yes/no)\" ",
    "Bartender: \"You runnin' from someone? (yes/no)\" ",
    "Bartender: \"Would you like to hear about the daily special? (yes/no)\" ",
];

/// The only answer sequence that unlocks the basement branch.
pub const REQUIRED_SEQUENCE: [Answer; 3] = [Answer::Yes, Answer::No, Answer::Yes];

/// True iff the collected answers match the required sequence exactly.
pub fn sequence_unlocks(answers: &[Answer]) -> bool {
    answers == REQUIRED_SEQUENCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use Answer::{No, Yes};

    #[test]
    fn parse_trims_and_folds_case() {
        assert_eq!(parse_answer("  YES \n"), Some(Yes));
        assert_eq!(parse_answer("No"), Some(No));
        assert_eq!(parse_answer("maybe"), None);
        assert_eq!(parse_answer(""), None);
    }

    #[test]
    fn only_yes_no_yes_unlocks() {
        for a in [Yes, No] {
            for b in [Yes, No] {
                for c in [Yes, No] {
                    let answers = [a, b, c];
                    let expected = answers == [Yes, No, Yes];
                    assert_eq!(
                        sequence_unlocks(&answers),
                        expected,
                        "unexpected result for {answers:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn partial_sequences_never_unlock() {
        assert!(!sequence_unlocks(&[Yes, No]));
        assert!(!sequence_unlocks(&[]));
    }
}
