//! Question records and the database line format
//!
//! A [`QuestionRecord`] is one immutable question with its four answers,
//! the index of the correct answer and a difficulty tier. Records are
//! parsed from single lines of the flat-file question database; every
//! invariant (field count, index and difficulty ranges, non-empty text)
//! is enforced here at parse time, so a record that exists is always
//! well-formed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{database, ladder};

/// Reasons a database line is rejected during loading
///
/// Malformed lines are skipped with a diagnostic and never abort the
/// load, so this error only ever shows up in logs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The line does not have exactly seven `;`-separated fields
    #[error("expected 7 fields separated by `;`, found {0}")]
    FieldCount(usize),
    /// The difficulty field is not an integer
    #[error("difficulty `{0}` is not an integer")]
    InvalidDifficulty(String),
    /// The difficulty is outside the playable ladder range
    #[error("difficulty {0} is outside 1..=8")]
    DifficultyOutOfRange(i64),
    /// The correct-answer field is not an integer
    #[error("correct answer `{0}` is not an integer")]
    InvalidCorrectAnswer(String),
    /// The correct-answer index does not name one of the four answers
    #[error("correct answer index {0} is outside 0..=3")]
    CorrectAnswerOutOfRange(i64),
    /// The question or one of the answers is empty after trimming
    #[error("empty text field")]
    EmptyField,
}

/// One question of the quiz, immutable once loaded
///
/// The answer positions are semantically meaningful: position 0 is
/// answer "A", position 3 is answer "D". The id is the 1-based line
/// number of the record in its database file, which is what keeps the
/// English and German databases in sync when switching language
/// mid-game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Stable id, the 1-based line number in the database file
    id: u32,
    /// Difficulty tier, 1 is the easiest
    difficulty: u8,
    /// The question text
    question: String,
    /// The four answers in display order (A to D)
    answers: [String; database::ANSWER_COUNT],
    /// Index of the correct answer within `answers`
    correct: usize,
}

impl QuestionRecord {
    /// Parses one database line into a record
    ///
    /// The line has the form
    /// `difficulty; question; answerA; answerB; answerC; answerD; correctIndex`
    /// with all fields trimmed of surrounding whitespace.
    ///
    /// # Arguments
    ///
    /// * `id` - The 1-based line number of this line in its file
    /// * `line` - The raw line text
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] describing the first violated invariant.
    pub fn parse_line(id: u32, line: &str) -> Result<Self, ParseError> {
        let fields: Vec<&str> = line.split(database::SPLIT).map(str::trim).collect();
        if fields.len() != database::FIELDS {
            return Err(ParseError::FieldCount(fields.len()));
        }

        let difficulty: i64 = fields[0]
            .parse()
            .map_err(|_| ParseError::InvalidDifficulty(fields[0].to_owned()))?;
        if !(1..=ladder::LEVELS as i64).contains(&difficulty) {
            return Err(ParseError::DifficultyOutOfRange(difficulty));
        }

        let correct: i64 = fields[6]
            .parse()
            .map_err(|_| ParseError::InvalidCorrectAnswer(fields[6].to_owned()))?;
        if !(0..database::ANSWER_COUNT as i64).contains(&correct) {
            return Err(ParseError::CorrectAnswerOutOfRange(correct));
        }

        if fields[1..6].iter().any(|field| field.is_empty()) {
            return Err(ParseError::EmptyField);
        }

        Ok(Self {
            id,
            difficulty: difficulty as u8,
            question: fields[1].to_owned(),
            answers: [
                fields[2].to_owned(),
                fields[3].to_owned(),
                fields[4].to_owned(),
                fields[5].to_owned(),
            ],
            correct: correct as usize,
        })
    }

    /// Returns the stable question id (1-based line number)
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the difficulty tier, starting at 1
    pub fn difficulty(&self) -> u8 {
        self.difficulty
    }

    /// Returns the question text
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Returns the index of the correct answer (0..=3)
    pub fn correct_answer(&self) -> usize {
        self.correct
    }

    /// Returns the answer text at the given position
    ///
    /// An out-of-range index yields an empty string instead of a panic;
    /// the presentation layer treats that as a blank button.
    pub fn answer(&self, index: usize) -> &str {
        match self.answers.get(index) {
            Some(answer) => answer,
            None => {
                log::warn!("answer index {index} out of range for question {}", self.id);
                ""
            }
        }
    }

    /// Returns how many answers this question has
    pub fn answer_count(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const LINE: &str = "5; How is a play on words commonly described?; Pan; Pin; Pen; Pun; 3";

    #[test]
    fn test_parse_well_formed_line() {
        let record = QuestionRecord::parse_line(17, LINE).unwrap();

        assert_eq!(record.id(), 17);
        assert_eq!(record.difficulty(), 5);
        assert_eq!(record.question(), "How is a play on words commonly described?");
        assert_eq!(record.answer(0), "Pan");
        assert_eq!(record.answer(3), "Pun");
        assert_eq!(record.correct_answer(), 3);
        assert_eq!(record.answer_count(), 4);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let record = QuestionRecord::parse_line(1, "  1 ;  Q ; A ; B ; C ; D ;  0  ").unwrap();

        assert_eq!(record.question(), "Q");
        assert_eq!(record.answer(1), "B");
        assert_eq!(record.correct_answer(), 0);
    }

    #[test]
    fn test_parse_wrong_field_count() {
        assert_eq!(
            QuestionRecord::parse_line(1, "1; Q; A; B; C; 0"),
            Err(ParseError::FieldCount(6))
        );
        assert_eq!(
            QuestionRecord::parse_line(1, ""),
            Err(ParseError::FieldCount(1))
        );
    }

    #[test]
    fn test_parse_invalid_difficulty() {
        assert_eq!(
            QuestionRecord::parse_line(1, "hard; Q; A; B; C; D; 0"),
            Err(ParseError::InvalidDifficulty("hard".to_string()))
        );
    }

    #[test]
    fn test_parse_difficulty_out_of_range() {
        assert_eq!(
            QuestionRecord::parse_line(1, "0; Q; A; B; C; D; 0"),
            Err(ParseError::DifficultyOutOfRange(0))
        );
        assert_eq!(
            QuestionRecord::parse_line(1, "9; Q; A; B; C; D; 0"),
            Err(ParseError::DifficultyOutOfRange(9))
        );
    }

    #[test]
    fn test_parse_invalid_correct_answer() {
        assert_eq!(
            QuestionRecord::parse_line(1, "1; Q; A; B; C; D; x"),
            Err(ParseError::InvalidCorrectAnswer("x".to_string()))
        );
    }

    #[test]
    fn test_parse_correct_answer_out_of_range() {
        assert_eq!(
            QuestionRecord::parse_line(1, "1; Q; A; B; C; D; 4"),
            Err(ParseError::CorrectAnswerOutOfRange(4))
        );
        assert_eq!(
            QuestionRecord::parse_line(1, "1; Q; A; B; C; D; -1"),
            Err(ParseError::CorrectAnswerOutOfRange(-1))
        );
    }

    #[test]
    fn test_parse_empty_text_field() {
        assert_eq!(
            QuestionRecord::parse_line(1, "1; Q; A; ; C; D; 0"),
            Err(ParseError::EmptyField)
        );
        assert_eq!(
            QuestionRecord::parse_line(1, "1; ; A; B; C; D; 0"),
            Err(ParseError::EmptyField)
        );
    }

    #[test]
    fn test_answer_out_of_range_is_empty() {
        let record = QuestionRecord::parse_line(1, LINE).unwrap();

        assert_eq!(record.answer(4), "");
    }
}
