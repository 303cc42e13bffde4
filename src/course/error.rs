//! Error types for course progression

use thiserror::Error;

/// Errors raised by learner interactions with the course
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CourseError {
    /// Section name is not part of the catalog
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Section cannot be opened until the previous one is completed
    #[error("Section is locked: {0}. Complete the previous section first")]
    SectionLocked(String),

    /// Section is not a quiz
    #[error("Not a quiz: {0}")]
    NotAQuiz(String),

    /// Quiz must be passed before the section can be completed
    #[error("{section} not passed (score {score}%). Retake the quiz")]
    QuizNotPassed {
        /// Quiz section name
        section: String,
        /// Last submitted score
        score: u8,
    },

    /// Quiz has not been submitted yet
    #[error("{0} has not been submitted")]
    QuizNotSubmitted(String),

    /// Question does not belong to the quiz
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    /// Question already has an answer until the quiz is retaken
    #[error("{0} is already answered")]
    AlreadyAnswered(String),

    /// No section is currently open
    #[error("No section is open")]
    NoActiveSection,
}
