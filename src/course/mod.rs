//! Course progression: catalog, completion state, gating and quizzes

pub mod catalog;
pub mod content;
pub mod error;
pub mod player;
pub mod progress;
pub mod quiz;
pub mod unlock;

pub use catalog::{Catalog, Module, Section, SectionKind};
pub use content::ccna_catalog;
pub use error::CourseError;
pub use player::{Completion, CoursePlayer, SectionStatus};
pub use progress::{ProgressRecord, ProgressStore};
pub use quiz::{AnswerKey, PASS_THRESHOLD, QuizBook, QuizOutcome, ReviewItem};
pub use unlock::is_unlocked;
