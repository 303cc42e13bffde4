//! Learner-facing course state
//!
//! The player owns the progress store and quiz answers for one session and
//! turns interactions into store updates plus queued backend writes. Local
//! state always changes first; the write is queued afterwards and its outcome
//! never feeds back.

use super::catalog::{Catalog, Section, SectionKind};
use super::content::FINAL_QUIZ;
use super::error::CourseError;
use super::progress::{ProgressRecord, ProgressStore};
use super::quiz::{AnswerKey, QuizBook, QuizOutcome, ReviewItem};
use super::unlock;
use crate::backend::{BackendError, ProgressSynchronizer};

/// One row of the course sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionStatus<'a> {
    pub section: &'a Section,
    pub unlocked: bool,
    pub completed: bool,
}

/// Result of completing a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion<'a> {
    /// Course percentage after the completion
    pub progress: u8,
    /// Section that became active, if any
    pub next: Option<&'a Section>,
}

/// Course state for a single learner session
pub struct CoursePlayer<'a> {
    catalog: &'a Catalog,
    store: ProgressStore,
    quizzes: QuizBook,
    active: Option<&'a Section>,
    sync: ProgressSynchronizer,
}

impl<'a> CoursePlayer<'a> {
    /// Create a player with an empty store
    pub fn new(catalog: &'a Catalog, sync: ProgressSynchronizer) -> Self {
        Self {
            catalog,
            store: ProgressStore::new(),
            quizzes: QuizBook::default(),
            active: None,
            sync,
        }
    }

    /// Hydrate the store from a backend fetch
    ///
    /// On error the store stays empty and the learner starts with only the
    /// first section unlocked.
    pub fn hydrate(&mut self, fetched: Result<Vec<ProgressRecord>, BackendError>) {
        match fetched {
            Ok(records) => self.store.hydrate(self.catalog, &records),
            Err(e) => {
                tracing::warn!("Error fetching progress: {}", e);
                self.store = ProgressStore::new();
            }
        }
    }

    /// Course catalog
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Progress store
    pub fn store(&self) -> &ProgressStore {
        &self.store
    }

    /// Current course percentage
    pub fn progress(&self) -> u8 {
        self.store.completion_ratio(self.catalog)
    }

    /// Whether a section may be opened
    pub fn is_unlocked(&self, section: &str) -> bool {
        unlock::is_unlocked(section, self.catalog, &self.store)
    }

    /// Section currently open
    pub fn active(&self) -> Option<&'a Section> {
        self.active
    }

    /// Sidebar rows in course order
    pub fn sidebar(&self) -> Vec<SectionStatus<'a>> {
        self.catalog
            .flattened_sections()
            .into_iter()
            .map(|section| SectionStatus {
                section,
                unlocked: self.is_unlocked(&section.name),
                completed: self.store.is_completed(&section.name),
            })
            .collect()
    }

    fn lookup(&self, name: &str) -> Result<&'a Section, CourseError> {
        self.catalog.section(name).ok_or_else(|| CourseError::UnknownSection(name.to_string()))
    }

    /// Open a section; locked sections are refused
    pub fn open(&mut self, name: &str) -> Result<&'a Section, CourseError> {
        let section = self.lookup(name)?;
        if !self.is_unlocked(name) {
            return Err(CourseError::SectionLocked(name.to_string()));
        }
        self.active = Some(section);
        Ok(section)
    }

    /// Open the furthest section the learner can work on
    pub fn resume(&mut self) -> Option<&'a Section> {
        self.active = unlock::resume_point(self.catalog, &self.store);
        self.active
    }

    fn quiz_key(&self, quiz: &str) -> Result<&'a AnswerKey, CourseError> {
        let section = self.lookup(quiz)?;
        if section.kind != SectionKind::Quiz {
            return Err(CourseError::NotAQuiz(quiz.to_string()));
        }
        self.catalog.quiz(quiz).ok_or_else(|| CourseError::NotAQuiz(quiz.to_string()))
    }

    /// Answer a question; returns whether the answer is correct
    pub fn answer(&mut self, quiz: &str, question_id: &str, option: char) -> Result<bool, CourseError> {
        if !self.is_unlocked(quiz) {
            return Err(CourseError::SectionLocked(quiz.to_string()));
        }
        let key = self.quiz_key(quiz)?;
        self.quizzes.answer(key, question_id, option)
    }

    /// Score a quiz
    ///
    /// A passing final quiz also queues the score submission, once per call.
    pub fn submit_quiz(&mut self, quiz: &str) -> Result<QuizOutcome, CourseError> {
        if !self.is_unlocked(quiz) {
            return Err(CourseError::SectionLocked(quiz.to_string()));
        }
        let key = self.quiz_key(quiz)?;
        let outcome = self.quizzes.submit(key).clone();

        if quiz == FINAL_QUIZ {
            if outcome.passed {
                self.sync.submit_final_score(self.sync.username(), outcome.score);
            } else {
                tracing::info!("Score below {}% - final quiz result not saved", super::PASS_THRESHOLD);
            }
        }

        Ok(outcome)
    }

    /// Clear this quiz's answers and outcome
    pub fn retake(&mut self, quiz: &str) -> Result<(), CourseError> {
        let key = self.quiz_key(quiz)?;
        self.quizzes.retake(key);
        Ok(())
    }

    /// Last outcome of a quiz
    pub fn outcome(&self, quiz: &str) -> Option<&QuizOutcome> {
        self.quizzes.outcome(quiz)
    }

    /// Feedback recorded for a question
    pub fn feedback(&self, question_id: &str) -> Option<bool> {
        self.quizzes.feedback(question_id)
    }

    /// Review a submitted quiz
    pub fn review(&self, quiz: &str) -> Result<Vec<ReviewItem>, CourseError> {
        let key = self.quiz_key(quiz)?;
        self.quizzes.review(key)
    }

    /// Mark a section completed and move to the next one
    ///
    /// The section must be unlocked. A quiz must have a passing outcome in
    /// this session unless it was already completed.
    pub fn complete(&mut self, name: &str) -> Result<Completion<'a>, CourseError> {
        let section = self.lookup(name)?;
        if !self.is_unlocked(name) {
            return Err(CourseError::SectionLocked(name.to_string()));
        }

        if section.kind == SectionKind::Quiz && !self.store.is_completed(name) {
            match self.quizzes.outcome(name) {
                None => return Err(CourseError::QuizNotSubmitted(name.to_string())),
                Some(outcome) if !outcome.passed => {
                    return Err(CourseError::QuizNotPassed {
                        section: name.to_string(),
                        score: outcome.score,
                    });
                }
                Some(_) => {}
            }
        }

        self.store.mark_completed(name);
        let progress = self.progress();
        self.sync.save(&section.module, &section.name, true, progress);

        let next = self.catalog.next_after(name);
        if next.is_some() {
            self.active = next;
        }

        Ok(Completion { progress, next })
    }

    /// Complete the section currently open
    pub fn complete_active(&mut self) -> Result<Completion<'a>, CourseError> {
        let active = self.active.ok_or(CourseError::NoActiveSection)?;
        self.complete(&active.name)
    }
}
