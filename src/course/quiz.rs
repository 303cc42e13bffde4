//! Quiz answer keys, scoring and in-memory submissions

use std::collections::{BTreeMap, HashMap};

use super::error::CourseError;

/// Minimum score (inclusive) needed to pass a quiz
pub const PASS_THRESHOLD: u8 = 60;

/// A single quiz question with its correct option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Question identifier (e.g. "Module 1 Q3")
    pub id: String,
    /// Question text
    pub prompt: String,
    /// Option texts, labelled A, B, C... in order
    pub options: Vec<String>,
    /// Correct option letter
    pub answer: char,
    /// Shown in the review after submission
    pub explanation: String,
}

impl Question {
    /// Text of the option labelled `letter`
    pub fn option_text(&self, letter: char) -> Option<&str> {
        let index = (letter.to_ascii_uppercase() as u32).checked_sub('A' as u32)?;
        self.options.get(index as usize).map(String::as_str)
    }
}

/// Letter labelling the option at `index` ('A' for 0)
pub fn option_label(index: usize) -> char {
    u32::try_from(index)
        .ok()
        .and_then(|i| char::from_u32('A' as u32 + i))
        .unwrap_or('?')
}

/// Answer key for one quiz section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerKey {
    /// Quiz section name (e.g. "Module 1 Quiz")
    pub section: String,
    /// Questions in display order
    pub questions: Vec<Question>,
}

impl AnswerKey {
    /// Create an empty key for a quiz section
    pub fn new(section: impl Into<String>) -> Self {
        Self { section: section.into(), questions: Vec::new() }
    }

    /// Add a question
    pub fn question(
        mut self,
        id: impl Into<String>,
        prompt: impl Into<String>,
        options: &[&str],
        answer: char,
        explanation: impl Into<String>,
    ) -> Self {
        self.questions.push(Question {
            id: id.into(),
            prompt: prompt.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer,
            explanation: explanation.into(),
        });
        self
    }

    /// Find a question by id
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Whether a question id belongs to this quiz
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of questions
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Whether the key has no questions
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Result of scoring a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    /// Percentage score, 0-100
    pub score: u8,
    /// Whether the score reached [`PASS_THRESHOLD`]
    pub passed: bool,
    /// Per-question correctness
    pub feedback: BTreeMap<String, bool>,
}

impl QuizOutcome {
    /// Number of correctly answered questions
    pub fn correct_count(&self) -> usize {
        self.feedback.values().filter(|&&ok| ok).count()
    }
}

/// `round(100 * part / total)` with halves rounded up; 0 when `total` is 0
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total);
    ((200 * part + total) / (2 * total)) as u8
}

/// Score a submission against an answer key
///
/// Unanswered questions count as incorrect. Answers to questions outside the
/// key are ignored.
pub fn score(key: &AnswerKey, submission: &HashMap<String, char>) -> QuizOutcome {
    let feedback: BTreeMap<String, bool> = key
        .questions
        .iter()
        .map(|q| {
            let ok = submission.get(&q.id).is_some_and(|&a| a.eq_ignore_ascii_case(&q.answer));
            (q.id.clone(), ok)
        })
        .collect();

    let correct = feedback.values().filter(|&&ok| ok).count();
    let score = percentage(correct, key.len());

    QuizOutcome { score, passed: score >= PASS_THRESHOLD, feedback }
}

/// One line of the post-submission review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    /// Question text
    pub prompt: String,
    /// Option the learner picked, if any
    pub chosen: Option<char>,
    /// Text of the picked option
    pub chosen_text: Option<String>,
    /// Correct option
    pub correct: char,
    /// Text of the correct option
    pub correct_text: Option<String>,
    /// Explanation text
    pub explanation: String,
}

/// Answers and outcomes for every quiz in the current session
///
/// Nothing here is persisted; only the resulting score reaches the backend.
#[derive(Debug, Clone, Default)]
pub struct QuizBook {
    /// Selected option per question id
    answers: HashMap<String, char>,
    /// Immediate per-question feedback
    feedback: HashMap<String, bool>,
    /// Last submitted outcome per quiz section
    outcomes: HashMap<String, QuizOutcome>,
}

impl QuizBook {
    /// Record an answer and return whether it is correct
    ///
    /// An answered question stays locked until the quiz is retaken.
    pub fn answer(
        &mut self,
        key: &AnswerKey,
        question_id: &str,
        option: char,
    ) -> Result<bool, CourseError> {
        let question = key
            .get(question_id)
            .ok_or_else(|| CourseError::UnknownQuestion(question_id.to_string()))?;

        if self.answers.contains_key(question_id) {
            return Err(CourseError::AlreadyAnswered(question_id.to_string()));
        }

        let option = option.to_ascii_uppercase();
        let correct = option == question.answer;
        self.answers.insert(question_id.to_string(), option);
        self.feedback.insert(question_id.to_string(), correct);
        Ok(correct)
    }

    /// Answers that belong to `key`
    pub fn submission(&self, key: &AnswerKey) -> HashMap<String, char> {
        key.questions
            .iter()
            .filter_map(|q| self.answers.get(&q.id).map(|&a| (q.id.clone(), a)))
            .collect()
    }

    /// Score the current answers for `key` and remember the outcome
    pub fn submit(&mut self, key: &AnswerKey) -> &QuizOutcome {
        let outcome = score(key, &self.submission(key));
        self.feedback.extend(outcome.feedback.iter().map(|(id, &ok)| (id.clone(), ok)));
        self.outcomes.insert(key.section.clone(), outcome);
        &self.outcomes[&key.section]
    }

    /// Clear answers, feedback and outcome for this quiz only
    pub fn retake(&mut self, key: &AnswerKey) {
        for q in &key.questions {
            self.answers.remove(&q.id);
            self.feedback.remove(&q.id);
        }
        self.outcomes.remove(&key.section);
    }

    /// Last outcome for a quiz section
    pub fn outcome(&self, section: &str) -> Option<&QuizOutcome> {
        self.outcomes.get(section)
    }

    /// Feedback recorded for a question
    pub fn feedback(&self, question_id: &str) -> Option<bool> {
        self.feedback.get(question_id).copied()
    }

    /// Selected option for a question
    pub fn chosen(&self, question_id: &str) -> Option<char> {
        self.answers.get(question_id).copied()
    }

    /// Review of a submitted quiz
    pub fn review(&self, key: &AnswerKey) -> Result<Vec<ReviewItem>, CourseError> {
        if !self.outcomes.contains_key(&key.section) {
            return Err(CourseError::QuizNotSubmitted(key.section.clone()));
        }

        Ok(key
            .questions
            .iter()
            .map(|q| {
                let chosen = self.chosen(&q.id);
                ReviewItem {
                    prompt: q.prompt.clone(),
                    chosen,
                    chosen_text: chosen.and_then(|c| q.option_text(c)).map(String::from),
                    correct: q.answer,
                    correct_text: q.option_text(q.answer).map(String::from),
                    explanation: q.explanation.clone(),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    const OPTIONS: [&str; 4] = ["one", "two", "three", "four"];

    fn key(section: &str, prefix: &str, answers: &[char]) -> AnswerKey {
        answers.iter().enumerate().fold(AnswerKey::new(section), |key, (i, &a)| {
            key.question(format!("{} Q{}", prefix, i + 1), format!("Question {}", i + 1), &OPTIONS, a, "")
        })
    }

    fn module1() -> AnswerKey {
        key("Module 1 Quiz", "Module 1", &['B', 'C', 'A', 'C', 'C'])
    }

    fn submission(pairs: &[(&str, char)]) -> HashMap<String, char> {
        pairs.iter().map(|&(id, a)| (id.to_string(), a)).collect()
    }

    #[test]
    fn four_of_five_passes_with_80() {
        let sub = submission(&[
            ("Module 1 Q1", 'B'),
            ("Module 1 Q2", 'C'),
            ("Module 1 Q3", 'X'),
            ("Module 1 Q4", 'C'),
            ("Module 1 Q5", 'C'),
        ]);
        let outcome = score(&module1(), &sub);
        assert_eq!(outcome.score, 80);
        assert!(outcome.passed);
        assert_eq!(outcome.feedback.get("Module 1 Q3"), Some(&false));
        assert_eq!(outcome.correct_count(), 4);
    }

    #[test]
    fn two_of_five_fails_with_40() {
        let sub = submission(&[("Module 1 Q1", 'B'), ("Module 1 Q2", 'C'), ("Module 1 Q3", 'D')]);
        let outcome = score(&module1(), &sub);
        assert_eq!(outcome.score, 40);
        assert!(!outcome.passed);
    }

    #[test]
    fn unanswered_questions_count_as_incorrect() {
        let outcome = score(&module1(), &HashMap::new());
        assert_eq!(outcome.score, 0);
        assert_eq!(outcome.feedback.len(), 5);
        assert!(outcome.feedback.values().all(|ok| !ok));
    }

    #[test]
    fn threshold_is_inclusive() {
        let sub = submission(&[("Module 1 Q1", 'B'), ("Module 1 Q2", 'C'), ("Module 1 Q3", 'A')]);
        let outcome = score(&module1(), &sub);
        assert_eq!(outcome.score, 60);
        assert!(outcome.passed);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(9, 45), 20);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn answered_question_is_locked_until_retake() {
        let key = module1();
        let mut book = QuizBook::default();

        assert_eq!(book.answer(&key, "Module 1 Q1", 'b'), Ok(true));
        assert_eq!(
            book.answer(&key, "Module 1 Q1", 'C'),
            Err(CourseError::AlreadyAnswered("Module 1 Q1".into()))
        );

        book.retake(&key);
        assert_eq!(book.answer(&key, "Module 1 Q1", 'C'), Ok(false));
    }

    #[test]
    fn unknown_question_is_rejected() {
        let mut book = QuizBook::default();
        assert_eq!(
            book.answer(&module1(), "Module 2 Q1", 'B'),
            Err(CourseError::UnknownQuestion("Module 2 Q1".into()))
        );
    }

    #[test]
    fn retake_leaves_other_quizzes_untouched() {
        let m1 = module1();
        let m2 = key("Module 2 Quiz", "Module 2", &['B', 'C', 'C', 'B', 'B']);
        let mut book = QuizBook::default();

        book.answer(&m1, "Module 1 Q1", 'A').unwrap();
        book.answer(&m2, "Module 2 Q1", 'B').unwrap();
        book.submit(&m1);
        book.submit(&m2);

        book.retake(&m1);

        assert!(book.outcome("Module 1 Quiz").is_none());
        assert!(book.chosen("Module 1 Q1").is_none());
        assert!(book.feedback("Module 1 Q1").is_none());
        assert_eq!(book.feedback("Module 2 Q1"), Some(true));
        assert_eq!(book.chosen("Module 2 Q1"), Some('B'));
        assert!(book.outcome("Module 2 Quiz").is_some());
    }

    #[test]
    fn quizzes_sharing_a_prefix_retake_independently() {
        let first = key("Module 3 Quiz", "Module 3", &['B', 'B']);
        let second = AnswerKey::new("Module 3/2 Quiz").question("Module 3 Q6", "Q6", &OPTIONS, 'B', "");
        let mut book = QuizBook::default();

        book.answer(&first, "Module 3 Q1", 'B').unwrap();
        book.answer(&second, "Module 3 Q6", 'B').unwrap();
        book.retake(&first);

        assert_eq!(book.chosen("Module 3 Q6"), Some('B'));
    }

    #[test]
    fn review_requires_submission() {
        let key = module1();
        let mut book = QuizBook::default();
        assert!(matches!(book.review(&key), Err(CourseError::QuizNotSubmitted(_))));

        book.answer(&key, "Module 1 Q2", 'A').unwrap();
        book.submit(&key);
        let review = book.review(&key).unwrap();
        assert_eq!(review.len(), 5);
        assert_eq!(review[1].chosen, Some('A'));
        assert_eq!(review[1].correct, 'C');
        assert_eq!(review[1].chosen_text.as_deref(), Some("one"));
        assert_eq!(review[1].correct_text.as_deref(), Some("three"));
        assert_eq!(review[0].chosen, None);
        assert_eq!(review[0].chosen_text, None);
    }

    #[test]
    fn options_are_labelled_from_a() {
        let key = module1();
        let q = &key.questions[0];
        assert_eq!(q.option_text('b'), Some("two"));
        assert_eq!(q.option_text('D'), Some("four"));
        assert_eq!(q.option_text('E'), None);
        assert_eq!(q.option_text('1'), None);
        assert_eq!(option_label(0), 'A');
        assert_eq!(option_label(3), 'D');
    }

    proptest! {
        #[test]
        fn score_matches_formula(answers in proptest::collection::vec(
            prop_oneof![Just('A'), Just('B'), Just('C'), Just('D')], 1..12),
            picks in proptest::collection::vec(
            prop_oneof![Just('A'), Just('B'), Just('C'), Just('D'), Just('X')], 12)) {
            let key = key("Quiz", "P", &answers);
            let sub: HashMap<String, char> = answers
                .iter()
                .enumerate()
                .map(|(i, _)| (format!("P Q{}", i + 1), picks[i]))
                .collect();
            let correct = answers.iter().zip(&picks).filter(|(a, p)| a == p).count();
            let expected = (100.0 * correct as f64 / answers.len() as f64 + 0.5).floor() as u8;

            let outcome = score(&key, &sub);
            prop_assert_eq!(outcome.score, expected);
            prop_assert_eq!(outcome.passed, expected >= PASS_THRESHOLD);
        }
    }
}
