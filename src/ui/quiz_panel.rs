//! Quiz question, result and review rendering

use crate::course::quiz::option_label;
use crate::course::{AnswerKey, PASS_THRESHOLD, QuizOutcome, ReviewItem};

/// Render one question for interactive answering
pub fn render_question(key: &AnswerKey, index: usize, width: usize) -> String {
    let Some(question) = key.questions.get(index) else {
        return String::new();
    };
    let mut out = format!(
        "Question {} of {}\n{}\n",
        index + 1,
        key.len(),
        textwrap::fill(&question.prompt, width)
    );
    for (i, option) in question.options.iter().enumerate() {
        out.push_str(&format!("  {}) {}\n", option_label(i), option));
    }
    out
}

fn labelled(letter: Option<char>, text: Option<&str>) -> String {
    match (letter, text) {
        (Some(letter), Some(text)) => format!("{}) {}", letter, text),
        (Some(letter), None) => letter.to_string(),
        (None, _) => "-".to_string(),
    }
}

/// Render the score and per-question feedback
pub fn render_outcome(key: &AnswerKey, outcome: &QuizOutcome) -> String {
    let mut out = format!(
        "Your score: {}% ({} of {} correct)\n",
        outcome.score,
        outcome.correct_count(),
        key.len()
    );

    if outcome.passed {
        out.push_str(&format!("Congratulations! You passed the {}.\n", key.section));
    } else {
        out.push_str(&format!(
            "You scored below {}%. Please retake the quiz.\n",
            PASS_THRESHOLD
        ));
    }

    out.push('\n');
    for (i, question) in key.questions.iter().enumerate() {
        let ok = outcome.feedback.get(&question.id).copied().unwrap_or(false);
        let marker = if ok { "\u{2713} Correct!" } else { "\u{2717} Wrong Answer" }; // ✓ or ✗
        out.push_str(&format!("  Q{} {}\n", i + 1, marker));
    }

    out
}

/// Render the answer review with explanations
pub fn render_review(items: &[ReviewItem], width: usize) -> String {
    let indent = "    ";
    let options = textwrap::Options::new(width).initial_indent(indent).subsequent_indent(indent);
    let mut out = String::new();

    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, textwrap::fill(&item.prompt, width)));
        let chosen = labelled(item.chosen, item.chosen_text.as_deref());
        let correct = labelled(Some(item.correct), item.correct_text.as_deref());
        out.push_str(&format!("{}Your answer: {}\n", indent, chosen));
        out.push_str(&format!("{}Correct answer: {}\n", indent, correct));
        out.push_str(&textwrap::fill(&item.explanation, &options));
        out.push_str("\n\n");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::quiz;
    use std::collections::HashMap;

    fn key() -> AnswerKey {
        AnswerKey::new("Module 1 Quiz")
            .question(
                "Module 1 Q1",
                "How many bits does an IPv4 address have?",
                &["64", "128", "32", "256"],
                'C',
                "32 bits.",
            )
            .question("Module 1 Q2", "Which class is 10.0.0.1?", &["Class A", "Class B"], 'A', "Class A.")
    }

    #[test]
    fn outcome_shows_score_and_feedback() {
        let key = key();
        let submission = HashMap::from([("Module 1 Q1".to_string(), 'C')]);
        let outcome = quiz::score(&key, &submission);

        let text = render_outcome(&key, &outcome);
        assert!(text.contains("Your score: 50% (1 of 2 correct)"));
        assert!(text.contains("Please retake the quiz"));
        assert!(text.contains("Q1 \u{2713} Correct!"));
        assert!(text.contains("Q2 \u{2717} Wrong Answer"));
    }

    #[test]
    fn review_lists_answers_and_explanations() {
        let items = vec![ReviewItem {
            prompt: "Which class is 10.0.0.1?".into(),
            chosen: None,
            chosen_text: None,
            correct: 'A',
            correct_text: Some("Class A".into()),
            explanation: "Class A.".into(),
        }];
        let text = render_review(&items, 60);
        assert!(text.contains("1. Which class is 10.0.0.1?"));
        assert!(text.contains("Your answer: -"));
        assert!(text.contains("Correct answer: A) Class A"));
        assert!(text.contains("    Class A."));
    }

    #[test]
    fn question_header_counts_questions() {
        let text = render_question(&key(), 1, 60);
        assert!(text.starts_with("Question 2 of 2"));
        assert_eq!(render_question(&key(), 5, 60), "");
    }

    #[test]
    fn question_lists_labelled_choices() {
        let catalog = crate::course::ccna_catalog();
        let key = catalog.quiz("Module 1 Quiz").unwrap();
        let text = render_question(key, 0, 80);
        assert!(text.contains("A) Network part"));
        assert!(text.contains("B) Host part"));
        assert!(text.contains("D) Gateway"));
    }

    #[test]
    fn review_shows_the_chosen_option_text() {
        let key = key();
        let mut book = crate::course::QuizBook::default();
        book.answer(&key, "Module 1 Q1", 'a').unwrap();
        book.submit(&key);

        let text = render_review(&book.review(&key).unwrap(), 60);
        assert!(text.contains("Your answer: A) 64"));
        assert!(text.contains("Correct answer: C) 32"));
        assert!(text.contains("Your answer: -"));
    }
}
