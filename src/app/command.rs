//! Parsing of quiz answers typed on the command line

use std::str::FromStr;

use crate::course::AnswerKey;

/// A `QUESTION=OPTION` pair given with `--answer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerArg {
    /// Question reference: full id ("Module 1 Q3"), short id ("Q3") or number ("3")
    pub question: String,
    /// Chosen option letter
    pub option: char,
}

impl FromStr for AnswerArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (question, option) =
            s.rsplit_once('=').ok_or_else(|| format!("Expected QUESTION=OPTION, got: {}", s))?;
        let question = question.trim();
        if question.is_empty() {
            return Err(format!("Missing question in: {}", s));
        }
        let option = parse_option(option).ok_or_else(|| format!("Invalid option in: {}", s))?;
        Ok(Self { question: question.to_string(), option })
    }
}

impl AnswerArg {
    /// Resolve the question reference to a full question id within `key`
    pub fn resolve(&self, key: &AnswerKey) -> Option<String> {
        if key.contains(&self.question) {
            return Some(self.question.clone());
        }

        if let Ok(n) = self.question.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| key.questions.get(i)).map(|q| q.id.clone());
        }

        let suffix = format!(" {}", self.question.to_uppercase());
        key.questions.iter().find(|q| q.id.ends_with(&suffix)).map(|q| q.id.clone())
    }
}

/// A single option letter, case-insensitive
fn parse_option(input: &str) -> Option<char> {
    let mut chars = input.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

/// A line typed during an interactive quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizInput {
    /// Choose an option
    Answer(char),
    /// Leave the question unanswered
    Skip,
    /// Stop answering and submit what is there
    Submit,
    /// Abandon the quiz
    Quit,
}

/// Result of parsing a quiz input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// Successfully parsed input
    Ok(QuizInput),
    /// Input not understood
    Invalid(String),
}

/// Parse one interactive quiz line
pub fn parse_quiz_input(input: &str) -> ParseResult {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "" | "s" | "skip" => ParseResult::Ok(QuizInput::Skip),
        ":submit" | ":s" => ParseResult::Ok(QuizInput::Submit),
        ":q" | ":quit" | "quit" => ParseResult::Ok(QuizInput::Quit),
        _ => match parse_option(input) {
            Some(c) => ParseResult::Ok(QuizInput::Answer(c)),
            None => ParseResult::Invalid(input.to_string()),
        },
    }
}

/// Parse a yes/no reply, defaulting to no
pub fn parse_confirm(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key() -> AnswerKey {
        AnswerKey::new("Module 3/2 Quiz")
            .question("Module 3 Q6", "", &[], 'B', "")
            .question("Module 3 Q7", "", &[], 'B', "")
    }

    #[test]
    fn parses_answer_args() {
        let arg: AnswerArg = "Q6=b".parse().unwrap();
        assert_eq!(arg, AnswerArg { question: "Q6".into(), option: 'B' });

        let arg: AnswerArg = "Module 3 Q7 = C".parse().unwrap();
        assert_eq!(arg.question, "Module 3 Q7");
        assert_eq!(arg.option, 'C');
    }

    #[test]
    fn rejects_malformed_answer_args() {
        assert!("Q1".parse::<AnswerArg>().is_err());
        assert!("=B".parse::<AnswerArg>().is_err());
        assert!("Q1=BC".parse::<AnswerArg>().is_err());
        assert!("Q1=3".parse::<AnswerArg>().is_err());
    }

    #[test]
    fn resolves_full_short_and_numeric_references() {
        let key = key();
        let resolve = |s: &str| s.parse::<AnswerArg>().unwrap().resolve(&key);

        assert_eq!(resolve("Module 3 Q6=B"), Some("Module 3 Q6".into()));
        assert_eq!(resolve("q7=B"), Some("Module 3 Q7".into()));
        assert_eq!(resolve("2=B"), Some("Module 3 Q7".into()));
        assert_eq!(resolve("0=B"), None);
        assert_eq!(resolve("Q1=B"), None);
    }

    #[test]
    fn parses_quiz_input() {
        assert_eq!(parse_quiz_input(" c "), ParseResult::Ok(QuizInput::Answer('C')));
        assert_eq!(parse_quiz_input(""), ParseResult::Ok(QuizInput::Skip));
        assert_eq!(parse_quiz_input(":submit"), ParseResult::Ok(QuizInput::Submit));
        assert_eq!(parse_quiz_input(":q"), ParseResult::Ok(QuizInput::Quit));
        assert_eq!(parse_quiz_input("maybe"), ParseResult::Invalid("maybe".into()));
    }

    #[test]
    fn confirm_defaults_to_no() {
        assert!(parse_confirm("Y"));
        assert!(!parse_confirm(""));
        assert!(!parse_confirm("nope"));
    }
}
