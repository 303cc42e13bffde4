//! Course completion certificate

use chrono::{Local, NaiveDate};

use crate::course::content::COURSE_TITLE;

const RULE_WIDTH: usize = 60;

/// Today's date in the local timezone
pub fn completion_date() -> NaiveDate {
    Local::now().date_naive()
}

fn centered(text: &str) -> String {
    format!("{:^width$}\n", text, width = RULE_WIDTH)
}

/// Render the certificate for a learner
///
/// `score` is the passing final quiz score, if one was recorded.
pub fn render(learner: &str, score: Option<u8>, date: NaiveDate) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let score = score.map(|s| format!("{}%", s)).unwrap_or_else(|| "not recorded".to_string());

    let mut out = format!("{}\n", rule);
    out.push_str(&centered("Certificate of Achievement"));
    out.push('\n');
    out.push_str(&centered("This Certificate is Proudly Presented To"));
    out.push('\n');
    out.push_str(&centered(learner));
    out.push('\n');
    out.push_str(&textwrap::fill(
        "has successfully completed and demonstrated exceptional proficiency in the comprehensive course",
        RULE_WIDTH,
    ));
    out.push_str("\n\n");
    out.push_str(&centered(COURSE_TITLE));
    out.push('\n');
    out.push_str(&format!("Final Assessment Score: {}\n", score));
    out.push_str(&format!("Completion Date:        {}\n", date.format("%B %-d, %Y")));
    out.push_str(&rule);
    out.push('\n');
    out
}
