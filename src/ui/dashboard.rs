//! Admin dashboard tables

use crate::admin::{self, DashboardSummary};
use crate::backend::LearnerOverview;

use super::curriculum::progress_bar;

/// Render the headline numbers
pub fn render_summary(summary: &DashboardSummary) -> String {
    format!(
        "Learners:        {}\nCompleted all:   {}\nIncomplete:      {}\nAverage progress: {:.1}%\nTotal logins:    {}\n",
        summary.learners,
        summary.completed_all,
        summary.learners - summary.completed_all,
        summary.average_progress,
        summary.total_logins,
    )
}

fn last_login_text(learner: &LearnerOverview) -> String {
    match admin::last_login(learner) {
        Some(entry) => {
            let when = entry
                .timestamp()
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| entry.time.clone());
            format!("{} from {} ({})", when, entry.location, entry.ip)
        }
        None => "No logins".to_string(),
    }
}

/// Render one row per learner
pub fn render_table(rows: &[&LearnerOverview]) -> String {
    if rows.is_empty() {
        return "No user data available.\n".to_string();
    }

    let mut out = format!("{:<20} {:<28} {:>8} {:>7}  {}\n", "Name", "Email", "Progress", "Logins", "Last login");
    for learner in rows {
        out.push_str(&format!(
            "{:<20} {:<28} {:>7}% {:>7}  {}\n",
            learner.name.as_deref().unwrap_or("-"),
            learner.email.as_deref().unwrap_or("-"),
            admin::highest_progress(learner),
            learner.login_history.len(),
            last_login_text(learner),
        ));
    }
    out
}

/// Render the drill-down for one learner
pub fn render_detail(learner: &LearnerOverview) -> String {
    let split = admin::completion_split(learner);
    let mut out = format!(
        "{} <{}>\nProgress: {}\nSections: {} completed, {} incomplete\nLast login: {}\n",
        learner.name.as_deref().unwrap_or("-"),
        learner.email.as_deref().unwrap_or("-"),
        progress_bar(admin::highest_progress(learner), 30),
        split.completed,
        split.incomplete,
        last_login_text(learner),
    );

    let averages = admin::module_averages(learner);
    if !averages.is_empty() {
        out.push_str("\nAverage progress by module\n");
        for avg in averages {
            out.push_str(&format!("  {:<12} {}\n", avg.module, progress_bar(avg.average, 20)));
        }
    }

    if !learner.course_progress.is_empty() {
        out.push_str("\nSections\n");
        for record in &learner.course_progress {
            let marker = if record.completed { "\u{2713}" } else { "○" };
            out.push_str(&format!(
                "  {} {} / {} ({}%)\n",
                marker, record.module_name, record.section_name, record.progress_percentage
            ));
        }
    }

    out
}
