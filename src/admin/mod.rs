//! Admin reporting over every learner's progress and login history
//!
//! Everything here is a pure function of the backend's "all learners"
//! payload. A learner's progress is the highest percentage they have reached.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::backend::{LearnerOverview, LoginEntry};

/// Average progress within one module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleAverage {
    pub module: String,
    pub average: u8,
}

/// Completed vs incomplete progress records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionSplit {
    pub completed: usize,
    pub incomplete: usize,
}

/// Highest progress percentage recorded for a learner; 0 without records
pub fn highest_progress(learner: &LearnerOverview) -> u8 {
    learner.course_progress.iter().map(|p| p.progress_percentage).max().unwrap_or(0)
}

/// Average progress per module, in the order modules first appear
pub fn module_averages(learner: &LearnerOverview) -> Vec<ModuleAverage> {
    let mut totals: Vec<(String, u32, u32)> = Vec::new();

    for record in &learner.course_progress {
        let pct = u32::from(record.progress_percentage);
        match totals.iter_mut().find(|(m, _, _)| *m == record.module_name) {
            Some((_, total, count)) => {
                *total += pct;
                *count += 1;
            }
            None => totals.push((record.module_name.clone(), pct, 1)),
        }
    }

    totals
        .into_iter()
        .map(|(module, total, count)| ModuleAverage {
            module,
            average: ((2 * total + count) / (2 * count)) as u8,
        })
        .collect()
}

/// Count completed and incomplete records
pub fn completion_split(learner: &LearnerOverview) -> CompletionSplit {
    let completed = learner.course_progress.iter().filter(|p| p.completed).count();
    CompletionSplit { completed, incomplete: learner.course_progress.len() - completed }
}

/// Most recent login; entries with unparseable timestamps are ignored
pub fn last_login(learner: &LearnerOverview) -> Option<&LoginEntry> {
    learner
        .login_history
        .iter()
        .filter_map(|e| e.timestamp().map(|ts| (ts, e)))
        .max_by_key(|(ts, _)| *ts)
        .map(|(_, e)| e)
}

/// Whether a learner has completed every section they have a record for
pub fn completed_all(learner: &LearnerOverview) -> bool {
    !learner.course_progress.is_empty() && learner.course_progress.iter().all(|p| p.completed)
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub learners: usize,
    pub completed_all: usize,
    pub average_progress: f64,
    pub total_logins: usize,
}

impl DashboardSummary {
    /// Aggregate over every learner
    pub fn from_learners(learners: &[LearnerOverview]) -> Self {
        let average_progress = if learners.is_empty() {
            0.0
        } else {
            learners.iter().map(|l| f64::from(highest_progress(l))).sum::<f64>()
                / learners.len() as f64
        };

        Self {
            learners: learners.len(),
            completed_all: learners.iter().filter(|l| completed_all(l)).count(),
            average_progress,
            total_logins: learners.iter().map(|l| l.login_history.len()).sum(),
        }
    }
}

/// Column to sort the learner table by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Email,
    LastLogin,
    Progress,
    TotalLogins,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "email" => Ok(Self::Email),
            "last-login" | "lastlogin" | "login" => Ok(Self::LastLogin),
            "progress" => Ok(Self::Progress),
            "logins" | "total-logins" => Ok(Self::TotalLogins),
            _ => Err(format!(
                "Unknown sort key: {}. Options: name, email, last-login, progress, logins",
                s
            )),
        }
    }
}

/// Learners whose name or email contains `term`, case-insensitively
pub fn search<'a>(learners: &'a [LearnerOverview], term: &str) -> Vec<&'a LearnerOverview> {
    let term = term.to_lowercase();
    learners
        .iter()
        .filter(|l| {
            let name = l.name.as_deref().unwrap_or_default().to_lowercase();
            let email = l.email.as_deref().unwrap_or_default().to_lowercase();
            name.contains(&term) || email.contains(&term)
        })
        .collect()
}

/// Sort learners in place by `key`
pub fn sort(learners: &mut [&LearnerOverview], key: SortKey, descending: bool) {
    learners.sort_by(|a, b| {
        let ord = compare(a, b, key);
        if descending { ord.reverse() } else { ord }
    });
}

fn compare(a: &LearnerOverview, b: &LearnerOverview, key: SortKey) -> Ordering {
    let lower = |s: &Option<String>| s.as_deref().unwrap_or_default().to_lowercase();
    match key {
        SortKey::Name => lower(&a.name).cmp(&lower(&b.name)),
        SortKey::Email => lower(&a.email).cmp(&lower(&b.email)),
        SortKey::LastLogin => last_login(a)
            .and_then(LoginEntry::timestamp)
            .cmp(&last_login(b).and_then(LoginEntry::timestamp)),
        SortKey::Progress => highest_progress(a).cmp(&highest_progress(b)),
        SortKey::TotalLogins => a.login_history.len().cmp(&b.login_history.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::ProgressRecord;
    use pretty_assertions::assert_eq;

    fn record(module: &str, completed: bool, pct: u8) -> ProgressRecord {
        ProgressRecord {
            module_name: module.into(),
            section_name: format!("{module}-{pct}"),
            completed,
            progress_percentage: pct,
        }
    }

    fn login(time: &str) -> LoginEntry {
        LoginEntry { time: time.into(), ip: "10.0.0.1".into(), location: "Lab".into() }
    }

    fn learner(name: &str, email: &str, progress: Vec<ProgressRecord>, logins: Vec<LoginEntry>) -> LearnerOverview {
        LearnerOverview {
            name: Some(name.into()),
            email: Some(email.into()),
            login_history: logins,
            course_progress: progress,
        }
    }

    fn roster() -> Vec<LearnerOverview> {
        vec![
            learner(
                "Ana",
                "ana@example.com",
                vec![record("MODULE_1", true, 10), record("MODULE_1", true, 20), record("MODULE_2", true, 45)],
                vec![login("2025-01-01T09:00:00Z"), login("2025-02-01T09:00:00Z")],
            ),
            learner(
                "bob",
                "bob@lab.net",
                vec![record("MODULE_1", true, 5), record("MODULE_1", false, 8)],
                vec![login("2025-03-01T09:00:00Z")],
            ),
            learner("Cy", "cy@example.com", vec![], vec![]),
        ]
    }

    #[test]
    fn highest_progress_is_the_maximum() {
        let roster = roster();
        assert_eq!(highest_progress(&roster[0]), 45);
        assert_eq!(highest_progress(&roster[2]), 0);
    }

    #[test]
    fn module_averages_keep_first_seen_order() {
        let averages = module_averages(&roster()[0]);
        assert_eq!(
            averages,
            vec![
                ModuleAverage { module: "MODULE_1".into(), average: 15 },
                ModuleAverage { module: "MODULE_2".into(), average: 45 },
            ]
        );
    }

    #[test]
    fn completion_split_counts_records() {
        assert_eq!(completion_split(&roster()[1]), CompletionSplit { completed: 1, incomplete: 1 });
    }

    #[test]
    fn last_login_is_the_latest_timestamp() {
        let mut ana = roster().remove(0);
        ana.login_history.push(login("garbage"));
        assert_eq!(last_login(&ana).map(|e| e.time.as_str()), Some("2025-02-01T09:00:00Z"));
        assert!(last_login(&roster()[2]).is_none());
    }

    #[test]
    fn summary_aggregates_the_roster() {
        let summary = DashboardSummary::from_learners(&roster());
        assert_eq!(summary.learners, 3);
        assert_eq!(summary.completed_all, 1);
        assert_eq!(summary.total_logins, 3);
        assert!((summary.average_progress - 53.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_roster_summary() {
        let summary = DashboardSummary::from_learners(&[]);
        assert_eq!(summary.learners, 0);
        assert_eq!(summary.average_progress, 0.0);
    }

    #[test]
    fn search_matches_name_or_email_case_insensitively() {
        let roster = roster();
        let hits: Vec<_> = search(&roster, "EXAMPLE").iter().map(|l| l.name.clone()).collect();
        assert_eq!(hits, vec![Some("Ana".to_string()), Some("Cy".to_string())]);
        assert_eq!(search(&roster, "BOB").len(), 1);
    }

    #[test]
    fn sort_by_progress_descending() {
        let roster = roster();
        let mut rows = search(&roster, "");
        sort(&mut rows, SortKey::Progress, true);
        let names: Vec<_> = rows.iter().map(|l| l.name.as_deref().unwrap_or_default()).collect();
        assert_eq!(names, vec!["Ana", "bob", "Cy"]);
    }

    #[test]
    fn sort_by_name_ignores_case() {
        let roster = roster();
        let mut rows = search(&roster, "");
        sort(&mut rows, SortKey::Name, false);
        let names: Vec<_> = rows.iter().map(|l| l.name.as_deref().unwrap_or_default()).collect();
        assert_eq!(names, vec!["Ana", "bob", "Cy"]);
    }

    #[test]
    fn sort_by_last_login_puts_never_logged_in_first() {
        let roster = roster();
        let mut rows = search(&roster, "");
        sort(&mut rows, SortKey::LastLogin, false);
        let names: Vec<_> = rows.iter().map(|l| l.name.as_deref().unwrap_or_default()).collect();
        assert_eq!(names, vec!["Cy", "Ana", "bob"]);
    }

    #[test]
    fn sort_key_parses() {
        assert_eq!("progress".parse::<SortKey>(), Ok(SortKey::Progress));
        assert_eq!("Last-Login".parse::<SortKey>(), Ok(SortKey::LastLogin));
        assert!("age".parse::<SortKey>().is_err());
    }
}
