//! Course sidebar rendering

use crate::course::{Catalog, SectionStatus};

/// Status indicators for sections
const STATUS_LOCKED: &str = "🔒";
const STATUS_NOT_STARTED: &str = "○";
const STATUS_ACTIVE: &str = "●";
const STATUS_COMPLETED: &str = "✓";

/// Text progress bar, e.g. `[#####-----] 50%`
pub fn progress_bar(percent: u8, width: usize) -> String {
    let percent = percent.min(100);
    let filled = (usize::from(percent) * width + 50) / 100;
    format!("[{}{}] {}%", "#".repeat(filled), "-".repeat(width - filled), percent)
}

/// Render the sidebar: every module with its sections and their status
pub fn render(
    catalog: &Catalog,
    rows: &[SectionStatus<'_>],
    active: Option<&str>,
    username: &str,
    progress: u8,
) -> String {
    let mut out = format!("{}'s Progress\n{}\n", username, progress_bar(progress, 30));

    for module in catalog.all_modules() {
        out.push('\n');
        out.push_str(&module.name);
        out.push('\n');

        for row in rows.iter().filter(|r| r.section.module == module.name) {
            let marker = if row.completed {
                STATUS_COMPLETED
            } else if active == Some(row.section.name.as_str()) {
                STATUS_ACTIVE
            } else if row.unlocked {
                STATUS_NOT_STARTED
            } else {
                STATUS_LOCKED
            };
            out.push_str(&format!("  {} {}\n", marker, row.section.name));
        }
    }

    out
}
