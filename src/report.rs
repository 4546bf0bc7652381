use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::{ClassSummary, Dataset, SubjectAverage};

pub fn summary_lines(summary: &ClassSummary) -> [String; 2] {
    [
        format!("Class Average Score: {:.1}", summary.average_score),
        format!("Pass Rate: {:.1}%", summary.pass_rate),
    ]
}

pub fn build_report(
    dataset: &Dataset,
    summary: &ClassSummary,
    subjects: &[SubjectAverage],
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Student Performance Report");
    let _ = writeln!(
        output,
        "Generated for {} ({} students) on {}",
        dataset.source,
        dataset.len(),
        generated_at.format("%Y-%m-%d %H:%M UTC")
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Class Summary");
    for line in summary_lines(summary) {
        let _ = writeln!(output, "- {line}");
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Alerts");
    for alert in &summary.alerts {
        let _ = writeln!(output, "- {}", alert.message());
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Subject Averages");
    for subject in subjects {
        let _ = writeln!(output, "- {}: {:.1}", subject.subject, subject.mean);
    }

    output
}
