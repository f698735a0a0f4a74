use std::fmt::Write;

use crate::analytics;
use crate::models::StudentHistory;

/// Renders the teacher dashboard as markdown: class overview, per-student
/// lines, and a drill-down section when a student id is selected. An unknown
/// or absent selection renders the class-level view.
pub fn build_dashboard(roster: &[StudentHistory], selected: Option<&str>) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Wellness Dashboard");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Overview");

    if roster.is_empty() {
        let _ = writeln!(output, "No students enrolled in the wellness program.");
    } else {
        let _ = writeln!(output, "- Students: {}", roster.len());
        let _ = writeln!(output, "- Class average: {:.1}/10", analytics::class_average(roster));
        let _ = writeln!(output, "- Needs attention: {}", analytics::alert_count(roster));
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Students");

    if roster.is_empty() {
        let _ = writeln!(output, "No students to list.");
    } else {
        for student in roster {
            let view = analytics::aggregate(student);
            // Integer thresholds, so flooring the mean matches banding the
            // raw value.
            let band = analytics::mood_color_band(view.mean_score.floor() as i32);
            let marker = if view.needs_attention { " [attention]" } else { "" };
            let _ = writeln!(
                output,
                "- {} (avg {:.1}/10, {}){}",
                student.name,
                view.mean_score,
                band.label(),
                marker
            );
        }
    }

    match selected.and_then(|id| analytics::select(roster, id)) {
        Some(student) => {
            let view = analytics::aggregate(student);
            let _ = writeln!(output);
            let _ = writeln!(output, "## {}", student.name);
            let _ = writeln!(output, "Recent mood history:");

            for record in analytics::recent_history(student, analytics::RECENT_WINDOW) {
                let _ = writeln!(
                    output,
                    "- {} {} {} — {}/10 ({})",
                    record.date,
                    record.mood.emoji(),
                    record.mood,
                    record.score,
                    analytics::mood_color_band(record.score).label()
                );
            }

            if view.needs_attention {
                let _ = writeln!(output);
                let _ = writeln!(
                    output,
                    "**Attention needed**: consistently low mood scores. \
                     Consider reaching out for a one-on-one conversation."
                );
            }
        }
        None => {
            if selected.is_some() {
                let _ = writeln!(output);
                let _ = writeln!(output, "No student selected; showing the class overview.");
            }
        }
    }

    output
}
