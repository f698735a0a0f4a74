use std::path::Path;

use anyhow::{bail, Context};
use chrono::NaiveDate;

use crate::models::{MoodCategory, MoodRecord, StudentHistory};
use crate::models::MoodCategory::{Angry, Anxious, Confused, Happy, Sad, Tired};

/// Built-in demo roster: three students with five dated mood entries each.
pub fn sample_roster() -> anyhow::Result<Vec<StudentHistory>> {
    let students = vec![
        (
            "1",
            "Alex Johnson",
            vec![
                (1, Happy, 8),
                (2, Anxious, 4),
                (3, Happy, 7),
                (4, Sad, 3),
                (5, Confused, 5),
            ],
        ),
        (
            "2",
            "Emma Davis",
            vec![
                (1, Sad, 3),
                (2, Sad, 2),
                (3, Anxious, 3),
                (4, Angry, 2),
                (5, Sad, 3),
            ],
        ),
        (
            "3",
            "Michael Chen",
            vec![
                (1, Happy, 9),
                (2, Happy, 8),
                (3, Confused, 6),
                (4, Happy, 8),
                (5, Tired, 6),
            ],
        ),
    ];

    let mut roster = Vec::new();
    for (id, name, entries) in students {
        let mut records = Vec::new();
        for (day, mood, score) in entries {
            records.push(MoodRecord {
                date: NaiveDate::from_ymd_opt(2024, 1, day).context("invalid date")?,
                mood,
                score,
            });
        }
        roster.push(StudentHistory {
            id: id.to_string(),
            name: name.to_string(),
            records,
        });
    }

    Ok(roster)
}

/// Loads a roster from CSV, grouping rows per student in file order. Rows
/// are expected to be chronologically ordered within each student.
pub fn load_csv(csv_path: &Path) -> anyhow::Result<Vec<StudentHistory>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        student_id: String,
        student_name: String,
        date: NaiveDate,
        mood: MoodCategory,
        score: i32,
    }

    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    let mut roster: Vec<StudentHistory> = Vec::new();

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        if !(0..=10).contains(&row.score) {
            bail!(
                "score {} out of range 0-10 for {} on {}",
                row.score,
                row.student_name,
                row.date
            );
        }

        let record = MoodRecord {
            date: row.date,
            mood: row.mood,
            score: row.score,
        };
        match roster.iter_mut().find(|s| s.id == row.student_id) {
            Some(student) => student.records.push(record),
            None => roster.push(StudentHistory {
                id: row.student_id,
                name: row.student_name,
                records: vec![record],
            }),
        }
    }

    Ok(roster)
}
