use crate::models::{AggregateView, MoodBand, MoodRecord, StudentHistory};

/// A student whose mean mood score falls below this is flagged for
/// follow-up.
pub const ATTENTION_THRESHOLD: f64 = 4.0;

/// Drill-down default: how many recent records to show.
pub const RECENT_WINDOW: usize = 5;

pub fn mean_score(records: &[MoodRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    let total: i32 = records.iter().map(|r| r.score).sum();
    total as f64 / records.len() as f64
}

pub fn aggregate(student: &StudentHistory) -> AggregateView {
    let mean = mean_score(&student.records);
    AggregateView {
        mean_score: mean,
        needs_attention: !student.records.is_empty() && mean < ATTENTION_THRESHOLD,
    }
}

/// Mean of the per-student means, rounded to one decimal. An empty roster
/// yields 0.0; callers render their own "no data" text.
pub fn class_average(roster: &[StudentHistory]) -> f64 {
    if roster.is_empty() {
        return 0.0;
    }
    let total: f64 = roster.iter().map(|s| aggregate(s).mean_score).sum();
    round_one_decimal(total / roster.len() as f64)
}

pub fn alert_count(roster: &[StudentHistory]) -> usize {
    roster.iter().filter(|s| aggregate(s).needs_attention).count()
}

/// Looks a student up by id. An unknown id means "no selection", rendering
/// the class-level view, never an error.
pub fn select<'a>(roster: &'a [StudentHistory], id: &str) -> Option<&'a StudentHistory> {
    roster.iter().find(|s| s.id == id)
}

/// Tail slice of the already-chronological records; no re-sort.
pub fn recent_history(student: &StudentHistory, n: usize) -> &[MoodRecord] {
    let start = student.records.len().saturating_sub(n);
    &student.records[start..]
}

/// Buckets a 0-10 score into the four display bands. Total over all inputs.
pub fn mood_color_band(score: i32) -> MoodBand {
    match score {
        7.. => MoodBand::High,
        5..=6 => MoodBand::MidHigh,
        3..=4 => MoodBand::MidLow,
        _ => MoodBand::Low,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::sample_roster;

    #[test]
    fn per_student_means_match_the_sample() {
        let roster = sample_roster().unwrap();
        let means: Vec<f64> = roster.iter().map(|s| aggregate(s).mean_score).collect();
        assert!((means[0] - 5.4).abs() < 0.001);
        assert!((means[1] - 2.6).abs() < 0.001);
        assert!((means[2] - 7.4).abs() < 0.001);
    }

    #[test]
    fn class_average_matches_the_sample() {
        let roster = sample_roster().unwrap();
        assert!((class_average(&roster) - 5.1).abs() < 0.001);
    }

    #[test]
    fn class_average_of_empty_roster_is_zero() {
        assert_eq!(class_average(&[]), 0.0);
    }

    #[test]
    fn only_the_low_mean_student_is_flagged() {
        let roster = sample_roster().unwrap();
        assert_eq!(alert_count(&roster), 1);
        assert!(aggregate(&roster[1]).needs_attention);
        assert!(!aggregate(&roster[0]).needs_attention);
        assert!(!aggregate(&roster[2]).needs_attention);
    }

    #[test]
    fn student_without_records_is_not_flagged() {
        let student = StudentHistory {
            id: "s0".to_string(),
            name: "New Student".to_string(),
            records: Vec::new(),
        };
        let view = aggregate(&student);
        assert_eq!(view.mean_score, 0.0);
        assert!(!view.needs_attention);
    }

    #[test]
    fn select_finds_known_ids_only() {
        let roster = sample_roster().unwrap();
        assert_eq!(select(&roster, "2").map(|s| s.name.as_str()), Some("Emma Davis"));
        assert!(select(&roster, "nope").is_none());
        assert!(select(&roster, "all").is_none());
    }

    #[test]
    fn recent_history_is_a_tail_slice() {
        let roster = sample_roster().unwrap();
        let student = &roster[0];

        let recent = recent_history(student, 3);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0], student.records[2]);

        // Asking for more than exists returns everything.
        assert_eq!(recent_history(student, 50).len(), 5);
    }

    #[test]
    fn bands_follow_the_7_5_3_thresholds() {
        assert_eq!(mood_color_band(8), MoodBand::High);
        assert_eq!(mood_color_band(7), MoodBand::High);
        assert_eq!(mood_color_band(6), MoodBand::MidHigh);
        assert_eq!(mood_color_band(5), MoodBand::MidHigh);
        assert_eq!(mood_color_band(4), MoodBand::MidLow);
        assert_eq!(mood_color_band(3), MoodBand::MidLow);
        assert_eq!(mood_color_band(2), MoodBand::Low);
        assert_eq!(mood_color_band(1), MoodBand::Low);
        assert_eq!(mood_color_band(0), MoodBand::Low);
    }
}
