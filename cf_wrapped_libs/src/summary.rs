use crate::{
    codeforces::model::{ProblemKey, RatingChange, Submission},
    rating::{self, RatingProgress},
    window::{Timestamped, YearWindow, YearZone},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Cheap per-year digest used to pick a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: i32,
    pub problems_solved: u32,
    pub contest_count: u32,
    pub rating_change: i32,
    pub best_rank: Option<i32>,
    pub has_activity: bool,
}

impl YearSummary {
    pub fn compute(
        year: i32,
        submissions: &[Submission],
        rating_history: &[RatingChange],
        zone: &YearZone,
    ) -> Self {
        let window = YearWindow::new(year, zone);

        let year_submissions = window.filter(submissions);
        let solved: HashSet<ProblemKey> = year_submissions
            .iter()
            .filter(|submission| submission.is_accepted())
            .map(|submission| submission.problem.key())
            .collect();

        let history = rating::chronological(rating_history);
        let progress = RatingProgress::from_sorted(&history, &window);
        let contest_count = progress.as_ref().map(|p| p.contest_count).unwrap_or(0);

        Self {
            year,
            problems_solved: solved.len() as u32,
            contest_count: contest_count as u32,
            rating_change: progress.as_ref().map(|p| p.delta()).unwrap_or(0),
            best_rank: progress.as_ref().map(|p| p.best_rank),
            has_activity: !year_submissions.is_empty() || contest_count > 0,
        }
    }
}

/// Summaries for every year in `years`, in the same order.
pub fn summarize_years(
    years: &[i32],
    submissions: &[Submission],
    rating_history: &[RatingChange],
    zone: &YearZone,
) -> Vec<YearSummary> {
    years
        .iter()
        .map(|&year| YearSummary::compute(year, submissions, rating_history, zone))
        .collect()
}

/// Completed years a report can be built for, most recent first.
///
/// Collects the years of every submission and rating change, plus every year since
/// registration when it is known. Years from `current_year` on are left out.
pub fn available_years(
    submissions: &[Submission],
    rating_history: &[RatingChange],
    registration_time_seconds: Option<i64>,
    zone: &YearZone,
    current_year: i32,
) -> Vec<i32> {
    let mut years: BTreeSet<i32> = submissions
        .iter()
        .map(Timestamped::timestamp)
        .chain(rating_history.iter().map(Timestamped::timestamp))
        .map(|timestamp| zone.year_of(timestamp))
        .filter(|&year| year < current_year)
        .collect();

    // a zero registration time means unknown
    if let Some(registered_at) = registration_time_seconds.filter(|&t| t > 0) {
        years.extend(zone.year_of(registered_at)..current_year);
    }

    years.into_iter().rev().collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        stats::test::{rating_change, settings, submission, DAY, JAN_1_2024},
        stats::YearStats,
        time::UTC8,
    };

    const YEAR: i64 = 366 * DAY;

    fn zone() -> YearZone {
        YearZone::Fixed(*UTC8)
    }

    #[test]
    fn test_summary_of_empty_year() {
        let submissions = vec![submission(1, JAN_1_2024 + YEAR, "OK", (1, "A"), None, &[])];

        let summary = YearSummary::compute(2024, &submissions, &[], &zone());

        assert_eq!(
            summary,
            YearSummary {
                year: 2024,
                problems_solved: 0,
                contest_count: 0,
                rating_change: 0,
                best_rank: None,
                has_activity: false,
            }
        );
    }

    #[test]
    fn test_summary_agrees_with_full_stats() {
        let submissions = vec![
            submission(1, JAN_1_2024 + DAY, "OK", (1, "A"), Some(800), &["math"]),
            submission(2, JAN_1_2024 + 2 * DAY, "OK", (1, "A"), Some(800), &["math"]),
            submission(3, JAN_1_2024 + 3 * DAY, "WRONG_ANSWER", (1, "B"), Some(1000), &[]),
            submission(4, JAN_1_2024 + 4 * DAY, "OK", (2, "C"), None, &[]),
        ];
        let ratings = vec![
            rating_change(JAN_1_2024 - 3 * DAY, 1200, 1300, 700),
            rating_change(JAN_1_2024 + 5 * DAY, 1300, 1280, 900),
            rating_change(JAN_1_2024 + 9 * DAY, 1280, 1390, 250),
        ];

        let summary = YearSummary::compute(2024, &submissions, &ratings, &zone());
        let stats = YearStats::compute(2024, &submissions, &ratings, &settings());

        assert_eq!(summary.problems_solved, 2);
        assert_eq!(summary.problems_solved, stats.unique_problems_solved);
        assert_eq!(summary.contest_count, stats.contest_count);
        assert_eq!(summary.rating_change, 90);
        assert_eq!(summary.rating_change, stats.rating_change);
        assert_eq!(summary.best_rank, Some(250));
        assert_eq!(summary.best_rank, stats.max_contest_rank);
        assert!(summary.has_activity);
    }

    #[test]
    fn test_rating_only_year_has_activity() {
        let ratings = vec![rating_change(JAN_1_2024 + 20 * DAY, 1500, 1450, 1000)];

        let summary = YearSummary::compute(2024, &[], &ratings, &zone());

        assert!(summary.has_activity);
        assert_eq!(summary.problems_solved, 0);
        assert_eq!(summary.rating_change, -50);
    }

    #[test]
    fn test_available_years_skip_current_year() {
        let submissions = vec![
            submission(1, JAN_1_2024 - 200 * DAY, "OK", (1, "A"), None, &[]),
            submission(2, JAN_1_2024 + DAY, "OK", (1, "A"), None, &[]),
            submission(3, JAN_1_2024 + YEAR + DAY, "OK", (1, "A"), None, &[]),
        ];
        let ratings = vec![rating_change(JAN_1_2024 + 30 * DAY, 1500, 1450, 1000)];

        let years = available_years(&submissions, &ratings, None, &zone(), 2025);

        assert_eq!(years, vec![2024, 2023]);
    }

    #[test]
    fn test_available_years_fill_since_registration() {
        // registered 2020-06-01
        let registered_at = 1_590_969_600;
        let submissions = vec![submission(1, JAN_1_2024 + DAY, "OK", (1, "A"), None, &[])];

        let years = available_years(&submissions, &[], Some(registered_at), &zone(), 2025);

        assert_eq!(years, vec![2024, 2023, 2022, 2021, 2020]);
    }

    #[test]
    fn test_available_years_ignore_zero_registration() {
        assert!(available_years(&[], &[], Some(0), &zone(), 2025).is_empty());

        let submissions = vec![submission(1, JAN_1_2024 + DAY, "OK", (1, "A"), None, &[])];
        let years = available_years(&submissions, &[], Some(0), &zone(), 2025);

        assert_eq!(years, vec![2024]);
    }

    #[test]
    fn test_available_years_empty_history() {
        assert!(available_years(&[], &[], None, &zone(), 2025).is_empty());
    }

    #[test]
    fn test_summarize_years_keeps_order() {
        let submissions = vec![submission(1, JAN_1_2024 + DAY, "OK", (1, "A"), None, &[])];

        let summaries = summarize_years(&[2024, 2023], &submissions, &[], &zone());

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].year, 2024);
        assert!(summaries[0].has_activity);
        assert_eq!(summaries[1].year, 2023);
        assert!(!summaries[1].has_activity);
    }
}
