use crate::{
    badge::{self, Badge, BadgeCounters},
    codeforces::model::{Problem, ProblemKey, RatingChange, Submission, Verdict},
    rating::{self, RatingProgress, RISING_MIN_GAIN, RISING_WINDOW_SECONDS},
    time::TimeNormalizer,
    window::{YearWindow, YearZone},
};
use chrono::NaiveDate;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

const NIGHT_OWL_HOURS: std::ops::RangeInclusive<u32> = 0..=5;
const EARLY_BIRD_HOURS: std::ops::RangeInclusive<u32> = 5..=8;

/// Timezone parameters of the aggregation.
///
/// The default buckets days and hours at UTC+8 while delimiting years in the host
/// timezone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationSettings {
    pub bucket: TimeNormalizer,
    pub zone: YearZone,
}

/// Statistics of one user over one calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStats {
    pub year: i32,
    pub total_submissions: u32,
    pub accepted_submissions: u32,
    pub unique_problems_solved: u32,
    /// Accepted share of all submissions in percent, rounded.
    pub accept_rate: u32,
    pub rating_change: i32,
    pub start_rating: Option<i32>,
    pub end_rating: Option<i32>,
    pub contest_count: u32,
    /// Best (numerically smallest) contest placement.
    pub max_contest_rank: Option<i32>,
    pub best_contest: Option<String>,
    pub tag_distribution: BTreeMap<String, u32>,
    /// Keyed by rating rounded down to the hundred.
    pub difficulty_distribution: BTreeMap<i32, u32>,
    pub language_distribution: BTreeMap<String, u32>,
    pub verdict_distribution: BTreeMap<Verdict, u32>,
    pub activity_by_month: [u32; 12],
    pub activity_by_day: BTreeMap<NaiveDate, u32>,
    #[serde(rename = "fastestACSeconds")]
    pub fastest_ac_seconds: Option<i64>,
    pub hardest_problem_rating: Option<i32>,
    pub hardest_problem_name: Option<String>,
    pub active_days: u32,
    pub streak: u32,
    pub night_owl_count: u32,
    pub early_bird_count: u32,
    pub most_productive_day: Option<NaiveDate>,
    pub most_productive_day_count: u32,
    pub avg_difficulty: i32,
    pub got_hacked: u32,
    pub top_language: Option<String>,
    pub top_tag: Option<String>,
    pub badges: Vec<Badge>,
}

impl YearStats {
    /// Aggregates the raw feeds of a user into the statistics of `year`.
    ///
    /// Inputs may come in any order. Submissions are processed chronologically, so
    /// per-problem data comes from the first accepted submission and ties on the
    /// hardest problem go to the one solved first. Ties on the most productive day go
    /// to the earliest date.
    pub fn compute(
        year: i32,
        submissions: &[Submission],
        rating_history: &[RatingChange],
        settings: &AggregationSettings,
    ) -> Self {
        let window = YearWindow::new(year, &settings.zone);
        let bucket = &settings.bucket;

        let year_submissions: Vec<&Submission> = window
            .filter(submissions)
            .into_iter()
            .sorted_by_key(|submission| (submission.creation_time_seconds, submission.id))
            .collect();
        let accepted: Vec<&Submission> = year_submissions
            .iter()
            .copied()
            .filter(|submission| submission.is_accepted())
            .collect();

        let mut verdict_distribution: BTreeMap<Verdict, u32> = BTreeMap::new();
        let mut language_distribution: BTreeMap<String, u32> = BTreeMap::new();
        let mut night_owl_count = 0;
        let mut early_bird_count = 0;
        let mut got_hacked = 0;

        for submission in year_submissions.iter() {
            if let Some(verdict) = &submission.verdict {
                *verdict_distribution.entry(verdict.clone()).or_insert(0) += 1;
            }
            *language_distribution
                .entry(submission.programming_language.clone())
                .or_insert(0) += 1;

            let hour = bucket.hour(submission.creation_time_seconds);
            if NIGHT_OWL_HOURS.contains(&hour) {
                night_owl_count += 1;
            }
            if EARLY_BIRD_HOURS.contains(&hour) {
                early_bird_count += 1;
            }
            if submission.verdict == Some(Verdict::Challenged) {
                got_hacked += 1;
            }
        }

        let mut solved: HashSet<ProblemKey> = HashSet::new();
        let mut tag_distribution: BTreeMap<String, u32> = BTreeMap::new();
        let mut difficulty_distribution: BTreeMap<i32, u32> = BTreeMap::new();
        let mut activity_by_month = [0u32; 12];
        let mut activity_by_day: BTreeMap<NaiveDate, u32> = BTreeMap::new();
        let mut difficulty_sum: i64 = 0;
        let mut difficulty_count: i64 = 0;
        let mut hardest: Option<(i32, &Problem)> = None;
        let mut fastest_ac_seconds: Option<i64> = None;

        for submission in accepted.iter() {
            let problem = &submission.problem;
            if solved.insert(problem.key()) {
                for tag in problem.tags.iter() {
                    *tag_distribution.entry(tag.clone()).or_insert(0) += 1;
                }
                if let Some(rating) = problem.rating {
                    *difficulty_distribution
                        .entry(rating.div_euclid(100) * 100)
                        .or_insert(0) += 1;
                    difficulty_sum += rating as i64;
                    difficulty_count += 1;
                    if hardest.map_or(true, |(hardest_rating, _)| rating > hardest_rating) {
                        hardest = Some((rating, problem));
                    }
                }
            }

            // practice and virtual submissions have no meaningful contest time
            if submission.relative_time_seconds > 0 {
                fastest_ac_seconds = Some(match fastest_ac_seconds {
                    Some(fastest) => fastest.min(submission.relative_time_seconds),
                    None => submission.relative_time_seconds,
                });
            }

            activity_by_month[bucket.month0(submission.creation_time_seconds) as usize] += 1;
            *activity_by_day
                .entry(bucket.date(submission.creation_time_seconds))
                .or_insert(0) += 1;
        }

        let (most_productive_day, most_productive_day_count) = top_entry(&activity_by_day)
            .map(|(day, count)| (Some(day), count))
            .unwrap_or((None, 0));
        let streak = longest_streak(activity_by_day.keys().copied());

        let history = rating::chronological(rating_history);
        let year_ratings = rating::in_window(&history, &window);
        let progress = RatingProgress::from_sorted(&history, &window);
        let rating_change = progress.as_ref().map(|p| p.delta()).unwrap_or(0);
        let rapid_rise =
            rating::has_rapid_rise(&year_ratings, RISING_WINDOW_SECONDS, RISING_MIN_GAIN);

        let total_submissions = year_submissions.len() as u32;
        let accepted_submissions = accepted.len() as u32;
        let unique_problems_solved = solved.len() as u32;
        let active_days = activity_by_day.len() as u32;
        let hardest_problem_rating = hardest.map(|(rating, _)| rating);

        let counters = BadgeCounters {
            night_owl_count,
            early_bird_count,
            streak,
            unique_solved: unique_problems_solved,
            fastest_ac_seconds,
            total_submissions,
            distinct_languages: language_distribution.len(),
            max_tag_count: tag_distribution.values().copied().max().unwrap_or(0),
            distinct_tags: tag_distribution.len(),
            start_rating: progress.as_ref().map(|p| p.start_rating),
            rating_change,
            hardest_problem_rating,
            contest_count: year_ratings.len(),
            max_day_count: most_productive_day_count,
            wrong_answer_count: verdict_distribution
                .get(&Verdict::WrongAnswer)
                .copied()
                .unwrap_or(0),
            rapid_rise,
        };
        let badges = badge::evaluate(&counters);

        tracing::debug!(
            "aggregated year {}: {} submissions, {} solved, {} badges",
            year,
            total_submissions,
            unique_problems_solved,
            badges.len()
        );

        Self {
            year,
            total_submissions,
            accepted_submissions,
            unique_problems_solved,
            accept_rate: percentage(accepted_submissions, total_submissions),
            rating_change,
            start_rating: progress.as_ref().map(|p| p.start_rating),
            end_rating: progress.as_ref().map(|p| p.end_rating),
            contest_count: year_ratings.len() as u32,
            max_contest_rank: progress.as_ref().map(|p| p.best_rank),
            best_contest: progress.map(|p| p.best_contest),
            top_language: top_entry(&language_distribution).map(|(language, _)| language),
            top_tag: top_entry(&tag_distribution).map(|(tag, _)| tag),
            tag_distribution,
            difficulty_distribution,
            language_distribution,
            verdict_distribution,
            activity_by_month,
            activity_by_day,
            fastest_ac_seconds,
            hardest_problem_rating,
            hardest_problem_name: hardest.map(|(_, problem)| problem.name.clone()),
            active_days,
            streak,
            night_owl_count,
            early_bird_count,
            most_productive_day,
            most_productive_day_count,
            avg_difficulty: rounded_mean(difficulty_sum, difficulty_count),
            got_hacked,
            badges,
        }
    }
}

/// Key with the highest count. Ties go to the smallest key.
fn top_entry<K: Ord + Clone>(counts: &BTreeMap<K, u32>) -> Option<(K, u32)> {
    let mut top: Option<(&K, u32)> = None;
    for (key, &count) in counts.iter() {
        if top.map_or(true, |(_, best)| count > best) {
            top = Some((key, count));
        }
    }
    top.map(|(key, count)| (key.clone(), count))
}

/// Longest run of consecutive calendar days. `days` must be ascending.
fn longest_streak(days: impl Iterator<Item = NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        current = match previous {
            Some(previous) if (day - previous).num_days() == 1 => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }

    longest
}

fn percentage(part: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (part, total) = (part as u64, total as u64);
    ((200 * part + total) / (2 * total)) as u32
}

fn rounded_mean(sum: i64, count: i64) -> i32 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as i32
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::time::UTC8;

    /// 2024-01-01T00:00:00+08:00
    pub(crate) const JAN_1_2024: i64 = 1_704_038_400;
    pub(crate) const DAY: i64 = 86_400;
    pub(crate) const HOUR: i64 = 3_600;

    pub(crate) fn settings() -> AggregationSettings {
        AggregationSettings {
            bucket: TimeNormalizer::default(),
            zone: YearZone::Fixed(*UTC8),
        }
    }

    pub(crate) fn submission(
        id: i64,
        time: i64,
        verdict: &str,
        problem: (i64, &str),
        rating: Option<i32>,
        tags: &[&str],
    ) -> Submission {
        Submission {
            id,
            contest_id: Some(problem.0),
            creation_time_seconds: time,
            relative_time_seconds: 0,
            problem: Problem {
                contest_id: Some(problem.0),
                problemset_name: None,
                index: problem.1.to_string(),
                name: format!("Problem {}{}", problem.0, problem.1),
                kind: Some(String::from("PROGRAMMING")),
                rating,
                tags: tags.iter().map(|tag| tag.to_string()).collect(),
            },
            programming_language: String::from("GNU C++17"),
            verdict: Some(Verdict::from(verdict.to_string())),
            passed_test_count: 0,
            time_consumption_millis: 0,
            memory_consumption_bytes: 0,
        }
    }

    pub(crate) fn rating_change(time: i64, old: i32, new: i32, rank: i32) -> RatingChange {
        RatingChange {
            contest_id: time,
            contest_name: format!("Contest at {}", time),
            handle: String::from("alice"),
            rank,
            rating_update_time_seconds: time,
            old_rating: old,
            new_rating: new,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_fast_accepted_submission() {
        let mut ac = submission(1, JAN_1_2024 + 40 * DAY, "OK", (1, "A"), Some(1200), &["dp"]);
        ac.relative_time_seconds = 45;

        let stats = YearStats::compute(2024, &[ac], &[], &settings());

        assert_eq!(stats.unique_problems_solved, 1);
        assert_eq!(stats.fastest_ac_seconds, Some(45));
        assert_eq!(stats.difficulty_distribution, BTreeMap::from([(1200, 1)]));
        assert_eq!(
            stats.tag_distribution,
            BTreeMap::from([(String::from("dp"), 1)])
        );
        assert_eq!(stats.avg_difficulty, 1200);
        assert_eq!(stats.accept_rate, 100);
        assert_eq!(stats.badges, vec![Badge::Speedster]);
    }

    #[test]
    fn test_empty_year_is_zeroed() {
        let outside = submission(1, JAN_1_2024 - 1, "OK", (1, "A"), Some(800), &["math"]);
        let ratings = vec![rating_change(JAN_1_2024 - DAY, 1500, 1600, 3)];

        let stats = YearStats::compute(2024, &[outside], &ratings, &settings());

        assert_eq!(stats.total_submissions, 0);
        assert_eq!(stats.accepted_submissions, 0);
        assert_eq!(stats.unique_problems_solved, 0);
        assert_eq!(stats.accept_rate, 0);
        assert_eq!(stats.rating_change, 0);
        assert_eq!(stats.contest_count, 0);
        assert_eq!(stats.max_contest_rank, None);
        assert_eq!(stats.best_contest, None);
        assert_eq!(stats.start_rating, None);
        assert_eq!(stats.fastest_ac_seconds, None);
        assert_eq!(stats.hardest_problem_rating, None);
        assert_eq!(stats.hardest_problem_name, None);
        assert_eq!(stats.most_productive_day, None);
        assert_eq!(stats.top_language, None);
        assert_eq!(stats.activity_by_month, [0; 12]);
        assert_eq!(stats.active_days, 0);
        assert_eq!(stats.streak, 0);
        assert_eq!(stats.avg_difficulty, 0);
        assert!(stats.tag_distribution.is_empty());
        assert!(stats.verdict_distribution.is_empty());
        assert!(stats.badges.is_empty());
    }

    #[test]
    fn test_repeated_accepts_count_once_per_problem() {
        let submissions = vec![
            submission(1, JAN_1_2024 + 10 * HOUR, "WRONG_ANSWER", (5, "B"), Some(1600), &["greedy"]),
            submission(2, JAN_1_2024 + 11 * HOUR, "OK", (5, "B"), Some(1600), &["greedy", "math"]),
            submission(3, JAN_1_2024 + 12 * HOUR, "OK", (5, "B"), Some(1600), &["greedy", "math"]),
            submission(4, JAN_1_2024 + 13 * HOUR, "OK", (5, "C"), None, &["math"]),
        ];

        let stats = YearStats::compute(2024, &submissions, &[], &settings());

        assert_eq!(stats.total_submissions, 4);
        assert_eq!(stats.accepted_submissions, 3);
        assert_eq!(stats.unique_problems_solved, 2);
        assert_eq!(stats.accept_rate, 75);
        assert_eq!(
            stats.tag_distribution,
            BTreeMap::from([(String::from("greedy"), 1), (String::from("math"), 2)])
        );
        // unrated problems stay out of the difficulty statistics
        assert_eq!(stats.difficulty_distribution, BTreeMap::from([(1600, 1)]));
        assert_eq!(stats.avg_difficulty, 1600);
        // every accepted submission counts toward activity
        assert_eq!(stats.activity_by_month[0], 3);
        assert_eq!(stats.activity_by_day, BTreeMap::from([(date(2024, 1, 1), 3)]));
        assert_eq!(stats.top_tag.as_deref(), Some("math"));
        let tag_total: u32 = stats.tag_distribution.values().sum();
        assert!(tag_total >= stats.unique_problems_solved);
    }

    #[test]
    fn test_hour_five_counts_as_night_owl_and_early_bird() {
        let submissions = vec![
            submission(1, JAN_1_2024 + 2 * HOUR, "WRONG_ANSWER", (1, "A"), None, &[]),
            submission(2, JAN_1_2024 + 5 * HOUR + 59 * 60, "WRONG_ANSWER", (1, "A"), None, &[]),
            submission(3, JAN_1_2024 + 8 * HOUR, "OK", (1, "A"), None, &[]),
            submission(4, JAN_1_2024 + 9 * HOUR, "OK", (1, "B"), None, &[]),
            submission(5, JAN_1_2024 + 23 * HOUR, "CHALLENGED", (1, "C"), None, &[]),
        ];

        let stats = YearStats::compute(2024, &submissions, &[], &settings());

        assert_eq!(stats.night_owl_count, 2);
        assert_eq!(stats.early_bird_count, 2);
        assert_eq!(stats.got_hacked, 1);
        assert_eq!(
            stats.verdict_distribution,
            BTreeMap::from([
                (Verdict::Accepted, 2),
                (Verdict::WrongAnswer, 2),
                (Verdict::Challenged, 1)
            ])
        );
    }

    #[test]
    fn test_streak_spans_month_boundary() {
        let days = [30, 31, 32, 40, 41];
        let submissions: Vec<Submission> = days
            .iter()
            .enumerate()
            .map(|(i, day)| {
                submission(i as i64, JAN_1_2024 + day * DAY + 12 * HOUR, "OK", (i as i64, "A"), None, &[])
            })
            .collect();

        let stats = YearStats::compute(2024, &submissions, &[], &settings());

        assert_eq!(stats.active_days, 5);
        assert_eq!(stats.streak, 3);
        assert!(stats.streak <= stats.active_days);
        // Jan 31, then Feb 1, 2, 10 and 11
        assert_eq!(stats.activity_by_month[0], 1);
        assert_eq!(stats.activity_by_month[1], 4);
    }

    #[test]
    fn test_most_productive_day_prefers_earliest_date_on_ties() {
        let submissions = vec![
            submission(1, JAN_1_2024 + 9 * DAY, "OK", (1, "A"), None, &[]),
            submission(2, JAN_1_2024 + 9 * DAY + HOUR, "OK", (1, "B"), None, &[]),
            submission(3, JAN_1_2024 + 2 * DAY, "OK", (2, "A"), None, &[]),
            submission(4, JAN_1_2024 + 2 * DAY + HOUR, "OK", (2, "B"), None, &[]),
            submission(5, JAN_1_2024 + 5 * DAY, "OK", (3, "A"), None, &[]),
        ];

        let stats = YearStats::compute(2024, &submissions, &[], &settings());

        assert_eq!(stats.most_productive_day, Some(date(2024, 1, 3)));
        assert_eq!(stats.most_productive_day_count, 2);
    }

    #[test]
    fn test_hardest_problem_tie_goes_to_first_solved() {
        // the upstream feed lists newest first
        let submissions = vec![
            submission(2, JAN_1_2024 + 5 * DAY, "OK", (9, "F"), Some(2500), &[]),
            submission(1, JAN_1_2024 + 3 * DAY, "OK", (7, "E"), Some(2500), &[]),
        ];

        let stats = YearStats::compute(2024, &submissions, &[], &settings());

        assert_eq!(stats.hardest_problem_rating, Some(2500));
        assert_eq!(stats.hardest_problem_name.as_deref(), Some("Problem 7E"));
        assert!(stats.badges.contains(&Badge::PeakHunter));
    }

    #[test]
    fn test_fastest_ac_ignores_out_of_contest_submissions() {
        let mut practice = submission(1, JAN_1_2024 + DAY, "OK", (1, "A"), None, &[]);
        practice.relative_time_seconds = 0;
        let mut virtual_run = submission(2, JAN_1_2024 + 2 * DAY, "OK", (1, "B"), None, &[]);
        virtual_run.relative_time_seconds = -300;
        let mut live = submission(3, JAN_1_2024 + 3 * DAY, "OK", (1, "C"), None, &[]);
        live.relative_time_seconds = 600;
        let mut rejected = submission(4, JAN_1_2024 + 3 * DAY, "WRONG_ANSWER", (1, "D"), None, &[]);
        rejected.relative_time_seconds = 30;

        let stats = YearStats::compute(2024, &[practice, virtual_run, live, rejected], &[], &settings());

        assert_eq!(stats.fastest_ac_seconds, Some(600));
        assert!(!stats.badges.contains(&Badge::Speedster));
    }

    #[test]
    fn test_busy_year_earns_volume_badges() {
        let spacing = 365 * DAY / 500;
        let submissions: Vec<Submission> = (0..500)
            .map(|i| submission(i, JAN_1_2024 + i * spacing, "OK", (i, "A"), None, &[]))
            .collect();

        let stats = YearStats::compute(2024, &submissions, &[], &settings());

        assert_eq!(stats.total_submissions, 500);
        assert_eq!(stats.unique_problems_solved, 500);
        assert!(stats.badges.contains(&Badge::HardWorker));
        assert!(stats.badges.contains(&Badge::Centurion));
        assert!(stats.streak <= stats.active_days);
    }

    #[test]
    fn test_rating_progress_and_rising() {
        let ratings = vec![
            rating_change(JAN_1_2024 + 100 * DAY, 900, 1000, 2000),
            rating_change(JAN_1_2024 + 110 * DAY, 1000, 1250, 150),
        ];

        let stats = YearStats::compute(2024, &[], &ratings, &settings());

        assert_eq!(stats.contest_count, 2);
        assert_eq!(stats.start_rating, Some(900));
        assert_eq!(stats.end_rating, Some(1250));
        assert_eq!(stats.rating_change, 350);
        assert_eq!(stats.max_contest_rank, Some(150));
        assert!(stats.badges.contains(&Badge::Rising));
        // started below 1200
        assert!(!stats.badges.contains(&Badge::Climber));
    }

    #[test]
    fn test_climber_uses_rating_from_previous_year() {
        let ratings = vec![
            rating_change(JAN_1_2024 - 50 * DAY, 1100, 1300, 500),
            rating_change(JAN_1_2024 + 100 * DAY, 1250, 1400, 400),
            rating_change(JAN_1_2024 + 200 * DAY, 1400, 1520, 300),
        ];

        let stats = YearStats::compute(2024, &[], &ratings, &settings());

        assert_eq!(stats.start_rating, Some(1300));
        assert_eq!(stats.rating_change, 220);
        assert!(stats.badges.contains(&Badge::Climber));
        assert!(!stats.badges.contains(&Badge::Rising));
    }

    #[test]
    fn test_polyglot_and_languages() {
        let languages = ["GNU C++17", "Python 3", "Rust 2021", "Java 21", "Kotlin 1.9", "Rust 2021"];
        let submissions: Vec<Submission> = languages
            .iter()
            .enumerate()
            .map(|(i, language)| {
                let mut s = submission(i as i64, JAN_1_2024 + i as i64 * DAY, "OK", (1, "A"), None, &[]);
                s.programming_language = language.to_string();
                s
            })
            .collect();

        let stats = YearStats::compute(2024, &submissions, &[], &settings());

        assert_eq!(stats.language_distribution.len(), 5);
        assert_eq!(stats.top_language.as_deref(), Some("Rust 2021"));
        assert!(stats.badges.contains(&Badge::Polyglot));
    }

    #[test]
    fn test_compute_is_deterministic() {
        let submissions = vec![
            submission(3, JAN_1_2024 + 3 * DAY, "OK", (2, "A"), Some(1900), &["graphs", "dfs"]),
            submission(1, JAN_1_2024 + DAY, "OK", (1, "A"), Some(900), &["math"]),
            submission(2, JAN_1_2024 + 2 * DAY, "TIME_LIMIT_EXCEEDED", (2, "A"), Some(1900), &[]),
        ];
        let ratings = vec![rating_change(JAN_1_2024 + 4 * DAY, 1500, 1480, 800)];

        let first = YearStats::compute(2024, &submissions, &ratings, &settings());
        let second = YearStats::compute(2024, &submissions, &ratings, &settings());

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let stats = YearStats::compute(
            2024,
            &[submission(1, JAN_1_2024, "OK", (1, "A"), Some(1234), &[])],
            &[],
            &settings(),
        );
        let value = serde_json::to_value(&stats).unwrap();

        assert_eq!(value["fastestACSeconds"], serde_json::Value::Null);
        assert_eq!(value["uniqueProblemsSolved"], 1);
        assert_eq!(value["difficultyDistribution"]["1200"], 1);
        assert_eq!(value["activityByDay"]["2024-01-01"], 1);
        assert_eq!(value["verdictDistribution"]["OK"], 1);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
    }
}
