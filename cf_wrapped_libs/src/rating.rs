use crate::{codeforces::model::RatingChange, window::YearWindow};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, fmt};

pub const RISING_WINDOW_SECONDS: i64 = 30 * 24 * 3600;
pub const RISING_MIN_GAIN: i32 = 200;

/// Rating history ordered by update time. Entries sharing a timestamp keep feed order.
pub fn chronological(history: &[RatingChange]) -> Vec<&RatingChange> {
    history
        .iter()
        .sorted_by_key(|change| change.rating_update_time_seconds)
        .collect()
}

/// Entries of a chronological history that fall inside `window`.
pub fn in_window<'a>(history: &[&'a RatingChange], window: &YearWindow) -> Vec<&'a RatingChange> {
    history
        .iter()
        .copied()
        .filter(|change| window.contains(change.rating_update_time_seconds))
        .collect()
}

/// How a user's rating moved across the contests of one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingProgress {
    /// Rating after the last contest before the year, or before the first contest of the year.
    pub start_rating: i32,
    /// Rating after the last contest of the year.
    pub end_rating: i32,
    pub best_rank: i32,
    pub best_contest: String,
    pub contest_count: usize,
}

impl RatingProgress {
    /// `history` must be chronological. Returns `None` when no contest falls in the year.
    pub fn from_sorted(history: &[&RatingChange], window: &YearWindow) -> Option<Self> {
        let in_year = in_window(history, window);

        let first = in_year.first()?;
        let last = in_year.last()?;

        let start_rating = history
            .iter()
            .filter(|change| window.is_before(change.rating_update_time_seconds))
            .last()
            .map(|change| change.new_rating)
            .unwrap_or(first.old_rating);

        // min_by_key keeps the first of equal minima
        let best = in_year.iter().min_by_key(|change| change.rank)?;

        Some(Self {
            start_rating,
            end_rating: last.new_rating,
            best_rank: best.rank,
            best_contest: best.contest_name.clone(),
            contest_count: in_year.len(),
        })
    }

    pub fn delta(&self) -> i32 {
        self.end_rating - self.start_rating
    }
}

/// Whether some contest `j` gained at least `min_gain` over the pre-contest rating of an
/// earlier contest `i` no more than `within_seconds` before it.
///
/// `changes` must be chronological. Runs a sliding-window minimum over `old_rating`, so
/// the scan is linear in the number of contests.
pub fn has_rapid_rise(changes: &[&RatingChange], within_seconds: i64, min_gain: i32) -> bool {
    let mut window: VecDeque<usize> = VecDeque::new();

    for (j, current) in changes.iter().enumerate() {
        while let Some(&front) = window.front() {
            let elapsed = current.rating_update_time_seconds - changes[front].rating_update_time_seconds;
            if elapsed > within_seconds {
                window.pop_front();
            } else {
                break;
            }
        }

        if let Some(&lowest) = window.front() {
            if current.new_rating - changes[lowest].old_rating >= min_gain {
                return true;
            }
        }

        while let Some(&back) = window.back() {
            if changes[back].old_rating >= current.old_rating {
                window.pop_back();
            } else {
                break;
            }
        }
        window.push_back(j);
    }

    false
}

/// Codeforces rank title for a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankTier {
    Newbie,
    Pupil,
    Specialist,
    Expert,
    CandidateMaster,
    Master,
    InternationalMaster,
    Grandmaster,
    InternationalGrandmaster,
    LegendaryGrandmaster,
}

impl RankTier {
    pub fn from_rating(rating: i32) -> Self {
        match rating {
            i32::MIN..=1199 => RankTier::Newbie,
            1200..=1399 => RankTier::Pupil,
            1400..=1599 => RankTier::Specialist,
            1600..=1899 => RankTier::Expert,
            1900..=2099 => RankTier::CandidateMaster,
            2100..=2299 => RankTier::Master,
            2300..=2399 => RankTier::InternationalMaster,
            2400..=2599 => RankTier::Grandmaster,
            2600..=2999 => RankTier::InternationalGrandmaster,
            _ => RankTier::LegendaryGrandmaster,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RankTier::Newbie => "#AAAAAA",
            RankTier::Pupil => "#77FF77",
            RankTier::Specialist => "#55DDBB",
            RankTier::Expert => "#7777FF",
            RankTier::CandidateMaster => "#FF77FF",
            RankTier::Master => "#FFCC77",
            RankTier::InternationalMaster => "#FFBB55",
            RankTier::Grandmaster => "#FF5555",
            RankTier::InternationalGrandmaster | RankTier::LegendaryGrandmaster => "#FF3333",
        }
    }
}

impl fmt::Display for RankTier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            RankTier::Newbie => "newbie",
            RankTier::Pupil => "pupil",
            RankTier::Specialist => "specialist",
            RankTier::Expert => "expert",
            RankTier::CandidateMaster => "candidate master",
            RankTier::Master => "master",
            RankTier::InternationalMaster => "international master",
            RankTier::Grandmaster => "grandmaster",
            RankTier::InternationalGrandmaster => "international grandmaster",
            RankTier::LegendaryGrandmaster => "legendary grandmaster",
        };
        write!(f, "{}", name)
    }
}
