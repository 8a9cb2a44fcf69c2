use serde::{Deserialize, Serialize};

/// Year counters the badge predicates are evaluated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeCounters {
    pub night_owl_count: u32,
    pub early_bird_count: u32,
    pub streak: u32,
    pub unique_solved: u32,
    pub fastest_ac_seconds: Option<i64>,
    pub total_submissions: u32,
    pub distinct_languages: usize,
    pub max_tag_count: u32,
    pub distinct_tags: usize,
    /// Rating at the start of the year, `None` without contests in the year.
    pub start_rating: Option<i32>,
    pub rating_change: i32,
    pub hardest_problem_rating: Option<i32>,
    pub contest_count: usize,
    pub max_day_count: u32,
    pub wrong_answer_count: u32,
    /// Gained at least 200 rating within 30 days at some point of the year.
    pub rapid_rise: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Badge {
    NightOwl,
    EarlyBird,
    Consistent,
    Marathon,
    Centurion,
    Speedster,
    HardWorker,
    Polyglot,
    Specialist,
    Explorer,
    Climber,
    PeakHunter,
    Contestant,
    PerfectDay,
    Survivor,
    Rising,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeInfo {
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

impl Badge {
    /// Display order.
    pub const ALL: [Badge; 16] = [
        Badge::NightOwl,
        Badge::EarlyBird,
        Badge::Consistent,
        Badge::Marathon,
        Badge::Centurion,
        Badge::Speedster,
        Badge::HardWorker,
        Badge::Polyglot,
        Badge::Specialist,
        Badge::Explorer,
        Badge::Climber,
        Badge::PeakHunter,
        Badge::Contestant,
        Badge::PerfectDay,
        Badge::Survivor,
        Badge::Rising,
    ];

    pub fn is_earned(&self, c: &BadgeCounters) -> bool {
        match self {
            Badge::NightOwl => c.night_owl_count >= 100,
            Badge::EarlyBird => c.early_bird_count >= 50,
            Badge::Consistent => c.streak >= 50,
            Badge::Marathon => c.streak >= 100,
            Badge::Centurion => c.unique_solved >= 100,
            Badge::Speedster => c.fastest_ac_seconds.map_or(false, |seconds| seconds <= 60),
            Badge::HardWorker => c.total_submissions >= 500,
            Badge::Polyglot => c.distinct_languages >= 5,
            Badge::Specialist => c.max_tag_count >= 100,
            Badge::Explorer => c.distinct_tags >= 10,
            Badge::Climber => c.start_rating.unwrap_or(0) >= 1200 && c.rating_change >= 200,
            Badge::PeakHunter => c.hardest_problem_rating.map_or(false, |rating| rating >= 2400),
            Badge::Contestant => c.contest_count >= 30,
            Badge::PerfectDay => c.max_day_count >= 20,
            Badge::Survivor => c.wrong_answer_count >= 100 && c.unique_solved > 0,
            Badge::Rising => c.rapid_rise,
        }
    }

    pub fn info(&self) -> BadgeInfo {
        let (icon, color, description) = match self {
            Badge::NightOwl => ("🦉", "#6366f1", "100+ submissions between midnight and 5am"),
            Badge::EarlyBird => ("🐦", "#f59e0b", "50+ submissions between 5am and 8am"),
            Badge::Consistent => ("📅", "#22c55e", "solved something 50 days in a row"),
            Badge::Marathon => ("🏃", "#ef4444", "solved something 100 days in a row"),
            Badge::Centurion => ("💯", "#8b5cf6", "100+ distinct problems solved"),
            Badge::Speedster => ("⚡", "#eab308", "accepted within the first minute of a contest"),
            Badge::HardWorker => ("💪", "#f97316", "500+ submissions"),
            Badge::Polyglot => ("🌐", "#06b6d4", "5+ programming languages"),
            Badge::Specialist => ("🎯", "#ec4899", "100+ problems of a single tag"),
            Badge::Explorer => ("🧭", "#14b8a6", "problems across 10+ tags"),
            Badge::Climber => ("📈", "#10b981", "started at 1200+ and gained 200+ rating"),
            Badge::PeakHunter => ("🏔️", "#6366f1", "solved a problem rated 2400+"),
            Badge::Contestant => ("🏆", "#f59e0b", "30+ rated contests"),
            Badge::PerfectDay => ("✨", "#a855f7", "20+ accepted submissions in one day"),
            Badge::Survivor => ("🔥", "#ef4444", "kept going through 100+ wrong answers"),
            Badge::Rising => ("🚀", "#3b82f6", "gained 200+ rating within 30 days"),
        };

        BadgeInfo {
            icon,
            color,
            description,
        }
    }
}

/// Every badge earned by `counters`, in display order.
pub fn evaluate(counters: &BadgeCounters) -> Vec<Badge> {
    Badge::ALL
        .iter()
        .copied()
        .filter(|badge| badge.is_earned(counters))
        .collect()
}
