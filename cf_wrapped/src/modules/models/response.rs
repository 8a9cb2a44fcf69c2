use cf_wrapped_libs::{
    badge::Badge,
    codeforces::{RatingChange, User},
    rating::RankTier,
    YearStats, YearSummary,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearsResponse {
    pub user: User,
    pub rank_tier: Option<RankTierView>,
    pub years: Vec<YearSummary>,
}

impl YearsResponse {
    pub fn new(user: User, years: Vec<YearSummary>) -> Self {
        Self {
            rank_tier: user.rating.map(RankTierView::from_rating),
            user,
            years,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub user: User,
    pub rank_tier: Option<RankTierView>,
    pub stats: YearStats,
    pub badge_details: Vec<BadgeView>,
    pub rating_history: Vec<RatingChange>,
}

impl ReportResponse {
    pub fn new(user: User, stats: YearStats, rating_history: Vec<RatingChange>) -> Self {
        let badge_details = stats.badges.iter().map(BadgeView::from).collect();
        Self {
            // tier reached by the end of the year, the current one without contests
            rank_tier: stats
                .end_rating
                .or(user.rating)
                .map(RankTierView::from_rating),
            user,
            stats,
            badge_details,
            rating_history,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RankTierView {
    pub name: String,
    pub color: &'static str,
}

impl RankTierView {
    fn from_rating(rating: i32) -> Self {
        let tier = RankTier::from_rating(rating);
        Self {
            name: tier.to_string(),
            color: tier.color(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BadgeView {
    pub badge: Badge,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

impl From<&Badge> for BadgeView {
    fn from(badge: &Badge) -> Self {
        let info = badge.info();
        Self {
            badge: *badge,
            icon: info.icon,
            color: info.color,
            description: info.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl ToString) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}
