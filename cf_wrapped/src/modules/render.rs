use cf_wrapped_libs::{
    codeforces::User, rating::RankTier, time::format_duration, YearStats, YearSummary,
};
use itertools::Itertools;
use std::fmt::Write;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn user_line(user: &User) -> String {
    match user.rating {
        Some(rating) => format!(
            "{} ({}, {})",
            user.handle,
            rating,
            RankTier::from_rating(rating)
        ),
        None => format!("{} (unrated)", user.handle),
    }
}

fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

pub fn render_report(user: &User, stats: &YearStats) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{} in {}", user_line(user), stats.year);
    let _ = writeln!(out);
    let _ = writeln!(out, "Problems solved     {}", stats.unique_problems_solved);
    let _ = writeln!(
        out,
        "Submissions         {} ({} accepted, {}%)",
        stats.total_submissions, stats.accepted_submissions, stats.accept_rate
    );
    let _ = writeln!(out, "Active days         {}", stats.active_days);
    let _ = writeln!(out, "Longest streak      {} days", stats.streak);
    if let Some(day) = stats.most_productive_day {
        let _ = writeln!(
            out,
            "Best day            {} ({} solved)",
            day, stats.most_productive_day_count
        );
    }

    if stats.contest_count > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "Contests            {}", stats.contest_count);
        if let (Some(start), Some(end)) = (stats.start_rating, stats.end_rating) {
            let _ = writeln!(
                out,
                "Rating              {} -> {} ({}), {}",
                start,
                end,
                signed(stats.rating_change),
                RankTier::from_rating(end)
            );
        }
        if let (Some(rank), Some(contest)) = (stats.max_contest_rank, &stats.best_contest) {
            let _ = writeln!(out, "Best rank           #{} in {}", rank, contest);
        }
    }

    let _ = writeln!(out);
    if let (Some(rating), Some(name)) = (stats.hardest_problem_rating, &stats.hardest_problem_name) {
        let _ = writeln!(out, "Hardest problem     {} ({})", name, rating);
    }
    if stats.avg_difficulty > 0 {
        let _ = writeln!(out, "Average difficulty  {}", stats.avg_difficulty);
    }
    if let Some(seconds) = stats.fastest_ac_seconds {
        let _ = writeln!(out, "Fastest accept      {}", format_duration(seconds));
    }
    if let Some(language) = &stats.top_language {
        let _ = writeln!(out, "Top language        {}", language);
    }
    if let Some(tag) = &stats.top_tag {
        let _ = writeln!(out, "Top tag             {}", tag);
    }
    let _ = writeln!(
        out,
        "Night owl / early   {} / {}",
        stats.night_owl_count, stats.early_bird_count
    );
    if stats.got_hacked > 0 {
        let _ = writeln!(out, "Hacked              {}", stats.got_hacked);
    }

    if !stats.verdict_distribution.is_empty() {
        let verdicts = stats
            .verdict_distribution
            .iter()
            .sorted_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)))
            .map(|(verdict, count)| format!("{} {}", verdict.label(), count))
            .join(", ");
        let _ = writeln!(out, "Verdicts            {}", verdicts);
    }

    let peak = stats.activity_by_month.iter().copied().max().unwrap_or(0);
    if peak > 0 {
        let _ = writeln!(out);
        for (month, count) in MONTHS.iter().zip(stats.activity_by_month.iter()) {
            let width = (*count as usize * 30 + peak as usize - 1) / peak as usize;
            let _ = writeln!(out, "{} {:>4} {}", month, count, "#".repeat(width));
        }
    }

    let _ = writeln!(out);
    if stats.badges.is_empty() {
        let _ = writeln!(out, "No badges this year");
    } else {
        let _ = writeln!(out, "Badges");
        for badge in stats.badges.iter() {
            let info = badge.info();
            let _ = writeln!(out, "  {} {:?}: {}", info.icon, badge, info.description);
        }
    }

    out
}

pub fn render_years(user: &User, summaries: &[YearSummary]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", user_line(user));
    if summaries.is_empty() {
        let _ = writeln!(out, "No completed year with activity");
        return out;
    }

    let _ = writeln!(out, "{:<6}{:>8}{:>10}{:>8}{:>10}", "year", "solved", "contests", "rating", "best");
    for summary in summaries.iter() {
        let best = summary
            .best_rank
            .map(|rank| format!("#{}", rank))
            .unwrap_or_else(|| String::from("-"));
        let _ = writeln!(
            out,
            "{:<6}{:>8}{:>10}{:>8}{:>10}",
            summary.year,
            summary.problems_solved,
            summary.contest_count,
            signed(summary.rating_change),
            best
        );
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use cf_wrapped_libs::{badge::Badge, codeforces::Verdict};
    use std::collections::BTreeMap;

    fn user(rating: Option<i32>) -> User {
        User {
            handle: String::from("alice"),
            avatar: None,
            rating,
            max_rating: rating,
            rank: None,
            max_rank: None,
            contribution: 0,
            organization: None,
            registration_time_seconds: None,
        }
    }

    fn empty_stats() -> YearStats {
        YearStats {
            year: 2024,
            total_submissions: 0,
            accepted_submissions: 0,
            unique_problems_solved: 0,
            accept_rate: 0,
            rating_change: 0,
            start_rating: None,
            end_rating: None,
            contest_count: 0,
            max_contest_rank: None,
            best_contest: None,
            tag_distribution: BTreeMap::new(),
            difficulty_distribution: BTreeMap::new(),
            language_distribution: BTreeMap::new(),
            verdict_distribution: BTreeMap::new(),
            activity_by_month: [0; 12],
            activity_by_day: BTreeMap::new(),
            fastest_ac_seconds: None,
            hardest_problem_rating: None,
            hardest_problem_name: None,
            active_days: 0,
            streak: 0,
            night_owl_count: 0,
            early_bird_count: 0,
            most_productive_day: None,
            most_productive_day_count: 0,
            avg_difficulty: 0,
            got_hacked: 0,
            top_language: None,
            top_tag: None,
            badges: Vec::new(),
        }
    }

    #[test]
    fn test_render_empty_report() {
        let text = render_report(&user(None), &empty_stats());

        assert!(text.starts_with("alice (unrated) in 2024"));
        assert!(text.contains("No badges this year"));
        assert!(!text.contains("Contests"));
    }

    #[test]
    fn test_render_report() {
        let mut stats = empty_stats();
        stats.total_submissions = 4;
        stats.accepted_submissions = 3;
        stats.accept_rate = 75;
        stats.contest_count = 2;
        stats.start_rating = Some(1500);
        stats.end_rating = Some(1620);
        stats.rating_change = 120;
        stats.max_contest_rank = Some(42);
        stats.best_contest = Some(String::from("Round 900"));
        stats.fastest_ac_seconds = Some(185);
        stats.activity_by_month[2] = 3;
        stats.verdict_distribution.insert(Verdict::Accepted, 3);
        stats.verdict_distribution.insert(Verdict::WrongAnswer, 1);
        stats.badges = vec![Badge::Speedster];

        let text = render_report(&user(Some(1620)), &stats);

        assert!(text.contains("alice (1620, expert) in 2024"));
        assert!(text.contains("4 (3 accepted, 75%)"));
        assert!(text.contains("1500 -> 1620 (+120), expert"));
        assert!(text.contains("#42 in Round 900"));
        assert!(text.contains("Fastest accept      3m 5s"));
        assert!(text.contains(&format!("Mar    3 {}", "#".repeat(30))));
        assert!(text.contains("Speedster"));
        let accepted = text.find(Verdict::Accepted.label()).unwrap();
        let wrong = text.find(Verdict::WrongAnswer.label()).unwrap();
        assert!(accepted < wrong);
    }

    #[test]
    fn test_render_years() {
        let summaries = vec![YearSummary {
            year: 2023,
            problems_solved: 12,
            contest_count: 3,
            rating_change: -40,
            best_rank: None,
            has_activity: true,
        }];

        let text = render_years(&user(Some(1400)), &summaries);

        assert!(text.contains("alice (1400, specialist)"));
        assert!(text.lines().any(|line| line.starts_with("2023") && line.contains("-40") && line.ends_with('-')));
        assert!(render_years(&user(None), &[]).contains("No completed year"));
    }
}
