// Output formatting. Every function takes a `Theme` explicitly so the
// rendered text is deterministic and testable without a terminal:
// `Theme::plain()` emits no ANSI codes at all.

use crate::api::{LeaderboardEntry, Model, RateLimitStatus, VoteType};
use crossterm::style::{style, Attribute, Color, Stylize};

const HIGHLIGHT: Color = Color::Rgb { r: 255, g: 165, b: 0 };

const TABLE_HEADER: [&str; 6] = ["Rank", "Model", "Vibe Score", "Fire", "Mid", "Cursed"];
const COL_WIDTHS: [usize; 6] = [6, 30, 11, 6, 5, 6];

/// Presentation configuration, passed to every output-producing
/// function rather than read from ambient global state.
#[derive(Clone, Copy, Debug)]
pub struct Theme {
    colored: bool,
}

impl Theme {
    /// Colored unless the conventional `NO_COLOR` variable is set.
    pub fn from_env() -> Self {
        Theme {
            colored: std::env::var_os("NO_COLOR").is_none(),
        }
    }

    pub fn plain() -> Self {
        Theme { colored: false }
    }

    fn paint(&self, s: &str, color: Color) -> String {
        if self.colored {
            style(s).with(color).to_string()
        } else {
            s.to_string()
        }
    }

    fn paint_bold(&self, s: &str, color: Color) -> String {
        if self.colored {
            style(s).with(color).attribute(Attribute::Bold).to_string()
        } else {
            s.to_string()
        }
    }

    pub fn fire(&self, s: &str) -> String {
        self.paint(s, Color::Green)
    }

    pub fn mid(&self, s: &str) -> String {
        self.paint(s, Color::Yellow)
    }

    pub fn cursed(&self, s: &str) -> String {
        self.paint(s, Color::Red)
    }

    pub fn highlight(&self, s: &str) -> String {
        self.paint(s, HIGHLIGHT)
    }

    pub fn meta(&self, s: &str) -> String {
        self.paint(s, Color::DarkGrey)
    }

    pub fn header(&self, s: &str) -> String {
        self.paint_bold(s, HIGHLIGHT)
    }

    pub fn success(&self, s: &str) -> String {
        self.paint(s, Color::Green)
    }

    pub fn error(&self, s: &str) -> String {
        self.paint(s, Color::Red)
    }
}

pub fn format_vote_type(theme: &Theme, vote: VoteType) -> String {
    match vote {
        VoteType::Fire => theme.fire(vote.label()),
        VoteType::Mid => theme.mid(vote.label()),
        VoteType::Cursed => theme.cursed(vote.label()),
    }
}

/// One decimal place, colored by score band.
pub fn format_vibe_score(theme: &Theme, score: f64) -> String {
    let text = format!("{:.1}", score);
    if score >= 80.0 {
        theme.fire(&text)
    } else if score >= 60.0 {
        theme.mid(&text)
    } else if score >= 40.0 {
        theme.highlight(&text)
    } else {
        theme.cursed(&text)
    }
}

/// Minutes until the quota window resets, rounded up and never
/// negative. Both arguments are epoch milliseconds.
pub fn minutes_until_reset(reset_ms: i64, now_ms: i64) -> i64 {
    let diff = reset_ms - now_ms;
    if diff <= 0 {
        0
    } else {
        (diff + 59_999) / 60_000
    }
}

pub fn format_rate_limit(theme: &Theme, status: &RateLimitStatus, now_ms: i64) -> String {
    let minutes = minutes_until_reset(status.reset_time, now_ms);
    theme.highlight(&format!(
        "{}/{} votes remaining. Next vote resets in {} minutes.",
        status.remaining, status.max_votes, minutes
    ))
}

/// Stats table for a single model. `rank` is absent for un-ranked
/// snapshots such as the one a vote response carries.
pub fn format_model_stats(theme: &Theme, model: &Model, rank: Option<u32>) -> String {
    let rank_text = match rank {
        Some(r) => format!("#{}", r),
        None => "-".to_string(),
    };
    let mut out = header_row(theme);
    out.push('\n');
    out.push_str(&model_row(theme, model, &rank_text));
    out
}

pub fn format_leaderboard(theme: &Theme, entries: &[LeaderboardEntry], count: usize) -> String {
    let shown = &entries[..entries.len().min(count)];
    let mut out = theme.header(&format!("Top {} Models", shown.len()));
    out.push_str("\n\n");
    out.push_str(&header_row(theme));
    for entry in shown {
        out.push('\n');
        out.push_str(&model_row(theme, &entry.model, &format!("#{}", entry.rank)));
    }
    out
}

/// All models grouped by category, in first-seen category order.
pub fn format_models_list(theme: &Theme, entries: &[LeaderboardEntry]) -> String {
    let mut categories: Vec<(&str, Vec<&LeaderboardEntry>)> = Vec::new();
    for entry in entries {
        match categories
            .iter_mut()
            .find(|(c, _)| *c == entry.model.category)
        {
            Some((_, group)) => group.push(entry),
            None => categories.push((entry.model.category.as_str(), vec![entry])),
        }
    }

    let mut out = theme.header(&format!("Available Models ({})", entries.len()));
    out.push('\n');
    for (category, group) in categories {
        out.push('\n');
        out.push_str(&theme.highlight(category));
        for entry in group {
            out.push('\n');
            out.push_str(&format!(
                "  {} Score: {:>5} ({} votes)",
                pad(&entry.model.slug, 30),
                format!("{:.1}", entry.model.vibe_score),
                entry.model.votes.total
            ));
        }
        out.push('\n');
    }
    out
}

pub fn format_success(theme: &Theme, message: &str, details: Option<&str>) -> String {
    match details {
        Some(d) => format!("{}\n{}", theme.success(message), theme.meta(d)),
        None => theme.success(message),
    }
}

pub fn format_error(theme: &Theme, message: &str, details: Option<&str>) -> String {
    match details {
        Some(d) => format!("{}\n{}", theme.error(message), theme.meta(d)),
        None => theme.error(message),
    }
}

// Cells are padded before painting; ANSI escapes after the pad would
// break column alignment.
fn pad(s: &str, width: usize) -> String {
    format!("{:<width$}", s)
}

fn header_row(theme: &Theme) -> String {
    TABLE_HEADER
        .iter()
        .zip(COL_WIDTHS)
        .map(|(h, w)| theme.meta(&pad(h, w)))
        .collect::<Vec<_>>()
        .join("")
}

fn model_row(theme: &Theme, model: &Model, rank_text: &str) -> String {
    let score_text = format!("{:.1}", model.vibe_score);
    let score_padding = " ".repeat(COL_WIDTHS[2].saturating_sub(score_text.len()));
    [
        theme.highlight(&pad(rank_text, COL_WIDTHS[0])),
        pad(&model.slug, COL_WIDTHS[1]),
        format!("{}{}", format_vibe_score(theme, model.vibe_score), score_padding),
        theme.fire(&pad(&model.votes.fire.to_string(), COL_WIDTHS[3])),
        theme.mid(&pad(&model.votes.mid.to_string(), COL_WIDTHS[4])),
        theme.cursed(&pad(&model.votes.cursed.to_string(), COL_WIDTHS[5])),
    ]
    .join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::VoteTally;

    fn entry(rank: u32, slug: &str, category: &str, score: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            rank,
            model: Model {
                slug: slug.to_string(),
                name: slug.to_string(),
                category: category.to_string(),
                vibe_score: score,
                votes: VoteTally {
                    fire: 10,
                    mid: 5,
                    cursed: 1,
                    total: 16,
                },
            },
        }
    }

    #[test]
    fn vote_type_labels() {
        let theme = Theme::plain();
        assert_eq!(format_vote_type(&theme, VoteType::Fire), "Fire");
        assert_eq!(format_vote_type(&theme, VoteType::Mid), "Mid");
        assert_eq!(format_vote_type(&theme, VoteType::Cursed), "Cursed");
    }

    #[test]
    fn vibe_score_is_one_decimal_in_every_band() {
        let theme = Theme::plain();
        assert_eq!(format_vibe_score(&theme, 85.47), "85.5");
        assert_eq!(format_vibe_score(&theme, 65.0), "65.0");
        assert_eq!(format_vibe_score(&theme, 42.0), "42.0");
        assert_eq!(format_vibe_score(&theme, 0.0), "0.0");
    }

    #[test]
    fn minutes_until_reset_rounds_up() {
        assert_eq!(minutes_until_reset(61_000, 0), 2);
        assert_eq!(minutes_until_reset(60_000, 0), 1);
        assert_eq!(minutes_until_reset(1_000, 0), 1);
    }

    #[test]
    fn minutes_until_reset_never_negative() {
        assert_eq!(minutes_until_reset(0, 1_000_000), 0);
        assert_eq!(minutes_until_reset(500, 500), 0);
    }

    #[test]
    fn zero_remaining_status_renders_zero_and_nonnegative_minutes() {
        let theme = Theme::plain();
        let status = RateLimitStatus {
            remaining: 0,
            reset_time: 1_700_000_000_000,
            max_votes: 3,
        };
        // Reset already in the past: minutes clamp to zero.
        let line = format_rate_limit(&theme, &status, 1_700_000_600_000);
        assert_eq!(line, "0/3 votes remaining. Next vote resets in 0 minutes.");
    }

    #[test]
    fn leaderboard_truncates_to_count() {
        let theme = Theme::plain();
        let entries = vec![
            entry(1, "gpt-4o", "Frontier", 87.5),
            entry(2, "claude-3", "Frontier", 84.1),
            entry(3, "llama-3-70b", "Open", 71.2),
        ];
        let out = format_leaderboard(&theme, &entries, 2);
        assert!(out.starts_with("Top 2 Models"));
        assert!(out.contains("gpt-4o"));
        assert!(out.contains("claude-3"));
        assert!(!out.contains("llama-3-70b"));
    }

    #[test]
    fn model_stats_shows_dash_without_rank() {
        let theme = Theme::plain();
        let e = entry(4, "gpt-4o", "Frontier", 87.5);
        let ranked = format_model_stats(&theme, &e.model, Some(e.rank));
        assert!(ranked.contains("#4"));
        let unranked = format_model_stats(&theme, &e.model, None);
        assert!(unranked.contains("-     "));
        assert!(!unranked.contains("#4"));
    }

    #[test]
    fn models_list_groups_by_category_in_first_seen_order() {
        let theme = Theme::plain();
        let entries = vec![
            entry(1, "gpt-4o", "Frontier", 87.5),
            entry(2, "llama-3-70b", "Open", 71.2),
            entry(3, "claude-3", "Frontier", 84.1),
        ];
        let out = format_models_list(&theme, &entries);
        assert!(out.starts_with("Available Models (3)"));
        let frontier = out.find("Frontier").unwrap();
        let open = out.find("Open").unwrap();
        assert!(frontier < open);
        // claude-3 lands under Frontier, before the Open group.
        assert!(out.find("claude-3").unwrap() < open);
    }
}
