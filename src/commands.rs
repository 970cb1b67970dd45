// Command entry points, one per subcommand. Every function here
// catches the errors of its operation and prints a formatted message;
// nothing is allowed to escape and crash the process.

use crate::api::{ApiClient, ApiError, VoteRequest, VoteResponse, VoteType};
use crate::format::{self, Theme};
use crate::suggest;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Suggestions weaker than this are noise: a lone shared word is not
/// enough evidence to offer an alternative.
const SUGGESTION_THRESHOLD: u32 = 3;

/// At most this many alternatives in a not-found message.
const MAX_SHOWN_SUGGESTIONS: usize = 3;

/// `vote [model] [type] [comment]`. Falls back to the interactive flow
/// when model or type is missing.
pub fn vote(
    api: &ApiClient,
    theme: &Theme,
    model: Option<String>,
    vote_type: Option<String>,
    comment: Option<String>,
) {
    let (slug, type_text) = match (model, vote_type) {
        (Some(slug), Some(type_text)) => (slug, type_text),
        _ => {
            if let Err(e) = crate::ui::interactive_vote(api, theme) {
                let detail = e.to_string();
                println!(
                    "{}",
                    format::format_error(theme, "Interactive vote failed", Some(&detail))
                );
            }
            return;
        }
    };

    let Ok(vote_type) = VoteType::from_str(&type_text) else {
        println!(
            "{}",
            format::format_error(theme, "Invalid vote type. Use: fire, mid, or cursed", None)
        );
        return;
    };

    // Validate the slug against the leaderboard before spending a vote.
    let entries = match api.leaderboard() {
        Ok(entries) => entries,
        Err(e) => {
            print_api_error(theme, "Failed to submit vote", &e);
            return;
        }
    };
    if !entries.iter().any(|e| e.model.slug == slug) {
        let known: Vec<String> = entries.iter().map(|e| e.model.slug.clone()).collect();
        print_not_found(theme, &slug, &known);
        return;
    }

    let request = VoteRequest {
        model_slug: slug,
        vote_type,
        comment: comment.filter(|c| !c.is_empty()),
    };
    let result = api.vote(&request);
    report_vote_result(theme, &request, result);
}

/// `stats <model>`.
pub fn stats(api: &ApiClient, theme: &Theme, slug: &str) {
    match api.model_stats(slug) {
        Ok(entry) => println!(
            "{}",
            format::format_model_stats(theme, &entry.model, Some(entry.rank))
        ),
        Err(ApiError::NotFound(_)) => {
            // Refetch for the candidate set; the miss path is rare.
            let known: Vec<String> = api
                .leaderboard()
                .map(|entries| entries.iter().map(|e| e.model.slug.clone()).collect())
                .unwrap_or_default();
            print_not_found(theme, slug, &known);
        }
        Err(e) => print_api_error(theme, "Failed to get model stats", &e),
    }
}

/// `top [--count N]`.
pub fn top(api: &ApiClient, theme: &Theme, count: usize) {
    match api.leaderboard() {
        Ok(entries) => println!("{}", format::format_leaderboard(theme, &entries, count)),
        Err(e) => print_api_error(theme, "Failed to get leaderboard", &e),
    }
}

/// `models`.
pub fn models(api: &ApiClient, theme: &Theme) {
    match api.leaderboard() {
        Ok(entries) => println!("{}", format::format_models_list(theme, &entries)),
        Err(e) => print_api_error(theme, "Failed to get models list", &e),
    }
}

/// `status`.
pub fn status(api: &ApiClient, theme: &Theme) {
    match api.rate_limit_status() {
        Ok(status) => println!("{}", format::format_rate_limit(theme, &status, now_ms())),
        Err(e) => print_api_error(theme, "Failed to get rate limit status", &e),
    }
}

/// Print the outcome of a vote round trip. Shared with the interactive
/// flow, which builds its request from prompts instead of arguments.
pub(crate) fn report_vote_result(
    theme: &Theme,
    request: &VoteRequest,
    result: Result<VoteResponse, ApiError>,
) {
    match result {
        Ok(response) => report_vote_response(theme, request, &response),
        Err(e) => print_api_error(theme, "Failed to submit vote", &e),
    }
}

fn report_vote_response(theme: &Theme, request: &VoteRequest, response: &VoteResponse) {
    if !response.success {
        println!(
            "{}",
            format::format_error(theme, "Vote failed", Some(&response.message))
        );
        return;
    }
    let headline = format!(
        "Voted {} for {}",
        format::format_vote_type(theme, request.vote_type),
        request.model_slug
    );
    println!("{}", format::format_success(theme, &headline, None));
    if let Some(model) = &response.updated_model {
        println!();
        println!("{}", format::format_model_stats(theme, model, None));
    }
    if let Some(remaining) = response.rate_limit_remaining {
        println!();
        println!("Votes remaining: {}", remaining);
    }
}

/// Ranked alternatives strong enough to show in a not-found message.
fn alternatives(slug: &str, known: &[String]) -> Vec<String> {
    suggest::rank(slug, known)
        .into_iter()
        .filter(|s| s.score >= SUGGESTION_THRESHOLD)
        .take(MAX_SHOWN_SUGGESTIONS)
        .map(|s| s.slug)
        .collect()
}

fn print_not_found(theme: &Theme, slug: &str, known: &[String]) {
    let message = format!("Model not found: {}", slug);
    let alternatives = alternatives(slug, known);
    if alternatives.is_empty() {
        println!(
            "{}",
            format::format_error(
                theme,
                &message,
                Some("Run `vibebench models` to see the full list.")
            )
        );
        return;
    }
    println!("{}", format::format_error(theme, &message, None));
    println!();
    println!("Did you mean:");
    for alt in alternatives {
        println!("  {}", theme.highlight(&alt));
    }
}

fn print_api_error(theme: &Theme, context: &str, err: &ApiError) {
    let detail = match err {
        ApiError::RateLimited {
            reset_time: Some(reset),
        } => format!(
            "Rate limit exceeded. Try again in {} minutes.",
            format::minutes_until_reset(*reset, now_ms())
        ),
        ApiError::RateLimited { reset_time: None } => {
            "Rate limit exceeded. Try again later.".to_string()
        }
        other => other.to_string(),
    };
    println!("{}", format::format_error(theme, context, Some(&detail)));
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
