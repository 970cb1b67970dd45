// Interactive vote flow using `dialoguer`: a strictly sequential
// select -> select -> free-text pipeline. Esc on either select cancels
// the whole flow cleanly instead of surfacing an error.

use crate::api::{ApiClient, VoteRequest, VoteType};
use crate::commands;
use crate::format::Theme;
use anyhow::Result;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Run the interactive vote: pick a model from the leaderboard, pick
/// one of the three vote types, optionally add a comment, submit.
pub fn interactive_vote(api: &ApiClient, theme: &Theme) -> Result<()> {
    let spinner = spinner("Fetching models...");
    let entries = api.leaderboard();
    spinner.finish_and_clear();
    let entries = entries?;

    let items: Vec<String> = entries
        .iter()
        .map(|e| format!("{} ({}) - Rank #{}", e.model.name, e.model.slug, e.rank))
        .collect();
    let Some(index) = Select::new()
        .with_prompt("Select a model to vote on")
        .items(&items)
        .default(0)
        .interact_opt()?
    else {
        println!("Vote cancelled.");
        return Ok(());
    };
    let slug = entries[index].model.slug.clone();

    let type_items = [
        "🔥 Fire - Excellent performance",
        "😊 Mid - Average performance",
        "💀 Cursed - Poor performance",
    ];
    let Some(type_index) = Select::new()
        .with_prompt("How would you rate this model?")
        .items(&type_items)
        .default(0)
        .interact_opt()?
    else {
        println!("Vote cancelled.");
        return Ok(());
    };
    let vote_type = VoteType::ALL[type_index];

    let comment: String = Input::new()
        .with_prompt("Optional comment")
        .allow_empty(true)
        .interact_text()?;

    let request = VoteRequest {
        model_slug: slug,
        vote_type,
        comment: (!comment.is_empty()).then_some(comment),
    };

    let spinner = self::spinner("Submitting vote...");
    let result = api.vote(&request);
    spinner.finish_and_clear();
    commands::report_vote_result(theme, &request, result);
    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
