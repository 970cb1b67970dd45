// Library root
// -----------
// This crate exposes the library surface for the `vibebench` binary.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the VibeBench service (vote,
//   leaderboard, per-model stats, rate-limit status) and the typed
//   request/response data model.
// - `suggest`: fuzzy matching of mistyped model slugs against the
//   known slugs, used for "did you mean" recovery.
// - `format`: text and table rendering with an injected `Theme` so
//   output is testable without a terminal.
// - `commands`: one entry point per subcommand; all errors are caught
//   here and printed, never propagated.
// - `ui`: the interactive vote flow (dialoguer prompts).
pub mod api;
pub mod commands;
pub mod format;
pub mod suggest;
pub mod ui;
