// Fuzzy slug matching: when a user types a slug the leaderboard does
// not contain, rank the known slugs by similarity and offer the best
// ones as alternatives. Pure synchronous computation, no side effects.

/// Maximum number of identifiers `suggest` returns.
pub const MAX_SUGGESTIONS: usize = 5;

/// Score assigned to an exact (case-insensitive) match. Above anything
/// the composite scoring can produce for a non-exact candidate.
const EXACT_MATCH_SCORE: u32 = 100;

/// Substring containment in either direction.
const SUBSTRING_BONUS: u32 = 10;

/// Per shared word (split on `-`, `.`, `_`).
const SHARED_WORD_BONUS: u32 = 2;

/// A candidate identifier with its similarity score. Higher is more
/// similar. Ephemeral, computed per query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub slug: String,
    pub score: u32,
}

/// Rank every candidate against `query`, most similar first, dropping
/// candidates that score zero. An exact case-insensitive match
/// short-circuits to that single candidate. Ties keep the candidates'
/// original relative order (stable sort).
pub fn rank(query: &str, candidates: &[String]) -> Vec<Suggestion> {
    let q = query.to_lowercase();
    if let Some(exact) = candidates.iter().find(|c| c.to_lowercase() == q) {
        return vec![Suggestion {
            slug: exact.clone(),
            score: EXACT_MATCH_SCORE,
        }];
    }

    let mut ranked: Vec<Suggestion> = candidates
        .iter()
        .filter_map(|c| {
            let score = score(&q, &c.to_lowercase());
            (score > 0).then(|| Suggestion {
                slug: c.clone(),
                score,
            })
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

/// Top `limit` suggestions for `query`, identifiers only.
pub fn suggest(query: &str, candidates: &[String], limit: usize) -> Vec<String> {
    rank(query, candidates)
        .into_iter()
        .take(limit)
        .map(|s| s.slug)
        .collect()
}

/// Composite similarity score over already-lowercased strings:
/// substring containment, edit-distance proximity (within 3 edits),
/// and shared words.
fn score(query: &str, candidate: &str) -> u32 {
    let mut score = 0;

    if query.contains(candidate) || candidate.contains(query) {
        score += SUBSTRING_BONUS;
    }

    let distance = levenshtein(query, candidate);
    if distance <= 3 {
        score += 5 - distance as u32;
    }

    for qw in words(query) {
        if words(candidate).any(|cw| qw.contains(cw) || cw.contains(qw)) {
            score += SHARED_WORD_BONUS;
        }
    }

    score
}

fn words(s: &str) -> impl Iterator<Item = &str> {
    s.split(|c: char| matches!(c, '-' | '.' | '_'))
        .filter(|w| !w.is_empty())
}

/// Classic Levenshtein distance with unit insert/delete/substitute
/// costs, computed over two rolling rows of the DP table.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.copy_from_slice(&curr);
    }
    prev[b.len()]
}
