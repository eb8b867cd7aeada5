//! YouTube search and direct-play responses

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use super::{Effect, Response};

/// Tokens removed from the command to leave the search query. Substring
/// removal, not word-boundary; the quirk is part of the contract and
/// deliberately not hardened.
static QUERY_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)play|youtube|on|tv").expect("valid regex"));

/// Delay before the direct-play follow-up message
const FOLLOW_UP_DELAY: Duration = Duration::from_secs(2);

/// Derive the search query from a command
///
/// Strips `play`, `youtube`, `on`, and `tv` wherever they appear, then
/// trims. An empty residual defaults to "music".
#[must_use]
pub fn extract_search_query(command: &str) -> String {
    let residual = QUERY_NOISE.replace_all(command, "");
    let query = residual.trim();
    if query.is_empty() {
        "music".to_string()
    } else {
        query.to_string()
    }
}

/// Search-results URL for a query
#[must_use]
pub fn search_url(query: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(query)
    )
}

pub fn respond(command: &str) -> Response {
    let query = extract_search_query(command);
    let url = search_url(&query);

    if command.contains("play") {
        // Direct-play still only opens a search; a follow-up message lands
        // a moment later as if the video had been resolved.
        Response::success(
            format!("Searching for \"{query}\" on YouTube"),
            "YouTube video search started",
        )
        .with_effect(Effect::OpenUrl { url, delay: None })
        .with_effect(Effect::FollowUp {
            delay: FOLLOW_UP_DELAY,
            text: format!("Found \"{query}\" - opening video"),
        })
    } else {
        Response::success(
            format!("Searching YouTube for \"{query}\""),
            "YouTube search opened",
        )
        .with_effect(Effect::OpenUrl { url, delay: None })
    }
}
