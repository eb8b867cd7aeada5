//! Streaming platform launcher

use super::{Effect, Notice, NoticeLevel, Outcome, Response};

/// Known platforms, checked in order before the generic "open" heuristic
const PLATFORMS: &[(&str, &str, &str)] = &[
    ("netflix", "Netflix", "https://www.netflix.com"),
    ("spotify", "Spotify", "https://open.spotify.com"),
    ("amazon prime", "Amazon Prime Video", "https://www.primevideo.com"),
    ("disney", "Disney Plus", "https://www.disneyplus.com"),
    ("hulu", "Hulu", "https://www.hulu.com"),
];

pub fn respond(command: &str) -> Response {
    if let Some((platform, url)) = resolve_target(command) {
        return Response {
            text: format!("Opening {platform}"),
            outcome: Outcome::Success,
            notice: Notice::new(NoticeLevel::Success, format!("{platform} opened")),
            effects: vec![Effect::OpenUrl { url, delay: None }],
        };
    }

    Response {
        text: "I can open Netflix, Spotify, Amazon Prime, Disney Plus, or Hulu for you"
            .to_string(),
        outcome: Outcome::Success,
        notice: Notice::new(NoticeLevel::Warning, "Streaming service not recognized"),
        effects: Vec::new(),
    }
}

/// Resolve the command to a (display name, URL) pair
///
/// Falls back to the `open <app>` heuristic: the word after "open"
/// becomes `https://www.<app>.com`. Deliberately naive; the derived
/// name is part of the spoken response either way.
fn resolve_target(command: &str) -> Option<(String, String)> {
    for (keyword, name, url) in PLATFORMS {
        if command.contains(keyword) {
            return Some(((*name).to_string(), (*url).to_string()));
        }
    }

    let words: Vec<&str> = command.split_whitespace().collect();
    let open_index = words.iter().position(|w| *w == "open")?;
    let app = words.get(open_index + 1)?;
    Some((capitalize(app), format!("https://www.{app}.com")))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_platforms() {
        let response = respond("start netflix for me");
        assert_eq!(response.text, "Opening Netflix");
        assert_eq!(
            response.effects,
            vec![Effect::OpenUrl { url: "https://www.netflix.com".to_string(), delay: None }]
        );

        assert_eq!(respond("open amazon prime").text, "Opening Amazon Prime Video");
    }

    #[test]
    fn test_open_heuristic_derives_url() {
        let response = respond("open twitch");
        assert_eq!(response.text, "Opening Twitch");
        assert_eq!(
            response.effects,
            vec![Effect::OpenUrl { url: "https://www.twitch.com".to_string(), delay: None }]
        );
    }

    #[test]
    fn test_bare_open_lists_capabilities() {
        let response = respond("open");
        assert!(response.text.starts_with("I can open"));
        assert!(response.effects.is_empty());
        assert_eq!(response.notice.level, NoticeLevel::Warning);
    }
}
