//! TV control responses
//!
//! All TV commands require the (simulated) TV link to be connected;
//! casting opens the matching search URL in the browser as a fallback.

use super::youtube;
use super::{Effect, Notice, NoticeLevel, Outcome, Response};

pub fn respond(command: &str, tv_connected: bool) -> Response {
    if !tv_connected {
        return Response::failure(
            "TV is not connected. Please connect your TV first.",
            "TV not connected",
        );
    }

    if command.contains("turn off") {
        return Response {
            text: "TV disconnected".to_string(),
            outcome: Outcome::Success,
            notice: Notice::new(NoticeLevel::Info, "TV disconnected"),
            effects: vec![Effect::DisconnectTv],
        };
    }

    if command.contains("play") && command.contains("on tv") {
        let query = youtube::extract_search_query(&command.replacen("on tv", "", 1));
        let url = youtube::search_url(&query);
        return Response {
            text: format!("Casting \"{query}\" to Smart TV"),
            outcome: Outcome::Success,
            notice: Notice::new(NoticeLevel::Success, format!("Casting: {query}")),
            effects: vec![Effect::OpenUrl { url, delay: None }],
        };
    }

    Response::success("TV command executed successfully", "TV command sent")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_tv_fails() {
        let response = respond("play stranger things on tv", false);
        assert_eq!(response.outcome, Outcome::Failure);
        assert_eq!(response.text, "TV is not connected. Please connect your TV first.");
        assert!(response.effects.is_empty());
    }

    #[test]
    fn test_turn_off_disconnects() {
        let response = respond("turn off the tv", true);
        assert_eq!(response.effects, vec![Effect::DisconnectTv]);
        assert_eq!(response.text, "TV disconnected");
    }

    #[test]
    fn test_cast_extracts_query() {
        let response = respond("play stranger things on tv", true);
        assert_eq!(response.text, "Casting \"stranger things\" to Smart TV");
        assert!(matches!(
            &response.effects[0],
            Effect::OpenUrl { url, delay: None }
                if url.contains("search_query=stranger%20things")
        ));
    }

    #[test]
    fn test_generic_acknowledgment() {
        let response = respond("switch to hdmi two tv", true);
        assert_eq!(response.text, "TV command executed successfully");
    }
}
