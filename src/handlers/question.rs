//! General-knowledge questions answered via the summary service

use std::sync::LazyLock;

use regex::Regex;

use super::Response;

/// Lead phrases stripped from the command to leave the lookup topic
static QUESTION_LEADS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)what is|who is|where is|when is|why is|how is|tell me about")
        .expect("valid regex")
});

const FALLBACK: &str = "I'm still learning about that topic. Please try asking something else.";

/// Derive the lookup topic from the command
///
/// Strips the question lead phrases; if nothing remains the whole
/// command is the topic.
#[must_use]
pub fn extract_topic(command: &str) -> String {
    let residual = QUESTION_LEADS.replace_all(command, "");
    let topic = residual.trim();
    if topic.is_empty() {
        command.to_string()
    } else {
        topic.to_string()
    }
}

/// Response for a successful summary lookup
#[must_use]
pub fn found(summary: String) -> Response {
    Response::success(summary, "Information retrieved")
}

/// Response when both lookup strategies failed
#[must_use]
pub fn fallback() -> Response {
    Response::failure(FALLBACK, "Information search failed")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_topic() {
        assert_eq!(extract_topic("who is marie curie"), "marie curie");
        assert_eq!(extract_topic("tell me about the moon"), "the moon");
        assert_eq!(extract_topic("what is what is rust"), "rust");
    }

    #[test]
    fn test_empty_residual_uses_whole_command() {
        assert_eq!(extract_topic("what is"), "what is");
    }

    #[test]
    fn test_fallback_is_failure() {
        let response = fallback();
        assert_eq!(response.outcome, super::super::Outcome::Failure);
        assert_eq!(response.text, FALLBACK);
    }
}
