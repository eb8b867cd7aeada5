//! Wake-word filtering
//!
//! Gates all command processing on a configured wake word. Transcripts
//! that do not start with the wake word are rejected outright and must
//! cause no state change anywhere downstream.

/// Strips and matches the wake word at the start of transcripts
#[derive(Debug, Clone)]
pub struct WakeWordFilter {
    wake_word: String,
}

impl WakeWordFilter {
    /// Create a filter for the given wake word
    ///
    /// The wake word is normalized to lowercase and trimmed, matching how
    /// incoming transcripts are normalized before the comparison.
    #[must_use]
    pub fn new(wake_word: &str) -> Self {
        let normalized = wake_word.to_lowercase().trim().to_string();
        tracing::debug!(wake_word = %normalized, "wake word filter initialized");
        Self { wake_word: normalized }
    }

    /// The configured wake word
    #[must_use]
    pub fn wake_word(&self) -> &str {
        &self.wake_word
    }

    /// Extract the command from a raw transcript
    ///
    /// Returns `None` unless the normalized transcript starts with the
    /// wake word. On a match the wake word and any following whitespace
    /// or comma are stripped; the remainder (possibly empty) is the
    /// lower-cased command.
    #[must_use]
    pub fn extract_command(&self, transcript: &str) -> Option<String> {
        let normalized = transcript.trim().to_lowercase();

        let rest = normalized.strip_prefix(self.wake_word.as_str())?;
        Some(rest.trim_start_matches([',', ' ']).to_string())
    }
}
