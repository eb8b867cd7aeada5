//! Assistant status state machine
//!
//! Tracks what the assistant is visibly doing. The status is an explicit
//! value owned by the daemon rather than a set of ambient booleans; every
//! transition goes through a method here so no state is ever skipped.

/// What the assistant is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantStatus {
    /// Ready, not listening
    #[default]
    Idle,
    /// Microphone open, waiting for a command
    Listening,
    /// A wake-word-matched command is being dispatched
    Processing,
    /// A response is being spoken
    Speaking,
}

impl AssistantStatus {
    /// Short display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Processing => "processing",
            Self::Speaking => "speaking",
        }
    }
}

impl std::fmt::Display for AssistantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the assistant status and the listening flag
///
/// Transitions:
/// - idle → listening on a start-listening request
/// - listening → processing when a final transcript is accepted
/// - processing → speaking when an utterance starts
/// - speaking → listening when speech ends with listening still active
/// - speaking → idle when speech ends after listening was stopped
/// - any → idle on a stop-listening request
#[derive(Debug, Default)]
pub struct StatusMachine {
    status: AssistantStatus,
    listening: bool,
}

impl StatusMachine {
    /// Create a machine in the idle state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current status
    #[must_use]
    pub const fn status(&self) -> AssistantStatus {
        self.status
    }

    /// Whether the listening flag is set
    #[must_use]
    pub const fn is_listening(&self) -> bool {
        self.listening
    }

    /// Start-listening request; returns the new status if it changed
    pub fn start_listening(&mut self) -> Option<AssistantStatus> {
        self.listening = true;
        self.transition(AssistantStatus::Listening)
    }

    /// Stop-listening request; always lands in idle
    pub fn stop_listening(&mut self) -> Option<AssistantStatus> {
        self.listening = false;
        self.transition(AssistantStatus::Idle)
    }

    /// A final transcript was accepted for dispatch
    ///
    /// Only meaningful while listening; rejected transcripts never call
    /// this, so the status is untouched for them.
    pub fn begin_processing(&mut self) -> Option<AssistantStatus> {
        self.transition(AssistantStatus::Processing)
    }

    /// An utterance started being spoken
    ///
    /// A second utterance starting while one is already active keeps the
    /// status at speaking; only one speaking transition is observed.
    pub fn speech_started(&mut self) -> Option<AssistantStatus> {
        self.transition(AssistantStatus::Speaking)
    }

    /// The active utterance finished (or errored)
    ///
    /// Lands back in listening when the listening flag is still set,
    /// otherwise in idle.
    pub fn speech_ended(&mut self) -> Option<AssistantStatus> {
        if self.listening {
            self.transition(AssistantStatus::Listening)
        } else {
            self.transition(AssistantStatus::Idle)
        }
    }

    fn transition(&mut self, next: AssistantStatus) -> Option<AssistantStatus> {
        if self.status == next {
            return None;
        }
        tracing::debug!(from = %self.status, to = %next, "status transition");
        self.status = next;
        Some(next)
    }
}
