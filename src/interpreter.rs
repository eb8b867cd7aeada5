//! The command interpreter
//!
//! Takes a raw transcript through the whole decision pipeline: wake-word
//! filter, intent classification, handler dispatch, stats accounting.
//! Transcripts without the wake word are rejected before anything else
//! can observe them.

use chrono::Local;
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::db::{SessionStats, StatsRepo};
use crate::handlers::{
    Effect, HandlerContext, Response, calculator, generic, music, news, question, smart_home,
    streaming, time, tv, weather, youtube,
};
use crate::intent::{Intent, classify};
use crate::services::SummaryClient;
use crate::wake::WakeWordFilter;
use crate::Result;

/// The outcome of one accepted command
#[derive(Debug)]
pub struct Dispatch {
    pub intent: Intent,
    pub response: Response,
    /// Counters after this command was recorded
    pub stats: SessionStats,
}

/// Wake-word gated intent dispatcher
pub struct CommandInterpreter {
    filter: WakeWordFilter,
    rng: Box<dyn RngCore + Send>,
    stats: StatsRepo,
    summary: SummaryClient,
    tv_connected: bool,
}

impl CommandInterpreter {
    /// Create an interpreter with an OS-seeded RNG
    #[must_use]
    pub fn new(wake_word: &str, stats: StatsRepo, summary: SummaryClient) -> Self {
        Self::with_rng(wake_word, stats, summary, Box::new(StdRng::from_entropy()))
    }

    /// Create an interpreter with an injected RNG (reproducible tests)
    #[must_use]
    pub fn with_rng(
        wake_word: &str,
        stats: StatsRepo,
        summary: SummaryClient,
        rng: Box<dyn RngCore + Send>,
    ) -> Self {
        Self {
            filter: WakeWordFilter::new(wake_word),
            rng,
            stats,
            summary,
            tv_connected: false,
        }
    }

    /// The configured wake word
    #[must_use]
    pub fn wake_word(&self) -> &str {
        self.filter.wake_word()
    }

    /// Whether the TV link is connected
    #[must_use]
    pub const fn tv_connected(&self) -> bool {
        self.tv_connected
    }

    /// Flip the TV link state (connect/disconnect actions)
    pub fn set_tv_connected(&mut self, connected: bool) {
        self.tv_connected = connected;
    }

    /// Process a finalized transcript
    ///
    /// Returns `None` when the transcript does not carry the wake word;
    /// nothing is mutated in that case. Otherwise the command is
    /// classified, handled, and counted, and the caller gets everything
    /// needed to emit the response.
    ///
    /// # Errors
    ///
    /// Returns error only for stats persistence failures; handler
    /// failures are folded into the response outcome.
    #[allow(clippy::future_not_send)]
    pub async fn process(&mut self, transcript: &str) -> Result<Option<Dispatch>> {
        let Some(command) = self.filter.extract_command(transcript) else {
            tracing::debug!(transcript, "ignored - no wake word");
            return Ok(None);
        };

        let intent = classify(&command);
        tracing::info!(intent = intent.as_str(), command = %command, "dispatching command");

        let response = self.dispatch(intent, &command).await;

        // A "turn off" TV command drops the link before anything else
        // observes it
        if response.effects.contains(&Effect::DisconnectTv) {
            self.tv_connected = false;
        }

        let stats = self.stats.record(response.outcome)?;

        Ok(Some(Dispatch { intent, response, stats }))
    }

    /// Route one classified command to its handler
    #[allow(clippy::future_not_send)]
    async fn dispatch(&mut self, intent: Intent, command: &str) -> Response {
        let mut ctx = HandlerContext {
            rng: self.rng.as_mut(),
            now: Local::now(),
            tv_connected: self.tv_connected,
        };

        match intent {
            Intent::Time => time::respond(command, &ctx),
            Intent::Weather => weather::respond(command, &mut ctx),
            Intent::Music => music::respond(command),
            Intent::SmartHome => smart_home::respond(command, &mut ctx),
            Intent::News => news::respond(command, &mut ctx),
            Intent::Calculator => calculator::respond(command),
            Intent::Streaming => streaming::respond(command),
            Intent::YouTube => youtube::respond(command),
            Intent::TvControl => tv::respond(command, self.tv_connected),
            Intent::Question => {
                let topic = question::extract_topic(command);
                match self.summary.summarize(&topic).await {
                    Ok(summary) => question::found(summary),
                    Err(e) => {
                        tracing::warn!(error = %e, topic = %topic, "summary lookup failed");
                        question::fallback()
                    }
                }
            }
            Intent::Generic => generic::respond(command, &mut ctx),
        }
    }

    /// Current counters without recording anything
    ///
    /// # Errors
    ///
    /// Returns error if database operation fails
    pub fn stats(&self) -> Result<SessionStats> {
        self.stats.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::handlers::Outcome;

    fn interpreter() -> CommandInterpreter {
        CommandInterpreter::with_rng(
            "aura",
            StatsRepo::new(db::init_memory().unwrap()),
            SummaryClient::new("http://127.0.0.1:9"),
            Box::new(StdRng::seed_from_u64(7)),
        )
    }

    #[tokio::test]
    async fn test_no_wake_word_is_a_no_op() {
        let mut interp = interpreter();
        let result = interp.process("what time is it").await.unwrap();
        assert!(result.is_none());
        assert_eq!(interp.stats().unwrap(), SessionStats::default());
    }

    #[tokio::test]
    async fn test_command_is_classified_and_counted() {
        let mut interp = interpreter();
        let dispatch = interp
            .process("aura calculate 15 plus 25")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dispatch.intent, Intent::Calculator);
        assert!(dispatch.response.text.contains("15 plus 25 equals 40"));
        assert_eq!(dispatch.stats.total_commands, 1);
        assert_eq!(dispatch.stats.successful_commands, 1);
    }

    #[tokio::test]
    async fn test_handler_failure_counts_failed() {
        let mut interp = interpreter();
        let dispatch = interp
            .process("aura calculate nothing at all")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dispatch.response.outcome, Outcome::Failure);
        assert_eq!(dispatch.stats.failed_commands, 1);
    }

    #[tokio::test]
    async fn test_turn_off_drops_tv_link() {
        let mut interp = interpreter();
        interp.set_tv_connected(true);

        let dispatch = interp.process("aura turn off the tv").await.unwrap().unwrap();
        assert_eq!(dispatch.intent, Intent::TvControl);
        assert!(!interp.tv_connected());
    }

    #[tokio::test]
    async fn test_disconnected_tv_routes_to_tv_fallback() {
        let mut interp = interpreter();
        let dispatch = interp
            .process("aura play stranger things on tv")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dispatch.intent, Intent::TvControl);
        assert_eq!(dispatch.response.outcome, Outcome::Failure);
        assert!(dispatch.response.text.contains("TV is not connected"));
    }

    #[tokio::test]
    async fn test_question_with_unreachable_service_falls_back() {
        let mut interp = interpreter();
        let dispatch = interp
            .process("aura who is marie curie")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dispatch.intent, Intent::Question);
        assert_eq!(dispatch.response.outcome, Outcome::Failure);
        assert!(dispatch.response.text.contains("still learning"));
    }
}
