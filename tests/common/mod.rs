//! Shared test helpers

use rand::SeedableRng;
use rand::rngs::StdRng;

use aura_assistant::CommandInterpreter;
use aura_assistant::db::{self, StatsRepo};
use aura_assistant::services::SummaryClient;

/// Unreachable summary endpoint so Question lookups fail fast
pub const DEAD_SUMMARY_URL: &str = "http://127.0.0.1:9";

/// Interpreter over an in-memory database with a seeded RNG
#[must_use]
pub fn interpreter(wake_word: &str) -> CommandInterpreter {
    CommandInterpreter::with_rng(
        wake_word,
        StatsRepo::new(db::init_memory().unwrap()),
        SummaryClient::new(DEAD_SUMMARY_URL),
        Box::new(StdRng::seed_from_u64(42)),
    )
}
