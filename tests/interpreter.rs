//! End-to-end interpreter behavior
//!
//! Exercises the dispatch pipeline through the public API: wake-word
//! gating, classification precedence, handler output, and the stats
//! round-trip.

use aura_assistant::db::{self, SessionStats, StatsRepo};
use aura_assistant::handlers::{Effect, Outcome};
use aura_assistant::{Intent, classify};

mod common;

#[tokio::test]
async fn non_wake_word_transcript_is_a_no_op() {
    let mut interp = common::interpreter("aura");

    for transcript in ["what time is it", "hey aura what time is it", "  "] {
        let result = interp.process(transcript).await.unwrap();
        assert!(result.is_none(), "{transcript:?} should be rejected");
    }

    assert_eq!(interp.stats().unwrap(), SessionStats::default());
}

#[tokio::test]
async fn wake_word_is_configurable() {
    let mut interp = common::interpreter("rudra");

    assert!(interp.process("aura what time is it").await.unwrap().is_none());

    let dispatch = interp.process("rudra what time is it").await.unwrap().unwrap();
    assert_eq!(dispatch.intent, Intent::Time);
}

#[test]
fn temperature_classifies_as_weather() {
    // Documented precedence: Weather is checked before SmartHome, so
    // "temperature" always lands on Weather even for thermostat phrasing.
    assert_eq!(classify("set the temperature to 70"), Intent::Weather);
}

#[tokio::test]
async fn temperature_command_gets_weather_response() {
    let mut interp = common::interpreter("aura");
    let dispatch = interp
        .process("aura set the temperature to 70")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(dispatch.intent, Intent::Weather);
    assert!(dispatch.response.text.starts_with("Current weather:"));
}

#[tokio::test]
async fn play_on_tv_disconnected_hits_tv_fallback() {
    let mut interp = common::interpreter("aura");

    let dispatch = interp
        .process("aura play stranger things on tv")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(dispatch.intent, Intent::TvControl);
    assert_eq!(dispatch.response.outcome, Outcome::Failure);
    assert_eq!(
        dispatch.response.text,
        "TV is not connected. Please connect your TV first."
    );
    assert!(dispatch.response.effects.is_empty());
}

#[tokio::test]
async fn play_on_tv_connected_casts() {
    let mut interp = common::interpreter("aura");
    interp.set_tv_connected(true);

    let dispatch = interp
        .process("aura play stranger things on tv")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(dispatch.response.text, "Casting \"stranger things\" to Smart TV");
    assert!(matches!(
        &dispatch.response.effects[..],
        [Effect::OpenUrl { url, delay: None }]
            if url == "https://www.youtube.com/results?search_query=stranger%20things"
    ));
}

#[tokio::test]
async fn play_without_tv_goes_to_youtube() {
    let mut interp = common::interpreter("aura");

    let dispatch = interp.process("aura play despacito").await.unwrap().unwrap();

    assert_eq!(dispatch.intent, Intent::YouTube);
    assert_eq!(dispatch.response.text, "Searching for \"despacito\" on YouTube");
    assert!(matches!(
        &dispatch.response.effects[0],
        Effect::OpenUrl { url, .. }
            if url == "https://www.youtube.com/results?search_query=despacito"
    ));
}

#[tokio::test]
async fn calculator_addition() {
    let mut interp = common::interpreter("aura");
    let dispatch = interp.process("aura calculate 15 plus 25").await.unwrap().unwrap();

    assert_eq!(dispatch.intent, Intent::Calculator);
    assert!(dispatch.response.text.contains("15 plus 25 equals 40"));
}

#[tokio::test]
async fn calculator_divide_by_zero_is_infinity() {
    let mut interp = common::interpreter("aura");
    let dispatch = interp.process("aura calculate 10 divide 0").await.unwrap().unwrap();

    assert_eq!(dispatch.response.text, "10 divided by 0 equals Infinity");
    assert_eq!(dispatch.response.outcome, Outcome::Success);
}

#[tokio::test]
async fn stats_round_trip() {
    let mut interp = common::interpreter("aura");

    // 2 successes, 1 failure (calculator with no numbers)
    interp.process("aura what time is it").await.unwrap().unwrap();
    interp.process("aura play music").await.unwrap().unwrap();
    let dispatch = interp.process("aura calculate gibberish").await.unwrap().unwrap();

    let stats = dispatch.stats;
    assert_eq!(stats.commands_today, 3);
    assert_eq!(stats.total_commands, 3);
    assert_eq!(stats.successful_commands, 2);
    assert_eq!(stats.failed_commands, 1);
    assert_eq!(stats.success_rate(), 67);
}

#[test]
fn stats_reset_on_day_boundary() {
    let repo = StatsRepo::new(db::init_memory().unwrap());
    let day_one: chrono::NaiveDate = "2024-03-09".parse().unwrap();
    let day_two: chrono::NaiveDate = "2024-03-10".parse().unwrap();

    for _ in 0..4 {
        repo.record_on(Outcome::Success, day_one).unwrap();
    }
    assert_eq!(repo.load_on(day_one).unwrap().commands_today, 4);

    let stats = repo.load_on(day_two).unwrap();
    assert_eq!(stats.commands_today, 0);
    assert_eq!(stats.total_commands, 4);
}

#[tokio::test]
async fn question_lookup_failure_is_recovered_locally() {
    let mut interp = common::interpreter("aura");

    let dispatch = interp.process("aura who is marie curie").await.unwrap().unwrap();

    assert_eq!(dispatch.intent, Intent::Question);
    assert_eq!(dispatch.response.outcome, Outcome::Failure);
    assert_eq!(
        dispatch.response.text,
        "I'm still learning about that topic. Please try asking something else."
    );
    assert_eq!(dispatch.stats.failed_commands, 1);
}

#[tokio::test]
async fn streaming_open_heuristic() {
    let mut interp = common::interpreter("aura");

    let dispatch = interp.process("aura open twitch").await.unwrap().unwrap();
    assert_eq!(dispatch.intent, Intent::Streaming);
    assert_eq!(dispatch.response.text, "Opening Twitch");
    assert!(matches!(
        &dispatch.response.effects[..],
        [Effect::OpenUrl { url, delay: None }] if url == "https://www.twitch.com"
    ));
}

#[tokio::test]
async fn empty_command_falls_through_to_generic() {
    let mut interp = common::interpreter("aura");

    let dispatch = interp.process("aura").await.unwrap().unwrap();
    assert_eq!(dispatch.intent, Intent::Generic);
    assert_eq!(dispatch.response.outcome, Outcome::Success);
}
