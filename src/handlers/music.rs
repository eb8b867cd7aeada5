//! Music playback and volume responses

use std::time::Duration;

use super::{Effect, Response};

const SPOTIFY_URL: &str = "https://open.spotify.com";

/// Delay before the playlist URL is opened, so the spoken confirmation
/// lands first
const OPEN_DELAY: Duration = Duration::from_secs(1);

pub fn respond(command: &str) -> Response {
    if command.contains("volume") {
        let text = if command.contains("up") {
            "Volume increased to 60%"
        } else if command.contains("down") {
            "Volume decreased to 40%"
        } else {
            "Current volume is 50%"
        };
        return Response::success(text, "Music command executed");
    }

    if command.contains("play") {
        return Response::success(
            "Playing your favorite playlist from Spotify",
            "Music command executed",
        )
        .with_effect(Effect::OpenUrl {
            url: SPOTIFY_URL.to_string(),
            delay: Some(OPEN_DELAY),
        });
    }

    if command.contains("stop") || command.contains("pause") {
        return Response::success("Music paused", "Music command executed");
    }

    Response::success(
        "I can play music, control volume, or pause playback. What would you like to do?",
        "Music command executed",
    )
}
