//! Per-intent command handlers
//!
//! Each handler turns a command string into a [`Response`]. Handlers do
//! not perform side effects themselves; URL opens, delayed follow-up
//! messages, and TV state changes are returned as [`Effect`]s and
//! executed by the caller. Randomized responses draw from the RNG on the
//! [`HandlerContext`] so tests can seed them.

pub mod calculator;
pub mod generic;
pub mod music;
pub mod news;
pub mod question;
pub mod smart_home;
pub mod streaming;
pub mod time;
pub mod tv;
pub mod weather;
pub mod youtube;

use std::time::Duration;

use chrono::{DateTime, Local};
use rand::RngCore;

/// Whether a dispatched command counted as handled or failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

/// Severity of a notification toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    /// Short display label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// A short notification accompanying a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Build a notice
    #[must_use]
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

/// A side effect requested by a handler, executed by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Open a URL in the system browser, optionally after a delay
    OpenUrl {
        url: String,
        delay: Option<Duration>,
    },
    /// Display and speak a second message after a delay
    FollowUp { delay: Duration, text: String },
    /// Drop the TV connection
    DisconnectTv,
}

/// The result of handling one command
#[derive(Debug, Clone)]
pub struct Response {
    /// Text sent to both the display sink and the speech engine
    pub text: String,
    pub outcome: Outcome,
    pub notice: Notice,
    pub effects: Vec<Effect>,
}

impl Response {
    /// Successful response with a success-level notice
    #[must_use]
    pub fn success(text: impl Into<String>, notice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: Outcome::Success,
            notice: Notice::new(NoticeLevel::Success, notice),
            effects: Vec::new(),
        }
    }

    /// Failed response with a warning-level notice
    #[must_use]
    pub fn failure(text: impl Into<String>, notice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome: Outcome::Failure,
            notice: Notice::new(NoticeLevel::Warning, notice),
            effects: Vec::new(),
        }
    }

    /// Attach an effect
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// What a handler may read and draw from while building a response
pub struct HandlerContext<'a> {
    /// Injectable randomness for the weather/news/generic handlers
    pub rng: &'a mut dyn RngCore,
    /// Local wall-clock time at dispatch
    pub now: DateTime<Local>,
    /// Whether the TV link is currently connected
    pub tv_connected: bool,
}
