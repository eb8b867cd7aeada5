//! Intent classification
//!
//! Classifies a wake-word-stripped command into one of a fixed set of
//! intents by evaluating an ordered list of keyword predicates. The order
//! is significant: predicates overlap (e.g. "temperature" appears in both
//! the weather and smart-home vocabularies) and the first match wins.

/// The category a command is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Time,
    Weather,
    Music,
    SmartHome,
    News,
    Calculator,
    Streaming,
    YouTube,
    TvControl,
    Question,
    Generic,
}

impl Intent {
    /// Stable lowercase name, used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Weather => "weather",
            Self::Music => "music",
            Self::SmartHome => "smart_home",
            Self::News => "news",
            Self::Calculator => "calculator",
            Self::Streaming => "streaming",
            Self::YouTube => "youtube",
            Self::TvControl => "tv_control",
            Self::Question => "question",
            Self::Generic => "generic",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

type Predicate = fn(&str) -> bool;

/// Ordered classification rules, evaluated top-to-bottom.
///
/// Kept as an explicit ordered slice rather than a map so the
/// precedence between overlapping predicates is visible and fixed.
/// Weather is checked before SmartHome, so "temperature" always
/// classifies as Weather.
const RULES: &[(Predicate, Intent)] = &[
    (is_time, Intent::Time),
    (is_weather, Intent::Weather),
    (is_music, Intent::Music),
    (is_smart_home, Intent::SmartHome),
    (is_news, Intent::News),
    (is_calculator, Intent::Calculator),
    (is_streaming, Intent::Streaming),
    (is_youtube, Intent::YouTube),
    (is_tv_control, Intent::TvControl),
    (is_question, Intent::Question),
];

/// Classify a command into an intent
///
/// `command` must already be lower-cased (the wake-word filter does this).
/// Falls back to [`Intent::Generic`] when no predicate matches.
#[must_use]
pub fn classify(command: &str) -> Intent {
    RULES
        .iter()
        .find(|(predicate, _)| predicate(command))
        .map_or(Intent::Generic, |&(_, intent)| intent)
}

fn contains_any(command: &str, words: &[&str]) -> bool {
    words.iter().any(|w| command.contains(w))
}

fn is_time(command: &str) -> bool {
    contains_any(command, &["time", "clock", "date"])
}

fn is_weather(command: &str) -> bool {
    contains_any(command, &["weather", "temperature", "forecast"])
}

fn is_music(command: &str) -> bool {
    contains_any(command, &["music", "song", "volume"])
}

fn is_smart_home(command: &str) -> bool {
    contains_any(
        command,
        &["lights", "temperature", "thermostat", "lock", "unlock", "security"],
    )
}

fn is_news(command: &str) -> bool {
    contains_any(command, &["news", "headlines"])
}

fn is_calculator(command: &str) -> bool {
    contains_any(
        command,
        &["calculate", "math", "plus", "minus", "multiply", "divide"],
    )
}

fn is_streaming(command: &str) -> bool {
    contains_any(
        command,
        &["netflix", "spotify", "amazon prime", "disney", "hulu", "open"],
    )
}

fn is_youtube(command: &str) -> bool {
    command.contains("youtube")
        || (command.contains("play")
            && !command.contains("on tv")
            && !command.contains("netflix")
            && !command.contains("spotify"))
}

fn is_tv_control(command: &str) -> bool {
    contains_any(command, &["on tv", "turn off", "tv"])
}

fn is_question(command: &str) -> bool {
    contains_any(
        command,
        &["what", "who", "where", "when", "why", "how", "tell me about"],
    )
}
