//! Voice processing module
//!
//! Transcript input and speech output adapters. Both ends are trait
//! seams: the daemon only ever sees [`RecognizerEvent`]s coming in and
//! pushes response text into the [`SpeechEngine`].

mod recognizer;
mod synthesizer;

pub use recognizer::{ConsoleInput, RecognizerEvent, ScriptedInput, SpeechInput, TranscriptEvent};
pub use synthesizer::{
    ConsoleSynthesizer, HttpSynthesizer, SpeechEngine, SpeechEvent, SpeechParams, Synthesizer,
};
