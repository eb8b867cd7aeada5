//! Speech recognition input
//!
//! Recognizers push [`RecognizerEvent`]s into an mpsc channel owned by
//! the daemon. Only finalized transcripts are dispatched; interim ones
//! update the live display. A recognizer that ends while the listening
//! flag is still set gets one immediate restart.

use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use crate::Result;

/// One speech-to-text result
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEvent {
    pub text: String,
    /// Interim results are display-only; final ones are dispatched
    pub is_final: bool,
    /// Recognizer confidence in [0, 1], when the backend reports one
    pub confidence: Option<f32>,
}

impl TranscriptEvent {
    /// A finalized transcript with full confidence
    #[must_use]
    pub fn final_text(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_final: true, confidence: Some(1.0) }
    }

    /// An interim (in-progress) transcript
    #[must_use]
    pub fn interim(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_final: false, confidence: None }
    }
}

/// Events a recognizer can produce
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerEvent {
    Transcript(TranscriptEvent),
    /// Recognizer error code (e.g. "no-speech", "audio-capture")
    Error(String),
    /// The recognizer stopped producing events
    Ended,
}

/// A source of recognition events
pub trait SpeechInput: Send {
    /// Start producing events into the channel given at construction
    ///
    /// # Errors
    ///
    /// Returns error if the input source cannot be started
    fn start(&mut self) -> Result<()>;

    /// Stop producing events; in-flight results may still arrive and are
    /// discarded by the daemon once listening is off
    fn stop(&mut self);
}

/// Reads transcripts line-by-line from standard input
///
/// Every line is a finalized transcript; EOF surfaces as
/// [`RecognizerEvent::Ended`].
pub struct ConsoleInput {
    events: mpsc::Sender<RecognizerEvent>,
    reader: Option<tokio::task::JoinHandle<()>>,
}

impl ConsoleInput {
    /// Create a console input feeding the given channel
    #[must_use]
    pub fn new(events: mpsc::Sender<RecognizerEvent>) -> Self {
        Self { events, reader: None }
    }
}

impl SpeechInput for ConsoleInput {
    fn start(&mut self) -> Result<()> {
        if self.reader.as_ref().is_some_and(|r| !r.is_finished()) {
            return Ok(());
        }

        let events = self.events.clone();
        self.reader = Some(tokio::spawn(async move {
            let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        let event =
                            RecognizerEvent::Transcript(TranscriptEvent::final_text(line));
                        if events.send(event).await.is_err() {
                            return;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        let _ = events.send(RecognizerEvent::Error(e.to_string())).await;
                        break;
                    }
                }
            }
            let _ = events.send(RecognizerEvent::Ended).await;
        }));

        tracing::debug!("console input started");
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
        tracing::debug!("console input stopped");
    }
}

/// Replays a fixed sequence of events (for tests and `simulate`)
pub struct ScriptedInput {
    events: mpsc::Sender<RecognizerEvent>,
    script: Vec<RecognizerEvent>,
    feeder: Option<tokio::task::JoinHandle<()>>,
}

impl ScriptedInput {
    /// Create a scripted input that will feed `script` once started
    #[must_use]
    pub fn new(events: mpsc::Sender<RecognizerEvent>, script: Vec<RecognizerEvent>) -> Self {
        Self { events, script, feeder: None }
    }
}

impl SpeechInput for ScriptedInput {
    fn start(&mut self) -> Result<()> {
        let events = self.events.clone();
        let script = std::mem::take(&mut self.script);
        self.feeder = Some(tokio::spawn(async move {
            for event in script {
                if events.send(event).await.is_err() {
                    return;
                }
            }
            let _ = events.send(RecognizerEvent::Ended).await;
        }));
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(feeder) = self.feeder.take() {
            feeder.abort();
        }
    }
}
