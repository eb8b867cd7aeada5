//! Speech synthesis output
//!
//! A [`Synthesizer`] backend turns text into audio; the [`SpeechEngine`]
//! wraps one and enforces the at-most-one-active-utterance invariant:
//! starting a new utterance aborts any in-flight one.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{Error, Result};

/// Delivery parameters for an utterance
#[derive(Debug, Clone)]
pub struct SpeechParams {
    /// Backend voice selector; backend default when `None`
    pub voice: Option<String>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SpeechParams {
    fn default() -> Self {
        Self { voice: None, rate: 0.9, pitch: 1.0, volume: 0.8 }
    }
}

/// Synthesizes speech from text
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize text to audio bytes
    ///
    /// # Errors
    ///
    /// Returns error if synthesis fails
    async fn synthesize(&self, text: &str, params: &SpeechParams) -> Result<Vec<u8>>;
}

/// Synthesizes via an OpenAI-style speech endpoint
pub struct HttpSynthesizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl HttpSynthesizer {
    const ENDPOINT: &'static str = "https://api.openai.com/v1/audio/speech";

    /// Create a new HTTP synthesizer
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config("API key required for TTS".to_string()));
        }

        Ok(Self { client: reqwest::Client::new(), api_key, model })
    }
}

#[async_trait]
impl Synthesizer for HttpSynthesizer {
    async fn synthesize(&self, text: &str, params: &SpeechParams) -> Result<Vec<u8>> {
        #[derive(serde::Serialize)]
        struct TtsRequest<'a> {
            model: &'a str,
            input: &'a str,
            voice: &'a str,
            speed: f32,
        }

        let request = TtsRequest {
            model: &self.model,
            input: text,
            voice: params.voice.as_deref().unwrap_or("alloy"),
            speed: params.rate,
        };

        let response = self
            .client
            .post(Self::ENDPOINT)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Synthesis(format!("TTS error {status}: {body}")));
        }

        let audio = response.bytes().await?;
        Ok(audio.to_vec())
    }
}

/// Logs utterances and simulates speaking time (no audio hardware)
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

/// Simulated per-word speaking time at rate 1.0
const WORD_DURATION: Duration = Duration::from_millis(120);

#[async_trait]
impl Synthesizer for ConsoleSynthesizer {
    #[allow(clippy::cast_possible_truncation)]
    async fn synthesize(&self, text: &str, params: &SpeechParams) -> Result<Vec<u8>> {
        tracing::debug!(text, "speaking");

        let words = text.split_whitespace().count() as u32;
        let duration = WORD_DURATION * words;
        tokio::time::sleep(duration.div_f32(params.rate.max(0.1))).await;

        Ok(Vec::new())
    }
}

/// Events emitted while speaking
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Started { text: String },
    Ended,
    Error(String),
}

/// Drives a synthesizer backend, one utterance at a time
///
/// Speaking is exclusive: a new `speak` aborts whatever is in flight, so
/// at most one utterance is ever active.
pub struct SpeechEngine {
    backend: Arc<dyn Synthesizer>,
    params: SpeechParams,
    events: mpsc::Sender<SpeechEvent>,
    current: Option<tokio::task::JoinHandle<()>>,
}

impl SpeechEngine {
    /// Create an engine and the receiver for its speech events
    #[must_use]
    pub fn with_receiver(
        backend: Arc<dyn Synthesizer>,
        params: SpeechParams,
    ) -> (Self, mpsc::Receiver<SpeechEvent>) {
        let (events, rx) = mpsc::channel(16);
        (Self { backend, params, events, current: None }, rx)
    }

    /// Speak a response, cancelling any in-flight utterance
    pub fn speak(&mut self, text: &str) {
        self.cancel();

        let backend = Arc::clone(&self.backend);
        let params = self.params.clone();
        let events = self.events.clone();
        let text = text.to_string();

        self.current = Some(tokio::spawn(async move {
            let _ = events.send(SpeechEvent::Started { text: text.clone() }).await;
            match backend.synthesize(&text, &params).await {
                Ok(_) => {
                    let _ = events.send(SpeechEvent::Ended).await;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "speech synthesis failed");
                    let _ = events.send(SpeechEvent::Error(e.to_string())).await;
                }
            }
        }));
    }

    /// Abort the in-flight utterance, if any
    pub fn cancel(&mut self) {
        if let Some(current) = self.current.take() {
            current.abort();
        }
    }

    /// Whether an utterance is currently in flight
    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.current.as_ref().is_some_and(|c| !c.is_finished())
    }
}
