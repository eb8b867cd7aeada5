//! Daemon - the interactive assistant loop
//!
//! Orchestrates transcript input, wake-word dispatch, speech output, and
//! the status state machine on a single tokio event loop. Every wait is
//! a scheduled callback; nothing blocks the loop.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::Config;
use crate::db::{self, DbPool, StatsRepo};
use crate::handlers::{Effect, Notice, NoticeLevel, Response};
use crate::interpreter::CommandInterpreter;
use crate::services::{SummaryClient, SystemOpener, UrlOpener};
use crate::status::StatusMachine;
use crate::voice::{
    ConsoleInput, ConsoleSynthesizer, HttpSynthesizer, RecognizerEvent, SpeechEngine,
    SpeechEvent, SpeechInput, Synthesizer,
};
use crate::{Error, Result};

/// Simulated TV connect delay
const TV_CONNECT_DELAY: Duration = Duration::from_secs(2);

/// Events produced by timers the effects scheduled
enum ScheduledEvent {
    /// A delayed second response (display + speak)
    FollowUp(String),
    /// The simulated TV connect completed
    TvConnected,
}

/// The Aura daemon - owns the event loop
pub struct Daemon {
    config: Config,
    db: DbPool,
}

impl Daemon {
    /// Create a new daemon instance
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be initialized
    pub fn new(config: Config) -> Result<Self> {
        let db_path = config.data_dir.join("aura.db");
        let db = db::init(&db_path)?;

        tracing::info!(path = %db_path.display(), "database initialized");

        Ok(Self { config, db })
    }

    /// Build the speech backend from configuration
    ///
    /// Falls back to the console synthesizer when no API key is set so
    /// the assistant stays usable without credentials.
    fn init_synthesizer(&self) -> Result<Arc<dyn Synthesizer>> {
        match &self.config.voice.openai_api_key {
            Some(key) if self.config.voice.enabled => {
                let backend =
                    HttpSynthesizer::new(key.clone(), self.config.voice.tts_model.clone())?;
                tracing::info!(model = %self.config.voice.tts_model, "HTTP TTS backend");
                Ok(Arc::new(backend))
            }
            _ => {
                tracing::info!("console speech backend");
                Ok(Arc::new(ConsoleSynthesizer))
            }
        }
    }

    /// Run the daemon until interrupted
    ///
    /// # Errors
    ///
    /// Returns error if the daemon encounters a fatal error at startup
    #[allow(clippy::future_not_send, clippy::too_many_lines)]
    pub async fn run(self) -> Result<()> {
        let stats = StatsRepo::new(self.db.clone());
        match stats.load() {
            Ok(counters) => tracing::info!(
                today = counters.commands_today,
                total = counters.total_commands,
                success_rate = counters.success_rate(),
                "usage counters loaded"
            ),
            Err(e) => tracing::warn!(error = %e, "failed to load usage counters"),
        }

        let summary = SummaryClient::new(&self.config.summary_base_url);
        let mut interpreter =
            CommandInterpreter::new(&self.config.wake_word, stats.clone(), summary);

        let (mut engine, mut speech_events) = SpeechEngine::with_receiver(
            self.init_synthesizer()?,
            self.config.voice.speech_params(),
        );

        let (recognizer_tx, mut recognizer_events) = mpsc::channel(32);
        let mut input = ConsoleInput::new(recognizer_tx);

        let (scheduled_tx, mut scheduled_events) = mpsc::channel::<ScheduledEvent>(32);
        let opener: Arc<dyn UrlOpener> = Arc::new(SystemOpener);

        let mut status = StatusMachine::new();
        let mut last_response: Option<String> = None;
        let mut restart_attempted = false;

        // Set up shutdown signal
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                let _ = shutdown_tx.send(()).await;
            }
        });

        input
            .start()
            .map_err(|e| Error::UnsupportedEnvironment(format!("speech input: {e}")))?;
        status.start_listening();

        println!("Say \"{}\" followed by your command.", interpreter.wake_word());
        println!("Control commands: :listen :stop :connect :disconnect :repeat :stats :quit");
        tracing::info!(wake_word = %interpreter.wake_word(), "listening for wake word");

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    tracing::info!("shutdown requested");
                    break;
                }
                Some(event) = recognizer_events.recv() => {
                    match event {
                        RecognizerEvent::Transcript(transcript) => {
                            restart_attempted = false;

                            if let Some(control) = transcript.text.strip_prefix(':') {
                                if !handle_control(
                                    control,
                                    &mut interpreter,
                                    &mut engine,
                                    &mut status,
                                    last_response.as_deref(),
                                    &scheduled_tx,
                                ) {
                                    break;
                                }
                                continue;
                            }

                            // Results arriving after a stop are discarded
                            if !status.is_listening() {
                                tracing::debug!(text = %transcript.text, "discarding transcript - not listening");
                                continue;
                            }

                            // Interim results only refresh the live display
                            if !transcript.is_final {
                                println!("~ {}", transcript.text);
                                continue;
                            }

                            tracing::debug!(
                                text = %transcript.text,
                                confidence = ?transcript.confidence,
                                "final transcript"
                            );

                            match interpreter.process(&transcript.text).await {
                                Ok(Some(dispatch)) => {
                                    status.begin_processing();
                                    emit(
                                        &dispatch.response,
                                        &mut engine,
                                        &mut last_response,
                                        &opener,
                                        &scheduled_tx,
                                    );
                                }
                                Ok(None) => {}
                                Err(e) => tracing::error!(error = %e, "command processing error"),
                            }
                        }
                        RecognizerEvent::Error(code) => {
                            let error = Error::Recognition(code);
                            if error.is_transient_recognition() {
                                tracing::trace!("transient recognition error ignored");
                                continue;
                            }
                            println!("Error: {error}");
                            status.stop_listening();
                            if let Err(e) = stats.record_recognition_failure() {
                                tracing::error!(error = %e, "failed to record recognition error");
                            }
                        }
                        RecognizerEvent::Ended => {
                            if status.is_listening() && !restart_attempted {
                                restart_attempted = true;
                                tracing::debug!("recognizer ended unexpectedly, restarting");
                                if let Err(e) = input.start() {
                                    tracing::error!(error = %e, "recognizer restart failed");
                                    break;
                                }
                            } else {
                                tracing::info!("recognizer ended");
                                break;
                            }
                        }
                    }
                }
                Some(event) = speech_events.recv() => {
                    match event {
                        SpeechEvent::Started { .. } => { status.speech_started(); }
                        SpeechEvent::Ended => { status.speech_ended(); }
                        SpeechEvent::Error(e) => {
                            tracing::error!(error = %e, "speech synthesis error");
                            status.speech_ended();
                        }
                    }
                }
                Some(event) = scheduled_events.recv() => {
                    match event {
                        ScheduledEvent::FollowUp(text) => {
                            println!("aura> {text}");
                            engine.speak(&text);
                            last_response = Some(text);
                        }
                        ScheduledEvent::TvConnected => {
                            interpreter.set_tv_connected(true);
                            notify(&Notice::new(NoticeLevel::Success, "TV connected successfully"));
                            engine.speak("TV connected successfully");
                        }
                    }
                }
            }
        }

        input.stop();
        engine.cancel();
        status.stop_listening();
        tracing::info!("daemon stopped");
        Ok(())
    }
}

/// Handle a `:` control command; returns false to quit
fn handle_control(
    control: &str,
    interpreter: &mut CommandInterpreter,
    engine: &mut SpeechEngine,
    status: &mut StatusMachine,
    last_response: Option<&str>,
    scheduled_tx: &mpsc::Sender<ScheduledEvent>,
) -> bool {
    match control.trim() {
        "quit" | "exit" => return false,
        "listen" => {
            status.start_listening();
            notify(&Notice::new(NoticeLevel::Success, "Voice recognition started"));
        }
        "stop" => {
            status.stop_listening();
            engine.cancel();
        }
        "connect" => {
            if interpreter.tv_connected() {
                notify(&Notice::new(NoticeLevel::Info, "TV already connected"));
            } else {
                status.begin_processing();
                notify(&Notice::new(NoticeLevel::Info, "Connecting to TV..."));
                let tx = scheduled_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(TV_CONNECT_DELAY).await;
                    let _ = tx.send(ScheduledEvent::TvConnected).await;
                });
            }
        }
        "disconnect" => {
            interpreter.set_tv_connected(false);
            notify(&Notice::new(NoticeLevel::Info, "TV disconnected"));
            engine.speak("TV disconnected");
        }
        "repeat" => {
            if let Some(text) = last_response {
                engine.speak(text);
            }
        }
        "stats" => match interpreter.stats() {
            Ok(stats) => {
                println!("Commands today:  {}", stats.commands_today);
                println!("Total commands:  {}", stats.total_commands);
                println!("Success rate:    {}%", stats.success_rate());
            }
            Err(e) => tracing::error!(error = %e, "failed to load stats"),
        },
        other => {
            notify(&Notice::new(
                NoticeLevel::Warning,
                format!("Unknown control command: :{other}"),
            ));
        }
    }
    true
}

/// Display and speak a response, then hand its effects to the scheduler
fn emit(
    response: &Response,
    engine: &mut SpeechEngine,
    last_response: &mut Option<String>,
    opener: &Arc<dyn UrlOpener>,
    scheduled_tx: &mpsc::Sender<ScheduledEvent>,
) {
    println!("aura> {}", response.text);
    engine.speak(&response.text);
    *last_response = Some(response.text.clone());
    notify(&response.notice);

    for effect in &response.effects {
        match effect {
            Effect::OpenUrl { url, delay: None } => {
                if let Err(e) = opener.open(url) {
                    tracing::warn!(error = %e, url, "failed to open url");
                }
            }
            Effect::OpenUrl { url, delay: Some(delay) } => {
                let opener = Arc::clone(opener);
                let url = url.clone();
                let delay = *delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Err(e) = opener.open(&url) {
                        tracing::warn!(error = %e, url, "failed to open url");
                    }
                });
            }
            Effect::FollowUp { delay, text } => {
                let tx = scheduled_tx.clone();
                let text = text.clone();
                let delay = *delay;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(ScheduledEvent::FollowUp(text)).await;
                });
            }
            // The interpreter already dropped the link; nothing to run
            Effect::DisconnectTv => {}
        }
    }
}

/// Print a notification toast
fn notify(notice: &Notice) {
    println!("[{}] {}", notice.level.as_str(), notice.message);
}
