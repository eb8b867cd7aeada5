//! Configuration management for the Aura assistant

use std::path::PathBuf;

use crate::voice::SpeechParams;
use crate::{Error, Result};

/// Default wake word when neither file nor environment set one
const DEFAULT_WAKE_WORD: &str = "aura";

/// Default summary API base (MediaWiki-compatible)
const DEFAULT_SUMMARY_URL: &str = "https://en.wikipedia.org";

/// Aura assistant configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Leading token that gates all command processing
    pub wake_word: String,

    /// Path to data directory (database)
    pub data_dir: PathBuf,

    /// Voice configuration
    pub voice: VoiceConfig,

    /// Base URL of the summary service
    pub summary_base_url: String,
}

/// Voice processing configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Enable spoken responses
    pub enabled: bool,

    /// TTS model identifier for the HTTP backend
    pub tts_model: String,

    /// TTS voice identifier; backend default when unset
    pub tts_voice: Option<String>,

    /// `OpenAI` API key; without one the console synthesizer is used
    pub openai_api_key: Option<String>,

    /// Speaking rate multiplier
    pub rate: f32,

    /// Voice pitch
    pub pitch: f32,

    /// Output volume in [0, 1]
    pub volume: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        let defaults = SpeechParams::default();
        Self {
            enabled: true,
            tts_model: "tts-1".to_string(),
            tts_voice: None,
            openai_api_key: None,
            rate: defaults.rate,
            pitch: defaults.pitch,
            volume: defaults.volume,
        }
    }
}

impl VoiceConfig {
    /// Delivery parameters for the speech engine
    #[must_use]
    pub fn speech_params(&self) -> SpeechParams {
        SpeechParams {
            voice: self.tts_voice.clone(),
            rate: self.rate,
            pitch: self.pitch,
            volume: self.volume,
        }
    }
}

/// Optional on-disk configuration, merged under environment overrides
#[derive(Debug, Default, serde::Deserialize)]
struct FileConfig {
    wake_word: Option<String>,
    summary_base_url: Option<String>,
    #[serde(default)]
    voice: FileVoiceConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
struct FileVoiceConfig {
    tts_model: Option<String>,
    tts_voice: Option<String>,
    rate: Option<f32>,
    pitch: Option<f32>,
    volume: Option<f32>,
}

impl Config {
    /// Load configuration
    ///
    /// Precedence: environment variables, then the config file, then
    /// built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the config file exists but cannot be parsed
    pub fn load() -> Result<Self> {
        Self::load_with_options(false)
    }

    /// Load configuration with an explicit voice disable option
    ///
    /// # Errors
    ///
    /// Returns error if the config file exists but cannot be parsed
    pub fn load_with_options(disable_voice: bool) -> Result<Self> {
        let file = Self::load_file_config()?;

        let wake_word = std::env::var("AURA_WAKE_WORD")
            .ok()
            .or(file.wake_word)
            .unwrap_or_else(|| DEFAULT_WAKE_WORD.to_string());

        let summary_base_url = std::env::var("AURA_SUMMARY_URL")
            .ok()
            .or(file.summary_base_url)
            .unwrap_or_else(|| DEFAULT_SUMMARY_URL.to_string());

        let defaults = VoiceConfig::default();
        let voice = VoiceConfig {
            enabled: !disable_voice,
            tts_model: std::env::var("AURA_TTS_MODEL")
                .ok()
                .or(file.voice.tts_model)
                .unwrap_or(defaults.tts_model),
            tts_voice: std::env::var("AURA_TTS_VOICE").ok().or(file.voice.tts_voice),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            rate: file.voice.rate.unwrap_or(defaults.rate),
            pitch: file.voice.pitch.unwrap_or(defaults.pitch),
            volume: file.voice.volume.unwrap_or(defaults.volume),
        };

        if disable_voice {
            tracing::info!("voice explicitly disabled via --disable-voice");
        }

        // Determine data directory (~/.local/share/omni/aura on Linux)
        let data_dir = std::env::var("AURA_DATA_DIR").map_or_else(
            |_| {
                directories::ProjectDirs::from("dev", "omni", "omni")
                    .map_or_else(|| PathBuf::from("."), |d| d.data_dir().join("aura"))
            },
            PathBuf::from,
        );
        std::fs::create_dir_all(&data_dir).ok();

        Ok(Self { wake_word, data_dir, voice, summary_base_url })
    }

    /// Parse the config file if present
    ///
    /// Looks for `config.toml` under the XDG config directory, with
    /// `AURA_CONFIG` as a dev override.
    fn load_file_config() -> Result<FileConfig> {
        let path = std::env::var("AURA_CONFIG").map_or_else(
            |_| {
                directories::ProjectDirs::from("dev", "omni", "omni")
                    .map(|d| d.config_dir().join("aura").join("config.toml"))
            },
            |p| Some(PathBuf::from(p)),
        );

        let Some(path) = path.filter(|p| p.exists()) else {
            return Ok(FileConfig::default());
        };

        let content = std::fs::read_to_string(&path)?;
        let config: FileConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse {}: {e}", path.display())))?;

        tracing::info!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_parses() {
        let toml = r#"
            wake_word = "nexa"

            [voice]
            tts_voice = "nova"
            rate = 1.2
        "#;
        let config: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.wake_word.as_deref(), Some("nexa"));
        assert_eq!(config.voice.tts_voice.as_deref(), Some("nova"));
        assert_eq!(config.voice.rate, Some(1.2));
        assert!(config.summary_base_url.is_none());
    }

    #[test]
    fn test_speech_params_carry_voice_settings() {
        let voice = VoiceConfig {
            tts_voice: Some("nova".to_string()),
            rate: 1.5,
            ..Default::default()
        };
        let params = voice.speech_params();
        assert_eq!(params.voice.as_deref(), Some("nova"));
        assert!((params.rate - 1.5).abs() < f32::EPSILON);
    }
}
