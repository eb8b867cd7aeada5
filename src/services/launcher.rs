//! URL opening side effect
//!
//! Fire-and-forget: a handler asks for a URL to be opened in the system
//! browser and never hears back.

use std::sync::Mutex;

use crate::{Error, Result};

/// Opens URLs in a new browsing context
pub trait UrlOpener: Send + Sync {
    /// Request the URL be opened; no result contract beyond spawn errors
    ///
    /// # Errors
    ///
    /// Returns error if the request could not be handed off at all
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens URLs through the platform launcher
#[derive(Debug, Default)]
pub struct SystemOpener;

impl SystemOpener {
    #[cfg(target_os = "macos")]
    const LAUNCHER: &'static str = "open";
    #[cfg(target_os = "windows")]
    const LAUNCHER: &'static str = "explorer";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    const LAUNCHER: &'static str = "xdg-open";
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        tracing::info!(url, "opening url");
        std::process::Command::new(Self::LAUNCHER)
            .arg(url)
            .spawn()
            .map_err(|e| Error::Launcher(format!("{} failed: {e}", Self::LAUNCHER)))?;
        Ok(())
    }
}

/// Records opened URLs instead of launching anything (for tests)
#[derive(Debug, Default)]
pub struct RecordingOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingOpener {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs opened so far, in order
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned
    #[must_use]
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_opener_keeps_order() {
        let opener = RecordingOpener::new();
        opener.open("https://www.netflix.com").unwrap();
        opener.open("https://open.spotify.com").unwrap();
        assert_eq!(
            opener.opened(),
            vec!["https://www.netflix.com", "https://open.spotify.com"]
        );
    }
}
