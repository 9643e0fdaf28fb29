//! Application-level configuration loading, including the reveal animation timing.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SANTA_BACK_CONFIG_PATH";
/// Environment variable holding the shared secret that authorizes the draw.
const DRAW_SECRET_ENV: &str = "DRAW_SECRET";
/// Identifier of the single event this deployment serves.
const DEFAULT_EVENT_ID: i64 = 1;

/// Timing parameters the reveal animation is calibrated against.
///
/// The client eases the carousel over `travel_distance_px` pixels in
/// `spin_duration`, which is what makes the deceleration land on the
/// third-from-last card of the track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealTiming {
    /// Width of a single participant card in the carousel, in pixels.
    pub card_width_px: u32,
    /// Target carousel travel speed, in pixels per second.
    pub speed_px_per_sec: u32,
    /// Duration of the spin animation.
    pub spin_duration: Duration,
    /// Extra delay after the animation settles before the result is committed.
    pub settle_grace: Duration,
}

impl RevealTiming {
    /// Total distance the carousel travels during the spin.
    pub fn travel_distance_px(&self) -> u64 {
        u64::from(self.speed_px_per_sec) * self.spin_duration.as_secs()
    }

    /// Time from the start trigger until the result may be shown and committed.
    pub fn spin_total(&self) -> Duration {
        self.spin_duration + self.settle_grace
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            card_width_px: 97,
            speed_px_per_sec: 144,
            spin_duration: Duration::from_secs(30),
            settle_grace: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    event_id: i64,
    draw_secret: Option<String>,
    reveal: RevealTiming,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to baked-in defaults.
    ///
    /// The draw secret always comes from the environment so it never lands in a
    /// checked-in config file.
    pub fn load() -> Self {
        let draw_secret = env::var(DRAW_SECRET_ENV)
            .ok()
            .filter(|secret| !secret.is_empty());

        let path = resolve_config_path();
        let mut config = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let config: Self = raw.into();
                    info!(path = %path.display(), "loaded configuration file");
                    config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        };

        config.draw_secret = draw_secret;
        config
    }

    /// Identifier of the event this deployment manages.
    pub fn event_id(&self) -> i64 {
        self.event_id
    }

    /// Shared secret that authorizes the draw endpoint, if configured.
    pub fn draw_secret(&self) -> Option<&str> {
        self.draw_secret.as_deref()
    }

    /// Reveal animation timing parameters.
    pub fn reveal(&self) -> &RevealTiming {
        &self.reveal
    }

    #[cfg(test)]
    pub(crate) fn for_tests(event_id: i64, draw_secret: Option<&str>) -> Self {
        Self {
            event_id,
            draw_secret: draw_secret.map(str::to_owned),
            reveal: RevealTiming::default(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            event_id: DEFAULT_EVENT_ID,
            draw_secret: None,
            reveal: RevealTiming::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    #[serde(default)]
    event_id: Option<i64>,
    #[serde(default)]
    reveal: Option<RawRevealTiming>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            event_id: value.event_id.unwrap_or(DEFAULT_EVENT_ID),
            draw_secret: None,
            reveal: value.reveal.map(Into::into).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the reveal timing block inside the configuration file.
struct RawRevealTiming {
    card_width_px: u32,
    speed_px_per_sec: u32,
    spin_duration_secs: u64,
    settle_grace_ms: u64,
}

impl From<RawRevealTiming> for RevealTiming {
    fn from(value: RawRevealTiming) -> Self {
        Self {
            card_width_px: value.card_width_px,
            speed_px_per_sec: value.speed_px_per_sec,
            spin_duration: Duration::from_secs(value.spin_duration_secs),
            settle_grace: Duration::from_millis(value.settle_grace_ms),
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
