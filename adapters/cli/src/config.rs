//! Optional TOML configuration file layered under command-line overrides.

use std::{fs, path::Path, time::Duration};

use anyhow::{bail, Context, Result};
use maze_chase_system_clock::Config as ClockConfig;
use maze_chase_system_pursuit::Resolution;
use maze_chase_world::{Config as WorldConfig, SessionConfig};
use serde::Deserialize;

/// Session parameters as written in a configuration file.
///
/// Every key is optional; missing keys fall back to the session defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub(crate) max_distance: Option<u16>,
    pub(crate) time_limit_seconds: Option<u32>,
    pub(crate) resolution: Option<Resolution>,
    pub(crate) player_period_ms: Option<u64>,
    pub(crate) pursuer_period_ms: Option<u64>,
    pub(crate) countdown_period_ms: Option<u64>,
}

impl FileConfig {
    /// Reads and parses the configuration stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }

    /// Validates the values and fills the gaps with defaults.
    pub(crate) fn into_session_config(self) -> Result<SessionConfig> {
        let world_defaults = WorldConfig::default();
        let clock_defaults = ClockConfig::default();

        let max_distance = self.max_distance.unwrap_or(world_defaults.max_distance());
        if max_distance == 0 {
            bail!("max_distance must be positive");
        }

        let time_limit_seconds = self
            .time_limit_seconds
            .unwrap_or(world_defaults.time_limit_seconds());
        if time_limit_seconds == 0 {
            bail!("time_limit_seconds must be positive");
        }

        let player_period = self
            .player_period_ms
            .map_or(clock_defaults.player_period(), Duration::from_millis);
        if player_period.is_zero() {
            bail!("player_period_ms must be positive; the player would never move");
        }
        let pursuer_period = self
            .pursuer_period_ms
            .map_or(clock_defaults.pursuer_period(), Duration::from_millis);
        let countdown_period = self
            .countdown_period_ms
            .map_or(clock_defaults.countdown_period(), Duration::from_millis);

        Ok(SessionConfig {
            world: WorldConfig::new(
                max_distance,
                time_limit_seconds,
                self.resolution.unwrap_or(world_defaults.resolution()),
            ),
            clock: ClockConfig::new(player_period, pursuer_period, countdown_period),
        })
    }
}

/// Rejects settings under which a headless run could never stop.
///
/// With the countdown disabled no session is guaranteed to end, so a frame
/// limit is required.
pub(crate) fn ensure_run_ends(config: &SessionConfig, frame_limit: Option<usize>) -> Result<()> {
    if config.clock.countdown_period().is_zero() && frame_limit.is_none() {
        bail!("countdown_period_ms = 0 disables the countdown; pass --frames to bound the run");
    }
    Ok(())
}
