//! Runtime configuration.
//!
//! Values come from the environment first; command-line flags override them.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `TWENTY48_SEED` | RNG seed for the session | random |
//! | `TWENTY48_ANIM_MS` | slide animation length in ms (0 disables) | 120 |
//! | `TWENTY48_LOG_PATH` | file that receives log output while playing | none |
//! | `TWENTY48_LOG` | log filter (`env_logger` syntax) | `info` |

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use env_logger::{Env, Target};

use crate::types::SLIDE_ANIMATION_MS;

pub const SEED_VAR: &str = "TWENTY48_SEED";
pub const ANIM_MS_VAR: &str = "TWENTY48_ANIM_MS";
pub const LOG_PATH_VAR: &str = "TWENTY48_LOG_PATH";
pub const LOG_FILTER_VAR: &str = "TWENTY48_LOG";

/// Longest accepted animation; anything above is clamped.
pub const MAX_ANIM_MS: u32 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub anim_ms: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            anim_ms: SLIDE_ANIMATION_MS,
            log_path: None,
        }
    }
}

impl AppConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup(SEED_VAR).and_then(|s| s.trim().parse().ok());

        let anim_ms = lookup(ANIM_MS_VAR)
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(SLIDE_ANIMATION_MS)
            .min(MAX_ANIM_MS);

        let log_path = lookup(LOG_PATH_VAR)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            seed,
            anim_ms,
            log_path,
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, seed: Option<u64>, anim_ms: Option<u32>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        if let Some(ms) = anim_ms {
            self.anim_ms = ms.min(MAX_ANIM_MS);
        }
        self
    }

    /// The configured seed, or a fresh random one.
    pub fn seed_or_random(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Where log records go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink<'a> {
    /// The terminal is owned by the game; only a file is safe.
    File(Option<&'a Path>),
    Stderr,
}

/// Install the global logger. With `LogSink::File(None)` logging stays off.
pub fn init_logging(sink: LogSink<'_>) -> Result<()> {
    let env = Env::default().filter_or(LOG_FILTER_VAR, "info");
    let mut builder = env_logger::Builder::from_env(env);

    match sink {
        LogSink::Stderr => {
            builder.target(Target::Stderr);
        }
        LogSink::File(Some(path)) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        LogSink::File(None) => return Ok(()),
    }

    builder.try_init().context("logger already initialised")?;
    Ok(())
}
