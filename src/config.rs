//! Runtime settings for the command line front end.
//!
//! Sources, later ones winning: built-in defaults, `dx-rocks.toml` in the
//! working directory, then `DX_ROCKS_*` environment variables.

use std::num::NonZeroU32;
use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{Engine, Error, DEFAULT_MAX_POOL, DEFAULT_MAX_ROUNDS};

/// Default settings file name.
pub const CONFIG_FILE: &str = "dx-rocks.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DX_ROCKS_";


/// Settings shared by every roll of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Round cap for the engine. `0` means the built-in default.
    pub max_rounds: u32,
    /// Disable the round cap entirely.
    pub uncapped: bool,
    /// Largest dice count a roll may ask for. `0` means the built-in default.
    pub max_pool: u32,
    /// Seed for reproducible rolls; thread-local randomness when unset.
    pub seed: Option<u64>,
    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS.get(),
            uncapped: false,
            max_pool: DEFAULT_MAX_POOL.get(),
            seed: None,
            log_filter: "dx_rocks=info".into(),
        }
    }
}

impl Settings {
    /// Loads settings from [`CONFIG_FILE`] and the environment.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when a source holds a value of the wrong type or an
    /// unknown key.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(CONFIG_FILE)
    }

    /// Like [`Settings::load()`] but reads the given file. A missing file is not an error.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when a source holds a value of the wrong type or an
    /// unknown key.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Error> {
        let settings: Settings = Self::figment(path.as_ref()).extract()?;
        tracing::debug!(?settings, "loaded settings");
        Ok(settings)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX))
    }

    /// The engine these settings describe.
    pub fn engine(&self) -> Engine {
        let engine = if self.uncapped {
            Engine::uncapped()
        } else {
            NonZeroU32::new(self.max_rounds)
                .map(Engine::with_max_rounds)
                .unwrap_or_default()
        };

        engine.max_pool(NonZeroU32::new(self.max_pool).unwrap_or(DEFAULT_MAX_POOL))
    }
}
