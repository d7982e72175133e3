use std::any::Any;

use console_states::{State, snapshot_clone};
use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::pagination::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration from the environment: {0}")]
    Env(#[from] serde_env::Error),
    #[error("DEFAULT_PAGE_SIZE must be 10, 25 or 100, got {0}")]
    PageSize(u32),
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawConfig {
    api_base_url: Option<String>,
    default_page_size: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessConfig {
    /// Origin of the backend, without the `/api/v1` prefix. Empty means
    /// same-origin relative requests.
    pub api_base_url: String,
    pub default_page_size: u32,
}

impl BusinessConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Read `API_BASE_URL` and `DEFAULT_PAGE_SIZE` from the process
    /// environment, falling back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars())
    }

    pub fn from_vars<S: AsRef<str>>(
        vars: impl IntoIterator<Item = (S, S)>,
    ) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_env::from_iter(vars)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        let RawConfig {
            api_base_url,
            default_page_size,
        } = raw;

        let defaults = Self::default();
        let api_base_url = match api_base_url {
            Some(url) => {
                info!("Using provided API_BASE_URL: {url}");
                url.trim_end_matches('/').to_owned()
            }
            None => {
                info!(
                    "API_BASE_URL not set, defaulting to {:?}",
                    defaults.api_base_url
                );
                defaults.api_base_url
            }
        };

        let default_page_size = match default_page_size {
            Some(size) if PAGE_SIZE_OPTIONS.contains(&size) => size,
            Some(size) => return Err(ConfigError::PageSize(size)),
            None => defaults.default_page_size,
        };

        Ok(Self {
            api_base_url,
            default_page_size,
        })
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::new("")
        } else {
            Self::new(DEFAULT_API_BASE_URL)
        }
    }
}

impl State for BusinessConfig {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn snapshot(&self) -> Option<Box<dyn Any + Send>> {
        snapshot_clone(self)
    }
}
