//! Display and input settings.
//!
//! Values come from the environment (a `.env` file is loaded by the binary),
//! falling back to the defaults of the original calculator form.

use std::error::Error;
use std::ops::RangeInclusive;

/// Above this many subnets only a preview is shown.
pub const DEFAULT_DISPLAY_LIMIT: u64 = 256;
/// Subnets shown when the list is truncated.
pub const DEFAULT_PREVIEW_COUNT: u64 = 10;
pub const DEFAULT_PAGE_SIZE: u64 = 50;
/// Shortest prefix offered by the front end.
pub const DEFAULT_MIN_PREFIX: u8 = 8;
/// Longest prefix offered by the front end.
pub const DEFAULT_MAX_PREFIX: u8 = 30;
pub const DEFAULT_PREFIX: u8 = 24;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub display_limit: u64,
    pub preview_count: u64,
    pub page_size: u64,
    pub min_prefix: u8,
    pub max_prefix: u8,
    pub default_prefix: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            display_limit: DEFAULT_DISPLAY_LIMIT,
            preview_count: DEFAULT_PREVIEW_COUNT,
            page_size: DEFAULT_PAGE_SIZE,
            min_prefix: DEFAULT_MIN_PREFIX,
            max_prefix: DEFAULT_MAX_PREFIX,
            default_prefix: DEFAULT_PREFIX,
        }
    }
}

impl Settings {
    /// Read settings from `CALCUIP_*` environment variables.
    pub fn from_env() -> Result<Settings, Box<dyn Error>> {
        Settings::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, unset keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Settings, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let settings = Settings {
            display_limit: read_var(&lookup, "CALCUIP_DISPLAY_LIMIT", defaults.display_limit)?,
            preview_count: read_var(&lookup, "CALCUIP_PREVIEW_COUNT", defaults.preview_count)?,
            page_size: read_var(&lookup, "CALCUIP_PAGE_SIZE", defaults.page_size)?,
            min_prefix: read_var(&lookup, "CALCUIP_MIN_PREFIX", defaults.min_prefix)?,
            max_prefix: read_var(&lookup, "CALCUIP_MAX_PREFIX", defaults.max_prefix)?,
            default_prefix: read_var(&lookup, "CALCUIP_DEFAULT_PREFIX", defaults.default_prefix)?,
        };
        settings.validate()?;
        log::debug!("Settings loaded: {:?}", settings);
        Ok(settings)
    }

    /// Prefixes the front end accepts.
    pub fn prefix_range(&self) -> RangeInclusive<u8> {
        self.min_prefix..=self.max_prefix
    }

    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.max_prefix > crate::models::MAX_LENGTH {
            return Err(format!("max prefix /{} is longer than /32", self.max_prefix).into());
        }
        if self.min_prefix > self.max_prefix {
            return Err(format!(
                "min prefix /{} is greater than max prefix /{}",
                self.min_prefix, self.max_prefix
            )
            .into());
        }
        if !self.prefix_range().contains(&self.default_prefix) {
            return Err(format!(
                "default prefix /{} is outside /{}-/{}",
                self.default_prefix, self.min_prefix, self.max_prefix
            )
            .into());
        }
        if self.display_limit == 0 {
            return Err("display limit must be at least 1".into());
        }
        if self.preview_count > self.display_limit {
            return Err(format!(
                "preview count {} is greater than display limit {}",
                self.preview_count, self.display_limit
            )
            .into());
        }
        if self.page_size == 0 {
            return Err("page size must be at least 1".into());
        }
        Ok(())
    }
}

fn read_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, Box<dyn Error>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| format!("Invalid value {value:?} for {key}: {e}").into()),
        None => Ok(default),
    }
}
