//! Configuration APIs for the forwarding registry
//!
//! The [`Config`] trait provides validation, environment initialization,
//! presets and JSON file persistence. [`RegistryConfig`] is the configuration
//! consumed by [`PhoneForward::with_config`](crate::PhoneForward::with_config).
//!
//! # Environment Initialization
//!
//! ```rust
//! use phone_forward::config::{Config, RegistryConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads PHFWD_MAX_NODES, PHFWD_MAX_NUMBER_LEN, ...
//! let config = RegistryConfig::from_env()?;
//!
//! // Same variables under a custom prefix
//! let config = RegistryConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod registry;

#[cfg(test)]
mod tests;

pub use registry::RegistryConfig;

/// Default prefix for environment variables
pub const ENV_PREFIX: &str = "PHFWD_";

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Variables use the format `PHFWD_{FIELD}`, for example
    /// `PHFWD_MAX_NODES=100000`.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset tuned for throughput: large pre-reserved arenas, quiet logging.
    fn performance_preset() -> Self;

    /// Preset tuned for a small footprint.
    fn memory_preset() -> Self;

    /// Preset with bounded growth for predictable latency.
    fn realtime_preset() -> Self;

    /// Balanced preset; the default configuration.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default` when it is
/// unset or unparsable.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Parse a boolean environment variable.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive) as true,
/// everything else as false.
pub fn parse_env_bool(var_name: &str, default: bool) -> bool {
    env::var(var_name)
        .ok()
        .map(|s| {
            let s = s.to_lowercase();
            matches!(s.as_str(), "true" | "1" | "yes" | "on")
        })
        .unwrap_or(default)
}

/// Parse an optional limit where `0` means unlimited.
pub fn parse_env_limit(var_name: &str, default: Option<usize>) -> Option<usize> {
    match env::var(var_name).ok().and_then(|s| s.parse::<usize>().ok()) {
        Some(0) => None,
        Some(limit) => Some(limit),
        None => default,
    }
}
