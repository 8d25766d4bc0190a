//! Forwarding registry configuration.

use super::{Config, parse_env_bool, parse_env_limit, parse_env_var};
use crate::error::{ForwardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for [`PhoneForward`](crate::PhoneForward).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Arena slots reserved up front in each trie
    pub initial_capacity: usize,
    /// Maximum nodes per trie, root included; `None` is unlimited
    pub max_nodes: Option<usize>,
    /// Longest accepted number; `None` is unlimited
    pub max_number_len: Option<usize>,
    /// Log every Add and Remove at debug level
    pub log_mutations: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 64,
            max_nodes: None,
            max_number_len: None,
            log_mutations: true,
        }
    }
}

impl RegistryConfig {
    /// Check `number`'s length against `max_number_len`
    pub fn accepts_len(&self, number: &str) -> bool {
        self.max_number_len.map_or(true, |max| number.len() <= max)
    }
}

impl Config for RegistryConfig {
    fn validate(&self) -> Result<()> {
        if self.max_nodes == Some(0) {
            return Err(ForwardError::configuration("max_nodes must be at least 1"));
        }
        if self.max_number_len == Some(0) {
            return Err(ForwardError::configuration("max_number_len must be at least 1"));
        }
        if let Some(max_nodes) = self.max_nodes {
            if self.initial_capacity > max_nodes {
                return Err(ForwardError::configuration(format!(
                    "initial_capacity {} exceeds max_nodes {}",
                    self.initial_capacity, max_nodes
                )));
            }
        }
        Ok(())
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity =
            parse_env_var(&format!("{}INITIAL_CAPACITY", prefix), config.initial_capacity);
        config.max_nodes = parse_env_limit(&format!("{}MAX_NODES", prefix), config.max_nodes);
        config.max_number_len =
            parse_env_limit(&format!("{}MAX_NUMBER_LEN", prefix), config.max_number_len);
        config.log_mutations =
            parse_env_bool(&format!("{}LOG_MUTATIONS", prefix), config.log_mutations);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: 64 * 1024,
            max_nodes: None,
            max_number_len: None,
            log_mutations: false,
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: 1,
            max_nodes: None,
            max_number_len: Some(64),
            log_mutations: false,
        }
    }

    fn realtime_preset() -> Self {
        Self {
            initial_capacity: 16 * 1024,
            max_nodes: Some(1024 * 1024),
            max_number_len: Some(32),
            log_mutations: false,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            ForwardError::configuration(format!("Failed to serialize registry config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ForwardError::configuration(format!("Failed to parse registry config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
