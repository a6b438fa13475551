//! Bundled default strategies descriptor.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::ConfigurationError;

/// Descriptor format understood by this build.
pub const SUPPORTED_VERSION: u32 = 1;

const BUNDLED_SOURCE: &str = include_str!("default_strategies.toml");

static BUNDLED: OnceLock<Result<DefaultStrategyDescriptor, String>> = OnceLock::new();

/// Mapping from capability key to default implementation ids.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultStrategyDescriptor {
    version: u32,
    #[serde(default)]
    strategies: HashMap<String, Vec<String>>,
}

impl DefaultStrategyDescriptor {
    /// Parse a descriptor from TOML text.
    pub fn parse(source: &str) -> Result<Self, ConfigurationError> {
        parse_checked(source).map_err(ConfigurationError::Descriptor)
    }

    /// The descriptor shipped with the crate, parsed once per process.
    pub fn bundled() -> Result<&'static Self, ConfigurationError> {
        BUNDLED
            .get_or_init(|| parse_checked(BUNDLED_SOURCE))
            .as_ref()
            .map_err(|e| ConfigurationError::Descriptor(e.clone()))
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Implementation ids declared for a capability, in preference order.
    pub fn implementations_for(&self, capability: &str) -> Option<&[String]> {
        self.strategies.get(capability).map(Vec::as_slice)
    }
}

fn parse_checked(source: &str) -> Result<DefaultStrategyDescriptor, String> {
    let descriptor: DefaultStrategyDescriptor =
        toml::from_str(source).map_err(|e| e.to_string())?;
    if descriptor.version != SUPPORTED_VERSION {
        return Err(format!(
            "unsupported descriptor version {}, expected {}",
            descriptor.version, SUPPORTED_VERSION
        ));
    }
    Ok(descriptor)
}
