use std::env;
use tracing::{error, info, warn};

use crate::config::ConfigError;

/// The closed set of founder names eligible for reimbursement and salary
/// transactions. Supplied through the environment so the set can change
/// without a rebuild.
#[derive(Debug, Clone)]
pub struct FoundersConfig {
    pub founders: Vec<String>,
}

impl FoundersConfig {
    /// Load the founder set from the FOUNDERS environment variable,
    /// a comma-separated list of names.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = env::var("FOUNDERS").unwrap_or_else(|_| {
            warn!("FOUNDERS not set, using default founder set");
            "Utkarsh,Umang".to_string()
        });

        let founders: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = FoundersConfig { founders };
        config.validate()?;
        info!("Founder set loaded: {:?}", config.founders);
        Ok(config)
    }

    pub fn from_test_env() -> Self {
        FoundersConfig {
            founders: vec!["Alice".to_string(), "Bob".to_string()],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.founders.is_empty() {
            error!("Founder set is empty");
            return Err(ConfigError::ValidationError(
                "FOUNDERS must contain at least one name".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for name in &self.founders {
            if !seen.insert(name) {
                return Err(ConfigError::ValidationError(format!(
                    "Duplicate founder name: {}",
                    name
                )));
            }
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.founders.iter().any(|f| f == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config_is_valid() {
        let config = FoundersConfig::from_test_env();
        assert!(config.validate().is_ok());
        assert!(config.contains("Alice"));
        assert!(!config.contains("Mallory"));
    }

    #[test]
    fn test_validate_empty_set() {
        let config = FoundersConfig { founders: vec![] };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_names() {
        let config = FoundersConfig {
            founders: vec!["Alice".to_string(), "Alice".to_string()],
        };
        assert!(config.validate().is_err());
    }
}
