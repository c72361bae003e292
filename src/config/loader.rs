// file: src/config/loader.rs
// version: 1.0.0
// guid: d4e5f6a7-b8c9-0123-4567-890123defabc

//! Configuration file loading and environment variable substitution

use super::ProvisionConfig;
use crate::Result;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
    env_vars: HashMap<String, String>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            env_vars: std::env::vars().collect(),
        }
    }

    /// Load provisioning settings from a YAML file
    pub fn load_provision_config<P: AsRef<Path>>(&self, path: P) -> Result<ProvisionConfig> {
        let content = fs::read_to_string(&path).map_err(|e| {
            crate::error::ProvisionError::config(format!(
                "Failed to read settings file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let expanded = self.expand_env_vars(&content)?;
        let config: ProvisionConfig = serde_yaml::from_str(&expanded)?;

        config.validate()?;

        Ok(config)
    }

    /// Expand `${VAR}` references in configuration content
    fn expand_env_vars(&self, content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| {
            crate::error::ProvisionError::config(format!("Invalid regex pattern: {}", e))
        })?;

        let mut result = content.to_string();
        let mut missing_vars = Vec::new();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];

            if let Some(value) = self.env_vars.get(var_name) {
                result = result.replace(placeholder, value);
            } else {
                missing_vars.push(var_name.to_string());
            }
        }

        if !missing_vars.is_empty() {
            return Err(crate::error::ProvisionError::config(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            )));
        }

        Ok(result)
    }

    /// Set environment variable for substitution
    pub fn set_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_env_var_expansion() {
        let mut loader = ConfigLoader::new();
        loader.set_env_var("TEST_VAR".to_string(), "test_value".to_string());

        let content = "key: ${TEST_VAR}";
        let result = loader.expand_env_vars(content).unwrap();
        assert_eq!(result, "key: test_value");
    }

    #[test]
    fn test_missing_env_var() {
        let loader = ConfigLoader::new();
        let content = "key: ${HPA_DEFINITELY_MISSING_VAR}";

        let result = loader.expand_env_vars(content);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Missing environment variables"));
    }

    #[test]
    fn test_load_provision_config() -> Result<()> {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
super_user: admin
super_passwd: ${{HPA_TEST_PASSWD}}
p4d_instance: testsrv
"#
        )
        .unwrap();

        let mut loader = ConfigLoader::new();
        loader.set_env_var("HPA_TEST_PASSWD".to_string(), "hunter2".to_string());
        let config = loader.load_provision_config(file.path())?;

        assert_eq!(config.super_user, "admin");
        assert_eq!(config.super_passwd, "hunter2");
        assert_eq!(config.p4d_instance, "testsrv");
        // untouched fields keep their defaults
        assert_eq!(config.p4d_port, 1666);

        Ok(())
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "no_such_setting: true").unwrap();

        let loader = ConfigLoader::new();
        assert!(loader.load_provision_config(file.path()).is_err());
    }
}
