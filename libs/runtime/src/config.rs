use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Main application configuration with strongly-typed global sections
/// and a flexible per-module configuration bag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Core server configuration.
    pub server: ServerConfig,
    /// Logging configuration (optional, console-only defaults if None).
    #[serde(default)]
    pub logging: Option<LoggingSection>,
    /// Per-module configuration bag: module_name → arbitrary YAML value.
    #[serde(default)]
    pub modules: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Logging settings for the whole process: one console sink and an optional
/// rotating file sink.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingSection {
    pub console_level: String, // "trace", "debug", "info", "warn", "error", "off"
    /// Log file path; empty disables the file sink.
    #[serde(default)]
    pub file: String,
    #[serde(default)]
    pub file_level: String,
    #[serde(default)]
    pub max_size_mb: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            console_level: "info".to_string(),
            file: String::new(),
            file_level: "debug".to_string(),
            max_size_mb: Some(100),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: Some(LoggingSection::default()),
            modules: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration by merging defaults with a YAML file.
    ///
    /// All runtime configuration comes from the file and CLI flags; there is
    /// no environment-variable layer.
    pub fn load_layered<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        use figment::{
            providers::{Format, Serialized, Yaml},
            Figment,
        };

        let path = config_path.as_ref();
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }

        let figment = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Yaml::file(path));

        figment
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.display()))
    }

    /// Load configuration from file or fall back to built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_layered(path),
            None => Ok(Self::default()),
        }
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize config to YAML")
    }

    /// Extract a typed configuration section for a module, if present.
    pub fn module_config<T: serde::de::DeserializeOwned>(
        &self,
        module_name: &str,
    ) -> Result<Option<T>> {
        self.modules
            .get(module_name)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
            .with_context(|| format!("Invalid config for module '{module_name}'"))
    }

    /// Apply overrides from command line arguments.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.port = port;
        }

        if args.verbose > 0 {
            let logging = self.logging.get_or_insert_with(LoggingSection::default);
            logging.console_level = match args.verbose {
                1 => "debug".to_string(),
                _ => "trace".to_string(),
            };
        }
    }
}

/// Command line arguments structure.
#[derive(Debug, Clone)]
pub struct CliArgs {
    pub config: Option<String>,
    pub port: Option<u16>,
    pub print_config: bool,
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_bind_the_fixed_port() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 5000);
        assert!(config.modules.is_empty());
    }

    #[test]
    fn cli_overrides_take_precedence() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            config: None,
            port: Some(8080),
            print_config: false,
            verbose: 2,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.logging.as_ref().map(|l| l.console_level.as_str()),
            Some("trace")
        );
    }

    #[test]
    fn yaml_file_overrides_defaults_and_keeps_module_bag() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "server:\n  host: 0.0.0.0\n  port: 9000\nmodules:\n  api_ingress:\n    cors_enabled: true"
        )
        .expect("write yaml");

        let config = AppConfig::load_layered(file.path()).expect("load");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);

        #[derive(Deserialize)]
        struct Section {
            cors_enabled: bool,
        }
        let section: Option<Section> = config.module_config("api_ingress").expect("section");
        assert!(section.expect("present").cors_enabled);
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = AppConfig::load_layered("/nonexistent/userbox.yaml");
        assert!(err.is_err());
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = AppConfig::default();
        let yaml = config.to_yaml().expect("yaml");
        assert!(yaml.contains("port: 5000"));
    }
}
