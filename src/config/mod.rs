use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 5000;

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "compact".to_string()
}

/// Optional `config.toml` in the data directory. Every key has a default;
/// CLI flags and environment variables override the file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    port: Option<u16>,
    bind_address: Option<String>,
    log: LogSection,
}

/// `[log]` section of config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct LogSection {
    /// trace, debug, info, warn, error — or any tracing env-filter directive.
    level: Option<String>,
    /// "compact" or "json".
    format: Option<String>,
    /// Write logs to this file (rotated daily) in addition to stdout.
    file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub port: u16,
    pub bind_address: String,
    pub data_dir: PathBuf,
    pub log_level: String,
    pub log_format: String,
    pub log_file: Option<PathBuf>,
}

impl DaemonConfig {
    /// Resolve the effective config: CLI/env values win over config.toml,
    /// which wins over defaults.
    pub fn new(
        port: Option<u16>,
        data_dir: Option<PathBuf>,
        log_level: Option<String>,
        bind_address: Option<String>,
        log_file: Option<PathBuf>,
        log_format: Option<String>,
    ) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let file = read_config_file(&data_dir)?;
        Ok(Self {
            port: port.or(file.port).unwrap_or(DEFAULT_PORT),
            bind_address: bind_address
                .or(file.bind_address)
                .unwrap_or_else(default_bind_address),
            log_level: log_level.or(file.log.level).unwrap_or_else(default_log_level),
            log_format: log_format
                .or(file.log.format)
                .unwrap_or_else(default_log_format),
            log_file: log_file.or(file.log.file),
            data_dir,
        })
    }
}

fn default_data_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".taskd")
}

fn read_config_file(data_dir: &Path) -> Result<ConfigFile> {
    let path = data_dir.join("config.toml");
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_apply_without_config_file() {
        let dir = TempDir::new().unwrap();
        let config =
            DaemonConfig::new(None, Some(dir.path().to_path_buf()), None, None, None, None)
                .unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, "compact");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "port = 8080\nbind_address = \"0.0.0.0\"\n\n[log]\nlevel = \"debug\"\n",
        )
        .unwrap();
        let config =
            DaemonConfig::new(None, Some(dir.path().to_path_buf()), None, None, None, None)
                .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_address, "0.0.0.0");
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn cli_values_override_config_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "port = 8080\n").unwrap();
        let config = DaemonConfig::new(
            Some(9090),
            Some(dir.path().to_path_buf()),
            Some("warn".into()),
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(config.port, 9090);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.toml"), "port = \"not a number\"").unwrap();
        assert!(
            DaemonConfig::new(None, Some(dir.path().to_path_buf()), None, None, None, None)
                .is_err()
        );
    }
}
