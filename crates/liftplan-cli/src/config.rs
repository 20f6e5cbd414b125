//! Configuration file management for liftplan.
//!
//! Provides a TOML-based config file at `~/.config/liftplan/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use liftplan_core::Catalog;
use liftplan_core::generator::command::DEFAULT_BINARY;
use liftplan_core::planner::DEFAULT_MAX_ATTEMPTS;

/// Generator kind used when nothing else is configured.
pub const DEFAULT_GENERATOR: &str = "command";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub generator: GeneratorSection,
    #[serde(default)]
    pub planner: PlannerSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Registered generator name (e.g. "command").
    #[serde(default = "default_kind")]
    pub kind: String,
    /// Binary run by the command generator.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Arguments passed to the binary; instructions arrive on stdin.
    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            kind: default_kind(),
            binary: default_binary(),
            args: default_args(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlannerSection {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Exercise catalog TOML; the builtin catalog when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for PlannerSection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            catalog: None,
        }
    }
}

fn default_kind() -> String {
    DEFAULT_GENERATOR.to_string()
}

fn default_binary() -> String {
    DEFAULT_BINARY.to_string()
}

fn default_args() -> Vec<String> {
    vec!["-p".to_string()]
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the liftplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/liftplan` or
/// `~/.config/liftplan`, on every platform.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("liftplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("liftplan")
}

/// Return the path to the liftplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Parse a config file from disk.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))
}

/// Load the config file if one exists. A present but malformed file is an
/// error.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    load_config_from(&path).map(Some)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(path)
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values supplied on the command line, highest precedence.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub generator: Option<String>,
    pub catalog: Option<PathBuf>,
    pub max_attempts: Option<u32>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftplanConfig {
    pub generator_kind: String,
    pub generator_binary: String,
    pub generator_args: Vec<String>,
    pub max_attempts: u32,
    pub catalog: Option<PathBuf>,
}

impl LiftplanConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Generator kind: `--generator` > `LIFTPLAN_GENERATOR` > `generator.kind` > `"command"`
    /// - Generator binary: `LIFTPLAN_GENERATOR_BINARY` > `generator.binary` > `"claude"`
    /// - Max attempts: `--max-attempts` > `LIFTPLAN_MAX_ATTEMPTS` > `planner.max_attempts` > 5
    /// - Catalog: `--catalog` > `LIFTPLAN_CATALOG` > `planner.catalog` > builtin
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let file = load_config()?.unwrap_or_default();

        let generator_kind = overrides
            .generator
            .clone()
            .or_else(|| env_var("LIFTPLAN_GENERATOR"))
            .unwrap_or(file.generator.kind);

        let generator_binary =
            env_var("LIFTPLAN_GENERATOR_BINARY").unwrap_or(file.generator.binary);

        let max_attempts = match overrides.max_attempts {
            Some(n) => n,
            None => match env_var("LIFTPLAN_MAX_ATTEMPTS") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("LIFTPLAN_MAX_ATTEMPTS is not a number: {raw:?}"))?,
                None => file.planner.max_attempts,
            },
        };

        let catalog = overrides
            .catalog
            .clone()
            .or_else(|| env_var("LIFTPLAN_CATALOG").map(PathBuf::from))
            .or(file.planner.catalog);

        Ok(Self {
            generator_kind,
            generator_binary,
            generator_args: file.generator.args,
            max_attempts,
            catalog,
        })
    }

    /// Load the configured catalog, or the builtin one.
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::from_path(path)
                .with_context(|| format!("failed to load catalog from {}", path.display())),
            None => Ok(Catalog::builtin()),
        }
    }
}

/// Read a non-empty env var.
fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    const VARS: [&str; 5] = [
        "XDG_CONFIG_HOME",
        "LIFTPLAN_GENERATOR",
        "LIFTPLAN_GENERATOR_BINARY",
        "LIFTPLAN_MAX_ATTEMPTS",
        "LIFTPLAN_CATALOG",
    ];

    /// Point the config dir at a fresh temp dir and clear liftplan env vars.
    fn isolated() -> tempfile::TempDir {
        let tmp = tempfile::TempDir::new().unwrap();
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };
        tmp
    }

    fn clear() {
        for var in VARS {
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    fn defaults_when_nothing_set() {
        let _lock = lock_env();
        let _tmp = isolated();

        let config = LiftplanConfig::resolve(&Overrides::default()).unwrap();
        clear();

        assert_eq!(config.generator_kind, "command");
        assert_eq!(config.generator_binary, "claude");
        assert_eq!(config.generator_args, vec!["-p"]);
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.catalog, None);
    }

    #[test]
    fn save_and_load_config_roundtrip() {
        let _lock = lock_env();
        let _tmp = isolated();

        let mut original = ConfigFile::default();
        original.generator.binary = "/opt/llm/bin/claude".to_string();
        original.planner.max_attempts = 3;
        original.planner.catalog = Some(PathBuf::from("/etc/liftplan/catalog.toml"));

        let path = save_config(&original).unwrap();
        let loaded = load_config().unwrap().unwrap();
        clear();

        assert!(path.ends_with("liftplan/config.toml"));
        assert_eq!(loaded.generator.binary, "/opt/llm/bin/claude");
        assert_eq!(loaded.planner.max_attempts, 3);
        assert_eq!(loaded.planner.catalog, original.planner.catalog);
    }

    #[cfg(unix)]
    #[test]
    fn save_config_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let _lock = lock_env();
        let _tmp = isolated();

        let path = save_config(&ConfigFile::default()).unwrap();
        clear();

        let meta = std::fs::metadata(&path).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let _lock = lock_env();
        let tmp = isolated();

        let dir = tmp.path().join("liftplan");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[planner]\nmax_attempts = 2\n").unwrap();

        let config = LiftplanConfig::resolve(&Overrides::default()).unwrap();
        clear();

        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.generator_binary, "claude");
    }

    #[test]
    fn env_var_overrides_config_file() {
        let _lock = lock_env();
        let tmp = isolated();

        let dir = tmp.path().join("liftplan");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("config.toml"),
            "[generator]\nkind = \"command\"\nbinary = \"file-llm\"\n\n[planner]\nmax_attempts = 2\n",
        )
        .unwrap();
        unsafe { std::env::set_var("LIFTPLAN_GENERATOR_BINARY", "env-llm") };
        unsafe { std::env::set_var("LIFTPLAN_MAX_ATTEMPTS", "7") };
        unsafe { std::env::set_var("LIFTPLAN_GENERATOR", "replay") };

        let config = LiftplanConfig::resolve(&Overrides::default()).unwrap();
        clear();

        assert_eq!(config.generator_binary, "env-llm");
        assert_eq!(config.max_attempts, 7);
        assert_eq!(config.generator_kind, "replay");
    }

    #[test]
    fn cli_flag_overrides_all() {
        let _lock = lock_env();
        let _tmp = isolated();
        unsafe { std::env::set_var("LIFTPLAN_MAX_ATTEMPTS", "7") };
        unsafe { std::env::set_var("LIFTPLAN_CATALOG", "/env/catalog.toml") };

        let config = LiftplanConfig::resolve(&Overrides {
            generator: Some("replay".to_string()),
            catalog: Some(PathBuf::from("/cli/catalog.toml")),
            max_attempts: Some(1),
        })
        .unwrap();
        clear();

        assert_eq!(config.generator_kind, "replay");
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.catalog, Some(PathBuf::from("/cli/catalog.toml")));
    }

    #[test]
    fn invalid_max_attempts_env_is_an_error() {
        let _lock = lock_env();
        let _tmp = isolated();
        unsafe { std::env::set_var("LIFTPLAN_MAX_ATTEMPTS", "lots") };

        let result = LiftplanConfig::resolve(&Overrides::default());
        clear();

        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("LIFTPLAN_MAX_ATTEMPTS"), "unexpected error: {msg}");
    }

    #[test]
    fn malformed_config_file_is_an_error() {
        let _lock = lock_env();
        let tmp = isolated();

        let dir = tmp.path().join("liftplan");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), "[planner\nmax_attempts = ").unwrap();

        let result = LiftplanConfig::resolve(&Overrides::default());
        clear();

        assert!(result.is_err());
    }

    #[test]
    fn missing_catalog_file_names_the_path() {
        let config = LiftplanConfig {
            generator_kind: "command".to_string(),
            generator_binary: "claude".to_string(),
            generator_args: vec![],
            max_attempts: 5,
            catalog: Some(PathBuf::from("/nonexistent/catalog.toml")),
        };
        let msg = format!("{:#}", config.load_catalog().unwrap_err());
        assert!(msg.contains("/nonexistent/catalog.toml"), "unexpected error: {msg}");
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let path = config_path();
        assert!(
            path.ends_with("liftplan/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }
}
