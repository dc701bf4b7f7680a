//! Connection settings stored in a TOML file with an `[omeconf]` table.
//!
//! ```toml
//! [omeconf]
//! root_url = "http://localhost:8001/3.1"
//! restuser = "restadmin"
//! restpass = "restpass"
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File name looked up next to the executable when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "omeconf.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fatal configuration problems, all raised before any network activity.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}: No such file", .0.display())]
    NotFound(PathBuf),
    #[error("read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{}: Can not find a section omeconf", .0.display())]
    MissingSection(PathBuf),
    #[error("{}: section omeconf is missing key {key}", .path.display())]
    MissingKey { path: PathBuf, key: &'static str },
    #[error("{}: {message}", .path.display())]
    Invalid { path: PathBuf, message: String },
}

/// Parameters needed to reach the list server's REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// API root, e.g. `http://localhost:8001/3.1`. Stored without trailing slash.
    pub root_url: String,
    pub restuser: String,
    pub restpass: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    omeconf: Option<RawSection>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSection {
    root_url: Option<String>,
    restuser: Option<String>,
    restpass: Option<String>,
    timeout_secs: Option<u64>,
}

/// Pick the config file: an explicit path must exist, otherwise fall back to
/// [`DEFAULT_CONFIG_FILE`] beside the running executable.
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        return Ok(path.to_path_buf());
    }
    Ok(default_config_path())
}

fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_CONFIG_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load and validate connection settings.
///
/// A missing default file reads as an empty document and so reports the
/// missing section, matching how an absent file with no `[omeconf]` looks.
pub fn load_config(path: &Path) -> Result<ConnectionConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    parse_config(path, &contents)
}

fn parse_config(path: &Path, contents: &str) -> Result<ConnectionConfig, ConfigError> {
    let file: ConfigFile = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let section = file
        .omeconf
        .ok_or_else(|| ConfigError::MissingSection(path.to_path_buf()))?;
    let require = |value: Option<String>, key: &'static str| {
        value.ok_or_else(|| ConfigError::MissingKey {
            path: path.to_path_buf(),
            key,
        })
    };
    let config = ConnectionConfig {
        root_url: require(section.root_url, "root_url")?
            .trim_end_matches('/')
            .to_string(),
        restuser: require(section.restuser, "restuser")?,
        restpass: require(section.restpass, "restpass")?,
        timeout_secs: section.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };
    config.validate().map_err(|message| ConfigError::Invalid {
        path: path.to_path_buf(),
        message,
    })?;
    Ok(config)
}

impl ConnectionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.root_url.trim().is_empty() {
            return Err("root_url must be non-empty".to_string());
        }
        if !(self.root_url.starts_with("http://") || self.root_url.starts_with("https://")) {
            return Err(format!("root_url must be an http(s) URL, got {}", self.root_url));
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
[omeconf]
root_url = "http://localhost:8001/3.1/"
restuser = "restadmin"
restpass = "secret"
"#;

    #[test]
    fn loads_section_and_trims_root_url() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("omeconf.toml");
        fs::write(&path, VALID).expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(
            cfg,
            ConnectionConfig {
                root_url: "http://localhost:8001/3.1".to_string(),
                restuser: "restadmin".to_string(),
                restpass: "secret".to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            }
        );
    }

    #[test]
    fn missing_section_is_reported() {
        let err = parse_config(Path::new("cfg.toml"), "[other]\nroot_url = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(_)));
        assert_eq!(err.to_string(), "cfg.toml: Can not find a section omeconf");
    }

    #[test]
    fn missing_default_file_reports_missing_section() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = load_config(&temp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection(_)));
    }

    #[test]
    fn missing_key_is_named() {
        let err = parse_config(
            Path::new("cfg.toml"),
            "[omeconf]\nroot_url = \"http://h/3.1\"\nrestuser = \"u\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "restpass", .. }));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse_config(Path::new("cfg.toml"), "[omeconf\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn rejects_zero_timeout_and_non_http_root() {
        let zero = parse_config(
            Path::new("cfg.toml"),
            "[omeconf]\nroot_url = \"http://h\"\nrestuser = \"u\"\nrestpass = \"p\"\ntimeout_secs = 0\n",
        )
        .unwrap_err();
        assert!(zero.to_string().contains("timeout_secs"));

        let scheme = parse_config(
            Path::new("cfg.toml"),
            "[omeconf]\nroot_url = \"ftp://h\"\nrestuser = \"u\"\nrestpass = \"p\"\n",
        )
        .unwrap_err();
        assert!(matches!(scheme, ConfigError::Invalid { .. }));
    }

    #[test]
    fn explicit_missing_path_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("nope.toml");
        let err = resolve_config_path(Some(missing.as_path())).unwrap_err();
        assert_eq!(err.to_string(), format!("{}: No such file", missing.display()));
    }

    #[test]
    fn default_path_sits_beside_executable() {
        let path = resolve_config_path(None).expect("resolve");
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(DEFAULT_CONFIG_FILE));
    }
}
