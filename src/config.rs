//! Service settings.
//!
//! Loaded from an optional TOML file with environment variable overrides.
//! Priority: environment > file > defaults.
//!
//! ```toml
//! host = "127.0.0.1"
//! backend_port = 5002
//! frontend_port = 5001
//! cors = true
//! cors_origin = "*"
//! seed = true
//! ```
//!
//! | Variable | Field |
//! |---|---|
//! | `POSTBOARD_CONFIG` | path of the file (default `postboard.toml`) |
//! | `POSTBOARD_HOST` | `host` |
//! | `POSTBOARD_BACKEND_PORT` | `backend_port` |
//! | `POSTBOARD_FRONTEND_PORT` | `frontend_port` |
//! | `POSTBOARD_CORS` | `cors` |
//! | `POSTBOARD_CORS_ORIGIN` | `cors_origin` |
//! | `POSTBOARD_SEED` | `seed` |

use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const DEFAULT_CONFIG_FILE: &str = "postboard.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("cannot resolve listen address {addr}")]
    Unresolvable { addr: String },
}

/// Settings shared by both binaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Interface both services bind to.
    pub host: String,
    pub backend_port: u16,
    pub frontend_port: u16,
    /// Send CORS headers from the backend.
    pub cors: bool,
    pub cors_origin: String,
    /// Start the backend with the two sample posts.
    pub seed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            backend_port: 5002,
            frontend_port: 5001,
            cors: true,
            cors_origin: "*".to_owned(),
            seed: true,
        }
    }
}

impl Settings {
    /// Reads `POSTBOARD_CONFIG` (or `postboard.toml`) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Like [`load`](Settings::load), with variables looked up through `env`.
    ///
    /// A path named by `POSTBOARD_CONFIG` must exist; the implicit
    /// `postboard.toml` is optional.
    pub fn load_with(env: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        match env("POSTBOARD_CONFIG").filter(|p| !p.is_empty()) {
            Some(path) => Self::load_file(Path::new(&path), env),
            None => Self::load_from(Path::new(DEFAULT_CONFIG_FILE), env),
        }
    }

    /// Reads `path` if it exists, then applies overrides looked up with `env`.
    pub fn load_from(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::load_file(path, env);
        }
        debug!(?path, "config file not found, using defaults");
        let mut settings = Self::default();
        settings.apply_overrides(env)?;
        Ok(settings)
    }

    /// Reads `path`, which must exist, then applies overrides looked up with `env`.
    pub fn load_file(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        info!(?path, "loaded configuration");
        let mut settings = Self::from_toml(&contents)?;
        settings.apply_overrides(env)?;
        Ok(settings)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(host) = env("POSTBOARD_HOST") {
            self.host = host;
        }
        if let Some(port) = env("POSTBOARD_BACKEND_PORT") {
            self.backend_port = parse_port("POSTBOARD_BACKEND_PORT", port)?;
        }
        if let Some(port) = env("POSTBOARD_FRONTEND_PORT") {
            self.frontend_port = parse_port("POSTBOARD_FRONTEND_PORT", port)?;
        }
        if let Some(flag) = env("POSTBOARD_CORS") {
            self.cors = parse_flag("POSTBOARD_CORS", flag)?;
        }
        if let Some(origin) = env("POSTBOARD_CORS_ORIGIN") {
            self.cors_origin = origin;
        }
        if let Some(flag) = env("POSTBOARD_SEED") {
            self.seed = parse_flag("POSTBOARD_SEED", flag)?;
        }
        Ok(())
    }

    pub fn backend_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.resolve(self.backend_port)
    }

    pub fn frontend_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.resolve(self.frontend_port)
    }

    fn resolve(&self, port: u16) -> Result<SocketAddr, ConfigError> {
        (self.host.as_str(), port)
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ConfigError::Unresolvable { addr: format!("{}:{port}", self.host) })
    }
}

fn parse_port(key: &'static str, value: String) -> Result<u16, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue { key, value })
}

fn parse_flag(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_follow_the_original_ports() {
        let settings = Settings::default();
        assert_eq!(settings.backend_port, 5002);
        assert_eq!(settings.frontend_port, 5001);
        assert!(settings.cors && settings.seed);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml("backend_port = 8080\nseed = false\n").unwrap();
        assert_eq!(settings.backend_port, 8080);
        assert!(!settings.seed);
        assert_eq!(settings.frontend_port, 5001);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(matches!(
            Settings::from_toml("backend_port = \"many\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_uses_defaults_and_env_wins() {
        let path = Path::new("/nonexistent/postboard-test.toml");
        let env = env_of(&[("POSTBOARD_BACKEND_PORT", "9000"), ("POSTBOARD_CORS", "off")]);
        let settings = Settings::load_from(path, env).unwrap();
        assert_eq!(settings.backend_port, 9000);
        assert!(!settings.cors);
    }

    #[test]
    fn env_overrides_file() {
        let path = std::env::temp_dir().join(format!("postboard-{}.toml", std::process::id()));
        fs::write(&path, "host = \"127.0.0.1\"\nfrontend_port = 7000\n").unwrap();
        let settings =
            Settings::load_from(&path, env_of(&[("POSTBOARD_FRONTEND_PORT", "7001")])).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.frontend_port, 7001);
        assert_eq!(settings.frontend_addr().unwrap(), "127.0.0.1:7001".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bad_overrides_are_rejected() {
        let path = Path::new("/nonexistent/postboard-test.toml");
        let err = Settings::load_from(path, env_of(&[("POSTBOARD_BACKEND_PORT", "70000")]));
        assert!(matches!(err, Err(ConfigError::InvalidValue { key: "POSTBOARD_BACKEND_PORT", .. })));

        let err = Settings::load_from(path, env_of(&[("POSTBOARD_SEED", "maybe")]));
        assert!(matches!(err, Err(ConfigError::InvalidValue { key: "POSTBOARD_SEED", .. })));
    }

    #[test]
    fn explicit_config_path_must_exist() {
        let env = env_of(&[("POSTBOARD_CONFIG", "/nonexistent/postboard-explicit.toml")]);
        let err = Settings::load_with(env);
        assert!(matches!(err, Err(ConfigError::Read { ref path, .. }) if path == Path::new("/nonexistent/postboard-explicit.toml")));
    }

    #[test]
    fn explicit_config_path_is_read() {
        let path = std::env::temp_dir().join(format!("postboard-explicit-{}.toml", std::process::id()));
        fs::write(&path, "backend_port = 6100\n").unwrap();
        let location = path.to_string_lossy().into_owned();
        let settings = Settings::load_with(env_of(&[("POSTBOARD_CONFIG", location.as_str())])).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.backend_port, 6100);
        assert_eq!(settings.frontend_port, 5001);
    }
}
