//! Application settings loaded via OrthoConfig.
//!
//! Values layer command-line flags over `BANKING_*` environment variables
//! over configuration files. Unset optional values fall back to the defaults
//! exposed by the accessors below.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Settings that fail validation after loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("invalid listen host {host:?}: {message}")]
    InvalidHost { host: String, message: String },
    #[error("listen port must be non-zero")]
    ZeroPort,
}

/// Runtime configuration for the HTTP server and its stores.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BANKING")]
pub struct AppSettings {
    /// Interface address to listen on.
    pub host: Option<String>,
    /// TCP port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection URL; the seeded in-memory store is used when unset.
    pub database_url: Option<String>,
    /// File holding the session cookie key material.
    pub session_key_file: Option<PathBuf>,
    /// Generate a throwaway session key when the key file is unreadable.
    pub session_allow_ephemeral: Option<bool>,
    /// Mark the session cookie `Secure`.
    pub cookie_secure: Option<bool>,
}

impl AppSettings {
    /// Socket address assembled from `host` and `port`.
    ///
    /// # Errors
    ///
    /// [`SettingsError`] when the host is not an IP address or the port is 0.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let host = self.host.as_deref().map_or(DEFAULT_HOST, str::trim);
        let ip: IpAddr = host.parse().map_err(|err: std::net::AddrParseError| {
            SettingsError::InvalidHost {
                host: host.to_owned(),
                message: err.to_string(),
            }
        })?;
        let port = self.port.unwrap_or(DEFAULT_PORT);
        if port == 0 {
            return Err(SettingsError::ZeroPort);
        }
        Ok(SocketAddr::new(ip, port))
    }

    /// Database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Whether the session cookie is marked `Secure`; defaults to `true`.
    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    /// Whether an unreadable key file may be replaced by a generated key;
    /// defaults to `false`.
    pub fn session_allow_ephemeral(&self) -> bool {
        self.session_allow_ephemeral.unwrap_or(false)
    }

    /// Session key path, falling back to the mounted secret location.
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "BANKING_HOST",
        "BANKING_PORT",
        "BANKING_DATABASE_URL",
        "BANKING_SESSION_KEY_FILE",
        "BANKING_SESSION_ALLOW_EPHEMERAL",
        "BANKING_COOKIE_SECURE",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("banking-backend")])
            .expect("settings should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            SocketAddr::from(([0, 0, 0, 0], 8080))
        );
        assert!(settings.database_url().is_none());
        assert_eq!(
            settings.session_key_file(),
            PathBuf::from(DEFAULT_SESSION_KEY_FILE)
        );
        assert!(!settings.session_allow_ephemeral());
        assert!(settings.cookie_secure());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let mut vars = cleared();
        vars.retain(|(name, _)| !name.ends_with("HOST") && !name.ends_with("PORT"));
        vars.extend([
            ("BANKING_HOST", Some("127.0.0.1".to_owned())),
            ("BANKING_PORT", Some("9090".to_owned())),
        ]);
        let _guard = lock_env(vars);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("configured address"),
            SocketAddr::from(([127, 0, 0, 1], 9090))
        );
    }

    #[rstest]
    fn database_url_and_flags_come_from_environment() {
        let _guard = lock_env([
            ("BANKING_HOST", None),
            ("BANKING_PORT", None),
            (
                "BANKING_DATABASE_URL",
                Some("postgres://bank@localhost/bank".to_owned()),
            ),
            ("BANKING_SESSION_KEY_FILE", Some("/tmp/key".to_owned())),
            ("BANKING_SESSION_ALLOW_EPHEMERAL", Some("true".to_owned())),
            ("BANKING_COOKIE_SECURE", Some("false".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(
            settings.database_url(),
            Some("postgres://bank@localhost/bank")
        );
        assert_eq!(settings.session_key_file(), PathBuf::from("/tmp/key"));
        assert!(settings.session_allow_ephemeral());
        assert!(!settings.cookie_secure());
    }

    fn settings_with(host: Option<&str>, port: Option<u16>, url: Option<&str>) -> AppSettings {
        AppSettings {
            host: host.map(str::to_owned),
            port,
            database_url: url.map(str::to_owned),
            session_key_file: None,
            session_allow_ephemeral: None,
            cookie_secure: None,
        }
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some(true), true)]
    #[case(Some(false), false)]
    fn cookie_secure_defaults_to_true(#[case] raw: Option<bool>, #[case] expected: bool) {
        let settings = AppSettings {
            cookie_secure: raw,
            ..settings_with(None, None, None)
        };
        assert_eq!(settings.cookie_secure(), expected);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some(true), true)]
    fn allow_ephemeral_defaults_to_false(#[case] raw: Option<bool>, #[case] expected: bool) {
        let settings = AppSettings {
            session_allow_ephemeral: raw,
            ..settings_with(None, None, None)
        };
        assert_eq!(settings.session_allow_ephemeral(), expected);
    }

    #[rstest]
    fn non_boolean_flags_fail_to_load() {
        let mut vars = cleared();
        vars.retain(|(name, _)| *name != "BANKING_COOKIE_SECURE");
        vars.push(("BANKING_COOKIE_SECURE", Some("maybe".to_owned())));
        let _guard = lock_env(vars);

        assert!(AppSettings::load_from_iter([OsString::from("banking-backend")]).is_err());
    }

    #[rstest]
    #[case(Some("localhost"))]
    #[case(Some("not an address"))]
    fn hostnames_are_rejected(#[case] host: Option<&str>) {
        let err = settings_with(host, None, None)
            .bind_addr()
            .expect_err("invalid host");
        assert!(matches!(err, SettingsError::InvalidHost { .. }));
    }

    #[rstest]
    fn zero_port_is_rejected() {
        let err = settings_with(None, Some(0), None)
            .bind_addr()
            .expect_err("zero port");
        assert_eq!(err, SettingsError::ZeroPort);
    }

    #[rstest]
    #[case(Some("   "), None)]
    #[case(Some(" postgres://db "), Some("postgres://db"))]
    fn blank_database_urls_are_ignored(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(settings_with(None, None, raw).database_url(), expected);
    }
}
