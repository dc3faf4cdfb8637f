use http::HeaderValue;
use menva::FromEnv;
use std::{fmt, net::Ipv4Addr, str::FromStr};

pub const ENV_PREFIX: &str = "ACTIVITY_";

#[derive(Debug, Clone, PartialEq)]
pub enum Env {
    Development,
    Production,
    Test,
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(Env::Development),
            "production" => Ok(Env::Production),
            "test" => Ok(Env::Test),
            _ => Err(format!("Invalid value for enum Env: {}", s)),
        }
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Test => write!(f, "test"),
        }
    }
}

#[derive(Debug, Clone, FromEnv)]
pub struct ServiceConfig {
    pub env: Env,
    ip: Ipv4Addr,
    port: u16,
    /// JSON file with the initial users. Empty means start with no users.
    pub seed_path: String,
    allowed_origins: String,
    pub request_timeout_secs: u64,
    pub worker_threads: usize,
    sentry_dsn: String,
}

impl ServiceConfig {
    pub fn from_env_prefixed() -> Self {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    pub fn stub() -> Self {
        Self {
            env: Env::Test,
            ip: Ipv4Addr::new(127, 0, 0, 1),
            port: 0,
            seed_path: String::new(),
            allowed_origins: "*".into(),
            request_timeout_secs: 10,
            worker_threads: 1,
            sentry_dsn: String::new(),
        }
    }

    pub fn socket_addr(&self) -> (Ipv4Addr, u16) {
        (self.ip, self.port)
    }

    pub fn allowed_origins(&self) -> AllowedOrigins {
        AllowedOrigins::from_string(&self.allowed_origins)
    }

    pub fn sentry_dsn(&self) -> Option<&str> {
        Some(self.sentry_dsn.trim()).filter(|dsn| !dsn.is_empty())
    }
}

#[derive(Clone, Debug, Default)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    fn from_string(allowed_origins: &str) -> Self {
        Self(
            allowed_origins
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_owned())
                .collect(),
        )
    }

    pub fn allows_any(&self) -> bool {
        self.0.iter().any(|s| s == "*")
    }

    pub fn to_headers(&self) -> Vec<HeaderValue> {
        self.0
            .iter()
            .filter_map(|s| s.parse::<HeaderValue>().ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_env_case_insensitively() {
        assert_eq!("Production".parse::<Env>(), Ok(Env::Production));
        assert_eq!("test".parse::<Env>(), Ok(Env::Test));
        assert!("staging".parse::<Env>().is_err());
    }

    #[test]
    fn splits_allowed_origins() {
        let origins = AllowedOrigins::from_string("https://a.com, https://b.com,");
        assert!(!origins.allows_any());
        assert_eq!(origins.to_headers().len(), 2);
        assert!(AllowedOrigins::from_string("*").allows_any());
    }

    #[test]
    fn empty_sentry_dsn_disables_reporting() {
        assert_eq!(ServiceConfig::stub().sentry_dsn(), None);
    }
}
