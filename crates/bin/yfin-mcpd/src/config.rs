use clap::{ArgAction, Parser, builder::BoolishValueParser};
use std::error::Error;
use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use yfin_core::provider::YahooConfig;
use yfin_core::provider::yahoo::DEFAULT_QUERY_BASE_URL;

const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:4030";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser, Debug)]
#[command(name = "yfin-mcpd", version, about = "Yahoo Finance MCP daemon.")]
struct CliArgs {
    #[arg(
        long = "stdio",
        env = "YFIN_ENABLE_STDIO",
        action = ArgAction::Set,
        default_value_t = true,
        value_parser = BoolishValueParser::new()
    )]
    enable_stdio: bool,

    #[arg(
        long,
        env = "YFIN_HTTP_SERVE",
        action = ArgAction::Set,
        default_value_t = false,
        value_parser = BoolishValueParser::new()
    )]
    http_serve: bool,

    #[arg(long, env = "YFIN_HTTP_ADDR", default_value = DEFAULT_HTTP_ADDR)]
    http_addr: SocketAddr,

    #[arg(
        long,
        env = "YFIN_PROVIDER_TIMEOUT_SECS",
        default_value_t = DEFAULT_PROVIDER_TIMEOUT_SECS
    )]
    provider_timeout_secs: u64,

    #[arg(long, env = "YFIN_USER_AGENT")]
    user_agent: Option<String>,

    #[arg(long, env = "YFIN_QUERY_BASE_URL", default_value = DEFAULT_QUERY_BASE_URL)]
    query_base_url: String,

    #[arg(long, env = "YFIN_LOG_FILTER", default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

/// Runtime configuration loaded from CLI arguments and environment variables.
#[derive(Clone, Debug)]
pub struct YfinConfig {
    pub enable_stdio: bool,
    pub http_serve: bool,
    pub http_addr: SocketAddr,
    pub provider_timeout: Duration,
    pub user_agent: Option<String>,
    pub query_base_url: String,
    pub log_filter: String,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingSetting(&'static str),
    InvalidSetting { name: &'static str, value: String },
    NoTransport,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSetting(name) => write!(f, "missing required setting: {name}"),
            Self::InvalidSetting { name, value } => {
                write!(f, "invalid {name} value: {value}")
            }
            Self::NoTransport => write!(
                f,
                "no transport enabled: set YFIN_ENABLE_STDIO or YFIN_HTTP_SERVE"
            ),
        }
    }
}

impl Error for ConfigError {}

impl YfinConfig {
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::try_from(args)
    }

    /// Provider settings derived from this configuration.
    pub fn yahoo_config(&self) -> YahooConfig {
        let config = YahooConfig::new(self.query_base_url.clone()).with_timeout(self.provider_timeout);
        match &self.user_agent {
            Some(user_agent) => config.with_user_agent(user_agent.clone()),
            None => config,
        }
    }
}

impl TryFrom<CliArgs> for YfinConfig {
    type Error = ConfigError;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !args.enable_stdio && !args.http_serve {
            return Err(ConfigError::NoTransport);
        }

        if args.provider_timeout_secs == 0 {
            return Err(ConfigError::InvalidSetting {
                name: "YFIN_PROVIDER_TIMEOUT_SECS",
                value: args.provider_timeout_secs.to_string(),
            });
        }

        let query_base_url = args.query_base_url.trim().to_string();
        if query_base_url.is_empty() {
            return Err(ConfigError::MissingSetting("YFIN_QUERY_BASE_URL"));
        }

        let user_agent = args.user_agent.filter(|value| !value.trim().is_empty());
        let log_filter = if args.log_filter.trim().is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            args.log_filter
        };

        Ok(Self {
            enable_stdio: args.enable_stdio,
            http_serve: args.http_serve,
            http_addr: args.http_addr,
            provider_timeout: Duration::from_secs(args.provider_timeout_secs),
            user_agent,
            query_base_url,
            log_filter,
        })
    }
}

#[cfg(test)]
mod tests {
    use yfin_core::provider::yahoo::DEFAULT_USER_AGENT;

    use super::*;

    fn base_args() -> CliArgs {
        CliArgs {
            enable_stdio: true,
            http_serve: false,
            http_addr: DEFAULT_HTTP_ADDR.parse().expect("valid HTTP addr"),
            provider_timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
            user_agent: None,
            query_base_url: DEFAULT_QUERY_BASE_URL.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    #[test]
    fn defaults_serve_stdio_only() {
        let config = YfinConfig::try_from(base_args()).expect("config should parse");

        assert!(config.enable_stdio);
        assert!(!config.http_serve);
        assert_eq!(config.provider_timeout, Duration::from_secs(30));
        assert_eq!(config.log_filter, "warn");
    }

    #[test]
    fn cli_flags_parse() {
        let args = CliArgs::try_parse_from([
            "yfin-mcpd",
            "--stdio",
            "false",
            "--http-serve",
            "true",
            "--http-addr",
            "0.0.0.0:9000",
        ])
        .expect("flags should parse");
        let config = YfinConfig::try_from(args).expect("config should parse");

        assert!(!config.enable_stdio);
        assert!(config.http_serve);
        assert_eq!(config.http_addr.port(), 9000);
    }

    #[test]
    fn boolean_flags_default_without_values() {
        let args = CliArgs::try_parse_from(["yfin-mcpd"]).expect("no flags should parse");
        assert!(args.enable_stdio);
        assert!(!args.http_serve);

        let args = CliArgs::try_parse_from(["yfin-mcpd", "--stdio", "no", "--http-serve", "yes"])
            .expect("boolish values should parse");
        assert!(!args.enable_stdio);
        assert!(args.http_serve);
    }

    #[test]
    fn rejects_disabled_transports() {
        let mut args = base_args();
        args.enable_stdio = false;

        let err = YfinConfig::try_from(args).expect_err("a transport is required");
        assert!(matches!(err, ConfigError::NoTransport));
    }

    #[test]
    fn rejects_zero_timeout_and_blank_base_url() {
        let mut args = base_args();
        args.provider_timeout_secs = 0;
        assert!(matches!(
            YfinConfig::try_from(args),
            Err(ConfigError::InvalidSetting { name: "YFIN_PROVIDER_TIMEOUT_SECS", .. })
        ));

        let mut args = base_args();
        args.query_base_url = "   ".to_string();
        assert!(matches!(
            YfinConfig::try_from(args),
            Err(ConfigError::MissingSetting("YFIN_QUERY_BASE_URL"))
        ));
    }

    #[test]
    fn blank_user_agent_keeps_provider_default() {
        let mut args = base_args();
        args.user_agent = Some(String::new());
        let config = YfinConfig::try_from(args).expect("config should parse");
        assert_eq!(config.yahoo_config().user_agent, DEFAULT_USER_AGENT);

        let mut args = base_args();
        args.user_agent = Some("yfin-test/1.0".to_string());
        let config = YfinConfig::try_from(args).expect("config should parse");
        assert_eq!(config.yahoo_config().user_agent, "yfin-test/1.0");
    }
}
