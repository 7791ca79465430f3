use anyhow::bail;
use clap::{Parser, ValueEnum};
use stowage::{GeneratorConfig, MAX_ENUMERATION, RECOMMENDED_LIMIT, Strictness};

/// Output format of the log layer.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line, human readable.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Runtime configuration for the `stowage-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a
/// `.env` file is loaded first, if present).
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stowage-server",
    version,
    about = "An HTTP service for previewing and generating storage locations"
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:8080"))]
    pub server_addr: String,

    /// Previews with more names than this carry a warning.
    ///
    /// Environment variable: `RECOMMENDED_LIMIT`
    #[arg(long, env = "RECOMMENDED_LIMIT", default_value_t = RECOMMENDED_LIMIT)]
    pub recommended_limit: usize,

    /// Hard ceiling on the number of names one scheme may expand to. Larger
    /// requests are rejected before any name is built. Cannot exceed
    /// 1,000,000.
    ///
    /// Environment variable: `MAX_LOCATIONS`
    #[arg(long, env = "MAX_LOCATIONS", default_value_t = MAX_ENUMERATION)]
    pub max_locations: usize,

    /// Reject schemes whose used dimensions resolve to nothing, instead of
    /// previewing them as empty.
    ///
    /// Environment variable: `STRICT_DIMENSIONS`
    #[arg(long, env = "STRICT_DIMENSIONS", default_value_t = false)]
    pub strict_dimensions: bool,

    /// Postgres connection string. Without it, locations live in memory and
    /// are lost on shutdown.
    ///
    /// Environment variable: `DATABASE_URL`
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Size of the Postgres connection pool.
    ///
    /// Environment variable: `DB_MAX_CONNECTIONS`
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,

    /// Log output format.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub recommended_limit: usize,
    pub max_locations: usize,
    pub strictness: Strictness,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub const fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            recommended_limit: self.recommended_limit,
            max_locations: self.max_locations,
            strictness: self.strictness,
        }
    }
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.recommended_limit == 0 {
            bail!("RECOMMENDED_LIMIT must be greater than 0");
        }

        if args.max_locations < args.recommended_limit {
            bail!(
                "MAX_LOCATIONS ({}) must not be below RECOMMENDED_LIMIT ({})",
                args.max_locations,
                args.recommended_limit
            );
        }

        if args.max_locations > MAX_ENUMERATION {
            bail!(
                "MAX_LOCATIONS ({}) must not exceed {}",
                args.max_locations,
                MAX_ENUMERATION
            );
        }

        if args.db_max_connections == 0 {
            bail!("DB_MAX_CONNECTIONS must be greater than 0");
        }

        let database_url = args.database_url.filter(|url| !url.trim().is_empty());

        Ok(Self {
            server_addr: args.server_addr,
            recommended_limit: args.recommended_limit,
            max_locations: args.max_locations,
            strictness: if args.strict_dimensions {
                Strictness::Strict
            } else {
                Strictness::Lenient
            },
            database_url,
            db_max_connections: args.db_max_connections,
            log_format: args.log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> anyhow::Result<ServerConfig> {
        let mut argv = vec!["stowage-server"];
        argv.extend_from_slice(args);
        ServerConfig::try_from(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&[
            "--server-addr",
            "127.0.0.1:9000",
            "--recommended-limit",
            "50",
            "--max-locations",
            "5000",
            "--strict-dimensions",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.server_addr, "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.generator_config(),
            GeneratorConfig::default()
                .with_recommended_limit(50)
                .with_max_locations(5000)
                .with_strictness(Strictness::Strict)
        );
    }

    #[test]
    fn rejects_zero_recommended_limit() {
        let err = parse(&["--recommended-limit", "0"]).unwrap_err();
        assert!(err.to_string().contains("RECOMMENDED_LIMIT"));
    }

    #[test]
    fn rejects_ceiling_below_recommended_limit() {
        let err = parse(&["--recommended-limit", "100", "--max-locations", "10"]).unwrap_err();
        assert!(err.to_string().contains("MAX_LOCATIONS (10)"));
    }

    #[test]
    fn rejects_ceiling_above_enumeration_limit() {
        let err = parse(&["--max-locations", "1000001"]).unwrap_err();
        assert!(err.to_string().contains("MAX_LOCATIONS (1000001) must not exceed"));
    }

    #[test]
    fn ceiling_defaults_to_enumeration_limit() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.max_locations, MAX_ENUMERATION);
        assert_eq!(
            config.generator_config().effective_max_locations(),
            MAX_ENUMERATION
        );
    }

    #[test]
    fn blank_database_url_means_memory() {
        let config = parse(&["--database-url", "  "]).unwrap();
        assert_eq!(config.database_url, None);
    }
}
