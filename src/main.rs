use anyhow::{Context, Result};
use clap::Parser;
use flash_relay::{api, config};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "flash-relay")]
#[command(about = "CORS relay for the Flash Invaders flash stream", long_about = None)]
#[command(version)]
struct Cli {
    /// Port to listen on (falls back to $PORT, then the config file)
    #[arg(env = "PORT")]
    port: Option<u16>,

    /// Path to configuration file
    #[arg(short, long, default_value = "flash-relay.toml")]
    config: PathBuf,

    /// Directory served for non-relay paths
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Override log format (pretty, json)
    #[arg(long)]
    log_format: Option<String>,
}

impl Cli {
    fn overrides(&self) -> config::ConfigOverrides {
        config::ConfigOverrides {
            port: self.port,
            static_dir: self.static_dir.clone(),
            log_level: self.log_level.clone(),
            log_format: self.log_format.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = config::load_config(&cli.config, &cli.overrides()).with_context(|| {
        format!(
            "Failed to load configuration from: {}",
            cli.config.display()
        )
    })?;

    // Initialize logging
    init_logging(&config.logging)?;

    // Print banner
    print_banner(&config);

    info!("Starting flash-relay...");
    api::start_server(config).await?;

    Ok(())
}

fn init_logging(config: &config::LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            // Default to pretty format
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

fn print_banner(config: &config::AppConfig) {
    let version = env!("CARGO_PKG_VERSION");
    let width = 59usize;
    let border = "═".repeat(width + 2);
    let line = |content: &str| {
        info!("║ {:width$} ║", content, width = width);
    };

    info!("╔{}╗", border);
    line("FLASH-RELAY");
    line(&format!("Flash Invaders CORS relay v{}", version));
    info!("╚{}╝", border);
    info!("");
    info!("Server Configuration:");
    info!("  → Address: {}:{}", config.http.host, config.http.port);
    info!("  → Log Level: {}", config.logging.level);
    info!("  → Log Format: {}", config.logging.format);
    info!(
        "  → Upstream timeouts: primary {}s, fallback {}s",
        config.upstream.primary.timeout_secs, config.upstream.fallback.timeout_secs
    );
    info!("");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_port_defaults_to_config() {
        std::env::remove_var("PORT");
        let cli = Cli::try_parse_from(["flash-relay"]).unwrap();
        assert_eq!(cli.port, None);
        assert_eq!(cli.config, PathBuf::from("flash-relay.toml"));
    }

    #[test]
    #[serial]
    fn test_port_from_environment() {
        std::env::set_var("PORT", "5050");
        let cli = Cli::try_parse_from(["flash-relay"]).unwrap();
        std::env::remove_var("PORT");

        assert_eq!(cli.port, Some(5050));
    }

    #[test]
    #[serial]
    fn test_port_argument_beats_environment() {
        std::env::set_var("PORT", "5050");
        let cli = Cli::try_parse_from(["flash-relay", "9000"]).unwrap();
        std::env::remove_var("PORT");

        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.overrides().port, Some(9000));
    }

    #[test]
    #[serial]
    fn test_invalid_port_is_rejected() {
        std::env::remove_var("PORT");
        assert!(Cli::try_parse_from(["flash-relay", "not-a-port"]).is_err());
    }
}
