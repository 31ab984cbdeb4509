use clap::Parser;
use ferrous_rewrite_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "ferrous-rewrite")]
#[command(version)]
#[command(about = "Ferrous Rewrite - DNS proxy that rewrites zone names before forwarding")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Zone entries: <zone>=[<prefix>:]<udp|tcp>:<host:port>, comma separated
    #[arg(short = 'z', long, env = "ZONES")]
    zones: Option<String>,

    /// Prefix used for zones without their own
    #[arg(long, env = "DEFAULT_PREFIX")]
    default_prefix: Option<String>,

    /// TTL of synthesized SOA records, in seconds
    #[arg(long, env = "NEGATIVE_TTL")]
    negative_ttl: Option<u32>,

    /// TTL written onto forwarded answers, in seconds
    #[arg(long, env = "ANSWER_TTL")]
    answer_ttl: Option<u32>,

    /// Listen address (host:port or :port)
    #[arg(short = 'l', long = "listen", env = "LISTEN_ADDR")]
    listen: Option<String>,

    /// Upstream exchange timeout, in milliseconds
    #[arg(long, env = "UPSTREAM_TIMEOUT_MS")]
    upstream_timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        zones: cli.zones,
        default_prefix: cli.default_prefix,
        negative_ttl: cli.negative_ttl,
        answer_ttl: cli.answer_ttl,
        upstream_timeout_ms: cli.upstream_timeout_ms,
        listen_address: cli.listen,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::log_config(&config, cli.config.as_deref());

    info!("Starting Ferrous Rewrite v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;
    let listen_addr = config.server.listen_socket_addr()?;

    info!(
        listen = %listen_addr,
        zones = dns_services.zones.len(),
        "Listening for DNS queries"
    );

    server::start_dns_server(listen_addr, dns_services.handler()).await?;

    info!("Server shutdown complete");
    Ok(())
}
