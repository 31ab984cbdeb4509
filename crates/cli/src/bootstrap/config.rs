use ferrous_rewrite_domain::{CliOverrides, Config};
use tracing::info;

/// Reads the file, layers CLI/env overrides on top and validates the result.
/// Any error here is fatal: the process must not start listening.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config(config: &Config, config_path: Option<&str>) {
    info!(
        config_file = config_path.unwrap_or("default"),
        listen = %config.server.listen_address,
        default_prefix = %config.rewrite.default_prefix,
        answer_ttl = config.rewrite.answer_ttl,
        negative_ttl = config.rewrite.negative_ttl,
        upstream_timeout_ms = config.rewrite.upstream_timeout_ms,
        "Configuration loaded"
    );
}
