use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Inicializa o subscriber de logs do binário
///
/// `RUST_LOG` tem precedência; sem ele o nível é `info` (ou `debug` com
/// `--verbose`).
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .ok();
}

pub fn log_config_loaded(domain: Option<&str>) {
    info!("Configuration loaded successfully for domain: {}", domain.unwrap_or("<not set>"));
}

pub fn log_api_request(endpoint: &str, query_len: usize) {
    debug!("amoCRM request: GET {} ({} query params)", endpoint, query_len);
}

pub fn log_amocrm_api_error(endpoint: &str, error: &str) {
    error!("amoCRM API error: {} - Error: {}", endpoint, error);
}

pub fn log_validation_error(field: &str, message: &str) {
    warn!("Validation error: {} - {}", field, message);
}
