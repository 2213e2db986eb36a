pub mod configs;
pub mod errors;
pub mod plugin;
pub mod services;

/// Installs a fmt subscriber filtered by the configured log level. Meant
/// for host binaries and examples; tests install their own.
pub fn init_tracing(level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                let app_name = env!("CARGO_PKG_NAME").replace('-', "_");

                format!("{app_name}={level}").into()
            }),
        )
        .init();
}
