use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn cli_filter(verbose: bool, configured_level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("utilkit=debug")
        } else {
            let level = configured_level.unwrap_or("warn");
            EnvFilter::try_new(format!("utilkit={}", level))
                .unwrap_or_else(|_| EnvFilter::new("utilkit=warn"))
        }
    })
}

/// Logs go to stderr so that stdout only carries function results.
pub fn init_cli_logger(verbose: bool, configured_level: Option<&str>) {
    tracing_subscriber::registry()
        .with(cli_filter(verbose, configured_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool, configured_level: Option<&str>) {
    tracing_subscriber::registry()
        .with(cli_filter(verbose, configured_level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}
