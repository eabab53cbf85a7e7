use tracing_subscriber::EnvFilter;

pub fn init_logging(verbosity: u8) {
    // 0 = errors only
    // 1 (-v) = info for nacosctl, warn for the client crate
    // 2+ (-vv) = debug for everything
    let filter = match verbosity {
        0 => "error",
        1 => "info,nacos=warn",
        _ => "debug",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();
}
