use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_target(false).with_env_filter(filter).compact().init();
}

fn main() -> ExitCode {
    init_logging();
    aftercall_cli::run()
}
