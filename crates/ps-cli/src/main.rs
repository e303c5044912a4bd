#[cfg(debug_assertions)]
const DEFAULT_LOG_FILTER: &str = "debug";
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_FILTER: &str = "info";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();
    std::process::exit(ps_cli::run_cli_from_args(std::env::args_os()));
}
