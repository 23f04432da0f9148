use tracing_subscriber::EnvFilter;

const LOG_FILTER_VAR: &str = "TESTGENIUS_LOG";
const LOG_FORMAT_VAR: &str = "TESTGENIUS_LOG_FORMAT";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    match std::env::var(LOG_FORMAT_VAR).as_deref() {
        Ok("json") => builder.json().init(),
        _ => builder.init(),
    }
}
