use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::flags::Flags;

pub const LOG_ENV: &str = "FILEMAN_LOG";

pub fn default_filter(flags: &Flags) -> &'static str {
    if flags.is_set("debug") {
        "fileman=debug"
    } else {
        "fileman=warn"
    }
}

pub fn init(flags: &Flags) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter(flags)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
