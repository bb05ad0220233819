//! Log filter shared by the `ledger` binary and its tests.
//!
//! Failures are already reported to the user by the notifier, so structured
//! logs stay off unless `RUST_LOG` asks for them.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

const SILENT: &str = "off";

/// Build a filter from explicit directives, silencing output when they are
/// absent or unparsable.
///
/// # Examples
/// ```
/// use ledger_client::telemetry::filter_from;
/// use tracing_subscriber::filter::LevelFilter;
///
/// assert_eq!(filter_from(None).max_level_hint(), Some(LevelFilter::OFF));
/// assert_eq!(filter_from(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
/// ```
#[must_use]
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(SILENT))
}

/// Build the filter from [`LOG_FILTER_ENV`].
#[must_use]
pub fn filter_from_env() -> EnvFilter {
    filter_from(std::env::var(LOG_FILTER_ENV).ok().as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tracing_subscriber::filter::LevelFilter;

    #[rstest]
    #[case::unset(None, LevelFilter::OFF)]
    #[case::blank(Some("  "), LevelFilter::OFF)]
    #[case::garbage(Some("ledger=loud"), LevelFilter::OFF)]
    #[case::warn(Some("warn"), LevelFilter::WARN)]
    fn directives_choose_the_level(
        #[case] directives: Option<&str>,
        #[case] expected: LevelFilter,
    ) {
        assert_eq!(filter_from(directives).max_level_hint(), Some(expected));
    }
}
