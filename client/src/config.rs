//! Page-URL settings.

/// Console log level for a page whose query string is `search`.
///
/// `?debug=1` turns on debug output; anything else logs at `Info`.
pub fn log_level(search: &str) -> log::Level {
    let debug = search
        .trim_start_matches('?')
        .split('&')
        .any(|pair| pair == "debug=1");
    if debug {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}
