/// Log directives applied on top of the `LOG` environment filter to keep
/// dependency noise out of the default output.
pub const DEFAULT_LOG_FILTERS: &[&str] = &[
    #[cfg(not(debug_assertions))]
    "mio=info",
    "hyper=info",
    "hyper_util=info",
    "reqwest=info",
    "rustls=info",
    "tower_http=info",
];
