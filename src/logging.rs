/// Logs to stderr at info level, or debug with `verbose`.
/// `RUST_LOG` still takes precedence when set.
pub fn init(verbose: bool) {
    let level = match verbose {
        true => log::LevelFilter::Debug,
        false => log::LevelFilter::Info,
    };

    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(level)
        .parse_default_env()
        .init();
}
