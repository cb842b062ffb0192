//! Logger setup.
//!
//! The journal is preferred when stderr is connected to it (the `journal`
//! feature), then syslog (the `syslog` feature), then a terminal logger.

use log::LevelFilter;

pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(verbosity: u8) {
    let level = level_for(verbosity);

    #[cfg(feature = "journal")]
    if systemd_journal_logger::connected_to_journal() {
        match systemd_journal_logger::JournalLog::new() {
            Ok(journal) => {
                if journal
                    .with_syslog_identifier(env!("CARGO_PKG_NAME").to_string())
                    .install()
                    .is_ok()
                {
                    log::set_max_level(level);
                    return;
                }
            }
            Err(e) => eprintln!("journal logging unavailable: {e}"),
        }
    }

    #[cfg(feature = "syslog")]
    match syslog::init(syslog::Facility::LOG_USER, level, Some(env!("CARGO_PKG_NAME"))) {
        Ok(()) => return,
        Err(e) => eprintln!("syslog logging unavailable: {e}"),
    }

    if let Err(e) = simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    ) {
        eprintln!("cannot install logger: {e}");
    }
}
