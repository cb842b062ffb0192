use docshelf::{config, logging, ui};
use glib::ExitCode;
use gtk4::prelude::*;
use libadwaita::Application;
use std::path::PathBuf;

/// Application ID for D-Bus and desktop integration
const APP_ID: &str = "org.docshelf.Docshelf";

const USAGE: &str = "\
Usage: docshelf [OPTIONS]

Options:
  -c, --config <PATH>  Read configuration from PATH
  -v, --verbose        More log output (repeatable)
  -V, --version        Print version and exit
  -h, --help           Print this help and exit";

struct Args {
    config: Option<PathBuf>,
    verbosity: u8,
}

enum Command {
    Run(Args),
    Version,
    Help,
}

fn parse_args() -> Result<Command, lexopt::Error> {
    use lexopt::prelude::*;

    let mut args = Args {
        config: None,
        verbosity: 0,
    };
    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Short('c') | Long("config") => args.config = Some(parser.value()?.into()),
            Short('v') | Long("verbose") => args.verbosity = args.verbosity.saturating_add(1),
            Short('V') | Long("version") => return Ok(Command::Version),
            Short('h') | Long("help") => return Ok(Command::Help),
            _ => return Err(arg.unexpected()),
        }
    }
    Ok(Command::Run(args))
}

fn main() -> glib::ExitCode {
    let args = match parse_args() {
        Ok(Command::Run(args)) => args,
        Ok(Command::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{}\n\n{USAGE}", docshelf::error::Error::from(e));
            return ExitCode::FAILURE;
        }
    };

    logging::init(args.verbosity);
    glib::set_application_name(env!("CARGO_PKG_NAME"));

    let config_path = args.config.unwrap_or_else(config::config_path);
    let cfg = config::load(&config_path);
    log::info!("using config {}", config_path.display());

    // Arguments were consumed above; keep GTK from seeing them.
    let app = Application::builder().application_id(APP_ID).build();

    app.connect_activate(move |app| {
        // If a window already exists, present it instead of creating a new one
        if let Some(win) = app.windows().first() {
            win.present();
            return;
        }
        ui::build_ui(app, &cfg);
    });

    app.run_with_args::<&str>(&[])
}
