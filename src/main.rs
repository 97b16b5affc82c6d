use std::io::{self, BufRead, Write};

use clap::{ArgAction, Parser};
use log::{info, LevelFilter, Metadata, Record};
use parking_registry::{menu::Menu, CarRegistry};

/// Console parking lot manager.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of cars the lot can hold. Asked for on startup when omitted.
    #[arg(short, long)]
    capacity: Option<usize>,
    /// Log more to stderr; repeat for more detail (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Writes `[LEVEL] message` lines to stderr, leaving stdout to the menu.
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

static LOGGER: StderrLogger = StderrLogger;

fn level_filter(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// The capacity from the command line, or else whatever the user types at the prompt. `None` if
/// the input ends before a valid number is read.
fn resolve_capacity<R: BufRead, W: Write>(
    from_args: Option<usize>,
    menu: &mut Menu<R, W>,
) -> io::Result<Option<usize>> {
    match from_args {
        Some(capacity) => Ok(Some(capacity)),
        None => menu.read_capacity(),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();

    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level_filter(args.verbose)));

    let mut menu = Menu::new(io::stdin().lock(), io::stdout().lock());

    let Some(capacity) = resolve_capacity(args.capacity, &mut menu)? else {
        return Ok(());
    };

    info!("opening a parking lot for {capacity} cars");
    let mut registry = CarRegistry::new(capacity);
    menu.run(&mut registry)
}
