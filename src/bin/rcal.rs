extern crate rangecal as lib;

use chrono::NaiveDate;
use flexi_logger::{FileSpec, Logger};
use lib::events::Dispatcher;
use lib::picker::RangePicker;
use lib::ui::{App, CalendarLayout, Theme};
use nix::sys::{signal, termios};
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;
use unsegen::base::Terminal;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "rcal",
    about = "Rangecal - pick a date range from a scrollable calendar."
)]
pub struct Args {
    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(
        short = "d",
        long = "date",
        help = "anchor date (YYYY-MM-DD), its year is used for all months"
    )]
    pub date: Option<NaiveDate>,

    #[structopt(
        short = "s",
        long = "show",
        help = "only print the calendar non-interactively"
    )]
    pub show: bool,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    // Anything below warnings would end up on top of the calendar
    let mut logger = Logger::try_with_env_or_str(if args.log_file.is_some() {
        DEFAULT_LOG_LEVEL
    } else {
        "warn"
    })?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let mut picker = RangePicker::new().on_change(|day| log::info!("picked {}", day));
    if let Some(anchor) = args.date {
        picker = picker.with_anchor(anchor);
    }

    if args.show {
        let layout = CalendarLayout::new(&picker);
        println!("{}", layout.to_plain_text(&Theme::from(&config.theme)));
        return Ok(());
    }

    const STDIN: std::os::unix::io::RawFd = 0;
    let orig_attr = std::sync::Mutex::new(termios::tcgetattr(STDIN)?);

    std::panic::set_hook(Box::new(move |info| {
        // Switch to main terminal screen
        println!("{}{}", termion::screen::ToMainScreen, termion::cursor::Show);

        if let Ok(attr) = orig_attr.lock() {
            let _ = termios::tcsetattr(STDIN, termios::SetArg::TCSANOW, &attr);
        }

        println!("Rangecal ran into a fatal error!");
        println!("{}", info);
        println!("{:?}", backtrace::Backtrace::new());
    }));

    let mut signals_to_wait = signal::SigSet::empty();
    signals_to_wait.add(signal::SIGWINCH);
    signals_to_wait.thread_block()?;

    let dispatcher = Dispatcher::from_config(&config, signals_to_wait);

    let mut app = App::new(&config, picker);

    {
        // Setup unsegen terminal
        let stdout = stdout();
        let term = Terminal::new(stdout.lock())?;
        app.run(dispatcher, term)?;
    }

    match app.selection().as_slice() {
        [start] => println!("{}", start.format(&config.output_format)),
        [start, end] => println!(
            "{}\n{}",
            start.format(&config.output_format),
            end.format(&config.output_format)
        ),
        _ => {}
    }

    Ok(())
}
