use canvas_scraper::config::Config;
use canvas_scraper::error::*;
use canvas_scraper::output::join_rows;
use canvas_scraper::scrapers::course_page::CoursePageScraper;
use chrono::{Datelike, Local};
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::fs;
use std::path::{Path, PathBuf};

/// Turn a saved Canvas "Modules" page into spreadsheet rows.
///
/// Expand every module in the browser, save the page, then point this at the
/// saved HTML file.
#[derive(Parser)]
#[command(name = "canvas-scraper", version)]
struct Cli {
    /// TOML file with selector overrides, base URL and title rewrites
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {
    /// One row per assignment: course, week, due date and a link
    Assignments {
        #[command(flatten)]
        page: PageArgs,

        /// Year assumed for due dates that don't name one [default: this year]
        #[arg(long)]
        year: Option<i32>
    },
    /// One row per week: week number and topic
    Schedule {
        #[command(flatten)]
        page: PageArgs,

        /// Add a column listing the week's graded items
        #[arg(long)]
        with_assignments: bool
    }
}

#[derive(Args)]
struct PageArgs {
    /// The saved course page
    page: PathBuf,

    /// Write the rows to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Don't copy the rows to the clipboard
    #[arg(long)]
    no_copy: bool
}

fn main() {
    match actual_main() {
        Ok(()) => {},
        Err(e) => {
            eprintln!("error: {}", e);
            for cause in e.iter().skip(1) {
                eprintln!("caused by: {}", cause);
            }
            std::process::exit(1);
        }
    }
}

// We write a function so that we can return a `Result` and use `?`
fn actual_main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default()
    };

    match cli.command {
        Command::Assignments { page, year } => {
            let scraper = open_page(&page.page, &config)?;
            let year = year.unwrap_or_else(|| Local::now().year());
            let rows = scraper.assignments(year);

            deliver(&page, &join_rows(&rows), rows.len(), copy)
        }
        Command::Schedule { page, with_assignments } => {
            let scraper = open_page(&page.page, &config)?;
            let rows = if with_assignments {
                scraper.schedule_with_assignments()
            } else {
                scraper.schedule()
            };

            deliver(&page, &join_rows(&rows), rows.len(), copy)
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace
    };

    if TermLogger::init(level,
                        simplelog::Config::default(),
                        TerminalMode::Stderr,
                        ColorChoice::Auto).is_err() {
        eprintln!("warning: could not set up logging");
    }
}

fn open_page(path: &Path, config: &Config) -> Result<CoursePageScraper> {
    let html = fs::read_to_string(path)
        .chain_err(|| format!("could not read {}", path.display()))?;
    let scraper = CoursePageScraper::new(&html, config)?;

    let collapsed = scraper.collapsed_modules();
    if collapsed > 0 {
        warn!("{} module(s) were collapsed when the page was saved; \
               expand all modules and save the page again if rows are missing",
              collapsed);
    }

    Ok(scraper)
}

/// Writes `text` to the requested file (or stdout), then hands it to `copy`
/// unless `--no-copy` was given.
fn deliver<C>(args: &PageArgs, text: &str, count: usize, copy: C) -> Result<()>
    where C: FnOnce(&str) -> Result<()> {

    match args.output {
        Some(ref path) => {
            fs::write(path, text)
                .chain_err(|| format!("could not write {}", path.display()))?;
            info!("Wrote {} row(s) to {}", count, path.display());
        }
        None => println!("{}", text)
    }

    if !args.no_copy {
        copy(text)?;
        info!("Copied {} row(s) to the clipboard", count);
    }

    Ok(())
}

#[cfg(feature = "clipboard")]
fn copy(text: &str) -> Result<()> {
    canvas_scraper::clipboard::write_to_clipboard(text)
}

#[cfg(not(feature = "clipboard"))]
fn copy(_text: &str) -> Result<()> {
    warn!("built without the `clipboard` feature; not copying");
    Ok(())
}
