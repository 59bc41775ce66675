//! Pulls assignment due dates and the weekly schedule out of a saved Canvas
//! course "Modules" page, as tab-separated rows ready to paste into a
//! spreadsheet.
//!
//! ```no_run
//! use canvas_scraper::scrapers::course_page::CoursePageScraper;
//! use canvas_scraper::output::join_rows;
//!
//! # fn main() -> canvas_scraper::error::Result<()> {
//! let html = std::fs::read_to_string("modules.html")?;
//! let scraper = CoursePageScraper::parse(&html)?;
//!
//! println!("{}", join_rows(&scraper.assignments(2024)));
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate if_chain;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod error;
pub mod config;
pub mod data_structs;
pub mod extract;
pub mod output;
pub mod scrapers;
#[cfg(feature = "clipboard")]
pub mod clipboard;
#[cfg(test)]
#[cfg(feature = "test-local-data")]
mod test_utils;
