//! Library Checker - Goodreads reading list vs. library catalog
//!
//! Loads the "Want to Read" shelf from a Goodreads CSV export, looks every
//! book up in the Carnegie Library of Pittsburgh catalog and reports which
//! ones can be borrowed right now.

pub mod catalog;
pub mod checker;
pub mod error;
pub mod io;
pub mod matching;
pub mod models;
pub mod report;

pub use catalog::{Catalog, CatalogClient};
pub use checker::{BookOutcome, Checker};
pub use error::{CheckerError, Result};
pub use io::read_wanted_books;
pub use matching::titles_match;
pub use models::{AvailableBook, CatalogResult, CheckReport, UnavailableBook, WantedBook};
pub use report::{format_summary, load_json, save_json};
