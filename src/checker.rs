//! Runs a reading list against the catalog, one book at a time.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::matching::{find_available, find_owned};
use crate::models::{AvailableBook, CatalogResult, CheckReport, UnavailableBook, WantedBook};
use std::io::Write;
use std::thread;
use std::time::Duration;

/// Pause between books so the gateway isn't hammered
pub const DEFAULT_DELAY: Duration = Duration::from_millis(300);

/// How a single wanted book came out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookOutcome {
    Available(AvailableBook),
    Unavailable {
        /// A title match the library owns but cannot lend right now
        owned: Option<CatalogResult>,
        /// Neither search returned anything
        not_found: bool,
    },
}

pub struct Checker<C> {
    catalog: C,
    delay: Duration,
    branch: Option<String>,
}

impl<C: Catalog> Checker<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            delay: DEFAULT_DELAY,
            branch: None,
        }
    }

    /// Override the pause between books
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Also check whether available books are on the shelf at this branch
    pub fn with_branch(mut self, branch: Option<String>) -> Self {
        self.branch = branch;
        self
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// ISBN search first, then title and author if that finds nothing
    pub fn lookup(&self, book: &WantedBook) -> Vec<CatalogResult> {
        let results = match book.preferred_isbn() {
            Some(isbn) => self.catalog.search(isbn),
            None => Vec::new(),
        };
        if !results.is_empty() {
            return results;
        }
        self.catalog.search(&book.fallback_query())
    }

    /// Classify one book. Every book is either available or unavailable.
    pub fn check_book(&self, book: &WantedBook) -> BookOutcome {
        let results = self.lookup(book);

        if let Some(hit) = find_available(&book.title, &results) {
            let mut record = AvailableBook::new(book, hit);
            if let Some(branch) = &self.branch {
                record.branch_available = Some(self.catalog.branch_has_copy(&hit.bib_id, branch));
            }
            return BookOutcome::Available(record);
        }

        BookOutcome::Unavailable {
            owned: find_owned(&book.title, &results).cloned(),
            not_found: results.is_empty(),
        }
    }

    /// Check every book in order, writing one progress block per book to `out`
    pub fn run<W: Write>(&self, books: &[WantedBook], out: &mut W) -> Result<CheckReport> {
        log::info!("Checking {} books against the catalog", books.len());
        let mut report = CheckReport::default();

        for (i, book) in books.iter().enumerate() {
            writeln!(
                out,
                "[{}/{}] Searching: {} by {}...",
                i + 1,
                books.len(),
                book.title,
                book.author
            )?;

            match self.check_book(book) {
                BookOutcome::Available(record) => {
                    writeln!(
                        out,
                        "  ✓ AVAILABLE ({}/{} copies) - {}{}",
                        record.available_copies,
                        record.total_copies,
                        record.format,
                        self.branch_note(record.branch_available)
                    )?;
                    report.available.push(record);
                }
                BookOutcome::Unavailable { owned, not_found } => {
                    if let Some(result) = owned {
                        writeln!(
                            out,
                            "  ○ Found but not available ({}) - {}",
                            copies_with_holds(&result),
                            result.format
                        )?;
                    }
                    if not_found {
                        writeln!(out, "  ✗ Not found in catalog")?;
                    }
                    report.unavailable.push(UnavailableBook::from(book));
                }
            }

            if i + 1 < books.len() && !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
        }

        log::info!(
            "Finished: {} available, {} not available",
            report.available.len(),
            report.unavailable.len()
        );
        Ok(report)
    }

    fn branch_note(&self, branch_available: Option<bool>) -> String {
        match (&self.branch, branch_available) {
            (Some(branch), Some(true)) => format!(" @ {branch}"),
            (Some(branch), Some(false)) => format!(" (none at {branch})"),
            _ => String::new(),
        }
    }
}

fn copies_with_holds(result: &CatalogResult) -> String {
    if result.held_copies > 0 {
        format!(
            "{}/{}, {} on hold",
            result.available_copies, result.total_copies, result.held_copies
        )
    } else {
        format!("{}/{}", result.available_copies, result.total_copies)
    }
}

#[cfg(test)]
#[path = "checker_tests.rs"]
mod tests;
