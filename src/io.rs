use crate::error::Result;
use crate::models::WantedBook;
use serde::Deserialize;
use std::path::Path;

/// Goodreads shelf holding the "Want to Read" list
pub const TO_READ_SHELF: &str = "to-read";

/// Columns of a Goodreads library export that the checker cares about.
/// Columns missing from the header come through as empty strings.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct GoodreadsRow {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Author")]
    author: String,
    #[serde(rename = "ISBN")]
    isbn: String,
    #[serde(rename = "ISBN13")]
    isbn13: String,
    #[serde(rename = "Exclusive Shelf")]
    exclusive_shelf: String,
}

impl GoodreadsRow {
    fn into_wanted(self) -> Option<WantedBook> {
        if self.exclusive_shelf != TO_READ_SHELF {
            return None;
        }
        Some(WantedBook {
            title: self.title,
            author: self.author,
            isbn: clean_isbn(&self.isbn),
            isbn13: clean_isbn(&self.isbn13),
        })
    }
}

/// Strips the `="..."` wrapper spreadsheet exports put around ISBNs
pub fn clean_isbn(raw: &str) -> String {
    raw.trim_matches(|c| c == '=' || c == '"').to_string()
}

/// Reads the "to-read" shelf from a Goodreads CSV export, in file order
pub fn read_wanted_books<P: AsRef<Path>>(path: P) -> Result<Vec<WantedBook>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())?;

    let mut books = Vec::new();
    let mut rows = 0usize;

    for result in rdr.deserialize() {
        let row: GoodreadsRow = result?;
        rows += 1;
        if let Some(book) = row.into_wanted() {
            books.push(book);
        }
    }

    log::info!(
        "Loaded {} of {} rows from {} (shelf '{}')",
        books.len(),
        rows,
        path.as_ref().display(),
        TO_READ_SHELF
    );

    Ok(books)
}
