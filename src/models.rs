use serde::{Deserialize, Serialize};

/// Catalog status string for a title with copies on the shelf
pub const AVAILABLE_STATUS: &str = "AVAILABLE";

/// A book from the "to-read" shelf of a Goodreads export
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WantedBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub isbn13: String,
}

impl WantedBook {
    /// ISBN to search by, preferring ISBN13 over ISBN10
    pub fn preferred_isbn(&self) -> Option<&str> {
        if !self.isbn13.is_empty() {
            Some(&self.isbn13)
        } else if !self.isbn.is_empty() {
            Some(&self.isbn)
        } else {
            None
        }
    }

    /// Free-text query used when the ISBN search comes back empty
    pub fn fallback_query(&self) -> String {
        format!("{} {}", self.title, self.author)
    }
}

/// One bib from a catalog search response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResult {
    pub bib_id: String,
    pub title: String,
    pub author: String,
    pub format: String,
    pub status: String,
    pub available_copies: u32,
    pub total_copies: u32,
    pub held_copies: u32,
    /// Branch labels from the response-wide STATUS facet
    pub branches: Vec<String>,
    pub catalog_url: String,
}

/// A wanted book with a copy that can be borrowed right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableBook {
    pub goodreads_title: String,
    pub goodreads_author: String,
    pub library_title: String,
    pub format: String,
    #[serde(rename = "available")]
    pub available_copies: u32,
    #[serde(rename = "total")]
    pub total_copies: u32,
    pub url: String,
    /// Set only when a preferred branch was checked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_available: Option<bool>,
}

impl AvailableBook {
    pub fn new(book: &WantedBook, result: &CatalogResult) -> Self {
        Self {
            goodreads_title: book.title.clone(),
            goodreads_author: book.author.clone(),
            library_title: result.title.clone(),
            format: result.format.clone(),
            available_copies: result.available_copies,
            total_copies: result.total_copies,
            url: result.catalog_url.clone(),
            branch_available: None,
        }
    }
}

/// A wanted book that is not found or has no copy on the shelf
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailableBook {
    pub title: String,
    pub author: String,
}

impl From<&WantedBook> for UnavailableBook {
    fn from(book: &WantedBook) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
        }
    }
}

/// Outcome of a full run, both lists in reading-list order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub available: Vec<AvailableBook>,
    pub unavailable: Vec<UnavailableBook>,
}

impl CheckReport {
    /// Number of books classified so far
    pub fn len(&self) -> usize {
        self.available.len() + self.unavailable.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty() && self.unavailable.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(isbn: &str, isbn13: &str) -> WantedBook {
        WantedBook {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: isbn.to_string(),
            isbn13: isbn13.to_string(),
        }
    }

    #[test]
    fn preferred_isbn_picks_isbn13_first() {
        assert_eq!(
            book("0441172717", "9780441172719").preferred_isbn(),
            Some("9780441172719")
        );
        assert_eq!(book("0441172717", "").preferred_isbn(), Some("0441172717"));
        assert_eq!(book("", "").preferred_isbn(), None);
    }

    #[test]
    fn fallback_query_joins_title_and_author() {
        assert_eq!(book("", "").fallback_query(), "Dune Frank Herbert");
    }

    #[test]
    fn available_book_uses_short_copy_keys() {
        let record = AvailableBook {
            goodreads_title: "Dune".to_string(),
            goodreads_author: "Frank Herbert".to_string(),
            library_title: "Dune".to_string(),
            format: "BK".to_string(),
            available_copies: 2,
            total_copies: 3,
            url: "https://acl.bibliocommons.com/v2/record/S1".to_string(),
            branch_available: None,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["available"], 2);
        assert_eq!(value["total"], 3);
        assert!(value.get("branch_available").is_none());
    }
}
