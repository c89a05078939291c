use crate::models::{CatalogResult, AVAILABLE_STATUS};

/// Loose title comparison: either title contains the other, ignoring case.
///
/// Catches subtitles and series suffixes ("Dune" vs "Dune: Deluxe Edition")
/// at the cost of some false positives ("Dune" vs "Dune Messiah").
pub fn titles_match(wanted: &str, found: &str) -> bool {
    let wanted = wanted.to_lowercase();
    let found = found.to_lowercase();
    found.contains(&wanted) || wanted.contains(&found)
}

/// A copy can be borrowed right now
pub fn is_borrowable(result: &CatalogResult) -> bool {
    result.status == AVAILABLE_STATUS && result.available_copies > 0
}

/// The library owns copies but none can be borrowed right now
pub fn is_owned_but_out(result: &CatalogResult) -> bool {
    !is_borrowable(result) && result.total_copies > 0
}

/// First result whose title matches and that can be borrowed
pub fn find_available<'a>(title: &str, results: &'a [CatalogResult]) -> Option<&'a CatalogResult> {
    results
        .iter()
        .filter(|result| titles_match(title, &result.title))
        .find(|result| is_borrowable(result))
}

/// First title match the library owns but cannot lend right now
pub fn find_owned<'a>(title: &str, results: &'a [CatalogResult]) -> Option<&'a CatalogResult> {
    results
        .iter()
        .filter(|result| titles_match(title, &result.title))
        .find(|result| is_owned_but_out(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(title: &str, status: &str, available: u32, total: u32) -> CatalogResult {
        CatalogResult {
            bib_id: title.to_string(),
            title: title.to_string(),
            author: String::new(),
            format: "BK".to_string(),
            status: status.to_string(),
            available_copies: available,
            total_copies: total,
            held_copies: 0,
            branches: Vec::new(),
            catalog_url: String::new(),
        }
    }

    #[test]
    fn titles_match_is_symmetric_substring() {
        assert!(titles_match("Dune", "Dune Messiah"));
        assert!(titles_match("Dune Messiah", "Dune"));
        assert!(!titles_match("Foo", "Bar"));
    }

    #[test]
    fn titles_match_ignores_case() {
        assert!(titles_match("the hobbit", "The Hobbit, or There and Back Again"));
        assert!(titles_match("ÉMILE", "émile"));
    }

    #[test]
    fn borrowable_requires_status_and_copies() {
        assert!(is_borrowable(&result("Dune", "AVAILABLE", 1, 1)));
        assert!(!is_borrowable(&result("Dune", "AVAILABLE", 0, 3)));
        assert!(!is_borrowable(&result("Dune", "CHECKED_OUT", 2, 3)));
        assert!(!is_borrowable(&result("Dune", "available", 2, 3)));
    }

    #[test]
    fn find_available_is_first_match_wins() {
        let results = vec![
            result("Foundation", "AVAILABLE", 4, 4),
            result("Dune Messiah", "UNAVAILABLE", 0, 2),
            result("Dune", "AVAILABLE", 1, 3),
            result("Dune: Deluxe Edition", "AVAILABLE", 5, 5),
        ];

        let hit = find_available("Dune", &results).unwrap();
        assert_eq!(hit.title, "Dune");
        assert_eq!(hit.available_copies, 1);
    }

    #[test]
    fn find_available_skips_unmatched_titles() {
        let results = vec![result("Foundation", "AVAILABLE", 4, 4)];
        assert!(find_available("Dune", &results).is_none());
    }

    #[test]
    fn find_owned_reports_checked_out_copies() {
        let results = vec![
            result("Foundation", "CHECKED_OUT", 0, 4),
            result("Dune", "AVAILABLE", 0, 0),
            result("Dune", "CHECKED_OUT", 0, 3),
        ];

        let owned = find_owned("Dune", &results).unwrap();
        assert_eq!(owned.total_copies, 3);
        assert!(find_owned("Dune", &results[..2]).is_none());
    }
}
