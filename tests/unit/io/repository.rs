//! Tests for the in-memory word-cloud repository

#[cfg(test)]
mod tests {
    use wordmask::io::repository::{InMemoryRepository, WordCloudRepository};
    use wordmask::text::rank;

    // Tests identifiers are sequential from one
    // Verified by starting identifiers at zero
    #[test]
    fn test_store_assigns_sequential_ids() {
        let repository = InMemoryRepository::new();
        let table = rank(&["가나"]);

        assert_eq!(repository.store("first", table.entries()).ok(), Some(1));
        assert_eq!(repository.store("second", table.entries()).ok(), Some(2));
    }

    // Tests stored entries come back ordered by percentage
    // Verified by storing entries in input order
    #[test]
    fn test_fetch_orders_by_percentage() {
        let repository = InMemoryRepository::new();
        let mut entries = rank(&["가나", "가나", "가나", "다라", "마바", "마바"])
            .entries()
            .to_vec();
        entries.reverse();

        let id = repository.store("sample", &entries).unwrap_or_default();
        let stored = repository.fetch(id).ok().flatten();

        let words: Vec<String> = stored
            .map(|s| s.words.into_iter().map(|e| e.word).collect())
            .unwrap_or_default();
        assert_eq!(words, vec!["가나", "마바", "다라"]);
    }

    // Tests fetching an unknown identifier yields nothing
    // Verified by returning the latest record for unknown ids
    #[test]
    fn test_fetch_unknown_id() {
        let repository = InMemoryRepository::new();
        assert!(matches!(repository.fetch(7), Ok(None)));
    }

    // Tests listings are newest first with word counts
    // Verified by listing in insertion order
    #[test]
    fn test_list_newest_first() {
        let repository = InMemoryRepository::new();
        let _ = repository.store("old", rank(&["가나"]).entries());
        let _ = repository.store("new", rank(&["가나", "다라"]).entries());

        let summaries = repository.list().unwrap_or_default();
        let names: Vec<&str> = summaries.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["new", "old"]);
        assert_eq!(summaries.first().map(|s| s.word_count), Some(2));
    }
}
