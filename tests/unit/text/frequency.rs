//! Tests for frequency counting and ranking

#[cfg(test)]
mod tests {
    use wordmask::io::configuration::RANKED_TABLE_CAP;
    use wordmask::text::frequency::{FrequencyEntry, rank, round_percentage};

    // Tests the worked example of two words
    // Verified by truncating instead of rounding percentages
    #[test]
    fn test_rank_example() {
        let table = rank(&["가나", "가나", "다라"]);

        assert_eq!(
            table.entries(),
            &[
                FrequencyEntry {
                    word: "가나".to_string(),
                    frequency: 2,
                    percentage: 66.67,
                },
                FrequencyEntry {
                    word: "다라".to_string(),
                    frequency: 1,
                    percentage: 33.33,
                },
            ]
        );
        assert_eq!(table.total(), 3);
        assert_eq!(table.len(), 2);
    }

    // Tests frequencies sum to the token count and percentages to 100
    // Verified by counting distinct words as the total
    #[test]
    fn test_sums() {
        let tokens: Vec<String> = (0..37).map(|i| format!("단어{}", i % 7)).collect();
        let table = rank(&tokens);

        let frequency_sum: usize = table.entries().iter().map(|e| e.frequency).sum();
        let percentage_sum: f64 = table.entries().iter().map(|e| e.percentage).sum();
        assert_eq!(frequency_sum, 37);
        assert!((percentage_sum - 100.0).abs() <= 0.01 * table.len() as f64);
    }

    // Tests ties break by word and ranking is stable across input orders
    // Verified by sorting on frequency only
    #[test]
    fn test_ranking_deterministic() {
        let forward = rank(&["다", "가", "나", "가", "나"]);
        let backward = rank(&["나", "가", "나", "가", "다"]);

        assert_eq!(forward, backward);
        let words: Vec<&str> = forward.entries().iter().map(|e| e.word.as_str()).collect();
        assert_eq!(words, vec!["가", "나", "다"]);
    }

    // Tests counting is case-sensitive
    // Verified by lowercasing tokens before counting
    #[test]
    fn test_case_sensitive() {
        let table = rank(&["Rust", "rust", "Rust"]);
        assert_eq!(table.entries().first().map(|e| e.frequency), Some(2));
        assert_eq!(table.len(), 2);
    }

    // Tests the ranked view is capped while the full table is kept
    // Verified by truncating the stored entries
    #[test]
    fn test_ranked_cap() {
        let tokens: Vec<String> = (0..150).map(|i| format!("w{i:03}")).collect();
        let table = rank(&tokens);

        assert_eq!(table.len(), 150);
        assert_eq!(table.ranked().len(), RANKED_TABLE_CAP);
        assert_eq!(table.top(3).len(), 3);
        assert_eq!(table.top(500).len(), 150);
    }

    // Tests an empty token list gives an empty table
    // Verified by dividing by a zero total
    #[test]
    fn test_empty() {
        let table = rank::<&str>(&[]);

        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert!(table.ranked().is_empty());
    }

    // Tests two-decimal rounding
    // Verified by rounding to one decimal
    #[test]
    fn test_round_percentage() {
        assert!((round_percentage(66.666_666) - 66.67).abs() < 1e-9);
        assert!((round_percentage(33.333_333) - 33.33).abs() < 1e-9);
        assert!((round_percentage(12.5) - 12.5).abs() < 1e-9);
    }
}
