//! Tests for character filtering and token splitting

#[cfg(test)]
mod tests {
    use wordmask::CloudError;
    use wordmask::text::{Normalizer, Script, TokenPolicy};

    fn hangul() -> Normalizer {
        Normalizer::new(TokenPolicy::default()).unwrap()
    }

    // Tests non-Hangul characters split tokens and short tokens drop
    // Verified by counting bytes instead of characters
    #[test]
    fn test_normalize_hangul() {
        let tokens = hangul().normalize("대한민국! 서울123부산, 가 hello 나라").unwrap();

        assert_eq!(tokens, vec!["대한민국", "서울", "부산", "나라"]);
    }

    // Tests tokens appear in source order with duplicates kept
    // Verified by deduplicating tokens
    #[test]
    fn test_normalize_keeps_order_and_duplicates() {
        let tokens = hangul().normalize("가나 가나 다라").unwrap();
        assert_eq!(tokens, vec!["가나", "가나", "다라"]);
    }

    // Tests text without eligible tokens is rejected
    // Verified by returning an empty token list
    #[test]
    fn test_normalize_empty_input() {
        for text in ["", "   ", "hello world 123", "가 나 다"] {
            assert!(
                matches!(hangul().normalize(text), Err(CloudError::EmptyInput { .. })),
                "{text:?}"
            );
        }
    }

    // Tests the reported length counts characters
    // Verified by reporting byte length
    #[test]
    fn test_empty_input_reports_chars() {
        let result = hangul().normalize("가 나");
        assert!(matches!(result, Err(CloudError::EmptyInput { input_chars: 3 })));
    }

    // Tests the Latin-enabled script keeps ASCII words
    // Verified by ignoring the script setting
    #[test]
    fn test_hangul_latin_script() {
        let policy = TokenPolicy {
            script: Script::HangulLatin,
            ..TokenPolicy::default()
        };
        let normalizer = Normalizer::new(policy).unwrap();

        assert_eq!(
            normalizer.normalize("Rust와 러스트 x").unwrap(),
            vec!["Rust와", "러스트"]
        );
        assert_eq!(normalizer.policy().script, Script::HangulLatin);
    }

    // Tests analyzer tokens use the shorter minimum length
    // Verified by applying the fallback minimum to analyzer output
    #[test]
    fn test_filter_tokens() {
        let tokens = hangul().filter_tokens(["밤", "하늘", "", "AI", "별빛2"]);

        assert_eq!(tokens, vec!["밤", "하늘", "별빛"]);
    }

    // Tests clean replaces rejected characters one for one
    // Verified by deleting rejected characters
    #[test]
    fn test_clean() {
        assert_eq!(hangul().clean("가,나"), "가 나");
        assert_eq!(hangul().clean("a가\tb"), " 가\t ");
    }

    // Tests script names parse with alternatives
    // Verified by accepting unknown names as Hangul
    #[test]
    fn test_script_names() {
        assert_eq!(Script::from_name("Hangul"), Some(Script::Hangul));
        assert_eq!(Script::from_name("hangul_latin"), Some(Script::HangulLatin));
        assert_eq!(Script::from_name("latin"), None);
    }
}
