//! Tests for request defaults, JSON decoding and response payloads

#[cfg(test)]
mod tests {
    use wordmask::CloudError;
    use wordmask::io::configuration::{DEFAULT_HEIGHT, DEFAULT_MAX_WORDS, DEFAULT_WIDTH};
    use wordmask::pipeline::{RenderFailure, RenderRequest, RenderResponse, RenderResult, Stage};
    use wordmask::render::ColorStrategy;
    use wordmask::spatial::MaskShape;
    use wordmask::text::rank;

    fn result() -> RenderResult {
        RenderResult {
            png: vec![1, 2, 3],
            table: rank(&["가나", "가나", "다라"]),
            wordcloud_id: Some(9),
            placed_words: 2,
        }
    }

    // Tests defaults for a bare request
    // Verified by defaulting to a square canvas
    #[test]
    fn test_request_defaults() {
        let request = RenderRequest::new("가나");

        assert_eq!(request.text, "가나");
        assert_eq!(request.background_color, "white");
        assert_eq!(request.color_strategy, ColorStrategy::Single);
        assert_eq!(request.mask_shape, MaskShape::Rectangle);
        assert_eq!((request.width, request.height), (DEFAULT_WIDTH, DEFAULT_HEIGHT));
        assert_eq!(request.max_words, DEFAULT_MAX_WORDS);
        assert!(request.font.is_none());
    }

    // Tests JSON field names and lenient enum decoding
    // Verified by rejecting unknown color names
    #[test]
    fn test_request_from_json() {
        let request: RenderRequest = serde_json::from_str(
            r##"{"text":"하늘","color_func":"gradient_color","mask_type":"circle","width":300,"background_color":"#000"}"##,
        )
        .unwrap();

        assert_eq!(request.color_strategy, ColorStrategy::Gradient);
        assert_eq!(request.mask_shape, MaskShape::Circle);
        assert_eq!(request.width, 300);
        assert_eq!(request.height, DEFAULT_HEIGHT);
        assert_eq!(request.background_color, "#000");

        let lenient: RenderRequest =
            serde_json::from_str(r#"{"text":"하늘","color_func":"neon","mask_type":"star"}"#)
                .unwrap();
        assert_eq!(lenient.color_strategy, ColorStrategy::Single);
        assert_eq!(lenient.mask_shape, MaskShape::Rectangle);
    }

    // Tests the success payload carries image, table and id
    // Verified by omitting the identifier
    #[test]
    fn test_success_response() {
        let result = result();
        let response = RenderResponse::success(&result);

        assert!(response.success);
        assert_eq!(response.image.as_deref(), Some("AQID"));
        assert_eq!(response.words.len(), 2);
        assert_eq!(response.wordcloud_id, Some(9));
        assert!(response.message.contains('2'));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["words"][0]["word"], "가나");
        assert_eq!(json["words"][0]["percentage"], 66.67);
        assert_eq!(json["wordcloud_id"], 9);
    }

    // Tests the failure payload has no image and an empty table
    // Verified by serializing a null image
    #[test]
    fn test_failure_response() {
        let failure = RenderFailure {
            stage: Stage::Received,
            error: CloudError::EmptyInput { input_chars: 0 },
        };
        let response = RenderResponse::failure(&failure);

        assert!(!response.success);
        assert_eq!(response.message, failure.error.to_string());

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("image").is_none());
        assert_eq!(json["words"], serde_json::json!([]));
        assert!(json["wordcloud_id"].is_null());
    }

    // Tests the base64 helper matches the embedded image
    // Verified by encoding the table instead of the image
    #[test]
    fn test_result_helpers() {
        let result = result();

        assert_eq!(result.image_base64(), "AQID");
        assert_eq!(result.ranked(), result.table.entries());
    }
}
