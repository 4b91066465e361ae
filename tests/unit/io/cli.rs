//! Tests for command-line parsing and batch rendering of text files

#[cfg(test)]
mod tests {
    use clap::Parser;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use wordmask::io::cli::{Cli, FileProcessor, output_path};
    use wordmask::io::configuration::{
        DEFAULT_FALLBACK_FONT, DEFAULT_HEIGHT, DEFAULT_MAX_WORDS, DEFAULT_SEED, DEFAULT_WIDTH,
        ENV_FALLBACK_FONT, ENV_FONT_DIR, ServiceConfig,
    };
    use wordmask::io::fonts::FontLocator;
    use wordmask::pipeline::RenderService;
    use wordmask::render::layout::{Layout, LayoutJob, PlacedWord, WordPlacer};
    use wordmask::render::{ColorStrategy, WordColor};
    use wordmask::spatial::MaskShape;
    use wordmask::CloudError;
    use wordmask::text::{FrequencyTable, Normalizer, TokenPolicy};

    struct StubPlacer;

    impl WordPlacer for StubPlacer {
        fn place(&self, job: &LayoutJob<'_>) -> wordmask::Result<Layout> {
            let image =
                RgbaImage::from_pixel(job.mask.width(), job.mask.height(), Rgba([255, 255, 255, 255]));
            let words = job
                .words
                .iter()
                .take(job.max_words)
                .map(|entry| PlacedWord {
                    word: entry.word.clone(),
                    font_size: 10.0,
                    x: 0,
                    y: 0,
                    width: 1,
                    height: 1,
                    horizontal: true,
                    color: WordColor::Black,
                })
                .collect();
            Ok(Layout { image, words })
        }
    }

    fn create_test_cli(target: &Path, extra: &[&str]) -> Cli {
        let mut args = vec!["program".to_string(), target.display().to_string()];
        args.extend(["--quiet", "-w", "60", "-H", "40"].iter().map(ToString::to_string));
        args.extend(extra.iter().map(ToString::to_string));
        Cli::parse_from(args)
    }

    fn processor(cli: Cli, fonts: &Path) -> FileProcessor {
        let normalizer = Normalizer::new(TokenPolicy::default()).unwrap();
        let service = RenderService::new(
            normalizer,
            Box::new(StubPlacer),
            FontLocator::new(fonts, fonts.join("missing.ttf")),
        );
        FileProcessor::with_service(cli, service)
    }

    // Tests CLI parsing with only the required target
    // Verified by changing default values to ensure defaults are used
    #[test]
    fn test_cli_parse_minimal_args() {
        let cli = Cli::parse_from(["program", "speech.txt"]);

        assert_eq!(cli.target, Some(PathBuf::from("speech.txt")));
        assert!(!cli.list_fonts);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.width, DEFAULT_WIDTH);
        assert_eq!(cli.height, DEFAULT_HEIGHT);
        assert_eq!(cli.max_words, DEFAULT_MAX_WORDS);
        assert!(cli.font.is_none());
        assert!(!cli.quiet);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    // Tests every option reaches the render request
    // Verified by ignoring the mask argument
    #[test]
    fn test_cli_request_mapping() {
        let cli = Cli::parse_from([
            "program",
            "speech.txt",
            "-m",
            "heart",
            "-c",
            "gradient_color",
            "-b",
            "#000",
            "-n",
            "30",
            "-f",
            "Nanum.ttf",
            "-r",
            "-s",
            "7",
        ]);
        let request = cli.request_for("가나 다라".to_string(), Some("speech".to_string()));

        assert_eq!(request.mask_shape, MaskShape::Heart);
        assert_eq!(request.color_strategy, ColorStrategy::Gradient);
        assert_eq!(request.background_color, "#000");
        assert_eq!(request.max_words, 30);
        assert_eq!(request.font.as_deref(), Some("Nanum.ttf"));
        assert_eq!(request.name.as_deref(), Some("speech"));

        let settings = cli.layout_settings();
        assert_eq!(settings.seed, 7);
        assert!(settings.repeat);
    }

    // Tests unknown names fall back to defaults
    // Verified by rejecting unknown mask names
    #[test]
    fn test_cli_unknown_names() {
        let cli = Cli::parse_from(["program", "a.txt", "--mask", "star", "--colors", "rainbow"]);
        let request = cli.request_for(String::new(), None);

        assert_eq!(request.mask_shape, MaskShape::Rectangle);
        assert_eq!(request.color_strategy, ColorStrategy::Single);
    }

    // Tests the font directory argument overrides configuration
    // Verified by ignoring --font-dir
    #[test]
    fn test_cli_font_dir_override() {
        let cli = Cli::parse_from(["program", "a.txt", "--font-dir", "/opt/fonts"]);

        let config = cli.service_config_with(|key| {
            (key == ENV_FONT_DIR).then(|| "/srv/env-fonts".to_string())
        });
        assert_eq!(config.font_dir, PathBuf::from("/opt/fonts"));
        assert_eq!(config.fallback_font, PathBuf::from("/opt/fonts").join(DEFAULT_FALLBACK_FONT));
        assert_eq!(cli.service_config().font_dir, PathBuf::from("/opt/fonts"));
    }

    // Tests an explicit fallback font survives the directory override
    // Verified by always deriving the fallback from --font-dir
    #[test]
    fn test_cli_font_dir_keeps_explicit_fallback() {
        let cli = Cli::parse_from(["program", "a.txt", "--font-dir", "/opt/fonts"]);

        let config = cli.service_config_with(|key| {
            (key == ENV_FALLBACK_FONT).then(|| "/srv/Batang.ttf".to_string())
        });
        assert_eq!(config.fallback_font, PathBuf::from("/srv/Batang.ttf"));

        let untouched = Cli::parse_from(["program", "a.txt"]).service_config_with(|_| None);
        assert_eq!(untouched, ServiceConfig::default());
    }

    // Tests output naming next to the input
    // Verified by changing the output suffix
    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("/data/speech.txt"), "png"),
            PathBuf::from("/data/speech_cloud.png")
        );
        assert_eq!(output_path(Path::new("notes.txt"), "csv"), PathBuf::from("notes_cloud.csv"));
    }

    // Tests a missing target is rejected
    // Verified by removing error return for nonexistent targets
    #[test]
    fn test_process_nonexistent_target() {
        let temp_dir = TempDir::new().unwrap();
        let cli = create_test_cli(&temp_dir.path().join("missing.txt"), &[]);

        assert!(processor(cli, temp_dir.path()).process().is_err());
    }

    // Tests non-text files are rejected
    // Verified by removing file type validation
    #[test]
    fn test_process_invalid_file_type() {
        let temp_dir = TempDir::new().unwrap();
        let png = temp_dir.path().join("image.png");
        fs::write(&png, "not text").unwrap();

        let cli = create_test_cli(&png, &[]);
        assert!(processor(cli, temp_dir.path()).process().is_err());
    }

    // Tests a text file renders to PNG with optional CSV and JSON
    // Verified by skipping the export branch
    #[test]
    fn test_process_single_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("speech.txt");
        fs::write(&input, "가나 가나 다라").unwrap();

        let cli = create_test_cli(&input, &["--export", "--json"]);
        let mut batch = processor(cli, temp_dir.path());
        let failures = batch.process().unwrap();

        assert_eq!(failures, 0);
        assert_eq!(batch.session().last_table().map(FrequencyTable::len), Some(2));
        let png = fs::read(temp_dir.path().join("speech_cloud.png")).unwrap();
        assert_eq!(image::load_from_memory(&png).unwrap().width(), 60);

        let csv = fs::read_to_string(temp_dir.path().join("speech_cloud.csv")).unwrap();
        assert!(csv.contains("가나,2,66.67"));

        let json = fs::read_to_string(temp_dir.path().join("speech_cloud.json")).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(payload["success"], true);
        assert_eq!(payload["wordcloud_id"], serde_json::Value::Null);
    }

    // Tests failed renders are counted without aborting the batch
    // Verified by propagating the first render failure
    #[test]
    fn test_process_directory_with_failure() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "하늘 바다 하늘").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "only latin words").unwrap();
        fs::write(temp_dir.path().join("c.md"), "하늘").unwrap();

        let cli = create_test_cli(temp_dir.path(), &["--json"]);
        let failures = processor(cli, temp_dir.path()).process().unwrap();

        assert_eq!(failures, 1);
        assert!(temp_dir.path().join("a_cloud.png").exists());
        assert!(!temp_dir.path().join("b_cloud.png").exists());
        assert!(!temp_dir.path().join("c_cloud.png").exists());

        let json = fs::read_to_string(temp_dir.path().join("b_cloud.json")).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(payload["success"], false);
        assert!(payload.get("image").is_none());
    }

    // Tests existing outputs are skipped unless --no-skip
    // Verified by removing skip check
    #[test]
    fn test_skip_existing_output() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("speech.txt");
        fs::write(&input, "가나 다라").unwrap();
        fs::write(temp_dir.path().join("speech_cloud.png"), "old").unwrap();

        let skipping = processor(create_test_cli(&input, &[]), temp_dir.path());
        assert!(skipping.collect_files().unwrap().is_empty());

        let forced = processor(create_test_cli(&input, &["--no-skip"]), temp_dir.path());
        assert_eq!(forced.collect_files().unwrap(), vec![input]);
    }

    // Tests empty directories succeed with nothing to do
    // Verified by adding error for empty directories
    #[test]
    fn test_process_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let cli = create_test_cli(temp_dir.path(), &[]);

        assert_eq!(processor(cli, temp_dir.path()).process().ok(), Some(0));
    }

    // Tests an unwritable response file is a file-system error
    // Verified by reporting serialization failures as persistence errors
    #[test]
    fn test_response_write_failure() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("speech.txt");
        fs::write(&input, "가나 다라").unwrap();
        fs::create_dir(temp_dir.path().join("speech_cloud.json")).unwrap();

        let cli = create_test_cli(&input, &["--json"]);
        let result = processor(cli, temp_dir.path()).process();

        assert!(matches!(
            result,
            Err(CloudError::FileSystem { operation: "create response", .. })
        ));
    }

    // Tests --list-fonts makes the target optional
    // Verified by keeping the target required
    #[test]
    fn test_cli_list_fonts_without_target() {
        let cli = Cli::try_parse_from(["program", "--list-fonts"]).unwrap();
        assert!(cli.list_fonts);
        assert!(cli.target.is_none());
        assert!(Cli::try_parse_from(["program"]).is_err());

        let temp_dir = TempDir::new().unwrap();
        let result = processor(cli, temp_dir.path()).collect_files();
        assert!(matches!(
            result,
            Err(CloudError::InvalidParameter { parameter: "target", .. })
        ));
    }

    // Tests the font catalogue is written as a JSON array
    // Verified by listing every file in the font directory
    #[test]
    fn test_write_font_catalogue() {
        let temp_dir = TempDir::new().unwrap();
        let bundled = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSansMono.ttf");
        fs::copy(&bundled, temp_dir.path().join("DejaVuSansMono.ttf")).unwrap();
        fs::write(temp_dir.path().join("broken.ttf"), "not a font").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "가나").unwrap();

        let cli = Cli::parse_from(["program", "--list-fonts", "--quiet"]);
        let mut out = Vec::new();
        processor(cli, temp_dir.path()).write_font_catalogue(&mut out).unwrap();

        let listing: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let files: Vec<&str> = listing
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|font| font["file_name"].as_str())
            .collect();
        assert_eq!(files, vec!["broken.ttf", "DejaVuSansMono.ttf"]);
        assert_eq!(listing[1]["supports_hangul"], false);
    }

    // Tests a missing font directory cannot be catalogued
    // Verified by printing an empty catalogue for missing directories
    #[test]
    fn test_write_font_catalogue_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let cli = Cli::parse_from(["program", "--list-fonts", "--quiet"]);
        let mut out = Vec::new();

        let result = processor(cli, &temp_dir.path().join("absent")).write_font_catalogue(&mut out);
        assert!(matches!(result, Err(CloudError::FileSystem { .. })));
        assert!(out.is_empty());
    }
}
