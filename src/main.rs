//! CLI entry point for batch word-cloud rendering

use clap::Parser;
use env_logger::Env;
use wordmask::io::cli::{Cli, FileProcessor};

fn main() -> wordmask::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let list_fonts = cli.list_fonts;
    let mut processor = FileProcessor::new(cli)?;

    if list_fonts {
        return processor.write_font_catalogue(&mut std::io::stdout().lock());
    }
    processor.process()?;
    Ok(())
}
