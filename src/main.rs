//! fikcio - FictionBook renderer

use std::fs;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use fikcio::{Catalog, FictionBook};

#[derive(Parser)]
#[command(name = "fikcio")]
#[command(version, about = "FictionBook (FB2) renderer", long_about = None)]
#[command(after_help = "EXAMPLES:
    fikcio book.fb2                     Render plain text to stdout
    fikcio book.fb2 -f html -o out.html Render HTML to a file
    fikcio book.fb2 -f structure        One block per chapter
    fikcio -i book.fb2                  Show book metadata")]
struct Cli {
    /// Input file (FB2)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Locale for fixed labels
    #[arg(long, default_value = "en")]
    lang: String,

    /// Directory holding locale tables ({lang}.json)
    #[arg(long, value_name = "DIR")]
    locale_dir: Option<String>,

    /// Show book metadata without rendering
    #[arg(short, long)]
    info: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Html,
    Structure,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let bytes = fs::read(&cli.input).map_err(|e| format!("{}: {e}", cli.input))?;

    let catalog = match &cli.locale_dir {
        Some(dir) => Catalog::load(dir, &cli.lang),
        None => Catalog::builtin(),
    };

    let book = FictionBook::from_bytes(&bytes, catalog).map_err(|e| e.to_string())?;

    if cli.info {
        show_info(&cli.input, &book);
        return Ok(());
    }

    let rendered = match cli.format {
        Format::Text => book.to_text().map_err(|e| e.to_string())?,
        Format::Html => book.to_html().map_err(|e| e.to_string())?,
        Format::Structure => {
            let chapters = book.to_structure().map_err(|e| e.to_string())?;
            chapters.join("\r\n---\r\n")
        }
    };

    match &cli.output {
        Some(path) => fs::write(path, rendered).map_err(|e| format!("{path}: {e}"))?,
        None => print!("{rendered}"),
    }

    Ok(())
}

fn show_info(path: &str, book: &FictionBook) {
    println!("File: {path}");
    println!("Title: {}", book.title().unwrap_or("---"));

    let parsed = book.parsed();
    if let Some(info) = parsed
        .descriptions
        .iter()
        .flat_map(|d| d.title_infos.iter())
        .next()
    {
        let authors: Vec<String> = info.authors.iter().map(|a| a.display_name()).collect();
        if !authors.is_empty() {
            println!("Authors: {}", authors.join(", "));
        }
        if !info.genres.is_empty() {
            let genres: Vec<&str> = info.genres.iter().map(|g| g.code.as_str()).collect();
            println!("Genres: {}", genres.join(", "));
        }
        if let Some(lang) = &info.lang {
            println!("Language: {lang}");
        }
    }

    println!("Bodies: {}", parsed.bodies.len());
}
