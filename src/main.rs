//! booktoc - build a book and a table of contents from linked AsciiDoc pages

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::Level;

use booktoc::{BookConfig, Report, TocConfig, UnreachedPolicy, generate_book, generate_toc};

#[derive(Parser)]
#[command(name = "booktoc")]
#[command(version, about = "Build a book and a table of contents from linked AsciiDoc pages", long_about = None)]
#[command(after_help = "EXAMPLES:
    booktoc toc --title 'Admin Guide'        Write toc.adoc into the content directory
    booktoc book --output target/book        Assemble target/book/book.adoc")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log debug details, including the resolved configuration
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble the book and the stripped page copies
    Book(BookArgs),
    /// Generate the table of contents page
    Toc(TocArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Directory containing the pages
    #[arg(long, value_name = "DIR", default_value = "src/main/jbake/content")]
    source: PathBuf,

    /// Title to use; defaults to the title of the start page
    #[arg(long)]
    title: Option<String>,

    /// Extension of page files
    #[arg(long, default_value = booktoc::config::DEFAULT_EXTENSION)]
    extension: String,

    /// What to do with files no `next` link reaches
    #[arg(long, value_enum)]
    unreached: Option<UnreachedPolicy>,

    /// Write a JSON report of the run to this file
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
}

#[derive(Args)]
struct BookArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Directory for the book and the processed pages
    #[arg(long, value_name = "DIR", default_value = "target/book")]
    output: PathBuf,

    /// First page of the book
    #[arg(long, default_value = booktoc::config::DEFAULT_START_PAGE)]
    start_page: String,

    /// Name of the book file
    #[arg(long, default_value = booktoc::config::DEFAULT_BOOK_FILE)]
    book: String,

    /// Attributes file copied after the book title [default: <SOURCE>/book-attributes.conf]
    #[arg(long, value_name = "PATH")]
    attributes: Option<PathBuf>,

    /// Page to leave out of the book (repeatable) [default: toc.adoc]
    #[arg(long, value_name = "PAGE")]
    exclude: Vec<String>,
}

#[derive(Args)]
struct TocArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Directory for the TOC page [default: the source directory]
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Page the scan starts from
    #[arg(long, default_value = booktoc::config::DEFAULT_START_PAGE)]
    title_page: String,

    /// Name of the TOC file
    #[arg(long, default_value = booktoc::config::DEFAULT_TOC_FILE)]
    toc: String,

    /// Comma-separated patterns of chapter titles
    #[arg(long, default_value = booktoc::config::DEFAULT_CHAPTER_PATTERNS)]
    chapter_patterns: String,

    /// Comma-separated patterns of anchor tags to ignore
    #[arg(long, default_value = "")]
    tag_patterns: String,

    /// How many characters an underline may be off from its title
    #[arg(long, default_value_t = booktoc::config::HEADER_SLOP)]
    header_slop: usize,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), String> {
    let (report, report_path) = match command {
        Command::Book(args) => (book(&args)?, args.common.report),
        Command::Toc(args) => (toc(&args)?, args.common.report),
    };
    if let Some(path) = report_path {
        write_report(&report, &path)?;
    }
    Ok(())
}

fn book(args: &BookArgs) -> Result<Report, String> {
    let common = &args.common;
    let mut config = BookConfig::new(&common.source, &args.output)
        .with_start_page(&args.start_page)
        .with_book_file(&args.book)
        .with_extension(&common.extension);
    if let Some(title) = &common.title {
        config = config.with_title(title);
    }
    if let Some(path) = &args.attributes {
        config = config.with_attributes_file(Some(path.clone()));
    }
    if !args.exclude.is_empty() {
        config = config.with_exclude(args.exclude.clone());
    }
    if let Some(policy) = common.unreached {
        config = config.with_unreached(policy);
    }

    generate_book(&config).map_err(|e| e.to_string())
}

fn toc(args: &TocArgs) -> Result<Report, String> {
    let common = &args.common;
    let mut config = TocConfig::new(&common.source)
        .and_then(|c| c.with_chapter_patterns(&args.chapter_patterns))
        .and_then(|c| c.with_ignore_tag_patterns(&args.tag_patterns))
        .map_err(|e| e.to_string())?
        .with_title_page(&args.title_page)
        .with_toc_file(&args.toc)
        .with_header_slop(args.header_slop)
        .with_extension(&common.extension);
    if let Some(dir) = &args.output {
        config = config.with_output_dir(dir);
    }
    if let Some(title) = &common.title {
        config = config.with_title(title);
    }
    if let Some(policy) = common.unreached {
        config = config.with_unreached(policy);
    }

    generate_toc(&config).map_err(|e| e.to_string())
}

fn write_report(report: &Report, path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(report).map_err(|e| e.to_string())?;
    fs::write(path, json).map_err(|e| format!("can't write report {}: {e}", path.display()))
}
