//! sumreport CLI - call summary report tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use sumreport::render::pdf::DEFAULT_PDF_FILE_NAME;
use sumreport::{
    parse_with_options, render, CallType, Document, HeadingGrammar, JsonFormat, PageSize,
    ParseOptions, PdfOptions, RenderOptions, Sumreport, SumreportResult,
};

#[derive(Parser)]
#[command(name = "sumreport")]
#[command(version)]
#[command(about = "Turn call summaries into HTML, Markdown, text, JSON and PDF reports", long_about = None)]
struct Cli {
    /// Input summary file ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: Option<String>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    parse: ParseArgs,

    #[command(flatten)]
    pdf: PdfArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a summary to all formats
    Convert {
        /// Input summary file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: String,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,

        #[command(flatten)]
        pdf: PdfArgs,
    },

    /// Convert a summary to HTML
    Html {
        /// Input summary file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Emit a complete HTML page instead of a fragment
        #[arg(long)]
        standalone: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Convert a summary to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input summary file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Convert a summary to plain text
    Text {
        /// Input summary file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Convert a summary to JSON
    Json {
        /// Input summary file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: String,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        parse: ParseArgs,
    },

    /// Export a summary as a PDF report
    Pdf {
        /// Input summary file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: String,

        /// Output file or directory
        #[arg(short, long, value_name = "FILE", default_value = DEFAULT_PDF_FILE_NAME)]
        output: PathBuf,

        #[command(flatten)]
        parse: ParseArgs,

        #[command(flatten)]
        pdf: PdfArgs,
    },

    /// Show report structure and statistics
    Info {
        /// Input summary file ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: String,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        parse: ParseArgs,

        #[command(flatten)]
        pdf: PdfArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct ParseArgs {
    /// Report title
    #[arg(long)]
    title: Option<String>,

    /// Kind of call summarized
    #[arg(long, value_enum)]
    call_type: Option<CallTypeArg>,

    /// Section heading grammar
    #[arg(long, value_enum, default_value = "auto")]
    grammar: GrammarArg,

    /// Parse the input as-is, without normalization
    #[arg(long)]
    no_normalize: bool,
}

impl ParseArgs {
    fn to_options(&self, source: Option<String>) -> ParseOptions {
        let mut options = ParseOptions::new()
            .with_grammar(self.grammar.into())
            .with_created(chrono::Utc::now());
        if let Some(ref title) = self.title {
            options = options.with_title(title.clone());
        }
        if let Some(call_type) = self.call_type {
            options = options.with_call_type(call_type.into());
        }
        if let Some(source) = source {
            options = options.with_source(source);
        }
        if self.no_normalize {
            options = options.raw();
        }
        options
    }
}

#[derive(Args, Clone)]
struct PdfArgs {
    /// PDF page size
    #[arg(long, value_enum, env = "SUMREPORT_PAGE_SIZE", default_value = "a4")]
    page_size: PageSizeArg,

    /// Omit "Page N of M" footers
    #[arg(long)]
    no_page_numbers: bool,
}

impl PdfArgs {
    fn to_options(&self) -> PdfOptions {
        PdfOptions::new()
            .with_page_size(self.page_size.into())
            .with_page_numbers(!self.no_page_numbers)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CallTypeArg {
    /// Earnings call
    Earnings,
    /// Interview
    Interview,
    /// Meeting
    Meeting,
    /// Anything else
    Other,
}

impl From<CallTypeArg> for CallType {
    fn from(arg: CallTypeArg) -> Self {
        match arg {
            CallTypeArg::Earnings => CallType::Earnings,
            CallTypeArg::Interview => CallType::Interview,
            CallTypeArg::Meeting => CallType::Meeting,
            CallTypeArg::Other => CallType::Other,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
enum GrammarArg {
    /// Strict headings first, loose headings if none are found
    #[default]
    Auto,
    /// Uppercase headings ("1. EXECUTIVE OVERVIEW")
    Strict,
    /// Colon headings ("1. Executive Overview:")
    Loose,
}

impl From<GrammarArg> for HeadingGrammar {
    fn from(arg: GrammarArg) -> Self {
        match arg {
            GrammarArg::Auto => HeadingGrammar::Auto,
            GrammarArg::Strict => HeadingGrammar::Strict,
            GrammarArg::Loose => HeadingGrammar::Loose,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
enum PageSizeArg {
    /// ISO A4
    #[default]
    A4,
    /// US Letter
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            parse,
            pdf,
        }) => cmd_convert(&input, output.as_deref(), &parse, &pdf),
        Some(Commands::Html {
            input,
            output,
            standalone,
            parse,
        }) => cmd_html(&input, output.as_deref(), standalone, &parse),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            parse,
        }) => cmd_markdown(&input, output.as_deref(), frontmatter, &parse),
        Some(Commands::Text {
            input,
            output,
            parse,
        }) => cmd_text(&input, output.as_deref(), &parse),
        Some(Commands::Json {
            input,
            output,
            compact,
            parse,
        }) => cmd_json(&input, output.as_deref(), compact, &parse),
        Some(Commands::Pdf {
            input,
            output,
            parse,
            pdf,
        }) => cmd_pdf(&input, &output, &parse, &pdf),
        Some(Commands::Info {
            input,
            json,
            parse,
            pdf,
        }) => cmd_info(&input, json, &parse, &pdf),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &cli.parse, &cli.pdf)
            } else {
                println!("{}", "Usage: sumreport <FILE> [OUTPUT]".yellow());
                println!("       sumreport --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Read summary text from a file, or from stdin when `input` is "-".
fn read_input(input: &str) -> io::Result<String> {
    if input == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        fs::read_to_string(input)
    }
}

fn load(input: &str, parse: &ParseArgs) -> Result<Document, Box<dyn std::error::Error>> {
    let text = read_input(input)?;
    let source = (input != "-").then(|| input.to_string());
    Ok(parse_with_options(&text, &parse.to_options(source)))
}

/// Write to a file, or print to stdout when no path is given.
fn emit(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn default_output_dir(input: &str) -> PathBuf {
    if input == "-" {
        return PathBuf::from("summary_output");
    }
    let stem = Path::new(input)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();
    PathBuf::from(format!("{}_output", stem))
}

fn cmd_convert(input: &str, output: Option<&Path>, parse: &ParseArgs, pdf: &PdfArgs) -> CliResult {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_output_dir(input));

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(5);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing summary...");
    let doc = load(input, parse)?;
    let render_options = RenderOptions::new().with_frontmatter(true);
    pb.inc(1);

    pb.set_message("Generating HTML...");
    let html = render::to_html(&doc, &render_options.clone().with_standalone_html(true))?;
    fs::write(output_dir.join("report.html"), &html)?;
    pb.inc(1);

    pb.set_message("Generating Markdown...");
    let markdown = render::to_markdown(&doc, &render_options)?;
    fs::write(output_dir.join("report.md"), &markdown)?;
    pb.inc(1);

    pb.set_message("Generating text and JSON...");
    let text = render::to_text(&doc, &render_options)?;
    fs::write(output_dir.join("report.txt"), &text)?;
    let json = render::to_json(&doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join("report.json"), &json)?;
    pb.inc(1);

    pb.set_message("Generating PDF...");
    render::export_pdf(&doc, output_dir.join(DEFAULT_PDF_FILE_NAME), &pdf.to_options())?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} report.html", "├─".dimmed());
    println!("  {} report.md", "├─".dimmed());
    println!("  {} report.txt", "├─".dimmed());
    println!("  {} report.json", "├─".dimmed());
    println!("  {} {}", "└─".dimmed(), DEFAULT_PDF_FILE_NAME);

    Ok(())
}

fn cmd_html(input: &str, output: Option<&Path>, standalone: bool, parse: &ParseArgs) -> CliResult {
    let doc = load(input, parse)?;
    let options = RenderOptions::new().with_standalone_html(standalone);
    let html = render::to_html(&doc, &options)?;
    emit(output, &html)
}

fn cmd_markdown(
    input: &str,
    output: Option<&Path>,
    frontmatter: bool,
    parse: &ParseArgs,
) -> CliResult {
    let doc = load(input, parse)?;
    let options = RenderOptions::new().with_frontmatter(frontmatter);
    let markdown = render::to_markdown(&doc, &options)?;
    emit(output, &markdown)
}

fn cmd_text(input: &str, output: Option<&Path>, parse: &ParseArgs) -> CliResult {
    let doc = load(input, parse)?;
    let text = render::to_text(&doc, &RenderOptions::new())?;
    emit(output, &text)
}

fn cmd_json(input: &str, output: Option<&Path>, compact: bool, parse: &ParseArgs) -> CliResult {
    let doc = load(input, parse)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    emit(output, &json)
}

fn cmd_pdf(input: &str, output: &Path, parse: &ParseArgs, pdf: &PdfArgs) -> CliResult {
    let doc = load(input, parse)?;
    render::export_pdf(&doc, output, &pdf.to_options())?;
    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}

/// Parse a summary for inspection with the same options as the converters.
fn build_report(
    text: &str,
    source: Option<String>,
    parse: &ParseArgs,
    pdf: &PdfArgs,
) -> SumreportResult {
    Sumreport::new()
        .with_parse_options(parse.to_options(source))
        .with_pdf_options(pdf.to_options())
        .parse(text)
}

fn cmd_info(input: &str, json: bool, parse: &ParseArgs, pdf: &PdfArgs) -> CliResult {
    let text = read_input(input)?;
    let source = (input != "-").then(|| input.to_string());

    let report = build_report(&text, source.clone(), parse, pdf);
    let stats = report.stats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let doc = report.document();

    println!("{}", "Report Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Input".bold(), source.as_deref().unwrap_or("<stdin>"));
    println!("{}: {}", "Title".bold(), doc.metadata.title);
    if let Some(call_type) = doc.metadata.call_type {
        println!("{}: {}", "Call type".bold(), call_type);
    }
    println!(
        "{}: {}",
        "Preamble".bold(),
        if doc.preamble.is_some() { "Yes" } else { "No" }
    );

    println!();
    println!("{}", "Sections".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for section in &doc.sections {
        let title = if section.is_untitled() {
            "(untitled)".to_string()
        } else {
            section.title.clone()
        };
        println!("{} ({} blocks)", title.bold(), section.block_count());
        for subsection in &section.subsections {
            if let Some(heading) = subsection.heading() {
                println!("  {} {}", "├─".dimmed(), heading);
            }
        }
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Subsections".bold(), stats.subsection_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!(
        "{}: {} ({} items)",
        "Bullet lists".bold(),
        stats.bullet_list_count,
        stats.bullet_item_count
    );
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "Metric lines".bold(), stats.metric_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
    println!("{}: {}", "PDF pages".bold(), stats.page_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "sumreport".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Call summary report tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "sumreport",
            "pdf",
            "summary.txt",
            "--page-size",
            "letter",
            "--call-type",
            "earnings",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Pdf {
                output, parse, pdf, ..
            }) => {
                assert_eq!(output, PathBuf::from(DEFAULT_PDF_FILE_NAME));
                assert!(parse.call_type == Some(CallTypeArg::Earnings));
                assert!(pdf.page_size == PageSizeArg::Letter);
            }
            _ => panic!("expected pdf subcommand"),
        }
    }

    #[test]
    fn test_md_alias() {
        let cli = Cli::try_parse_from(["sumreport", "md", "-", "--frontmatter"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Markdown {
                frontmatter: true,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_args_to_options() {
        let args = ParseArgs {
            title: Some("Acme".into()),
            call_type: Some(CallTypeArg::Interview),
            grammar: GrammarArg::Loose,
            no_normalize: true,
        };
        let options = args.to_options(Some("in.txt".into()));
        assert_eq!(options.metadata.title, "Acme");
        assert_eq!(options.metadata.call_type, Some(CallType::Interview));
        assert_eq!(options.metadata.source.as_deref(), Some("in.txt"));
        assert_eq!(options.grammar, HeadingGrammar::Loose);
        assert!(options.normalize.is_none());
    }

    #[test]
    fn test_top_level_options_reach_default_conversion() {
        std::env::set_var("SUMREPORT_PAGE_SIZE", "letter");
        let cli = Cli::try_parse_from(["sumreport", "summary.txt", "--title", "Acme"]);
        std::env::remove_var("SUMREPORT_PAGE_SIZE");

        let cli = cli.unwrap();
        assert!(cli.command.is_none());
        assert!(cli.pdf.page_size == PageSizeArg::Letter);
        assert_eq!(cli.pdf.to_options().page_size, PageSize::Letter);
        assert_eq!(cli.parse.title.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_info_report_keeps_source_and_pdf_options() {
        let cli = Cli::try_parse_from([
            "sumreport",
            "info",
            "calls/q3.txt",
            "--page-size",
            "letter",
            "--grammar",
            "loose",
        ])
        .unwrap();
        let Some(Commands::Info { parse, pdf, .. }) = cli.command else {
            panic!("expected info subcommand");
        };

        let report = build_report(
            "1. Overview: Strong quarter.",
            Some("calls/q3.txt".into()),
            &parse,
            &pdf,
        );
        let metadata = &report.document().metadata;
        assert_eq!(metadata.source.as_deref(), Some("calls/q3.txt"));
        assert!(metadata.created.is_some());
        assert_eq!(report.document().sections[0].title, "1. Overview");
        assert_eq!(report.stats().unwrap().page_count, 1);
    }

    #[test]
    fn test_default_output_dir() {
        assert_eq!(default_output_dir("calls/q3.txt"), PathBuf::from("q3_output"));
        assert_eq!(default_output_dir("-"), PathBuf::from("summary_output"));
    }

    #[test]
    fn test_emit_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.md");
        emit(Some(&path), "# Report").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Report");
    }
}
