//! docfill CLI - fill document templates with JSON data

use std::path::{Path, PathBuf};

use clap::Parser;
use colored::Colorize;
use log::LevelFilter;

use docfill::{
    output_path, Docfill, ExternalRenderer, FillOptions, RenderRequest, StoreRegistry,
    TemplateData, DEFAULT_OUTPUT_DIR,
};

#[derive(Parser)]
#[command(name = "docfill")]
#[command(version)]
#[command(about = "Fill document templates with JSON data", long_about = None)]
#[command(after_help = "Examples:\n  \
    docfill --template cv.json --data data.json\n  \
    docfill --template cv.txt --data data.json --role \"Data Engineer\" --company Acme --pdf\n\n\
    Note: --pdf renders plain-text outputs (.txt) only; a .json output is rejected before anything is written.")]
struct Cli {
    /// Template document (.json, .txt)
    #[arg(long, value_name = "PATH")]
    template: PathBuf,

    /// Output document (default: output/<template>[_<role>][_<company>].<ext>)
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// JSON file with placeholder values
    #[arg(long, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Also render the output to PDF (plain-text outputs only)
    #[arg(long)]
    pdf: bool,

    /// Role name appended to the default output file name
    #[arg(long, value_name = "STR")]
    role: Option<String>,

    /// Company name appended to the default output file name
    #[arg(long, value_name = "STR")]
    company: Option<String>,

    /// Keep empty paragraphs at the end of the document
    #[arg(long)]
    keep_trailing_empty: bool,

    /// PDF converter program (default: $DOCFILL_CONVERTER, soffice, libreoffice)
    #[arg(long, value_name = "PATH")]
    converter: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.template.exists() {
        return Err(docfill::Error::TemplateNotFound(cli.template.clone()).into());
    }

    let data = match &cli.data {
        Some(path) => TemplateData::load(path)?,
        None => TemplateData::new(),
    };
    log::debug!("{} data entr(ies) loaded", data.len());

    let output = cli.output.clone().unwrap_or_else(|| {
        output_path(
            &cli.template,
            DEFAULT_OUTPUT_DIR,
            cli.role.as_deref(),
            cli.company.as_deref(),
        )
    });

    if cli.pdf {
        StoreRegistry::with_defaults().ensure_renderable(&output)?;
    }

    let options = FillOptions::new().with_trim_trailing_empty(!cli.keep_trailing_empty);
    let filled = Docfill::new()
        .with_data(data)
        .with_options(options)
        .fill(&cli.template)?;
    filled.save(&output)?;

    println!("{} {}", "✓ Document filled:".green(), output.display());
    print_unresolved(&filled.report.unresolved);

    if cli.pdf {
        let pdf = render_pdf(&output, cli.converter.as_deref())?;
        println!("{} {}", "✓ PDF written:".green(), pdf.display());
    }

    Ok(())
}

fn print_unresolved(names: &[String]) {
    if names.is_empty() {
        return;
    }
    println!(
        "{} {}",
        "Unresolved placeholders:".yellow(),
        names
            .iter()
            .map(|n| format!("{{{{{}}}}}", n))
            .collect::<Vec<_>>()
            .join(", ")
    );
}

fn render_pdf(document: &Path, converter: Option<&Path>) -> Result<PathBuf, docfill::Error> {
    let renderer = ExternalRenderer::locate(converter)?;
    renderer.render(&RenderRequest::new(document))
}
