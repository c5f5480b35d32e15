//! docpreview CLI - HTML previews for CSV, spreadsheet and word documents

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docpreview::{classify, Previewer, RawDocument, RenderOptions, Rendered};

#[derive(Parser)]
#[command(name = "docpreview")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Render CSV, spreadsheet and word documents to self-contained HTML previews",
    long_about = None
)]
struct Cli {
    /// Input document
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output HTML file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one document to HTML
    Render {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render many documents in parallel
    Batch {
        /// Input documents
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show how a document renders
    Info {
        /// Input document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show the cell category of each value
    Classify {
        /// Cell values
        #[arg(value_name = "TEXT", required = true)]
        values: Vec<String>,
    },

    /// Show version information
    Version,
}

/// Rendering flags shared by the rendering commands.
#[derive(Args, Clone, Default)]
struct RenderArgs {
    /// Fail instead of falling back to a text preview or raw bytes
    #[arg(long)]
    strict: bool,

    /// Maximum data rows per table
    #[arg(long, value_name = "N", env = "DOCPREVIEW_MAX_ROWS")]
    max_rows: Option<usize>,

    /// Maximum columns per table
    #[arg(long, value_name = "N", env = "DOCPREVIEW_MAX_COLUMNS")]
    max_columns: Option<usize>,

    /// Rows per page initially selected in CSV previews
    #[arg(long, value_name = "N")]
    rows_per_page: Option<usize>,

    /// strftime pattern for spreadsheet dates
    #[arg(long, value_name = "PATTERN")]
    date_format: Option<String>,

    /// Keep newlines inside quoted CSV fields
    #[arg(long)]
    multiline_quotes: bool,
}

impl RenderArgs {
    fn previewer(&self) -> Previewer {
        let mut options = RenderOptions::new()
            .with_multiline_quotes(self.multiline_quotes)
            .with_fallback(!self.strict);

        if let Some(rows) = self.max_rows {
            options = options.with_max_rows(rows);
        }
        if let Some(columns) = self.max_columns {
            options = options.with_max_columns(columns);
        }
        if let Some(rows) = self.rows_per_page {
            options = options.with_rows_per_page(rows);
        }
        if let Some(ref pattern) = self.date_format {
            options = options.with_date_format(pattern.clone());
        }

        Previewer::new().with_options(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            render,
        }) => cmd_render(&input, output.as_deref(), &render),
        Some(Commands::Batch {
            inputs,
            output,
            render,
        }) => cmd_batch(&inputs, &output, &render),
        Some(Commands::Info {
            input,
            json,
            render,
        }) => cmd_info(&input, json, &render),
        Some(Commands::Classify { values }) => {
            cmd_classify(&values);
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render if input is provided
            if let Some(input) = cli.input {
                cmd_render(&input, cli.output.as_deref(), &RenderArgs::default())
            } else {
                println!("{}", "Usage: docpreview <FILE> [OUTPUT]".yellow());
                println!("       docpreview --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = args.previewer().render_file(input, "html")?;

    if let Some(path) = output {
        fs::write(path, &rendered.content)?;
        println!(
            "{} {} ({})",
            "Saved to".green(),
            path.display(),
            rendered.stage.to_string().dimmed()
        );
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&rendered.content)?;
        stdout.flush()?;
    }

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading files...");
    let mut docs = Vec::with_capacity(inputs.len());
    for input in inputs {
        let content = fs::read(input)?;
        docs.push(RawDocument::new(content, file_name(input)));
        pb.inc(1);
    }

    pb.set_message("Rendering...");
    let results = args.previewer().render_batch(&docs, "html");

    let mut written = Vec::new();
    let mut failed = Vec::new();
    let mut taken = HashSet::new();
    for (doc, result) in docs.iter().zip(results) {
        match result {
            Ok(rendered) => {
                let name = unique_name(output_name(&doc.filename, &rendered), &mut taken);
                log::debug!("Writing {} as {}", doc.filename, name);
                fs::write(output_dir.join(&name), &rendered.content)?;
                written.push((name, rendered.stage));
            }
            Err(e) => {
                log::warn!("Failed to render {}: {}", doc.filename, e);
                failed.push((doc.filename.clone(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, (name, stage)) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {} {}", branch.dimmed(), name, format!("({})", stage).dimmed());
    }

    if !failed.is_empty() {
        println!("\n{}", "Failed:".red().bold());
        for (name, e) in &failed {
            println!("  {} {}: {}", "✗".red(), name, e);
        }
        return Err(format!("{} of {} documents failed", failed.len(), inputs.len()).into());
    }

    Ok(())
}

fn cmd_info(input: &Path, json: bool, args: &RenderArgs) -> Result<(), Box<dyn std::error::Error>> {
    let rendered = args.previewer().render_file(input, "html")?;

    if json {
        let info = serde_json::json!({
            "file": input.display().to_string(),
            "content_length": rendered.content_len(),
            "rendered": rendered,
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let stats = &rendered.stats;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(family) = stats.family {
        println!("{}: {}", "Family".bold(), family);
    }
    println!("{}: {}", "Stage".bold(), rendered.stage);
    println!("{}: {}", "Content type".bold(), rendered.content_type);
    println!("{}: {} bytes", "Size".bold(), rendered.content_len());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if stats.sheet_count > 0 {
        println!("{}: {}", "Sheets".bold(), stats.sheet_count);
        if stats.failed_sheet_count > 0 {
            println!(
                "{}: {}",
                "Unreadable sheets".bold(),
                stats.failed_sheet_count.to_string().yellow()
            );
        }
    }
    if stats.total_rows > 0 {
        println!(
            "{}: {} of {}",
            "Rows rendered".bold(),
            stats.rendered_rows,
            stats.total_rows
        );
        println!("{}: {}", "Columns".bold(), stats.column_count);
        if stats.rows_truncated || stats.columns_truncated {
            println!("{}: {}", "Truncated".bold(), "Yes".yellow());
        }
    }
    if stats.paragraph_count > 0 || stats.table_count > 0 {
        println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
        println!("{}: {}", "Headings".bold(), stats.heading_count);
        println!("{}: {}", "Tables".bold(), stats.table_count);
    }
    if stats.word_count > 0 {
        println!("{}: {}", "Words".bold(), stats.word_count);
        println!("{}: {}", "Characters".bold(), stats.char_count);
    }

    Ok(())
}

fn cmd_classify(values: &[String]) {
    for value in values {
        let category = classify(value);
        println!(
            "{} {} {}",
            value,
            "→".dimmed(),
            category.css_class().unwrap_or("none").cyan()
        );
    }
}

fn cmd_version() {
    println!("{} {}", "docpreview".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML previews for CSV, spreadsheet and word documents");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/docpreview".dimmed());
    println!("License: MIT");
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// HTML previews append `.html` to the input name; passthrough output
/// keeps the name as is.
fn output_name(filename: &str, rendered: &Rendered) -> String {
    if rendered.is_html() {
        format!("{}.html", filename)
    } else {
        filename.to_string()
    }
}

/// Suffix `-2`, `-3`, ... before the last extension until the name is free.
fn unique_name(name: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let (base, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => (&name[..dot], &name[dot..]),
        _ => (name.as_str(), ""),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{}-{}{}", base, n, ext);
        if taken.insert(candidate.clone()) {
            log::warn!("Output name {} already used, writing {}", name, candidate);
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpreview::{RenderStage, RenderStats};

    fn rendered(content_type: &'static str) -> Rendered {
        Rendered::new(Vec::new(), content_type, RenderStage::Primary, RenderStats::new())
    }

    #[test]
    fn test_output_name() {
        assert_eq!(
            output_name("report.xlsx", &rendered("text/html; charset=UTF-8")),
            "report.xlsx.html"
        );
        assert_eq!(
            output_name("legacy.xls", &rendered("application/vnd.ms-excel")),
            "legacy.xls"
        );
    }

    #[test]
    fn test_unique_name() {
        let mut taken = HashSet::new();
        assert_eq!(unique_name("a.csv.html".into(), &mut taken), "a.csv.html");
        assert_eq!(unique_name("a.csv.html".into(), &mut taken), "a.csv-2.html");
        assert_eq!(unique_name("a.csv.html".into(), &mut taken), "a.csv-3.html");
        assert_eq!(unique_name("README".into(), &mut taken), "README");
        assert_eq!(unique_name("README".into(), &mut taken), "README-2");
    }

    #[test]
    fn test_render_args_previewer() {
        let args = RenderArgs {
            strict: true,
            max_rows: Some(10),
            ..RenderArgs::default()
        };
        let previewer = args.previewer();
        assert!(!previewer.options().fallback);
        assert_eq!(previewer.options().max_rows, 10);
        assert_eq!(previewer.options().max_columns, 100);
    }

    #[test]
    fn test_batch_writes_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        fs::write(&input, "a,b\n1,2\n").unwrap();
        let out = dir.path().join("out");

        cmd_batch(&[input], &out, &RenderArgs::default()).unwrap();
        let html = fs::read_to_string(out.join("data.csv.html")).unwrap();
        assert!(html.contains("CSV Document"));
    }

    #[test]
    fn test_batch_same_stem_keeps_both() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("report.csv");
        let txt = dir.path().join("report.txt");
        fs::write(&csv, "a,b\n1,2\n").unwrap();
        fs::write(&txt, "c,d\n3,4\n").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        let again = nested.join("report.csv");
        fs::write(&again, "e,f\n5,6\n").unwrap();
        let out = dir.path().join("out");

        cmd_batch(&[csv, txt, again], &out, &RenderArgs::default()).unwrap();

        let first = fs::read_to_string(out.join("report.csv.html")).unwrap();
        let second = fs::read_to_string(out.join("report.txt.html")).unwrap();
        let third = fs::read_to_string(out.join("report.csv-2.html")).unwrap();
        assert!(first.contains("<th>a</th>"));
        assert!(second.contains("<th>c</th>"));
        assert!(third.contains("<th>e</th>"));
    }
}
