//! CLI for converting annotated corpora to canonical NER JSONL.
//!
//! One subcommand per source format:
//!
//! ```text
//! nerconv span-json ./labels --output converted/span_ner_dataset.jsonl
//! nerconv keyword-json ./labels
//! nerconv marker ./corpus
//! nerconv tag-table ./train_data
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use nerconv::{
    convert_keyword_json, convert_marker, convert_span_json, convert_tag_table, EmitPolicy,
    RunSummary,
};

#[derive(Parser)]
#[command(name = "nerconv")]
#[command(
    author,
    version,
    about = "Convert annotated corpora to canonical NER JSONL",
    long_about = "Converts source-specific annotated-corpus formats into one canonical\n\
                  character-offset entity-tagged JSONL format:\n\n\
                    {\"text\": \"...\", \"entities\": [[start, end, \"LABEL\"], ...]}\n\n\
                  Offsets are character offsets; entities are sorted and non-overlapping;\n\
                  labels come from the closed vocabulary\n\
                  PER, LOC, ORG, DAT, TIM, QT, ADD, PHN, URL, EML."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert offset-annotated labeling JSON (recurses over a directory)
    #[command(visible_alias = "s")]
    SpanJson(ConvertArgs),

    /// Convert keyword-list labeling JSON (recurses over a directory)
    #[command(visible_alias = "k")]
    KeywordJson(ConvertArgs),

    /// Convert inline-marker annotated text files
    #[command(visible_alias = "m")]
    Marker(ConvertArgs),

    /// Convert a word/tag table file
    #[command(visible_alias = "t")]
    TagTable(ConvertArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// Input directory (input file for tag-table)
    input: PathBuf,

    /// Output JSONL path (default depends on the subcommand)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also emit records whose entity list is empty
    #[arg(long)]
    keep_empty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::SpanJson(args) => {
            run(args, "converted/span_ner_dataset.jsonl", convert_span_json)
        }
        Commands::KeywordJson(args) => run(
            args,
            "converted/keyword_ner_dataset.jsonl",
            convert_keyword_json,
        ),
        Commands::Marker(args) => {
            run(args, "converted/marker_ner_dataset.jsonl", convert_marker)
        }
        Commands::TagTable(args) => {
            run(args, "converted/table_ner_dataset.jsonl", convert_tag_table)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run<F>(args: ConvertArgs, default_output: &str, convert: F) -> Result<(), String>
where
    F: FnOnce(&Path, &Path, EmitPolicy) -> nerconv::Result<RunSummary>,
{
    if !args.input.exists() {
        return Err(format!(
            "input path does not exist: {}",
            args.input.display()
        ));
    }
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(default_output));
    let policy = if args.keep_empty {
        EmitPolicy::KeepEmpty
    } else {
        EmitPolicy::SkipEmpty
    };

    println!("input:  {}", args.input.display());
    println!("output: {}", output.display());

    let summary = convert(&args.input, &output, policy).map_err(|e| e.to_string())?;

    for (path, msg) in &summary.failures {
        eprintln!("  [skipped] {}: {msg}", path.display());
    }
    println!(
        "\ndone: {} files -> {} records (skipped: {})",
        summary.files,
        summary.records,
        summary.failures.len()
    );
    if summary.dropped > 0 {
        println!("dropped entities: {}", summary.dropped);
    }
    Ok(())
}
