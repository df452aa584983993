use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use rkyv::ser::{serializers::AllocSerializer, Serializer};
use uzovka_protocol::{Lexicon, LexiconEntry};

#[derive(Parser)]
#[command(author, version, about = "Compiles a dialect lexicon (CSV or JSON) to an rkyv binary")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Dialect words that must never be substituted (may repeat).
    #[arg(long = "ambiguous", value_name = "WORD")]
    ambiguous: Vec<String>,
}

/// Two columns per row: the dialect phrase and the host keyword it maps to.
/// Row order is significant and preserved into the binary.
fn load_csv(path: &PathBuf) -> anyhow::Result<Vec<LexiconEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("cannot open {path:?}"))?;

    let mut entries = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed CSV at row {}", row + 1))?;
        let phrase = record.get(0).unwrap_or("").trim();
        let replacement = record.get(1).unwrap_or("").trim();
        if phrase.is_empty() || replacement.is_empty() {
            continue;
        }
        entries.push(LexiconEntry {
            phrase: phrase.split_whitespace().map(str::to_string).collect(),
            replacement: replacement.to_string(),
        });
    }
    Ok(entries)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    println!("📖 Reading lexicon from {:?}...", cli.input);
    let mut lexicon = match cli.input.extension().and_then(OsStr::to_str) {
        Some("json") => {
            let data = fs::read_to_string(&cli.input)?;
            serde_json::from_str::<Lexicon>(&data).context("invalid lexicon JSON")?
        }
        Some("csv") => Lexicon {
            version: 1,
            entries: load_csv(&cli.input)?,
            ambiguous: Vec::new(),
        },
        other => bail!("unsupported lexicon format: {other:?} (expected .csv or .json)"),
    };
    lexicon.ambiguous.extend(cli.ambiguous.iter().cloned());

    println!(
        "⚙️  Compiling lexicon version {} with {} entries ({} ambiguous)...",
        lexicon.version,
        lexicon.entries.len(),
        lexicon.ambiguous.len()
    );

    let mut serializer = AllocSerializer::<256>::default();
    serializer
        .serialize_value(&lexicon)
        .map_err(|e| anyhow::anyhow!("rkyv serialization failed: {e}"))?;
    let bytes = serializer.into_serializer().into_inner();

    fs::write(&cli.output, bytes)?;
    println!("✅ Success! Binary written to {:?}", cli.output);
    Ok(())
}
