use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use uzovka_protocol::Lexicon;
use uzovka_transpiler::{KeywordTable, Transpiler};

const POMOC: &str = "\
užovka — překladač českého nářečí do Pythonu

Použití:
    uzovka VSTUP.uz [-o VÝSTUP.py] [--slovnik SLOVNÍK.bin]

Argumenty:
    VSTUP.uz            zdrojový soubor v nářečí
    -o, --output        soubor pro přeložený kód (jinak na standardní výstup)
    --slovnik           zkompilovaný slovník (rkyv); jinak vestavěná čeština
    --pomoc             vypíše tuto nápovědu
";

#[derive(Parser)]
#[command(name = "uzovka", version, disable_help_flag = true)]
struct Cli {
    /// Dialect source file.
    source: Option<PathBuf>,

    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Compiled lexicon binary; the built-in Czech table is used otherwise.
    #[arg(long, value_name = "FILE")]
    slovnik: Option<PathBuf>,

    #[arg(long)]
    pomoc: bool,
}

fn load_table(path: &PathBuf) -> anyhow::Result<KeywordTable> {
    let bytes = fs::read(path).with_context(|| format!("nelze číst slovník {path:?}"))?;
    let lexicon: Lexicon = rkyv::from_bytes(&bytes)
        .map_err(|e| anyhow::anyhow!("poškozený slovník {path:?}: {e}"))?;
    Ok(KeywordTable::from_lexicon(&lexicon))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let source_path = cli
        .source
        .ok_or_else(|| anyhow::anyhow!("chybí vstupní soubor (zkuste --pomoc)"))?;
    let source = fs::read_to_string(&source_path)
        .with_context(|| format!("nelze číst {source_path:?}"))?;

    let transpiler = match &cli.slovnik {
        Some(path) => Transpiler::new(load_table(path)?),
        None => Transpiler::czech(),
    };

    let translation = transpiler
        .transpile(&source)
        .map_err(|e| anyhow::anyhow!("chyba překladu: {e}"))?;

    for warning in &translation.warnings {
        eprintln!(
            "varování (řádek {}, sloupec {}): {}",
            warning.line, warning.column, warning.message
        );
    }

    match &cli.output {
        Some(path) => fs::write(path, &translation.code)
            .with_context(|| format!("nelze zapsat {path:?}"))?,
        None => print!("{}", translation.code),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if cli.pomoc {
        print!("{POMOC}");
        return ExitCode::from(1);
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("uzovka: {err}");
            ExitCode::from(1)
        }
    }
}
