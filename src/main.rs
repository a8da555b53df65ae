use std::{
    fs::{self, File},
    io::{self, BufRead},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};

use markupkit::MarkupEngine;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Preset {
    Markdown,
    Markleft,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
enum Format {
    /// Text with markup stripped
    #[default]
    Plain,
    /// Text and attribute runs in ron format
    Ron,
}

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Engine definition file path (currently only ron supported)
    #[arg(short, long, group = "engine_def")]
    engine: Option<PathBuf>,

    /// Directly provided engine definition (ron format)
    #[arg(long, group = "engine_def")]
    engine_string: Option<String>,

    /// Use one of built in engines. This is the default with markdown
    #[arg(short, long, value_enum, group = "engine_def")]
    preset: Option<Preset>,

    /// File to apply markup to. Reads from stdin if unset
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: Format,
}

fn apply_markup(
    engine: &MarkupEngine,
    format: Format,
    line: io::Result<String>,
) -> Result<(), String> {
    let styled = engine.apply_markup(&line.map_err(|err| format!("reading line: {err}"))?);

    match format {
        Format::Plain => println!("{styled}"),
        Format::Ron => println!(
            "{}",
            ron::to_string(&styled).map_err(|err| format!("serializing output: {err}"))?
        ),
    }

    Ok(())
}

fn main() -> Result<(), String> {
    let args = Args::parse();

    let parsed;
    let engine = if let Some(path) = args.engine {
        let engine_string =
            fs::read_to_string(path).map_err(|err| format!("reading engine file: {err}"))?;
        parsed = ron::from_str::<MarkupEngine>(&engine_string)
            .map_err(|err| format!("parsing engine: {err}"))?;
        &parsed
    } else if let Some(engine_string) = args.engine_string {
        parsed = ron::from_str::<MarkupEngine>(&engine_string)
            .map_err(|err| format!("parsing engine: {err}"))?;
        &parsed
    } else {
        match args.preset.unwrap_or(Preset::Markdown) {
            Preset::Markdown => MarkupEngine::markdown(),
            Preset::Markleft => MarkupEngine::markleft(),
        }
    };

    if let Some(filename) = args.file {
        let file = File::open(filename).map_err(|err| format!("reading input file: {err}"))?;
        for line in io::BufReader::new(file).lines() {
            apply_markup(engine, args.format, line)?;
        }
    } else {
        for line in io::stdin().lines() {
            apply_markup(engine, args.format, line)?;
        }
    }

    Ok(())
}
