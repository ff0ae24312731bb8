use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use voice_clone_rs::batch::{run_batch, BatchOptions};
use voice_clone_rs::cli::{init_logging, rule, ModelArgs};
use voice_clone_rs::engines::indextts::IndexTtsEngine;

const AFTER_HELP: &str = "\
Examples:
  batch-clone --input ./input_wavs                  # writes to ./input_wavs/input_wavs_en/
  batch-clone -i ./my_audio --output ./custom_output
  batch-clone -i ./my_audio -m checkpoints -c checkpoints/config.yaml

File naming:
  The text to speak is taken from each file name, minus its numeric prefix.
  The prefix is kept in the output name:
    1 how old are you.wav  -> \"how old are you\" -> 1 how old are you.wav
    1-how old are you.wav  -> \"how old are you\" -> 1-how old are you.wav
    15-你好世界.wav        -> \"你好世界\"        -> 15-你好世界.wav";

/// IndexTTS2 batch voice cloning: every .wav in a directory is cloned onto
/// the text in its own file name.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None, after_help = AFTER_HELP)]
struct Args {
    /// Directory containing the .wav reference files.
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output directory (default: <input>/<input name>_en).
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Also write the batch report as JSON to this file.
    #[arg(long)]
    report: Option<PathBuf>,

    #[command(flatten)]
    model: ModelArgs,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    let options = BatchOptions {
        input_dir: args.input.clone(),
        output_dir: args.output.clone(),
        model_dir: args.model.model_dir.clone(),
        cfg_path: args.model.cfg_path.clone(),
    };

    println!("{}", rule(80));
    println!("IndexTTS2 batch voice cloning");
    println!("{}", rule(80));
    println!("Input directory:  {}", options.input_dir.display());
    println!("Output directory: {}", options.resolved_output_dir().display());
    println!("{}", rule(80));

    let mut engine = IndexTtsEngine::new();
    let report = match run_batch(&mut engine, &options, args.model.params()) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outputs = report.outputs();
    if !outputs.is_empty() {
        println!("Generated files:");
        for path in outputs {
            println!("  {}", path.display());
        }
    }
    println!("{report}");

    if let Some(path) = &args.report {
        let written = report
            .to_json()
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(path, json).map_err(|e| e.to_string()));
        if let Err(e) = written {
            eprintln!("error: failed to write report to {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        log::info!("Report written to {}", path.display());
    }

    ExitCode::SUCCESS
}
