use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use voice_clone_rs::cli::{init_logging, rule, ModelArgs};
use voice_clone_rs::engines::indextts::IndexTtsEngine;
use voice_clone_rs::single::run_single;
use voice_clone_rs::SynthesisRequest;

/// IndexTTS2 command-line voice cloning.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    /// Speaker reference audio (voice to clone).
    #[arg(short = 's', long)]
    speaker: PathBuf,

    /// Text to synthesize.
    #[arg(short = 't', long)]
    text: String,

    /// Output audio file.
    #[arg(short = 'o', long, default_value = "output.wav")]
    output: PathBuf,

    /// Emotion reference audio.
    #[arg(short = 'e', long)]
    emotion_audio: Option<PathBuf>,

    #[command(flatten)]
    model: ModelArgs,
}

fn main() -> ExitCode {
    init_logging();
    let args = Args::parse();

    println!("{}", rule(60));
    println!("IndexTTS2 voice cloning");
    println!("{}", rule(60));
    println!("Speaker audio: {}", args.speaker.display());
    println!("Text:          {}", args.text);
    println!("Output file:   {}", args.output.display());
    if let Some(emotion) = &args.emotion_audio {
        println!("Emotion audio: {}", emotion.display());
    }
    println!("{}", rule(60));

    let mut builder = SynthesisRequest::builder();
    builder
        .speaker_audio(args.speaker.clone())
        .text(args.text.clone())
        .output(args.output.clone())
        .verbose(true);
    if let Some(emotion) = args.emotion_audio.clone() {
        builder.emotion_audio(emotion);
    }
    let request = match builder.build() {
        Ok(request) => request,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut engine = IndexTtsEngine::new();
    match run_single(
        &mut engine,
        &request,
        &args.model.model_dir,
        &args.model.cfg_path,
        args.model.params(),
    ) {
        Ok(()) => {
            println!("Done. Output file: {}", args.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
