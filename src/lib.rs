//! # voice-clone-rs
//!
//! Command-line voice cloning on top of an external text-to-speech model.
//!
//! ## Features
//!
//! - **Single-shot cloning**: one utterance from a speaker reference and a text
//! - **Batch cloning**: every `.wav` in a directory is used as its own voice
//!   reference, with the text taken from the file name
//! - **Pluggable engines**: synthesis goes through the [`SynthesisEngine`] trait
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::path::Path;
//! use voice_clone_rs::batch::{run_batch, BatchOptions};
//! use voice_clone_rs::engines::indextts::{IndexTtsEngine, IndexTtsModelParams};
//!
//! let mut engine = IndexTtsEngine::new();
//! let options = BatchOptions::new("input_wavs");
//! let report = run_batch(&mut engine, &options, IndexTtsModelParams::default())?;
//! println!("{report}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod audio;
pub mod batch;
#[cfg(feature = "indextts")]
pub mod cli;
pub mod engines;
pub mod error;
pub mod filename;
pub mod single;

#[cfg(test)]
mod testing;

pub use error::CloneError;

use std::path::{Path, PathBuf};

use derive_builder::Builder;

/// Default model checkpoint directory.
pub const DEFAULT_MODEL_DIR: &str = "checkpoints";
/// Default model configuration file.
pub const DEFAULT_CFG_PATH: &str = "checkpoints/config.yaml";

/// One request to clone a voice onto a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct SynthesisRequest {
    /// Reference audio whose voice is cloned.
    pub speaker_audio: PathBuf,
    /// Text to speak.
    pub text: String,
    /// Optional reference audio for emotion/prosody.
    #[builder(default, setter(into, strip_option))]
    pub emotion_audio: Option<PathBuf>,
    /// Where the engine writes the generated WAV.
    pub output: PathBuf,
    /// Ask the engine for detailed progress output.
    #[builder(default)]
    pub verbose: bool,
}

impl SynthesisRequest {
    pub fn builder() -> SynthesisRequestBuilder {
        SynthesisRequestBuilder::default()
    }
}

/// Common interface for voice cloning engines.
///
/// An engine is loaded once from a model directory and a config file, then
/// serves any number of requests. Each request writes its audio straight to
/// [`SynthesisRequest::output`].
pub trait SynthesisEngine {
    /// Parameters for configuring model loading (precision flags, etc.)
    type ModelParams: Default;

    /// Load a model using default parameters.
    fn load_model(
        &mut self,
        model_dir: &Path,
        cfg_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.load_model_with_params(model_dir, cfg_path, Self::ModelParams::default())
    }

    /// Load a model with custom parameters.
    fn load_model_with_params(
        &mut self,
        model_dir: &Path,
        cfg_path: &Path,
        params: Self::ModelParams,
    ) -> Result<(), Box<dyn std::error::Error>>;

    /// Unload the currently loaded model and free associated resources.
    fn unload_model(&mut self);

    /// Whether a model is currently loaded.
    fn is_loaded(&self) -> bool;

    /// Synthesize `request.text` in the voice of `request.speaker_audio`
    /// and write it to `request.output`.
    fn synthesize_to_file(
        &mut self,
        request: &SynthesisRequest,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
