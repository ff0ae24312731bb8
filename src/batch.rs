//! Batch voice cloning over a directory of reference recordings.
//!
//! Every `.wav` directly inside the input directory is used as the voice
//! reference for its own text, which is read from the file name (see
//! [`crate::filename`]). Files are processed one at a time in file name
//! order. A failing file is recorded and the batch moves on.
//!
//! Two inputs that map to the same output name (e.g. `1-hi.wav` and
//! `1-hi .wav`) write to the same path; the later one silently replaces the
//! earlier one. Existing users depend on this, so it is kept.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::audio::wav_duration_secs;
use crate::filename::{ParsedName, OUTPUT_EXTENSION};
use crate::{CloneError, SynthesisEngine, SynthesisRequest, DEFAULT_CFG_PATH, DEFAULT_MODEL_DIR};

/// Suffix of the default output directory, `<input>/<input name>_en`.
pub const DEFAULT_OUTPUT_SUFFIX: &str = "en";

/// Where a batch reads from, writes to, and loads its model from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    /// `None` uses [`BatchOptions::default_output_dir`].
    pub output_dir: Option<PathBuf>,
    pub model_dir: PathBuf,
    pub cfg_path: PathBuf,
}

impl BatchOptions {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: None,
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            cfg_path: PathBuf::from(DEFAULT_CFG_PATH),
        }
    }

    /// `<input_dir>/<input_dir name>_en`.
    ///
    /// Falls back to the canonical path's name for inputs such as `.`.
    pub fn default_output_dir(&self) -> PathBuf {
        let name = self
            .input_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .or_else(|| {
                fs::canonicalize(&self.input_dir)
                    .ok()
                    .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            })
            .unwrap_or_default();
        self.input_dir
            .join(format!("{name}_{DEFAULT_OUTPUT_SUFFIX}"))
    }

    pub fn resolved_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.default_output_dir())
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Succeeded {
        output: PathBuf,
        /// Length of the generated audio, when its header could be read.
        duration_secs: Option<f64>,
    },
    /// No text could be read from the file name.
    Skipped,
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub file_name: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Result of one batch run, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub files: Vec<FileOutcome>,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    input_dir: &'a Path,
    output_dir: &'a Path,
    total: usize,
    succeeded: usize,
    skipped: usize,
    failed: usize,
    files: &'a [FileOutcome],
}

impl BatchReport {
    /// Number of qualifying input files.
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Succeeded { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    /// `(file name, reason)` for every failed file.
    pub fn failures(&self) -> Vec<(&str, &str)> {
        self.files
            .iter()
            .filter_map(|f| match &f.outcome {
                Outcome::Failed { reason } => Some((f.file_name.as_str(), reason.as_str())),
                _ => None,
            })
            .collect()
    }

    /// Output paths of the files that were generated.
    pub fn outputs(&self) -> Vec<&Path> {
        self.files
            .iter()
            .filter_map(|f| match &f.outcome {
                Outcome::Succeeded { output, .. } => Some(output.as_path()),
                _ => None,
            })
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&ReportJson {
            input_dir: &self.input_dir,
            output_dir: &self.output_dir,
            total: self.total(),
            succeeded: self.succeeded(),
            skipped: self.skipped(),
            failed: self.failed(),
            files: &self.files,
        })
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.files.iter().filter(|f| pred(&f.outcome)).count()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(80);
        writeln!(f, "{rule}")?;
        writeln!(f, "Batch cloning finished")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Succeeded: {}/{}", self.succeeded(), self.total())?;
        if self.skipped() > 0 {
            writeln!(f, "Skipped:   {}", self.skipped())?;
        }
        let failures = self.failures();
        if !failures.is_empty() {
            writeln!(f, "Failed:    {}", failures.len())?;
            writeln!(f)?;
            writeln!(f, "Failed files:")?;
            for (name, reason) in failures {
                writeln!(f, "  - {name}: {reason}")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "Output directory: {}", self.output_dir.display())?;
        write!(f, "{rule}")
    }
}

/// List the `.wav` files directly inside `dir`, sorted by file name.
pub fn scan_input_files(dir: &Path) -> Result<Vec<PathBuf>, CloneError> {
    let entries = fs::read_dir(dir).map_err(|e| CloneError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CloneError::io(dir, e))?.path();
        let is_wav = path
            .extension()
            .is_some_and(|ext| ext == OUTPUT_EXTENSION);
        if is_wav && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Clone every `.wav` in `options.input_dir` onto the text in its own name.
///
/// The engine is loaded only once there is at least one input file, used for
/// every file, and unloaded when the batch ends. Setup problems (missing
/// directory, no input files, model load failure) are returned as errors
/// before any file or directory is written; failures of individual files are
/// recorded in the returned report.
pub fn run_batch<E: SynthesisEngine>(
    engine: &mut E,
    options: &BatchOptions,
    model_params: E::ModelParams,
) -> Result<BatchReport, CloneError> {
    let input_dir = &options.input_dir;
    if !input_dir.is_dir() {
        return Err(CloneError::DirectoryNotFound(input_dir.clone()));
    }

    let inputs = scan_input_files(input_dir)?;
    if inputs.is_empty() {
        return Err(CloneError::NoInputFiles(input_dir.clone()));
    }

    let output_dir = options.resolved_output_dir();
    log::info!("Input directory: {}", input_dir.display());
    log::info!("Output directory: {}", output_dir.display());
    log::info!("Found {} audio files", inputs.len());

    log::info!("Loading model from {}", options.model_dir.display());
    engine
        .load_model_with_params(&options.model_dir, &options.cfg_path, model_params)
        .map_err(CloneError::ModelLoad)?;
    log::info!("Model loaded");

    fs::create_dir_all(&output_dir).map_err(|e| CloneError::io(&output_dir, e))?;

    let total = inputs.len();
    let mut written = HashSet::new();
    let mut files = Vec::with_capacity(total);
    for (index, input) in inputs.iter().enumerate() {
        let file_name = input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::info!("[{}/{}] {}", index + 1, total, file_name);

        let outcome = clone_file(engine, input, &file_name, &output_dir, &mut written);
        files.push(FileOutcome { file_name, outcome });
    }

    engine.unload_model();

    Ok(BatchReport {
        input_dir: input_dir.clone(),
        output_dir,
        files,
    })
}

fn clone_file<E: SynthesisEngine>(
    engine: &mut E,
    input: &Path,
    file_name: &str,
    output_dir: &Path,
    written: &mut HashSet<PathBuf>,
) -> Outcome {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parsed = ParsedName::parse(&stem);
    let Some(output_name) = parsed.output_file_name() else {
        log::info!("Skipping {file_name}: no text in file name");
        return Outcome::Skipped;
    };

    let output = output_dir.join(output_name);
    if !written.insert(output.clone()) {
        log::debug!("{} replaces an earlier output of this run", output.display());
    }
    log::info!("    text:   {}", parsed.text);
    log::info!("    output: {}", output.display());

    let request = SynthesisRequest::builder()
        .speaker_audio(input.to_path_buf())
        .text(parsed.text)
        .output(output.clone())
        .verbose(false)
        .build();
    let result = match request {
        Ok(request) => engine.synthesize_to_file(&request),
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => {
            let duration_secs = wav_duration_secs(&output);
            match duration_secs {
                Some(secs) => log::info!("    done ({secs:.2}s of audio)"),
                None => log::info!("    done"),
            }
            Outcome::Succeeded {
                output,
                duration_secs,
            }
        }
        Err(e) => {
            log::warn!("Failed to clone {file_name}: {e}");
            Outcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
