use std::path::{Path, PathBuf};

use crate::{SynthesisEngine, SynthesisRequest};

use super::worker::{IndexTtsError, Worker, WorkerFlags};

/// Interpreter used when none is configured.
pub const DEFAULT_PYTHON: &str = "python3";

/// Parameters for configuring IndexTTS2 model loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexTtsModelParams {
    /// Python interpreter with the `indextts` package installed.
    pub python: PathBuf,
    /// Half-precision inference.
    pub use_fp16: bool,
    /// Compiled BigVGAN CUDA kernel.
    pub use_cuda_kernel: bool,
    pub use_deepspeed: bool,
}

impl Default for IndexTtsModelParams {
    fn default() -> Self {
        Self {
            python: PathBuf::from(DEFAULT_PYTHON),
            use_fp16: false,
            use_cuda_kernel: false,
            use_deepspeed: false,
        }
    }
}

impl IndexTtsModelParams {
    fn flags(&self) -> WorkerFlags {
        WorkerFlags {
            use_fp16: self.use_fp16,
            use_cuda_kernel: self.use_cuda_kernel,
            use_deepspeed: self.use_deepspeed,
        }
    }
}

/// IndexTTS2 voice cloning engine.
///
/// Loading starts a Python worker that constructs the model once; each
/// request is then served by that same worker until the engine is unloaded
/// or dropped.
///
/// ```rust,no_run
/// use voice_clone_rs::{SynthesisEngine, SynthesisRequest};
/// use voice_clone_rs::engines::indextts::IndexTtsEngine;
/// use std::path::Path;
///
/// let mut engine = IndexTtsEngine::new();
/// engine.load_model(Path::new("checkpoints"), Path::new("checkpoints/config.yaml"))?;
///
/// let request = SynthesisRequest::builder()
///     .speaker_audio("speaker.wav")
///     .text("Hello, world!")
///     .output("output.wav")
///     .build()?;
/// engine.synthesize_to_file(&request)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Default)]
pub struct IndexTtsEngine {
    worker: Option<Worker>,
}

impl IndexTtsEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drop for IndexTtsEngine {
    fn drop(&mut self) {
        self.unload_model();
    }
}

impl SynthesisEngine for IndexTtsEngine {
    type ModelParams = IndexTtsModelParams;

    fn load_model_with_params(
        &mut self,
        model_dir: &Path,
        cfg_path: &Path,
        params: Self::ModelParams,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if !model_dir.is_dir() {
            return Err(IndexTtsError::MissingModelDir(model_dir.to_path_buf()).into());
        }
        if !cfg_path.is_file() {
            return Err(IndexTtsError::MissingConfig(cfg_path.to_path_buf()).into());
        }

        self.unload_model();
        log::info!(
            "Starting IndexTTS2 from {} with {} (fp16={}, cuda_kernel={}, deepspeed={})",
            model_dir.display(),
            params.python.display(),
            params.use_fp16,
            params.use_cuda_kernel,
            params.use_deepspeed
        );
        let worker = Worker::spawn(&params.python, model_dir, cfg_path, params.flags())?;
        self.worker = Some(worker);
        Ok(())
    }

    fn unload_model(&mut self) {
        self.worker = None;
    }

    fn is_loaded(&self) -> bool {
        self.worker.is_some()
    }

    fn synthesize_to_file(
        &mut self,
        request: &SynthesisRequest,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let worker = self.worker.as_mut().ok_or(IndexTtsError::ModelNotLoaded)?;
        worker.synthesize(request)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{IndexTtsEngine, IndexTtsModelParams};
    use crate::engines::indextts::IndexTtsError;
    use crate::{SynthesisEngine, SynthesisRequest};
    use std::path::Path;

    fn expect_error(err: Box<dyn std::error::Error>) -> IndexTtsError {
        *err.downcast::<IndexTtsError>().unwrap()
    }

    #[test]
    fn missing_model_dir_is_reported_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = IndexTtsEngine::new();
        let err = engine
            .load_model(&dir.path().join("checkpoints"), &dir.path().join("config.yaml"))
            .unwrap_err();
        assert!(matches!(expect_error(err), IndexTtsError::MissingModelDir(_)));
        assert!(!engine.is_loaded());
    }

    #[test]
    fn missing_config_is_reported_before_spawning() {
        let dir = tempfile::tempdir().unwrap();
        let mut engine = IndexTtsEngine::new();
        let err = engine
            .load_model(dir.path(), &dir.path().join("config.yaml"))
            .unwrap_err();
        assert!(matches!(expect_error(err), IndexTtsError::MissingConfig(_)));
    }

    #[test]
    fn unknown_interpreter_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("config.yaml");
        std::fs::write(&cfg, "").unwrap();

        let params = IndexTtsModelParams {
            python: dir.path().join("no-such-python"),
            ..Default::default()
        };
        let mut engine = IndexTtsEngine::new();
        let err = engine
            .load_model_with_params(dir.path(), &cfg, params)
            .unwrap_err();
        assert!(matches!(expect_error(err), IndexTtsError::PythonNotFound(_)));
        assert!(!engine.is_loaded());
    }

    #[test]
    fn synthesize_requires_loaded_model() {
        let mut engine = IndexTtsEngine::new();
        let request = SynthesisRequest::builder()
            .speaker_audio("a.wav")
            .text("hi")
            .output("b.wav")
            .build()
            .unwrap();
        let err = engine.synthesize_to_file(&request).unwrap_err();
        assert!(matches!(expect_error(err), IndexTtsError::ModelNotLoaded));
    }

    #[test]
    fn default_params_match_cli_defaults() {
        let params = IndexTtsModelParams::default();
        assert_eq!(params.python, Path::new("python3"));
        assert!(!params.use_fp16 && !params.use_cuda_kernel && !params.use_deepspeed);
    }
}
