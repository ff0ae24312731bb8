//! Command-line pieces shared by the `tts-cli` and `batch-clone` binaries.

use std::path::PathBuf;

use clap::Args;

use crate::engines::indextts::{IndexTtsModelParams, DEFAULT_PYTHON};
use crate::{DEFAULT_CFG_PATH, DEFAULT_MODEL_DIR};

/// Where the model lives and how to start it.
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Model checkpoint directory.
    #[arg(short = 'm', long, default_value = DEFAULT_MODEL_DIR)]
    pub model_dir: PathBuf,

    /// Model config file.
    #[arg(short = 'c', long, default_value = DEFAULT_CFG_PATH)]
    pub cfg_path: PathBuf,

    /// Python interpreter with the indextts package installed.
    #[arg(long, env = "INDEXTTS_PYTHON", default_value = DEFAULT_PYTHON)]
    pub python: PathBuf,

    /// Run the model in half precision.
    #[arg(long)]
    pub fp16: bool,

    /// Use the compiled BigVGAN CUDA kernel.
    #[arg(long)]
    pub cuda_kernel: bool,

    /// Use DeepSpeed for inference.
    #[arg(long)]
    pub deepspeed: bool,
}

impl ModelArgs {
    pub fn params(&self) -> IndexTtsModelParams {
        IndexTtsModelParams {
            python: self.python.clone(),
            use_fp16: self.fp16,
            use_cuda_kernel: self.cuda_kernel,
            use_deepspeed: self.deepspeed,
        }
    }
}

/// Log to stderr at `info` unless `RUST_LOG` says otherwise.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

/// Horizontal rule used to frame console banners.
pub fn rule(width: usize) -> String {
    "=".repeat(width)
}
