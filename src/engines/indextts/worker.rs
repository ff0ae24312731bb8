use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};

use serde::{Deserialize, Serialize};

use crate::SynthesisRequest;

/// Python program run by the worker process.
///
/// It loads IndexTTS2 once, then answers one JSON request per stdin line
/// with one JSON reply per stdout line.
pub const WORKER_SCRIPT: &str = include_str!("worker.py");

#[derive(thiserror::Error, Debug)]
pub enum IndexTtsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid worker message: {0}")]
    Json(#[from] serde_json::Error),
    #[error(
        "Python interpreter '{}' not found. Install Python with the indextts package, \
         or point --python / INDEXTTS_PYTHON at the right interpreter.",
        .0.display()
    )]
    PythonNotFound(PathBuf),
    #[error("Model directory not found: {}", .0.display())]
    MissingModelDir(PathBuf),
    #[error("Config file not found: {}", .0.display())]
    MissingConfig(PathBuf),
    #[error("IndexTTS2 failed to load: {0}")]
    LoadFailed(String),
    #[error("IndexTTS2 worker exited unexpectedly ({0})")]
    WorkerExited(String),
    #[error("{0}")]
    Synthesis(String),
    #[error("Model not loaded. Call load_model() first.")]
    ModelNotLoaded,
}

/// Model construction flags forwarded to IndexTTS2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerFlags {
    pub use_fp16: bool,
    pub use_cuda_kernel: bool,
    pub use_deepspeed: bool,
}

#[derive(Serialize)]
struct WireRequest<'a> {
    speaker_audio: &'a Path,
    text: &'a str,
    emotion_audio: Option<&'a Path>,
    output: &'a Path,
    verbose: bool,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Handshake {
    Ready,
    Error { error: String },
}

#[derive(Deserialize, Debug)]
struct WireReply {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Line-delimited JSON conversation with the worker.
///
/// Replies are matched to requests by position only, so once a line fails to
/// parse the channel refuses further requests.
pub(crate) struct Channel<R, W> {
    reader: R,
    writer: W,
    desynced: bool,
}

impl<R: BufRead, W: Write> Channel<R, W> {
    pub(crate) fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            desynced: false,
        }
    }

    /// Wait for the worker to report that the model is loaded.
    pub(crate) fn handshake(&mut self) -> Result<(), IndexTtsError> {
        match self.read_message::<Handshake>()? {
            Some(Handshake::Ready) => Ok(()),
            Some(Handshake::Error { error }) => Err(IndexTtsError::LoadFailed(error)),
            None => Err(IndexTtsError::WorkerExited(
                "closed before the model was loaded".to_string(),
            )),
        }
    }

    /// Send one request and wait for its reply.
    pub(crate) fn request(&mut self, request: &SynthesisRequest) -> Result<(), IndexTtsError> {
        if self.desynced {
            return Err(IndexTtsError::WorkerExited(
                "reply stream out of sync".to_string(),
            ));
        }
        let wire = WireRequest {
            speaker_audio: &request.speaker_audio,
            text: &request.text,
            emotion_audio: request.emotion_audio.as_deref(),
            output: &request.output,
            verbose: request.verbose,
        };
        let mut line = serde_json::to_string(&wire)?;
        line.push('\n');
        self.writer.write_all(line.as_bytes())?;
        self.writer.flush()?;

        match self.read_message::<WireReply>()? {
            Some(WireReply { ok: true, .. }) => Ok(()),
            Some(WireReply { error, .. }) => Err(IndexTtsError::Synthesis(
                error.unwrap_or_else(|| "unknown error".to_string()),
            )),
            None => Err(IndexTtsError::WorkerExited(
                "closed while synthesizing".to_string(),
            )),
        }
    }

    /// Next JSON message, or `None` at end of stream.
    fn read_message<T: serde::de::DeserializeOwned>(&mut self) -> Result<Option<T>, IndexTtsError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return match serde_json::from_str(trimmed) {
                Ok(message) => Ok(Some(message)),
                Err(e) => {
                    self.desynced = true;
                    Err(IndexTtsError::Json(e))
                }
            };
        }
    }
}

/// A running IndexTTS2 worker process.
pub(crate) struct Worker {
    child: Child,
    channel: Option<Channel<BufReader<ChildStdout>, ChildStdin>>,
}

impl Worker {
    /// Start the worker and block until the model is loaded.
    pub(crate) fn spawn(
        python: &Path,
        model_dir: &Path,
        cfg_path: &Path,
        flags: WorkerFlags,
    ) -> Result<Self, IndexTtsError> {
        let mut command = Command::new(python);
        command
            .arg("-u")
            .arg("-c")
            .arg(WORKER_SCRIPT)
            .arg("--cfg-path")
            .arg(cfg_path)
            .arg("--model-dir")
            .arg(model_dir);
        if flags.use_fp16 {
            command.arg("--fp16");
        }
        if flags.use_cuda_kernel {
            command.arg("--cuda-kernel");
        }
        if flags.use_deepspeed {
            command.arg("--deepspeed");
        }

        let mut child = command
            .env("PYTHONIOENCODING", "utf-8")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    IndexTtsError::PythonNotFound(python.to_path_buf())
                } else {
                    IndexTtsError::Io(e)
                }
            })?;
        log::debug!("Started IndexTTS2 worker (pid {})", child.id());

        let (Some(stdin), Some(stdout)) = (child.stdin.take(), child.stdout.take()) else {
            let _ = child.kill();
            let _ = child.wait();
            return Err(IndexTtsError::WorkerExited("stdio not captured".to_string()));
        };

        let mut worker = Self {
            child,
            channel: Some(Channel::new(BufReader::new(stdout), stdin)),
        };
        let handshake = worker.channel_mut()?.handshake();
        match handshake {
            Ok(()) => Ok(worker),
            Err(IndexTtsError::WorkerExited(_)) => {
                let status = worker.shutdown();
                Err(IndexTtsError::WorkerExited(describe_exit(status)))
            }
            Err(e) => Err(e),
        }
    }

    pub(crate) fn synthesize(&mut self, request: &SynthesisRequest) -> Result<(), IndexTtsError> {
        let result = self.channel_mut()?.request(request);
        match result {
            Err(IndexTtsError::WorkerExited(_)) => {
                let status = self.shutdown();
                Err(IndexTtsError::WorkerExited(describe_exit(status)))
            }
            Err(e @ IndexTtsError::Json(_)) => {
                log::warn!("Stopping IndexTTS2 worker after an unreadable reply");
                self.shutdown();
                Err(e)
            }
            other => other,
        }
    }

    fn channel_mut(
        &mut self,
    ) -> Result<&mut Channel<BufReader<ChildStdout>, ChildStdin>, IndexTtsError> {
        self.channel.as_mut().ok_or_else(|| {
            IndexTtsError::WorkerExited("worker already shut down".to_string())
        })
    }

    /// Close the worker's stdin so it exits its request loop, then reap it.
    fn shutdown(&mut self) -> Option<ExitStatus> {
        self.channel = None;
        self.child.wait().ok()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        if self.channel.is_some() {
            let status = self.shutdown();
            log::debug!("IndexTTS2 worker stopped ({})", describe_exit(status));
        }
    }
}

fn describe_exit(status: Option<ExitStatus>) -> String {
    match status.and_then(|s| s.code()) {
        Some(code) => format!("exit code {code}"),
        None => "no exit code".to_string(),
    }
}
