use std::path::PathBuf;

/// Errors that stop a whole cloning run.
///
/// Per-file failures in batch mode are not errors: they are recorded as
/// [`crate::batch::FileOutcome`]s and the batch carries on.
#[derive(thiserror::Error, Debug)]
pub enum CloneError {
    #[error("input directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("no .wav files found in {}", .0.display())]
    NoInputFiles(PathBuf),
    #[error("failed to load model: {0}")]
    ModelLoad(Box<dyn std::error::Error>),
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("synthesis failed: {0}")]
    Synthesis(Box<dyn std::error::Error>),
}

impl CloneError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CloneError::Io {
            path: path.into(),
            source,
        }
    }
}
