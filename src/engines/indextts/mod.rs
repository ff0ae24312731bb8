//! IndexTTS2 voice cloning engine.
//!
//! IndexTTS2 is a Python/PyTorch model, so this engine does not run it
//! in-process. Loading the engine starts one Python worker which constructs
//! `indextts.infer_v2.IndexTTS2` and keeps it in memory; every synthesis
//! request is a JSON line sent to that worker, answered by a JSON line once the
//! output WAV is written. The model is therefore loaded once per engine, not
//! once per request.
//!
//! # System Requirements
//!
//! A Python interpreter that can `import indextts` (defaults to `python3`;
//! override with [`IndexTtsModelParams::python`]).
//!
//! # Model Directory Layout
//!
//! ```text
//! checkpoints/
//! ├── config.yaml      # passed as cfg_path
//! └── ...              # model weights, as shipped with IndexTTS2
//! ```
//!
//! # Worker Protocol
//!
//! | Direction | Line |
//! |---|---|
//! | worker → engine | `{"status": "ready"}` or `{"status": "error", "error": "..."}` once loaded |
//! | engine → worker | `{"speaker_audio", "text", "emotion_audio", "output", "verbose"}` |
//! | worker → engine | `{"ok": true}` or `{"ok": false, "error": "..."}` |
//!
//! Anything the model prints goes to the worker's stderr, which is inherited
//! from this process.

pub mod engine;
pub mod worker;

pub use engine::{IndexTtsEngine, IndexTtsModelParams, DEFAULT_PYTHON};
pub use worker::IndexTtsError;
