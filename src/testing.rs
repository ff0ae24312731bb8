use std::path::Path;

use crate::audio::write_test_wav;
use crate::{SynthesisEngine, SynthesisRequest};

/// In-memory engine that records every request and writes a short silent WAV.
#[derive(Debug, Default)]
pub(crate) struct StubEngine {
    pub loads: usize,
    pub loaded: bool,
    pub fail_load: bool,
    /// Requests whose text is listed here fail.
    pub fail_texts: Vec<String>,
    pub requests: Vec<SynthesisRequest>,
}

impl StubEngine {
    pub fn failing_on(texts: &[&str]) -> Self {
        Self {
            fail_texts: texts.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }
}

impl SynthesisEngine for StubEngine {
    type ModelParams = ();

    fn load_model_with_params(
        &mut self,
        model_dir: &Path,
        _cfg_path: &Path,
        _params: (),
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.loads += 1;
        if self.fail_load {
            return Err(format!("no checkpoints in {}", model_dir.display()).into());
        }
        self.loaded = true;
        Ok(())
    }

    fn unload_model(&mut self) {
        self.loaded = false;
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn synthesize_to_file(
        &mut self,
        request: &SynthesisRequest,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.requests.push(request.clone());
        if !self.loaded {
            return Err("model not loaded".into());
        }
        if self.fail_texts.contains(&request.text) {
            return Err(format!("cannot synthesize {:?}", request.text).into());
        }
        write_test_wav(&request.output, 16000, 1600);
        Ok(())
    }
}
