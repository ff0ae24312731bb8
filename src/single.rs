use std::path::Path;

use crate::{CloneError, SynthesisEngine, SynthesisRequest};

/// Load `engine` and clone one utterance.
///
/// There is no retry: a failing synthesis is returned as
/// [`CloneError::Synthesis`] carrying the engine's own error.
pub fn run_single<E: SynthesisEngine>(
    engine: &mut E,
    request: &SynthesisRequest,
    model_dir: &Path,
    cfg_path: &Path,
    model_params: E::ModelParams,
) -> Result<(), CloneError> {
    log::info!("Loading model from {}", model_dir.display());
    engine
        .load_model_with_params(model_dir, cfg_path, model_params)
        .map_err(CloneError::ModelLoad)?;
    log::info!("Model loaded");

    log::info!("Synthesizing {:?}", request.text);
    let result = engine
        .synthesize_to_file(request)
        .map_err(CloneError::Synthesis);
    engine.unload_model();
    result
}

#[cfg(test)]
mod tests {
    use super::run_single;
    use crate::testing::StubEngine;
    use crate::{CloneError, SynthesisRequest};
    use std::path::Path;

    fn request(dir: &Path, text: &str) -> SynthesisRequest {
        SynthesisRequest::builder()
            .speaker_audio(dir.join("speaker.wav"))
            .text(text)
            .output(dir.join("output.wav"))
            .emotion_audio(dir.join("happy.wav"))
            .verbose(true)
            .build()
            .unwrap()
    }

    #[test]
    fn issues_exactly_one_request() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path(), "hello");

        let mut engine = StubEngine::default();
        run_single(
            &mut engine,
            &request,
            Path::new("checkpoints"),
            Path::new("checkpoints/config.yaml"),
            (),
        )
        .unwrap();

        assert_eq!(engine.loads, 1);
        assert_eq!(engine.requests, vec![request]);
        assert!(dir.path().join("output.wav").exists());
        assert!(!engine.loaded);
    }

    #[test]
    fn passes_emotion_reference_through() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path(), "hello");

        let mut engine = StubEngine::default();
        run_single(&mut engine, &request, Path::new("m"), Path::new("c"), ()).unwrap();

        assert_eq!(
            engine.requests[0].emotion_audio.as_deref(),
            Some(dir.path().join("happy.wav").as_path())
        );
    }

    #[test]
    fn propagates_synthesis_failure() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path(), "boom");

        let mut engine = StubEngine::failing_on(&["boom"]);
        let err = run_single(&mut engine, &request, Path::new("m"), Path::new("c"), ()).unwrap_err();

        match err {
            CloneError::Synthesis(inner) => assert_eq!(inner.to_string(), "cannot synthesize \"boom\""),
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(engine.requests.len(), 1);
        assert!(!dir.path().join("output.wav").exists());
    }

    #[test]
    fn load_failure_skips_synthesis() {
        let dir = tempfile::tempdir().unwrap();
        let request = request(dir.path(), "hello");

        let mut engine = StubEngine {
            fail_load: true,
            ..Default::default()
        };
        let err = run_single(&mut engine, &request, Path::new("m"), Path::new("c"), ()).unwrap_err();

        assert!(matches!(err, CloneError::ModelLoad(_)));
        assert!(engine.requests.is_empty());
    }
}
