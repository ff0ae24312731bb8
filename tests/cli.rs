use std::process::Command;

fn batch_clone() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_batch-clone"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn tts_cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tts-cli"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

#[test]
fn batch_missing_input_dir_fails_without_output() {
    let root = tempfile::tempdir().expect("tempdir");
    let input = root.path().join("missing");

    let output = batch_clone()
        .args(["--input", input.to_str().unwrap()])
        .output()
        .expect("run batch-clone");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("input directory not found"), "{stderr}");
    assert!(!input.exists());
}

#[test]
fn batch_without_wav_files_does_not_create_output_dir() {
    let root = tempfile::tempdir().expect("tempdir");
    let input = root.path().join("voices");
    std::fs::create_dir(&input).unwrap();
    std::fs::write(input.join("readme.txt"), "no audio here").unwrap();

    let output = batch_clone()
        .args(["-i", input.to_str().unwrap()])
        // Would fail to start if the model were loaded.
        .args(["--python", "/nonexistent/python"])
        .output()
        .expect("run batch-clone");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no .wav files found"), "{stderr}");
    assert!(!stderr.contains("Python interpreter"), "{stderr}");
    assert!(!input.join("voices_en").exists());
}

#[test]
fn batch_reports_model_load_failure() {
    let root = tempfile::tempdir().expect("tempdir");
    let input = root.path().join("voices");
    std::fs::create_dir(&input).unwrap();
    std::fs::write(input.join("1-hello.wav"), b"").unwrap();

    let output = batch_clone()
        .args(["-i", input.to_str().unwrap()])
        .args(["-m", root.path().join("no-checkpoints").to_str().unwrap()])
        .output()
        .expect("run batch-clone");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load model"), "{stderr}");
    assert!(stderr.contains("Model directory not found"), "{stderr}");
    assert!(!input.join("voices_en").exists());
}

#[test]
fn batch_help_lists_flags() {
    let output = batch_clone().arg("--help").output().expect("run batch-clone");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--input", "--output", "--model-dir", "--cfg-path", "--report"] {
        assert!(stdout.contains(flag), "missing {flag}");
    }
}

#[test]
fn single_requires_speaker_and_text() {
    let output = tts_cli().args(["-t", "hello"]).output().expect("run tts-cli");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--speaker"), "{stderr}");
}

#[test]
fn single_reports_missing_config() {
    let root = tempfile::tempdir().expect("tempdir");

    let output = tts_cli()
        .args(["-s", "speaker.wav", "-t", "hello"])
        .args(["-m", root.path().to_str().unwrap()])
        .args(["-c", root.path().join("config.yaml").to_str().unwrap()])
        .args(["-o", root.path().join("out.wav").to_str().unwrap()])
        .output()
        .expect("run tts-cli");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Config file not found"), "{stderr}");
    assert!(!root.path().join("out.wav").exists());
}
