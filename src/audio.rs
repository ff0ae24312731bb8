use std::path::Path;

/// Header information of a WAV file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavInfo {
    pub sample_rate: u32,
    pub channels: u16,
    /// Frames per channel.
    pub frames: u32,
}

impl WavInfo {
    /// Read the header of the WAV file at `path`.
    pub fn probe(path: &Path) -> Result<Self, hound::Error> {
        let reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        Ok(Self {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            frames: reader.duration(),
        })
    }

    /// Duration of the audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.frames as f64 / self.sample_rate as f64
    }
}

/// Duration of the WAV at `path`, or `None` if it cannot be read as WAV.
pub fn wav_duration_secs(path: &Path) -> Option<f64> {
    match WavInfo::probe(path) {
        Ok(info) => {
            log::debug!(
                "{}: {} Hz, {} channel(s), {} frames",
                path.display(),
                info.sample_rate,
                info.channels,
                info.frames
            );
            Some(info.duration_secs())
        }
        Err(e) => {
            log::debug!("Could not read WAV header of {}: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
pub(crate) fn write_test_wav(path: &Path, sample_rate: u32, frames: usize) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for _ in 0..frames {
        writer.write_sample(0i16).unwrap();
    }
    writer.finalize().unwrap();
}
