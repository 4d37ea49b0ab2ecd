use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use symphonia::core::{
    formats::FormatOptions,
    io::MediaSourceStream,
    meta::MetadataOptions,
    probe::Hint,
};

use crate::transport::{SeekTransport, TransportError};

/// Plays a local file. Progress values are milliseconds.
pub struct AudioTransport {
    file_path: PathBuf,
    label: String,
    sink: Sink,
    paused: bool,
    total_duration: Option<Duration>,
    seek_base: Duration,
    stream: OutputStream,
}

pub fn probe_duration(path: &Path) -> Option<Duration> {
    let file = fs::File::open(path).ok()?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .ok()?;

    let reader = probed.format;
    let track = reader.default_track()?;
    let time_base = track.codec_params.time_base?;
    let n_frames = track.codec_params.n_frames?;
    let time = time_base.calc_time(n_frames);

    Duration::try_from_secs_f64(time.seconds as f64 + time.frac).ok()
}

fn open_decoder(path: &Path) -> Result<Decoder<io::BufReader<fs::File>>, TransportError> {
    let file = fs::File::open(path)?;
    Ok(Decoder::new(io::BufReader::new(file))?)
}

impl AudioTransport {
    pub fn open(path: &Path) -> Result<Self, TransportError> {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".into());

        let total_duration = probe_duration(path);
        let source = open_decoder(path)?;

        let stream = OutputStreamBuilder::from_default_device()?.open_stream_or_fallback()?;
        let sink = Sink::connect_new(stream.mixer());
        sink.append(source);

        log::info!(
            "playing {} ({:?})",
            path.display(),
            total_duration.unwrap_or_default()
        );

        Ok(AudioTransport {
            file_path: path.to_path_buf(),
            label,
            sink,
            paused: false,
            total_duration,
            seek_base: Duration::ZERO,
            stream,
        })
    }
}

impl SeekTransport for AudioTransport {
    fn seek(&mut self, value: f64) -> Result<(), TransportError> {
        // out-of-range targets go to the end of the track
        let target = Duration::try_from_secs_f64(value.max(0.0) / 1000.0)
            .unwrap_or_else(|_| self.total_duration.unwrap_or(Duration::MAX));
        let clamped = self
            .total_duration
            .map(|t| target.min(t))
            .unwrap_or(target);

        let mut source = open_decoder(&self.file_path)?;
        if let Err(e) = source.try_seek(clamped) {
            log::warn!("decoder refused seek to {clamped:?}: {e}");
        }

        // Drop old sink and create a fresh one to avoid clear() issues
        self.sink.stop();
        let new_sink = Sink::connect_new(self.stream.mixer());
        new_sink.append(source);
        if self.paused {
            new_sink.pause();
        }

        self.sink = new_sink;
        self.seek_base = clamped;
        Ok(())
    }

    fn position(&self) -> Option<f64> {
        Some((self.seek_base + self.sink.get_pos()).as_secs_f64() * 1000.0)
    }

    fn duration(&self) -> Option<f64> {
        self.total_duration.map(|d| d.as_secs_f64() * 1000.0)
    }

    fn toggle_pause(&mut self) {
        if self.paused {
            self.sink.play();
        } else {
            self.sink.pause();
        }
        self.paused = !self.paused;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn label(&self) -> &str {
        &self.label
    }
}
