//! Utilities for opening decoders and connecting `rodio` sinks.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::EngineError;

pub(super) type FileDecoder = Decoder<BufReader<File>>;

/// Open and decode `path`. Fails for missing files and unsupported formats.
pub(super) fn open_decoder(path: &Path) -> Result<FileDecoder, EngineError> {
    let file = File::open(path).map_err(|source| EngineError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Create a playing `Sink` for `source` at linear `volume`.
pub(super) fn create_sink(
    stream: &OutputStream,
    source: FileDecoder,
    looped: bool,
    volume: f32,
) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.set_volume(volume);
    if looped {
        sink.append(source.repeat_infinite());
    } else {
        sink.append(source);
    }
    sink.play();
    sink
}
