//! GIF output
//!
//! Frames are written as raw palette indices against a single global color
//! table holding the PICO-8 palette, so index n in the file is palette entry
//! n. The animation loops forever; each frame keeps its own delay.
//!
//! Files are written next to the target as `<name>.tmp` and renamed into
//! place once complete, so a failed run never leaves a truncated GIF.

use gif::{Encoder, EncodingError, Frame, Repeat};
use std::borrow::Cow;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::playback::Recording;
use crate::constants::{PALETTE_SIZE, SCREEN_H, SCREEN_W};
use crate::error::ReplayError;
use crate::palettes::{PICO8_PALETTE, color_table};

/// Encode `recording` as an endlessly looping GIF. Returns the writer after
/// the trailer has been written.
pub fn encode_gif<W: Write>(recording: &Recording, writer: W) -> Result<W, EncodingError> {
    let palette = color_table(&PICO8_PALETTE);
    let mut encoder = Encoder::new(writer, SCREEN_W as u16, SCREEN_H as u16, &palette)?;
    encoder.set_repeat(Repeat::Infinite)?;

    for recorded in recording.frames() {
        let indices = recorded.image.indices();
        let buffer = if indices.iter().all(|&i| (i as usize) < PALETTE_SIZE) {
            Cow::Borrowed(&indices[..])
        } else {
            Cow::Owned(indices.iter().map(|&i| i & 0x0f).collect())
        };
        let frame = Frame {
            width: SCREEN_W as u16,
            height: SCREEN_H as u16,
            delay: recorded.delay_cs,
            buffer,
            ..Default::default()
        };
        encoder.write_frame(&frame)?;
    }

    Ok(encoder.into_inner()?)
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `recording` to `path`, optionally creating missing parent directories
pub fn write_gif(recording: &Recording, path: &Path, create_dirs: bool) -> Result<(), ReplayError> {
    if recording.is_empty() {
        return Err(ReplayError::EmptyRecording);
    }

    if create_dirs {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| ReplayError::OutputDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let partial = partial_path(path);
    let file = File::create(&partial).map_err(|source| ReplayError::CreateOutput {
        path: partial.clone(),
        source,
    })?;

    let written = encode_gif(recording, BufWriter::new(file))
        .and_then(|mut writer| writer.flush().map_err(EncodingError::from))
        .map_err(|source| ReplayError::Encode {
            path: path.to_path_buf(),
            source,
        })
        .and_then(|()| {
            fs::rename(&partial, path).map_err(|source| ReplayError::CreateOutput {
                path: path.to_path_buf(),
                source,
            })
        });

    if written.is_err() {
        let _ = fs::remove_file(&partial);
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCREEN_SIZE;
    use crate::replay::capture::PaletteImage;
    use image::AnimationDecoder;
    use image::codecs::gif::GifDecoder;
    use std::io::Cursor;

    fn recording(frames: usize) -> Recording {
        let mut recording = Recording::default();
        for i in 0..frames {
            let mut buffer = [0u8; SCREEN_SIZE];
            buffer[i] = 7;
            recording.push(PaletteImage::from_buffer(&buffer), 3);
        }
        recording
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("p8replay-encoder-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_encoded_gif_decodes() {
        let mut bytes = Vec::new();
        encode_gif(&recording(3), &mut bytes).unwrap();
        assert_eq!(&bytes[..6], b"GIF89a");

        let decoder = GifDecoder::new(Cursor::new(bytes)).unwrap();
        let frames = decoder.into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].buffer().dimensions(), (128, 128));
        assert_eq!(frames[0].delay().numer_denom_ms(), (30, 1));
        assert_eq!(frames[1].buffer().get_pixel(1, 0).0, [0xff, 0xf1, 0xe8, 0xff]);
    }

    #[test]
    fn test_indices_and_palette_kept() {
        let mut buffer = [0u8; SCREEN_SIZE];
        buffer[0] = 8;
        buffer[1] = 7;
        buffer[2] = 15;
        let mut recording = Recording::default();
        recording.push(PaletteImage::from_buffer(&buffer), 3);

        let mut bytes = Vec::new();
        encode_gif(&recording, &mut bytes).unwrap();

        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = options.read_info(Cursor::new(bytes)).unwrap();
        assert_eq!(decoder.global_palette().unwrap(), &color_table(&PICO8_PALETTE)[..]);

        let frame = decoder.read_next_frame().unwrap().unwrap();
        assert!(frame.palette.is_none());
        assert_eq!(frame.delay, 3);
        assert_eq!(&frame.buffer[..], &buffer[..]);
    }

    #[test]
    fn test_loops_forever() {
        let mut bytes = Vec::new();
        encode_gif(&recording(1), &mut bytes).unwrap();
        // NETSCAPE2.0 application extension with loop count 0
        let marker: &[u8] = b"NETSCAPE2.0\x03\x01\x00\x00";
        assert!(bytes.windows(marker.len()).any(|w| w == marker));
    }

    #[test]
    fn test_empty_recording_rejected() {
        let path = std::env::temp_dir().join("p8replay-encoder-empty.gif");
        let err = write_gif(&Recording::default(), &path, false).unwrap_err();
        assert!(matches!(err, ReplayError::EmptyRecording));
    }

    #[test]
    fn test_missing_directory_is_an_error_without_create() {
        let path = std::env::temp_dir()
            .join("p8replay-encoder-missing")
            .join("nested")
            .join("out.gif");
        let _ = fs::remove_dir_all(std::env::temp_dir().join("p8replay-encoder-missing"));
        let err = write_gif(&recording(1), &path, false).unwrap_err();
        assert!(matches!(err, ReplayError::CreateOutput { .. }));
        assert!(err.is_output_error());
    }

    #[test]
    fn test_no_partial_file_left_behind() {
        let dir = scratch_dir("partial");

        let ok = dir.join("ok.gif");
        write_gif(&recording(2), &ok, false).unwrap();
        assert!(ok.exists());
        assert!(!partial_path(&ok).exists());

        // A non-empty directory in the way: the rename into place fails
        let blocked = dir.join("blocked.gif");
        fs::create_dir_all(blocked.join("inner")).unwrap();
        let err = write_gif(&recording(2), &blocked, false).unwrap_err();
        assert!(err.is_output_error());
        assert!(!partial_path(&blocked).exists());
        assert!(blocked.is_dir());

        let _ = fs::remove_dir_all(&dir);
    }
}
