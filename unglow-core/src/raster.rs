//! Whole-image alpha recovery, in memory and on disk.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::png::PngEncoder;
use image::io::Reader as ImageReader;
use image::{ColorType, ImageEncoder, ImageFormat, RgbaImage};

use crate::error::{Error, Result};
use crate::pixel::recover_alpha;

/// How the transformed PNG replaces the original file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteMode {
    /// Write straight over the original bytes.
    #[default]
    Overwrite,
    /// Encode into a temporary file next to the original, then rename over it.
    Atomic,
}

/// Apply [`recover_alpha`] to every pixel, row by row.
pub fn recover_buffer(img: &mut RgbaImage) {
    for pixel in img.pixels_mut() {
        *pixel = recover_alpha(*pixel);
    }
}

/// Decode the image at `path`, recover its alpha and write it back as an
/// RGBA PNG over the same path.
///
/// The input format is sniffed from the file contents. Ancillary PNG chunks
/// are not carried over. Returns the image dimensions.
pub fn transform_image(path: &Path, mode: WriteMode) -> Result<(u32, u32)> {
    let mut img = decode(path)?;
    recover_buffer(&mut img);

    match mode {
        WriteMode::Overwrite => img
            .save_with_format(path, ImageFormat::Png)
            .map_err(|source| Error::Encode {
                path: path.to_path_buf(),
                source,
            })?,
        WriteMode::Atomic => write_atomic(path, &img)?,
    }

    log::debug!("Recovered alpha in {} ({}x{})", path.display(), img.width(), img.height());
    Ok(img.dimensions())
}

fn decode(path: &Path) -> Result<RgbaImage> {
    let io_err = |source| Error::Io {
        path: path.to_path_buf(),
        source,
    };
    let decode_err = |source| Error::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?;
    Ok(reader.decode().map_err(decode_err)?.into_rgba8())
}

fn write_atomic(path: &Path, img: &RgbaImage) -> Result<()> {
    let io_err = |p: &Path| {
        let p: PathBuf = p.to_path_buf();
        move |source| Error::Io { path: p, source }
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let permissions = fs::metadata(path).map_err(io_err(path))?.permissions();

    let mut tmp = tempfile::Builder::new()
        .prefix(".unglow-")
        .suffix(".png")
        .tempfile_in(dir)
        .map_err(io_err(dir))?;
    let tmp_path = tmp.path().to_path_buf();

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode_png(img, &mut writer, path)?;
        writer.flush().map_err(io_err(&tmp_path))?;
    }
    tmp.as_file().sync_all().map_err(io_err(&tmp_path))?;
    tmp.as_file()
        .set_permissions(permissions)
        .map_err(io_err(&tmp_path))?;

    tmp.persist(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Encode `img` as an RGBA PNG into `writer`. `path` only labels the error.
fn encode_png<W: Write>(img: &RgbaImage, writer: W, path: &Path) -> Result<()> {
    PngEncoder::new(writer)
        .write_image(img.as_raw(), img.width(), img.height(), ColorType::Rgba8)
        .map_err(|source| Error::Encode {
            path: path.to_path_buf(),
            source,
        })
}
