//! NumPy `.npy` reader and writer for 1-D float arrays
//!
//! Layout:
//! - magic `\x93NUMPY`, major and minor version bytes
//! - header length: u16 LE (v1) or u32 LE (v2, v3)
//! - ASCII dict header, e.g. `{'descr': '<f8', 'fortran_order': False, 'shape': (2048,), }`
//! - raw sample data
//!
//! Only float32/float64 in either byte order are accepted.

use binrw::{binrw, BinRead, BinWrite, Endian, VecArgs};
use std::fs;
use std::io::{Cursor, Seek};
use std::path::Path;
use thiserror::Error;

/// Preamble plus header must be a multiple of this many bytes
const HEADER_ALIGN: usize = 64;
/// magic (6) + version (2) + v1 length (2)
const V1_PREAMBLE_LEN: usize = 10;

#[derive(Error, Debug)]
pub enum NpyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a .npy file: {0}")]
    Format(#[from] binrw::Error),

    #[error("malformed .npy header: {0}")]
    Header(String),

    #[error("unsupported dtype {0:?} (expected float32 or float64)")]
    UnsupportedDtype(String),

    #[error("unsupported shape {0:?} (expected a 1-D array)")]
    UnsupportedShape(Vec<usize>),

    #[error("array data truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },
}

#[binrw]
#[brw(little, magic = b"\x93NUMPY")]
#[derive(Debug, Clone, PartialEq)]
struct Preamble {
    major: u8,
    minor: u8,

    #[br(if(major == 1))]
    short_len: Option<u16>,

    #[br(if(major != 1))]
    long_len: Option<u32>,

    #[br(count = short_len.map(u32::from).or(long_len).unwrap_or(0))]
    header: Vec<u8>,
}

/// Parsed header dict
#[derive(Debug, Clone, PartialEq)]
struct Header {
    endian: Endian,
    width: usize,
    shape: Vec<usize>,
}

impl Header {
    fn parse(text: &str) -> Result<Self, NpyError> {
        let descr = quoted(field(text, "descr")?)?;
        let (endian, width) = parse_descr(descr)?;

        let fortran = field(text, "fortran_order")?;
        if !(fortran.starts_with("False") || fortran.starts_with("True")) {
            return Err(NpyError::Header(format!(
                "fortran_order is not a boolean: {:?}",
                text
            )));
        }

        let shape = parse_shape(field(text, "shape")?)?;

        Ok(Self {
            endian,
            width,
            shape,
        })
    }
}

/// Text immediately following `'key':` in the header dict
fn field<'a>(text: &'a str, key: &str) -> Result<&'a str, NpyError> {
    let pattern = format!("'{}'", key);
    let start = text
        .find(&pattern)
        .ok_or_else(|| NpyError::Header(format!("missing key {:?}", key)))?;
    let rest = text[start + pattern.len()..].trim_start();
    let rest = rest
        .strip_prefix(':')
        .ok_or_else(|| NpyError::Header(format!("no value for key {:?}", key)))?;
    Ok(rest.trim_start())
}

fn quoted(value: &str) -> Result<&str, NpyError> {
    let quote = value
        .chars()
        .next()
        .filter(|c| *c == '\'' || *c == '"')
        .ok_or_else(|| NpyError::Header(format!("expected a string, found {:?}", value)))?;
    let inner = &value[1..];
    let end = inner
        .find(quote)
        .ok_or_else(|| NpyError::Header("unterminated string".to_string()))?;
    Ok(&inner[..end])
}

fn parse_descr(descr: &str) -> Result<(Endian, usize), NpyError> {
    let unsupported = || NpyError::UnsupportedDtype(descr.to_string());

    let mut chars = descr.chars();
    let endian = match chars.next() {
        Some('<') => Endian::Little,
        Some('>') => Endian::Big,
        Some('=') => Endian::NATIVE,
        _ => return Err(unsupported()),
    };
    let width = match chars.as_str() {
        "f4" => 4,
        "f8" => 8,
        _ => return Err(unsupported()),
    };
    Ok((endian, width))
}

fn parse_shape(value: &str) -> Result<Vec<usize>, NpyError> {
    let body = value
        .strip_prefix('(')
        .and_then(|v| v.find(')').map(|end| &v[..end]))
        .ok_or_else(|| NpyError::Header(format!("shape is not a tuple: {:?}", value)))?;

    body.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.trim_end_matches('L')
                .parse::<usize>()
                .map_err(|_| NpyError::Header(format!("bad shape entry {:?}", s)))
        })
        .collect()
}

/// Decode a `.npy` byte buffer into samples
pub fn parse_npy(bytes: &[u8]) -> Result<Vec<f64>, NpyError> {
    let mut cursor = Cursor::new(bytes);
    let preamble = Preamble::read(&mut cursor)?;

    if !(1..=3).contains(&preamble.major) {
        return Err(NpyError::Header(format!(
            "unsupported format version {}.{}",
            preamble.major, preamble.minor
        )));
    }

    let text = std::str::from_utf8(&preamble.header)
        .map_err(|e| NpyError::Header(e.to_string()))?;
    let header = Header::parse(text)?;

    let count = match header.shape.as_slice() {
        [n] => *n,
        other => return Err(NpyError::UnsupportedShape(other.to_vec())),
    };

    let offset = cursor.stream_position()? as usize;
    let available = bytes.len().saturating_sub(offset);
    let expected = count.checked_mul(header.width).ok_or_else(|| {
        NpyError::Header(format!("shape ({},) is too large", count))
    })?;
    if available < expected {
        return Err(NpyError::Truncated {
            expected,
            found: available,
        });
    }

    log::debug!(
        "npy v{}.{}: {} x f{} ({:?}), header {} bytes",
        preamble.major,
        preamble.minor,
        count,
        header.width * 8,
        header.endian,
        preamble.header.len()
    );

    let args = |count| VecArgs { count, inner: () };
    let samples = match header.width {
        4 => Vec::<f32>::read_options(&mut cursor, header.endian, args(count))?
            .into_iter()
            .map(f64::from)
            .collect(),
        _ => Vec::<f64>::read_options(&mut cursor, header.endian, args(count))?,
    };

    Ok(samples)
}

/// Encode samples as a version 1.0, little-endian float64 `.npy` buffer
pub fn encode_npy(samples: &[f64]) -> Result<Vec<u8>, NpyError> {
    let mut header = format!(
        "{{'descr': '<f8', 'fortran_order': False, 'shape': ({},), }}",
        samples.len()
    );
    // Pad with spaces so the data starts on an aligned offset; the newline is last
    let unpadded = V1_PREAMBLE_LEN + header.len() + 1;
    let padding = (HEADER_ALIGN - unpadded % HEADER_ALIGN) % HEADER_ALIGN;
    header.push_str(&" ".repeat(padding));
    header.push('\n');

    let header_len = u16::try_from(header.len())
        .map_err(|_| NpyError::Header("header too long for format 1.0".to_string()))?;

    let preamble = Preamble {
        major: 1,
        minor: 0,
        short_len: Some(header_len),
        long_len: None,
        header: header.into_bytes(),
    };

    let mut cursor = Cursor::new(Vec::with_capacity(
        V1_PREAMBLE_LEN + preamble.header.len() + samples.len() * 8,
    ));
    preamble.write(&mut cursor)?;
    for sample in samples {
        sample.write_le(&mut cursor)?;
    }

    Ok(cursor.into_inner())
}

/// Load a 1-D float array from a `.npy` file
pub fn read_waveform(path: &Path) -> Result<Vec<f64>, NpyError> {
    let bytes = fs::read(path)?;
    let samples = parse_npy(&bytes)?;
    log::debug!("Loaded {} samples from {:?}", samples.len(), path);
    Ok(samples)
}

/// Save samples to a `.npy` file (float64, little-endian)
pub fn write_waveform(path: &Path, samples: &[f64]) -> Result<(), NpyError> {
    let bytes = encode_npy(samples)?;
    fs::write(path, bytes)?;
    log::debug!("Saved {} samples to {:?}", samples.len(), path);
    Ok(())
}

/// Byte offset of the first sample in an encoded buffer
#[cfg(test)]
fn data_offset(bytes: &[u8]) -> usize {
    let mut cursor = Cursor::new(bytes);
    Preamble::read(&mut cursor).unwrap();
    cursor.stream_position().unwrap() as usize
}
