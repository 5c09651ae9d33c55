//! Waveform file I/O
//!
//! Waveforms are stored as NumPy `.npy` arrays. The sample rate is not part
//! of the file.

mod npy;

pub use npy::{encode_npy, parse_npy, read_waveform, write_waveform, NpyError};
