use crate::core::constants::{BASS_RANGE, BYTE_FULL_SCALE, HIGH_RANGE};
use std::ops::Range;

/// Normalized energy of the two frequency sub-bands for one analysis tick.
///
/// Both channels are in the \[0, 1\] range. Samples are forwarded straight to
/// the equalizer and never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntensitySample {
    pub bass: f32,
    pub high: f32,
}

impl IntensitySample {
    pub const SILENT: IntensitySample = IntensitySample {
        bass: 0.0,
        high: 0.0,
    };

    /// Derive both channels from an analyser byte snapshot.
    pub fn from_time_domain(buffer: &[u8]) -> Self {
        Self {
            bass: band_intensity(buffer, BASS_RANGE),
            high: band_intensity(buffer, HIGH_RANGE),
        }
    }

    pub fn clamped(self) -> Self {
        Self {
            bass: self.bass.clamp(0.0, 1.0),
            high: self.high.clamp(0.0, 1.0),
        }
    }
}

/// Average of `buffer[range]` divided by the byte full scale.
///
/// The divisor is always the window length, so a buffer shorter than the
/// window reads its missing bytes as zero.
pub fn band_intensity(buffer: &[u8], range: Range<usize>) -> f32 {
    let width = range.len();
    if width == 0 {
        return 0.0;
    }
    let end = range.end.min(buffer.len());
    let start = range.start.min(end);
    let sum: u32 = buffer[start..end].iter().map(|&b| b as u32).sum();
    (sum as f32 / (width as f32 * BYTE_FULL_SCALE)).clamp(0.0, 1.0)
}

// Vertical scale of one debug bar
#[inline]
pub fn bar_scale(value: u8) -> f32 {
    value as f32 / BYTE_FULL_SCALE
}

#[inline]
pub fn bar_transform(value: u8) -> String {
    format!("scale(1, {})", bar_scale(value))
}
