use std::ops::Range;

// Analysis and smoothing tuning shared by the audio and equalizer sides.

// Analyser window; the time-domain snapshot holds FFT_SIZE / 2 bytes
pub const FFT_SIZE: u32 = 64;
pub const ANALYSER_BINS: usize = (FFT_SIZE / 2) as usize;

// Byte windows averaged into the two intensity channels
pub const BASS_RANGE: Range<usize> = 20..30;
pub const HIGH_RANGE: Range<usize> = 2..10;

// Full-scale value of one analyser byte
pub const BYTE_FULL_SCALE: f32 = 255.0;

// Per-frame interpolation weights (not frame-time compensated)
pub const INTENSITY_LERP: f32 = 0.05;
pub const ACTIVE_LERP: f32 = 0.1;

// Shader time advance per render frame
pub const TIME_STEP: f32 = 0.002;
