pub mod analysis;
pub mod callbacks;
pub mod constants;
pub mod equalizer;
pub mod frame_loop;
pub mod intensity;
pub mod player;
pub mod scene;
pub mod settings;
pub mod smoothing;

pub use analysis::*;
pub use callbacks::*;
pub use constants::*;
pub use equalizer::*;
pub use frame_loop::*;
pub use intensity::*;
pub use player::*;
pub use scene::*;
pub use settings::*;
pub use smoothing::*;

// Shaders bundled as string constants; the noise library is prepended to the
// equalizer source at pipeline creation.
pub static NOISE_WGSL: &str = include_str!("../../shaders/noise.wgsl");
pub static EQUALIZER_WGSL: &str = include_str!("../../shaders/equalizer.wgsl");
