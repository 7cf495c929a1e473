//! gltihc generates "glitch" variants of raster images.
//!
//! Each run tiles the image into fixed-size blocks and repeats a randomized step: pick a
//! contiguous (optionally wrap-shifted) run of blocks, draw a chain of pixel filters, and blend
//! the chain's output back through a randomly chosen operation. The engine is a deterministic
//! function of the input raster, the [`GlitchOptions`] and the random source.
//!
//! - Decode into a [`PixelBuffer`] (or pass an `image::DynamicImage` to [`glitch_image`])
//! - Build a [`Glitcher`] from validated options
//! - Call [`Glitcher::apply`] with any [`rand::Rng`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod blend;
pub(crate) mod engine;
pub(crate) mod filters;
/// Output file name templates.
pub mod naming;
pub(crate) mod pixels;
/// Named allow-list presets.
pub mod presets;

pub use crate::foundation::color::{Rgba16, narrow16, rgb_to_ycbcr, widen8, ycbcr_to_rgb};
pub use crate::foundation::error::{GlitchError, GlitchResult};

pub use crate::blend::ops::{BlendOp, over};
pub use crate::engine::chain::{Chain, Stage, build_chain};
pub use crate::engine::glitcher::{CancelFlag, GlitchStats, Glitcher, glitch_image, seeded_rng};
pub use crate::engine::grid::{BlockGrid, Segment, select_segment};
pub use crate::engine::options::GlitchOptions;
pub use crate::filters::filter::{BitRasp, Filter, RaspBitOp, RaspMode, RgbaChannel, YccChannel};
pub use crate::filters::kind::FilterKind;
pub use crate::naming::{NameContext, OutputName};
pub use crate::pixels::buffer::{OutputFormat, PixelBuffer, PixelRect};
pub use crate::presets::Preset;
