//! ximaging-effects - Artistic effects and procedural textures
//!
//! This crate provides:
//!
//! - **Relief lighting**: [`emboss`] and [`drop_light`] shade the image as a
//!   height field lit from a configurable direction
//! - **Jitter**: random local pixel displacement from a caller-supplied
//!   generator
//! - **Run length smoothing**: closing of short white gaps in binarized
//!   images, along rows or columns
//! - **Ordered dithering**: Grayscale8 to Binary1 with Bayer threshold
//!   matrices
//! - **Textures**: texture modulation and seeded Perlin noise generators
//!   (clouds, marble, wood, textile, labyrinth)
//!
//! # Example
//!
//! ```
//! use ximaging_core::{Image, PixelFormat};
//! use ximaging_effects::{CloudsTexture, TextureGenerator, apply_texture};
//!
//! let mut image = Image::new(64, 48, PixelFormat::Rgb24).unwrap();
//! let clouds = CloudsTexture::new(7).generate(64, 48).unwrap();
//! apply_texture(&mut image, &clouds, 128, 0.5).unwrap();
//! ```

pub mod dither;
mod error;
pub mod jitter;
pub mod light;
pub mod perlin;
pub mod rls;
pub mod texture;

pub use dither::{ThresholdMatrix, ordered_dithering};
pub use error::{EffectsError, EffectsResult};
pub use jitter::{JITTER_RADIUS_RANGE, jitter, jitter_seeded};
pub use light::{LightParams, drop_light, emboss};
pub use perlin::PerlinNoise;
pub use rls::{horizontal_run_length_smoothing, vertical_run_length_smoothing};
pub use texture::{
    CloudsTexture, LabyrinthTexture, MarbleTexture, TextileTexture, TextureGenerator,
    WoodTexture, apply_texture,
};
