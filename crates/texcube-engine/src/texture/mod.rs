//! Image file to sampled GPU texture.
//!
//! Decoding and channel-order correction happen on the CPU in [`Bitmap`];
//! [`load_texture`] uploads the result as an sRGB RGBA8 texture.

mod bitmap;
mod loader;

pub use bitmap::{Bitmap, PixelLayout};
pub use loader::{create_texture, load_texture, LoadedTexture, TEXTURE_FORMAT};
