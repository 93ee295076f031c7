//! Matrix math for the cube transform.
//!
//! Conventions:
//! - left-handed view space, +Z into the screen
//! - row vectors (`v' = v * M`), so transforms compose left to right
//! - `Mat4` is row-major; `Mij` in docs is row `i`, column `j`, 1-based

mod mat4;
mod perspective;
mod vec3;

pub use mat4::Mat4;
pub use perspective::{perspective_fov, DepthConvention};
pub use vec3::Vec3;
