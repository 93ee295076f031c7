//! Pipeline configuration for the textured cube.
//!
//! - `layout`: which shader variables are static/mutable, immutable samplers
//! - `shaders`: WGSL loading and naga validation
//! - `pso`: the render pipeline and its resource binding

mod layout;
mod pso;
mod shaders;

pub use layout::{
    ImmutableSampler, SamplerDesc, ShaderResourceLayout, ShaderStage, ShaderVariable, VariableType,
};
pub use pso::{CubePipeline, ResourceBinding};
pub use shaders::{ShaderSet, ShaderSource, ENTRY_POINT};
