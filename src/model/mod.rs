//! Data structures representing parsed buildings and their meshes

mod building;
mod config;
mod mesh;

pub use building::{Building, Surface, SurfaceType, Vertex};
pub use config::{DEFAULT_DISTANCE_FACTOR, ParserConfig, SceneConfig};
pub use mesh::{MeshDescriptor, Rgb, rgb_to_f32};
