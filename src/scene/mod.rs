//! Interactive scene state
//!
//! - [`SceneIndex`]: surface id / render handle lookups and space membership
//! - [`Renderer`] and [`TextLoader`]: the collaborators a host provides
//! - [`SceneSession`]: loads, space filters, picking and the frame tick

mod index;
mod loader;
mod render;
mod session;

pub use index::SceneIndex;
pub use loader::{FsLoader, TextLoader};
pub use render::{RenderHandle, Renderer, SurfaceMetadata};
pub use session::{LoadOutcome, LoadSummary, LoadTicket, SceneSession};
