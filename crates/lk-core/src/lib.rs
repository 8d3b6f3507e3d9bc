pub mod assets;
pub mod config;
pub mod error;
pub mod geometry;
pub mod id;
pub mod layer;
pub mod model;
pub mod registry;
pub mod text;

pub use assets::load_image;
pub use config::EditorConfig;
pub use error::LoadError;
pub use geometry::{Anchor, near_border_or_handle, point_in_oriented_box};
pub use id::LayerId;
pub use layer::{Bounds, Layer};
pub use model::*;
pub use registry::{LayerMutation, LayerRegistry};
pub use text::{BlockRasterizer, TextRasterizer};

// Re-export the bitmap crate so downstream crates share one `RgbaImage`
pub use image;
