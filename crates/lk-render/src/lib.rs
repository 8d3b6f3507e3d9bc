pub mod paint;
pub mod shapes;

pub use paint::{layer_transform, paint_layers, paint_selection};
pub use shapes::{KurboShapePainter, ShapePainter};
