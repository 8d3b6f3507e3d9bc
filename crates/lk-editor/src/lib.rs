pub mod input;
pub mod interaction;
pub mod properties;
pub mod session;
pub mod shortcuts;

pub use input::{Buttons, InputEvent, PointerButton};
pub use interaction::{InteractionController, InteractionState};
pub use properties::{ImageController, ShapeController, TextController};
pub use session::EditorSession;
pub use shortcuts::{ShortcutAction, ShortcutMap};
