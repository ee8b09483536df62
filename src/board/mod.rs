//! The interactive tactical-board surface: coordinate mapping, hit-testing,
//! gesture classification, and the interaction state machine that turns
//! pointer input into board mutations.

pub mod coords;
pub mod gesture;
pub mod hit;
pub mod intents;
pub mod interaction;
pub mod model;
pub mod render;
pub mod store;
pub mod timer;

pub use coords::{to_pixel, to_relative, PixelPoint, SurfaceSize};
pub use gesture::{Gesture, GestureClassifier, PointerKind, PressTarget};
pub use hit::hit_test;
pub use intents::BoardIntent;
pub use interaction::{BoardCtx, InteractionEngine};
pub use model::{BoardSnapshot, EntityClass, EntityRef, RelPoint};
pub use store::BoardStore;
