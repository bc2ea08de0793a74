#![warn(clippy::all, rust_2018_idioms)]

pub mod adjustment;
pub mod app;
pub mod editor;
pub mod error;
pub mod filters;
pub mod viewport;

pub use adjustment::{Adjustment, AdjustmentState};
pub use app::PhotoEditor;
pub use editor::Editor;
pub use error::{LoadError, SaveError};
pub use filters::RotateDirection;
