//! Config editor

pub mod state;

pub use state::{EditorState, Outcome, Projection, Status, StatusLevel};
