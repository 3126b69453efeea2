//! Reusable UI components.

pub mod dialog_frame;
pub mod input_field;

pub use dialog_frame::render_dialog_frame;
pub use input_field::{input_field_height, render_input_field, InputFieldConfig};
