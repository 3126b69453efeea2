//! Per-screen view state: forms and their focus handling.

pub mod forms;

pub use forms::{
    CommentForm, ComposeField, ComposeForm, LoginField, LoginForm, ProfileField, ProfileForm,
    RegisterField, RegisterForm, ResetForm, ResetPasswordField,
};
