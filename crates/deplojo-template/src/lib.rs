//! # deplojo-template
//!
//! Task definition templates.
//!
//! Handles:
//! - **Loader**: Reading and parsing JSON template files.
//! - **Placeholder**: Lexing `${name}` placeholders out of string values.
//! - **Renderer**: Substituting placeholders across a whole document tree.

pub mod loader;
pub mod placeholder;
pub mod renderer;

pub use loader::load_template;
pub use renderer::{placeholders, render, render_str};
