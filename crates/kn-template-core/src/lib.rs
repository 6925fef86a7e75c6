//! Core library for the kn-template toolkit.
//!
//! Renders knowledge-network document templates: [`placeholder::extract_placeholders`]
//! finds `{{ name }}` tokens and [`renderer::render_template`] substitutes typed
//! [`value::ScalarValue`]s into them, sanitizing string values on the way in.
//! Both are pure and never fail.
//!
//! Around that core sit an explicitly constructed [`registry::TemplateRegistry`],
//! the [`store::TemplateStore`] trait it loads from, and JSON configuration.

pub mod config;
pub mod error;
pub mod placeholder;
pub mod registry;
pub mod renderer;
pub mod sanitize;
pub mod store;
pub mod value;

pub use placeholder::extract_placeholders;
pub use renderer::render_template;
pub use value::{ScalarValue, Values};
