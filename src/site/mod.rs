//! Collaborators around the engine: data and template loading, page
//! assembly, and output file handling.
mod assemble;
mod data;
pub mod fs;
mod templates;

pub use assemble::{assemble, find_markers};
pub use data::load_context;
pub use templates::TemplateStore;
