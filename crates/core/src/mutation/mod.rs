pub mod apply;
pub mod types;

pub use apply::{apply, TreeError};
pub use types::{AudioPatch, ContentPatch, DocumentPatch, PageMutation, SectionPatch};
