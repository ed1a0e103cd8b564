pub mod draft;
pub mod session;

pub use draft::{AssetField, AudioDraft, ContentDraft, Draft, DraftPatch, DocumentDraft, SectionDraft};
pub use session::{EditError, EditTarget, EditorSession};
