pub mod arena;
pub mod asset;
pub mod id;
pub mod model;
pub mod validate;

pub use arena::OrderedArena;
pub use asset::{AssetKind, AssetReference, FileUpload};
pub use id::{AudioId, ContentId, DocumentId, SectionId};
pub use model::{Audio, ContentBlock, Document, Page, PageFlags, Section};
