/// Structural mutation protocol for the page tree.
///
/// Every operation addresses entities by stable id; filter items, which are
/// plain strings with no identity, are the one place positional indices
/// remain. Patches carry `Option` fields — `None` leaves a field alone.
use crate::page::{
    AssetReference, Audio, AudioId, ContentBlock, ContentId, Document, DocumentId, SectionId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum PageMutation {
    AddSection {
        title: String,
    },
    UpdateSection {
        section: SectionId,
        patch: SectionPatch,
    },
    RemoveSection {
        section: SectionId,
    },

    AddDocument {
        section: SectionId,
        document: Document,
    },
    UpdateDocument {
        section: SectionId,
        document: DocumentId,
        patch: DocumentPatch,
    },
    RemoveDocument {
        section: SectionId,
        document: DocumentId,
    },

    AddAudio {
        section: SectionId,
        audio: Audio,
    },
    UpdateAudio {
        section: SectionId,
        audio: AudioId,
        patch: AudioPatch,
    },
    RemoveAudio {
        section: SectionId,
        audio: AudioId,
    },

    AddContent {
        section: SectionId,
        content: ContentBlock,
    },
    UpdateContent {
        section: SectionId,
        content: ContentId,
        patch: ContentPatch,
    },
    RemoveContent {
        section: SectionId,
        content: ContentId,
    },

    AddFilterItem {
        value: String,
    },
    UpdateFilterItem {
        index: usize,
        value: String,
    },
    RemoveFilterItem {
        index: usize,
    },
}

impl PageMutation {
    /// Operation name for event payloads and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PageMutation::AddSection { .. } => "addSection",
            PageMutation::UpdateSection { .. } => "updateSection",
            PageMutation::RemoveSection { .. } => "removeSection",
            PageMutation::AddDocument { .. } => "addDocument",
            PageMutation::UpdateDocument { .. } => "updateDocument",
            PageMutation::RemoveDocument { .. } => "removeDocument",
            PageMutation::AddAudio { .. } => "addAudio",
            PageMutation::UpdateAudio { .. } => "updateAudio",
            PageMutation::RemoveAudio { .. } => "removeAudio",
            PageMutation::AddContent { .. } => "addContent",
            PageMutation::UpdateContent { .. } => "updateContent",
            PageMutation::RemoveContent { .. } => "removeContent",
            PageMutation::AddFilterItem { .. } => "addFilterItem",
            PageMutation::UpdateFilterItem { .. } => "updateFilterItem",
            PageMutation::RemoveFilterItem { .. } => "removeFilterItem",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionPatch {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub date: Option<String>,
    pub year: Option<String>,
    pub asset: Option<AssetReference>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioPatch {
    pub name: Option<String>,
    pub year: Option<String>,
    pub audio: Option<AssetReference>,
    pub transcript: Option<AssetReference>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub body: Option<String>,
}
