/// Draft copies of entities while they are being edited.
///
/// A draft is a plain mutable copy, patched field-by-field with the same
/// patch structs the mutation protocol uses. Nothing here is validated; that
/// happens once, at commit.
use crate::mutation::{AudioPatch, ContentPatch, DocumentPatch, SectionPatch};
use crate::page::{AssetKind, AssetReference, Audio, ContentBlock, Document, Section};

#[derive(Debug, Clone, PartialEq)]
pub enum Draft {
    Section(SectionDraft),
    Document(DocumentDraft),
    Audio(AudioDraft),
    Content(ContentDraft),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionDraft {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentDraft {
    pub title: String,
    pub date: String,
    pub year: String,
    pub asset: AssetReference,
    /// Upload-vs-URL toggle: when set, the operator pastes a URL instead of
    /// uploading a file.
    pub manual_url: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioDraft {
    pub name: String,
    pub year: String,
    pub audio: AssetReference,
    pub transcript: AssetReference,
    pub manual_url: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentDraft {
    pub title: String,
    pub body: String,
}

/// Which asset slot of a draft an ingestion targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetField {
    /// The document file or the audio recording.
    Primary,
    /// The audio transcript PDF.
    Transcript,
}

/// Patch passed to `update()`; the variant must match the active draft.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftPatch {
    Section(SectionPatch),
    Document(DocumentPatch),
    Audio(AudioPatch),
    Content(ContentPatch),
}

impl Draft {
    pub fn from_section(section: &Section) -> Self {
        Draft::Section(SectionDraft {
            title: section.title.clone(),
        })
    }

    pub fn from_document(document: &Document) -> Self {
        Draft::Document(DocumentDraft {
            title: document.title.clone(),
            date: document.date.clone(),
            year: document.year.clone(),
            asset: document.asset.clone(),
            manual_url: matches!(document.asset, AssetReference::ExternalUrl(_)),
        })
    }

    pub fn from_audio(audio: &Audio) -> Self {
        Draft::Audio(AudioDraft {
            name: audio.name.clone(),
            year: audio.year.clone(),
            audio: audio.audio.clone(),
            transcript: audio.transcript.clone(),
            manual_url: matches!(audio.audio, AssetReference::ExternalUrl(_)),
        })
    }

    pub fn from_content(content: &ContentBlock) -> Self {
        Draft::Content(ContentDraft {
            title: content.title.clone(),
            body: content.body.clone(),
        })
    }

    /// Merge a patch; a mismatched variant is ignored and reported `false`.
    pub fn merge(&mut self, patch: &DraftPatch) -> bool {
        match (self, patch) {
            (Draft::Section(draft), DraftPatch::Section(patch)) => {
                if let Some(title) = &patch.title {
                    draft.title = title.clone();
                }
                true
            }
            (Draft::Document(draft), DraftPatch::Document(patch)) => {
                if let Some(title) = &patch.title {
                    draft.title = title.clone();
                }
                if let Some(date) = &patch.date {
                    draft.date = date.clone();
                }
                if let Some(year) = &patch.year {
                    draft.year = year.clone();
                }
                if let Some(asset) = &patch.asset {
                    draft.asset = asset.clone();
                }
                true
            }
            (Draft::Audio(draft), DraftPatch::Audio(patch)) => {
                if let Some(name) = &patch.name {
                    draft.name = name.clone();
                }
                if let Some(year) = &patch.year {
                    draft.year = year.clone();
                }
                if let Some(audio) = &patch.audio {
                    draft.audio = audio.clone();
                }
                if let Some(transcript) = &patch.transcript {
                    draft.transcript = transcript.clone();
                }
                true
            }
            (Draft::Content(draft), DraftPatch::Content(patch)) => {
                if let Some(title) = &patch.title {
                    draft.title = title.clone();
                }
                if let Some(body) = &patch.body {
                    draft.body = body.clone();
                }
                true
            }
            _ => false,
        }
    }

    /// The asset slot for a field, if this draft type has one.
    pub fn asset_slot(&self, field: AssetField) -> Option<&AssetReference> {
        match (self, field) {
            (Draft::Document(draft), AssetField::Primary) => Some(&draft.asset),
            (Draft::Audio(draft), AssetField::Primary) => Some(&draft.audio),
            (Draft::Audio(draft), AssetField::Transcript) => Some(&draft.transcript),
            _ => None,
        }
    }

    pub fn asset_slot_mut(&mut self, field: AssetField) -> Option<&mut AssetReference> {
        match (self, field) {
            (Draft::Document(draft), AssetField::Primary) => Some(&mut draft.asset),
            (Draft::Audio(draft), AssetField::Primary) => Some(&mut draft.audio),
            (Draft::Audio(draft), AssetField::Transcript) => Some(&mut draft.transcript),
            _ => None,
        }
    }

    /// Upload kind for a field: document files and transcripts are PDFs,
    /// audio recordings are audio.
    pub fn asset_kind(&self, field: AssetField) -> Option<AssetKind> {
        match (self, field) {
            (Draft::Document(_), AssetField::Primary) => Some(AssetKind::Pdf),
            (Draft::Audio(_), AssetField::Primary) => Some(AssetKind::Audio),
            (Draft::Audio(_), AssetField::Transcript) => Some(AssetKind::Pdf),
            _ => None,
        }
    }

    pub fn has_pending_asset(&self) -> bool {
        match self {
            Draft::Document(draft) => draft.asset.is_pending(),
            Draft::Audio(draft) => draft.audio.is_pending() || draft.transcript.is_pending(),
            Draft::Section(_) | Draft::Content(_) => false,
        }
    }

    pub fn set_manual_url(&mut self, manual: bool) {
        match self {
            Draft::Document(draft) => draft.manual_url = manual,
            Draft::Audio(draft) => draft.manual_url = manual,
            Draft::Section(_) | Draft::Content(_) => {}
        }
    }
}
