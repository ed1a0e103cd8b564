//! Single-focus editing session over the content store.
//!
//! At most one entity is being added or edited at a time. The session holds
//! the draft, is the only component that starts asset ingestion, and commits
//! drafts through the mutation protocol. Ingestion runs on spawned tasks and
//! reports back over a channel; results for a context that is no longer
//! active are dropped, so a stale response can never corrupt a newer edit.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::events::StudioEvent;
use crate::ingest::{check_upload, AssetIngestor, IngestError};
use crate::mutation::{
    AudioPatch, ContentPatch, DocumentPatch, PageMutation, SectionPatch, TreeError,
};
use crate::page::validate::{
    validate_audio, validate_content, validate_document, validate_section, ValidationError,
};
use crate::page::{
    AssetReference, Audio, AudioId, ContentBlock, ContentId, Document, DocumentId, FileUpload,
    Page, SectionId,
};
use crate::store::ContentStore;

use super::draft::{AssetField, Draft, DraftPatch};

/// What an edit session is pointed at: an existing entity by id, or a fresh
/// one under a parent section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    NewSection,
    Section(SectionId),
    NewDocument { section: SectionId },
    Document { section: SectionId, document: DocumentId },
    NewAudio { section: SectionId },
    Audio { section: SectionId, audio: AudioId },
    NewContent { section: SectionId },
    Content { section: SectionId, content: ContentId },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditError {
    #[error("no entity at the requested address")]
    NotFound,
    #[error("another edit is already in progress")]
    EditInProgress,
    #[error("no edit is in progress")]
    NoActiveEdit,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
}

#[derive(Debug)]
struct ActiveEdit {
    target: EditTarget,
    draft: Draft,
    /// Identifies this begin/commit cycle; ingestion outcomes carrying a
    /// different context id are stale and get dropped.
    context: Uuid,
}

#[derive(Debug, Clone)]
enum IngestOp {
    Upload,
    Localize { original_url: String },
}

#[derive(Debug)]
struct IngestOutcome {
    context: Uuid,
    ticket: Uuid,
    field: AssetField,
    op: IngestOp,
    result: Result<String, IngestError>,
}

pub struct EditorSession {
    store: ContentStore,
    ingestor: Arc<dyn AssetIngestor>,
    active: Option<ActiveEdit>,
    last_ingest_error: Option<IngestError>,
    outcome_tx: mpsc::UnboundedSender<IngestOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<IngestOutcome>,
}

impl EditorSession {
    pub fn new(store: ContentStore, ingestor: Arc<dyn AssetIngestor>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            store,
            ingestor,
            active: None,
            last_ingest_error: None,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Mutable store access for the persistence coordinator's post-save
    /// reconciliation. Nothing else should write through this.
    pub fn store_mut(&mut self) -> &mut ContentStore {
        &mut self.store
    }

    pub fn page(&self) -> &Page {
        self.store.page()
    }

    pub fn is_editing(&self) -> bool {
        self.active.is_some()
    }

    pub fn draft(&self) -> Option<&Draft> {
        self.active.as_ref().map(|active| &active.draft)
    }

    /// Start editing. Copies the target into a draft, or seeds an empty
    /// draft for a `New*` target after checking the parent exists.
    pub fn begin(&mut self, target: EditTarget) -> Result<(), EditError> {
        if self.active.is_some() {
            return Err(EditError::EditInProgress);
        }

        let page = self.store.page();
        let draft = match target {
            EditTarget::NewSection => Draft::Section(Default::default()),
            EditTarget::Section(id) => {
                Draft::from_section(page.sections.get(id).ok_or(EditError::NotFound)?)
            }
            EditTarget::NewDocument { section } => {
                Self::require_section(page, section)?;
                Draft::Document(Default::default())
            }
            EditTarget::Document { section, document } => Draft::from_document(
                Self::require_section(page, section)?
                    .documents
                    .get(document)
                    .ok_or(EditError::NotFound)?,
            ),
            EditTarget::NewAudio { section } => {
                Self::require_section(page, section)?;
                Draft::Audio(Default::default())
            }
            EditTarget::Audio { section, audio } => Draft::from_audio(
                Self::require_section(page, section)?
                    .audios
                    .get(audio)
                    .ok_or(EditError::NotFound)?,
            ),
            EditTarget::NewContent { section } => {
                Self::require_section(page, section)?;
                Draft::Content(Default::default())
            }
            EditTarget::Content { section, content } => Draft::from_content(
                Self::require_section(page, section)?
                    .contents
                    .get(content)
                    .ok_or(EditError::NotFound)?,
            ),
        };

        self.active = Some(ActiveEdit {
            target,
            draft,
            context: Uuid::new_v4(),
        });
        Ok(())
    }

    /// Merge a partial patch into the draft. No validation happens here.
    pub fn update(&mut self, patch: &DraftPatch) -> Result<(), EditError> {
        let active = self.active.as_mut().ok_or(EditError::NoActiveEdit)?;
        if !active.draft.merge(patch) {
            return Err(EditError::NotFound);
        }
        Ok(())
    }

    /// Flip the upload-vs-URL toggle on the draft.
    pub fn set_manual_url(&mut self, manual: bool) -> Result<(), EditError> {
        let active = self.active.as_mut().ok_or(EditError::NoActiveEdit)?;
        active.draft.set_manual_url(manual);
        Ok(())
    }

    /// Validate a file and start uploading it into the draft's asset slot.
    /// Rejected files (`InvalidFileType`, `FileTooLarge`) never reach the
    /// network and leave the slot at its prior value.
    pub fn upload_file(&mut self, field: AssetField, file: FileUpload) -> Result<(), EditError> {
        let subfolder = self.store.page().slug.clone();
        let active = self.active.as_mut().ok_or(EditError::NoActiveEdit)?;
        let kind = active.draft.asset_kind(field).ok_or(EditError::NotFound)?;
        check_upload(kind, &file)?;

        let ticket = Uuid::new_v4();
        let slot = active
            .draft
            .asset_slot_mut(field)
            .ok_or(EditError::NotFound)?;
        *slot = AssetReference::Pending(ticket);

        let context = active.context;
        let ingestor = Arc::clone(&self.ingestor);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = ingestor.upload(kind, &subfolder, file).await;
            let _ = tx.send(IngestOutcome {
                context,
                ticket,
                field,
                op: IngestOp::Upload,
                result,
            });
        });
        Ok(())
    }

    /// Resolve a pasted URL into the draft's asset slot. Empty input clears
    /// the slot; a local path is stored as-is; an external http(s) URL is
    /// handed to the backend for fetch-and-localize and resolves later.
    pub fn ingest_url(&mut self, field: AssetField, url: &str) -> Result<(), EditError> {
        let subfolder = self.store.page().slug.clone();
        let active = self.active.as_mut().ok_or(EditError::NoActiveEdit)?;
        let kind = active.draft.asset_kind(field).ok_or(EditError::NotFound)?;

        let url = url.trim().to_string();
        let reference = AssetReference::from_wire(&url);
        match reference {
            AssetReference::Empty | AssetReference::LocalPath(_) => {
                let slot = active
                    .draft
                    .asset_slot_mut(field)
                    .ok_or(EditError::NotFound)?;
                *slot = reference;
                return Ok(());
            }
            AssetReference::ExternalUrl(_) | AssetReference::Pending(_) => {}
        }

        let ticket = Uuid::new_v4();
        let slot = active
            .draft
            .asset_slot_mut(field)
            .ok_or(EditError::NotFound)?;
        *slot = AssetReference::Pending(ticket);

        let context = active.context;
        let ingestor = Arc::clone(&self.ingestor);
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = ingestor.localize_url(kind, &subfolder, &url).await;
            let _ = tx.send(IngestOutcome {
                context,
                ticket,
                field,
                op: IngestOp::Localize { original_url: url },
                result,
            });
        });
        Ok(())
    }

    /// Fold any finished ingestion outcomes into the draft without blocking.
    pub fn pump(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    /// The one error slot: the most recent ingestion failure, if unread.
    pub fn take_ingest_error(&mut self) -> Option<IngestError> {
        self.last_ingest_error.take()
    }

    /// Validate the draft and write it into the content store.
    ///
    /// If an ingestion is still in flight for this draft, commit waits for
    /// it first — validation never observes a `Pending` reference that is
    /// about to resolve. On validation failure the draft stays active so the
    /// operator can correct it.
    pub async fn commit(&mut self) -> Result<(), EditError> {
        if self.active.is_none() {
            return Err(EditError::NoActiveEdit);
        }

        while self
            .active
            .as_ref()
            .is_some_and(|active| active.draft.has_pending_asset())
        {
            match self.outcome_rx.recv().await {
                Some(outcome) => self.apply_outcome(outcome),
                None => break,
            }
        }

        let mutation = {
            let active = self.active.as_ref().ok_or(EditError::NoActiveEdit)?;
            build_mutation(self.store.page(), active)?
        };
        self.store.apply(&mutation)?;
        self.active = None;
        Ok(())
    }

    /// Drop the draft unconditionally. In-flight ingestion is not cancelled;
    /// its eventual outcome fails the context check and is discarded.
    pub fn discard(&mut self) {
        if self.active.take().is_some() {
            self.store.events().publish(StudioEvent::EditDiscarded);
        }
    }

    fn apply_outcome(&mut self, outcome: IngestOutcome) {
        let Some(active) = self.active.as_mut() else {
            tracing::debug!(ticket = %outcome.ticket, "dropping ingestion result: no active edit");
            return;
        };
        if active.context != outcome.context {
            tracing::debug!(
                ticket = %outcome.ticket,
                "dropping ingestion result for a superseded edit context"
            );
            return;
        }
        let Some(slot) = active.draft.asset_slot_mut(outcome.field) else {
            return;
        };
        // The slot must still be waiting on this exact ticket; the operator
        // may have re-ingested or cleared the field in the meantime.
        if *slot != AssetReference::Pending(outcome.ticket) {
            tracing::debug!(ticket = %outcome.ticket, "dropping ingestion result for a replaced slot");
            return;
        }

        match outcome.result {
            Ok(path) => {
                *slot = AssetReference::LocalPath(path);
                self.store.events().publish(StudioEvent::AssetResolved {
                    correlation: outcome.ticket,
                });
            }
            Err(err) => {
                match outcome.op {
                    IngestOp::Upload => {
                        *slot = AssetReference::Empty;
                    }
                    // Degraded but usable: keep the raw external link.
                    IngestOp::Localize { original_url } => {
                        *slot = AssetReference::ExternalUrl(original_url);
                    }
                }
                tracing::warn!(error = %err, "asset ingestion failed");
                self.last_ingest_error = Some(err);
            }
        }
    }

    fn require_section(page: &Page, id: SectionId) -> Result<&crate::page::Section, EditError> {
        page.sections.get(id).ok_or(EditError::NotFound)
    }
}

/// Validate the draft against the current page and produce the structural
/// mutation that commits it.
fn build_mutation(page: &Page, active: &ActiveEdit) -> Result<PageMutation, EditError> {
    let has_year_filter = page.flags.has_year_filter;
    match (&active.target, &active.draft) {
        (EditTarget::NewSection, Draft::Section(draft)) => {
            let siblings: Vec<&str> = page.sections.values().map(|s| s.title.as_str()).collect();
            validate_section(&draft.title, siblings)?;
            Ok(PageMutation::AddSection {
                title: draft.title.trim().to_string(),
            })
        }
        (EditTarget::Section(id), Draft::Section(draft)) => {
            let siblings: Vec<&str> = page
                .sections
                .iter()
                .filter(|(other, _)| *other != *id)
                .map(|(_, s)| s.title.as_str())
                .collect();
            validate_section(&draft.title, siblings)?;
            Ok(PageMutation::UpdateSection {
                section: *id,
                patch: SectionPatch {
                    title: Some(draft.title.trim().to_string()),
                },
            })
        }

        (EditTarget::NewDocument { section }, Draft::Document(draft)) => {
            validate_document(&draft.title, &draft.asset, &draft.year, has_year_filter)?;
            warn_unlisted_year(page, &draft.year);
            Ok(PageMutation::AddDocument {
                section: *section,
                document: Document::new(
                    draft.title.clone(),
                    draft.date.clone(),
                    draft.year.clone(),
                    draft.asset.clone(),
                ),
            })
        }
        (EditTarget::Document { section, document }, Draft::Document(draft)) => {
            validate_document(&draft.title, &draft.asset, &draft.year, has_year_filter)?;
            warn_unlisted_year(page, &draft.year);
            Ok(PageMutation::UpdateDocument {
                section: *section,
                document: *document,
                patch: DocumentPatch {
                    title: Some(draft.title.clone()),
                    date: Some(draft.date.clone()),
                    year: Some(draft.year.clone()),
                    asset: Some(draft.asset.clone()),
                },
            })
        }

        (EditTarget::NewAudio { section }, Draft::Audio(draft)) => {
            validate_audio(
                &draft.name,
                &draft.audio,
                &draft.transcript,
                &draft.year,
                has_year_filter,
            )?;
            warn_unlisted_year(page, &draft.year);
            Ok(PageMutation::AddAudio {
                section: *section,
                audio: Audio::new(
                    draft.name.clone(),
                    draft.year.clone(),
                    draft.audio.clone(),
                    draft.transcript.clone(),
                ),
            })
        }
        (EditTarget::Audio { section, audio }, Draft::Audio(draft)) => {
            validate_audio(
                &draft.name,
                &draft.audio,
                &draft.transcript,
                &draft.year,
                has_year_filter,
            )?;
            warn_unlisted_year(page, &draft.year);
            Ok(PageMutation::UpdateAudio {
                section: *section,
                audio: *audio,
                patch: AudioPatch {
                    name: Some(draft.name.clone()),
                    year: Some(draft.year.clone()),
                    audio: Some(draft.audio.clone()),
                    transcript: Some(draft.transcript.clone()),
                },
            })
        }

        (EditTarget::NewContent { section }, Draft::Content(draft)) => {
            validate_content(&draft.body)?;
            Ok(PageMutation::AddContent {
                section: *section,
                content: ContentBlock::new(draft.title.clone(), draft.body.clone()),
            })
        }
        (EditTarget::Content { section, content }, Draft::Content(draft)) => {
            validate_content(&draft.body)?;
            Ok(PageMutation::UpdateContent {
                section: *section,
                content: *content,
                patch: ContentPatch {
                    title: Some(draft.title.clone()),
                    body: Some(draft.body.clone()),
                },
            })
        }

        // begin() pairs target and draft; a mismatch here is a bug.
        _ => Err(EditError::NotFound),
    }
}

/// The year filter does not enforce referential integrity; committing a year
/// that is missing from the dropdown silently hides the item on the public
/// page, which is worth a log line.
fn warn_unlisted_year(page: &Page, year: &str) {
    if page.flags.has_year_filter
        && !year.trim().is_empty()
        && !page.filter_items.iter().any(|item| item == year)
    {
        tracing::warn!(year, slug = %page.slug, "committed year is not in the filter list");
    }
}
