//! Owner of the canonical in-memory page tree.
//!
//! Only two writers exist by design: the editing session's `commit()` and the
//! persistence coordinator's post-save reconciliation. Everything else reads.

use chrono::Utc;

use crate::events::{EventBus, MutationNotice, StudioEvent};
use crate::mutation::{apply, PageMutation, TreeError};
use crate::page::Page;

#[derive(Debug, Clone)]
pub struct ContentStore {
    page: Page,
    events: EventBus,
}

impl ContentStore {
    pub fn new(page: Page, events: EventBus) -> Self {
        Self { page, events }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Apply one structural mutation; on success the canonical tree is
    /// swapped and subscribers are notified. On failure nothing changes.
    pub fn apply(&mut self, mutation: &PageMutation) -> Result<(), TreeError> {
        let next = apply(&self.page, mutation)?;
        self.page = next;
        self.events.publish(StudioEvent::Mutated(MutationNotice {
            slug: self.page.slug.clone(),
            operation: mutation.kind().to_string(),
            timestamp: Utc::now(),
        }));
        Ok(())
    }

    /// Replace the whole tree with the server's authoritative state after a
    /// load or save. Bypasses the mutation protocol on purpose.
    pub fn replace(&mut self, page: Page) {
        self.page = page;
    }
}
