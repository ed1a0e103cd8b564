//! Load/save coordination between the backend and the content store.
//!
//! `load` tolerates a missing page (fresh default), `save` is
//! create-or-update on the presence of a backend id and re-loads the
//! authoritative state afterwards. Nothing here mutates the store until the
//! backend has accepted the save.

use content_studio_core::events::{EventBus, StudioEvent};
use content_studio_core::normalize::normalize;
use content_studio_core::page::Page;
use content_studio_core::store::ContentStore;
use content_studio_core::wire::to_wire;

use crate::api::ApiClient;
use crate::error::PersistError;

#[derive(Debug, Clone)]
pub struct PersistenceCoordinator {
    api: ApiClient,
    events: EventBus,
}

impl PersistenceCoordinator {
    pub fn new(api: ApiClient, events: EventBus) -> Self {
        Self { api, events }
    }

    /// Fetch and normalize the page for a slug. A slug with no backend
    /// record yields a fresh default page; that is how new pages start.
    pub async fn load(&self, slug: &str) -> Result<Page, PersistError> {
        let page = self.fetch(slug).await?;
        self.events.publish(StudioEvent::Loaded {
            slug: slug.to_string(),
        });
        Ok(page)
    }

    /// Serialize the store's page, create or update it, then re-load the
    /// authoritative post-save state into the store. On any failure the
    /// store is left exactly as it was.
    pub async fn save(&self, store: &mut ContentStore) -> Result<(), PersistError> {
        let slug = store.page().slug.clone();
        let wire = to_wire(store.page());

        match store.page().id {
            Some(id) => self.api.update_page(id, &wire).await?,
            None => self.api.create_page(&wire).await?,
        }

        // The backend assigns ids and may massage fields; its view wins.
        let reloaded = self.fetch(&slug).await?;
        store.replace(reloaded);
        self.events.publish(StudioEvent::Saved { slug });
        Ok(())
    }

    /// Forward an explicit page deletion. A page that was never saved has
    /// nothing to delete.
    pub async fn delete(&self, page: &Page) -> Result<(), PersistError> {
        match page.id {
            Some(id) => self.api.delete_page(id).await,
            None => {
                tracing::debug!(slug = %page.slug, "delete of a never-persisted page is a no-op");
                Ok(())
            }
        }
    }

    async fn fetch(&self, slug: &str) -> Result<Page, PersistError> {
        match self.api.page_by_slug(slug).await? {
            Some(raw) => {
                let mut page = normalize(&raw);
                if page.slug.is_empty() {
                    page.slug = slug.to_string();
                }
                Ok(page)
            }
            None => {
                tracing::debug!(slug, "no backend record; starting from a default page");
                Ok(Page::new(slug))
            }
        }
    }
}
