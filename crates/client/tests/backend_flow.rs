//! End-to-end flows against the stub backend: load/normalize, the
//! create-vs-update save cycle, and asset ingestion through a full editing
//! session.

mod stub_backend;

use std::sync::Arc;

use serde_json::json;
use url::Url;

use content_studio_core::editing::{AssetField, DraftPatch, EditTarget, EditorSession};
use content_studio_core::events::EventBus;
use content_studio_core::ingest::IngestError;
use content_studio_core::mutation::{DocumentPatch, PageMutation};
use content_studio_core::page::{AssetReference, FileUpload};
use content_studio_core::store::ContentStore;

use content_studio_client::{ApiClient, ClientConfig, HttpIngestor, PersistenceCoordinator};

use stub_backend::StudioStub;

fn client_for(stub: &StudioStub) -> ApiClient {
    let config = ClientConfig::new(Url::parse(&stub.base_url).expect("stub base url"));
    ApiClient::new(&config).expect("build api client")
}

#[tokio::test]
async fn load_normalizes_a_legacy_snake_case_payload() {
    let stub = StudioStub::spawn();
    stub.insert_page(
        "earnings-calls",
        json!({
            "id": 12,
            "slug": "earnings-calls",
            "title": "Earnings Calls",
            "has_year_filter": true,
            "filter_items": ["2023-24", "2024-25"],
            "audios": [
                { "name": "Q1 FY25", "year": "2024-25",
                  "audio_url": "/uploads/audios/q1.mp3", "transcript_url": "" }
            ]
        }),
    );

    let coordinator = PersistenceCoordinator::new(client_for(&stub), EventBus::default());
    let page = coordinator.load("earnings-calls").await.unwrap();

    assert_eq!(page.id, Some(12));
    assert!(page.flags.has_year_filter);
    assert_eq!(page.filter_items, vec!["2024-25", "2023-24"]);

    // The flat legacy payload ends up wrapped in a synthesized section.
    assert_eq!(page.sections.len(), 1);
    let section = page.sections.values().next().unwrap();
    assert_eq!(section.audios.len(), 1);
    assert!(section.documents.is_empty());
}

#[tokio::test]
async fn missing_page_loads_as_a_fresh_default() {
    let stub = StudioStub::spawn();
    let coordinator = PersistenceCoordinator::new(client_for(&stub), EventBus::default());

    let page = coordinator.load("brand-new").await.unwrap();
    assert_eq!(page.slug, "brand-new");
    assert_eq!(page.id, None);
    assert!(page.sections.is_empty());
}

#[tokio::test]
async fn first_save_creates_then_update_uses_put() {
    let stub = StudioStub::spawn();
    let coordinator = PersistenceCoordinator::new(client_for(&stub), EventBus::default());

    let page = coordinator.load("reports").await.unwrap();
    let mut store = ContentStore::new(page, EventBus::default());
    store
        .apply(&PageMutation::AddSection {
            title: "Annual Reports".into(),
        })
        .unwrap();
    store
        .apply(&PageMutation::AddFilterItem {
            value: "2024-25".into(),
        })
        .unwrap();

    coordinator.save(&mut store).await.unwrap();

    // The backend assigned an id and the reconciled tree carries it.
    assert_eq!(store.page().id, Some(1));
    assert_eq!(store.page().sections.len(), 1);
    assert_eq!(store.page().filter_items, vec!["2024-25"]);

    coordinator.save(&mut store).await.unwrap();

    let methods: Vec<String> = stub
        .requests()
        .into_iter()
        .filter(|(_, path)| path.starts_with("/page-content"))
        .map(|(method, _)| method)
        .collect();
    // load GET, create POST, reload GET, update PUT, reload GET.
    assert_eq!(methods, vec!["GET", "POST", "GET", "PUT", "GET"]);
}

#[tokio::test]
async fn failed_save_leaves_the_store_untouched() {
    let stub = StudioStub::spawn();
    stub.set_fail_saves(true);
    let coordinator = PersistenceCoordinator::new(client_for(&stub), EventBus::default());

    let mut store = ContentStore::new(
        coordinator.load("reports").await.unwrap(),
        EventBus::default(),
    );
    store
        .apply(&PageMutation::AddSection {
            title: "Annual Reports".into(),
        })
        .unwrap();

    let err = coordinator.save(&mut store).await.unwrap_err();
    assert!(matches!(
        err,
        content_studio_client::PersistError::SaveFailed(_)
    ));

    // The local tree keeps the unsaved edit and no id was assigned.
    assert_eq!(store.page().id, None);
    assert_eq!(store.page().sections.len(), 1);
}

#[tokio::test]
async fn uploaded_file_resolves_to_the_hosted_path() {
    let stub = StudioStub::spawn();
    let api = client_for(&stub);
    let mut page = content_studio_core::page::Page::new("reports");
    let section = content_studio_core::page::Section::new("Reports");
    let section_id = section.id;
    page.sections.push(section_id, section);

    let store = ContentStore::new(page, EventBus::default());
    let mut session = EditorSession::new(store, Arc::new(HttpIngestor::new(api)));

    session
        .begin(EditTarget::NewDocument {
            section: section_id,
        })
        .unwrap();
    session
        .update(&DraftPatch::Document(DocumentPatch {
            title: Some("FY24 Annual Report".into()),
            ..DocumentPatch::default()
        }))
        .unwrap();
    session
        .upload_file(
            AssetField::Primary,
            FileUpload::new("fy24.pdf", "application/pdf", vec![0u8; 128]),
        )
        .unwrap();

    session.commit().await.unwrap();

    let doc = session
        .page()
        .section(section_id)
        .unwrap()
        .documents
        .values()
        .next()
        .unwrap();
    assert_eq!(
        doc.asset,
        AssetReference::LocalPath("/uploads/pdfs/uploaded.pdf".into())
    );

    // The upload landed in the page's subfolder.
    assert!(stub
        .requests()
        .iter()
        .any(|(method, path)| method == "POST" && path == "/upload/pdf/reports"));
}

#[tokio::test]
async fn oversize_upload_is_rejected_before_any_request() {
    let stub = StudioStub::spawn();
    let api = client_for(&stub);
    let mut page = content_studio_core::page::Page::new("reports");
    let section = content_studio_core::page::Section::new("Reports");
    let section_id = section.id;
    page.sections.push(section_id, section);

    let store = ContentStore::new(page, EventBus::default());
    let mut session = EditorSession::new(store, Arc::new(HttpIngestor::new(api)));
    session
        .begin(EditTarget::NewDocument {
            section: section_id,
        })
        .unwrap();

    let err = session
        .upload_file(
            AssetField::Primary,
            FileUpload::new("huge.pdf", "application/pdf", vec![0u8; 60 * 1024 * 1024]),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        content_studio_core::editing::EditError::Ingest(IngestError::FileTooLarge { .. })
    ));

    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn external_url_localizes_and_failure_degrades() {
    let stub = StudioStub::spawn();
    let api = client_for(&stub);
    let mut page = content_studio_core::page::Page::new("reports");
    let section = content_studio_core::page::Section::new("Reports");
    let section_id = section.id;
    page.sections.push(section_id, section);

    let store = ContentStore::new(page, EventBus::default());
    let mut session = EditorSession::new(store, Arc::new(HttpIngestor::new(api)));

    // Happy path: the backend fetches and hosts a local copy.
    session
        .begin(EditTarget::NewDocument {
            section: section_id,
        })
        .unwrap();
    session
        .update(&DraftPatch::Document(DocumentPatch {
            title: Some("FY24".into()),
            ..DocumentPatch::default()
        }))
        .unwrap();
    session
        .ingest_url(AssetField::Primary, "https://old.example.com/fy24.pdf")
        .unwrap();
    session.commit().await.unwrap();

    let doc = session
        .page()
        .section(section_id)
        .unwrap()
        .documents
        .values()
        .next()
        .unwrap();
    assert_eq!(
        doc.asset,
        AssetReference::LocalPath("/uploads/pdfs/localized.pdf".into())
    );

    // Failure path: the reference degrades to the raw external link.
    stub.set_fail_downloads(true);
    session
        .begin(EditTarget::NewDocument {
            section: section_id,
        })
        .unwrap();
    session
        .update(&DraftPatch::Document(DocumentPatch {
            title: Some("FY23".into()),
            ..DocumentPatch::default()
        }))
        .unwrap();
    session
        .ingest_url(AssetField::Primary, "https://old.example.com/fy23.pdf")
        .unwrap();
    session.commit().await.unwrap();

    assert!(matches!(
        session.take_ingest_error(),
        Some(IngestError::UrlIngestionFailed(_))
    ));
    let titles_and_assets: Vec<_> = session
        .page()
        .section(section_id)
        .unwrap()
        .documents
        .values()
        .map(|d| (d.title.clone(), d.asset.clone()))
        .collect();
    assert_eq!(
        titles_and_assets[1],
        (
            "FY23".to_string(),
            AssetReference::ExternalUrl("https://old.example.com/fy23.pdf".into())
        )
    );
}

#[tokio::test]
async fn delete_forwards_only_for_persisted_pages() {
    let stub = StudioStub::spawn();
    stub.insert_page("old-page", json!({ "id": 9, "slug": "old-page" }));
    let coordinator = PersistenceCoordinator::new(client_for(&stub), EventBus::default());

    // Never-persisted page: local no-op, no request.
    let fresh = content_studio_core::page::Page::new("fresh");
    coordinator.delete(&fresh).await.unwrap();
    assert!(stub.requests().is_empty());

    let page = coordinator.load("old-page").await.unwrap();
    coordinator.delete(&page).await.unwrap();
    assert!(stub
        .requests()
        .iter()
        .any(|(method, path)| method == "DELETE" && path == "/page-content/9"));
}
