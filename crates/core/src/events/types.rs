use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Events emitted as the editor works, consumed by UI listeners.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StudioEvent {
    Mutated(MutationNotice),
    Loaded { slug: String },
    Saved { slug: String },
    AssetResolved { correlation: Uuid },
    EditDiscarded,
}

/// Emitted after a structural mutation lands in the content store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationNotice {
    pub slug: String,
    pub operation: String,
    pub timestamp: DateTime<Utc>,
}
