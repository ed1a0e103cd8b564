//! Wire shape sent to the backend on save.
//!
//! Keys are camelCase; the four flag fields additionally carry snake_case
//! mirror keys because older backend consumers still read those. Stable
//! entity ids are session-local and never serialized — the backend orders
//! children positionally.

use serde::{Deserialize, Serialize};

use crate::page::{AssetReference, Page};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub has_year_filter: bool,
    pub show_publish_date: bool,
    pub show_cms_publish_date: bool,
    pub is_active: bool,
    #[serde(rename = "has_year_filter")]
    pub has_year_filter_snake: bool,
    #[serde(rename = "show_publish_date")]
    pub show_publish_date_snake: bool,
    #[serde(rename = "show_cms_publish_date")]
    pub show_cms_publish_date_snake: bool,
    #[serde(rename = "is_active")]
    pub is_active_snake: bool,
    pub filter_items: Vec<String>,
    pub sections: Vec<SectionWire>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionWire {
    pub title: String,
    pub documents: Vec<DocumentWire>,
    pub audios: Vec<AudioWire>,
    pub contents: Vec<ContentWire>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentWire {
    pub title: String,
    pub date: String,
    pub year: String,
    pub file_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioWire {
    pub name: String,
    pub year: String,
    pub audio_url: String,
    pub transcript_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentWire {
    pub title: String,
    pub body: String,
}

/// Serialize a canonical page to its wire shape.
pub fn to_wire(page: &Page) -> PageWire {
    PageWire {
        id: page.id,
        slug: page.slug.clone(),
        title: page.title.clone(),
        has_year_filter: page.flags.has_year_filter,
        show_publish_date: page.flags.show_publish_date,
        show_cms_publish_date: page.flags.show_cms_publish_date,
        is_active: page.flags.is_active,
        has_year_filter_snake: page.flags.has_year_filter,
        show_publish_date_snake: page.flags.show_publish_date,
        show_cms_publish_date_snake: page.flags.show_cms_publish_date,
        is_active_snake: page.flags.is_active,
        filter_items: page.filter_items.clone(),
        sections: page
            .sections
            .values()
            .map(|section| SectionWire {
                title: section.title.clone(),
                documents: section
                    .documents
                    .values()
                    .map(|doc| DocumentWire {
                        title: doc.title.clone(),
                        date: doc.date.clone(),
                        year: doc.year.clone(),
                        file_url: asset_wire_str(&doc.asset),
                    })
                    .collect(),
                audios: section
                    .audios
                    .values()
                    .map(|audio| AudioWire {
                        name: audio.name.clone(),
                        year: audio.year.clone(),
                        audio_url: asset_wire_str(&audio.audio),
                        transcript_url: asset_wire_str(&audio.transcript),
                    })
                    .collect(),
                contents: section
                    .contents
                    .values()
                    .map(|content| ContentWire {
                        title: content.title.clone(),
                        body: content.body.clone(),
                    })
                    .collect(),
            })
            .collect(),
    }
}

fn asset_wire_str(asset: &AssetReference) -> String {
    if asset.is_pending() {
        // Commit gating keeps Pending out of the tree; if one slips through
        // we persist it as unset rather than leaking a correlation id.
        tracing::warn!("serializing a pending asset reference as empty");
    }
    asset.as_wire_str().to_string()
}
