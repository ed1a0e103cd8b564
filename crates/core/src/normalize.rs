//! Tolerant mapping from raw backend payloads to the canonical [`Page`].
//!
//! Backend responses vary per page type: flag fields arrive in camelCase or
//! snake_case depending on which service wrote them, and older page types
//! keep their documents/audios flat on the page object instead of inside a
//! `sections` array. All of that variance is absorbed here, in one place,
//! as pure total functions: nothing in this module fails or panics, and any
//! field that cannot be coerced becomes its type default.

use serde_json::{Map, Value};

use crate::page::model::sort_filter_items;
use crate::page::{AssetReference, Audio, ContentBlock, Document, Page, Section};

/// Which of the known payload layouts a raw object uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RawShape {
    /// Canonical: a `sections` array of section objects.
    Sectioned,
    /// Legacy: `documents`/`audios`/`contents` arrays directly on the page;
    /// normalizes into a single synthesized section.
    Flat,
}

impl RawShape {
    fn of(obj: &Map<String, Value>) -> Self {
        match field(obj, "sections", "sections") {
            Some(Value::Array(_)) => RawShape::Sectioned,
            _ => RawShape::Flat,
        }
    }
}

/// Normalize a raw backend payload into a canonical page. Never fails; a
/// payload that is not even an object yields an empty default page.
pub fn normalize(raw: &Value) -> Page {
    let Some(obj) = raw.as_object() else {
        return Page::new("");
    };

    let mut page = Page::new(string_field(obj, "slug", "slug"));
    page.id = id_field(obj);
    page.title = string_field(obj, "title", "title");
    page.flags.has_year_filter = bool_field(obj, "hasYearFilter", "has_year_filter");
    page.flags.show_publish_date = bool_field(obj, "showPublishDate", "show_publish_date");
    page.flags.show_cms_publish_date =
        bool_field(obj, "showCmsPublishDate", "show_cms_publish_date");
    page.flags.is_active = bool_field(obj, "isActive", "is_active");

    page.filter_items = filter_items(obj);

    match RawShape::of(obj) {
        RawShape::Sectioned => {
            if let Some(Value::Array(sections)) = field(obj, "sections", "sections") {
                for raw_section in sections {
                    if let Some(section) = section_from(raw_section) {
                        page.sections.push(section.id, section);
                    }
                }
            }
        }
        RawShape::Flat => {
            let section = flat_section_from(obj);
            if !section.documents.is_empty()
                || !section.audios.is_empty()
                || !section.contents.is_empty()
            {
                page.sections.push(section.id, section);
            }
        }
    }

    page
}

fn section_from(raw: &Value) -> Option<Section> {
    let obj = raw.as_object()?;
    let mut section = Section::new(string_field(obj, "title", "title"));
    fill_section_children(&mut section, obj);
    Some(section)
}

/// Wrap a legacy flat payload's item arrays into one synthesized section.
fn flat_section_from(obj: &Map<String, Value>) -> Section {
    let mut section = Section::new("");
    fill_section_children(&mut section, obj);
    section
}

fn fill_section_children(section: &mut Section, obj: &Map<String, Value>) {
    for raw in array_field(obj, "documents", "documents") {
        if let Some(doc) = document_from(raw) {
            section.documents.push(doc.id, doc);
        }
    }
    for raw in array_field(obj, "audios", "audios") {
        if let Some(audio) = audio_from(raw) {
            section.audios.push(audio.id, audio);
        }
    }
    for raw in array_field(obj, "contents", "contents") {
        if let Some(content) = content_from(raw) {
            section.contents.push(content.id, content);
        }
    }
}

fn document_from(raw: &Value) -> Option<Document> {
    let obj = raw.as_object()?;
    Some(Document::new(
        string_field(obj, "title", "title"),
        string_field(obj, "date", "date"),
        string_field(obj, "year", "year"),
        AssetReference::from_wire(&string_field(obj, "fileUrl", "file_url")),
    ))
}

fn audio_from(raw: &Value) -> Option<Audio> {
    let obj = raw.as_object()?;
    Some(Audio::new(
        string_field(obj, "name", "name"),
        string_field(obj, "year", "year"),
        AssetReference::from_wire(&string_field(obj, "audioUrl", "audio_url")),
        AssetReference::from_wire(&string_field(obj, "transcriptUrl", "transcript_url")),
    ))
}

fn content_from(raw: &Value) -> Option<ContentBlock> {
    let obj = raw.as_object()?;
    Some(ContentBlock::new(
        string_field(obj, "title", "title"),
        string_field(obj, "body", "body"),
    ))
}

/// Prefer the camelCase key, fall back to snake_case.
fn field<'a>(obj: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    match obj.get(camel) {
        Some(Value::Null) | None => obj.get(snake),
        found => found,
    }
}

fn string_field(obj: &Map<String, Value>, camel: &str, snake: &str) -> String {
    match field(obj, camel, snake) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn bool_field(obj: &Map<String, Value>, camel: &str, snake: &str) -> bool {
    match field(obj, camel, snake) {
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

fn array_field<'a>(
    obj: &'a Map<String, Value>,
    camel: &str,
    snake: &str,
) -> impl Iterator<Item = &'a Value> {
    let slice: &[Value] = match field(obj, camel, snake) {
        Some(Value::Array(items)) => items,
        _ => &[],
    };
    slice.iter()
}

fn id_field(obj: &Map<String, Value>) -> Option<i64> {
    match field(obj, "id", "id") {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    }
}

/// Filter items arrive as strings, numbers, or objects with a `name`/`value`
/// key. Anything unusable is skipped; the result is deduplicated and sorted.
fn filter_items(obj: &Map<String, Value>) -> Vec<String> {
    let mut items = Vec::new();
    for raw in array_field(obj, "filterItems", "filter_items") {
        let item = match raw {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Object(entry) => match entry.get("name").or_else(|| entry.get("value")) {
                Some(Value::String(s)) => s.trim().to_string(),
                Some(Value::Number(n)) => n.to_string(),
                _ => continue,
            },
            _ => continue,
        };
        if !item.is_empty() && !items.contains(&item) {
            items.push(item);
        }
    }
    sort_filter_items(&mut items);
    items
}
