use super::arena::OrderedArena;
use super::asset::AssetReference;
use super::id::{AudioId, ContentId, DocumentId, SectionId};

/// Top-level content aggregate for one CMS-managed page.
///
/// `slug` is the durable key; `id` appears after the first save. Sections and
/// their children are held in ordered arenas and addressed by stable id.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: Option<i64>,
    pub slug: String,
    pub title: String,
    pub flags: PageFlags,
    /// Year strings for the public filter dropdown, unique and sorted
    /// descending by leading numeric year.
    pub filter_items: Vec<String>,
    pub sections: OrderedArena<SectionId, Section>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageFlags {
    pub has_year_filter: bool,
    pub show_publish_date: bool,
    pub show_cms_publish_date: bool,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub documents: OrderedArena<DocumentId, Document>,
    pub audios: OrderedArena<AudioId, Audio>,
    pub contents: OrderedArena<ContentId, ContentBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    /// Free-text display date, shown as-is on the public page.
    pub date: String,
    pub year: String,
    pub asset: AssetReference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    pub id: AudioId,
    pub name: String,
    pub year: String,
    pub audio: AssetReference,
    pub transcript: AssetReference,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    pub id: ContentId,
    pub title: String,
    pub body: String,
}

impl Page {
    /// A fresh, never-persisted page for the given slug.
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            id: None,
            slug: slug.into(),
            title: String::new(),
            flags: PageFlags::default(),
            filter_items: Vec::new(),
            sections: OrderedArena::new(),
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Contents of the public year-filter dropdown.
    pub fn visible_years(&self) -> &[String] {
        &self.filter_items
    }

    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.get(id)
    }
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: SectionId::new(),
            title: title.into(),
            documents: OrderedArena::new(),
            audios: OrderedArena::new(),
            contents: OrderedArena::new(),
        }
    }

    /// Documents visible for one selected filter year; `None` disables the
    /// filter and yields everything in order.
    pub fn documents_for_year<'a>(
        &'a self,
        year: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Document> {
        self.documents
            .values()
            .filter(move |doc| year.is_none_or(|y| doc.year == y))
    }

    pub fn audios_for_year<'a>(
        &'a self,
        year: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Audio> {
        self.audios
            .values()
            .filter(move |audio| year.is_none_or(|y| audio.year == y))
    }
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        year: impl Into<String>,
        asset: AssetReference,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            title: title.into(),
            date: date.into(),
            year: year.into(),
            asset,
        }
    }
}

impl Audio {
    pub fn new(
        name: impl Into<String>,
        year: impl Into<String>,
        audio: AssetReference,
        transcript: AssetReference,
    ) -> Self {
        Self {
            id: AudioId::new(),
            name: name.into(),
            year: year.into(),
            audio,
            transcript,
        }
    }
}

impl ContentBlock {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: ContentId::new(),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Leading numeric year of a filter item, e.g. 2024 for `"2024-25"`.
pub fn leading_year(value: &str) -> Option<u32> {
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Sort filter items descending by leading numeric year; items with no
/// numeric prefix sort last. Ties break on the full string, also descending,
/// to keep the order deterministic.
pub fn sort_filter_items(items: &mut [String]) {
    items.sort_by(|a, b| {
        let ya = leading_year(a);
        let yb = leading_year(b);
        yb.cmp(&ya).then_with(|| b.cmp(a))
    });
}
