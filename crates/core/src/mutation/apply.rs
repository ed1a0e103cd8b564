//! Pure applier for [`PageMutation`]: takes the current page, returns a new
//! one with the mutation applied, or a typed error and the original page
//! untouched.

use thiserror::Error;

use crate::page::model::sort_filter_items;
use crate::page::{Page, Section, SectionId};

use super::types::PageMutation;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("no entity at the requested address")]
    NotFound,
    #[error("this filter year already exists")]
    DuplicateFilterItem,
    #[error("filter year cannot be empty")]
    EmptyFilterItem,
}

/// Apply one structural mutation. Adds append; filter items re-sort after
/// every filter mutation; removing a section discards its children with it.
pub fn apply(page: &Page, mutation: &PageMutation) -> Result<Page, TreeError> {
    let mut next = page.clone();
    match mutation {
        PageMutation::AddSection { title } => {
            let section = Section::new(title.clone());
            next.sections.push(section.id, section);
        }
        PageMutation::UpdateSection { section, patch } => {
            let target = section_mut(&mut next, *section)?;
            if let Some(title) = &patch.title {
                target.title = title.clone();
            }
        }
        PageMutation::RemoveSection { section } => {
            next.sections.remove(*section).ok_or(TreeError::NotFound)?;
        }

        PageMutation::AddDocument { section, document } => {
            let target = section_mut(&mut next, *section)?;
            target.documents.push(document.id, document.clone());
        }
        PageMutation::UpdateDocument {
            section,
            document,
            patch,
        } => {
            let target = section_mut(&mut next, *section)?
                .documents
                .get_mut(*document)
                .ok_or(TreeError::NotFound)?;
            if let Some(title) = &patch.title {
                target.title = title.clone();
            }
            if let Some(date) = &patch.date {
                target.date = date.clone();
            }
            if let Some(year) = &patch.year {
                target.year = year.clone();
            }
            if let Some(asset) = &patch.asset {
                target.asset = asset.clone();
            }
        }
        PageMutation::RemoveDocument { section, document } => {
            section_mut(&mut next, *section)?
                .documents
                .remove(*document)
                .ok_or(TreeError::NotFound)?;
        }

        PageMutation::AddAudio { section, audio } => {
            let target = section_mut(&mut next, *section)?;
            target.audios.push(audio.id, audio.clone());
        }
        PageMutation::UpdateAudio {
            section,
            audio,
            patch,
        } => {
            let target = section_mut(&mut next, *section)?
                .audios
                .get_mut(*audio)
                .ok_or(TreeError::NotFound)?;
            if let Some(name) = &patch.name {
                target.name = name.clone();
            }
            if let Some(year) = &patch.year {
                target.year = year.clone();
            }
            if let Some(reference) = &patch.audio {
                target.audio = reference.clone();
            }
            if let Some(transcript) = &patch.transcript {
                target.transcript = transcript.clone();
            }
        }
        PageMutation::RemoveAudio { section, audio } => {
            section_mut(&mut next, *section)?
                .audios
                .remove(*audio)
                .ok_or(TreeError::NotFound)?;
        }

        PageMutation::AddContent { section, content } => {
            let target = section_mut(&mut next, *section)?;
            target.contents.push(content.id, content.clone());
        }
        PageMutation::UpdateContent {
            section,
            content,
            patch,
        } => {
            let target = section_mut(&mut next, *section)?
                .contents
                .get_mut(*content)
                .ok_or(TreeError::NotFound)?;
            if let Some(title) = &patch.title {
                target.title = title.clone();
            }
            if let Some(body) = &patch.body {
                target.body = body.clone();
            }
        }
        PageMutation::RemoveContent { section, content } => {
            section_mut(&mut next, *section)?
                .contents
                .remove(*content)
                .ok_or(TreeError::NotFound)?;
        }

        PageMutation::AddFilterItem { value } => {
            let value = value.trim().to_string();
            if value.is_empty() {
                return Err(TreeError::EmptyFilterItem);
            }
            if next.filter_items.iter().any(|item| *item == value) {
                return Err(TreeError::DuplicateFilterItem);
            }
            next.filter_items.push(value);
            sort_filter_items(&mut next.filter_items);
        }
        PageMutation::UpdateFilterItem { index, value } => {
            if *index >= next.filter_items.len() {
                return Err(TreeError::NotFound);
            }
            let value = value.trim().to_string();
            if value.is_empty() {
                return Err(TreeError::EmptyFilterItem);
            }
            let duplicate = next
                .filter_items
                .iter()
                .enumerate()
                .any(|(i, item)| i != *index && *item == value);
            if duplicate {
                return Err(TreeError::DuplicateFilterItem);
            }
            next.filter_items[*index] = value;
            sort_filter_items(&mut next.filter_items);
        }
        PageMutation::RemoveFilterItem { index } => {
            if *index >= next.filter_items.len() {
                return Err(TreeError::NotFound);
            }
            next.filter_items.remove(*index);
        }
    }
    Ok(next)
}

fn section_mut(page: &mut Page, id: SectionId) -> Result<&mut Section, TreeError> {
    page.sections.get_mut(id).ok_or(TreeError::NotFound)
}
