/// Draft validation run at commit time.
///
/// Rules are checked in a fixed order (title/name, then asset, then year) and
/// only the first violation is reported, so the operator fixes one thing at a
/// time.
use thiserror::Error;

use super::asset::AssetReference;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title is required")]
    EmptyTitle,
    #[error("name is required")]
    EmptyName,
    #[error("a file or link must be provided")]
    UnresolvedAsset,
    #[error("the file is still being processed")]
    PendingAsset,
    #[error("year is required when the year filter is enabled")]
    MissingYear,
    #[error("a section with this title already exists")]
    DuplicateSectionTitle,
    #[error("content text is required")]
    EmptyBody,
}

impl ValidationError {
    /// The offending field, for callers that report failures per field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyTitle | ValidationError::DuplicateSectionTitle => "title",
            ValidationError::EmptyName => "name",
            ValidationError::UnresolvedAsset | ValidationError::PendingAsset => "asset",
            ValidationError::MissingYear => "year",
            ValidationError::EmptyBody => "body",
        }
    }
}

pub fn validate_document(
    title: &str,
    asset: &AssetReference,
    year: &str,
    has_year_filter: bool,
) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    validate_asset(asset)?;
    validate_year(year, has_year_filter)
}

pub fn validate_audio(
    name: &str,
    audio: &AssetReference,
    transcript: &AssetReference,
    year: &str,
    has_year_filter: bool,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    validate_asset(audio)?;
    // The transcript is optional but may not be mid-ingestion.
    if transcript.is_pending() {
        return Err(ValidationError::PendingAsset);
    }
    validate_year(year, has_year_filter)
}

pub fn validate_section<'a>(
    title: &str,
    sibling_titles: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if sibling_titles.into_iter().any(|other| other == title) {
        return Err(ValidationError::DuplicateSectionTitle);
    }
    Ok(())
}

pub fn validate_content(body: &str) -> Result<(), ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyBody);
    }
    Ok(())
}

fn validate_asset(asset: &AssetReference) -> Result<(), ValidationError> {
    match asset {
        AssetReference::LocalPath(_) | AssetReference::ExternalUrl(_) => Ok(()),
        AssetReference::Pending(_) => Err(ValidationError::PendingAsset),
        AssetReference::Empty => Err(ValidationError::UnresolvedAsset),
    }
}

fn validate_year(year: &str, has_year_filter: bool) -> Result<(), ValidationError> {
    if has_year_filter && year.trim().is_empty() {
        return Err(ValidationError::MissingYear);
    }
    Ok(())
}
