//! Route handlers organized by resource

pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

/// Trimmed text, or `None` when blank
pub(crate) fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
