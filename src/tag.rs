use alloc::{
    string::{String, ToString as _},
    vec::Vec,
};
use core::{
    borrow::Borrow,
    fmt::{self, Display, Formatter},
    ops::Deref,
};

use crate::errors::{DependencyListErrorKind, TagErrorKind};

/// Reserved tag that resolves to the container the resolution was started from.
/// It's never stored in a registry.
pub const CONTAINER_TAG: &str = "$container";

/// Trimmed, non-empty identifier used both to register and to request a dependency
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Tag(String);

impl Tag {
    /// # Errors
    /// Returns [`TagErrorKind::Blank`] if the tag is empty after trimming
    pub fn new(raw: &str) -> Result<Self, TagErrorKind> {
        Self::at_position(raw, 0)
    }

    #[inline]
    fn at_position(raw: &str, position: usize) -> Result<Self, TagErrorKind> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TagErrorKind::Blank { position });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        self.0 == CONTAINER_TAG
    }
}

impl Deref for Tag {
    type Target = str;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for Tag {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Tag {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Anything that can be read as one tag or an ordered list of tags.
///
/// A single string is treated as a one-element list.
pub trait IntoTags {
    fn into_raw_tags(self) -> Vec<String>;
}

impl IntoTags for &str {
    fn into_raw_tags(self) -> Vec<String> {
        alloc::vec![self.to_string()]
    }
}

impl IntoTags for String {
    fn into_raw_tags(self) -> Vec<String> {
        alloc::vec![self]
    }
}

impl IntoTags for &String {
    fn into_raw_tags(self) -> Vec<String> {
        alloc::vec![self.clone()]
    }
}

impl IntoTags for Tag {
    fn into_raw_tags(self) -> Vec<String> {
        alloc::vec![self.0]
    }
}

impl<S: AsRef<str>> IntoTags for Vec<S> {
    fn into_raw_tags(self) -> Vec<String> {
        self.iter().map(|tag| tag.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> IntoTags for &[S] {
    fn into_raw_tags(self) -> Vec<String> {
        self.iter().map(|tag| tag.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> IntoTags for [S; N] {
    fn into_raw_tags(self) -> Vec<String> {
        self.iter().map(|tag| tag.as_ref().to_string()).collect()
    }
}

/// Validates a tag list for registration and filtering.
/// The result is non-empty, trimmed and keeps the first occurrence of each tag.
///
/// # Errors
/// - Returns [`TagErrorKind::Empty`] if there are no tags
/// - Returns [`TagErrorKind::Blank`] if one of the tags is blank
pub(crate) fn normalize_tags(tags: impl IntoTags) -> Result<Vec<Tag>, TagErrorKind> {
    let raw = tags.into_raw_tags();
    if raw.is_empty() {
        return Err(TagErrorKind::Empty);
    }

    let mut normalized: Vec<Tag> = Vec::with_capacity(raw.len());
    for (position, raw) in raw.iter().enumerate() {
        let tag = Tag::at_position(raw, position)?;
        if !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    Ok(normalized)
}

/// Validates tags a producer is registered with. Unlike filters, these can't use [`CONTAINER_TAG`].
pub(crate) fn registration_tags(tags: impl IntoTags) -> Result<Vec<Tag>, TagErrorKind> {
    let tags = normalize_tags(tags)?;
    if let Some(tag) = tags.iter().find(|tag| tag.is_reserved()) {
        return Err(TagErrorKind::Reserved { tag: tag.clone() });
    }
    Ok(tags)
}

/// Validates an explicit dependency list.
/// Order and duplicates are kept as is, since each entry feeds one positional argument.
pub(crate) fn dependency_ids(ids: impl IntoTags) -> Result<Vec<Tag>, DependencyListErrorKind> {
    ids.into_raw_tags()
        .iter()
        .enumerate()
        .map(|(position, raw)| Tag::at_position(raw, position).map_err(|_| DependencyListErrorKind::Blank { position }))
        .collect()
}
