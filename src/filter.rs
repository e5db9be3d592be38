use alloc::vec::Vec;

use crate::{registry::RegistrationRecord, tag::Tag, utils::thread_safety::RcThreadSafety};

/// Predicate a filtered container applies to every candidate, its own and inherited ones
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagFilter {
    /// Drops candidates carrying any of the tags
    Out(Vec<Tag>),
    /// Keeps candidates carrying all of the tags
    All(Vec<Tag>),
    /// Keeps candidates carrying at least one of the tags
    Any(Vec<Tag>),
}

impl TagFilter {
    #[must_use]
    pub fn matches(&self, tags: &[Tag]) -> bool {
        match self {
            TagFilter::Out(excluded) => !excluded.iter().any(|tag| tags.contains(tag)),
            TagFilter::All(required) => required.iter().all(|tag| tags.contains(tag)),
            TagFilter::Any(accepted) => accepted.iter().any(|tag| tags.contains(tag)),
        }
    }

    /// Position in the fixed application order: exclusions, then all-of, then any-of
    #[inline]
    #[must_use]
    pub const fn order(&self) -> u8 {
        match self {
            TagFilter::Out(_) => 0,
            TagFilter::All(_) => 1,
            TagFilter::Any(_) => 2,
        }
    }
}

/// Applies filters to a candidate list in [`TagFilter::order`], keeping candidate order
pub(crate) fn apply<'a>(
    mut candidates: Vec<RcThreadSafety<RegistrationRecord>>,
    filters: impl IntoIterator<Item = &'a TagFilter>,
) -> Vec<RcThreadSafety<RegistrationRecord>> {
    let mut filters: Vec<&TagFilter> = filters.into_iter().collect();
    filters.sort_by_key(|filter| filter.order());

    for filter in filters {
        candidates.retain(|record| filter.matches(&record.tags));
    }
    candidates
}
