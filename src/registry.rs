use alloc::vec::Vec;

use crate::{producer::Generator, tag::Tag, utils::thread_safety::RcThreadSafety};

/// Immutable description of one registered producer
pub(crate) struct RegistrationRecord {
    pub(crate) tags: Vec<Tag>,
    pub(crate) dependency_ids: Vec<Tag>,
    pub(crate) generator: Generator,
}

impl RegistrationRecord {
    #[inline]
    #[must_use]
    pub(crate) fn new(tags: Vec<Tag>, dependency_ids: Vec<Tag>, generator: Generator) -> Self {
        debug_assert!(!tags.is_empty(), "registration record without tags");

        Self {
            tags,
            dependency_ids,
            generator,
        }
    }

    #[inline]
    #[must_use]
    pub(crate) fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|own| own == tag)
    }
}

/// Append-only store of the records registered directly in one container
#[derive(Default)]
pub(crate) struct Registry {
    records: Vec<RcThreadSafety<RegistrationRecord>>,
}

impl Registry {
    #[inline]
    #[must_use]
    pub(crate) fn new() -> Self {
        Self { records: Vec::new() }
    }

    #[inline]
    pub(crate) fn push(&mut self, record: RegistrationRecord) {
        self.records.push(RcThreadSafety::new(record));
    }

    /// Records containing `tag`, most recently registered first
    #[must_use]
    pub(crate) fn candidates(&self, tag: &str) -> Vec<RcThreadSafety<RegistrationRecord>> {
        self.records.iter().rev().filter(|record| record.has_tag(tag)).cloned().collect()
    }

    #[inline]
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{RegistrationRecord, Registry};
    use crate::{
        producer::Generator,
        tag::{normalize_tags, IntoTags},
        utils::thread_safety::{downcast, erase},
    };

    use alloc::{vec, vec::Vec};

    fn record(tags: impl IntoTags, value: i32) -> RegistrationRecord {
        RegistrationRecord::new(normalize_tags(tags).unwrap(), Vec::new(), Generator::Value(erase(value)))
    }

    fn values(registry: &Registry, tag: &str) -> Vec<i32> {
        registry
            .candidates(tag)
            .iter()
            .map(|record| match &record.generator {
                Generator::Value(value) => *downcast::<i32>(value.clone()).ok().unwrap(),
                Generator::Call { .. } => unreachable!(),
            })
            .collect()
    }

    #[test]
    fn test_record_tags() {
        let record = record(["database", "storage"], 1);

        assert!(record.has_tag("database"));
        assert!(record.has_tag("storage"));
        assert!(!record.has_tag("cache"));
        assert!(record.dependency_ids.is_empty());
    }

    #[test]
    fn test_candidates_most_recent_first() {
        let mut registry = Registry::new();
        registry.push(record("t", 1));
        registry.push(record(vec!["t", "other"], 2));
        registry.push(record("other", 3));
        registry.push(record("t", 4));

        assert_eq!(registry.len(), 4);
        assert_eq!(values(&registry, "t"), [4, 2, 1]);
        assert_eq!(values(&registry, "other"), [3, 2]);
        assert!(values(&registry, "missing").is_empty());
    }
}
