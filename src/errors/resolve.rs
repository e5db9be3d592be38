use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use super::instantiate::InstantiateErrorKind;
use crate::{any::TypeInfo, tag::Tag};

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error("Cannot resolve, no tag specified")]
    EmptyTag,
    #[error("Could not find tag: {tag}")]
    UnknownTag { tag: Tag },
    #[error("Could not resolve all, no instances of {tag}")]
    NoMatches { tag: Tag },
    #[error("Cyclic dependency detected: {}", TagPath(.path))]
    CyclicDependency { path: Vec<Tag> },
    #[error("Resolution depth limit ({limit}) exceeded while resolving {tag}")]
    DepthLimitExceeded { tag: Tag, limit: usize },
    #[error("Incorrect type resolved for {tag}. Expected: {}", .expected.name)]
    IncorrectType { tag: Tag, expected: TypeInfo },
    #[error("Producer expects {expected} arguments, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },
    #[error("Producer for {tag} failed: {source}")]
    Instantiate { tag: Tag, source: InstantiateErrorKind },
}

struct TagPath<'a>(&'a [Tag]);

impl Display for TagPath<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, tag) in self.0.iter().enumerate() {
            if index != 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{tag}")?;
        }
        Ok(())
    }
}
