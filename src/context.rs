use alloc::vec::Vec;

use crate::{
    any,
    errors::ResolveErrorKind,
    tag::Tag,
    utils::thread_safety::{erase, RcAnyThreadSafety},
    Container,
};

/// State of one top-level `resolve`/`resolve_all` call.
/// Created fresh for every call and dropped when it returns, it's never shared between calls.
pub(crate) struct ResolutionContext {
    root: Container,
    root_value: Option<RcAnyThreadSafety>,
    built: any::Map,
    in_progress: Vec<Tag>,
    max_depth: usize,
}

impl ResolutionContext {
    #[inline]
    #[must_use]
    pub(crate) fn new(root: Container) -> Self {
        let max_depth = root.config().max_depth;
        Self {
            root,
            root_value: None,
            built: any::Map::new(),
            in_progress: Vec::new(),
            max_depth,
        }
    }

    /// The container the resolution was started from, as a value
    pub(crate) fn root_value(&mut self) -> RcAnyThreadSafety {
        self.root_value.get_or_insert_with(|| erase(self.root.clone())).clone()
    }

    #[inline]
    #[must_use]
    pub(crate) fn built(&self, tag: &Tag) -> Option<RcAnyThreadSafety> {
        self.built.get(tag).cloned()
    }

    #[inline]
    pub(crate) fn insert(&mut self, tag: Tag, value: RcAnyThreadSafety) {
        self.built.insert(tag, value);
    }

    #[inline]
    #[must_use]
    pub(crate) fn depth(&self) -> usize {
        self.in_progress.len()
    }

    /// Marks `tag` as being built
    ///
    /// # Errors
    /// - Returns [`ResolveErrorKind::CyclicDependency`] if `tag` is already being built
    /// - Returns [`ResolveErrorKind::DepthLimitExceeded`] if too many producers are in progress
    pub(crate) fn enter(&mut self, tag: &Tag) -> Result<(), ResolveErrorKind> {
        if self.in_progress.contains(tag) {
            let mut path = self.in_progress.clone();
            path.push(tag.clone());
            return Err(ResolveErrorKind::CyclicDependency { path });
        }
        if self.in_progress.len() >= self.max_depth {
            return Err(ResolveErrorKind::DepthLimitExceeded {
                tag: tag.clone(),
                limit: self.max_depth,
            });
        }

        self.in_progress.push(tag.clone());
        Ok(())
    }

    #[inline]
    pub(crate) fn exit(&mut self) {
        self.in_progress.pop();
    }
}
