use alloc::collections::BTreeMap;
use core::any::{type_name, TypeId};

use crate::{tag::Tag, utils::thread_safety::RcAnyThreadSafety};

#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }
}

/// Values built during one resolution, keyed by the tag they were requested with
pub(crate) type Map = BTreeMap<Tag, RcAnyThreadSafety>;
