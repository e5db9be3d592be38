//! Pointer and marker aliases switched by the `thread_safe` feature.
//!
//! With the feature enabled, resolved values are shared through [`Arc`](alloc::sync::Arc)
//! and everything stored in a container must be `Send + Sync`.
//! Without it, [`Rc`](alloc::rc::Rc) is used and the marker traits are implemented for every type.

#[cfg(feature = "thread_safe")]
mod thread_safe {
    use alloc::sync::Arc;
    use core::any::Any;

    pub trait SendSafety: Send {}
    pub trait SyncSafety: Sync {}

    impl<T: Send> SendSafety for T {}
    impl<T: Sync> SyncSafety for T {}

    pub type RcThreadSafety<T> = Arc<T>;
    pub type RcAnyThreadSafety = RcThreadSafety<dyn Any + Send + Sync>;
}

#[cfg(not(feature = "thread_safe"))]
mod thread_unsafe {
    use alloc::rc::Rc;
    use core::any::Any;

    pub trait SendSafety {}
    pub trait SyncSafety {}

    impl<T> SendSafety for T {}
    impl<T> SyncSafety for T {}

    pub type RcThreadSafety<T> = Rc<T>;
    pub type RcAnyThreadSafety = RcThreadSafety<dyn Any>;
}

#[cfg(feature = "thread_safe")]
pub use thread_safe::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety};

#[cfg(not(feature = "thread_safe"))]
pub use thread_unsafe::{RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety};

/// Moves a value behind a shared pointer and erases its type.
#[inline]
#[must_use]
pub fn erase<T: SendSafety + SyncSafety + 'static>(value: T) -> RcAnyThreadSafety {
    RcThreadSafety::new(value)
}

/// Erases the type of an already shared value without reallocating it.
#[inline]
#[must_use]
pub fn erase_rc<T: SendSafety + SyncSafety + 'static>(value: RcThreadSafety<T>) -> RcAnyThreadSafety {
    value
}

/// Recovers the concrete type of an erased value.
/// The original pointer is handed back untouched when the type doesn't match.
#[inline]
pub fn downcast<T: SendSafety + SyncSafety + 'static>(value: RcAnyThreadSafety) -> Result<RcThreadSafety<T>, RcAnyThreadSafety> {
    value.downcast::<T>()
}

/// Whether two erased values point at the same allocation.
#[inline]
#[must_use]
pub fn same_value(left: &RcAnyThreadSafety, right: &RcAnyThreadSafety) -> bool {
    RcThreadSafety::ptr_eq(left, right)
}

#[cfg(test)]
mod tests {
    use super::{downcast, erase, erase_rc, same_value, RcThreadSafety};

    #[test]
    fn test_downcast_roundtrip() {
        let value = erase(42u32);

        assert!(downcast::<u64>(value.clone()).is_err());
        assert_eq!(*downcast::<u32>(value).unwrap(), 42);
    }

    #[test]
    fn test_erase_rc_keeps_allocation() {
        let shared = RcThreadSafety::new(1u8);
        let left = erase_rc(shared.clone());
        let right = erase_rc(shared);

        assert!(same_value(&left, &right));
        assert!(!same_value(&left, &erase(1u8)));
    }
}
