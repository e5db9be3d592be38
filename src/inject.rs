use crate::{
    any::TypeInfo,
    dependency_resolver::{Argument, Dependency},
    utils::thread_safety::{downcast, RcThreadSafety, SendSafety, SyncSafety},
    ResolveErrorKind,
};

/// Shared reference to a resolved value.
/// Every producer in one resolution that asks for the same tag gets the same allocation.
pub struct Inject<Dep>(pub RcThreadSafety<Dep>);

impl<Dep: SendSafety + SyncSafety + 'static> Dependency for Inject<Dep> {
    fn from_argument(Argument { tag, value }: Argument) -> Result<Self, ResolveErrorKind> {
        match downcast(value) {
            Ok(value) => Ok(Self(value)),
            Err(_) => Err(ResolveErrorKind::IncorrectType {
                tag,
                expected: TypeInfo::of::<Dep>(),
            }),
        }
    }
}

/// Owned clone of a resolved value
pub struct InjectCloned<Dep>(pub Dep);

impl<Dep: Clone + SendSafety + SyncSafety + 'static> Dependency for InjectCloned<Dep> {
    fn from_argument(argument: Argument) -> Result<Self, ResolveErrorKind> {
        Inject::<Dep>::from_argument(argument).map(|Inject(value)| Self((*value).clone()))
    }
}
