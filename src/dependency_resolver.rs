use alloc::vec::Vec;

use super::errors::ResolveErrorKind;
use crate::{tag::Tag, utils::thread_safety::RcAnyThreadSafety};

/// One resolved positional argument, together with the tag it was resolved from
#[derive(Clone)]
pub struct Argument {
    pub tag: Tag,
    pub value: RcAnyThreadSafety,
}

impl Argument {
    #[inline]
    #[must_use]
    pub fn new(tag: Tag, value: RcAnyThreadSafety) -> Self {
        Self { tag, value }
    }
}

/// A single producer parameter that can be built from a resolved value
pub trait Dependency: Sized {
    /// # Errors
    /// Returns [`ResolveErrorKind::IncorrectType`] if the resolved value has another type
    fn from_argument(argument: Argument) -> Result<Self, ResolveErrorKind>;
}

/// The erased value itself, for producers that don't care about the concrete type
impl Dependency for RcAnyThreadSafety {
    #[inline]
    fn from_argument(argument: Argument) -> Result<Self, ResolveErrorKind> {
        Ok(argument.value)
    }
}

/// Full parameter list of a producer, converted from positional arguments
pub trait DependencyResolver: Sized {
    const ARITY: usize;

    /// # Errors
    /// - Returns [`ResolveErrorKind::ArityMismatch`] if the number of arguments differs from [`Self::ARITY`]
    /// - Returns errors of the parameter conversions
    fn resolve(arguments: Vec<Argument>) -> Result<Self, ResolveErrorKind>;
}

macro_rules! impl_dependency_resolver {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case, unused_mut)]
        impl<$($ty,)*> DependencyResolver for ($($ty,)*)
        where
            $( $ty: Dependency, )*
        {
            const ARITY: usize = 0 $(+ replace_expr!($ty 1))*;

            #[inline]
            #[allow(unused_variables)]
            fn resolve(arguments: Vec<Argument>) -> Result<Self, ResolveErrorKind> {
                let actual = arguments.len();
                if actual != Self::ARITY {
                    return Err(ResolveErrorKind::ArityMismatch {
                        expected: Self::ARITY,
                        actual,
                    });
                }

                let mut arguments = arguments.into_iter();
                $(
                    let Some(argument) = arguments.next() else {
                        return Err(ResolveErrorKind::ArityMismatch {
                            expected: Self::ARITY,
                            actual,
                        });
                    };
                    let $ty = $ty::from_argument(argument)?;
                )*
                Ok(($($ty,)*))
            }
        }
    };
}

all_the_tuples!(impl_dependency_resolver);
