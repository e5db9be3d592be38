use alloc::vec::Vec;
use core::any::type_name;
use tracing::debug;

use crate::{
    dependency_resolver::DependencyResolver,
    errors::{DependencyListErrorKind, InstantiateErrorKind, ProducerErrorKind},
    instantiator::{boxed_constructor, boxed_instantiator, BoxedCloneInstantiator, Construct, Instantiator},
    signature::{classify, extract_parameter_names, Invocation, Shape, Signature},
    tag::Tag,
    utils::thread_safety::{erase, erase_rc, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety},
};

/// A callable producer together with what is known about its signature
#[derive(Clone)]
pub struct Callable {
    signature: Signature,
    instantiator: Option<BoxedCloneInstantiator>,
}

impl Callable {
    /// Wraps a closure or function.
    /// Its parameter names can't be recovered, so it needs explicit dependency ids unless it takes no arguments.
    /// Use [`callable!`](crate::callable) to capture the names.
    #[inline]
    #[must_use]
    pub fn new<Inst, Deps>(instantiator: Inst) -> Self
    where
        Inst: Instantiator<Deps, Error = InstantiateErrorKind> + Send + Sync,
        Deps: DependencyResolver,
    {
        Self {
            signature: Signature::new(type_name::<Inst>(), Shape::Closure, None, Deps::ARITY),
            instantiator: Some(boxed_instantiator(instantiator)),
        }
    }

    /// Producer that creates an owned `T` through [`Construct`]
    #[inline]
    #[must_use]
    pub fn constructor<T: Construct>() -> Self {
        Self {
            signature: Signature::new(
                type_name::<T>(),
                Shape::Constructor,
                Some(T::PARAMETERS),
                <T::Dependencies as DependencyResolver>::ARITY,
            ),
            instantiator: Some(boxed_constructor::<T>()),
        }
    }

    #[doc(hidden)]
    #[inline]
    #[must_use]
    pub fn with_parameters<Inst, Deps>(instantiator: Inst, name: &'static str, parameters: &'static [&'static str], shape: Shape) -> Self
    where
        Inst: Instantiator<Deps, Error = InstantiateErrorKind> + Send + Sync,
        Deps: DependencyResolver,
    {
        Self {
            signature: Signature::new(name, shape, Some(parameters), Deps::ARITY),
            instantiator: Some(boxed_instantiator(instantiator)),
        }
    }

    /// Callable-shaped producer that can't be invoked synchronously
    #[doc(hidden)]
    #[inline]
    #[must_use]
    pub fn unrecognized(name: &'static str, shape: Shape) -> Self {
        Self {
            signature: Signature::new(name, shape, None, 0),
            instantiator: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

/// What gets registered against tags: a plain value or a callable
#[derive(Clone)]
pub enum Producer {
    /// Shared value, every resolution returns the same allocation
    Value(RcAnyThreadSafety),
    Callable(Callable),
}

impl Producer {
    #[inline]
    #[must_use]
    pub fn value<T: SendSafety + SyncSafety + 'static>(value: T) -> Self {
        Self::Value(erase(value))
    }

    #[inline]
    #[must_use]
    pub fn shared<T: SendSafety + SyncSafety + 'static>(value: RcThreadSafety<T>) -> Self {
        Self::Value(erase_rc(value))
    }
}

impl From<Callable> for Producer {
    #[inline]
    fn from(callable: Callable) -> Self {
        Self::Callable(callable)
    }
}

/// Registers a value that was created outside the container
#[inline]
#[must_use]
pub fn instance<T: SendSafety + SyncSafety + 'static>(value: T) -> Producer {
    Producer::value(value)
}

/// Invocation strategy decided once, when a producer is registered
#[derive(Clone)]
pub(crate) enum Generator {
    Value(RcAnyThreadSafety),
    Call {
        invocation: Invocation,
        instantiator: BoxedCloneInstantiator,
    },
}

/// Classifies a producer and settles the dependency ids it's invoked with.
/// Explicit ids override introspected names entirely.
pub(crate) fn prepare(producer: Producer, explicit_dependency_ids: Option<Vec<Tag>>) -> Result<(Generator, Vec<Tag>), ProducerErrorKind> {
    let callable = match producer {
        Producer::Value(value) => {
            if explicit_dependency_ids.is_some() {
                debug!("Dependency ids are ignored for values");
            }
            return Ok((Generator::Value(value), Vec::new()));
        }
        Producer::Callable(callable) => callable,
    };

    let Callable { signature, instantiator } = callable;
    let kind = classify(&signature);
    let (Some(invocation), Some(instantiator)) = (kind.invocation(), instantiator) else {
        return Err(ProducerErrorKind::Unrecognized {
            name: signature.name(),
            shape: signature.shape(),
        });
    };

    let dependency_ids = match explicit_dependency_ids {
        Some(dependency_ids) => dependency_ids,
        None => extract_parameter_names(&signature),
    };
    if dependency_ids.len() != signature.arity() {
        return Err(DependencyListErrorKind::ArityMismatch {
            expected: signature.arity(),
            actual: dependency_ids.len(),
        }
        .into());
    }

    debug!(?kind, dependency_ids = dependency_ids.len(), "Producer classified");

    Ok((Generator::Call { invocation, instantiator }, dependency_ids))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{instance, prepare, Callable, Generator, Producer};
    use crate::{
        construct,
        errors::{DependencyListErrorKind, InstantiateErrorKind, ProducerErrorKind},
        inject::Inject,
        signature::{Invocation, Shape},
        tag::Tag,
        utils::thread_safety::same_value,
    };

    use alloc::{
        format,
        string::{String, ToString as _},
        vec,
        vec::Vec,
    };
    use tracing_test::traced_test;

    struct Database;

    struct Repository;

    construct! {
        impl Repository {
            fn new(database: Inject<Database>) -> Result<Self, InstantiateErrorKind> {
                let _ = database;
                Ok(Self)
            }
        }
    }

    fn names(ids: &[Tag]) -> Vec<&str> {
        ids.iter().map(Tag::as_str).collect()
    }

    #[test]
    #[traced_test]
    fn test_prepare_value() {
        let producer = instance(1u8);
        let Producer::Value(expected) = producer.clone() else {
            unreachable!();
        };

        let (generator, ids) = prepare(producer, Some(vec![Tag::new("ignored").unwrap()])).unwrap();
        assert!(ids.is_empty());
        assert!(matches!(generator, Generator::Value(value) if same_value(&value, &expected)));
    }

    #[test]
    #[traced_test]
    fn test_prepare_introspected_closure() {
        let callable = crate::callable!(|database: Inject<Database>| Ok(Repository));
        assert_eq!(callable.signature().shape(), Shape::Closure);

        let (generator, ids) = prepare(callable.into(), None).unwrap();
        assert_eq!(names(&ids), ["database"]);
        assert!(matches!(
            generator,
            Generator::Call {
                invocation: Invocation::Call,
                ..
            }
        ));
    }

    #[test]
    #[traced_test]
    fn test_prepare_constructor() {
        let (generator, ids) = prepare(Callable::constructor::<Repository>().into(), None).unwrap();

        assert_eq!(names(&ids), ["database"]);
        assert!(matches!(
            generator,
            Generator::Call {
                invocation: Invocation::Instantiate,
                ..
            }
        ));
    }

    #[test]
    #[traced_test]
    fn test_prepare_explicit_ids_override() {
        let callable = crate::callable!(|database: Inject<Database>| Ok(Repository));
        let (_, ids) = prepare(callable.into(), Some(vec![Tag::new("renamed").unwrap()])).unwrap();

        assert_eq!(names(&ids), ["renamed"]);
    }

    #[test]
    #[traced_test]
    fn test_prepare_arity_mismatch() {
        let anonymous = Callable::new(|Inject(_): Inject<Database>| Ok(Repository));

        assert!(matches!(
            prepare(anonymous.clone().into(), None),
            Err(ProducerErrorKind::InvalidDependencyList(DependencyListErrorKind::ArityMismatch {
                expected: 1,
                actual: 0
            }))
        ));
        assert!(prepare(anonymous.into(), Some(vec![Tag::new("database").unwrap()])).is_ok());
    }

    #[test]
    #[traced_test]
    fn test_prepare_unrecognized() {
        let asynchronous = crate::callable!(async || Ok::<_, InstantiateErrorKind>(Database));
        let method = crate::callable!(fn connect(&self) -> Result<Database, InstantiateErrorKind> { Ok(Database) });

        assert!(matches!(
            prepare(asynchronous.into(), None),
            Err(ProducerErrorKind::Unrecognized { shape: Shape::Async, .. })
        ));
        assert!(matches!(
            prepare(method.into(), None),
            Err(ProducerErrorKind::Unrecognized { shape: Shape::Method, .. })
        ));
    }
}
