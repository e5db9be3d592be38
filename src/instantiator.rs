use alloc::vec::Vec;
use tracing::debug;

use super::{
    dependency_resolver::{Argument, DependencyResolver},
    errors::{InstantiateErrorKind, InstantiatorErrorKind, ResolveErrorKind},
    service::{service_fn, BoxCloneService},
};
use crate::utils::thread_safety::{erase, RcAnyThreadSafety, RcThreadSafety, SendSafety, SyncSafety};

/// Plain callable producer: invoked directly with its resolved dependencies
pub trait Instantiator<Deps>: 'static
where
    Deps: DependencyResolver,
{
    type Provides: SendSafety + SyncSafety + 'static;
    type Error: Into<InstantiateErrorKind>;

    fn instantiate(&self, dependencies: Deps) -> Result<Self::Provides, Self::Error>;
}

/// Constructor producer: the type itself describes how to create an owned instance of it.
///
/// Usually implemented with [`construct!`](crate::construct), which fills [`Self::PARAMETERS`]
/// from the declared parameter identifiers.
pub trait Construct: SendSafety + SyncSafety + Sized + 'static {
    type Dependencies: DependencyResolver;
    type Error: Into<InstantiateErrorKind>;

    /// Parameter names in declaration order, used as dependency tags when none are given explicitly
    const PARAMETERS: &'static [&'static str];

    fn construct(dependencies: Self::Dependencies) -> Result<Self, Self::Error>;
}

pub(crate) type BoxedCloneInstantiator =
    BoxCloneService<Vec<Argument>, RcAnyThreadSafety, InstantiatorErrorKind<ResolveErrorKind, InstantiateErrorKind>>;

/// Allocates an owned instance of `T` and initializes it with the resolved arguments
///
/// # Errors
/// - Returns [`InstantiatorErrorKind::Deps`] if the arguments can't be converted to `T::Dependencies`
/// - Returns [`InstantiatorErrorKind::Factory`] if the constructor fails
pub fn instantiate<T: Construct>(
    arguments: Vec<Argument>,
) -> Result<RcThreadSafety<T>, InstantiatorErrorKind<ResolveErrorKind, InstantiateErrorKind>> {
    let dependencies = T::Dependencies::resolve(arguments).map_err(InstantiatorErrorKind::Deps)?;
    let instance = T::construct(dependencies).map_err(|err| InstantiatorErrorKind::Factory(err.into()))?;
    Ok(RcThreadSafety::new(instance))
}

#[must_use]
pub(crate) fn boxed_instantiator<Inst, Deps>(instantiator: Inst) -> BoxedCloneInstantiator
where
    Inst: Instantiator<Deps> + Send + Sync,
    Deps: DependencyResolver,
{
    BoxCloneService::new(service_fn(move |arguments: Vec<Argument>| {
        let dependencies = match Deps::resolve(arguments) {
            Ok(dependencies) => dependencies,
            Err(err) => return Err(InstantiatorErrorKind::Deps(err)),
        };
        let dependency = match instantiator.instantiate(dependencies) {
            Ok(dependency) => dependency,
            Err(err) => return Err(InstantiatorErrorKind::Factory(err.into())),
        };

        debug!("Called");

        Ok(erase(dependency))
    }))
}

#[must_use]
pub(crate) fn boxed_constructor<T: Construct>() -> BoxedCloneInstantiator {
    BoxCloneService::new(service_fn(|arguments: Vec<Argument>| {
        let instance = instantiate::<T>(arguments)?;

        debug!("Instantiated");

        Ok(instance as RcAnyThreadSafety)
    }))
}

macro_rules! impl_instantiator {
    (
        [$($ty:ident),*]
    ) => {
        #[allow(non_snake_case)]
        impl<F, Response, Err, $($ty,)*> Instantiator<($($ty,)*)> for F
        where
            F: Fn($($ty,)*) -> Result<Response, Err> + 'static,
            Response: SendSafety + SyncSafety + 'static,
            Err: Into<InstantiateErrorKind>,
            ($($ty,)*): DependencyResolver,
        {
            type Provides = Response;
            type Error = Err;

            fn instantiate(&self, ($($ty,)*): ($($ty,)*)) -> Result<Self::Provides, Self::Error> {
                self($($ty,)*)
            }
        }
    };
}

all_the_tuples!(impl_instantiator);

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{boxed_constructor, boxed_instantiator, instantiate, Construct, DependencyResolver, Instantiator};
    use crate::{
        dependency_resolver::Argument,
        errors::{InstantiateErrorKind, InstantiatorErrorKind},
        inject::{Inject, InjectCloned},
        service::Service as _,
        tag::Tag,
        utils::thread_safety::{downcast, erase, RcThreadSafety},
        ResolveErrorKind,
    };

    use alloc::{
        format,
        string::{String, ToString as _},
        vec,
        vec::Vec,
    };
    use core::sync::atomic::{AtomicU8, Ordering};
    use tracing::debug;
    use tracing_test::traced_test;

    struct Request(bool);
    struct Response(bool);

    struct Pool {
        size: u8,
    }

    impl Construct for Pool {
        type Dependencies = (InjectCloned<u8>,);
        type Error = InstantiateErrorKind;

        const PARAMETERS: &'static [&'static str] = &["size"];

        fn construct((InjectCloned(size),): Self::Dependencies) -> Result<Self, Self::Error> {
            if size == 0 {
                return Err(anyhow::anyhow!("pool can't be empty").into());
            }
            Ok(Self { size })
        }
    }

    fn arguments(values: Vec<(&str, u8)>) -> Vec<Argument> {
        values
            .into_iter()
            .map(|(tag, value)| Argument::new(Tag::new(tag).unwrap(), erase(value)))
            .collect()
    }

    #[test]
    #[allow(dead_code)]
    fn test_factory_helper() {
        fn resolver<Deps: DependencyResolver, F: Instantiator<Deps>>(_f: F) {}
        fn resolver_with_dep<Deps: DependencyResolver>() {
            resolver(|| Ok::<_, InstantiateErrorKind>(()));
            resolver(|Inject(_): Inject<u8>| Ok::<_, InstantiateErrorKind>(()));
        }
    }

    #[test]
    #[traced_test]
    fn test_boxed_instantiator() {
        let call_count = RcThreadSafety::new(AtomicU8::new(0));

        let instantiator = boxed_instantiator({
            let call_count = call_count.clone();
            move |Inject(request): Inject<Request>| {
                call_count.fetch_add(1, Ordering::SeqCst);

                debug!("Call instantiator response");
                Ok::<_, InstantiateErrorKind>(Response(request.0))
            }
        });

        let request = Argument::new(Tag::new("request").unwrap(), erase(Request(true)));
        let response = instantiator.call(vec![request.clone()]).unwrap();
        let _ = instantiator.call(vec![request]).unwrap();

        assert!(downcast::<Response>(response).ok().unwrap().0);
        assert_eq!(call_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[traced_test]
    fn test_boxed_instantiator_errors() {
        let instantiator = boxed_instantiator(|InjectCloned(value): InjectCloned<u8>| {
            if value > 1 {
                return Err(InstantiateErrorKind::Custom(anyhow::anyhow!("too big")));
            }
            Ok(value)
        });

        assert!(instantiator.call(arguments(vec![("value", 1)])).is_ok());
        assert!(matches!(
            instantiator.call(arguments(vec![("value", 2)])),
            Err(InstantiatorErrorKind::Factory(_))
        ));
        assert!(matches!(
            instantiator.call(arguments(vec![])),
            Err(InstantiatorErrorKind::Deps(ResolveErrorKind::ArityMismatch { expected: 1, actual: 0 }))
        ));
    }

    #[test]
    #[traced_test]
    fn test_instantiate() {
        let pool = instantiate::<Pool>(arguments(vec![("size", 4)])).unwrap();
        assert_eq!(pool.size, 4);

        assert!(matches!(
            instantiate::<Pool>(arguments(vec![("size", 0)])),
            Err(InstantiatorErrorKind::Factory(_))
        ));
    }

    #[test]
    #[traced_test]
    fn test_boxed_constructor() {
        let constructor = boxed_constructor::<Pool>();
        let pool = constructor.call(arguments(vec![("size", 8)])).unwrap();

        assert_eq!(downcast::<Pool>(pool).ok().unwrap().size, 8);
    }
}
