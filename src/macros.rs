macro_rules! all_the_tuples {
    ($name:ident) => {
        $name!([]);
        $name!([T1]);
        $name!([T1, T2]);
        $name!([T1, T2, T3]);
        $name!([T1, T2, T3, T4]);
        $name!([T1, T2, T3, T4, T5]);
        $name!([T1, T2, T3, T4, T5, T6]);
        $name!([T1, T2, T3, T4, T5, T6, T7]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11]);
        $name!([T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12]);
    };
}

macro_rules! replace_expr {
    ($_t:tt $sub:expr) => {
        $sub
    };
}

/// Creates a [`Callable`](crate::Callable) and captures its declared parameter names,
/// so it can be registered without an explicit dependency list.
///
/// Every parameter needs an identifier and a type. Closures and functions return
/// `Result<T, InstantiateErrorKind>`.
///
/// # Examples
/// ```rust
/// use somersault::{callable, instance, Container, Inject};
///
/// struct Database(String);
///
/// let container = Container::new();
/// container.register("connection", instance(String::from("postgres://"))).unwrap();
/// container
///     .register("database", callable!(|connection: Inject<String>| Ok(Database((*connection.0).clone()))))
///     .unwrap();
///
/// let database = container.resolve::<Database>("database").unwrap();
/// assert_eq!(database.0, "postgres://");
/// ```
///
/// `async` callables and methods with a receiver are accepted here, but registering them fails:
/// they match neither invocation convention.
#[macro_export]
macro_rules! callable {
    (async $($rest:tt)*) => {
        $crate::Callable::unrecognized(stringify!(async $($rest)*), $crate::Shape::Async)
    };
    (fn $name:ident ( & $($rest:tt)* ) $($tail:tt)*) => {
        $crate::Callable::unrecognized(stringify!($name), $crate::Shape::Method)
    };
    (fn $name:ident ( self $($rest:tt)* ) $($tail:tt)*) => {
        $crate::Callable::unrecognized(stringify!($name), $crate::Shape::Method)
    };
    (fn $name:ident ( $($param:ident : $ty:ty),* $(,)? ) -> $ret:ty $body:block) => {{
        fn $name($($param: $ty),*) -> $ret $body

        $crate::Callable::with_parameters($name, stringify!($name), &[$(stringify!($param)),*], $crate::Shape::Function)
    }};
    (move || $body:expr) => {
        $crate::Callable::with_parameters(move || $body, "closure", &[], $crate::Shape::Closure)
    };
    (|| $body:expr) => {
        $crate::Callable::with_parameters(|| $body, "closure", &[], $crate::Shape::Closure)
    };
    (move | $($param:ident : $ty:ty),* $(,)? | $body:expr) => {
        $crate::Callable::with_parameters(
            move |$($param: $ty),*| $body,
            "closure",
            &[$(stringify!($param)),*],
            $crate::Shape::Closure,
        )
    };
    (| $($param:ident : $ty:ty),* $(,)? | $body:expr) => {
        $crate::Callable::with_parameters(
            |$($param: $ty),*| $body,
            "closure",
            &[$(stringify!($param)),*],
            $crate::Shape::Closure,
        )
    };
}

/// Implements [`Construct`](crate::Construct) for a type from the associated function that creates it.
/// The function's parameter identifiers become the type's dependency tags.
///
/// # Examples
/// ```rust
/// use somersault::{construct, instance, Callable, Container, Inject, InstantiateErrorKind};
///
/// struct Database {
///     connection: String,
/// }
///
/// construct! {
///     impl Database {
///         pub fn new(connection_string: Inject<String>) -> Result<Self, InstantiateErrorKind> {
///             Ok(Self { connection: (*connection_string.0).clone() })
///         }
///     }
/// }
///
/// let container = Container::new();
/// container.register("connection_string", instance(String::from("sqlite::memory:"))).unwrap();
/// container.register("database", Callable::constructor::<Database>()).unwrap();
///
/// assert_eq!(container.resolve::<Database>("database").unwrap().connection, "sqlite::memory:");
/// ```
#[macro_export]
macro_rules! construct {
    (
        impl $ty:ident {
            $vis:vis fn $name:ident ( $($param:ident : $pty:ty),* $(,)? ) -> Result<Self, $err:ty> $body:block
        }
    ) => {
        impl $ty {
            $vis fn $name($($param: $pty),*) -> Result<Self, $err> $body
        }

        impl $crate::Construct for $ty {
            type Dependencies = ($($pty,)*);
            type Error = $err;

            const PARAMETERS: &'static [&'static str] = &[$(stringify!($param)),*];

            #[inline]
            fn construct(($($param,)*): Self::Dependencies) -> Result<Self, Self::Error> {
                Self::$name($($param),*)
            }
        }
    };
}
