#![no_std]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod config;
pub(crate) mod container;
pub(crate) mod context;
pub(crate) mod dependency_resolver;
pub(crate) mod errors;
pub(crate) mod filter;
pub(crate) mod inject;
pub(crate) mod instantiator;
pub(crate) mod producer;
pub(crate) mod registry;
pub(crate) mod service;
pub(crate) mod signature;
pub(crate) mod tag;

pub mod utils;

pub use any::TypeInfo;
pub use config::Config;
pub use container::{create_container, Container};
pub use dependency_resolver::{Argument, Dependency, DependencyResolver};
pub use errors::{
    BuildErrorKind, ContainerErrorKind, DependencyListErrorKind, InstantiateErrorKind, InstantiatorErrorKind, ProducerErrorKind,
    RegisterErrorKind, ResolveErrorKind, TagErrorKind,
};
pub use filter::TagFilter;
pub use inject::{Inject, InjectCloned};
pub use instantiator::{instantiate, Construct, Instantiator};
pub use producer::{instance, Callable, Producer};
pub use signature::{classify, extract_parameter_names, Invocation, Kind, Shape, Signature};
pub use tag::{IntoTags, Tag, CONTAINER_TAG};
