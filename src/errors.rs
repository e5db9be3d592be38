mod build;
mod container;
mod instantiate;
mod instantiator;
mod producer;
mod register;
mod resolve;
mod tag;

pub use build::BuildErrorKind;
pub use container::ContainerErrorKind;
pub use instantiate::InstantiateErrorKind;
pub use instantiator::InstantiatorErrorKind;
pub use producer::{DependencyListErrorKind, ProducerErrorKind};
pub use register::RegisterErrorKind;
pub use resolve::ResolveErrorKind;
pub use tag::TagErrorKind;
