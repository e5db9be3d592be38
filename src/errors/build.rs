use super::{instantiate::InstantiateErrorKind, producer::ProducerErrorKind, resolve::ResolveErrorKind};
use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum BuildErrorKind {
    #[error(transparent)]
    Producer(#[from] ProducerErrorKind),
    #[error(transparent)]
    Resolve(#[from] ResolveErrorKind),
    #[error("Producer failed: {0}")]
    Instantiate(InstantiateErrorKind),
    #[error("Incorrect type built. Expected: {}", .expected.name)]
    IncorrectType { expected: TypeInfo },
}
