use super::{producer::ProducerErrorKind, tag::TagErrorKind};

#[derive(thiserror::Error, Debug)]
pub enum RegisterErrorKind {
    #[error("Invalid tag: {0}")]
    InvalidTag(#[from] TagErrorKind),
    #[error(transparent)]
    Producer(#[from] ProducerErrorKind),
}
