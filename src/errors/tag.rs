use crate::tag::{Tag, CONTAINER_TAG};

#[derive(thiserror::Error, Debug)]
pub enum TagErrorKind {
    #[error("No tags specified")]
    Empty,
    #[error("Tag at position {position} is empty or whitespace")]
    Blank { position: usize },
    #[error("Tag `{tag}` is reserved. `{}` always resolves to the requesting container", CONTAINER_TAG)]
    Reserved { tag: Tag },
}
