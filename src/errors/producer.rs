use crate::signature::Shape;

#[derive(thiserror::Error, Debug)]
pub enum DependencyListErrorKind {
    #[error("Dependency id at position {position} is empty or whitespace")]
    Blank { position: usize },
    #[error(
        "\
        Producer expects {expected} dependencies, but {actual} dependency ids are known. \
        Pass dependency ids explicitly if parameter names can't be introspected\
        "
    )]
    ArityMismatch { expected: usize, actual: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum ProducerErrorKind {
    #[error("Producer isn't callable, only callables can be built")]
    Missing,
    #[error("Invalid dependency list: {0}")]
    InvalidDependencyList(#[from] DependencyListErrorKind),
    #[error("Producer `{name}` is {shape}, which is neither a plain callable nor a constructor")]
    Unrecognized { name: &'static str, shape: Shape },
}
