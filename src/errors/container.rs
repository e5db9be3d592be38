use crate::any::TypeInfo;

#[derive(thiserror::Error, Debug)]
pub enum ContainerErrorKind {
    #[error("Parent must be a container, got a value of another type. Expected: {}", .expected.name)]
    InvalidParent { expected: TypeInfo },
}
