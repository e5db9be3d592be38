//! Structural analysis of callables.
//!
//! Rust erases parameter names at runtime, so a [`Signature`] is captured where the callable is written:
//! [`callable!`](crate::callable) and [`construct!`](crate::construct) record the declared identifiers
//! with `stringify!`, while [`Callable::new`](crate::Callable::new) only knows the arity.
//! Nothing here ever invokes the callable.

use alloc::vec::Vec;
use core::fmt::{self, Display, Formatter};

use crate::tag::Tag;

/// Syntactic form a callable was declared with
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Closure,
    Function,
    Constructor,
    Async,
    Method,
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Closure => "a closure",
            Shape::Function => "a function",
            Shape::Constructor => "a constructor",
            Shape::Async => "an async callable",
            Shape::Method => "a method taking an explicit receiver",
        })
    }
}

/// How a callable has to be invoked
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    /// Called directly with the resolved arguments
    PlainCallable,
    /// Allocates an owned instance and initializes it with the resolved arguments
    ImplicitSelfConstructor,
    Unrecognized,
}

impl Kind {
    /// Invocation strategy stored alongside a registration, `None` for [`Kind::Unrecognized`]
    #[inline]
    #[must_use]
    pub const fn invocation(self) -> Option<Invocation> {
        match self {
            Kind::PlainCallable => Some(Invocation::Call),
            Kind::ImplicitSelfConstructor => Some(Invocation::Instantiate),
            Kind::Unrecognized => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invocation {
    Call,
    Instantiate,
}

#[derive(Clone, Copy, Debug)]
pub struct Signature {
    pub(crate) name: &'static str,
    pub(crate) shape: Shape,
    pub(crate) parameters: Option<&'static [&'static str]>,
    pub(crate) arity: usize,
}

impl Signature {
    #[inline]
    #[must_use]
    pub const fn new(name: &'static str, shape: Shape, parameters: Option<&'static [&'static str]>, arity: usize) -> Self {
        Self {
            name,
            shape,
            parameters,
            arity,
        }
    }

    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Number of positional arguments the callable expects
    #[inline]
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }
}

#[must_use]
pub fn classify(signature: &Signature) -> Kind {
    match signature.shape {
        Shape::Closure | Shape::Function => Kind::PlainCallable,
        Shape::Constructor => Kind::ImplicitSelfConstructor,
        Shape::Async | Shape::Method => Kind::Unrecognized,
    }
}

/// Recovers declared parameter names in left-to-right order.
///
/// Returns an empty list when the names weren't captured, when their count disagrees with the arity,
/// or when one of them can't be used as a tag.
#[must_use]
pub fn extract_parameter_names(signature: &Signature) -> Vec<Tag> {
    let Some(parameters) = signature.parameters else {
        return Vec::new();
    };
    if parameters.len() != signature.arity {
        return Vec::new();
    }

    let mut names = Vec::with_capacity(parameters.len());
    for parameter in parameters {
        let parameter = parameter.trim();
        let parameter = parameter.strip_prefix("r#").unwrap_or(parameter);
        match Tag::new(parameter) {
            Ok(tag) => names.push(tag),
            Err(_) => return Vec::new(),
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::{classify, extract_parameter_names, Invocation, Kind, Shape, Signature};

    use alloc::vec::Vec;

    #[test]
    fn test_classify() {
        let cases = [
            (Shape::Closure, Kind::PlainCallable),
            (Shape::Function, Kind::PlainCallable),
            (Shape::Constructor, Kind::ImplicitSelfConstructor),
            (Shape::Async, Kind::Unrecognized),
            (Shape::Method, Kind::Unrecognized),
        ];
        for (shape, kind) in cases {
            assert_eq!(classify(&Signature::new("producer", shape, None, 0)), kind);
        }

        assert_eq!(Kind::PlainCallable.invocation(), Some(Invocation::Call));
        assert_eq!(Kind::ImplicitSelfConstructor.invocation(), Some(Invocation::Instantiate));
        assert_eq!(Kind::Unrecognized.invocation(), None);
    }

    #[test]
    fn test_extract_declared_names() {
        let signature = Signature::new("producer", Shape::Closure, Some(&["database", "r#type", " config "]), 3);
        let names = extract_parameter_names(&signature);
        let names: Vec<&str> = names.iter().map(|tag| tag.as_str()).collect();

        assert_eq!(names, ["database", "type", "config"]);
    }

    #[test]
    fn test_extract_defaults_to_empty() {
        let unknown = Signature::new("producer", Shape::Closure, None, 2);
        let mismatched = Signature::new("producer", Shape::Function, Some(&["a"]), 2);
        let blank = Signature::new("producer", Shape::Function, Some(&["a", " "]), 2);

        assert!(extract_parameter_names(&unknown).is_empty());
        assert!(extract_parameter_names(&mismatched).is_empty());
        assert!(extract_parameter_names(&blank).is_empty());
    }
}
