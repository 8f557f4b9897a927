use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::timestamp::TimestampError;

/// An error raised while rebuilding objects from a structure.
///
/// The first failure aborts hydration; no partial object is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HydrateError {
    /// The class has neither a factory hook nor a zero-argument constructor.
    #[error("`{type_path}` has neither a factory hook nor a zero-argument constructor")]
    MissingConstructionPath { type_path: &'static str },
    /// A structure does not have the shape its target expects.
    #[error("expected {expected}, found {found}")]
    IncompatibleType {
        expected: Cow<'static, str>,
        found: Cow<'static, str>,
    },
    /// No field or settable property is called `name`.
    #[error("`{type_path}` has no settable attribute `{name}`")]
    UnresolvableAttribute {
        type_path: &'static str,
        name: String,
    },
    #[error(transparent)]
    InvalidTimestamp(#[from] TimestampError),
    /// A failure while assigning attribute `name`.
    #[error("attribute `{name}` of `{type_path}`: {source}")]
    InAttribute {
        type_path: &'static str,
        name: String,
        #[source]
        source: Box<HydrateError>,
    },
}

impl HydrateError {
    #[inline]
    pub fn incompatible(
        expected: impl Into<Cow<'static, str>>,
        found: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::IncompatibleType {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Wraps `self` with the attribute it happened in.
    #[inline]
    pub fn in_attribute(self, type_path: &'static str, name: &str) -> Self {
        Self::InAttribute {
            type_path,
            name: name.into(),
            source: Box::new(self),
        }
    }

    /// Strips every [`HydrateError::InAttribute`] layer.
    pub fn root_cause(&self) -> &HydrateError {
        let mut error = self;
        while let Self::InAttribute { source, .. } = error {
            error = &**source;
        }
        error
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::HydrateError;

    #[test]
    fn root_cause_and_display() {
        let error = HydrateError::incompatible("string", "number")
            .in_attribute("a::Member", "name")
            .in_attribute("a::Group", "members");

        assert_eq!(
            error.to_string(),
            "attribute `members` of `a::Group`: attribute `name` of `a::Member`: expected string, found number"
        );
        assert!(matches!(
            error.root_cause(),
            HydrateError::IncompatibleType { expected, .. } if expected == "string"
        ));
    }
}
