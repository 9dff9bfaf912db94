use super::core::{Validate, ValidationError};
use serde_json::Value;

/// Accepts any value unchanged. Only useful inside [`Optional`], see [`present`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unchecked;

impl Validate for Unchecked {
    type Output = Value;

    fn validate(&self, input: &Value) -> Result<Value, ValidationError> {
        Ok(input.clone())
    }
}

/// Makes the wrapped validator accept absence.
///
/// Null (which is also what a shape passes for a missing key) yields `None`,
/// the absent marker, without running the inner validator.
#[derive(Debug, Clone)]
pub struct Optional<V> {
    inner: V,
}

impl<V: Validate> Validate for Optional<V> {
    type Output = Option<V::Output>;

    fn validate(&self, input: &Value) -> Result<Self::Output, ValidationError> {
        if input.is_null() {
            return Ok(None);
        }
        self.inner.validate(input).map(Some)
    }
}

pub fn optional<V: Validate>(inner: V) -> Optional<V> {
    Optional { inner }
}

/// Optional field with no check beyond presence.
#[must_use]
pub fn present() -> Optional<Unchecked> {
    Optional { inner: Unchecked }
}
