use serde_json::{Map, Number, Value};
use std::fmt;

/// Validated object output of a [`Shape`](super::Shape).
pub type Record = Map<String, Value>;

/// Null stand-in handed to field validators when a key is missing.
pub(crate) static NULL: Value = Value::Null;

/// Classified validation failure.
///
/// Each variant is terminal for the current validation attempt: the first
/// failing field aborts the surrounding shape with exactly this error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Expected an object, got another variant
    InvalidType,
    /// Not a string, or the string did not match the pattern
    InvalidString,
    /// Not a number (or coercible string) within the configured range
    InvalidNumber,
    /// A valid number with a fractional part, or outside the `i64` range
    InvalidInteger,
    /// Not a boolean (or `"true"`/`"false"` when coercing)
    InvalidBoolean,
    /// The input object carried a field the shape does not declare
    ExtraneousField {
        /// Name of the first undeclared field found
        field: String,
    },
}

impl ValidationError {
    /// Short machine-readable tag for log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::InvalidType => "invalid_type",
            ValidationError::InvalidString => "invalid_string",
            ValidationError::InvalidNumber => "invalid_number",
            ValidationError::InvalidInteger => "invalid_integer",
            ValidationError::InvalidBoolean => "invalid_boolean",
            ValidationError::ExtraneousField { .. } => "extraneous_field",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidType => write!(f, "Not an object"),
            ValidationError::InvalidString => write!(f, "Invalid string"),
            ValidationError::InvalidNumber => write!(f, "Invalid number"),
            ValidationError::InvalidInteger => write!(f, "Invalid integer"),
            ValidationError::InvalidBoolean => write!(f, "Invalid boolean"),
            ValidationError::ExtraneousField { field } => {
                write!(f, "Extraneous field '{}'", field)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validator: one untrusted [`Value`] in, one typed value or a
/// [`ValidationError`] out.
///
/// Implementors hold only configuration fixed at construction, so a single
/// instance can be shared by every concurrent request.
pub trait Validate: Send + Sync {
    /// Typed result of a successful validation
    type Output;

    /// Validate `input` without mutating it.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] describing the first violated constraint.
    fn validate(&self, input: &Value) -> Result<Self::Output, ValidationError>;
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Output = V::Output;

    fn validate(&self, input: &Value) -> Result<Self::Output, ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for std::sync::Arc<V> {
    type Output = V::Output;

    fn validate(&self, input: &Value) -> Result<Self::Output, ValidationError> {
        (**self).validate(input)
    }
}

/// Conversion of a validator output into a shape field.
///
/// `None` is the absent marker: the field is left out of the output record.
pub trait IntoField {
    /// Convert into the stored field value, or `None` when absent
    fn into_field(self) -> Option<Value>;
}

impl IntoField for Value {
    fn into_field(self) -> Option<Value> {
        Some(self)
    }
}

impl IntoField for String {
    fn into_field(self) -> Option<Value> {
        Some(Value::String(self))
    }
}

impl IntoField for bool {
    fn into_field(self) -> Option<Value> {
        Some(Value::Bool(self))
    }
}

impl IntoField for i64 {
    fn into_field(self) -> Option<Value> {
        Some(Value::from(self))
    }
}

impl IntoField for Number {
    fn into_field(self) -> Option<Value> {
        Some(Value::Number(self))
    }
}

impl IntoField for f64 {
    // Non-finite values have no JSON form and count as absent
    fn into_field(self) -> Option<Value> {
        Number::from_f64(self).map(Value::Number)
    }
}

impl IntoField for Record {
    fn into_field(self) -> Option<Value> {
        Some(Value::Object(self))
    }
}

impl<T: IntoField> IntoField for Option<T> {
    fn into_field(self) -> Option<Value> {
        self.and_then(IntoField::into_field)
    }
}

/// Object-safe view of a validator as a shape field.
///
/// Blanket-implemented for every [`Validate`] whose output is [`IntoField`],
/// which lets a shape hold primitives, optionals and nested shapes side by side.
pub trait FieldValidator: Send + Sync {
    /// Validate a field value; `Ok(None)` means the field is absent.
    ///
    /// # Errors
    ///
    /// Propagates the inner validator's [`ValidationError`].
    fn validate_field(&self, input: &Value) -> Result<Option<Value>, ValidationError>;
}

impl<V> FieldValidator for V
where
    V: Validate,
    V::Output: IntoField,
{
    fn validate_field(&self, input: &Value) -> Result<Option<Value>, ValidationError> {
        self.validate(input).map(IntoField::into_field)
    }
}

/// Validator backed by a closure, see [`from_fn`].
pub struct FnValidator<F> {
    f: F,
}

impl<F, T> Validate for FnValidator<F>
where
    F: Fn(&Value) -> Result<T, ValidationError> + Send + Sync,
{
    type Output = T;

    fn validate(&self, input: &Value) -> Result<T, ValidationError> {
        (self.f)(input)
    }
}

/// Wrap a closure as a validator so it composes with the built-in ones.
///
/// ```rust
/// use serde_json::{json, Value};
/// use validize::validator::{from_fn, shape, Validate, ValidationError};
///
/// let even = from_fn(|v: &Value| match v.as_i64() {
///     Some(n) if n % 2 == 0 => Ok(n),
///     _ => Err(ValidationError::InvalidInteger),
/// });
/// let validate = shape().field("n", even);
/// assert!(validate.validate(&json!({"n": 4})).is_ok());
/// assert!(validate.validate(&json!({"n": 3})).is_err());
/// ```
pub fn from_fn<F, T>(f: F) -> FnValidator<F>
where
    F: Fn(&Value) -> Result<T, ValidationError> + Send + Sync,
{
    FnValidator { f }
}
