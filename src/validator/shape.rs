use super::core::{FieldValidator, Record, Validate, ValidationError, NULL};
use serde_json::Value;
use std::fmt;
use tracing::{trace, warn};

/// Closed object validator built from an ordered list of field validators.
///
/// Fields are checked in declaration order and the first failure wins. Once
/// every declared field has passed, any undeclared key in the input is
/// rejected with [`ValidationError::ExtraneousField`].
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use validize::validator::{integer, optional, shape, string, Validate};
///
/// let validate = shape()
///     .field("i", integer(1.0, 3.0))
///     .field("s", optional(string("[a-f]+").unwrap()));
///
/// let record = validate.validate(&json!({"i": 2, "s": null})).unwrap();
/// assert_eq!(serde_json::Value::Object(record), json!({"i": 2}));
/// ```
#[derive(Default)]
pub struct Shape {
    fields: Vec<(String, Box<dyn FieldValidator>)>,
}

impl Shape {
    /// Shape with no fields: accepts exactly the empty object.
    #[must_use]
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    /// Declare `name`, validated by `validator`.
    ///
    /// Declaring a name twice replaces the earlier validator but keeps the
    /// original position in the validation order.
    #[must_use]
    pub fn field<V>(mut self, name: impl Into<String>, validator: V) -> Self
    where
        V: FieldValidator + 'static,
    {
        let name = name.into();
        let validator: Box<dyn FieldValidator> = Box::new(validator);

        if let Some(slot) = self.fields.iter_mut().find(|(n, _)| *n == name) {
            warn!(field = %name, "Replaced existing shape field validator");
            slot.1 = validator;
        } else {
            self.fields.push((name, validator));
        }
        self
    }

    /// Declared field names, in validation order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|(n, _)| n == name)
    }
}

impl Validate for Shape {
    type Output = Record;

    fn validate(&self, input: &Value) -> Result<Record, ValidationError> {
        let Value::Object(object) = input else {
            return Err(ValidationError::InvalidType);
        };

        let mut record = Record::new();
        for (name, validator) in &self.fields {
            let value = object.get(name).unwrap_or(&NULL);
            match validator.validate_field(value) {
                Ok(Some(validated)) => {
                    record.insert(name.clone(), validated);
                }
                Ok(None) => {}
                Err(err) => {
                    trace!(field = %name, error = %err, "Shape field rejected");
                    return Err(err);
                }
            }
        }

        if let Some(extra) = object.keys().find(|key| !self.declares(key)) {
            trace!(field = %extra, "Shape rejected undeclared field");
            return Err(ValidationError::ExtraneousField {
                field: extra.clone(),
            });
        }

        Ok(record)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Start an empty [`Shape`]; add fields with [`Shape::field`].
#[must_use]
pub fn shape() -> Shape {
    Shape::empty()
}
