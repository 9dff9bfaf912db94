use super::core::{Validate, ValidationError};
use regex::Regex;
use serde_json::{Number, Value};

/// Accepts strings whose whole text matches a regular expression.
#[derive(Debug, Clone)]
pub struct StringValidator {
    pattern: Regex,
}

impl StringValidator {
    /// Compile `pattern`, anchored at both ends.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error for an invalid pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self { pattern })
    }
}

impl Validate for StringValidator {
    type Output = String;

    fn validate(&self, input: &Value) -> Result<String, ValidationError> {
        match input {
            Value::String(s) if self.pattern.is_match(s) => Ok(s.clone()),
            _ => Err(ValidationError::InvalidString),
        }
    }
}

/// Accepts real numbers in an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberValidator {
    min: f64,
    max: f64,
    coerce: bool,
}

impl NumberValidator {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            coerce: false,
        }
    }

    /// Also accept strings holding a number, e.g. query or route values.
    #[must_use]
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }
}

/// Whole-string parse; `"3abc"`, `" 3"`, `"inf"` and `"NaN"` are all rejected.
///
/// Integer text is decoded exactly before falling back to `f64`.
fn parse_strict(s: &str) -> Option<Number> {
    if let Ok(i) = s.parse::<i64>() {
        return Some(Number::from(i));
    }
    if let Ok(u) = s.parse::<u64>() {
        return Some(Number::from(u));
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

fn integral(n: &Number) -> Option<i128> {
    n.as_i64()
        .map(i128::from)
        .or_else(|| n.as_u64().map(i128::from))
}

impl NumberValidator {
    fn decode(&self, input: &Value) -> Option<Number> {
        match input {
            Value::Number(n) => Some(n.clone()),
            Value::String(s) if self.coerce => parse_strict(s),
            _ => None,
        }
    }

    fn contains(&self, n: &Number) -> bool {
        if self.min.is_nan() || self.max.is_nan() {
            return false;
        }
        match integral(n) {
            // Exact comparison; `as` saturates infinite bounds
            Some(i) => i >= self.min.ceil() as i128 && i <= self.max.floor() as i128,
            None => n
                .as_f64()
                .is_some_and(|f| !f.is_nan() && f >= self.min && f <= self.max),
        }
    }
}

impl Validate for NumberValidator {
    type Output = Number;

    /// A number input is returned as given, never re-encoded.
    fn validate(&self, input: &Value) -> Result<Number, ValidationError> {
        self.decode(input)
            .filter(|n| self.contains(n))
            .ok_or(ValidationError::InvalidNumber)
    }
}

/// A [`NumberValidator`] that additionally requires a whole number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegerValidator {
    number: NumberValidator,
}

impl IntegerValidator {
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            number: NumberValidator::new(min, max),
        }
    }

    /// Also accept strings holding an integer.
    #[must_use]
    pub fn coerce(mut self) -> Self {
        self.number = self.number.coerce();
        self
    }
}

impl Validate for IntegerValidator {
    type Output = i64;

    fn validate(&self, input: &Value) -> Result<i64, ValidationError> {
        let n = self.number.validate(input)?;
        if let Some(i) = n.as_i64() {
            return Ok(i);
        }
        match n.as_f64() {
            // i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
            Some(f)
                if n.is_f64()
                    && f.fract() == 0.0
                    && f >= i64::MIN as f64
                    && f < i64::MAX as f64 =>
            {
                Ok(f as i64)
            }
            _ => Err(ValidationError::InvalidInteger),
        }
    }
}

/// Accepts booleans, and with coercion the exact strings `"true"`/`"false"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanValidator {
    coerce: bool,
}

impl BooleanValidator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn coerce(mut self) -> Self {
        self.coerce = true;
        self
    }
}

impl Validate for BooleanValidator {
    type Output = bool;

    fn validate(&self, input: &Value) -> Result<bool, ValidationError> {
        match input {
            Value::Bool(b) => Ok(*b),
            Value::String(s) if self.coerce => match s.as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(ValidationError::InvalidBoolean),
            },
            _ => Err(ValidationError::InvalidBoolean),
        }
    }
}

/// String validator for `pattern`, matched against the whole value.
///
/// # Errors
///
/// Returns the regex compile error for an invalid pattern.
pub fn string(pattern: &str) -> Result<StringValidator, regex::Error> {
    StringValidator::new(pattern)
}

/// Number validator for the inclusive range `[min, max]`.
#[must_use]
pub fn number(min: f64, max: f64) -> NumberValidator {
    NumberValidator::new(min, max)
}

/// Integer validator for the inclusive range `[min, max]`.
#[must_use]
pub fn integer(min: f64, max: f64) -> IntegerValidator {
    IntegerValidator::new(min, max)
}

#[must_use]
pub fn boolean() -> BooleanValidator {
    BooleanValidator::new()
}
