//! Validation of raw client input
//!
//! Every request field passes through here before a store is touched. Values
//! arrive as untyped JSON (or a path segment) so that "field missing",
//! "field present but not an integer" and "integer out of range" stay
//! distinguishable.
//!
//! Integers may be sent as JSON numbers or as strings holding a base-10
//! integer. Floats, booleans, null, arrays and objects are rejected.

use serde_json::{Map, Value};

use crate::types::{NewProduct, ProductId, Quantity, ValidationError};

/// Wire name of the ID field
pub const ID_FIELD: &str = "id";
/// Accepted names of the product name field, canonical first
pub const NAME_FIELDS: [&str; 2] = ["nombre", "name"];
/// Accepted names of the quantity field, canonical first
pub const QUANTITY_FIELDS: [&str; 2] = ["cantidad", "quantity"];

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::String(s) => format!("'{}' is not an integer", s),
        Value::Number(n) => format!("{} is not an integer", n),
        Value::Null => "null is not an integer".to_string(),
        Value::Bool(_) => "boolean is not an integer".to_string(),
        Value::Array(_) => "array is not an integer".to_string(),
        Value::Object(_) => "object is not an integer".to_string(),
    }
}

/// Validate a product ID: an integer > 0
pub fn validate_id(value: &Value) -> Result<ProductId, ValidationError> {
    let raw = as_integer(value).ok_or_else(|| ValidationError::InvalidId(describe(value)))?;
    ProductId::new(raw)
}

/// Validate a product ID taken from a URL path segment
pub fn parse_id(segment: &str) -> Result<ProductId, ValidationError> {
    let raw = segment
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidId(format!("'{}' is not an integer", segment)))?;
    ProductId::new(raw)
}

/// Validate a stock quantity: an integer >= 0
pub fn validate_quantity(value: &Value) -> Result<Quantity, ValidationError> {
    let raw =
        as_integer(value).ok_or_else(|| ValidationError::InvalidQuantity(describe(value)))?;
    Quantity::new(raw)
}

/// Validate a restock amount: an integer > 0
pub fn validate_amount(value: &Value) -> Result<Quantity, ValidationError> {
    let quantity = validate_quantity(value)?;
    if quantity == Quantity::ZERO {
        return Err(ValidationError::InvalidQuantity(
            "amount to add must be positive".to_string(),
        ));
    }
    Ok(quantity)
}

/// Validate a product name: any JSON string
pub fn validate_name(value: &Value) -> Result<String, ValidationError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ValidationError::InvalidName("name must be a string".to_string()))
}

/// Borrow the body as a JSON object
pub fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object().ok_or_else(|| {
        ValidationError::MalformedBody("request body must be a JSON object".to_string())
    })
}

/// Look up a required field under any of its accepted names
///
/// The error names the first (canonical) entry of `names`.
pub fn require_field<'a>(
    body: &'a Map<String, Value>,
    names: &[&'static str],
) -> Result<&'a Value, ValidationError> {
    names
        .iter()
        .find_map(|name| body.get(*name))
        .ok_or(ValidationError::MissingField(names[0]))
}

/// Validate a create body `{id, nombre, cantidad}`
///
/// All three fields are checked for presence before any is checked for
/// shape, so a body missing a field always reports the missing field.
pub fn parse_create_body(body: &Value) -> Result<NewProduct, ValidationError> {
    let body = as_object(body)?;
    let id = require_field(body, &[ID_FIELD])?;
    let name = require_field(body, &NAME_FIELDS)?;
    let quantity = require_field(body, &QUANTITY_FIELDS)?;

    Ok(NewProduct::with_id(
        validate_id(id)?,
        validate_name(name)?,
        validate_quantity(quantity)?,
    ))
}

/// Validate an update body `{cantidad}`
pub fn parse_quantity_body(body: &Value) -> Result<Quantity, ValidationError> {
    let body = as_object(body)?;
    validate_quantity(require_field(body, &QUANTITY_FIELDS)?)
}

/// Validate a restock body `{cantidad}` holding the amount to add
pub fn parse_amount_body(body: &Value) -> Result<Quantity, ValidationError> {
    let body = as_object(body)?;
    validate_amount(require_field(body, &QUANTITY_FIELDS)?)
}
