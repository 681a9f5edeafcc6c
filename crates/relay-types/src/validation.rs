//! Configuration validation utilities.
//!
//! Each pluggable backend validates its own TOML table against a [`Schema`]
//! before it is constructed, so configuration mistakes surface at startup with
//! the offending field named in the error.

use crate::utils::{parse_address, parse_amount};
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ValidationError {
	/// A required field is missing.
	#[error("Missing required field: {0}")]
	MissingField(String),
	/// A field has an invalid value.
	#[error("Invalid value for field '{field}': {message}")]
	InvalidValue { field: String, message: String },
	/// A field has the wrong TOML type.
	#[error("Type mismatch for field '{field}': expected {expected}, got {actual}")]
	TypeMismatch {
		field: String,
		expected: String,
		actual: String,
	},
}

/// The expected type of a configuration field.
#[derive(Debug)]
pub enum FieldType {
	String,
	Integer {
		/// Minimum allowed value (inclusive).
		min: Option<i64>,
		/// Maximum allowed value (inclusive).
		max: Option<i64>,
	},
	Boolean,
	/// An array whose elements all have the inner type.
	Array(Box<FieldType>),
	/// A nested table with its own schema.
	Table(Schema),
	/// A table with arbitrary keys whose values all have the inner type.
	Map(Box<FieldType>),
}

/// Custom check run after type validation; returns an error message on failure.
pub type FieldValidator = Box<dyn Fn(&toml::Value) -> Result<(), String> + Send + Sync>;

/// A named field in a schema.
pub struct Field {
	pub name: String,
	pub field_type: FieldType,
	pub validator: Option<FieldValidator>,
}

impl std::fmt::Debug for Field {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Field")
			.field("name", &self.name)
			.field("field_type", &self.field_type)
			.field("validator", &self.validator.is_some())
			.finish()
	}
}

impl Field {
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		Self {
			name: name.into(),
			field_type,
			validator: None,
		}
	}

	/// Adds a custom validator to this field.
	pub fn with_validator<F>(mut self, validator: F) -> Self
	where
		F: Fn(&toml::Value) -> Result<(), String> + Send + Sync + 'static,
	{
		self.validator = Some(Box::new(validator));
		self
	}
}

/// Required and optional fields of a TOML table.
#[derive(Debug)]
pub struct Schema {
	pub required: Vec<Field>,
	pub optional: Vec<Field>,
}

impl Schema {
	pub fn new(required: Vec<Field>, optional: Vec<Field>) -> Self {
		Self { required, optional }
	}

	/// Validates a TOML value against this schema.
	///
	/// Checks that required fields are present, that every present field has
	/// the declared type, and runs custom validators. Nested tables are
	/// validated recursively and their errors carry the dotted field path.
	pub fn validate(&self, config: &toml::Value) -> Result<(), ValidationError> {
		let table = config
			.as_table()
			.ok_or_else(|| ValidationError::TypeMismatch {
				field: "root".to_string(),
				expected: "table".to_string(),
				actual: config.type_str().to_string(),
			})?;

		for field in &self.required {
			let value = table
				.get(&field.name)
				.ok_or_else(|| ValidationError::MissingField(field.name.clone()))?;
			validate_field(field, value)?;
		}

		for field in &self.optional {
			if let Some(value) = table.get(&field.name) {
				validate_field(field, value)?;
			}
		}

		Ok(())
	}
}

fn validate_field(field: &Field, value: &toml::Value) -> Result<(), ValidationError> {
	validate_field_type(&field.name, value, &field.field_type)?;

	if let Some(validator) = &field.validator {
		validator(value).map_err(|message| ValidationError::InvalidValue {
			field: field.name.clone(),
			message,
		})?;
	}

	Ok(())
}

fn type_mismatch(field_name: &str, expected: &str, value: &toml::Value) -> ValidationError {
	ValidationError::TypeMismatch {
		field: field_name.to_string(),
		expected: expected.to_string(),
		actual: value.type_str().to_string(),
	}
}

fn validate_field_type(
	field_name: &str,
	value: &toml::Value,
	expected_type: &FieldType,
) -> Result<(), ValidationError> {
	match expected_type {
		FieldType::String => {
			if !value.is_str() {
				return Err(type_mismatch(field_name, "string", value));
			}
		},
		FieldType::Integer { min, max } => {
			let int_val = value
				.as_integer()
				.ok_or_else(|| type_mismatch(field_name, "integer", value))?;

			if let Some(min_val) = min {
				if int_val < *min_val {
					return Err(ValidationError::InvalidValue {
						field: field_name.to_string(),
						message: format!("Value {} is less than minimum {}", int_val, min_val),
					});
				}
			}
			if let Some(max_val) = max {
				if int_val > *max_val {
					return Err(ValidationError::InvalidValue {
						field: field_name.to_string(),
						message: format!("Value {} is greater than maximum {}", int_val, max_val),
					});
				}
			}
		},
		FieldType::Boolean => {
			if !value.is_bool() {
				return Err(type_mismatch(field_name, "boolean", value));
			}
		},
		FieldType::Array(inner_type) => {
			let array = value
				.as_array()
				.ok_or_else(|| type_mismatch(field_name, "array", value))?;

			for (i, item) in array.iter().enumerate() {
				validate_field_type(&format!("{}[{}]", field_name, i), item, inner_type)?;
			}
		},
		FieldType::Map(inner_type) => {
			let table = value
				.as_table()
				.ok_or_else(|| type_mismatch(field_name, "table", value))?;

			for (key, item) in table {
				validate_field_type(&format!("{}.{}", field_name, key), item, inner_type)?;
			}
		},
		FieldType::Table(schema) => {
			schema
				.validate(value)
				.map_err(|e| prefix_field(field_name, e))?;
		},
	}

	Ok(())
}

fn prefix_field(prefix: &str, error: ValidationError) -> ValidationError {
	match error {
		ValidationError::MissingField(f) => ValidationError::MissingField(format!("{}.{}", prefix, f)),
		ValidationError::InvalidValue { field, message } => ValidationError::InvalidValue {
			field: format!("{}.{}", prefix, field),
			message,
		},
		ValidationError::TypeMismatch {
			field,
			expected,
			actual,
		} => ValidationError::TypeMismatch {
			field: format!("{}.{}", prefix, field),
			expected,
			actual,
		},
	}
}

/// Field validator accepting a hex-encoded 20-byte address string.
pub fn address_validator(value: &toml::Value) -> Result<(), String> {
	let s = value.as_str().ok_or("expected a string")?;
	parse_address(s).map(|_| ())
}

/// Field validator accepting an unsigned 256-bit amount string ("max" allowed).
pub fn amount_validator(value: &toml::Value) -> Result<(), String> {
	let s = value.as_str().ok_or("expected a string")?;
	parse_amount(s).map(|_| ())
}

/// Trait implemented by each backend's configuration schema.
pub trait ConfigSchema: Send + Sync {
	/// Validates a TOML configuration value against this schema.
	fn validate(&self, config: &toml::Value) -> Result<(), ValidationError>;
}
