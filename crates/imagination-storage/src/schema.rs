//! Avro schema capability and validation.

use apache_avro::Schema;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::TRACING_TARGET_SCHEMA;

/// Metadata key holding the schema full name of a schema-tagged object.
///
/// Reserved: callers must not store anything else under this key.
pub const SCHEMA_REF_KEY: &str = "schema_ref";

/// A type that can report the Avro schema its values conform to.
///
/// The schema is associated with the type rather than a value so that a
/// download can check the stored tag before any value exists. Only named
/// schemas (record, enum, fixed) can tag objects.
///
/// ```rust,ignore
/// static REPORT_SCHEMA: LazyLock<Schema> =
///     LazyLock::new(|| Schema::parse_str(REPORT_AVSC).expect("valid schema"));
///
/// impl SchemaProvider for Report {
///     fn schema() -> &'static Schema {
///         &REPORT_SCHEMA
///     }
/// }
/// ```
pub trait SchemaProvider: Serialize + DeserializeOwned {
    /// The schema values of this type conform to.
    fn schema() -> &'static Schema;
}

/// Returns the full name (`namespace.name`) of a named schema.
pub fn schema_name(schema: &Schema) -> Option<String> {
    schema.name().map(|name| name.fullname(None))
}

/// A value that does not conform to the schema of its type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value does not conform to schema '{schema}': {reason}")]
pub struct SchemaViolation {
    /// Full name of the schema, or `<unnamed>`.
    pub schema: String,
    /// What the Avro encoder rejected.
    pub reason: String,
}

/// Checks that `value` conforms to its own schema by encoding it as an Avro
/// datum and discarding the output.
///
/// The serde-derived datum is resolved against the schema before encoding,
/// so union branches are picked by the schema's order and string values
/// become enum symbols.
pub fn validate<T: SchemaProvider>(value: &T) -> Result<(), SchemaViolation> {
    let schema = T::schema();
    let violation = |reason: String| {
        let schema = schema_name(schema).unwrap_or_else(|| "<unnamed>".to_owned());
        tracing::debug!(
            target: TRACING_TARGET_SCHEMA,
            schema = %schema,
            reason = %reason,
            "Value does not conform to its schema"
        );
        SchemaViolation { schema, reason }
    };

    let datum = apache_avro::to_value(value)
        .and_then(|datum| datum.resolve(schema))
        .map_err(|e| violation(e.to_string()))?;
    apache_avro::to_avro_datum(schema, datum).map_err(|e| violation(e.to_string()))?;

    Ok(())
}
