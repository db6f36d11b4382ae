use serde_json::{Map, Value};

/// A decoded JSON object: field name to raw value, in document order.
pub type Fields = Map<String, Value>;

/// Errors from reading entity fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("{entity} has no attribute '{name}'")]
    MissingAttribute { entity: &'static str, name: String },
    #[error("{entity}.{field} is not {expected}")]
    UnexpectedShape {
        entity: &'static str,
        field: String,
        expected: &'static str,
    },
}

/// Dynamic field access over one decoded JSON object.
///
/// Implementors only expose the wrapped mapping; lookups never copy or
/// validate anything.
pub trait Entity {
    /// Name used in error messages.
    const KIND: &'static str;

    fn fields(&self) -> &Fields;

    /// The raw value stored under `name`, or `None` if the key is absent.
    ///
    /// A field stored as JSON `null` is `Some(&Value::Null)`.
    fn get(&self, name: &str) -> Option<&Value> {
        self.fields().get(name)
    }

    /// Like [`Entity::get`], but a missing key is a [`ModelError::MissingAttribute`].
    fn get_required(&self, name: &str) -> Result<&Value, ModelError> {
        self.get(name).ok_or_else(|| ModelError::MissingAttribute {
            entity: Self::KIND,
            name: name.into(),
        })
    }

    fn get_or<'v>(&'v self, name: &str, default: &'v Value) -> &'v Value {
        self.get(name).unwrap_or(default)
    }

    fn contains(&self, name: &str) -> bool {
        self.fields().contains_key(name)
    }

    fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields().keys().map(String::as_str)
    }
}

/// Wrap every object in the optional array `field` of `fields`.
///
/// An absent field yields an empty vector. A present field must be an array
/// of objects.
pub(crate) fn wrap_objects<'a, T>(
    fields: &'a Fields,
    entity: &'static str,
    field: &str,
    wrap: impl Fn(&'a Fields) -> T,
) -> Result<Vec<T>, ModelError> {
    match fields.get(field) {
        None => Ok(Vec::new()),
        Some(value) => wrap_array(value, entity, field, wrap),
    }
}

pub(crate) fn wrap_array<'a, T>(
    value: &'a Value,
    entity: &'static str,
    field: &str,
    wrap: impl Fn(&'a Fields) -> T,
) -> Result<Vec<T>, ModelError> {
    let items = value.as_array().ok_or_else(|| ModelError::UnexpectedShape {
        entity,
        field: field.into(),
        expected: "an array",
    })?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_object()
                .map(&wrap)
                .ok_or_else(|| ModelError::UnexpectedShape {
                    entity,
                    field: format!("{field}[{i}]"),
                    expected: "an object",
                })
        })
        .collect()
}
