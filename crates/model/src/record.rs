use serde_json::Value;

use crate::entity::{Fields, ModelError};

/// Read-only named-field view over a metadata object such as `info`.
///
/// The field set is whatever the source document holds, so two records of the
/// same kind may expose different fields.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    kind: &'static str,
    fields: &'a Fields,
}

impl<'a> Record<'a> {
    pub fn new(kind: &'static str, fields: &'a Fields) -> Self {
        Self { kind, fields }
    }

    /// Build a record from the required object field `field` of `owner`.
    pub(crate) fn from_field(
        owner: &'static str,
        fields: &'a Fields,
        field: &str,
        kind: &'static str,
    ) -> Result<Self, ModelError> {
        let value = fields
            .get(field)
            .ok_or_else(|| ModelError::MissingAttribute {
                entity: owner,
                name: field.into(),
            })?;
        let object = value.as_object().ok_or_else(|| ModelError::UnexpectedShape {
            entity: owner,
            field: field.into(),
            expected: "an object",
        })?;
        Ok(Self::new(kind, object))
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Named accessor. A field the record does not carry is a
    /// [`ModelError::MissingAttribute`].
    pub fn get(&self, name: &str) -> Result<&'a Value, ModelError> {
        self.fields
            .get(name)
            .ok_or_else(|| ModelError::MissingAttribute {
                entity: self.kind,
                name: name.into(),
            })
    }

    pub fn lookup(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + use<'a> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_fields(&self) -> &'a Fields {
        self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn exposes_exactly_the_source_keys() {
        let doc = object(json!({ "info": { "title": "Maze", "videoOn": false, "flashVersion": null } }));
        let info = Record::from_field("Project", &doc, "info", "ProjectInfo").unwrap();

        let names: Vec<&str> = info.field_names().collect();
        assert_eq!(names, ["title", "videoOn", "flashVersion"]);
        assert_eq!(info.len(), 3);
        assert_eq!(info.get("title").unwrap(), &json!("Maze"));
        assert_eq!(info.get("flashVersion").unwrap(), &Value::Null);

        let source = doc["info"].as_object().unwrap();
        assert!(std::ptr::eq(info.as_fields(), source));
    }

    #[test]
    fn unknown_field_is_missing_attribute() {
        let doc = object(json!({ "info": { "title": "Maze" } }));
        let info = Record::from_field("Project", &doc, "info", "ProjectInfo").unwrap();
        assert_eq!(
            info.get("author").unwrap_err(),
            ModelError::MissingAttribute {
                entity: "ProjectInfo",
                name: "author".into(),
            }
        );
        assert!(info.lookup("author").is_none());
    }

    #[test]
    fn missing_source_field_is_reported_on_owner() {
        let doc = object(json!({ "children": [] }));
        let err = Record::from_field("Project", &doc, "info", "ProjectInfo").unwrap_err();
        assert_eq!(
            err,
            ModelError::MissingAttribute {
                entity: "Project",
                name: "info".into(),
            }
        );
    }

    #[test]
    fn non_object_source_is_rejected() {
        let doc = object(json!({ "info": [1, 2] }));
        let err = Record::from_field("Project", &doc, "info", "ProjectInfo").unwrap_err();
        assert!(matches!(err, ModelError::UnexpectedShape { .. }));
    }

    #[test]
    fn records_of_same_kind_can_differ() {
        let a = object(json!({ "x": 1 }));
        let b = object(json!({ "y": 2, "z": 3 }));
        let ra = Record::new("SpriteInfo", &a);
        let rb = Record::new("SpriteInfo", &b);
        assert_eq!(ra.kind(), rb.kind());
        assert!(ra.has_field("x") && !rb.has_field("x"));
        assert_eq!(rb.iter().count(), 2);
    }
}
