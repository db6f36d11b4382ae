use crate::entity::{Entity, Fields, ModelError, wrap_array};
use crate::objects::{Child, ScratchObject};
use crate::record::Record;
use crate::sprite::Sprite;

/// Shared view over a project document, whether latest or historical.
pub trait ProjectView: ScratchObject {
    /// Project metadata. Required.
    fn info(&self) -> Result<Record<'_>, ModelError> {
        Record::from_field(Self::KIND, self.fields(), "info", "ProjectInfo")
    }

    /// All children in document order, classified as sprite or generic.
    fn children(&self) -> Result<Vec<Child<'_>>, ModelError> {
        let value = self.get_required("children")?;
        wrap_array(value, Self::KIND, "children", Child::classify)
    }

    fn sprites(&self) -> Result<Vec<Sprite<'_>>, ModelError> {
        Ok(self
            .children()?
            .into_iter()
            .filter_map(Child::into_sprite)
            .collect())
    }

    /// Whether any sprite defines a custom block.
    ///
    /// Children that are not objects are skipped rather than rejected. Stops
    /// at the first sprite with a definition.
    fn uses_make_a_block(&self) -> Result<bool, ModelError> {
        let children = self
            .get_required("children")?
            .as_array()
            .ok_or_else(|| ModelError::UnexpectedShape {
                entity: Self::KIND,
                field: "children".into(),
                expected: "an array",
            })?;
        let found = children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| Some((index, child.as_object()?)))
            .filter_map(|(index, fields)| Some((index, Child::classify(fields).into_sprite()?)))
            .find(|(_, sprite)| sprite.has_make_a_block());
        if let Some((index, _)) = found {
            tracing::debug!(child = index, "found custom block definition");
        }
        Ok(found.is_some())
    }
}

/// One decoded project snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectRevision {
    fields: Fields,
}

impl ProjectRevision {
    pub fn new(fields: Fields) -> Self {
        Self { fields }
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }
}

impl Entity for ProjectRevision {
    const KIND: &'static str = "ProjectRevision";

    fn fields(&self) -> &Fields {
        &self.fields
    }
}

impl ScratchObject for ProjectRevision {}

impl ProjectView for ProjectRevision {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn revision(value: Value) -> ProjectRevision {
        match value {
            Value::Object(map) => ProjectRevision::new(map),
            other => panic!("expected object, got {other}"),
        }
    }

    fn sprite(name: &str, scripts: Value) -> Value {
        json!({
            "info": { "spriteInfo": {}, "objName": name },
            "scripts": scripts,
        })
    }

    #[test]
    fn zero_sprites_never_use_make_a_block() {
        let project = revision(json!({
            "info": {},
            "children": [{ "info": { "target": "Stage" } }],
        }));
        assert!(project.sprites().unwrap().is_empty());
        assert!(!project.uses_make_a_block().unwrap());

        let empty = revision(json!({ "info": {}, "children": [] }));
        assert!(!empty.uses_make_a_block().unwrap());
    }

    #[test]
    fn nested_definition_is_detected() {
        let project = revision(json!({
            "info": {},
            "children": [sprite("Cat", json!([[{ "procDef": "..." }]]))],
        }));
        assert!(project.uses_make_a_block().unwrap());
    }

    #[test]
    fn unrelated_blocks_are_not_definitions() {
        let project = revision(json!({
            "info": {},
            "children": [sprite("Cat", json!([[{ "other": "..." }], [{ "another": "..." }]]))],
        }));
        assert!(!project.uses_make_a_block().unwrap());
    }

    #[test]
    fn any_sprite_suffices() {
        let project = revision(json!({
            "info": {},
            "children": [
                sprite("A", json!([])),
                { "info": { "note": "generic" }, "scripts": [[{ "procDef": "ignored" }]] },
                sprite("B", json!([[[{ "procDef": "x" }]]])),
            ],
        }));
        assert_eq!(project.sprites().unwrap().len(), 2);
        assert!(project.uses_make_a_block().unwrap());
    }

    #[test]
    fn malformed_sprite_does_not_hide_later_definition() {
        let project = revision(json!({
            "info": {},
            "children": [
                sprite("Broken", json!({ "x": 1 })),
                sprite("Good", json!([[{ "procDef": "a" }]])),
            ],
        }));
        assert!(project.uses_make_a_block().unwrap());
    }

    #[test]
    fn non_object_children_are_skipped_by_detection() {
        let project = revision(json!({
            "info": {},
            "children": ["stray", 4, null, sprite("Cat", json!([[{ "procDef": "a" }]]))],
        }));
        assert!(project.uses_make_a_block().unwrap());
        // The typed accessor stays strict.
        assert!(matches!(
            project.children().unwrap_err(),
            ModelError::UnexpectedShape { .. }
        ));

        let none = revision(json!({ "info": {}, "children": ["stray", [1, 2]] }));
        assert!(!none.uses_make_a_block().unwrap());
    }

    #[test]
    fn generic_children_scripts_are_ignored() {
        let project = revision(json!({
            "info": {},
            "children": [{ "info": {}, "scripts": [[{ "procDef": "x" }]] }],
        }));
        assert!(!project.uses_make_a_block().unwrap());
    }

    #[test]
    fn children_preserve_order_and_classification() {
        let project = revision(json!({
            "info": {},
            "children": [
                sprite("A", json!([])),
                { "info": {} },
                sprite("B", json!([])),
            ],
        }));
        let kinds: Vec<bool> = project
            .children()
            .unwrap()
            .iter()
            .map(Child::is_sprite)
            .collect();
        assert_eq!(kinds, [true, false, true]);
    }

    #[test]
    fn info_record_and_variables() {
        let project = revision(json!({
            "info": { "projectID": "123", "spriteCount": 2 },
            "children": [],
            "variables": [{ "name": "score" }],
        }));
        let info = project.info().unwrap();
        assert_eq!(info.kind(), "ProjectInfo");
        assert_eq!(info.get("spriteCount").unwrap(), &json!(2));
        assert_eq!(project.variables().unwrap().len(), 1);
    }

    #[test]
    fn absent_variables_are_empty() {
        let project = revision(json!({ "info": {}, "children": [] }));
        assert!(project.variables().unwrap().is_empty());

        let fields = project.into_fields();
        assert_eq!(fields.keys().collect::<Vec<_>>(), ["info", "children"]);
    }

    #[test]
    fn required_fields_report_missing_attribute() {
        let project = revision(json!({ "objName": "Stage" }));
        assert_eq!(
            project.info().unwrap_err(),
            ModelError::MissingAttribute {
                entity: "ProjectRevision",
                name: "info".into(),
            }
        );
        assert_eq!(
            project.children().unwrap_err(),
            ModelError::MissingAttribute {
                entity: "ProjectRevision",
                name: "children".into(),
            }
        );
    }
}
