use serde_json::Value;

use crate::entity::{Entity, Fields, ModelError, wrap_objects};
use crate::sprite::Sprite;

/// Entities that may declare variables and lists.
pub trait ScratchObject: Entity {
    /// Wrapped `variables` entries; empty when the field is absent.
    fn variables(&self) -> Result<Vec<DataStructure<'_>>, ModelError> {
        wrap_objects(self.fields(), Self::KIND, "variables", DataStructure::new)
    }
}

/// A child entity with no typed properties beyond raw field access.
#[derive(Debug, Clone, Copy)]
pub struct BaseObj<'a> {
    fields: &'a Fields,
}

impl<'a> BaseObj<'a> {
    pub fn new(fields: &'a Fields) -> Self {
        Self { fields }
    }

    /// Field lookup borrowing from the document rather than the view.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }
}

impl Entity for BaseObj<'_> {
    const KIND: &'static str = "BaseObj";

    fn fields(&self) -> &Fields {
        self.fields
    }
}

/// A costume or sound.
#[derive(Debug, Clone, Copy)]
pub struct MediaAsset<'a> {
    fields: &'a Fields,
}

impl<'a> MediaAsset<'a> {
    pub fn new(fields: &'a Fields) -> Self {
        Self { fields }
    }

    /// Field lookup borrowing from the document rather than the view.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }
}

impl Entity for MediaAsset<'_> {
    const KIND: &'static str = "MediaAsset";

    fn fields(&self) -> &Fields {
        self.fields
    }
}

/// A variable or list declaration.
#[derive(Debug, Clone, Copy)]
pub struct DataStructure<'a> {
    fields: &'a Fields,
}

impl<'a> DataStructure<'a> {
    pub fn new(fields: &'a Fields) -> Self {
        Self { fields }
    }

    /// Field lookup borrowing from the document rather than the view.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }
}

impl Entity for DataStructure<'_> {
    const KIND: &'static str = "DataStructure";

    fn fields(&self) -> &Fields {
        self.fields
    }
}

/// A project child, classified once by shape.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Sprite(Sprite<'a>),
    Generic(BaseObj<'a>),
}

impl<'a> Child<'a> {
    /// A child is a sprite iff its `info` object holds a `spriteInfo` key.
    pub fn classify(fields: &'a Fields) -> Self {
        let is_sprite = fields
            .get("info")
            .and_then(|info| info.as_object())
            .is_some_and(|info| info.contains_key("spriteInfo"));
        if is_sprite {
            Self::Sprite(Sprite::new(fields))
        } else {
            Self::Generic(BaseObj::new(fields))
        }
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        match self {
            Self::Sprite(sprite) => sprite.get(name),
            Self::Generic(obj) => obj.get(name),
        }
    }

    pub fn is_sprite(&self) -> bool {
        matches!(self, Self::Sprite(_))
    }

    pub fn as_sprite(&self) -> Option<&Sprite<'a>> {
        match self {
            Self::Sprite(sprite) => Some(sprite),
            Self::Generic(_) => None,
        }
    }

    pub fn into_sprite(self) -> Option<Sprite<'a>> {
        match self {
            Self::Sprite(sprite) => Some(sprite),
            Self::Generic(_) => None,
        }
    }
}

impl Entity for Child<'_> {
    const KIND: &'static str = "Child";

    fn fields(&self) -> &Fields {
        match self {
            Self::Sprite(sprite) => sprite.fields(),
            Self::Generic(obj) => obj.fields(),
        }
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
    fn sprite_info_inside_info_marks_a_sprite() {
        let fields = object(json!({ "info": { "spriteInfo": {}, "objName": "Cat" } }));
        let child = Child::classify(&fields);
        assert!(child.is_sprite());
        assert!(child.as_sprite().is_some());
    }

    #[test]
    fn other_children_are_generic() {
        for value in [
            json!({ "info": { "objName": "Stage" } }),
            json!({ "spriteInfo": {}, "info": {} }),
            json!({ "info": "spriteInfo" }),
            json!({}),
        ] {
            let fields = object(value);
            let child = Child::classify(&fields);
            assert!(!child.is_sprite());
            assert!(child.into_sprite().is_none());
        }
    }

    #[test]
    fn generic_child_keeps_raw_access() {
        let fields = object(json!({ "target": "watcher", "visible": null }));
        let child = Child::classify(&fields);
        assert_eq!(child.get("target"), Some(&json!("watcher")));
        assert_eq!(child.get("visible"), Some(&Value::Null));
        assert!(child.get_required("x").is_err());
    }

    #[test]
    fn leaf_entities_expose_fields() {
        let fields = object(json!({ "soundName": "meow", "rate": 22050 }));
        let asset = MediaAsset::new(&fields);
        assert_eq!(asset.get("rate"), Some(&json!(22050)));
        assert_eq!(
            DataStructure::new(&fields).get_required("missing").unwrap_err(),
            ModelError::MissingAttribute {
                entity: "DataStructure",
                name: "missing".into(),
            }
        );
    }
}
