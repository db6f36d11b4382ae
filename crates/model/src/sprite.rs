use serde_json::Value;

use crate::entity::{Entity, Fields, ModelError, wrap_objects};
use crate::objects::{MediaAsset, ScratchObject};
use crate::record::Record;
use crate::script::ScriptForest;

/// A behavioral child entity: scripts plus costume and sound assets.
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    fields: &'a Fields,
}

impl<'a> Sprite<'a> {
    pub fn new(fields: &'a Fields) -> Self {
        Self { fields }
    }

    /// Field lookup borrowing from the document rather than the view.
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.fields.get(name)
    }

    /// The sprite's `info` object as a record.
    pub fn sprite_info(&self) -> Result<Record<'a>, ModelError> {
        Record::from_field(Self::KIND, self.fields, "info", "SpriteInfo")
    }

    /// Raw script forest; empty when the sprite has no `scripts` field.
    pub fn scripts(&self) -> Result<&'a [Value], ModelError> {
        match self.fields.get("scripts") {
            None => Ok(Default::default()),
            Some(value) => value
                .as_array()
                .map(Vec::as_slice)
                .ok_or_else(|| ModelError::UnexpectedShape {
                    entity: Self::KIND,
                    field: "scripts".into(),
                    expected: "an array",
                }),
        }
    }

    pub fn script_forest(&self) -> Result<ScriptForest<'a>, ModelError> {
        Ok(ScriptForest::new(self.scripts()?))
    }

    pub fn costumes(&self) -> Result<Vec<MediaAsset<'a>>, ModelError> {
        wrap_objects(self.fields, Self::KIND, "costumes", MediaAsset::new)
    }

    pub fn sounds(&self) -> Result<Vec<MediaAsset<'a>>, ModelError> {
        wrap_objects(self.fields, Self::KIND, "sounds", MediaAsset::new)
    }

    /// Sounds followed by costumes, each in document order.
    pub fn assets(&self) -> Result<Vec<MediaAsset<'a>>, ModelError> {
        let mut assets = self.sounds()?;
        assets.extend(self.costumes()?);
        Ok(assets)
    }

    /// Whether any script defines a custom block.
    ///
    /// A `scripts` value that is not a list holds nothing to search.
    pub fn has_make_a_block(&self) -> bool {
        let scripts: &[Value] = self
            .fields
            .get("scripts")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        ScriptForest::new(scripts).contains_block_definition()
    }
}

impl Entity for Sprite<'_> {
    const KIND: &'static str = "Sprite";

    fn fields(&self) -> &Fields {
        self.fields
    }
}

impl ScratchObject for Sprite<'_> {}
