//! Identikit (`idk`) definitions: player body parts.

use once_cell::sync::Lazy;
use schema::{DomainSchema, PropertyCodec, PropertyType, PropertyValue, MODEL_IDS};

use crate::definition::{config_definition, ConfigDefinition};
use crate::supplier::DefinitionSupplier;
use crate::table::RecordLayout;

pub const NAME: &str = "idk";

pub const BODY_PART: PropertyType = PropertyType::fixed("body-part");
pub const MODELS: PropertyType = PropertyType::fixed("models");
pub const NON_SELECTABLE: PropertyType = PropertyType::fixed("non-selectable");

pub const ORIGINAL_COLOUR_PREFIX: &str = "original-colour";
pub const REPLACEMENT_COLOUR_PREFIX: &str = "replacement-colour";
pub const HEAD_MODEL_PREFIX: &str = "head-model";
pub const COLOUR_SLOTS: u8 = 6;
pub const HEAD_MODEL_SLOTS: u8 = 5;

#[must_use]
pub fn original_colour(slot: u8) -> PropertyType {
    PropertyType::dynamic(ORIGINAL_COLOUR_PREFIX, u16::from(slot))
}

#[must_use]
pub fn replacement_colour(slot: u8) -> PropertyType {
    PropertyType::dynamic(REPLACEMENT_COLOUR_PREFIX, u16::from(slot))
}

#[must_use]
pub fn head_model(slot: u8) -> PropertyType {
    PropertyType::dynamic(HEAD_MODEL_PREFIX, u16::from(slot))
}

static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
    DomainSchema::builder(NAME)
        .property(1, BODY_PART, PropertyCodec::UByte, 0)
        .property(2, MODELS, MODEL_IDS, PropertyValue::List(Vec::new()))
        .flag(3, NON_SELECTABLE, true)
        .family(40, COLOUR_SLOTS, ORIGINAL_COLOUR_PREFIX, PropertyCodec::UShort, 0)
        .family(50, COLOUR_SLOTS, REPLACEMENT_COLOUR_PREFIX, PropertyCodec::UShort, 0)
        .family(60, HEAD_MODEL_SLOTS, HEAD_MODEL_PREFIX, PropertyCodec::NullableUShort, -1)
        .build()
        .expect("identikit schema is valid")
});

#[must_use]
pub fn schema() -> &'static DomainSchema {
    &SCHEMA
}

config_definition! {
    /// An identikit definition.
    IdentikitDefinition
}

pub static SUPPLIER: DefinitionSupplier<IdentikitDefinition> =
    DefinitionSupplier::new(NAME, RecordLayout::Counted, schema, IdentikitDefinition::new);

impl IdentikitDefinition {
    /// Body part slot, if assigned.
    pub fn body_part(&self) -> Option<i32> {
        self.is_custom(BODY_PART).then(|| self.int_value(BODY_PART))
    }

    pub fn models(&self) -> Vec<i32> {
        self.ints(MODELS)
    }

    pub fn is_selectable(&self) -> bool {
        !self.bool_value(NON_SELECTABLE)
    }

    /// `(original, replacement)` colour pairs of every slot.
    pub fn colours(&self) -> Vec<(i32, i32)> {
        (0..COLOUR_SLOTS)
            .map(|slot| {
                (
                    self.int_value(original_colour(slot)),
                    self.int_value(replacement_colour(slot)),
                )
            })
            .collect()
    }

    /// Chat head model ids that are set.
    pub fn head_models(&self) -> Vec<i32> {
        (0..HEAD_MODEL_SLOTS)
            .map(|slot| self.int_value(head_model(slot)))
            .filter(|&model| model != -1)
            .collect()
    }
}
