//! Spot animation (`spotanim`) definitions: graphics.

use once_cell::sync::Lazy;
use schema::{DomainSchema, PropertyCodec, PropertyType};

use crate::definition::{config_definition, ConfigDefinition};
use crate::supplier::DefinitionSupplier;
use crate::table::RecordLayout;

pub const NAME: &str = "spotanim";

pub const MODEL: PropertyType = PropertyType::fixed("model");
pub const ANIMATION: PropertyType = PropertyType::fixed("animation");
pub const SCALE_XY: PropertyType = PropertyType::fixed("scale-xy");
pub const SCALE_Z: PropertyType = PropertyType::fixed("scale-z");
pub const ROTATION: PropertyType = PropertyType::fixed("rotation");
pub const AMBIENT: PropertyType = PropertyType::fixed("ambient");
pub const CONTRAST: PropertyType = PropertyType::fixed("contrast");

pub const ORIGINAL_COLOUR_PREFIX: &str = "original-colour";
pub const REPLACEMENT_COLOUR_PREFIX: &str = "replacement-colour";
pub const COLOUR_SLOTS: u8 = 6;

#[must_use]
pub fn original_colour(slot: u8) -> PropertyType {
    PropertyType::dynamic(ORIGINAL_COLOUR_PREFIX, u16::from(slot))
}

#[must_use]
pub fn replacement_colour(slot: u8) -> PropertyType {
    PropertyType::dynamic(REPLACEMENT_COLOUR_PREFIX, u16::from(slot))
}

static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
    DomainSchema::builder(NAME)
        .property(1, MODEL, PropertyCodec::UShort, 0)
        .property(2, ANIMATION, PropertyCodec::NullableUShort, -1)
        .property(4, SCALE_XY, PropertyCodec::UShort, 128)
        .property(5, SCALE_Z, PropertyCodec::UShort, 128)
        .property(6, ROTATION, PropertyCodec::UShort, 0)
        .property(7, AMBIENT, PropertyCodec::UByte, 0)
        .property(8, CONTRAST, PropertyCodec::UByte, 0)
        .family(40, COLOUR_SLOTS, ORIGINAL_COLOUR_PREFIX, PropertyCodec::UShort, 0)
        .family(50, COLOUR_SLOTS, REPLACEMENT_COLOUR_PREFIX, PropertyCodec::UShort, 0)
        .build()
        .expect("graphic schema is valid")
});

#[must_use]
pub fn schema() -> &'static DomainSchema {
    &SCHEMA
}

config_definition! {
    /// A spot animation definition.
    GraphicDefinition
}

pub static SUPPLIER: DefinitionSupplier<GraphicDefinition> =
    DefinitionSupplier::new(NAME, RecordLayout::Counted, schema, GraphicDefinition::new);

impl GraphicDefinition {
    pub fn model(&self) -> i32 {
        self.int_value(MODEL)
    }

    /// Sequence played by the graphic, `-1` for none.
    pub fn animation(&self) -> i32 {
        self.int_value(ANIMATION)
    }

    pub fn scale_xy(&self) -> i32 {
        self.int_value(SCALE_XY)
    }

    pub fn scale_z(&self) -> i32 {
        self.int_value(SCALE_Z)
    }

    pub fn rotation(&self) -> i32 {
        self.int_value(ROTATION)
    }

    pub fn ambient(&self) -> i32 {
        self.int_value(AMBIENT)
    }

    pub fn contrast(&self) -> i32 {
        self.int_value(CONTRAST)
    }

    /// `(original, replacement)` colour pairs of the slots that recolour.
    pub fn colours(&self) -> Vec<(i32, i32)> {
        (0..COLOUR_SLOTS)
            .filter(|slot| self.is_custom(original_colour(*slot)) || self.is_custom(replacement_colour(*slot)))
            .map(|slot| {
                (
                    self.int_value(original_colour(slot)),
                    self.int_value(replacement_colour(slot)),
                )
            })
            .collect()
    }
}
