//! Floor (`flo`) definitions: underlays and overlays.

use once_cell::sync::Lazy;
use schema::{DomainSchema, PropertyCodec, PropertyType, PropertyValue};

use crate::definition::{config_definition, ConfigDefinition};
use crate::supplier::DefinitionSupplier;
use crate::table::RecordLayout;

pub const NAME: &str = "flo";

pub const COLOUR: PropertyType = PropertyType::fixed("colour");
pub const TEXTURE: PropertyType = PropertyType::fixed("texture");
pub const UNUSED_3: PropertyType = PropertyType::fixed("unused-3");
pub const OCCLUDES: PropertyType = PropertyType::fixed("occludes");
pub const DISPLAY_NAME: PropertyType = PropertyType::fixed("name");
pub const MINIMAP_COLOUR: PropertyType = PropertyType::fixed("minimap-colour");

static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
    DomainSchema::builder(NAME)
        .property(1, COLOUR, PropertyCodec::Tribyte, 0)
        .property(2, TEXTURE, PropertyCodec::UByte, 0)
        .flag(3, UNUSED_3, true)
        .flag(5, OCCLUDES, false)
        .property(6, DISPLAY_NAME, PropertyCodec::Text, PropertyValue::Text(None))
        .property(7, MINIMAP_COLOUR, PropertyCodec::Tribyte, 0)
        .build()
        .expect("floor schema is valid")
});

#[must_use]
pub fn schema() -> &'static DomainSchema {
    &SCHEMA
}

config_definition! {
    /// A floor definition.
    FloorDefinition
}

pub static SUPPLIER: DefinitionSupplier<FloorDefinition> =
    DefinitionSupplier::new(NAME, RecordLayout::Counted, schema, FloorDefinition::new);

impl FloorDefinition {
    /// RGB colour.
    pub fn colour(&self) -> i32 {
        self.int_value(COLOUR)
    }

    /// Texture id, if the floor is textured.
    pub fn texture(&self) -> Option<i32> {
        self.is_custom(TEXTURE).then(|| self.int_value(TEXTURE))
    }

    pub fn occludes(&self) -> bool {
        self.bool_value(OCCLUDES)
    }

    pub fn name(&self) -> Option<&str> {
        self.text_value(DISPLAY_NAME)
    }

    /// RGB colour on the minimap, if it differs from the floor colour.
    pub fn minimap_colour(&self) -> Option<i32> {
        self.is_custom(MINIMAP_COLOUR)
            .then(|| self.int_value(MINIMAP_COLOUR))
    }
}
