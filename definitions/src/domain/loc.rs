//! Location (`loc`) definitions: walls, scenery and other map objects.

use once_cell::sync::Lazy;
use schema::{
    DomainSchema, Morphisms, PropertyCodec, PropertyType, PropertyValue, COLOUR_MAP, MODEL_IDS,
    MODEL_IDS_WITH_TYPES,
};

use crate::definition::{config_definition, ConfigDefinition};
use crate::supplier::DefinitionSupplier;
use crate::table::RecordLayout;

pub const NAME: &str = "loc";

/// Model type of a plain centrepiece object.
pub const CENTREPIECE_MODEL_TYPE: i32 = 10;

pub const TYPED_MODELS: PropertyType = PropertyType::fixed("typed-models");
pub const DISPLAY_NAME: PropertyType = PropertyType::fixed("name");
pub const DESCRIPTION: PropertyType = PropertyType::fixed("description");
pub const MODELS: PropertyType = PropertyType::fixed("models");
pub const WIDTH: PropertyType = PropertyType::fixed("width");
pub const LENGTH: PropertyType = PropertyType::fixed("length");
pub const SOLID: PropertyType = PropertyType::fixed("solid");
pub const IMPENETRABLE: PropertyType = PropertyType::fixed("impenetrable");
pub const INTERACTIVE: PropertyType = PropertyType::fixed("interactive");
pub const CONTOURED_GROUND: PropertyType = PropertyType::fixed("contoured-ground");
pub const DELAY_SHADING: PropertyType = PropertyType::fixed("delay-shading");
pub const OCCLUDES: PropertyType = PropertyType::fixed("occludes");
pub const ANIMATION: PropertyType = PropertyType::fixed("animation");
pub const DECOR_DISPLACEMENT: PropertyType = PropertyType::fixed("decor-displacement");
pub const AMBIENT: PropertyType = PropertyType::fixed("ambient");
pub const CONTRAST: PropertyType = PropertyType::fixed("contrast");
pub const COLOURS: PropertyType = PropertyType::fixed("colours");
pub const MINIMAP_FUNCTION: PropertyType = PropertyType::fixed("minimap-function");
pub const INVERTED: PropertyType = PropertyType::fixed("inverted");
pub const CASTS_SHADOW: PropertyType = PropertyType::fixed("casts-shadow");
pub const SCALE_X: PropertyType = PropertyType::fixed("scale-x");
pub const SCALE_Y: PropertyType = PropertyType::fixed("scale-y");
pub const SCALE_Z: PropertyType = PropertyType::fixed("scale-z");
pub const MAP_SCENE: PropertyType = PropertyType::fixed("map-scene");
pub const SURROUNDINGS: PropertyType = PropertyType::fixed("surroundings");
pub const TRANSLATE_X: PropertyType = PropertyType::fixed("translate-x");
pub const TRANSLATE_Y: PropertyType = PropertyType::fixed("translate-y");
pub const TRANSLATE_Z: PropertyType = PropertyType::fixed("translate-z");
pub const OBSTRUCTIVE: PropertyType = PropertyType::fixed("obstructive");
pub const HOLLOW: PropertyType = PropertyType::fixed("hollow");
pub const SUPPORT_ITEMS: PropertyType = PropertyType::fixed("support-items");
pub const MORPHISMS: PropertyType = PropertyType::fixed("morphisms");

pub const ACTION_PREFIX: &str = "action";
pub const ACTION_SLOTS: u8 = 5;

/// The interaction string in `slot`.
#[must_use]
pub fn action(slot: u8) -> PropertyType {
    PropertyType::dynamic(ACTION_PREFIX, u16::from(slot))
}

static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
    DomainSchema::builder(NAME)
        .property(1, TYPED_MODELS, MODEL_IDS_WITH_TYPES, PropertyValue::List(Vec::new()))
        .property(2, DISPLAY_NAME, PropertyCodec::Text, PropertyValue::Text(None))
        .property(3, DESCRIPTION, PropertyCodec::Text, PropertyValue::Text(None))
        .property(5, MODELS, MODEL_IDS, PropertyValue::List(Vec::new()))
        .property(14, WIDTH, PropertyCodec::UByte, 1)
        .property(15, LENGTH, PropertyCodec::UByte, 1)
        .flag(17, SOLID, false)
        .flag(18, IMPENETRABLE, false)
        .property(19, INTERACTIVE, PropertyCodec::UByte, 0)
        .flag(21, CONTOURED_GROUND, true)
        .flag(22, DELAY_SHADING, true)
        .flag(23, OCCLUDES, true)
        .property(24, ANIMATION, PropertyCodec::NullableUShort, -1)
        .property(28, DECOR_DISPLACEMENT, PropertyCodec::UByte, 16)
        .property(29, AMBIENT, PropertyCodec::Byte, 0)
        .family(30, ACTION_SLOTS, ACTION_PREFIX, PropertyCodec::Action, PropertyValue::Text(None))
        .property(39, CONTRAST, PropertyCodec::Byte, 0)
        .property(40, COLOURS, COLOUR_MAP, PropertyValue::List(Vec::new()))
        .property(60, MINIMAP_FUNCTION, PropertyCodec::NullableUShort, -1)
        .flag(62, INVERTED, true)
        .flag(64, CASTS_SHADOW, false)
        .property(65, SCALE_X, PropertyCodec::UShort, 128)
        .property(66, SCALE_Y, PropertyCodec::UShort, 128)
        .property(67, SCALE_Z, PropertyCodec::UShort, 128)
        .property(68, MAP_SCENE, PropertyCodec::NullableUShort, -1)
        .property(69, SURROUNDINGS, PropertyCodec::UByte, 0)
        .property(70, TRANSLATE_X, PropertyCodec::Short, 0)
        .property(71, TRANSLATE_Y, PropertyCodec::Short, 0)
        .property(72, TRANSLATE_Z, PropertyCodec::Short, 0)
        .flag(73, OBSTRUCTIVE, true)
        .flag(74, HOLLOW, true)
        .property(75, SUPPORT_ITEMS, PropertyCodec::UByte, 0)
        .property(77, MORPHISMS, PropertyCodec::Morphisms, Morphisms::empty())
        .build()
        .expect("location schema is valid")
});

#[must_use]
pub fn schema() -> &'static DomainSchema {
    &SCHEMA
}

config_definition! {
    /// A location definition.
    LocationDefinition
}

pub static SUPPLIER: DefinitionSupplier<LocationDefinition> =
    DefinitionSupplier::new(NAME, RecordLayout::Indexed, schema, LocationDefinition::new);

impl LocationDefinition {
    pub fn name(&self) -> Option<&str> {
        self.text_value(DISPLAY_NAME)
    }

    pub fn description(&self) -> Option<&str> {
        self.text_value(DESCRIPTION)
    }

    /// Model ids, from whichever model list the record carries.
    pub fn model_ids(&self) -> Vec<i32> {
        if self.is_custom(MODELS) {
            self.ints(MODELS)
        } else {
            self.typed_models().into_iter().map(|(id, _)| id).collect()
        }
    }

    /// `(model id, model type)` pairs of the typed model list.
    pub fn typed_models(&self) -> Vec<(i32, i32)> {
        self.int_pairs(TYPED_MODELS)
    }

    pub fn width(&self) -> i32 {
        self.int_value(WIDTH)
    }

    pub fn length(&self) -> i32 {
        self.int_value(LENGTH)
    }

    pub fn is_hollow(&self) -> bool {
        self.bool_value(HOLLOW)
    }

    /// Whether the location blocks movement. Hollow locations never do.
    pub fn is_solid(&self) -> bool {
        self.bool_value(SOLID) && !self.is_hollow()
    }

    /// Whether the location blocks projectiles. Hollow locations never do.
    pub fn is_impenetrable(&self) -> bool {
        self.bool_value(IMPENETRABLE) && !self.is_hollow()
    }

    /// Whether the location can be interacted with.
    ///
    /// An explicit interactive byte decides (`1` is interactive, anything
    /// else is not). Without one a location is interactive when it has an
    /// action, untyped models, or typed models whose first type is a
    /// centrepiece.
    pub fn is_interactive(&self) -> bool {
        if self.is_custom(INTERACTIVE) {
            return self.int_value(INTERACTIVE) == 1;
        }
        if (0..ACTION_SLOTS).any(|slot| self.is_custom(action(slot))) {
            return true;
        }
        if self.is_custom(MODELS) && !self.ints(MODELS).is_empty() {
            return true;
        }
        self.typed_models()
            .first()
            .is_some_and(|&(_, ty)| ty == CENTREPIECE_MODEL_TYPE)
    }

    pub fn action(&self, slot: u8) -> Option<&str> {
        self.text_value(action(slot))
    }

    pub fn animation(&self) -> i32 {
        self.int_value(ANIMATION)
    }

    pub fn casts_shadow(&self) -> bool {
        self.bool_value(CASTS_SHADOW)
    }

    pub fn colours(&self) -> Vec<(i32, i32)> {
        self.int_pairs(COLOURS)
    }

    pub fn minimap_function(&self) -> i32 {
        self.int_value(MINIMAP_FUNCTION)
    }

    pub fn map_scene(&self) -> i32 {
        self.int_value(MAP_SCENE)
    }

    pub fn scale(&self) -> (i32, i32, i32) {
        (
            self.int_value(SCALE_X),
            self.int_value(SCALE_Y),
            self.int_value(SCALE_Z),
        )
    }

    pub fn translation(&self) -> (i32, i32, i32) {
        (
            self.int_value(TRANSLATE_X),
            self.int_value(TRANSLATE_Y),
            self.int_value(TRANSLATE_Z),
        )
    }

    /// How many items can rest on the location; solid locations support one
    /// unless stated.
    pub fn support_items(&self) -> i32 {
        if self.is_custom(SUPPORT_ITEMS) {
            self.int_value(SUPPORT_ITEMS)
        } else {
            i32::from(self.is_solid())
        }
    }

    pub fn morphisms(&self) -> Option<&Morphisms> {
        self.properties()
            .find(MORPHISMS)
            .and_then(|property| property.custom_value())
            .and_then(PropertyValue::as_morphisms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_record_uses_defaults() {
        let door = SUPPLIER.decode(1, b"\x02Door\n\x00").unwrap();
        assert_eq!(door.name(), Some("Door"));
        assert!(door.is_solid());
        assert!(door.is_impenetrable());
        assert_eq!(door.width(), 1);
        assert!(!door.is_interactive());
        assert_eq!(door.support_items(), 1);
        assert_eq!(door.properties().custom().count(), 1);
    }

    #[test]
    fn hollow_clears_solidity() {
        let loc = SUPPLIER.decode(1, &[74, 0]).unwrap();
        assert!(!loc.is_solid());
        assert!(!loc.is_impenetrable());
        assert_eq!(loc.support_items(), 0);
    }

    #[test]
    fn not_solid_flag() {
        let loc = SUPPLIER.decode(1, &[17, 0]).unwrap();
        assert!(!loc.is_solid());
        assert!(loc.is_impenetrable());
        assert_eq!(SUPPLIER.encode(&loc).unwrap(), vec![17, 0]);
    }

    #[test]
    fn interactive_derivation() {
        let typed_centrepiece = SUPPLIER.decode(1, &[1, 1, 0, 10, 10, 0]).unwrap();
        assert!(typed_centrepiece.is_interactive());
        assert_eq!(typed_centrepiece.model_ids(), vec![10]);

        let typed_wall = SUPPLIER.decode(1, &[1, 1, 0, 10, 0, 0]).unwrap();
        assert!(!typed_wall.is_interactive());

        let untyped = SUPPLIER.decode(1, &[5, 1, 0, 10, 0]).unwrap();
        assert!(untyped.is_interactive());

        let hidden_action = SUPPLIER.decode(1, b"\x1Ehidden\n\x00").unwrap();
        assert_eq!(hidden_action.action(0), None);
        assert!(hidden_action.is_interactive());

        let explicit_zero = SUPPLIER.decode(1, &[19, 0, 0]).unwrap();
        assert!(!explicit_zero.is_interactive());
        let explicit_one = SUPPLIER.decode(1, &[19, 1, 0]).unwrap();
        assert!(explicit_one.is_interactive());
    }

    #[test]
    fn explicit_interactive_overrides_derivation() {
        let with_action = SUPPLIER.decode(1, b"\x13\x00\x1EOpen\n\x00").unwrap();
        assert_eq!(with_action.action(0), Some("Open"));
        assert!(!with_action.is_interactive());

        let with_models = SUPPLIER.decode(1, &[19, 0, 5, 1, 0, 10, 0]).unwrap();
        assert!(!with_models.is_interactive());

        let mut location = SUPPLIER.create_default(1);
        location.set(action(2), "Search").unwrap();
        assert!(location.is_interactive());
        location.set(INTERACTIVE, 0).unwrap();
        assert!(!location.is_interactive());
    }

    #[test]
    fn morphisms_read_biased_count() {
        let loc = SUPPLIER
            .decode(1, &[77, 0xFF, 0xFF, 0, 5, 1, 0, 3, 0, 4, 0])
            .unwrap();
        let morphisms = loc.morphisms().unwrap();
        assert_eq!(morphisms.varbit, -1);
        assert_eq!(morphisms.varp, 5);
        assert_eq!(morphisms.children, vec![3, 4]);
    }

    #[test]
    fn schema_declares_action_family() {
        assert_eq!(schema().opcode_of(action(4)), Some(34));
        assert_eq!(schema().type_of(30), Some(action(0)));
    }
}
