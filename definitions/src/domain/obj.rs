//! Object (`obj`) definitions: items.

use once_cell::sync::Lazy;
use schema::{DomainSchema, PropertyCodec, PropertyType, PropertyValue, COLOUR_MAP};

use crate::definition::{config_definition, ConfigDefinition};
use crate::supplier::DefinitionSupplier;
use crate::table::RecordLayout;

pub const NAME: &str = "obj";

const EQUIP_MODEL: PropertyCodec =
    PropertyCodec::Composite(&[PropertyCodec::NullableUShort, PropertyCodec::Byte]);
const STACK_VARIANT: PropertyCodec =
    PropertyCodec::Composite(&[PropertyCodec::UShort, PropertyCodec::UShort]);

pub const MODEL: PropertyType = PropertyType::fixed("model");
pub const DISPLAY_NAME: PropertyType = PropertyType::fixed("name");
pub const DESCRIPTION: PropertyType = PropertyType::fixed("description");
pub const SPRITE_ZOOM: PropertyType = PropertyType::fixed("sprite-zoom");
pub const SPRITE_PITCH: PropertyType = PropertyType::fixed("sprite-pitch");
pub const SPRITE_YAW: PropertyType = PropertyType::fixed("sprite-yaw");
pub const SPRITE_OFFSET_X: PropertyType = PropertyType::fixed("sprite-offset-x");
pub const SPRITE_OFFSET_Y: PropertyType = PropertyType::fixed("sprite-offset-y");
pub const UNUSED_10: PropertyType = PropertyType::fixed("unused-10");
pub const STACKABLE: PropertyType = PropertyType::fixed("stackable");
pub const VALUE: PropertyType = PropertyType::fixed("value");
pub const MEMBERS: PropertyType = PropertyType::fixed("members");
pub const PRIMARY_MALE_MODEL: PropertyType = PropertyType::fixed("primary-male-model");
pub const SECONDARY_MALE_MODEL: PropertyType = PropertyType::fixed("secondary-male-model");
pub const PRIMARY_FEMALE_MODEL: PropertyType = PropertyType::fixed("primary-female-model");
pub const SECONDARY_FEMALE_MODEL: PropertyType = PropertyType::fixed("secondary-female-model");
pub const COLOURS: PropertyType = PropertyType::fixed("colours");
pub const TERTIARY_MALE_MODEL: PropertyType = PropertyType::fixed("tertiary-male-model");
pub const TERTIARY_FEMALE_MODEL: PropertyType = PropertyType::fixed("tertiary-female-model");
pub const PRIMARY_MALE_HEAD: PropertyType = PropertyType::fixed("primary-male-head");
pub const PRIMARY_FEMALE_HEAD: PropertyType = PropertyType::fixed("primary-female-head");
pub const SECONDARY_MALE_HEAD: PropertyType = PropertyType::fixed("secondary-male-head");
pub const SECONDARY_FEMALE_HEAD: PropertyType = PropertyType::fixed("secondary-female-head");
pub const SPRITE_ROLL: PropertyType = PropertyType::fixed("sprite-roll");
pub const NOTE_INFO: PropertyType = PropertyType::fixed("note-info");
pub const NOTE_TEMPLATE: PropertyType = PropertyType::fixed("note-template");
pub const SCALE_X: PropertyType = PropertyType::fixed("scale-x");
pub const SCALE_Y: PropertyType = PropertyType::fixed("scale-y");
pub const SCALE_Z: PropertyType = PropertyType::fixed("scale-z");
pub const AMBIENT: PropertyType = PropertyType::fixed("ambient");
pub const CONTRAST: PropertyType = PropertyType::fixed("contrast");
pub const TEAM: PropertyType = PropertyType::fixed("team");

pub const GROUND_ACTION_PREFIX: &str = "ground-action";
pub const INVENTORY_ACTION_PREFIX: &str = "inventory-action";
pub const STACK_VARIANT_PREFIX: &str = "stack-variant";
pub const ACTION_SLOTS: u8 = 5;
pub const STACK_VARIANT_SLOTS: u8 = 10;

#[must_use]
pub fn ground_action(slot: u8) -> PropertyType {
    PropertyType::dynamic(GROUND_ACTION_PREFIX, u16::from(slot))
}

#[must_use]
pub fn inventory_action(slot: u8) -> PropertyType {
    PropertyType::dynamic(INVENTORY_ACTION_PREFIX, u16::from(slot))
}

#[must_use]
pub fn stack_variant(slot: u8) -> PropertyType {
    PropertyType::dynamic(STACK_VARIANT_PREFIX, u16::from(slot))
}

static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
    let no_text = PropertyValue::Text(None);
    let unequipped = PropertyValue::int_tuple([-1, 0]);

    DomainSchema::builder(NAME)
        .property(1, MODEL, PropertyCodec::UShort, 0)
        .property(2, DISPLAY_NAME, PropertyCodec::Text, no_text.clone())
        .property(3, DESCRIPTION, PropertyCodec::Text, no_text.clone())
        .property(4, SPRITE_ZOOM, PropertyCodec::UShort, 2000)
        .property(5, SPRITE_PITCH, PropertyCodec::UShort, 0)
        .property(6, SPRITE_YAW, PropertyCodec::UShort, 0)
        .property(7, SPRITE_OFFSET_X, PropertyCodec::Short, 0)
        .property(8, SPRITE_OFFSET_Y, PropertyCodec::Short, 0)
        .property(10, UNUSED_10, PropertyCodec::UShort, 0)
        .flag(11, STACKABLE, true)
        .property(12, VALUE, PropertyCodec::Int, 1)
        .flag(16, MEMBERS, true)
        .property(23, PRIMARY_MALE_MODEL, EQUIP_MODEL, unequipped.clone())
        .property(24, SECONDARY_MALE_MODEL, PropertyCodec::NullableUShort, -1)
        .property(25, PRIMARY_FEMALE_MODEL, EQUIP_MODEL, unequipped)
        .property(26, SECONDARY_FEMALE_MODEL, PropertyCodec::NullableUShort, -1)
        .family(30, ACTION_SLOTS, GROUND_ACTION_PREFIX, PropertyCodec::Action, no_text.clone())
        .family(35, ACTION_SLOTS, INVENTORY_ACTION_PREFIX, PropertyCodec::Action, no_text)
        .property(40, COLOURS, COLOUR_MAP, PropertyValue::List(Vec::new()))
        .property(78, TERTIARY_MALE_MODEL, PropertyCodec::NullableUShort, -1)
        .property(79, TERTIARY_FEMALE_MODEL, PropertyCodec::NullableUShort, -1)
        .property(90, PRIMARY_MALE_HEAD, PropertyCodec::NullableUShort, -1)
        .property(91, PRIMARY_FEMALE_HEAD, PropertyCodec::NullableUShort, -1)
        .property(92, SECONDARY_MALE_HEAD, PropertyCodec::NullableUShort, -1)
        .property(93, SECONDARY_FEMALE_HEAD, PropertyCodec::NullableUShort, -1)
        .property(95, SPRITE_ROLL, PropertyCodec::UShort, 0)
        .property(97, NOTE_INFO, PropertyCodec::NullableUShort, -1)
        .property(98, NOTE_TEMPLATE, PropertyCodec::NullableUShort, -1)
        .family(
            100,
            STACK_VARIANT_SLOTS,
            STACK_VARIANT_PREFIX,
            STACK_VARIANT,
            PropertyValue::int_tuple([0, 0]),
        )
        .property(110, SCALE_X, PropertyCodec::UShort, 128)
        .property(111, SCALE_Y, PropertyCodec::UShort, 128)
        .property(112, SCALE_Z, PropertyCodec::UShort, 128)
        .property(113, AMBIENT, PropertyCodec::Byte, 0)
        .property(114, CONTRAST, PropertyCodec::Byte, 0)
        .property(115, TEAM, PropertyCodec::UByte, 0)
        .build()
        .expect("object schema is valid")
});

#[must_use]
pub fn schema() -> &'static DomainSchema {
    &SCHEMA
}

config_definition! {
    /// An object (item) definition.
    ObjectDefinition
}

pub static SUPPLIER: DefinitionSupplier<ObjectDefinition> =
    DefinitionSupplier::new(NAME, RecordLayout::Indexed, schema, ObjectDefinition::new);

/// A model worn by an equipped object, with its vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipModel {
    pub model: i32,
    pub offset: i32,
}

impl ObjectDefinition {
    pub fn model(&self) -> i32 {
        self.int_value(MODEL)
    }

    pub fn name(&self) -> Option<&str> {
        self.text_value(DISPLAY_NAME)
    }

    pub fn description(&self) -> Option<&str> {
        self.text_value(DESCRIPTION)
    }

    pub fn sprite_zoom(&self) -> i32 {
        self.int_value(SPRITE_ZOOM)
    }

    pub fn value(&self) -> i32 {
        self.int_value(VALUE)
    }

    pub fn is_members(&self) -> bool {
        self.bool_value(MEMBERS)
    }

    /// The stackable flag as declared by the record.
    pub fn is_stackable(&self) -> bool {
        self.bool_value(STACKABLE)
    }

    /// Whether this object is a bank note of another object.
    pub fn is_noted(&self) -> bool {
        self.note_template() != -1
    }

    /// Stackability after noting; notes always stack.
    pub fn is_stackable_effective(&self) -> bool {
        self.is_stackable() || self.is_noted()
    }

    /// The object this note stands for, or `-1`.
    pub fn note_info(&self) -> i32 {
        self.int_value(NOTE_INFO)
    }

    /// The note template this object is drawn with, or `-1`.
    pub fn note_template(&self) -> i32 {
        self.int_value(NOTE_TEMPLATE)
    }

    pub fn ground_action(&self, slot: u8) -> Option<&str> {
        self.text_value(ground_action(slot))
    }

    pub fn inventory_action(&self, slot: u8) -> Option<&str> {
        self.text_value(inventory_action(slot))
    }

    pub fn colours(&self) -> Vec<(i32, i32)> {
        self.int_pairs(COLOURS)
    }

    pub fn primary_male_model(&self) -> Option<EquipModel> {
        self.equip_model(PRIMARY_MALE_MODEL)
    }

    pub fn primary_female_model(&self) -> Option<EquipModel> {
        self.equip_model(PRIMARY_FEMALE_MODEL)
    }

    /// The `(object id, amount)` variant in `slot`, if declared.
    pub fn stack_variant(&self, slot: u8) -> Option<(i32, i32)> {
        let ty = stack_variant(slot);
        if !self.is_custom(ty) {
            return None;
        }
        match self.ints(ty).as_slice() {
            [id, amount] => Some((*id, *amount)),
            _ => None,
        }
    }

    pub fn scale(&self) -> (i32, i32, i32) {
        (
            self.int_value(SCALE_X),
            self.int_value(SCALE_Y),
            self.int_value(SCALE_Z),
        )
    }

    pub fn team(&self) -> i32 {
        self.int_value(TEAM)
    }

    fn equip_model(&self, ty: PropertyType) -> Option<EquipModel> {
        match self.ints(ty).as_slice() {
            [-1, _] => None,
            [model, offset] => Some(EquipModel {
                model: *model,
                offset: *offset,
            }),
            _ => None,
        }
    }
}
