//! Npc (`npc`) definitions.

use once_cell::sync::Lazy;
use schema::{
    DomainSchema, Morphisms, PropertyCodec, PropertyType, PropertyValue, COLOUR_MAP, MODEL_IDS,
};

use crate::definition::{config_definition, ConfigDefinition};
use crate::supplier::DefinitionSupplier;
use crate::table::RecordLayout;

pub const NAME: &str = "npc";

const WALK_SET: PropertyCodec = PropertyCodec::Composite(&[
    PropertyCodec::NullableUShort,
    PropertyCodec::NullableUShort,
    PropertyCodec::NullableUShort,
    PropertyCodec::NullableUShort,
]);

pub const MODELS: PropertyType = PropertyType::fixed("models");
pub const DISPLAY_NAME: PropertyType = PropertyType::fixed("name");
pub const DESCRIPTION: PropertyType = PropertyType::fixed("description");
pub const SIZE: PropertyType = PropertyType::fixed("size");
pub const STAND_ANIMATION: PropertyType = PropertyType::fixed("stand-animation");
pub const WALK_ANIMATION: PropertyType = PropertyType::fixed("walk-animation");
pub const WALK_ANIMATIONS: PropertyType = PropertyType::fixed("walk-animations");
pub const COLOURS: PropertyType = PropertyType::fixed("colours");
pub const HEAD_MODELS: PropertyType = PropertyType::fixed("head-models");
pub const UNUSED_90: PropertyType = PropertyType::fixed("unused-90");
pub const UNUSED_91: PropertyType = PropertyType::fixed("unused-91");
pub const UNUSED_92: PropertyType = PropertyType::fixed("unused-92");
pub const MINIMAP_DOT: PropertyType = PropertyType::fixed("minimap-dot");
pub const COMBAT_LEVEL: PropertyType = PropertyType::fixed("combat-level");
pub const SCALE_XZ: PropertyType = PropertyType::fixed("scale-xz");
pub const SCALE_Y: PropertyType = PropertyType::fixed("scale-y");
pub const PRIORITY_RENDER: PropertyType = PropertyType::fixed("priority-render");
pub const AMBIENT: PropertyType = PropertyType::fixed("ambient");
pub const CONTRAST: PropertyType = PropertyType::fixed("contrast");
pub const HEAD_ICON: PropertyType = PropertyType::fixed("head-icon");
pub const TURN_SPEED: PropertyType = PropertyType::fixed("turn-speed");
pub const MORPHISMS: PropertyType = PropertyType::fixed("morphisms");
pub const CLICKABLE: PropertyType = PropertyType::fixed("clickable");

pub const ACTION_PREFIX: &str = "action";
pub const ACTION_SLOTS: u8 = 10;

#[must_use]
pub fn action(slot: u8) -> PropertyType {
    PropertyType::dynamic(ACTION_PREFIX, u16::from(slot))
}

static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
    let no_models = PropertyValue::List(Vec::new());

    DomainSchema::builder(NAME)
        .property(1, MODELS, MODEL_IDS, no_models.clone())
        .property(2, DISPLAY_NAME, PropertyCodec::Text, PropertyValue::Text(None))
        .property(3, DESCRIPTION, PropertyCodec::Text, PropertyValue::Text(None))
        .property(12, SIZE, PropertyCodec::Byte, 1)
        .property(13, STAND_ANIMATION, PropertyCodec::NullableUShort, -1)
        .property(14, WALK_ANIMATION, PropertyCodec::NullableUShort, -1)
        .property(17, WALK_ANIMATIONS, WALK_SET, PropertyValue::int_tuple([-1; 4]))
        .family(30, ACTION_SLOTS, ACTION_PREFIX, PropertyCodec::Action, PropertyValue::Text(None))
        .property(40, COLOURS, COLOUR_MAP, PropertyValue::List(Vec::new()))
        .property(60, HEAD_MODELS, MODEL_IDS, no_models)
        .property(90, UNUSED_90, PropertyCodec::UShort, 0)
        .property(91, UNUSED_91, PropertyCodec::UShort, 0)
        .property(92, UNUSED_92, PropertyCodec::UShort, 0)
        .flag(93, MINIMAP_DOT, false)
        .property(95, COMBAT_LEVEL, PropertyCodec::NullableUShort, -1)
        .property(97, SCALE_XZ, PropertyCodec::UShort, 128)
        .property(98, SCALE_Y, PropertyCodec::UShort, 128)
        .flag(99, PRIORITY_RENDER, true)
        .property(100, AMBIENT, PropertyCodec::Byte, 0)
        .property(101, CONTRAST, PropertyCodec::Byte, 0)
        .property(102, HEAD_ICON, PropertyCodec::NullableUShort, -1)
        .property(103, TURN_SPEED, PropertyCodec::UShort, 32)
        .property(106, MORPHISMS, PropertyCodec::Morphisms, Morphisms::empty())
        .flag(107, CLICKABLE, false)
        .build()
        .expect("npc schema is valid")
});

#[must_use]
pub fn schema() -> &'static DomainSchema {
    &SCHEMA
}

config_definition! {
    /// An npc definition.
    NpcDefinition
}

pub static SUPPLIER: DefinitionSupplier<NpcDefinition> =
    DefinitionSupplier::new(NAME, RecordLayout::Indexed, schema, NpcDefinition::new);

/// Movement animations set by the walk animation group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkAnimations {
    pub walk: i32,
    pub turn_around: i32,
    pub turn_right: i32,
    pub turn_left: i32,
}

impl NpcDefinition {
    pub fn name(&self) -> Option<&str> {
        self.text_value(DISPLAY_NAME)
    }

    pub fn description(&self) -> Option<&str> {
        self.text_value(DESCRIPTION)
    }

    pub fn models(&self) -> Vec<i32> {
        self.ints(MODELS)
    }

    pub fn head_models(&self) -> Vec<i32> {
        self.ints(HEAD_MODELS)
    }

    /// Tiles the npc occupies along each side.
    pub fn size(&self) -> i32 {
        self.int_value(SIZE)
    }

    pub fn stand_animation(&self) -> i32 {
        self.int_value(STAND_ANIMATION)
    }

    /// The walk animation, from the animation group when one is set.
    pub fn walk_animation(&self) -> i32 {
        if self.is_custom(WALK_ANIMATIONS) {
            self.walk_animations().walk
        } else {
            self.int_value(WALK_ANIMATION)
        }
    }

    pub fn walk_animations(&self) -> WalkAnimations {
        match self.ints(WALK_ANIMATIONS).as_slice() {
            &[walk, turn_around, turn_right, turn_left] => WalkAnimations {
                walk,
                turn_around,
                turn_right,
                turn_left,
            },
            _ => WalkAnimations {
                walk: -1,
                turn_around: -1,
                turn_right: -1,
                turn_left: -1,
            },
        }
    }

    pub fn action(&self, slot: u8) -> Option<&str> {
        self.text_value(action(slot))
    }

    pub fn colours(&self) -> Vec<(i32, i32)> {
        self.int_pairs(COLOURS)
    }

    pub fn combat_level(&self) -> i32 {
        self.int_value(COMBAT_LEVEL)
    }

    pub fn is_minimap_visible(&self) -> bool {
        self.bool_value(MINIMAP_DOT)
    }

    pub fn is_clickable(&self) -> bool {
        self.bool_value(CLICKABLE)
    }

    pub fn head_icon(&self) -> i32 {
        self.int_value(HEAD_ICON)
    }

    pub fn turn_speed(&self) -> i32 {
        self.int_value(TURN_SPEED)
    }

    pub fn scale(&self) -> (i32, i32) {
        (self.int_value(SCALE_XZ), self.int_value(SCALE_Y))
    }

    pub fn morphisms(&self) -> Option<&Morphisms> {
        self.properties()
            .find(MORPHISMS)
            .and_then(|property| property.custom_value())
            .and_then(PropertyValue::as_morphisms)
    }
}
