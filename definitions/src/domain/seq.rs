//! Sequence (`seq`) definitions: animations.

use once_cell::sync::Lazy;
use schema::{DomainSchema, PropertyCodec, PropertyType, PropertyValue, BYTE_LIST, SEQUENCE_FRAMES};

use crate::definition::{config_definition, ConfigDefinition};
use crate::supplier::DefinitionSupplier;
use crate::table::RecordLayout;

pub const NAME: &str = "seq";

/// Appended to a custom interleave order when it is read.
pub const INTERLEAVE_SENTINEL: i32 = 9_999_999;

pub const FRAMES: PropertyType = PropertyType::fixed("frames");
pub const LOOP_OFFSET: PropertyType = PropertyType::fixed("loop-offset");
pub const INTERLEAVE_ORDER: PropertyType = PropertyType::fixed("interleave-order");
pub const STRETCHES: PropertyType = PropertyType::fixed("stretches");
pub const PRIORITY: PropertyType = PropertyType::fixed("priority");
pub const SHIELD: PropertyType = PropertyType::fixed("shield");
pub const WEAPON: PropertyType = PropertyType::fixed("weapon");
pub const MAXIMUM_LOOPS: PropertyType = PropertyType::fixed("maximum-loops");
pub const ANIMATING_PRECEDENCE: PropertyType = PropertyType::fixed("animating-precedence");
pub const WALKING_PRECEDENCE: PropertyType = PropertyType::fixed("walking-precedence");
pub const REPLAY_MODE: PropertyType = PropertyType::fixed("replay-mode");
pub const UNUSED_12: PropertyType = PropertyType::fixed("unused-12");

static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
    DomainSchema::builder(NAME)
        .property(1, FRAMES, SEQUENCE_FRAMES, PropertyValue::List(Vec::new()))
        .property(2, LOOP_OFFSET, PropertyCodec::NullableUShort, -1)
        .property(3, INTERLEAVE_ORDER, BYTE_LIST, PropertyValue::List(Vec::new()))
        .flag(4, STRETCHES, true)
        .property(5, PRIORITY, PropertyCodec::UByte, 5)
        .property(6, SHIELD, PropertyCodec::NullableUShort, -1)
        .property(7, WEAPON, PropertyCodec::NullableUShort, -1)
        .property(8, MAXIMUM_LOOPS, PropertyCodec::UByte, 99)
        .property(9, ANIMATING_PRECEDENCE, PropertyCodec::UByte, 0)
        .property(10, WALKING_PRECEDENCE, PropertyCodec::UByte, 0)
        .property(11, REPLAY_MODE, PropertyCodec::UByte, 2)
        .property(12, UNUSED_12, PropertyCodec::Int, 0)
        .build()
        .expect("sequence schema is valid")
});

#[must_use]
pub fn schema() -> &'static DomainSchema {
    &SCHEMA
}

config_definition! {
    /// A sequence definition.
    SequenceDefinition
}

pub static SUPPLIER: DefinitionSupplier<SequenceDefinition> =
    DefinitionSupplier::new(NAME, RecordLayout::Counted, schema, SequenceDefinition::new);

/// One frame of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequenceFrame {
    pub frame: i32,
    /// `-1` when the frame has no secondary frame.
    pub secondary: i32,
    pub duration: i32,
}

impl SequenceDefinition {
    pub fn frames(&self) -> Vec<SequenceFrame> {
        self.properties()
            .value(FRAMES)
            .and_then(PropertyValue::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|row| match row.to_ints()?.as_slice() {
                [frame, secondary, duration] => Some(SequenceFrame {
                    frame: *frame,
                    secondary: *secondary,
                    duration: *duration,
                }),
                _ => None,
            })
            .collect()
    }

    pub fn frame_count(&self) -> usize {
        self.frames().len()
    }

    /// Frames from the end to replay when looping, `-1` for none.
    pub fn loop_offset(&self) -> i32 {
        self.int_value(LOOP_OFFSET)
    }

    /// The interleave order terminated by [`INTERLEAVE_SENTINEL`], if set.
    pub fn interleave_order(&self) -> Option<Vec<i32>> {
        if !self.is_custom(INTERLEAVE_ORDER) {
            return None;
        }
        let mut order = self.ints(INTERLEAVE_ORDER);
        order.push(INTERLEAVE_SENTINEL);
        Some(order)
    }

    pub fn stretches(&self) -> bool {
        self.bool_value(STRETCHES)
    }

    pub fn priority(&self) -> i32 {
        self.int_value(PRIORITY)
    }

    pub fn shield(&self) -> i32 {
        self.int_value(SHIELD)
    }

    pub fn weapon(&self) -> i32 {
        self.int_value(WEAPON)
    }

    pub fn maximum_loops(&self) -> i32 {
        self.int_value(MAXIMUM_LOOPS)
    }

    fn precedence(&self, ty: PropertyType) -> i32 {
        if self.is_custom(ty) {
            self.int_value(ty)
        } else if self.is_custom(INTERLEAVE_ORDER) {
            2
        } else {
            0
        }
    }

    pub fn animating_precedence(&self) -> i32 {
        self.precedence(ANIMATING_PRECEDENCE)
    }

    pub fn walking_precedence(&self) -> i32 {
        self.precedence(WALKING_PRECEDENCE)
    }

    pub fn replay_mode(&self) -> i32 {
        self.int_value(REPLAY_MODE)
    }
}
