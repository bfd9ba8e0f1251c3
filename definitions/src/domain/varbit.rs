//! Varbit (`varbit`) definitions: bit ranges within a varp.

use once_cell::sync::Lazy;
use schema::{DomainSchema, PropertyCodec, PropertyType, PropertyValue};

use crate::definition::{config_definition, ConfigDefinition};
use crate::supplier::DefinitionSupplier;
use crate::table::RecordLayout;

pub const NAME: &str = "varbit";

const BIT_RANGE: PropertyCodec = PropertyCodec::Composite(&[
    PropertyCodec::UShort,
    PropertyCodec::UByte,
    PropertyCodec::UByte,
]);

pub const BITS: PropertyType = PropertyType::fixed("bits");
pub const UNUSED_2: PropertyType = PropertyType::fixed("unused-2");
pub const UNUSED_3: PropertyType = PropertyType::fixed("unused-3");
pub const UNUSED_4: PropertyType = PropertyType::fixed("unused-4");
pub const UNUSED_10: PropertyType = PropertyType::fixed("unused-10");

static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
    DomainSchema::builder(NAME)
        .property(1, BITS, BIT_RANGE, PropertyValue::int_tuple([0, 0, 0]))
        .flag(2, UNUSED_2, true)
        .property(3, UNUSED_3, PropertyCodec::Int, 0)
        .property(4, UNUSED_4, PropertyCodec::Int, 0)
        .property(10, UNUSED_10, PropertyCodec::Text, PropertyValue::Text(None))
        .build()
        .expect("varbit schema is valid")
});

#[must_use]
pub fn schema() -> &'static DomainSchema {
    &SCHEMA
}

config_definition! {
    /// A varbit definition.
    VarbitDefinition
}

pub static SUPPLIER: DefinitionSupplier<VarbitDefinition> =
    DefinitionSupplier::new(NAME, RecordLayout::Counted, schema, VarbitDefinition::new);

impl VarbitDefinition {
    fn bit(&self, index: usize) -> i32 {
        self.ints(BITS).get(index).copied().unwrap_or_default()
    }

    /// The varp holding this varbit.
    pub fn varp(&self) -> i32 {
        self.bit(0)
    }

    pub fn low_bit(&self) -> i32 {
        self.bit(1)
    }

    pub fn high_bit(&self) -> i32 {
        self.bit(2)
    }

    /// Mask of the varbit's value once shifted down by [`Self::low_bit`].
    pub fn mask(&self) -> u32 {
        let width = (self.high_bit() - self.low_bit() + 1).clamp(0, 32) as u32;
        u32::MAX.checked_shr(32 - width).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_range() {
        let varbit = SUPPLIER.decode(0, &[1, 0x01, 0xAC, 4, 7, 0]).unwrap();
        assert_eq!(varbit.varp(), 428);
        assert_eq!(varbit.low_bit(), 4);
        assert_eq!(varbit.high_bit(), 7);
        assert_eq!(varbit.mask(), 0xF);
    }

    #[test]
    fn full_width_mask() {
        let varbit = SUPPLIER.decode(0, &[1, 0, 1, 0, 31, 0]).unwrap();
        assert_eq!(varbit.mask(), u32::MAX);
    }
}
