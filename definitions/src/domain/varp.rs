//! Varp (`varp`) definitions: player variables.

use once_cell::sync::Lazy;
use schema::{DomainSchema, PropertyCodec, PropertyType, PropertyValue};

use crate::definition::{config_definition, ConfigDefinition};
use crate::supplier::DefinitionSupplier;
use crate::table::RecordLayout;

pub const NAME: &str = "varp";

pub const UNUSED_1: PropertyType = PropertyType::fixed("unused-1");
pub const UNUSED_2: PropertyType = PropertyType::fixed("unused-2");
pub const FIRST_LOAD: PropertyType = PropertyType::fixed("first-load");
pub const PERSIST: PropertyType = PropertyType::fixed("persist");
pub const CLIENT_CODE: PropertyType = PropertyType::fixed("client-code");
pub const UNUSED_6: PropertyType = PropertyType::fixed("unused-6");
pub const UNUSED_7: PropertyType = PropertyType::fixed("unused-7");
pub const TRANSMIT_MODE_1: PropertyType = PropertyType::fixed("transmit-mode-1");
pub const UNUSED_10: PropertyType = PropertyType::fixed("unused-10");
pub const TRANSMIT: PropertyType = PropertyType::fixed("transmit");
pub const UNUSED_12: PropertyType = PropertyType::fixed("unused-12");
pub const TRANSMIT_MODE_2: PropertyType = PropertyType::fixed("transmit-mode-2");

static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
    DomainSchema::builder(NAME)
        .property(1, UNUSED_1, PropertyCodec::UByte, 0)
        .property(2, UNUSED_2, PropertyCodec::UByte, 0)
        .flag(3, FIRST_LOAD, true)
        .flag(4, PERSIST, false)
        .property(5, CLIENT_CODE, PropertyCodec::UShort, 0)
        .flag(6, UNUSED_6, true)
        .property(7, UNUSED_7, PropertyCodec::Int, 0)
        .flag(8, TRANSMIT_MODE_1, true)
        .property(10, UNUSED_10, PropertyCodec::Text, PropertyValue::Text(None))
        .flag(11, TRANSMIT, true)
        .property(12, UNUSED_12, PropertyCodec::Int, 0)
        .flag(13, TRANSMIT_MODE_2, true)
        .build()
        .expect("varp schema is valid")
});

#[must_use]
pub fn schema() -> &'static DomainSchema {
    &SCHEMA
}

config_definition! {
    /// A varp definition.
    VarpDefinition
}

pub static SUPPLIER: DefinitionSupplier<VarpDefinition> =
    DefinitionSupplier::new(NAME, RecordLayout::Counted, schema, VarpDefinition::new);

impl VarpDefinition {
    /// Client behaviour hook run when the varp changes; `0` for none.
    pub fn client_code(&self) -> i32 {
        self.int_value(CLIENT_CODE)
    }

    pub fn is_first_load(&self) -> bool {
        self.bool_value(FIRST_LOAD)
    }

    pub fn persists(&self) -> bool {
        self.bool_value(PERSIST)
    }

    pub fn transmits(&self) -> bool {
        self.bool_value(TRANSMIT)
    }

    /// `2` or `1` when a transmit mode opcode is present, else `0`.
    pub fn transmit_mode(&self) -> i32 {
        if self.bool_value(TRANSMIT_MODE_2) {
            2
        } else if self.bool_value(TRANSMIT_MODE_1) {
            1
        } else {
            0
        }
    }
}
