//! Per-domain definition factories.

use archive::name_hash;
use schema::{ConfigPropertyMap, DomainSchema};

use crate::definition::ConfigDefinition;
use crate::error::CodecResult;
use crate::record::{decode_record, encode_record};
use crate::table::RecordLayout;

/// Stateless factory for the definitions of one domain.
///
/// Holds the domain's name, record layout, schema accessor and the
/// constructor of its typed wrapper.
#[derive(Debug)]
pub struct DefinitionSupplier<T> {
    name: &'static str,
    layout: RecordLayout,
    schema: fn() -> &'static DomainSchema,
    construct: fn(i32, ConfigPropertyMap) -> T,
}

impl<T> Clone for DefinitionSupplier<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for DefinitionSupplier<T> {}

impl<T> DefinitionSupplier<T> {
    #[must_use]
    pub const fn new(
        name: &'static str,
        layout: RecordLayout,
        schema: fn() -> &'static DomainSchema,
        construct: fn(i32, ConfigPropertyMap) -> T,
    ) -> Self {
        Self {
            name,
            layout,
            schema,
            construct,
        }
    }

    /// The same supplier reading and writing another record layout.
    #[must_use]
    pub const fn with_layout(mut self, layout: RecordLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The supplier's identifier, the name hash of its domain.
    #[must_use]
    pub fn id(&self) -> i32 {
        name_hash(self.name)
    }

    #[must_use]
    pub const fn layout(&self) -> RecordLayout {
        self.layout
    }

    #[must_use]
    pub fn schema(&self) -> &'static DomainSchema {
        (self.schema)()
    }

    /// A fresh property map with every property at its default.
    #[must_use]
    pub fn default_properties(&self) -> ConfigPropertyMap {
        self.schema().instantiate()
    }

    /// Wraps a property map as a typed definition.
    pub fn create(&self, id: i32, properties: ConfigPropertyMap) -> T {
        (self.construct)(id, properties)
    }

    /// A definition with every property at its default.
    pub fn create_default(&self, id: i32) -> T {
        self.create(id, self.default_properties())
    }

    /// Decodes one record.
    pub fn decode(&self, id: i32, bytes: &[u8]) -> CodecResult<T> {
        let properties = decode_record(self.schema(), id, bytes)?;
        Ok(self.create(id, properties))
    }

    /// Names of the archive entries holding this domain.
    #[must_use]
    pub fn entry_names(&self) -> Vec<String> {
        self.layout.entry_names(self.name)
    }
}

impl<T: ConfigDefinition> DefinitionSupplier<T> {
    /// Encodes one definition as a record.
    pub fn encode(&self, definition: &T) -> CodecResult<Vec<u8>> {
        encode_record(self.name, definition.id(), definition.properties())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::config_definition;
    use once_cell::sync::Lazy;
    use schema::{PropertyCodec, PropertyType};

    const SIZE: PropertyType = PropertyType::fixed("size");

    static SCHEMA: Lazy<DomainSchema> = Lazy::new(|| {
        DomainSchema::builder("test")
            .property(14, SIZE, PropertyCodec::UByte, 1)
            .build()
            .unwrap()
    });

    fn schema() -> &'static DomainSchema {
        &SCHEMA
    }

    config_definition! {
        TestDefinition
    }

    static SUPPLIER: DefinitionSupplier<TestDefinition> =
        DefinitionSupplier::new("test", RecordLayout::Indexed, schema, TestDefinition::new);

    #[test]
    fn id_is_name_hash() {
        assert_eq!(SUPPLIER.id(), name_hash("test"));
        assert_eq!(SUPPLIER.name(), "test");
    }

    #[test]
    fn default_properties_are_fresh_copies() {
        let mut a = SUPPLIER.default_properties();
        let b = SUPPLIER.default_properties();
        a.set(SIZE, 9).unwrap();
        assert_eq!(b.int(SIZE), Some(1));
        assert_eq!(SUPPLIER.schema().template().int(SIZE), Some(1));
    }

    #[test]
    fn decode_and_encode() {
        let definition = SUPPLIER.decode(4, &[14, 2, 0]).unwrap();
        assert_eq!(definition.id(), 4);
        assert_eq!(definition.int_value(SIZE), 2);
        assert_eq!(SUPPLIER.encode(&definition).unwrap(), vec![14, 2, 0]);
        assert_eq!(SUPPLIER.encode(&SUPPLIER.create_default(5)).unwrap(), vec![0]);
    }

    #[test]
    fn layout_override() {
        let counted = SUPPLIER.with_layout(RecordLayout::Counted);
        assert_eq!(counted.entry_names(), vec!["test.dat"]);
        assert_eq!(SUPPLIER.entry_names(), vec!["test.dat", "test.idx"]);
    }
}
