//! A property bound to its opcode, codec and default.

use buffer::{BufferResult, ByteReader, ByteWriter};

use crate::codec::PropertyCodec;
use crate::error::{SchemaError, SchemaResult};
use crate::types::PropertyType;
use crate::value::PropertyValue;

/// One field of a record: its identity, wire codec, default and the value
/// decoded or set for this record, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SerializableProperty {
    ty: PropertyType,
    opcode: u8,
    codec: PropertyCodec,
    default: PropertyValue,
    value: Option<PropertyValue>,
}

impl SerializableProperty {
    /// Creates a property at its default.
    pub fn new(
        ty: PropertyType,
        opcode: u8,
        codec: PropertyCodec,
        default: PropertyValue,
    ) -> SchemaResult<Self> {
        if opcode == 0 {
            return Err(SchemaError::ReservedOpcode {
                property: ty.name(),
            });
        }
        check(ty, codec, &default)?;
        Ok(Self {
            ty,
            opcode,
            codec,
            default,
            value: None,
        })
    }

    #[must_use]
    pub const fn ty(&self) -> PropertyType {
        self.ty
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.ty.name()
    }

    #[must_use]
    pub const fn opcode(&self) -> u8 {
        self.opcode
    }

    #[must_use]
    pub const fn codec(&self) -> PropertyCodec {
        self.codec
    }

    #[must_use]
    pub const fn default_value(&self) -> &PropertyValue {
        &self.default
    }

    /// The current value, falling back to the default.
    #[must_use]
    pub fn value(&self) -> &PropertyValue {
        self.value.as_ref().unwrap_or(&self.default)
    }

    /// The value set for this record, if any.
    #[must_use]
    pub const fn custom_value(&self) -> Option<&PropertyValue> {
        self.value.as_ref()
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        self.value.is_some()
    }

    /// Sets the current value after checking the codec can write it.
    ///
    /// An empty morphism list is a valid default but cannot be written, so
    /// it is rejected here.
    pub fn set(&mut self, value: impl Into<PropertyValue>) -> SchemaResult<()> {
        let value = value.into();
        check(self.ty, self.codec, &value)?;
        if let PropertyValue::Morphisms(morphisms) = &value {
            if morphisms.stored_count().is_none() {
                return Err(SchemaError::TypeMismatch {
                    property: self.ty.name(),
                    codec: self.codec.label(),
                    found: "empty morphisms",
                });
            }
        }
        self.value = Some(value);
        Ok(())
    }

    /// Clears the current value back to the default.
    pub fn reset(&mut self) {
        self.value = None;
    }

    /// Returns true if encoding the record emits this property.
    ///
    /// A flag is emitted only while it holds the value its opcode sets.
    #[must_use]
    pub fn is_written(&self) -> bool {
        match (self.codec, &self.value) {
            (_, None) => false,
            (PropertyCodec::Flag { set }, Some(value)) => value.as_bool() == Some(set),
            (_, Some(_)) => true,
        }
    }

    /// Decodes this property's payload and makes the result current.
    pub fn decode(&mut self, reader: &mut ByteReader<'_>) -> BufferResult<()> {
        self.value = Some(self.codec.decode(reader)?);
        Ok(())
    }

    /// Encodes the current value's payload, without the opcode.
    pub fn encode(&self, writer: &mut ByteWriter) -> SchemaResult<()> {
        self.codec.encode(self.value(), writer)
    }

    /// Exact payload length of the current value.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        self.codec.encoded_len(self.value())
    }
}

fn check(ty: PropertyType, codec: PropertyCodec, value: &PropertyValue) -> SchemaResult<()> {
    if codec.accepts(value) {
        Ok(())
    } else {
        Err(SchemaError::TypeMismatch {
            property: ty.name(),
            codec: codec.label(),
            found: value.kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Morphisms;

    const SIZE: PropertyType = PropertyType::fixed("size");
    const SOLID: PropertyType = PropertyType::fixed("solid");

    fn size() -> SerializableProperty {
        SerializableProperty::new(SIZE, 14, PropertyCodec::UByte, PropertyValue::Int(1)).unwrap()
    }

    #[test]
    fn value_falls_back_to_default() {
        let mut property = size();
        assert_eq!(property.value(), &PropertyValue::Int(1));
        assert!(!property.is_custom());

        property.set(3).unwrap();
        assert_eq!(property.value(), &PropertyValue::Int(3));
        assert!(property.is_custom());

        property.reset();
        assert_eq!(property.value(), &PropertyValue::Int(1));
        assert!(!property.is_custom());
    }

    #[test]
    fn set_rejects_values_the_codec_cannot_write() {
        let mut property = size();
        let err = property.set("big").unwrap_err();
        assert_eq!(
            err,
            SchemaError::TypeMismatch {
                property: "size",
                codec: "ubyte",
                found: "text"
            }
        );
        assert!(property.set(256).is_err());
        assert!(!property.is_custom());
    }

    #[test]
    fn empty_morphisms_are_a_default_but_not_a_value() {
        const MORPHISMS: PropertyType = PropertyType::fixed("morphisms");
        let mut property = SerializableProperty::new(
            MORPHISMS,
            106,
            PropertyCodec::Morphisms,
            PropertyValue::Morphisms(Morphisms::empty()),
        )
        .unwrap();

        let err = property.set(Morphisms::empty()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::TypeMismatch {
                property: "morphisms",
                codec: "morphisms",
                found: "empty morphisms"
            }
        );
        assert!(!property.is_custom());

        property.set(Morphisms::new(-1, 7, vec![12])).unwrap();
        let mut writer = ByteWriter::new();
        property.encode(&mut writer).unwrap();
        assert_eq!(writer.finish().len(), property.encoded_len());
    }

    #[test]
    fn opcode_zero_is_reserved() {
        let err = SerializableProperty::new(SIZE, 0, PropertyCodec::UByte, PropertyValue::Int(1))
            .unwrap_err();
        assert_eq!(err, SchemaError::ReservedOpcode { property: "size" });
    }

    #[test]
    fn invalid_default_is_rejected() {
        assert!(
            SerializableProperty::new(SIZE, 14, PropertyCodec::UByte, PropertyValue::Int(-1))
                .is_err()
        );
    }

    #[test]
    fn flags_are_written_only_when_set() {
        let mut solid = SerializableProperty::new(
            SOLID,
            17,
            PropertyCodec::Flag { set: false },
            PropertyValue::Bool(true),
        )
        .unwrap();
        assert!(!solid.is_written());

        solid.set(true).unwrap();
        assert!(!solid.is_written());

        solid.set(false).unwrap();
        assert!(solid.is_written());
        assert_eq!(solid.encoded_len(), 0);
    }

    #[test]
    fn decode_marks_custom() {
        let mut property = size();
        let mut reader = ByteReader::new(&[5]);
        property.decode(&mut reader).unwrap();
        assert_eq!(property.custom_value(), Some(&PropertyValue::Int(5)));

        let mut writer = ByteWriter::new();
        property.encode(&mut writer).unwrap();
        assert_eq!(writer.finish(), vec![5]);
        assert_eq!(property.encoded_len(), 1);
    }
}
