//! The opcode-terminated record loop.
//!
//! A record is a run of `opcode, payload` pairs closed by opcode `0`. Only
//! properties holding a value of their own are written; every other property
//! is rebuilt from its domain default on decode.

use buffer::{BufferError, ByteReader, ByteWriter};
use schema::{ConfigPropertyMap, DomainSchema, SchemaError, TERMINATOR_OPCODE};
use tracing::trace;

use crate::error::{CodecError, CodecResult};

/// Decodes one record that must span exactly `bytes`.
pub fn decode_record(schema: &DomainSchema, id: i32, bytes: &[u8]) -> CodecResult<ConfigPropertyMap> {
    let mut reader = ByteReader::new(bytes);
    let mut properties = schema.instantiate();
    decode_properties(schema.name(), id, &mut reader, &mut properties)?;

    if !reader.is_empty() {
        return Err(CodecError::TrailingRecordData {
            domain: schema.name(),
            id,
            remaining: reader.remaining(),
        });
    }
    Ok(properties)
}

/// Decodes properties from `reader` into `properties` up to and including
/// the terminator.
pub fn decode_properties(
    domain: &'static str,
    id: i32,
    reader: &mut ByteReader<'_>,
    properties: &mut ConfigPropertyMap,
) -> CodecResult<()> {
    loop {
        let opcode = reader
            .read_u8()
            .map_err(|err| record_error(domain, id, err))?;
        if opcode == TERMINATOR_OPCODE {
            return Ok(());
        }

        let property = properties
            .get_mut(opcode)
            .ok_or(CodecError::UnknownOpcode { domain, id, opcode })?;
        property
            .decode(reader)
            .map_err(|err| record_error(domain, id, err))?;
        trace!(domain, id, opcode, property = property.name(), "decoded property");
    }
}

/// Encodes one record, terminator included.
pub fn encode_record(
    domain: &'static str,
    id: i32,
    properties: &ConfigPropertyMap,
) -> CodecResult<Vec<u8>> {
    let mut writer = ByteWriter::with_capacity(record_len(properties));
    encode_properties(domain, id, properties, &mut writer)?;
    Ok(writer.finish())
}

/// Writes every written property in opcode order, then the terminator.
pub fn encode_properties(
    domain: &'static str,
    id: i32,
    properties: &ConfigPropertyMap,
    writer: &mut ByteWriter,
) -> CodecResult<()> {
    for property in properties.iter().filter(|property| property.is_written()) {
        writer.write_u8(property.opcode());
        property
            .encode(writer)
            .map_err(|source| CodecError::InvalidValue { domain, id, source })?;
    }
    writer.write_u8(TERMINATOR_OPCODE);
    Ok(())
}

/// Exact encoded length of a record, terminator included.
#[must_use]
pub fn record_len(properties: &ConfigPropertyMap) -> usize {
    let body: usize = properties
        .iter()
        .filter(|property| property.is_written())
        .map(|property| 1 + property.encoded_len())
        .sum();
    body + 1
}

fn record_error(domain: &'static str, id: i32, err: BufferError) -> CodecError {
    match err {
        BufferError::UnexpectedEof { .. } | BufferError::UnterminatedString { .. } => {
            CodecError::TruncatedRecord { domain, id }
        }
        other => CodecError::InvalidValue {
            domain,
            id,
            source: SchemaError::Buffer(other),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{PropertyCodec, PropertyType, PropertyValue};

    const NAME: PropertyType = PropertyType::fixed("name");
    const SIZE: PropertyType = PropertyType::fixed("size");
    const SOLID: PropertyType = PropertyType::fixed("solid");

    fn schema() -> DomainSchema {
        DomainSchema::builder("test")
            .property(2, NAME, PropertyCodec::Text, PropertyValue::Text(None))
            .property(14, SIZE, PropertyCodec::UByte, 1)
            .flag(17, SOLID, false)
            .build()
            .unwrap()
    }

    #[test]
    fn empty_record_is_one_byte() {
        let schema = schema();
        let properties = schema.instantiate();
        let bytes = encode_record("test", 0, &properties).unwrap();
        assert_eq!(bytes, vec![0]);
        assert_eq!(record_len(&properties), 1);

        let decoded = decode_record(&schema, 0, &bytes).unwrap();
        assert!(decoded.iter().all(|property| !property.is_custom()));
    }

    #[test]
    fn decode_sets_custom_values() {
        let decoded = decode_record(&schema(), 3, b"\x02Door\n\x0E\x02\x11\x00").unwrap();
        assert_eq!(decoded.text(NAME), Some("Door"));
        assert_eq!(decoded.int(SIZE), Some(2));
        assert_eq!(decoded.bool(SOLID), Some(false));
    }

    #[test]
    fn encode_is_opcode_ordered_and_exact() {
        let schema = schema();
        let mut properties = schema.instantiate();
        properties.set(SOLID, false).unwrap();
        properties.set(NAME, "Gate").unwrap();

        let bytes = encode_record("test", 0, &properties).unwrap();
        assert_eq!(bytes, b"\x02Gate\n\x11\x00");
        assert_eq!(bytes.len(), record_len(&properties));
    }

    #[test]
    fn flag_at_default_is_not_written() {
        let schema = schema();
        let mut properties = schema.instantiate();
        properties.set(SOLID, true).unwrap();
        assert_eq!(encode_record("test", 0, &properties).unwrap(), vec![0]);
    }

    #[test]
    fn unknown_opcode_fails_closed() {
        let err = decode_record(&schema(), 9, &[0x63, 0x01, 0x00]).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnknownOpcode {
                domain: "test",
                id: 9,
                opcode: 0x63
            }
        );
    }

    #[test]
    fn truncation_is_reported() {
        let schema = schema();
        for bytes in [&b""[..], b"\x0E", b"\x02Do", b"\x0E\x01"] {
            let err = decode_record(&schema, 1, bytes).unwrap_err();
            assert_eq!(err, CodecError::TruncatedRecord { domain: "test", id: 1 });
        }
    }

    #[test]
    fn trailing_bytes_are_reported() {
        let err = decode_record(&schema(), 1, &[0, 0, 0]).unwrap_err();
        assert_eq!(
            err,
            CodecError::TrailingRecordData {
                domain: "test",
                id: 1,
                remaining: 2
            }
        );
    }

    #[test]
    fn empty_morphisms_never_reach_the_encoder() {
        const MORPHISMS: PropertyType = PropertyType::fixed("morphisms");
        let schema = DomainSchema::builder("test")
            .property(106, MORPHISMS, PropertyCodec::Morphisms, schema::Morphisms::empty())
            .build()
            .unwrap();
        let mut properties = schema.instantiate();
        let err = properties.set(MORPHISMS, schema::Morphisms::empty()).unwrap_err();
        assert!(matches!(err, schema::SchemaError::TypeMismatch { .. }));
        assert_eq!(encode_record("test", 4, &properties).unwrap(), vec![0]);
    }
}
