//! Declarative wire codecs for property values.

use std::fmt;

use buffer::{BufferError, BufferResult, ByteReader, ByteWriter, U24_MAX};

use crate::error::{SchemaError, SchemaResult};
use crate::value::{Morphisms, PropertyValue, MORPHISM_COUNT_BIAS};

/// Action text that marks an action slot as hidden on the wire.
///
/// Matched in any ASCII case on decode, so `"Hidden"` reads as an absent
/// action and re-encodes as this lowercase form.
pub const HIDDEN_ACTION: &str = "hidden";

/// Wire sentinel for an absent unsigned short.
const NULL_USHORT: u16 = u16::MAX;

/// How one property value is laid out after its opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum PropertyCodec {
    /// No payload; the opcode alone sets the value to `set`.
    Flag { set: bool },
    UByte,
    Byte,
    UShort,
    Short,
    /// Unsigned short with `65535` decoded as `-1`.
    NullableUShort,
    Tribyte,
    Int,
    Smart,
    SignedSmart,
    LargeSmart,
    /// Newline-terminated string.
    Text,
    /// Newline-terminated string where `"hidden"` decodes as absent.
    Action,
    /// Fixed sequence of parts, decoded as a tuple.
    Composite(&'static [PropertyCodec]),
    /// Unsigned byte count followed by that many elements.
    List(&'static PropertyCodec),
    /// Varbit, varp, biased count, then the child ids.
    Morphisms,
}

/// A count-prefixed list of model ids.
pub const MODEL_IDS: PropertyCodec = PropertyCodec::List(&PropertyCodec::UShort);

/// A count-prefixed list of `(model id, model type)` pairs.
pub const MODEL_IDS_WITH_TYPES: PropertyCodec =
    PropertyCodec::List(&PropertyCodec::Composite(&[PropertyCodec::UShort, PropertyCodec::UByte]));

/// A count-prefixed list of `(original, replacement)` colour pairs.
pub const COLOUR_MAP: PropertyCodec =
    PropertyCodec::List(&PropertyCodec::Composite(&[PropertyCodec::UShort, PropertyCodec::UShort]));

/// A count-prefixed list of `(frame, secondary frame, duration)` rows.
pub const SEQUENCE_FRAMES: PropertyCodec = PropertyCodec::List(&PropertyCodec::Composite(&[
    PropertyCodec::UShort,
    PropertyCodec::NullableUShort,
    PropertyCodec::UShort,
]));

/// A count-prefixed list of unsigned bytes.
pub const BYTE_LIST: PropertyCodec = PropertyCodec::List(&PropertyCodec::UByte);

impl PropertyCodec {
    /// A short name for the codec.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Flag { .. } => "flag",
            Self::UByte => "ubyte",
            Self::Byte => "byte",
            Self::UShort => "ushort",
            Self::Short => "short",
            Self::NullableUShort => "nullable ushort",
            Self::Tribyte => "tribyte",
            Self::Int => "int",
            Self::Smart => "smart",
            Self::SignedSmart => "signed smart",
            Self::LargeSmart => "large smart",
            Self::Text => "text",
            Self::Action => "action",
            Self::Composite(_) => "composite",
            Self::List(_) => "list",
            Self::Morphisms => "morphisms",
        }
    }

    /// Reads one value.
    pub fn decode(&self, reader: &mut ByteReader<'_>) -> BufferResult<PropertyValue> {
        let value = match *self {
            Self::Flag { set } => PropertyValue::Bool(set),
            Self::UByte => PropertyValue::Int(i32::from(reader.read_u8()?)),
            Self::Byte => PropertyValue::Int(i32::from(reader.read_i8()?)),
            Self::UShort => PropertyValue::Int(i32::from(reader.read_u16()?)),
            Self::Short => PropertyValue::Int(i32::from(reader.read_i16()?)),
            Self::NullableUShort => PropertyValue::Int(read_nullable(reader)?),
            Self::Tribyte => PropertyValue::Int(reader.read_u24()? as i32),
            Self::Int => PropertyValue::Int(reader.read_i32()?),
            Self::Smart => PropertyValue::Int(reader.read_smart()?),
            Self::SignedSmart => PropertyValue::Int(reader.read_signed_smart()?),
            Self::LargeSmart => PropertyValue::Int(reader.read_large_smart()?),
            Self::Text => PropertyValue::Text(Some(reader.read_string()?)),
            Self::Action => {
                let action = reader.read_string()?;
                PropertyValue::Text((!action.eq_ignore_ascii_case(HIDDEN_ACTION)).then_some(action))
            }
            Self::Composite(parts) => PropertyValue::Tuple(
                parts
                    .iter()
                    .map(|part| part.decode(reader))
                    .collect::<BufferResult<_>>()?,
            ),
            Self::List(element) => {
                let count = usize::from(reader.read_u8()?);
                let mut values = Vec::with_capacity(count);
                for _ in 0..count {
                    values.push(element.decode(reader)?);
                }
                PropertyValue::List(values)
            }
            Self::Morphisms => {
                let varbit = read_nullable(reader)?;
                let varp = read_nullable(reader)?;
                let count = usize::from(reader.read_u8()?) + MORPHISM_COUNT_BIAS;
                let mut children = Vec::with_capacity(count);
                for _ in 0..count {
                    children.push(read_nullable(reader)?);
                }
                PropertyValue::Morphisms(Morphisms::new(varbit, varp, children))
            }
        };
        Ok(value)
    }

    /// Writes one value.
    pub fn encode(&self, value: &PropertyValue, writer: &mut ByteWriter) -> SchemaResult<()> {
        match (*self, value) {
            (Self::Flag { .. }, PropertyValue::Bool(_)) => {}
            (Self::UByte, PropertyValue::Int(v)) => writer.write_u8(narrow(*v, "ubyte")?),
            (Self::Byte, PropertyValue::Int(v)) => writer.write_i8(narrow(*v, "byte")?),
            (Self::UShort, PropertyValue::Int(v)) => writer.write_u16(narrow(*v, "ushort")?),
            (Self::Short, PropertyValue::Int(v)) => writer.write_i16(narrow(*v, "short")?),
            (Self::NullableUShort, PropertyValue::Int(v)) => write_nullable(writer, *v)?,
            (Self::Tribyte, PropertyValue::Int(v)) => writer.write_u24(narrow(*v, "tribyte")?)?,
            (Self::Int, PropertyValue::Int(v)) => writer.write_i32(*v),
            (Self::Smart, PropertyValue::Int(v)) => writer.write_smart(*v)?,
            (Self::SignedSmart, PropertyValue::Int(v)) => writer.write_signed_smart(*v)?,
            (Self::LargeSmart, PropertyValue::Int(v)) => writer.write_large_smart(*v)?,
            (Self::Text, PropertyValue::Text(text)) => {
                writer.write_string(text.as_deref().unwrap_or_default())?;
            }
            (Self::Action, PropertyValue::Text(action)) => {
                writer.write_string(action.as_deref().unwrap_or(HIDDEN_ACTION))?;
            }
            (Self::Composite(parts), PropertyValue::Tuple(values)) if parts.len() == values.len() => {
                for (part, value) in parts.iter().zip(values) {
                    part.encode(value, writer)?;
                }
            }
            (Self::List(element), PropertyValue::List(values)) => {
                writer.write_u8(narrow(values.len() as i32, "list count")?);
                for value in values {
                    element.encode(value, writer)?;
                }
            }
            (Self::Morphisms, PropertyValue::Morphisms(morphisms)) => {
                let count = morphisms.stored_count().ok_or(BufferError::ValueOutOfRange {
                    value: 0,
                    encoding: "morphism count",
                })?;
                write_nullable(writer, morphisms.varbit)?;
                write_nullable(writer, morphisms.varp)?;
                writer.write_u8(narrow(count as i32, "morphism count")?);
                for &child in &morphisms.children {
                    write_nullable(writer, child)?;
                }
            }
            (codec, value) => {
                return Err(SchemaError::ValueMismatch {
                    codec: codec.label(),
                    found: value.kind(),
                })
            }
        }
        Ok(())
    }

    /// Exact number of bytes [`PropertyCodec::encode`] writes for `value`.
    ///
    /// Only meaningful for values the codec [accepts](PropertyCodec::accepts).
    #[must_use]
    pub fn encoded_len(&self, value: &PropertyValue) -> usize {
        match (*self, value) {
            (Self::Flag { .. }, _) => 0,
            (Self::UByte | Self::Byte, _) => 1,
            (Self::UShort | Self::Short | Self::NullableUShort, _) => 2,
            (Self::Tribyte, _) => 3,
            (Self::Int, _) => 4,
            (Self::Smart, PropertyValue::Int(v)) => {
                if (0..0x80).contains(v) {
                    1
                } else {
                    2
                }
            }
            (Self::SignedSmart, PropertyValue::Int(v)) => {
                if (-64..64).contains(v) {
                    1
                } else {
                    2
                }
            }
            (Self::LargeSmart, PropertyValue::Int(v)) => {
                if (0..0x8000).contains(v) {
                    2
                } else {
                    4
                }
            }
            (Self::Text, PropertyValue::Text(text)) => text_len(text.as_deref().unwrap_or_default()),
            (Self::Action, PropertyValue::Text(action)) => {
                text_len(action.as_deref().unwrap_or(HIDDEN_ACTION))
            }
            (Self::Composite(parts), PropertyValue::Tuple(values)) => parts
                .iter()
                .zip(values)
                .map(|(part, value)| part.encoded_len(value))
                .sum(),
            (Self::List(element), PropertyValue::List(values)) => {
                1 + values.iter().map(|value| element.encoded_len(value)).sum::<usize>()
            }
            (Self::Morphisms, PropertyValue::Morphisms(morphisms)) => {
                2 + 2 + 1 + 2 * morphisms.children.len()
            }
            _ => 0,
        }
    }

    /// Returns true if `value` has the shape and range this codec can write.
    #[must_use]
    pub fn accepts(&self, value: &PropertyValue) -> bool {
        match (*self, value) {
            (Self::Flag { .. }, PropertyValue::Bool(_)) => true,
            (Self::UByte, PropertyValue::Int(v)) => (0..=0xFF).contains(v),
            (Self::Byte, PropertyValue::Int(v)) => (-0x80..=0x7F).contains(v),
            (Self::UShort, PropertyValue::Int(v)) => (0..=0xFFFF).contains(v),
            (Self::Short, PropertyValue::Int(v)) => (-0x8000..=0x7FFF).contains(v),
            (Self::NullableUShort, PropertyValue::Int(v)) => is_nullable(*v),
            (Self::Tribyte, PropertyValue::Int(v)) => (0..=U24_MAX as i32).contains(v),
            (Self::Int, PropertyValue::Int(_)) => true,
            (Self::Smart, PropertyValue::Int(v)) => (0..=0x7FFF).contains(v),
            (Self::SignedSmart, PropertyValue::Int(v)) => (-0x4000..=0x3FFF).contains(v),
            (Self::LargeSmart, PropertyValue::Int(v)) => *v >= 0,
            (Self::Text | Self::Action, PropertyValue::Text(text)) => {
                text.as_deref().map_or(true, is_latin1_line)
            }
            (Self::Composite(parts), PropertyValue::Tuple(values)) => {
                parts.len() == values.len()
                    && parts.iter().zip(values).all(|(part, value)| part.accepts(value))
            }
            (Self::List(element), PropertyValue::List(values)) => {
                values.len() <= 0xFF && values.iter().all(|value| element.accepts(value))
            }
            (Self::Morphisms, PropertyValue::Morphisms(morphisms)) => {
                morphisms.children.len() <= 0xFF + MORPHISM_COUNT_BIAS
                    && is_nullable(morphisms.varbit)
                    && is_nullable(morphisms.varp)
                    && morphisms.children.iter().all(|&child| is_nullable(child))
            }
            _ => false,
        }
    }
}

impl fmt::Display for PropertyCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag { set } => write!(f, "flag({set})"),
            Self::Composite(parts) => {
                f.write_str("(")?;
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{part}")?;
                }
                f.write_str(")")
            }
            Self::List(element) => write!(f, "list<{element}>"),
            other => f.write_str(other.label()),
        }
    }
}

fn read_nullable(reader: &mut ByteReader<'_>) -> BufferResult<i32> {
    match reader.read_u16()? {
        NULL_USHORT => Ok(-1),
        value => Ok(i32::from(value)),
    }
}

fn write_nullable(writer: &mut ByteWriter, value: i32) -> BufferResult<()> {
    if value == -1 {
        writer.write_u16(NULL_USHORT);
    } else if is_nullable(value) {
        writer.write_u16(value as u16);
    } else {
        return Err(BufferError::ValueOutOfRange {
            value: i64::from(value),
            encoding: "nullable ushort",
        });
    }
    Ok(())
}

fn is_nullable(value: i32) -> bool {
    (-1..i32::from(NULL_USHORT)).contains(&value)
}

fn narrow<T: TryFrom<i32>>(value: i32, encoding: &'static str) -> BufferResult<T> {
    T::try_from(value).map_err(|_| BufferError::ValueOutOfRange {
        value: i64::from(value),
        encoding,
    })
}

fn text_len(text: &str) -> usize {
    text.chars().count() + 1
}

fn is_latin1_line(text: &str) -> bool {
    text.chars()
        .all(|c| u32::from(c) <= 0xFF && c != char::from(buffer::STRING_TERMINATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(codec: PropertyCodec, value: &PropertyValue) -> Vec<u8> {
        assert!(codec.accepts(value), "{codec} rejects {value:?}");
        let mut writer = ByteWriter::new();
        codec.encode(value, &mut writer).unwrap();
        let bytes = writer.finish();
        assert_eq!(bytes.len(), codec.encoded_len(value));

        let mut reader = ByteReader::new(&bytes);
        assert_eq!(&codec.decode(&mut reader).unwrap(), value);
        assert!(reader.is_empty());
        bytes
    }

    #[test]
    fn tribyte_layout() {
        let bytes = roundtrip(PropertyCodec::Tribyte, &PropertyValue::Int(65536));
        assert_eq!(bytes, vec![0x01, 0x00, 0x00]);
    }

    #[test]
    fn smart_both_widths() {
        let mut reader = ByteReader::new(&[0x05]);
        assert_eq!(
            PropertyCodec::Smart.decode(&mut reader).unwrap(),
            PropertyValue::Int(5)
        );
        let mut reader = ByteReader::new(&[0x80, 0x05]);
        assert_eq!(
            PropertyCodec::Smart.decode(&mut reader).unwrap(),
            PropertyValue::Int(5)
        );
        assert_eq!(roundtrip(PropertyCodec::Smart, &PropertyValue::Int(200)).len(), 2);
    }

    #[test]
    fn nullable_ushort_maps_sentinel() {
        let bytes = roundtrip(PropertyCodec::NullableUShort, &PropertyValue::Int(-1));
        assert_eq!(bytes, vec![0xFF, 0xFF]);
        assert!(!PropertyCodec::NullableUShort.accepts(&PropertyValue::Int(65535)));
    }

    #[test]
    fn hidden_action_is_absent() {
        let mut reader = ByteReader::new(b"Hidden\n");
        let decoded = PropertyCodec::Action.decode(&mut reader).unwrap();
        assert_eq!(decoded, PropertyValue::Text(None));
        let mut writer = ByteWriter::new();
        PropertyCodec::Action.encode(&decoded, &mut writer).unwrap();
        assert_eq!(writer.finish(), b"hidden\n");

        let bytes = roundtrip(PropertyCodec::Action, &PropertyValue::Text(None));
        assert_eq!(bytes, b"hidden\n");
        roundtrip(PropertyCodec::Action, &PropertyValue::from("Open"));
    }

    #[test]
    fn flag_has_no_payload() {
        let codec = PropertyCodec::Flag { set: false };
        let mut reader = ByteReader::new(&[]);
        assert_eq!(codec.decode(&mut reader).unwrap(), PropertyValue::Bool(false));
        assert_eq!(codec.encoded_len(&PropertyValue::Bool(false)), 0);
    }

    #[test]
    fn colour_map_layout() {
        let value = PropertyValue::List(vec![PropertyValue::int_tuple([10, 20])]);
        let bytes = roundtrip(COLOUR_MAP, &value);
        assert_eq!(bytes, vec![1, 0, 10, 0, 20]);
    }

    #[test]
    fn typed_models_layout() {
        let value = PropertyValue::List(vec![
            PropertyValue::int_tuple([500, 10]),
            PropertyValue::int_tuple([501, 22]),
        ]);
        let bytes = roundtrip(MODEL_IDS_WITH_TYPES, &value);
        assert_eq!(bytes, vec![2, 0x01, 0xF4, 10, 0x01, 0xF5, 22]);
    }

    #[test]
    fn morphisms_store_biased_count() {
        let value = PropertyValue::Morphisms(Morphisms::new(-1, 300, vec![7, -1, 9]));
        let bytes = roundtrip(PropertyCodec::Morphisms, &value);
        assert_eq!(
            bytes,
            vec![0xFF, 0xFF, 0x01, 0x2C, 2, 0, 7, 0xFF, 0xFF, 0, 9]
        );
    }

    #[test]
    fn empty_morphisms_cannot_be_written() {
        let mut writer = ByteWriter::new();
        let err = PropertyCodec::Morphisms
            .encode(&PropertyValue::Morphisms(Morphisms::empty()), &mut writer)
            .unwrap_err();
        assert!(matches!(err, SchemaError::Buffer(BufferError::ValueOutOfRange { .. })));
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let mut writer = ByteWriter::new();
        let err = PropertyCodec::UShort
            .encode(&PropertyValue::from("x"), &mut writer)
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::ValueMismatch {
                codec: "ushort",
                found: "text"
            }
        );
        assert!(!COLOUR_MAP.accepts(&PropertyValue::List(vec![PropertyValue::Int(1)])));
    }

    #[test]
    fn ranges_are_checked() {
        assert!(!PropertyCodec::UByte.accepts(&PropertyValue::Int(256)));
        assert!(PropertyCodec::Byte.accepts(&PropertyValue::Int(-128)));
        assert!(!PropertyCodec::Text.accepts(&PropertyValue::from("a\nb")));

        let mut writer = ByteWriter::new();
        assert!(PropertyCodec::UByte
            .encode(&PropertyValue::Int(-1), &mut writer)
            .is_err());
    }

    #[test]
    fn display_names_nested_codecs() {
        assert_eq!(SEQUENCE_FRAMES.to_string(), "list<(ushort, nullable ushort, ushort)>");
        assert_eq!(PropertyCodec::Flag { set: true }.to_string(), "flag(true)");
    }
}
