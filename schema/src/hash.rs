//! Deterministic domain schema fingerprints.

use blake3::Hasher;

use crate::codec::PropertyCodec;
use crate::value::PropertyValue;
use crate::DomainSchema;

/// Computes a deterministic fingerprint of a schema's opcode table.
#[must_use]
pub fn schema_fingerprint(schema: &DomainSchema) -> u64 {
    let mut hasher = Hasher::new();
    write_str(&mut hasher, schema.name());
    write_u32(&mut hasher, schema.len() as u32);

    for property in schema.template() {
        write_u8(&mut hasher, property.opcode());
        write_str(&mut hasher, property.name());
        write_codec(&mut hasher, property.codec());
        write_value(&mut hasher, property.default_value());
    }

    let hash = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

fn write_codec(hasher: &mut Hasher, codec: PropertyCodec) {
    match codec {
        PropertyCodec::Flag { set } => {
            write_u8(hasher, 0);
            write_u8(hasher, u8::from(set));
        }
        PropertyCodec::Composite(parts) => {
            write_u8(hasher, 1);
            write_u32(hasher, parts.len() as u32);
            for &part in parts {
                write_codec(hasher, part);
            }
        }
        PropertyCodec::List(element) => {
            write_u8(hasher, 2);
            write_codec(hasher, *element);
        }
        other => {
            write_u8(hasher, 3);
            write_str(hasher, other.label());
        }
    }
}

fn write_value(hasher: &mut Hasher, value: &PropertyValue) {
    match value {
        PropertyValue::Bool(v) => {
            write_u8(hasher, 0);
            write_u8(hasher, u8::from(*v));
        }
        PropertyValue::Int(v) => {
            write_u8(hasher, 1);
            hasher.update(&v.to_le_bytes());
        }
        PropertyValue::Text(v) => {
            write_u8(hasher, 2);
            match v {
                Some(text) => {
                    write_u8(hasher, 1);
                    write_str(hasher, text);
                }
                None => write_u8(hasher, 0),
            }
        }
        PropertyValue::Tuple(values) | PropertyValue::List(values) => {
            write_u8(hasher, if matches!(value, PropertyValue::Tuple(_)) { 3 } else { 4 });
            write_u32(hasher, values.len() as u32);
            for value in values {
                write_value(hasher, value);
            }
        }
        PropertyValue::Morphisms(morphisms) => {
            write_u8(hasher, 5);
            hasher.update(&morphisms.varbit.to_le_bytes());
            hasher.update(&morphisms.varp.to_le_bytes());
            write_u32(hasher, morphisms.children.len() as u32);
            for child in &morphisms.children {
                hasher.update(&child.to_le_bytes());
            }
        }
    }
}

fn write_str(hasher: &mut Hasher, value: &str) {
    write_u32(hasher, value.len() as u32);
    hasher.update(value.as_bytes());
}

fn write_u8(hasher: &mut Hasher, value: u8) {
    hasher.update(&[value]);
}

fn write_u32(hasher: &mut Hasher, value: u32) {
    hasher.update(&value.to_le_bytes());
}
