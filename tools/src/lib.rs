//! Inspection, extraction and decoding tools for jagcfg archives.
//!
//! This crate backs the `jagcfg` binary:
//!
//! - Report an archive's header, compression flavour and entry table
//! - Decode a domain's records into JSON-ready views
//! - Print a domain's opcode table and schema fingerprint
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see what an archive holds.

use std::collections::HashMap;
use std::fmt::Write as _;

use archive::{name_hash, read_layout, ArchiveLayout, ArchiveResult, DecodeOptions};
use definitions::{CodecResult, Domain};
use schema::{schema_fingerprint, ConfigPropertyMap, PropertyValue};
use serde::Serialize;

/// How an archive's body is compressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flavour {
    /// Nothing is compressed.
    None,
    /// Entries are decompressed one by one.
    PerEntry,
    /// The payload is one compressed block.
    Whole,
}

impl Flavour {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::PerEntry => "per-entry",
            Self::Whole => "whole",
        }
    }
}

/// One entry table row with its resolved name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryReport {
    pub id: i32,
    pub name: Option<String>,
    pub extracted_len: usize,
    pub stored_len: usize,
    /// Whether the entry body is inflated on decode.
    pub compressed: bool,
}

/// Header and entry table of one archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    pub total_len: usize,
    pub extracted_len: usize,
    pub stored_len: usize,
    pub flavour: Flavour,
    pub entries: Vec<EntryReport>,
}

/// Reads an archive's header and entry table without inflating entries.
pub fn inspect_archive(bytes: &[u8], options: &DecodeOptions) -> ArchiveResult<InspectReport> {
    let (layout, _) = read_layout(bytes)?;
    let names = known_entry_names();
    let entries: Vec<EntryReport> = layout
        .entries
        .iter()
        .map(|entry| EntryReport {
            id: entry.id,
            name: names.get(&entry.id).cloned(),
            extracted_len: entry.extracted_len,
            stored_len: entry.stored_len,
            compressed: !layout.whole_compressed
                && options
                    .entry_policy
                    .should_decompress(entry.extracted_len, entry.stored_len),
        })
        .collect();

    Ok(InspectReport {
        total_len: bytes.len(),
        extracted_len: layout.extracted_len,
        stored_len: layout.stored_len,
        flavour: flavour(&layout, &entries),
        entries,
    })
}

fn flavour(layout: &ArchiveLayout, entries: &[EntryReport]) -> Flavour {
    if layout.whole_compressed {
        Flavour::Whole
    } else if entries.iter().any(|entry| entry.compressed) {
        Flavour::PerEntry
    } else {
        Flavour::None
    }
}

/// Entry names of every domain's record tables, keyed by name hash.
#[must_use]
pub fn known_entry_names() -> HashMap<i32, String> {
    Domain::ALL
        .into_iter()
        .flat_map(|domain| [format!("{domain}.dat"), format!("{domain}.idx")])
        .map(|name| (name_hash(&name), name))
        .collect()
}

/// File name an extracted entry is written to.
#[must_use]
pub fn entry_file_name(id: i32) -> String {
    format!("{id}.bin")
}

/// One property of a decoded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedProperty {
    pub opcode: u8,
    pub name: &'static str,
    pub value: PropertyValue,
    pub custom: bool,
}

/// One decoded record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedRecord {
    pub id: i32,
    pub properties: Vec<DecodedProperty>,
}

impl DecodedRecord {
    /// Views a property map, keeping default-valued properties only when
    /// `include_defaults` is set.
    #[must_use]
    pub fn new(id: i32, properties: &ConfigPropertyMap, include_defaults: bool) -> Self {
        let properties = properties
            .iter()
            .filter(|property| include_defaults || property.is_custom())
            .map(|property| DecodedProperty {
                opcode: property.opcode(),
                name: property.name(),
                value: property.value().clone(),
                custom: property.is_custom(),
            })
            .collect();
        Self { id, properties }
    }
}

/// Decodes a domain's records, or only record `id` when given.
pub fn decode_domain(
    archive: &archive::Archive,
    domain: Domain,
    id: Option<i32>,
    include_defaults: bool,
) -> CodecResult<Vec<DecodedRecord>> {
    let records = domain.read(archive)?;
    Ok(records
        .iter()
        .enumerate()
        .map(|(index, properties)| (index as i32, properties))
        .filter(|(record_id, _)| id.map_or(true, |wanted| wanted == *record_id))
        .map(|(record_id, properties)| DecodedRecord::new(record_id, properties, include_defaults))
        .collect())
}

/// Renders decoded records one property per line.
#[must_use]
pub fn format_decode_pretty(records: &[DecodedRecord]) -> String {
    let mut out = String::new();
    for record in records {
        let _ = writeln!(out, "[{}]", record.id);
        for property in &record.properties {
            let value = serde_json::to_string(&property.value).unwrap_or_default();
            let marker = if property.custom { "" } else { " (default)" };
            let _ = writeln!(
                out,
                "  {:>3} {} = {value}{marker}",
                property.opcode, property.name
            );
        }
    }
    out
}

/// One opcode of a domain schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaRow {
    pub opcode: u8,
    pub name: &'static str,
    pub codec: String,
    pub default: PropertyValue,
}

/// A domain's opcode table and fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub domain: &'static str,
    pub fingerprint: u64,
    pub rows: Vec<SchemaRow>,
}

#[must_use]
pub fn schema_report(domain: Domain) -> SchemaReport {
    let schema = domain.schema();
    SchemaReport {
        domain: domain.name(),
        fingerprint: schema_fingerprint(schema),
        rows: schema
            .template()
            .iter()
            .map(|property| SchemaRow {
                opcode: property.opcode(),
                name: property.name(),
                codec: property.codec().to_string(),
                default: property.default_value().clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archive::{encode_archive, Archive, ArchiveEntry, CompressionMode};
    use definitions::domain::loc;
    use definitions::{store_definitions, ConfigDefinition};

    fn sample() -> Archive {
        let mut door = loc::SUPPLIER.create_default(0);
        door.set(loc::DISPLAY_NAME, "Door").unwrap();
        store_definitions(&Archive::empty(), &loc::SUPPLIER, &[door]).unwrap()
    }

    #[test]
    fn inspect_resolves_domain_entry_names() {
        let bytes = encode_archive(&sample(), CompressionMode::Whole).unwrap();
        let report = inspect_archive(&bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(report.flavour, Flavour::Whole);
        assert_eq!(report.total_len, bytes.len());
        let mut names: Vec<_> = report.entries.iter().filter_map(|e| e.name.clone()).collect();
        names.sort();
        assert_eq!(names, vec!["loc.dat".to_string(), "loc.idx".to_string()]);
        assert!(report.entries.iter().all(|entry| !entry.compressed));
    }

    #[test]
    fn inspect_flavour_follows_policy() {
        let archive = Archive::new([ArchiveEntry::new(1, vec![1, 2, 3])]).unwrap();
        let bytes = encode_archive(&archive, CompressionMode::None).unwrap();

        let literal = inspect_archive(&bytes, &DecodeOptions::literal()).unwrap();
        assert_eq!(literal.flavour, Flavour::PerEntry);

        let size_aware = inspect_archive(&bytes, &DecodeOptions::size_aware()).unwrap();
        assert_eq!(size_aware.flavour, Flavour::None);
        assert_eq!(size_aware.entries[0].name, None);
    }

    #[test]
    fn decode_keeps_custom_properties() {
        let records = decode_domain(&sample(), Domain::Location, None, false).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].properties,
            vec![DecodedProperty {
                opcode: 2,
                name: "name",
                value: PropertyValue::Text(Some("Door".to_string())),
                custom: true,
            }]
        );

        let all = decode_domain(&sample(), Domain::Location, Some(0), true).unwrap();
        assert_eq!(all[0].properties.len(), loc::schema().len());
        assert!(decode_domain(&sample(), Domain::Location, Some(4), false)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn decode_json_shape() {
        let records = decode_domain(&sample(), Domain::Location, None, false).unwrap();
        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(json[0]["id"], 0);
        assert_eq!(json[0]["properties"][0]["name"], "name");
        assert_eq!(json[0]["properties"][0]["value"], "Door");
    }

    #[test]
    fn pretty_output() {
        let records = decode_domain(&sample(), Domain::Location, None, false).unwrap();
        assert_eq!(format_decode_pretty(&records), "[0]\n    2 name = \"Door\"\n");
    }

    #[test]
    fn schema_report_lists_opcodes_in_order() {
        let report = schema_report(Domain::Floor);
        assert_eq!(report.domain, "flo");
        assert_eq!(report.fingerprint, schema_fingerprint(Domain::Floor.schema()));
        let opcodes: Vec<u8> = report.rows.iter().map(|row| row.opcode).collect();
        let mut sorted = opcodes.clone();
        sorted.sort_unstable();
        assert_eq!(opcodes, sorted);
        assert_eq!(report.rows[0].codec, "tribyte");
    }

    #[test]
    fn extracted_file_names() {
        assert_eq!(entry_file_name(-12), "-12.bin");
    }
}
