//! Bulk loading and storing of a domain's definitions.

use archive::Archive;
use schema::TERMINATOR_OPCODE;
use tracing::debug;

use crate::definition::ConfigDefinition;
use crate::error::{CodecError, CodecResult};
use crate::supplier::DefinitionSupplier;
use crate::table::{read_tables, write_tables, MAX_RECORDS};

/// Decodes every definition of a domain, in id order.
///
/// Any record failure fails the whole load.
pub fn load_definitions<T>(archive: &Archive, supplier: &DefinitionSupplier<T>) -> CodecResult<Vec<T>> {
    let records = read_tables(archive, supplier.schema(), supplier.layout())?;
    debug!(domain = supplier.name(), count = records.len(), "loaded definitions");
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(id, properties)| supplier.create(id as i32, properties))
        .collect())
}

/// Returns a copy of `archive` with the domain's entries replaced by
/// `definitions`.
///
/// Records are written in id order. Ids without a definition get an empty
/// record.
pub fn store_definitions<T: ConfigDefinition>(
    archive: &Archive,
    supplier: &DefinitionSupplier<T>,
    definitions: &[T],
) -> CodecResult<Archive> {
    let domain = supplier.name();
    let mut ordered: Vec<&T> = definitions.iter().collect();
    ordered.sort_by_key(|definition| definition.id());

    for pair in ordered.windows(2) {
        if pair[0].id() == pair[1].id() {
            return Err(CodecError::DuplicateDefinition {
                domain,
                id: pair[0].id(),
            });
        }
    }

    let len = match ordered.last() {
        Some(last) => record_slots(domain, ordered[0].id(), last.id())?,
        None => 0,
    };
    let mut records = vec![vec![TERMINATOR_OPCODE]; len];
    for definition in ordered {
        records[definition.id() as usize] = supplier.encode(definition)?;
    }

    let entries = write_tables(domain, supplier.layout(), &records)?;
    debug!(domain, count = records.len(), "stored definitions");
    Ok(entries
        .into_iter()
        .fold(archive.clone(), |archive, entry| archive.with_entry(entry)))
}

fn record_slots(domain: &'static str, first: i32, last: i32) -> CodecResult<usize> {
    if first < 0 {
        return Err(CodecError::malformed(
            domain,
            format!("definition id {first} is negative"),
        ));
    }
    let len = last as usize + 1;
    if len > MAX_RECORDS {
        return Err(CodecError::malformed(
            domain,
            format!("definition id {last} exceeds the limit of {MAX_RECORDS} records"),
        ));
    }
    Ok(len)
}
