//! The nine configuration domains.
//!
//! Each module declares the domain's opcode table as a [`DomainSchema`], a
//! typed wrapper with named accessors, and a `SUPPLIER` for bulk use.
//! [`Domain`] addresses the domains at runtime when the wrapper type is not
//! needed.

use std::fmt;

use archive::Archive;
use schema::{ConfigPropertyMap, DomainSchema};

use crate::error::CodecResult;
use crate::record::decode_record;
use crate::table::{read_tables, RecordLayout};

pub mod flo;
pub mod idk;
pub mod loc;
pub mod npc;
pub mod obj;
pub mod seq;
pub mod spotanim;
pub mod varbit;
pub mod varp;

pub use flo::FloorDefinition;
pub use idk::IdentikitDefinition;
pub use loc::LocationDefinition;
pub use npc::NpcDefinition;
pub use obj::ObjectDefinition;
pub use seq::{SequenceDefinition, SequenceFrame};
pub use spotanim::GraphicDefinition;
pub use varbit::VarbitDefinition;
pub use varp::VarpDefinition;

/// A configuration domain, addressed by its archive name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Object,
    Npc,
    Location,
    Floor,
    Identikit,
    Varbit,
    Varp,
    Sequence,
    Graphic,
}

impl Domain {
    pub const ALL: [Self; 9] = [
        Self::Object,
        Self::Npc,
        Self::Location,
        Self::Floor,
        Self::Identikit,
        Self::Varbit,
        Self::Varp,
        Self::Sequence,
        Self::Graphic,
    ];

    /// The archive name of the domain, e.g. `obj`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Object => obj::NAME,
            Self::Npc => npc::NAME,
            Self::Location => loc::NAME,
            Self::Floor => flo::NAME,
            Self::Identikit => idk::NAME,
            Self::Varbit => varbit::NAME,
            Self::Varp => varp::NAME,
            Self::Sequence => seq::NAME,
            Self::Graphic => spotanim::NAME,
        }
    }

    /// Looks a domain up by archive name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|domain| domain.name().eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn schema(self) -> &'static DomainSchema {
        match self {
            Self::Object => obj::schema(),
            Self::Npc => npc::schema(),
            Self::Location => loc::schema(),
            Self::Floor => flo::schema(),
            Self::Identikit => idk::schema(),
            Self::Varbit => varbit::schema(),
            Self::Varp => varp::schema(),
            Self::Sequence => seq::schema(),
            Self::Graphic => spotanim::schema(),
        }
    }

    /// The record layout the domain's supplier uses by default.
    #[must_use]
    pub fn layout(self) -> RecordLayout {
        match self {
            Self::Object => obj::SUPPLIER.layout(),
            Self::Npc => npc::SUPPLIER.layout(),
            Self::Location => loc::SUPPLIER.layout(),
            Self::Floor => flo::SUPPLIER.layout(),
            Self::Identikit => idk::SUPPLIER.layout(),
            Self::Varbit => varbit::SUPPLIER.layout(),
            Self::Varp => varp::SUPPLIER.layout(),
            Self::Sequence => seq::SUPPLIER.layout(),
            Self::Graphic => spotanim::SUPPLIER.layout(),
        }
    }

    /// Decodes every record of the domain without its typed wrapper.
    pub fn read(self, archive: &Archive) -> CodecResult<Vec<ConfigPropertyMap>> {
        read_tables(archive, self.schema(), self.layout())
    }

    /// Decodes one record of the domain.
    pub fn decode(self, id: i32, bytes: &[u8]) -> CodecResult<ConfigPropertyMap> {
        decode_record(self.schema(), id, bytes)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
