//! Domain schemas: the immutable default template of a record kind.

use std::collections::HashSet;

use crate::codec::PropertyCodec;
use crate::error::{SchemaError, SchemaResult};
use crate::map::ConfigPropertyMap;
use crate::property::SerializableProperty;
use crate::types::PropertyType;
use crate::value::PropertyValue;

/// The declared properties of one domain, with their defaults.
///
/// Built once per domain; records get their own copy through
/// [`DomainSchema::instantiate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainSchema {
    name: &'static str,
    template: ConfigPropertyMap,
}

impl DomainSchema {
    /// Creates a schema builder.
    #[must_use]
    pub fn builder(name: &'static str) -> DomainSchemaBuilder {
        DomainSchemaBuilder {
            name,
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.template.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    /// The default template, in opcode order.
    #[must_use]
    pub const fn template(&self) -> &ConfigPropertyMap {
        &self.template
    }

    /// Returns a fresh copy of the template with every property at its default.
    #[must_use]
    pub fn instantiate(&self) -> ConfigPropertyMap {
        self.template.clone()
    }

    #[must_use]
    pub fn opcode_of(&self, ty: PropertyType) -> Option<u8> {
        self.template.find(ty).map(SerializableProperty::opcode)
    }

    #[must_use]
    pub fn type_of(&self, opcode: u8) -> Option<PropertyType> {
        self.template.get(opcode).map(SerializableProperty::ty)
    }
}

/// Builder for [`DomainSchema`].
#[derive(Debug)]
pub struct DomainSchemaBuilder {
    name: &'static str,
    properties: Vec<PendingProperty>,
}

#[derive(Debug)]
struct PendingProperty {
    ty: PropertyType,
    opcode: u8,
    codec: PropertyCodec,
    default: PropertyValue,
}

impl DomainSchemaBuilder {
    /// Declares a property.
    #[must_use]
    pub fn property(
        mut self,
        opcode: u8,
        ty: PropertyType,
        codec: PropertyCodec,
        default: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.push(PendingProperty {
            ty,
            opcode,
            codec,
            default: default.into(),
        });
        self
    }

    /// Declares a payload-free flag whose opcode sets it to `set`. The default
    /// is the opposite value.
    #[must_use]
    pub fn flag(self, opcode: u8, ty: PropertyType, set: bool) -> Self {
        self.property(opcode, ty, PropertyCodec::Flag { set }, !set)
    }

    /// Declares `count` numbered slots on consecutive opcodes starting at
    /// `first`, typed `"{prefix}-{index}"` with indices from 0.
    #[must_use]
    pub fn family(
        mut self,
        first: u8,
        count: u8,
        prefix: &'static str,
        codec: PropertyCodec,
        default: impl Into<PropertyValue>,
    ) -> Self {
        let default = default.into();
        for index in 0..count {
            self.properties.push(PendingProperty {
                ty: PropertyType::dynamic(prefix, u16::from(index)),
                opcode: first.wrapping_add(index),
                codec,
                default: default.clone(),
            });
        }
        self
    }

    /// Builds the schema after validation.
    pub fn build(self) -> SchemaResult<DomainSchema> {
        let mut template = ConfigPropertyMap::new();
        let mut types = HashSet::with_capacity(self.properties.len());

        for pending in self.properties {
            let property =
                SerializableProperty::new(pending.ty, pending.opcode, pending.codec, pending.default)?;
            if template.contains_opcode(pending.opcode) {
                return Err(SchemaError::DuplicateOpcode {
                    opcode: pending.opcode,
                });
            }
            if !types.insert(pending.ty) {
                return Err(SchemaError::DuplicateType {
                    property: pending.ty.name(),
                });
            }
            template.insert(property);
        }

        Ok(DomainSchema {
            name: self.name,
            template,
        })
    }
}
