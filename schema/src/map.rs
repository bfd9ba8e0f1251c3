//! Per-record property tables.

use std::collections::btree_map::{self, BTreeMap};

use crate::error::{SchemaError, SchemaResult};
use crate::property::SerializableProperty;
use crate::types::PropertyType;
use crate::value::PropertyValue;

/// The properties of one record, keyed and iterated by opcode.
///
/// A map instantiated from a [`DomainSchema`](crate::DomainSchema) holds
/// every property of its domain. Cloning copies every value, so records
/// never share state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct ConfigPropertyMap {
    properties: BTreeMap<u8, SerializableProperty>,
}

impl ConfigPropertyMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, property: SerializableProperty) {
        self.properties.insert(property.opcode(), property);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates properties in opcode order.
    pub fn iter(&self) -> btree_map::Values<'_, u8, SerializableProperty> {
        self.properties.values()
    }

    /// Iterates properties that hold a value of their own.
    pub fn custom(&self) -> impl Iterator<Item = &SerializableProperty> {
        self.iter().filter(|property| property.is_custom())
    }

    #[must_use]
    pub fn contains_opcode(&self, opcode: u8) -> bool {
        self.properties.contains_key(&opcode)
    }

    #[must_use]
    pub fn get(&self, opcode: u8) -> Option<&SerializableProperty> {
        self.properties.get(&opcode)
    }

    pub fn get_mut(&mut self, opcode: u8) -> Option<&mut SerializableProperty> {
        self.properties.get_mut(&opcode)
    }

    #[must_use]
    pub fn find(&self, ty: PropertyType) -> Option<&SerializableProperty> {
        self.iter().find(|property| property.ty() == ty)
    }

    pub fn find_mut(&mut self, ty: PropertyType) -> Option<&mut SerializableProperty> {
        self.properties
            .values_mut()
            .find(|property| property.ty() == ty)
    }

    /// Looks up a property, failing with [`SchemaError::UnknownProperty`].
    pub fn property(&self, ty: PropertyType) -> SchemaResult<&SerializableProperty> {
        self.find(ty).ok_or(SchemaError::UnknownProperty {
            property: ty.name(),
        })
    }

    /// Mutable variant of [`ConfigPropertyMap::property`].
    pub fn property_mut(&mut self, ty: PropertyType) -> SchemaResult<&mut SerializableProperty> {
        self.find_mut(ty).ok_or(SchemaError::UnknownProperty {
            property: ty.name(),
        })
    }

    /// The current value of `ty`, if declared.
    #[must_use]
    pub fn value(&self, ty: PropertyType) -> Option<&PropertyValue> {
        self.find(ty).map(SerializableProperty::value)
    }

    #[must_use]
    pub fn int(&self, ty: PropertyType) -> Option<i32> {
        self.value(ty)?.as_int()
    }

    #[must_use]
    pub fn bool(&self, ty: PropertyType) -> Option<bool> {
        self.value(ty)?.as_bool()
    }

    #[must_use]
    pub fn text(&self, ty: PropertyType) -> Option<&str> {
        self.value(ty)?.as_text()
    }

    /// Returns true if `ty` holds a value of its own.
    #[must_use]
    pub fn is_custom(&self, ty: PropertyType) -> bool {
        self.find(ty).is_some_and(SerializableProperty::is_custom)
    }

    pub fn set(&mut self, ty: PropertyType, value: impl Into<PropertyValue>) -> SchemaResult<()> {
        self.property_mut(ty)?.set(value)
    }

    pub fn reset(&mut self, ty: PropertyType) -> SchemaResult<()> {
        self.property_mut(ty)?.reset();
        Ok(())
    }

    /// Resets every property to its default.
    pub fn reset_all(&mut self) {
        for property in self.properties.values_mut() {
            property.reset();
        }
    }
}

impl<'a> IntoIterator for &'a ConfigPropertyMap {
    type Item = &'a SerializableProperty;
    type IntoIter = btree_map::Values<'a, u8, SerializableProperty>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
