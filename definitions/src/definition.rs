//! Typed definition wrappers over property maps.

use schema::{ConfigPropertyMap, PropertyType, PropertyValue, SchemaResult};

/// A record of one domain: its id and its properties.
///
/// Domain wrappers add named accessors on top of the provided lookups.
pub trait ConfigDefinition {
    fn id(&self) -> i32;

    fn properties(&self) -> &ConfigPropertyMap;

    fn properties_mut(&mut self) -> &mut ConfigPropertyMap;

    /// Sets a property by type.
    fn set(&mut self, ty: PropertyType, value: impl Into<PropertyValue>) -> SchemaResult<()>
    where
        Self: Sized,
    {
        self.properties_mut().set(ty, value)
    }

    /// Returns true if `ty` holds a value of its own.
    fn is_custom(&self, ty: PropertyType) -> bool {
        self.properties().is_custom(ty)
    }

    fn int_value(&self, ty: PropertyType) -> i32 {
        self.properties().int(ty).unwrap_or_default()
    }

    fn bool_value(&self, ty: PropertyType) -> bool {
        self.properties().bool(ty).unwrap_or_default()
    }

    fn text_value(&self, ty: PropertyType) -> Option<&str> {
        self.properties().text(ty)
    }

    /// The integers of a list or tuple property, empty if it holds neither.
    fn ints(&self, ty: PropertyType) -> Vec<i32> {
        self.properties()
            .value(ty)
            .and_then(PropertyValue::to_ints)
            .unwrap_or_default()
    }

    /// The first two integers of each element of a list property.
    fn int_pairs(&self, ty: PropertyType) -> Vec<(i32, i32)> {
        self.properties()
            .value(ty)
            .and_then(PropertyValue::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|element| match element.to_ints()?.as_slice() {
                [a, b, ..] => Some((*a, *b)),
                _ => None,
            })
            .collect()
    }
}

/// Declares a domain wrapper struct and its [`ConfigDefinition`] impl.
macro_rules! config_definition {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            id: i32,
            properties: ::schema::ConfigPropertyMap,
        }

        impl $name {
            #[must_use]
            pub const fn new(id: i32, properties: ::schema::ConfigPropertyMap) -> Self {
                Self { id, properties }
            }

            #[must_use]
            pub fn into_properties(self) -> ::schema::ConfigPropertyMap {
                self.properties
            }
        }

        impl $crate::definition::ConfigDefinition for $name {
            fn id(&self) -> i32 {
                self.id
            }

            fn properties(&self) -> &::schema::ConfigPropertyMap {
                &self.properties
            }

            fn properties_mut(&mut self) -> &mut ::schema::ConfigPropertyMap {
                &mut self.properties
            }
        }
    };
}

pub(crate) use config_definition;
