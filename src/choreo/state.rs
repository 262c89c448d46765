use crate::animation::value::{Property, PropertyBag, PropertyValue};
use crate::foundation::core::{ElementId, Rgba8, Vec2};

/// Current property state of one managed element.
///
/// State exists only while its choreographer is mounted; unmounting destroys it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ElementState {
    pub id: ElementId,
    pub properties: PropertyBag,
}

impl ElementState {
    pub(crate) fn mounted(id: ElementId, properties: PropertyBag) -> Self {
        let properties = properties
            .into_iter()
            .map(|(p, v)| (p, p.clamp_value(v)))
            .collect();
        Self { id, properties }
    }

    pub fn get(&self, property: Property) -> PropertyValue {
        self.properties
            .get(&property)
            .copied()
            .unwrap_or_else(|| property.default_value())
    }

    /// Scalar value of `property`; colours read as `0.0`.
    pub fn scalar(&self, property: Property) -> f64 {
        self.get(property).as_scalar().unwrap_or(0.0)
    }

    pub fn color(&self, property: Property) -> Option<Rgba8> {
        self.get(property).as_color()
    }

    /// `(x, y)` translation.
    pub fn translation(&self) -> Vec2 {
        Vec2::new(self.scalar(Property::X), self.scalar(Property::Y))
    }

    /// Write a value clamped to the property's domain, returning whether it changed.
    pub(crate) fn write(&mut self, property: Property, value: PropertyValue) -> bool {
        let value = property.clamp_value(value);
        self.properties.insert(property, value) != Some(value)
    }
}
