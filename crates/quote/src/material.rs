use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::QuoteError;

/// A printable material as offered to customers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub name: String,
    /// Grams per cubic centimeter.
    pub density: f64,
    pub price_per_gram: f64,
}

impl Material {
    pub fn new(name: impl Into<String>, density: f64, price_per_gram: f64) -> Result<Self, QuoteError> {
        let material = Self {
            name: name.into(),
            density,
            price_per_gram,
        };
        material.validate()?;
        Ok(material)
    }

    pub fn validate(&self) -> Result<(), QuoteError> {
        if self.name.trim().is_empty() {
            return Err(QuoteError::InvalidMaterial("material name is required".into()));
        }
        if !(self.density.is_finite() && self.density > 0.0) {
            return Err(QuoteError::InvalidMaterial(format!(
                "{}: density must be a positive number, got {}",
                self.name, self.density
            )));
        }
        if !(self.price_per_gram.is_finite() && self.price_per_gram > 0.0) {
            return Err(QuoteError::InvalidMaterial(format!(
                "{}: price per gram must be a positive number, got {}",
                self.name, self.price_per_gram
            )));
        }
        Ok(())
    }
}

/// The materials a caller offers. Order is display order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    materials: Vec<Material>,
}

impl Catalog {
    pub fn new(materials: Vec<Material>) -> Result<Self, QuoteError> {
        for m in &materials {
            m.validate()?;
        }
        Ok(Self { materials })
    }

    /// Reads a JSON array of `{ "name", "density", "pricePerGram" }` objects.
    pub fn from_json_reader<R: Read>(r: R) -> Result<Self, QuoteError> {
        let materials: Vec<Material> = serde_json::from_reader(r)?;
        Self::new(materials)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn find(&self, name: &str) -> Result<&Material, QuoteError> {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| QuoteError::UnknownMaterial(name.to_string()))
    }

    pub fn first(&self) -> Option<&Material> {
        self.materials.first()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let m = |name: &str, price_per_gram, density| Material {
            name: name.to_string(),
            density,
            price_per_gram,
        };
        Self {
            materials: vec![
                m("PLA+", 15.0, 1.24),
                m("ABS", 12.0, 1.04),
                m("PETG", 14.0, 1.27),
                m("TPU", 18.0, 1.21),
                m("Nylon", 20.0, 1.15),
            ],
        }
    }
}
