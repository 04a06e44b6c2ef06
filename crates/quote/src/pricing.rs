use serde::Serialize;

use crate::{Material, PrintedVolume};

pub fn weight_grams(volume_cm3: f64, material: &Material) -> f64 {
    volume_cm3 * material.density
}

pub fn price(weight_grams: f64, material: &Material) -> f64 {
    weight_grams * material.price_per_gram
}

/// The price offered for a batch of files printed as one job.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub material: String,
    /// Printed volume in cm³.
    pub volume: f64,
    /// Grams.
    pub weight: f64,
    pub price_per_gram: f64,
    pub total_price: f64,
    /// Display only; the batch is priced as a whole.
    pub file_names: Vec<String>,
    /// The meshes enclose no volume at all. Usually an open or single
    /// surface mesh, worth pointing out to the customer.
    pub zero_volume: bool,
}

impl Quotation {
    pub fn new(
        material: &Material,
        base_volume_cm3: f64,
        printed: &PrintedVolume,
        file_names: Vec<String>,
    ) -> Self {
        let weight = weight_grams(printed.total, material);
        Self {
            material: material.name.clone(),
            volume: printed.total,
            weight,
            price_per_gram: material.price_per_gram,
            total_price: price(weight, material),
            file_names,
            zero_volume: base_volume_cm3 == 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    fn pla() -> Material {
        Material::new("PLA+", 1.24, 15.0).unwrap()
    }

    #[test]
    fn weight_and_price() {
        let weight = weight_grams(10.0, &pla());
        assert_float_eq!(weight, 12.4, abs <= 1e-9);
        assert_float_eq!(price(weight, &pla()), 186.0, abs <= 1e-9);
    }

    #[test]
    fn quotation_fields() {
        let printed = PrintedVolume {
            shell: 4.0,
            infill: 6.0,
            total: 10.0,
        };
        let q = Quotation::new(&pla(), 12.0, &printed, vec!["a.stl".into()]);
        assert_eq!("PLA+", q.material);
        assert_eq!(10.0, q.volume);
        assert_float_eq!(q.weight, 12.4, abs <= 1e-9);
        assert_eq!(15.0, q.price_per_gram);
        assert_float_eq!(q.total_price, 186.0, abs <= 1e-9);
        assert!(!q.zero_volume);
    }

    #[test]
    fn serializes_with_response_field_names() {
        let printed = PrintedVolume {
            shell: 0.0,
            infill: 0.0,
            total: 0.0,
        };
        let q = Quotation::new(&pla(), 0.0, &printed, vec!["empty.stl".into()]);
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(
            serde_json::json!({
                "material": "PLA+",
                "volume": 0.0,
                "weight": 0.0,
                "pricePerGram": 15.0,
                "totalPrice": 0.0,
                "fileNames": ["empty.stl"],
                "zeroVolume": true,
            }),
            json
        );
    }
}
