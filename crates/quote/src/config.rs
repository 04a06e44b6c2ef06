use crate::QuoteError;

/// Extrusion width assumed for every wall.
pub const NOZZLE_WIDTH_MM: f64 = 0.4;
pub const DEFAULT_WALL_COUNT: u32 = 2;
pub const DEFAULT_INFILL_PERCENT: u8 = 20;

/// Slicer-style settings chosen by the customer.
///
/// Only constructed through [`PrintSettings::new`], so the infill is always a
/// percentage and there is always at least one wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintSettings {
    infill_percent: u8,
    wall_count: u32,
}

impl PrintSettings {
    /// Validates raw form values.
    ///
    /// `infill_percent` outside 0..=100 is rejected. A missing or non-positive
    /// `wall_count` falls back to [`DEFAULT_WALL_COUNT`].
    pub fn new(infill_percent: i64, wall_count: Option<i64>) -> Result<Self, QuoteError> {
        let infill_percent = u8::try_from(infill_percent)
            .ok()
            .filter(|p| *p <= 100)
            .ok_or_else(|| {
                QuoteError::InvalidSettings(format!(
                    "infill density must be between 0 and 100, got {infill_percent}"
                ))
            })?;
        let wall_count = wall_count
            .filter(|w| *w > 0)
            .map(|w| u32::try_from(w).unwrap_or(u32::MAX))
            .unwrap_or(DEFAULT_WALL_COUNT);
        Ok(Self {
            infill_percent,
            wall_count,
        })
    }

    pub fn infill_percent(&self) -> u8 {
        self.infill_percent
    }

    pub fn wall_count(&self) -> u32 {
        self.wall_count
    }

    pub fn wall_thickness_mm(&self) -> f64 {
        f64::from(self.wall_count.max(1)) * NOZZLE_WIDTH_MM
    }
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            infill_percent: DEFAULT_INFILL_PERCENT,
            wall_count: DEFAULT_WALL_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;

    #[test]
    fn infill_bounds() {
        assert!(PrintSettings::new(0, None).is_ok());
        assert!(PrintSettings::new(100, None).is_ok());
        assert!(matches!(
            PrintSettings::new(101, None),
            Err(QuoteError::InvalidSettings(_))
        ));
        assert!(PrintSettings::new(-1, None).is_err());
    }

    #[test]
    fn wall_count_falls_back_to_default() {
        assert_eq!(2, PrintSettings::new(20, None).unwrap().wall_count());
        assert_eq!(2, PrintSettings::new(20, Some(0)).unwrap().wall_count());
        assert_eq!(2, PrintSettings::new(20, Some(-3)).unwrap().wall_count());
        assert_eq!(5, PrintSettings::new(20, Some(5)).unwrap().wall_count());
    }

    #[test]
    fn wall_thickness() {
        let settings = PrintSettings::new(20, Some(3)).unwrap();
        assert_float_eq!(settings.wall_thickness_mm(), 1.2, abs <= 1e-12);
        assert_float_eq!(
            PrintSettings::default().wall_thickness_mm(),
            0.8,
            abs <= 1e-12
        );
    }
}
