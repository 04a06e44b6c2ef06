//! Closed-form estimate of the material a fused-deposition print consumes.
//!
//! The part is modelled as a shell of uniform thickness draped over the mesh
//! surface, with the remaining interior filled to the requested infill
//! percentage. It stands in for a real slicer and only has to agree with
//! previously issued quotes, so the constants and clamps below are fixed.

use crate::PrintSettings;

pub const MM3_PER_CM3: f64 = 1000.0;

/// Breakdown of the estimated printed volume, all in cubic centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintedVolume {
    pub shell: f64,
    pub infill: f64,
    /// What is actually charged for. Never more than the mesh volume.
    pub total: f64,
}

/// Estimates printed volume from the mesh volume (cm³) and surface area (mm²).
pub fn printed_volume(
    base_volume_cm3: f64,
    surface_area_mm2: f64,
    settings: &PrintSettings,
) -> PrintedVolume {
    let shell = surface_area_mm2 * settings.wall_thickness_mm() / MM3_PER_CM3;
    let inner = (base_volume_cm3 - shell).max(0.0);
    let infill = inner * (f64::from(settings.infill_percent()) / 100.0);

    let total = if settings.infill_percent() >= 100 {
        base_volume_cm3
    } else {
        base_volume_cm3.min(shell + infill)
    };

    PrintedVolume {
        shell,
        infill,
        total,
    }
}
