use log::{debug, info, warn};
use printquote_mesh::GeometryTotals;

use crate::model::{printed_volume, MM3_PER_CM3};
use crate::upload::{check_batch, MeshUpload};
use crate::{Material, PrintSettings, QuoteError, Quotation};

/// Everything needed to price one order.
#[derive(Debug, Clone)]
pub struct QuoteRequest {
    pub uploads: Vec<MeshUpload>,
    pub material: Material,
    pub settings: PrintSettings,
    /// Number of files the client says it sent, if it says.
    pub expected_file_count: Option<usize>,
}

/// Prices a batch of STL files as a single print job.
///
/// Geometry from every file is summed before the manufacturing model runs, so
/// several parts share one shell and infill estimate. Any rejected or
/// malformed file fails the whole request.
pub fn quote(request: &QuoteRequest) -> Result<Quotation, QuoteError> {
    request.material.validate()?;
    check_batch(&request.uploads, request.expected_file_count)?;

    let mut totals = GeometryTotals::default();
    let mut file_names = Vec::with_capacity(request.uploads.len());
    for upload in &request.uploads {
        totals = totals + measure_upload(upload)?;
        file_names.push(upload.name.clone());
    }

    quote_totals(&request.material, &request.settings, &totals, file_names)
}

/// Decodes one upload and returns its geometry in mm³ and mm².
///
/// Only decodes; extension and size limits are applied by `check_batch`.
pub fn measure_upload(upload: &MeshUpload) -> Result<GeometryTotals, QuoteError> {
    let totals =
        printquote_stl::measure(&upload.bytes).map_err(|e| QuoteError::from_stl(&upload.name, e))?;
    if !totals.is_finite() {
        return Err(QuoteError::MalformedMesh {
            file: upload.name.clone(),
            reason: "mesh coordinates do not produce a finite volume".into(),
        });
    }
    debug!(
        "{}: {} triangles, {:.3} mm3, {:.3} mm2",
        upload.name, totals.triangles, totals.volume, totals.surface_area
    );
    Ok(totals)
}

/// Prices already measured geometry.
///
/// Fails when the weight or price overflows to infinity, which finite but
/// absurdly large meshes or materials can cause.
pub fn quote_totals(
    material: &Material,
    settings: &PrintSettings,
    totals: &GeometryTotals,
    file_names: Vec<String>,
) -> Result<Quotation, QuoteError> {
    let base_volume = totals.volume / MM3_PER_CM3;
    let printed = printed_volume(base_volume, totals.surface_area, settings);
    let quotation = Quotation::new(material, base_volume, &printed, file_names);
    if !(quotation.weight.is_finite() && quotation.total_price.is_finite()) {
        return Err(QuoteError::PriceOutOfRange {
            files: quotation.file_names,
        });
    }

    if quotation.zero_volume {
        warn!(
            "{:?}: meshes enclose no volume, quoting zero",
            quotation.file_names
        );
    }
    info!(
        "quoted {} file(s) in {}: {:.3} cm3 of {:.3} cm3 (shell {:.3}, infill {:.3}) at {}% infill, {} walls, {:.2} g, {:.2}",
        quotation.file_names.len(),
        quotation.material,
        printed.total,
        base_volume,
        printed.shell,
        printed.infill,
        settings.infill_percent(),
        settings.wall_count(),
        quotation.weight,
        quotation.total_price
    );
    Ok(quotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measured_totals_are_in_millimeters() {
        let upload = MeshUpload::new("cube.stl", printquote_test_data::cube(10.0).binary());
        let totals = measure_upload(&upload).unwrap();
        assert_eq!(12, totals.triangles);
        assert!((totals.volume - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn non_finite_geometry_is_malformed() {
        let facet = [[f32::MAX, 0.0, 0.0], [0.0, f32::MAX, 0.0], [0.0, 0.0, f32::NAN]];
        let data = printquote_test_data::binary_stl(b"", &[facet]);
        let err = measure_upload(&MeshUpload::new("nan.stl", data)).unwrap_err();
        assert!(matches!(err, QuoteError::MalformedMesh { file, .. } if file == "nan.stl"));
    }

    #[test]
    fn measuring_leaves_upload_policy_to_the_batch_check() {
        // Named like an OBJ but holding STL bytes: measuring decodes it, quoting refuses it.
        let upload = MeshUpload::new("cube.obj", printquote_test_data::cube(10.0).binary());
        assert_eq!(12, measure_upload(&upload).unwrap().triangles);
        assert!(matches!(
            check_batch(std::slice::from_ref(&upload), None),
            Err(QuoteError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn overflowing_price_is_refused() {
        let totals = GeometryTotals {
            volume: 1e300,
            surface_area: 0.0,
            triangles: 4,
        };
        let material = Material::new("Dense", 1e10, 1e10).unwrap();
        let settings = PrintSettings::new(100, None).unwrap();
        let err = quote_totals(&material, &settings, &totals, vec!["huge.stl".into()]).unwrap_err();
        assert!(matches!(err, QuoteError::PriceOutOfRange { files } if files == ["huge.stl"]));
    }
}
