use std::io::Write;

use anyhow::{Context, Result};
use log::info;
use printquote::{quote, Material, MeshUpload, PrintSettings, QuoteRequest};

use crate::args::QuoteArgs;
use crate::materials::load_catalog;

fn resolve_material(args: &QuoteArgs) -> Result<Material> {
    if let (Some(density), Some(price_per_gram)) = (args.density, args.price_per_gram) {
        let name = args.material.clone().unwrap_or_else(|| "custom".to_string());
        return Ok(Material::new(name, density, price_per_gram)?);
    }
    let catalog = load_catalog(args.catalog.as_deref())?;
    match &args.material {
        Some(name) => Ok(catalog.find(name)?.clone()),
        None => catalog
            .first()
            .cloned()
            .context("The material catalog is empty"),
    }
}

pub fn quote_command<W: Write>(args: QuoteArgs, mut out: W) -> Result<()> {
    let material = resolve_material(&args)?;
    let settings = PrintSettings::new(args.infill, args.walls)?;
    let uploads = args
        .files
        .iter()
        .map(MeshUpload::from_path)
        .collect::<Result<Vec<_>, _>>()?;
    info!("pricing {} file(s) in {}", uploads.len(), material.name);

    let request = QuoteRequest {
        uploads,
        material,
        settings,
        expected_file_count: args.expect_files,
    };
    let quotation = quote(&request).context("Failed to calculate price")?;

    if args.pretty {
        serde_json::to_writer_pretty(&mut out, &quotation)?;
    } else {
        serde_json::to_writer(&mut out, &quotation)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use printquote_test_data::cube;

    use super::*;

    fn args(files: Vec<PathBuf>) -> QuoteArgs {
        QuoteArgs {
            files,
            material: None,
            catalog: None,
            density: None,
            price_per_gram: None,
            infill: 100,
            walls: None,
            expect_files: None,
            pretty: false,
        }
    }

    fn run(args: QuoteArgs) -> Result<serde_json::Value> {
        let mut out = Vec::new();
        quote_command(args, &mut out)?;
        Ok(serde_json::from_slice(&out)?)
    }

    #[test]
    fn quotes_a_file_with_the_default_material() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        std::fs::write(&path, cube(20.0).binary()).unwrap();

        let json = run(args(vec![path])).unwrap();
        assert_eq!("PLA+", json["material"]);
        assert!((json["volume"].as_f64().unwrap() - 8.0).abs() < 1e-9);
        assert!((json["totalPrice"].as_f64().unwrap() - 148.8).abs() < 1e-9);
        assert_eq!(serde_json::json!(["cube.stl"]), json["fileNames"]);
        assert_eq!(serde_json::json!(false), json["zeroVolume"]);
    }

    #[test]
    fn custom_catalog_and_material() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        std::fs::write(&path, cube(10.0).ascii("cube")).unwrap();
        let catalog = dir.path().join("catalog.json");
        std::fs::write(
            &catalog,
            r#"[{ "name": "Resin", "density": 1.1, "pricePerGram": 30 }]"#,
        )
        .unwrap();

        let mut a = args(vec![path]);
        a.catalog = Some(catalog);
        a.material = Some("Resin".into());
        let json = run(a).unwrap();
        assert_eq!("Resin", json["material"]);
        assert!((json["weight"].as_f64().unwrap() - 1.1).abs() < 1e-9);
        assert!((json["totalPrice"].as_f64().unwrap() - 33.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_density_and_price() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cube.stl");
        std::fs::write(&path, cube(10.0).binary()).unwrap();

        let mut a = args(vec![path]);
        a.density = Some(2.0);
        a.price_per_gram = Some(3.0);
        let json = run(a).unwrap();
        assert_eq!("custom", json["material"]);
        assert!((json["totalPrice"].as_f64().unwrap() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_material_fails() {
        let mut a = args(vec![PathBuf::from("unused.stl")]);
        a.material = Some("Unobtainium".into());
        let err = run(a).unwrap_err();
        assert!(err.to_string().contains("Unobtainium"));
    }

    #[test]
    fn obj_files_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.obj");
        std::fs::write(&path, "v 0 0 0\n").unwrap();

        let err = run(args(vec![path])).unwrap_err();
        assert!(format!("{err:#}").contains("OBJ volume calculation is not supported yet"));
    }
}
