use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use printquote::Catalog;

use crate::args::MaterialsArgs;

pub fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::default());
    };
    let f = File::open(path).with_context(|| format!("Failed to open catalog {:?}", path))?;
    Catalog::from_json_reader(f).with_context(|| format!("Failed to load catalog {:?}", path))
}

pub fn materials_command<W: Write>(args: MaterialsArgs, mut out: W) -> Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    for m in catalog.materials() {
        writeln!(
            out,
            "{:<12} {:>6.2} g/cm3 {:>8.2} per gram",
            m.name, m.density, m.price_per_gram
        )?;
    }
    Ok(())
}
