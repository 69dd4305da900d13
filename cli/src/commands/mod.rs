pub mod overlay;
pub mod relate;
pub mod union;

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use geo::Geometry;
use geoverlay::io::{read_geojson_bytes, write_geojson_bytes};

use crate::cli::OutputArgs;

/// Read a geometry from a GeoJSON file.
pub fn read_geometry(path: &Path) -> Result<Geometry<f64>> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    read_geojson_bytes(&bytes).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Write a geometry as GeoJSON to the output file, or stdout.
pub fn write_geometry(geom: &Geometry<f64>, out: &OutputArgs) -> Result<()> {
    let bytes = write_geojson_bytes(geom, out.pretty)?;
    match &out.output {
        Some(path) => std::fs::write(path, &bytes).with_context(|| format!("Failed to write {}", path.display())),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}
