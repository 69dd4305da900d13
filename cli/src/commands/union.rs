use anyhow::Result;
use geoverlay::union::unary_union_all;
use tracing::info;

use super::{read_geometry, write_geometry};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::UnionArgs) -> Result<()> {
    let geoms = args.inputs.iter().map(|path| read_geometry(path)).collect::<Result<Vec<_>>>()?;

    info!("unioning {} inputs", geoms.len());
    let result = unary_union_all(&geoms)?;
    write_geometry(&result, &args.output)
}
