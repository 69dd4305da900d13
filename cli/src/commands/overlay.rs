use anyhow::Result;
use geoverlay::{overlay, overlay_snap_if_needed};
use tracing::info;

use super::{read_geometry, write_geometry};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::OverlayArgs) -> Result<()> {
    let a = read_geometry(&args.a)?;
    let b = read_geometry(&args.b)?;

    info!("computing {} of {} and {}", args.op, args.a.display(), args.b.display());
    let result = if args.no_snap {
        overlay(&a, &b, args.op)?
    } else {
        overlay_snap_if_needed(&a, &b, args.op)?
    };
    write_geometry(&result, &args.output)
}
