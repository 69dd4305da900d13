use anyhow::Result;
use geoverlay::RelateOp;
use tracing::info;

use super::read_geometry;

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::RelateArgs) -> Result<()> {
    let a = read_geometry(&args.a)?;
    let b = read_geometry(&args.b)?;

    info!("relating {} and {} under the {} rule", args.a.display(), args.b.display(), args.rule);
    let im = RelateOp::new(&a, &b)?.with_boundary_rule(args.rule).compute()?;
    match &args.pattern {
        Some(pattern) => println!("{im} {pattern} {}", im.matches(pattern)),
        None => println!("{im}"),
    }
    Ok(())
}
