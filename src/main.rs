//! copydir's entry point: parses arguments, configures logging and runs the copy.

use copydir::{
    cli::{get_args, parse_key_values, Args},
    error::{default_error_handler, Result},
    renderer::MiniJinjaRenderer,
    TreeCopier,
};
use log::debug;

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

fn run(args: Args) -> Result<()> {
    debug!("{:?}", args);

    let data = parse_key_values(&args.keyvals)?;
    let rename = args.rename_policy();
    let engine = MiniJinjaRenderer::new()?;

    let root = TreeCopier::new(&engine, &rename, &data)
        .with_scope(args.template_scope())
        .copy(&args.src_dir, &args.dst_dir)?;

    debug!("Copied {} to {}", args.src_dir.display(), root.display());
    Ok(())
}
