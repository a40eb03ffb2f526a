use crate::LoaderArgs;
use qualscan_core::Result;
use std::path::Path;

pub fn run_dir(args: &LoaderArgs, dir: &Path) -> Result<Vec<String>> {
    let loader = qualscan_runtime::build_default_loader(args.options())?;
    let found = loader.load_external_directory(dir)?;
    Ok(found.names().map(str::to_string).collect())
}

pub fn run_class(args: &LoaderArgs, name: &str) -> Result<Vec<String>> {
    let loader = qualscan_runtime::build_default_loader(args.options())?;
    let descriptor = loader.load_external_class(name)?;
    Ok(vec![descriptor.name().to_string()])
}
