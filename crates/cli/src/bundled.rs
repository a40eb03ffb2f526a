use crate::LoaderArgs;
use qualscan_core::Result;
use tracing::info;

pub fn run(args: &LoaderArgs) -> Result<Vec<String>> {
    let loader = qualscan_runtime::build_default_loader(args.options())?;
    match loader.location() {
        Some(location) => info!("Qualifier package {} at {}", loader.package(), location.url()),
        None => info!("Qualifier package {} not found", loader.package()),
    }
    Ok(loader
        .loaded_qualifiers()
        .names()
        .map(str::to_string)
        .collect())
}
