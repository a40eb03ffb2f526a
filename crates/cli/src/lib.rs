mod bundled;
mod external;

use clap::{Args, Parser, Subcommand};
use qualscan_runtime::LoaderOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "qualscan",
    version,
    about = "Discovers the type-qualifier annotations a checker ships or is given",
    long_about = "Qualscan finds a checker's bundled qualifier package on the search path, \
                  lists the annotation classes in it and keeps those that are valid type \
                  qualifiers. It can also load qualifiers from a user directory or by name."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the qualifiers bundled with a checker
    #[command(
        long_about = "Searches the JDK boot path, QUALSCAN_EXT_DIRS, CLASSPATH and any --path \
                            entries for <namespace>.qual and prints every accepted qualifier."
    )]
    Bundled {
        #[command(flatten)]
        loader: LoaderArgs,
    },
    /// Load every qualifier whose source file lives under a directory
    ExternalDir {
        #[command(flatten)]
        loader: LoaderArgs,
        /// Root of the qualifier source tree
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
    /// Load one qualifier by its fully qualified name
    ExternalClass {
        #[command(flatten)]
        loader: LoaderArgs,
        /// Fully qualified annotation name
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Args, Debug, Clone)]
pub struct LoaderArgs {
    /// Checker namespace, e.g. `demo.checker`
    #[arg(long)]
    pub namespace: String,
    /// Checker simple name used in messages
    #[arg(long, default_value = "Checker")]
    pub checker: String,
    /// Descriptor manifest (repeatable, applied in order)
    #[arg(long = "manifest", value_name = "FILE", required = true)]
    pub manifests: Vec<PathBuf>,
    /// Extra search path entry (repeatable, searched after CLASSPATH)
    #[arg(long = "path", value_name = "PATH")]
    pub paths: Vec<String>,
    /// `file:` URL the checker is loaded from (repeatable, searched last)
    #[arg(long = "loader-url", value_name = "URL")]
    pub loader_urls: Vec<String>,
    /// JSON loader configuration
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl LoaderArgs {
    pub fn options(&self) -> LoaderOptions {
        let mut options = LoaderOptions::new(format!("{}.{}", self.namespace, self.checker));
        options.manifests = self.manifests.clone();
        options.class_path = self.paths.clone();
        options.loader_urls = self.loader_urls.clone();
        options.config_file = self.config.clone();
        options
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = qualscan_runtime::init_logging("cli", true);

    let names = match cli.command {
        Commands::Bundled { loader } => bundled::run(&loader)?,
        Commands::ExternalDir { loader, dir } => external::run_dir(&loader, &dir)?,
        Commands::ExternalClass { loader, name } => external::run_class(&loader, &name)?,
    };
    for name in names {
        println!("{name}");
    }
    Ok(())
}
