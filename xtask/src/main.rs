// Licensed under the Apache-2.0 license

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

mod config;
mod svd_dump;
mod svd_gen;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Xtask {
    /// Log what the generator skips and synthesizes.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    xtask: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate tock-registers code from an SVD file
    SvdGen {
        /// SVD file to read
        #[arg(long, value_name = "FILE")]
        svd: Option<PathBuf>,

        /// Directory to write the generated files to
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Only generate these peripherals (comma separated, case insensitive)
        #[arg(long, value_delimiter = ',')]
        peripherals: Vec<String>,

        /// Wrap every generated file in `pub mod <NAMESPACE>`
        #[arg(long)]
        namespace: Option<String>,

        /// Strip comments and indentation from the generated code
        #[arg(long, default_value_t = false)]
        minify: bool,

        /// Only print the files that would be generated
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// TOML file with defaults for the options above
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Print the normalized register model of an SVD file
    SvdDump {
        /// SVD file to read
        #[arg(long, value_name = "FILE")]
        svd: PathBuf,

        /// Only print these peripherals (comma separated, case insensitive)
        #[arg(long, value_delimiter = ',')]
        peripherals: Vec<String>,
    },
}

fn main() {
    let cli = Xtask::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(e) = SimpleLogger::new().with_level(level).env().init() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let result = match cli.xtask {
        Commands::SvdGen {
            svd,
            output,
            peripherals,
            namespace,
            minify,
            dry_run,
            config,
        } => {
            let args = config::GenerateConfig {
                svd,
                output,
                peripherals,
                namespace,
                minify,
            };
            config::GenerateConfig::load(config.as_deref())
                .map(|file| file.overridden_by(args))
                .and_then(|config| svd_gen::generate(&config, dry_run))
        }
        Commands::SvdDump { svd, peripherals } => svd_dump::dump(&svd, &peripherals),
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error: {:#}", e);
        std::process::exit(-1);
    });
}
