use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use xcstrings_compile::{CompileError, compile_catalog_file};

#[derive(Parser, Debug)]
#[command(version, arg_required_else_help = true)]
/// Compile a .xcstrings string catalog into <lang>.lproj/Localizable.strings tables
struct Cli {
    /// The .xcstrings catalog to compile
    #[arg(value_name = "CATALOG")]
    catalog: PathBuf,

    /// The bundle directory the .lproj directories are written into
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("xcstrings_compile=warn")),
        )
        .init();

    if !cli.catalog.exists() {
        eprintln!("Error: {} not found", cli.catalog.display());

        error_exit();
    }

    println!(
        "Converting {} to {}",
        cli.catalog.display(),
        cli.output_dir.display()
    );

    let compiled = match compile_catalog_file(&cli.catalog, &cli.output_dir) {
        Ok(compiled) => compiled,
        Err(CompileError::Io { path, source }) if path != cli.catalog => {
            eprintln!("Failed to write {}. Error: {}", path.display(), source);

            error_exit();
        }
        Err(e) => {
            eprintln!("Error: {}", e);

            error_exit();
        }
    };

    println!(
        "Found languages: {:?}",
        compiled
            .iter()
            .map(|table| table.language.as_str())
            .collect::<Vec<_>>()
    );

    for table in &compiled {
        println!(
            "  Created {} with {} strings",
            table.path.display(),
            table.count
        );
    }

    println!("Done!");
}

fn error_exit() -> ! {
    eprintln!("\nUnable to continue.");

    std::process::exit(1);
}
