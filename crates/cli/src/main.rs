use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// sysprobe - print facts about the host machine
#[derive(Parser)]
#[command(name = "sysprobe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Emit a single JSON document instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    let cli = Cli::parse();

    let os = sysprobe::os();
    let version = sysprobe::os_version().context("could not determine OS version")?;
    let arch = sysprobe::architecture();
    let compilers = sysprobe::compilers().context("could not probe compilers")?;
    let libc = sysprobe::libc().context("could not determine libc")?;

    if cli.json {
        let doc = serde_json::json!({
            "os": os,
            "version": version,
            "architecture": arch,
            "compilers": compilers,
            "libc": libc,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("OS Name: {os}");
    println!("OS Version: {}", version.version);
    println!("OS Release: {}", version.name);
    println!("Architecture: {arch}");
    for compiler in &compilers {
        println!(
            "Compiler: {} {}.{}",
            compiler.name, compiler.major, compiler.minor
        );
    }
    match libc {
        Some(libc) => println!("Libc: {} {}.{}", libc.name, libc.major, libc.minor),
        None => println!("Libc: none"),
    }

    Ok(())
}
