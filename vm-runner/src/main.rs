use std::path::PathBuf;

use clap::Parser;
use log::info;

use scs::error::DriverError;
use scs::{reader, vm};

/// Execute an already-assembled scs virtual machine image.
#[derive(Parser, Debug)]
#[command(name = "vm-runner", about = "Run an assembled scs image")]
struct Cli {
    /// Path to a binary image produced by `scs --emit-image`.
    image: PathBuf,

    /// Virtual machine memory size, in bytes.
    #[arg(long, default_value_t = vm::DEFAULT_MEMORY_SIZE)]
    vm_memory: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DriverError> {
    let image = reader::read_image(&cli.image)?;
    info!("loaded {} bytes from {}", image.len(), cli.image.display());

    let config = vm::VmConfig { memory_size: cli.vm_memory };
    let report = vm::execute(&image, config)?;

    println!("r0 = {}", report.r0);
    println!("r1 = {}", report.r1);
    println!("ip = {}", report.ip);
    println!("sp = {}", report.sp);
    if report.divided_by_zero {
        println!("halted: division by zero");
    }
    println!("stack:");
    for (offset, value) in &report.stack {
        println!("  [sp+{offset}] = {value}");
    }

    Ok(())
}
