use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;

use scs::error::DriverError;
use scs::{assembler, compiler, lexer, preprocessor, reader, vm};

/// Compile, assemble and run a `.scs` source file.
///
/// Writes every intermediate pipeline artifact to disk by default, the
/// same way the reference driver always writes `Script_*` files — pass
/// `--keep-intermediates false` to skip the preprocessed/assembly/binary
/// files and only `--dump-tokens` to opt into the token dump.
#[derive(Parser, Debug)]
#[command(name = "scs", about = "Lexer, compiler, assembler and VM for a small C-like language")]
struct Cli {
    /// Source file to compile.
    source: PathBuf,

    /// Where to write the preprocessed source text.
    #[arg(long, default_value = "Script_preprocessed.txt")]
    preprocessed: PathBuf,

    /// Where to write the tokenized dump (only written with --dump-tokens).
    #[arg(long, default_value = "Script_tokenized.txt")]
    tokenized: PathBuf,

    /// Where to write the generated VM assembly.
    #[arg(long, default_value = "Script_assembly.txt")]
    assembly: PathBuf,

    /// Where to write the assembled binary image.
    #[arg(long, default_value = "Script_binary.scbin")]
    binary: PathBuf,

    /// Virtual machine memory size, in bytes.
    #[arg(long, default_value_t = vm::DEFAULT_MEMORY_SIZE)]
    vm_memory: usize,

    /// Write the tokenized dump alongside the other intermediate files.
    #[arg(long)]
    dump_tokens: bool,

    /// Write the preprocessed/assembly/binary intermediates to disk.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    keep_intermediates: bool,
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
    let filename = cli
        .source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.source.to_string_lossy().into_owned());

    let started = Instant::now();
    let source = reader::read_source(&cli.source)?;
    info!("read {} bytes from {}", source.len(), filename);

    let preprocessed = preprocessor::preprocess(&source, &filename);
    if cli.keep_intermediates {
        reader::write_file(&cli.preprocessed, preprocessed.as_bytes())?;
    }

    let lexed = lexer::tokenize(&preprocessed)?;
    info!("lexed {} tokens in {:?}", lexed.tokens.len(), started.elapsed());
    if cli.dump_tokens {
        reader::write_file(&cli.tokenized, lexer::dump_tokens(&lexed.tokens).as_bytes())?;
    }

    let compiled = compiler::compile(&lexed.tokens)?;
    info!("compiled {} bytes of assembly", compiled.assembly.len());
    if cli.keep_intermediates {
        reader::write_file(&cli.assembly, compiled.assembly.as_bytes())?;
    }

    let assembled = assembler::assemble(&compiled.assembly)?;
    info!("assembled {} bytes of image", assembled.binary.len());
    if cli.keep_intermediates {
        reader::write_file(&cli.binary, &assembled.binary)?;
    }

    let config = vm::VmConfig { memory_size: cli.vm_memory };
    let report = vm::execute(&assembled.binary, config)?;
    info!("executed in {:?}", started.elapsed());

    print_report(&report);
    Ok(())
}

fn print_report(report: &vm::VmReport) {
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
}
