//! # scs
//!
//! A lexer, compiler, assembler and virtual machine for a small C-like
//! language.
//!
//! ## Pipeline
//!
//! 1. **Preprocessor** - strips comments, stamps source locations
//! 2. **Lexer** - tokenizes preprocessed source
//! 3. **Compiler** - recursive-descent parser and code generator, emits
//!    textual VM assembly
//! 4. **Assembler** - two-pass assembler, emits a binary image
//! 5. **Vm** - fetch-decode-execute loop over that image
//!
//! ## Example
//!
//! ```rust,no_run
//! use scs::{preprocessor, lexer, compiler, assembler, vm};
//!
//! let source = std::fs::read_to_string("program.scs").unwrap();
//! let preprocessed = preprocessor::preprocess(&source, "program.scs");
//! let lexed = lexer::tokenize(&preprocessed).unwrap();
//! let compiled = compiler::compile(&lexed.tokens).unwrap();
//! let assembled = assembler::assemble(&compiled.assembly).unwrap();
//! let report = vm::execute(&assembled.binary, vm::VmConfig::default()).unwrap();
//! println!("r0 = {}", report.r0);
//! ```

pub mod assembler;
pub mod compiler;
pub mod error;
pub mod isa;
pub mod lexer;
pub mod preprocessor;
pub mod reader;
pub mod vm;
