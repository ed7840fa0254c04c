//! Error types shared by every pipeline stage.
//!
//! Every stage (preprocessor, lexer, compiler, assembler, vm) reports
//! failure through [`ScsError`]. Errors do not accumulate within a stage:
//! the first problem encountered aborts that stage and is returned
//! immediately, carrying the [`DebugInfo`] of the offending token or
//! instruction when one is available.

use std::fmt;
use std::io;

/// Source location a [`ScsError`] is attributed to.
///
/// Lexing and compiling track this from the `<|>line|file<|>` markers the
/// preprocessor inserts; the assembler and VM carry it forward from the
/// lines of the intermediate assembly text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DebugInfo {
    pub file: String,
    pub line: usize,
}

impl DebugInfo {
    pub fn new(file: impl Into<String>, line: usize) -> Self {
        Self { file: file.into(), line }
    }
}

impl fmt::Display for DebugInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Which stage of the pipeline raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Preprocess,
    Lex,
    Compile,
    Assemble,
    Vm,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Preprocess => "preprocess",
            Stage::Lex => "lex",
            Stage::Compile => "compile",
            Stage::Assemble => "assemble",
            Stage::Vm => "vm",
        };
        f.write_str(name)
    }
}

/// The specific kind of failure within a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    // Lexer
    UnexpectedCharacter,
    UnterminatedMarker,
    InvalidMarker,

    // Compiler
    UnexpectedToken,
    UnexpectedEof,
    UndeclaredIdentifier,
    DuplicateDeclaration,
    NotYetImplemented,

    // Assembler
    UnknownMnemonic,
    UnknownRegister,
    InvalidOperand,
    WrongOperandCount,
    UndefinedLabel,
    DuplicateLabel,
    ImageTooLarge,

    // Vm
    OutOfBounds,
    UnalignedAccess,
    UnknownOpcode,
}

/// A single fatal error from any pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScsError {
    pub stage: Stage,
    pub kind: ErrorKind,
    pub message: String,
    pub debug: Option<DebugInfo>,
}

impl ScsError {
    pub fn new(stage: Stage, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self { stage, kind, message: message.into(), debug: None }
    }

    pub fn at(stage: Stage, kind: ErrorKind, message: impl Into<String>, debug: DebugInfo) -> Self {
        Self { stage, kind, message: message.into(), debug: Some(debug) }
    }
}

impl fmt::Display for ScsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error: {}", self.stage, self.message)?;
        if let Some(debug) = &self.debug {
            write!(f, " (at {debug})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ScsError {}

/// Top-level error returned by the driver binaries.
///
/// Wraps [`ScsError`] and any bare I/O failure that happens outside a
/// specific pipeline stage (e.g. writing the output image to disk).
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error(transparent)]
    Pipeline(#[from] ScsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_location_when_present() {
        let err = ScsError::at(
            Stage::Compile,
            ErrorKind::UndeclaredIdentifier,
            "undeclared identifier `x`",
            DebugInfo::new("main.scs", 3),
        );
        assert_eq!(
            err.to_string(),
            "compile error: undeclared identifier `x` (at main.scs:3)"
        );
    }

    #[test]
    fn display_omits_location_when_absent() {
        let err = ScsError::new(Stage::Vm, ErrorKind::OutOfBounds, "boom");
        assert_eq!(err.to_string(), "vm error: boom");
    }
}
