//! Grammar files on disk.
//!
//! Loading by bare name tries the path itself, then each extension in
//! [`GRAMMAR_EXTENSIONS`] in order.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thicket_compiler::{RustConfig, compile_grammar, emit_rust, lower};
use thicket_ir::Program;

use crate::namespace::Namespace;
use crate::{Error, Result};

pub const GRAMMAR_EXTENSIONS: &[&str] = &["thicket", "tkt"];

/// Locate the grammar file for `path`.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }

    let mut candidates = vec![path.to_path_buf()];
    for ext in GRAMMAR_EXTENSIONS {
        let candidate = append_extension(path, ext);
        if candidate.is_file() {
            return Ok(candidate);
        }
        candidates.push(candidate);
    }

    Err(Error::GrammarNotFound { candidates })
}

pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Compile the grammar at `path` and register it in `namespace`.
///
/// Nothing is written to disk.
pub fn load(path: impl AsRef<Path>, namespace: &mut Namespace) -> Result<Arc<Program>> {
    let path = resolve_path(path.as_ref())?;
    let source = read_source(&path)?;
    load_from_string(&source, namespace)
}

/// Compile grammar source and register it in `namespace`.
pub fn load_from_string(source: &str, namespace: &mut Namespace) -> Result<Arc<Program>> {
    let grammar = compile_grammar(source)?;
    let program = lower(&grammar)?;
    Ok(namespace.register(program))
}

/// Compile the grammar at `src` into a Rust source file.
///
/// Without `dest` the output lands next to the grammar, see
/// [`default_output_path`]. Returns the path written.
pub fn compile_file(src: impl AsRef<Path>, dest: Option<&Path>) -> Result<PathBuf> {
    compile_file_with(src, dest, &RustConfig::default())
}

pub fn compile_file_with(
    src: impl AsRef<Path>,
    dest: Option<&Path>,
    config: &RustConfig,
) -> Result<PathBuf> {
    let src = src.as_ref();
    let source = read_source(src)?;
    let grammar = compile_grammar(&source)?;
    let output = emit_rust(&grammar, config)?;

    let dest = dest.map_or_else(|| default_output_path(src), Path::to_path_buf);
    fs::write(&dest, output).map_err(|source| Error::Io {
        path: dest.clone(),
        source,
    })?;
    Ok(dest)
}

/// `g.thicket` and `g.tkt` become `g.rs`; any other extension gets `.rs`
/// appended.
pub fn default_output_path(src: &Path) -> PathBuf {
    match src.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if GRAMMAR_EXTENSIONS.contains(&ext) => src.with_extension("rs"),
        Some(_) => append_extension(src, "rs"),
        None => src.with_extension("rs"),
    }
}

fn append_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
