//! Grammar and input loading for CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use thicket::loader::{read_source, resolve_path};

/// Grammar text plus the file it came from, if any.
pub struct LoadedGrammar {
    pub source: String,
    pub path: Option<PathBuf>,
}

impl LoadedGrammar {
    /// Path as shown in diagnostics.
    pub fn display_path(&self) -> Option<String> {
        self.path.as_ref().map(|p| p.display().to_string())
    }
}

/// Load grammar source from inline text, stdin ("-"), or a file.
///
/// Files are resolved by bare name too: `arith` finds `arith.thicket` or
/// `arith.tkt`.
pub fn load_grammar(path: Option<&Path>, text: Option<&str>) -> Result<LoadedGrammar, String> {
    if let Some(text) = text {
        return Ok(LoadedGrammar {
            source: text.to_owned(),
            path: None,
        });
    }

    let Some(path) = path else {
        return Err("grammar is required: pass GRAMMAR or -g <TEXT>".to_owned());
    };

    if is_stdin(path) {
        return Ok(LoadedGrammar {
            source: read_stdin()?,
            path: None,
        });
    }

    let path = resolve_path(path).map_err(|e| e.to_string())?;
    let source = read_source(&path).map_err(|e| e.to_string())?;
    Ok(LoadedGrammar {
        source,
        path: Some(path),
    })
}

/// Load parser input from inline text, stdin ("-"), or a file.
pub fn load_input(path: Option<&Path>, text: Option<&str>) -> Result<String, String> {
    if let Some(text) = text {
        return Ok(text.to_owned());
    }

    match path {
        Some(path) if is_stdin(path) => read_stdin(),
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("failed to read input file '{}': {}", path.display(), e)),
        None => Err("input is required: pass INPUT, -s <TEXT>, or \"-\" for stdin".to_owned()),
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_stdin() -> Result<String, String> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    Ok(buf)
}
