use std::io::{self, Read};
use std::path::PathBuf;

use strenum_lib::SourceMap;

/// Load the package sources named on the command line.
///
/// A single `-` reads one file from stdin.
pub fn load_sources(paths: &[PathBuf]) -> Result<SourceMap, String> {
    if matches!(paths, [only] if only.as_os_str() == "-") {
        return load_stdin(io::stdin());
    }

    SourceMap::load(paths).map_err(|e| e.to_string())
}

pub(super) fn load_stdin(mut input: impl Read) -> Result<SourceMap, String> {
    let mut buf = String::new();
    input
        .read_to_string(&mut buf)
        .map_err(|e| format!("failed to read stdin: {}", e))?;
    let mut map = SourceMap::new();
    map.add_stdin(&buf);
    Ok(map)
}
