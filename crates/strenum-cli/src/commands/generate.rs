use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use strenum_lib::{GenerateConfig, Generated};
use tracing::debug;

use super::run_common::validated_or_exit;

pub struct GenerateArgs {
    pub paths: Vec<PathBuf>,
    pub type_names: Vec<String>,
    pub text: bool,
    pub output: Option<PathBuf>,
    pub color: bool,
}

impl GenerateArgs {
    pub fn config(&self) -> GenerateConfig {
        GenerateConfig::new()
            .paths(&self.paths)
            .type_names(self.type_names.iter().cloned())
            .text_unmarshaling(self.text)
    }
}

pub fn run(args: GenerateArgs) {
    let config = args.config();
    let validated = validated_or_exit(&config, args.color);
    let generated = validated.emit();

    if let Err(e) = write_output(&generated, args.output.as_deref()) {
        let target = args
            .output
            .as_deref()
            .map_or_else(|| "stdout".to_owned(), |p| format!("'{}'", p.display()));
        eprintln!("error: failed to write {}: {}", target, e);
        std::process::exit(1);
    }
}

/// Write to `output`, or stdout when absent.
pub fn write_output(generated: &Generated, output: Option<&Path>) -> io::Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)?;
            generated.write_to(BufWriter::new(file))?;
            debug!(path = %path.display(), "wrote generated code");
            Ok(())
        }
        None => generated.write_to(io::stdout().lock()),
    }
}
