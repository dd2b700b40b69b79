//! Generation stages.
//!
//! Each stage consumes the previous one, so a later stage cannot exist
//! without the earlier ones having succeeded:
//! `Generator` → `Resolved` → `Extracted` → `Validated` → `Generated`.

use std::io;
use std::path::{Path, PathBuf};

use strenum_core::{TargetTypes, TypeValueIndex};
use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::emit::{self, build_header};
use crate::extract::extract;
use crate::resolve::{GoPackage, SemanticResolver};
use crate::validate::validate;
use crate::{Error, Result, SourceMap};

/// What to generate, and from where.
#[derive(Clone, Debug, Default)]
pub struct GenerateConfig {
    pub(crate) paths: Vec<PathBuf>,
    pub(crate) type_names: TargetTypes,
    pub(crate) text_unmarshaling: bool,
}

impl GenerateConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files or directories forming the package.
    pub fn paths<P: AsRef<Path>>(mut self, paths: impl IntoIterator<Item = P>) -> Self {
        self.paths = paths.into_iter().map(|p| p.as_ref().to_path_buf()).collect();
        self
    }

    /// Types to generate code for.
    pub fn type_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.type_names = names.into_iter().collect();
        self
    }

    /// Also emit `UnmarshalText` methods.
    pub fn text_unmarshaling(mut self, value: bool) -> Self {
        self.text_unmarshaling = value;
        self
    }

    pub fn get_paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn get_type_names(&self) -> &TargetTypes {
        &self.type_names
    }

    pub fn get_text_unmarshaling(&self) -> bool {
        self.text_unmarshaling
    }

    fn emit_config(&self) -> emit::Config {
        emit::Config {
            text_unmarshaling: self.text_unmarshaling,
        }
    }
}

/// Sources loaded, nothing parsed yet.
pub struct Generator {
    sources: SourceMap,
    targets: TargetTypes,
    emit_config: emit::Config,
}

impl Generator {
    /// Read the configured paths from disk.
    pub fn load(config: &GenerateConfig) -> Result<Self> {
        let sources = SourceMap::load(&config.paths)?;
        Ok(Self::new(sources, config))
    }

    /// Use sources that are already in memory. Configured paths are ignored.
    pub fn new(sources: SourceMap, config: &GenerateConfig) -> Self {
        Self {
            sources,
            targets: config.type_names.clone(),
            emit_config: config.emit_config(),
        }
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// Parse the sources and evaluate their constants.
    pub fn resolve(self) -> Result<Resolved> {
        let package = GoPackage::from_sources(&self.sources)?;
        Ok(Resolved {
            generator: self,
            package,
        })
    }
}

/// The package is parsed and its constants evaluated.
pub struct Resolved {
    generator: Generator,
    package: GoPackage,
}

impl Resolved {
    pub fn package(&self) -> &GoPackage {
        &self.package
    }

    pub fn sources(&self) -> &SourceMap {
        &self.generator.sources
    }

    /// Collect the values of the target types.
    pub fn extract(self) -> Result<Extracted> {
        let extraction = extract(&self.package, &self.generator.targets);
        if extraction.diagnostics.has_errors() {
            return Err(Error::Extraction(extraction.diagnostics));
        }

        Ok(Extracted {
            package_name: self.package.package_name().to_owned(),
            emit_config: self.generator.emit_config,
            index: extraction.index,
            warnings: extraction.diagnostics,
        })
    }
}

/// Values of every target type, in discovery order.
pub struct Extracted {
    package_name: String,
    emit_config: emit::Config,
    index: TypeValueIndex,
    warnings: Diagnostics,
}

impl Extracted {
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn index(&self) -> &TypeValueIndex {
        &self.index
    }

    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }

    /// Reject types that declare a value twice.
    pub fn validate(self) -> Result<Validated> {
        let diagnostics = validate(&self.index);
        if diagnostics.has_errors() {
            return Err(Error::Validation(diagnostics));
        }
        Ok(Validated { inner: self })
    }
}

/// Values are known to be unique per type.
pub struct Validated {
    inner: Extracted,
}

impl Validated {
    pub fn package_name(&self) -> &str {
        &self.inner.package_name
    }

    pub fn index(&self) -> &TypeValueIndex {
        &self.inner.index
    }

    pub fn warnings(&self) -> &Diagnostics {
        &self.inner.warnings
    }

    /// Render the Go code.
    pub fn emit(self) -> Generated {
        let Extracted {
            package_name,
            emit_config,
            index,
            warnings,
        } = self.inner;

        let ctx = emit::emit(&index, emit_config);
        let header = build_header(&package_name, ctx.imports());
        debug!(
            types = index.len(),
            bytes = header.len() + ctx.body().len(),
            "emitted Go code"
        );

        Generated {
            header,
            body: ctx.body,
            warnings,
        }
    }
}

/// Generated Go source, split into header and body.
#[derive(Debug, Clone)]
pub struct Generated {
    header: String,
    body: String,
    warnings: Diagnostics,
}

impl Generated {
    /// Package clause and imports.
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Declarations for every type.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Non-fatal diagnostics collected on the way.
    pub fn warnings(&self) -> &Diagnostics {
        &self.warnings
    }

    /// Header followed directly by the body.
    pub fn to_source(&self) -> String {
        let mut out = String::with_capacity(self.header.len() + self.body.len());
        out.push_str(&self.header);
        out.push_str(&self.body);
        out
    }

    pub fn write_to(&self, mut w: impl io::Write) -> io::Result<()> {
        w.write_all(self.header.as_bytes())?;
        w.write_all(self.body.as_bytes())?;
        w.flush()
    }
}

/// Run every stage on the configured paths.
pub fn generate(config: &GenerateConfig) -> Result<Generated> {
    Ok(Generator::load(config)?
        .resolve()?
        .extract()?
        .validate()?
        .emit())
}
