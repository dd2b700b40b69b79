//! Go body emission.

use std::collections::BTreeSet;

use strenum_core::utils::{char_width, padding, to_title};
use strenum_core::{DeclaredValue, TypeValueIndex};

use super::Config;

/// Emission state for one run: body text and the imports it needs.
#[derive(Debug, Default)]
pub struct EmissionContext {
    pub(crate) body: String,
    pub(crate) imports: BTreeSet<String>,
}

impl EmissionContext {
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Import paths, quoted, in sorted order.
    pub fn imports(&self) -> impl Iterator<Item = &str> {
        self.imports.iter().map(String::as_str)
    }

    fn add_import(&mut self, path: &str) {
        self.imports.insert(format!("\"{path}\""));
    }
}

/// Writes the validity map, predicate, listing and optional unmarshal
/// function for every type of an index.
pub struct Emitter<'a> {
    index: &'a TypeValueIndex,
    config: Config,
    ctx: EmissionContext,
}

impl<'a> Emitter<'a> {
    pub fn new(index: &'a TypeValueIndex, config: Config) -> Self {
        Self {
            index,
            config,
            ctx: EmissionContext::default(),
        }
    }

    pub fn emit(mut self) -> EmissionContext {
        let index = self.index;
        for (name, values) in index.sorted() {
            self.emit_basics(name, values);
            if self.config.text_unmarshaling {
                self.emit_unmarshal_text(name);
            }
        }
        self.ctx
    }

    fn emit_basics(&mut self, name: &str, values: &[DeclaredValue]) {
        let title = to_title(name);
        let width = values
            .iter()
            .map(|v| char_width(v.identifier()))
            .max()
            .unwrap_or(0);
        let out = &mut self.ctx.body;

        out.push_str(&format!(
            "\n// valid{title}Values contains a map of all valid {name} values for easy lookup\n"
        ));
        out.push_str(&format!("var valid{title}Values = map[{name}]struct{{}}{{\n"));
        for value in values {
            let id = value.identifier();
            out.push_str(&format!("\t{id}: {}struct{{}}{{}},\n", padding(id, width)));
        }
        out.push_str("}\n\n");

        out.push_str(&format!("// Valid{title} validates if a value is a valid {name}\n"));
        out.push_str(&format!("func (v {name}) Valid{title}() bool {{\n"));
        out.push_str(&format!("\t_, ok := valid{title}Values[v]\n"));
        out.push_str("\treturn ok\n");
        out.push_str("}\n\n");

        out.push_str(&format!("// {title}Values returns a list of all (valid) {name} values\n"));
        out.push_str(&format!("func {title}Values() []{name} {{\n"));
        out.push_str(&format!("\treturn []{name}{{\n"));
        for value in values {
            out.push_str(&format!("\t\t{},\n", value.identifier()));
        }
        out.push_str("\t}\n");
        out.push_str("}\n");
    }

    fn emit_unmarshal_text(&mut self, name: &str) {
        let title = to_title(name);
        let out = &mut self.ctx.body;

        out.push_str(&format!(
            "\n// UnmarshalText takes a text, verifies that it is a correct {name} and unmarshals it\n"
        ));
        out.push_str(&format!("func (v *{name}) UnmarshalText(text []byte) error {{\n"));
        out.push_str(&format!("\tif valid := {name}(text).Valid{title}(); !valid {{\n"));
        out.push_str(&format!(
            "\t\treturn fmt.Errorf(\"not valid value for {name}: %s\", text)\n"
        ));
        out.push_str("\t}\n");
        out.push_str(&format!("\t*v = {name}(text)\n"));
        out.push_str("\treturn nil\n");
        out.push_str("}\n");

        self.ctx.add_import("fmt");
    }
}
