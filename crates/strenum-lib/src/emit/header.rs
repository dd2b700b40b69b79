/// Package clause, then the import block when there are imports.
///
/// Imports are expected quoted and are written sorted and deduplicated.
pub fn build_header<'i>(package: &str, imports: impl IntoIterator<Item = &'i str>) -> String {
    let mut imports: Vec<&str> = imports.into_iter().collect();
    imports.sort_unstable();
    imports.dedup();

    let mut out = format!("package {package}\n");
    if imports.is_empty() {
        return out;
    }

    out.push_str("\nimport (\n");
    for import in imports {
        out.push('\t');
        out.push_str(import);
        out.push('\n');
    }
    out.push_str(")\n");
    out
}
