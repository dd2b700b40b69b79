//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{Annotation, AnnotationKind, Group, Level, Renderer, Snippet};
use strenum_core::Span;

use super::Diagnostics;
use super::message::Severity;
use crate::SourceMap;

/// Builder for rendering diagnostics against the sources they point into.
pub struct DiagnosticsPrinter<'a> {
    diagnostics: &'a Diagnostics,
    sources: &'a SourceMap,
    colored: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub fn new(diagnostics: &'a Diagnostics, sources: &'a SourceMap) -> Self {
        Self {
            diagnostics,
            sources,
            colored: false,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }

            let Some(span) = diag.span else {
                writeln!(w, "{}: {}", diag.severity(), diag.message)?;
                continue;
            };

            let Some(primary) = self.snippet(span, AnnotationKind::Primary, &diag.message) else {
                writeln!(w, "{}", diag)?;
                continue;
            };

            let level = severity_to_level(diag.severity());
            let mut group: Group = level.primary_title(&diag.message).element(primary);

            for related in &diag.related {
                if let Some(snippet) =
                    self.snippet(related.span, AnnotationKind::Context, &related.message)
                {
                    group = group.element(snippet);
                }
            }

            write!(w, "{}", renderer.render(&[group]))?;
            w.write_char('\n')?;
        }

        Ok(())
    }

    fn snippet(
        &self,
        span: Span,
        kind: AnnotationKind,
        label: &'a str,
    ) -> Option<Snippet<'a, Annotation<'a>>> {
        let source = self.sources.try_get(span.source)?;
        let range = adjust_range(span, source.content.len());

        let mut snippet = Snippet::source(source.content)
            .line_start(1)
            .annotation(kind.span(range).label(label));
        if let Some(path) = source.kind.path() {
            snippet = snippet.path(path);
        }
        Some(snippet)
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(span: Span, limit: usize) -> std::ops::Range<usize> {
    let start: usize = usize::from(span.range.start()).min(limit);
    let end: usize = usize::from(span.range.end()).min(limit);

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
