//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{Annotation, AnnotationKind, Level, Renderer, Snippet};
use sable_core::{SourceId, SourceMap, Span};

use super::Diagnostics;
use super::message::{DiagnosticMessage, Marker, Severity};

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    sources: &'s SourceMap,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics, sources: &'s SourceMap) -> Self {
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
        self.format(&mut out).expect("String write never fails");
        out
    }

    /// One `path:line:col` line per marker, without source excerpts.
    pub fn render_plain(&self) -> String {
        let mut out = String::new();
        self.format_plain(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            // One snippet per source, the primary marker's source first.
            let mut snippets = sources_of(diag)
                .into_iter()
                .map(|source| self.snippet(diag, source));
            let Some(first) = snippets.next() else {
                continue;
            };

            let level = severity_to_level(diag.severity());
            let mut group = level.primary_title(&diag.message).element(first);
            for snippet in snippets {
                group = group.element(snippet);
            }
            for hint in &diag.hints {
                group = group.element(Level::HELP.message(hint.as_str()));
            }

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&[group]))?;
        }

        Ok(())
    }

    pub fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}: {}", diag.severity(), diag.message)?;
            for (marker, primary) in diag.markers() {
                let arrow = if primary { "-->" } else { ":::" };
                write!(w, "\n  {arrow} {}", self.location(marker.span))?;
                if !marker.label.is_empty() {
                    write!(w, ": {}", marker.label)?;
                }
            }
            for hint in &diag.hints {
                write!(w, "\n  = help: {hint}")?;
            }
        }
        Ok(())
    }

    fn snippet<'a>(
        &'a self,
        diag: &'a DiagnosticMessage,
        source: SourceId,
    ) -> Snippet<'a, Annotation<'a>> {
        let content = self.sources.content(source);
        let mut snippet = Snippet::source(content)
            .line_start(1)
            .path(self.sources.display_name(source));

        for (marker, primary) in diag.markers().filter(|(m, _)| m.span.source == source) {
            let kind = if primary {
                AnnotationKind::Primary
            } else {
                AnnotationKind::Context
            };
            snippet = snippet.annotation(annotation(kind, marker, content.len()));
        }
        snippet
    }

    fn location(&self, span: Span) -> String {
        let (line, col) = self.sources.line_col(span.source, span.start);
        format!("{}:{line}:{col}", self.sources.display_name(span.source))
    }
}

/// Distinct sources of a diagnostic's markers, in first-appearance order.
fn sources_of(diag: &DiagnosticMessage) -> Vec<SourceId> {
    let mut sources = Vec::new();
    for (marker, _) in diag.markers() {
        if !sources.contains(&marker.span.source) {
            sources.push(marker.span.source);
        }
    }
    sources
}

fn annotation<'a>(kind: AnnotationKind, marker: &'a Marker, limit: usize) -> Annotation<'a> {
    let annotation = kind.span(adjust_range(marker.span, limit));
    if marker.label.is_empty() {
        annotation
    } else {
        annotation.label(&marker.label)
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(span: Span, limit: usize) -> std::ops::Range<usize> {
    let start = span.start as usize;
    let end = span.end as usize;

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}

impl Diagnostics {
    pub fn printer<'s>(&self, sources: &'s SourceMap) -> DiagnosticsPrinter<'_, 's> {
        DiagnosticsPrinter::new(self, sources)
    }

    pub fn render(&self, sources: &SourceMap) -> String {
        self.printer(sources).render()
    }

    pub fn render_plain(&self, sources: &SourceMap) -> String {
        self.printer(sources).render_plain()
    }
}
