use sable_core::Span;

/// One kind per analysis failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Module graph
    DuplicateModule,
    UndefinedModuleReference,
    CyclicDependency,

    // Entry validations
    ExportedModulesNotImported,
    ExportedDeclsNotDefined,
    MultipleDeclarations,

    // Name resolution
    UndefinedVariable,
    MultipleDefinitions,

    // Fatal, outside the analysis taxonomy
    RecursionLimitExceeded,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Default hint for this kind, automatically included in diagnostics.
    /// Call sites add hints specific to the offending occurrence.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::CyclicDependency => {
                Some("move the shared declarations into a module both sides can import")
            }
            Self::RecursionLimitExceeded => Some("split the expression into smaller declarations"),
            _ => None,
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::DuplicateModule => "duplicate module",
            Self::UndefinedModuleReference => "undefined module",
            Self::CyclicDependency => "cyclic dependency",

            Self::ExportedModulesNotImported => "exported module is not imported",
            Self::ExportedDeclsNotDefined => "exported declaration is not defined",
            Self::MultipleDeclarations => "duplicate declaration",

            Self::UndefinedVariable => "undefined name",
            Self::MultipleDefinitions => "ambiguous reference",

            Self::RecursionLimitExceeded => "recursion limit exceeded",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateModule => "module `{}` is declared more than once".to_string(),
            Self::UndefinedModuleReference => "module `{}` is not defined".to_string(),
            Self::ExportedDeclsNotDefined => "`{}` is exported but not defined".to_string(),
            Self::MultipleDefinitions => "`{}` is ambiguous".to_string(),

            // Callers render the whole sentence (pluralized or kind-qualified)
            Self::ExportedModulesNotImported
            | Self::MultipleDeclarations
            | Self::UndefinedVariable => "{}".to_string(),

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A labelled location. The label may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub span: Span,
    pub label: String,
}

impl Marker {
    pub fn new(span: Span, label: impl Into<String>) -> Self {
        Self {
            span,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    pub message: String,
    /// The erroneous occurrences. Never empty.
    pub primary: Vec<Marker>,
    /// Supporting locations ("first declared here", "imported here").
    pub context: Vec<Marker>,
    pub hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            primary: vec![Marker::new(span, "")],
            context: Vec::new(),
            hints: kind.default_hint().map(str::to_owned).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, span: Span) -> Self {
        Self::new(kind, span, kind.fallback_message())
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }

    /// Every marker, primary ones first.
    pub fn markers(&self) -> impl Iterator<Item = (&Marker, bool)> {
        let primary = self.primary.iter().map(|m| (m, true));
        let context = self.context.iter().map(|m| (m, false));
        primary.chain(context)
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity(), self.message)?;
        for (marker, _) in self.markers() {
            write!(
                f,
                " (at {}:{}..{}",
                marker.span.source.as_u32(),
                marker.span.start,
                marker.span.end
            )?;
            if !marker.label.is_empty() {
                write!(f, " {}", marker.label)?;
            }
            write!(f, ")")?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
