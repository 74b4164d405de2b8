//! YANG compiler error types

use crate::{ErrorCode, Locator};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with location and context
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    pub locator: Locator,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            locator: Locator::Unknown,
            help: None,
        }
    }

    /// Create a new warning diagnostic
    pub fn warning(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            ..Self::error(code, message)
        }
    }

    pub fn with_locator(mut self, locator: Locator) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the diagnostic with terminal colors
    #[cfg(feature = "colored")]
    pub fn render_colored(&self) -> String {
        use colored::Colorize;

        let severity = match self.severity {
            Severity::Error => self.severity.to_string().red().bold(),
            Severity::Warning => self.severity.to_string().yellow().bold(),
        };
        let mut out = format!(
            "{}[{}] {}: {}",
            severity,
            self.code,
            self.locator.to_string().cyan(),
            self.message
        );
        if let Some(help) = self.help.as_deref().or(self.code.info().help) {
            out.push_str(&format!("\n  {} {}", "help:".green(), help));
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.code, self.locator, self.message
        )
    }
}

static UNKNOWN: Locator = Locator::Unknown;

/// Main YANG compiler error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum YangError {
    /// Statement syntax error
    #[error("{locator}: {message}")]
    Parse {
        code: ErrorCode,
        message: String,
        locator: Locator,
    },

    /// Module or type resolution error
    #[error("{locator}: {message}")]
    Semantic {
        code: ErrorCode,
        message: String,
        locator: Locator,
        context: Option<String>,
    },

    /// I/O or configuration error
    #[error("{code}: {message}")]
    System {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// Multiple errors collected
    #[error("{} errors, first: {}", .0.len(), .0.first().map(ToString::to_string).unwrap_or_default())]
    Multiple(Vec<YangError>),
}

impl YangError {
    pub fn parse(code: ErrorCode, message: impl Into<String>, locator: Locator) -> Self {
        Self::Parse {
            code,
            message: message.into(),
            locator,
        }
    }

    pub fn semantic(code: ErrorCode, message: impl Into<String>, locator: Locator) -> Self {
        Self::Semantic {
            code,
            message: message.into(),
            locator,
            context: None,
        }
    }

    pub fn system(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::System {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Collapse a list of errors into one, keeping a lone error as-is
    pub fn from_many(mut errors: Vec<YangError>) -> Self {
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            Self::Multiple(errors)
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Parse { code, .. } => *code,
            Self::Semantic { code, .. } => *code,
            Self::System { code, .. } => *code,
            Self::Multiple(errors) => errors
                .first()
                .map(|e| e.code())
                .unwrap_or(ErrorCode::new(0)),
        }
    }

    pub fn locator(&self) -> &Locator {
        match self {
            Self::Parse { locator, .. } | Self::Semantic { locator, .. } => locator,
            Self::System { .. } => &UNKNOWN,
            Self::Multiple(errors) => errors.first().map(|e| e.locator()).unwrap_or(&UNKNOWN),
        }
    }

    /// The message without the locator prefix
    pub fn message(&self) -> String {
        match self {
            Self::Parse { message, .. }
            | Self::Semantic { message, .. }
            | Self::System { message, .. } => message.clone(),
            Self::Multiple(_) => self.to_string(),
        }
    }

    /// Flatten into the individual errors
    pub fn into_vec(self) -> Vec<YangError> {
        match self {
            Self::Multiple(errors) => errors.into_iter().flat_map(Self::into_vec).collect(),
            other => vec![other],
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Self::Parse {
                code,
                message,
                locator,
            } => Diagnostic::error(*code, message.clone()).with_locator(locator.clone()),
            Self::Semantic {
                code,
                message,
                locator,
                context,
            } => {
                let mut diag =
                    Diagnostic::error(*code, message.clone()).with_locator(locator.clone());
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
            Self::System {
                code,
                message,
                context,
            } => {
                let mut diag = Diagnostic::error(*code, message.clone());
                if let Some(ctx) = context {
                    diag = diag.with_help(ctx.clone());
                }
                diag
            }
            Self::Multiple(errors) => match errors.first() {
                Some(first) => first.to_diagnostic(),
                None => Diagnostic::error(ErrorCode::new(0), "Unknown error"),
            },
        }
    }
}

impl From<std::io::Error> for YangError {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => crate::YANG0404,
            _ => crate::YANG0401,
        };
        Self::system(code, err.to_string())
    }
}

/// Builder for creating errors with a fluent API
pub struct ErrorBuilder {
    code: ErrorCode,
    message: String,
    locator: Locator,
    context: Option<String>,
}

impl ErrorBuilder {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            locator: Locator::Unknown,
            context: None,
        }
    }

    /// Set the source locator
    pub fn at(mut self, locator: Locator) -> Self {
        self.locator = locator;
        self
    }

    /// Add context information
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn parse(self) -> YangError {
        YangError::Parse {
            code: self.code,
            message: self.message,
            locator: self.locator,
        }
    }

    pub fn semantic(self) -> YangError {
        YangError::Semantic {
            code: self.code,
            message: self.message,
            locator: self.locator,
            context: self.context,
        }
    }

    pub fn system(self) -> YangError {
        YangError::System {
            code: self.code,
            message: self.message,
            context: self.context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SourceLocation, YANG0001, YANG0103, YANG0200};

    #[test]
    fn test_error_builder() {
        let err = ErrorBuilder::new(YANG0103, "unknown module: openconfig-extensions")
            .at(Locator::source("test.yang", SourceLocation::new(4, 5, 40, 6)))
            .context("imported with prefix \"o\"")
            .semantic();

        assert!(matches!(err, YangError::Semantic { .. }));
        assert_eq!(err.code(), YANG0103);
        assert_eq!(
            err.to_string(),
            "test.yang:4:5: unknown module: openconfig-extensions"
        );
    }

    #[test]
    fn test_unknown_locator_display() {
        let err = YangError::semantic(
            YANG0200,
            "bad range: -10..128 not within -128..127",
            Locator::Unknown,
        );
        assert_eq!(err.to_string(), "unknown: bad range: -10..128 not within -128..127");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic::error(YANG0001, "unexpected '}'")
            .with_locator(Locator::source("a.yang", SourceLocation::new(1, 5, 4, 1)));

        let text = diag.to_string();
        assert!(text.contains("YANG0001"));
        assert!(text.contains("a.yang:1:5"));
    }

    #[test]
    fn test_multiple_flattens() {
        let a = YangError::semantic(YANG0200, "a", Locator::Unknown);
        let b = YangError::semantic(YANG0200, "b", Locator::Unknown);
        let nested = YangError::Multiple(vec![a.clone(), YangError::Multiple(vec![b.clone()])]);
        assert_eq!(nested.into_vec(), vec![a.clone(), b]);
        assert_eq!(YangError::from_many(vec![a.clone()]), a);
    }
}
