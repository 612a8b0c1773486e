use serde::Serialize;

/// Error severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Data problem that left a field at its fallback value
    Error,
    /// Warning that doesn't change the generated output
    Warning,
}

/// Non-fatal data problems found while converting a single record.
///
/// None of these abort the batch: the record is still written with
/// best-effort defaults (empty year, month `01`, empty title).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordWarning {
    /// Neither `date` nor `year` produced a year.
    MissingYear,
    /// The `month` field could not be converted to a month number.
    InvalidMonth {
        /// Raw month value from the record
        value: String,
    },
    /// The record has no `title` field.
    MissingTitle,
}

impl RecordWarning {
    /// Get the severity of this warning
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RecordWarning::MissingYear | RecordWarning::InvalidMonth { .. } => {
                ErrorSeverity::Error
            }
            RecordWarning::MissingTitle => ErrorSeverity::Warning,
        }
    }
}

impl std::fmt::Display for RecordWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordWarning::MissingYear => write!(f, "invalid date: no year found"),
            RecordWarning::InvalidMonth { value } => {
                write!(f, "invalid month '{}': please update the entry", value)
            }
            RecordWarning::MissingTitle => write!(f, "missing title"),
        }
    }
}

/// Collects the warnings raised while converting one record.
///
/// Every warning is logged when it is added, so callers that only watch the
/// log see the same problems that are returned to programmatic callers.
#[derive(Debug, Clone, Default)]
pub struct RecordDiagnostics {
    record_id: String,
    warnings: Vec<RecordWarning>,
}

impl RecordDiagnostics {
    /// Create an empty collection for the record with the given identifier
    pub fn new(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            warnings: Vec::new(),
        }
    }

    /// Identifier of the record these diagnostics belong to
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// Log and record a warning
    pub fn add(&mut self, warning: RecordWarning) {
        match warning.severity() {
            ErrorSeverity::Error => log::error!("Entry `{}`: {}", self.record_id, warning),
            ErrorSeverity::Warning => log::warn!("Entry `{}`: {}", self.record_id, warning),
        }
        self.warnings.push(warning);
    }

    /// Recorded warnings, in the order they were raised
    pub fn warnings(&self) -> &[RecordWarning] {
        &self.warnings
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Check whether a specific warning was raised
    pub fn contains(&self, warning: &RecordWarning) -> bool {
        self.warnings.contains(warning)
    }

    /// Get total count of all warnings
    pub fn count(&self) -> usize {
        self.warnings.len()
    }

    /// Consume the collection, returning the warnings
    pub fn into_warnings(self) -> Vec<RecordWarning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_order() {
        let mut diagnostics = RecordDiagnostics::new("smith2020");
        diagnostics.add(RecordWarning::MissingTitle);
        diagnostics.add(RecordWarning::MissingYear);

        assert_eq!(diagnostics.record_id(), "smith2020");
        assert_eq!(diagnostics.count(), 2);
        assert!(diagnostics.contains(&RecordWarning::MissingYear));
        assert_eq!(
            diagnostics.into_warnings(),
            vec![RecordWarning::MissingTitle, RecordWarning::MissingYear]
        );
    }

    #[test]
    fn severity_follows_fallback_impact() {
        assert_eq!(RecordWarning::MissingYear.severity(), ErrorSeverity::Error);
        assert_eq!(
            RecordWarning::InvalidMonth {
                value: "smarch".into()
            }
            .severity(),
            ErrorSeverity::Error
        );
        assert_eq!(RecordWarning::MissingTitle.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn display_mentions_month_value() {
        let warning = RecordWarning::InvalidMonth {
            value: "smarch".into(),
        };
        assert!(warning.to_string().contains("smarch"));
    }
}
