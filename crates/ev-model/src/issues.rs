use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// Pipeline stage that reported an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Load,
    Merge,
    Impute,
    Split,
    Enrich,
    Output,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Load => "load",
            PipelineStage::Merge => "merge",
            PipelineStage::Impute => "impute",
            PipelineStage::Split => "split",
            PipelineStage::Enrich => "enrich",
            PipelineStage::Output => "output",
        };
        f.write_str(name)
    }
}

/// Data-quality condition that degrades the output without aborting the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A source lacks a column a stage depends on.
    SchemaMissing,
    /// Cells that could not be coerced to a number.
    UnparseableNumeric,
    /// A proportional allocation or year split divided by zero.
    ZeroDenominator,
    /// Known per-state values already exceed the national total.
    NegativeRemainder,
    /// A per-state row without a state/UT name.
    MissingStateName,
}

impl IssueKind {
    pub fn code(self) -> &'static str {
        match self {
            IssueKind::SchemaMissing => "EV001",
            IssueKind::UnparseableNumeric => "EV002",
            IssueKind::ZeroDenominator => "EV003",
            IssueKind::NegativeRemainder => "EV004",
            IssueKind::MissingStateName => "EV005",
        }
    }

    pub fn default_severity(self) -> IssueSeverity {
        match self {
            IssueKind::ZeroDenominator => IssueSeverity::Error,
            IssueKind::SchemaMissing
            | IssueKind::UnparseableNumeric
            | IssueKind::NegativeRemainder
            | IssueKind::MissingStateName => IssueSeverity::Warning,
        }
    }
}

/// An issue found while building the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataIssue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    pub stage: PipelineStage,
    /// Human-readable message describing the issue.
    pub message: String,
    /// State/UT the issue concerns (if applicable).
    pub state: Option<String>,
    /// Column or source the issue concerns (if applicable).
    pub column: Option<String>,
    /// Count of occurrences.
    pub count: Option<u64>,
}

impl DataIssue {
    pub fn new(kind: IssueKind, stage: PipelineStage, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            stage,
            message: message.into(),
            state: None,
            column: None,
            count: None,
        }
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = Some(count);
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

/// Issues collected over a whole run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QualityReport {
    pub issues: Vec<DataIssue>,
}

impl QualityReport {
    pub fn extend(&mut self, issues: impl IntoIterator<Item = DataIssue>) {
        self.issues.extend(issues);
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == IssueSeverity::Warning)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
