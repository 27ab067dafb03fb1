use std::fmt;

use serde::Serialize;

use crate::types::DbId;
use crate::validation::ValidationErrors;

/// Stable reason codes for business rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleCode {
    AssetNotAvailable,
    AssetRetired,
    ActiveAssignmentsExist,
    EmployeeInactive,
    AssignmentNotActive,
    ReturnBeforeAssignment,
    InvalidInitialStatus,
    ServiceNotScheduled,
    ServiceAlreadyCompleted,
    CompletionBeforeServiceDate,
    InsufficientStock,
    StockAboveMaximum,
    ConsumptionNotPending,
    ConsumptionNotApproved,
    RequestNotPending,
    RequestNotApproved,
    RequestClosed,
    CannotApproveOwnRequest,
}

impl RuleCode {
    /// Wire representation, e.g. `"ASSET_NOT_AVAILABLE"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AssetNotAvailable => "ASSET_NOT_AVAILABLE",
            Self::AssetRetired => "ASSET_RETIRED",
            Self::ActiveAssignmentsExist => "ACTIVE_ASSIGNMENTS_EXIST",
            Self::EmployeeInactive => "EMPLOYEE_INACTIVE",
            Self::AssignmentNotActive => "ASSIGNMENT_NOT_ACTIVE",
            Self::ReturnBeforeAssignment => "RETURN_BEFORE_ASSIGNMENT",
            Self::InvalidInitialStatus => "INVALID_INITIAL_STATUS",
            Self::ServiceNotScheduled => "SERVICE_NOT_SCHEDULED",
            Self::ServiceAlreadyCompleted => "SERVICE_ALREADY_COMPLETED",
            Self::CompletionBeforeServiceDate => "COMPLETION_BEFORE_SERVICE_DATE",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",
            Self::StockAboveMaximum => "STOCK_ABOVE_MAXIMUM",
            Self::ConsumptionNotPending => "CONSUMPTION_NOT_PENDING",
            Self::ConsumptionNotApproved => "CONSUMPTION_NOT_APPROVED",
            Self::RequestNotPending => "REQUEST_NOT_PENDING",
            Self::RequestNotApproved => "REQUEST_NOT_APPROVED",
            Self::RequestClosed => "REQUEST_CLOSED",
            Self::CannotApproveOwnRequest => "CANNOT_APPROVE_OWN_REQUEST",
        }
    }

    /// Default human-readable reason.
    pub fn message(self) -> &'static str {
        match self {
            Self::AssetNotAvailable => "Asset is not available for assignment",
            Self::AssetRetired => "Asset is retired",
            Self::ActiveAssignmentsExist => "Cannot dispose asset with active assignments",
            Self::EmployeeInactive => "Employee is not active",
            Self::AssignmentNotActive => "Assignment is not active",
            Self::ReturnBeforeAssignment => "Return date cannot be before assigned date",
            Self::InvalidInitialStatus => "New records must start in their initial status",
            Self::ServiceNotScheduled => "Only scheduled services can be started",
            Self::ServiceAlreadyCompleted => "Service is already completed",
            Self::CompletionBeforeServiceDate => "Completion date cannot be before service date",
            Self::InsufficientStock => "Insufficient stock available",
            Self::StockAboveMaximum => "Quantity exceeds maximum stock level",
            Self::ConsumptionNotPending => "Only pending consumptions can be approved",
            Self::ConsumptionNotApproved => "Only approved consumptions can be completed",
            Self::RequestNotPending => "Only pending requests can be approved",
            Self::RequestNotApproved => "Only approved requests can be completed",
            Self::RequestClosed => "Request is already closed",
            Self::CannotApproveOwnRequest => "Cannot approve own request",
        }
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A transition that is currently illegal given persisted state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct RuleViolation {
    pub code: RuleCode,
    pub message: String,
}

impl RuleViolation {
    pub fn new(code: RuleCode) -> Self {
        Self {
            code,
            message: code.message().to_string(),
        }
    }

    /// Same code, a more specific message.
    pub fn with_message(code: RuleCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Opaque infrastructure failure raised by a Data Access implementation.
///
/// Passed through untouched and never retried by the core.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Storage lock poisoned")]
    Poisoned,

    #[error("Storage failure: {0}")]
    Backend(String),
}

/// Failure of a business rule operation.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("Business rule violated: {0}")]
    Violation(#[from] RuleViolation),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl RuleError {
    pub fn violation(code: RuleCode) -> Self {
        Self::Violation(RuleViolation::new(code))
    }

    pub fn not_found(entity: &'static str, id: DbId) -> Self {
        Self::NotFound { entity, id }
    }

    /// The rule code, when this is a violation.
    pub fn code(&self) -> Option<RuleCode> {
        match self {
            Self::Violation(v) => Some(v.code),
            _ => None,
        }
    }
}

/// Every failure the core can report, each kind kept distinct.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Business rule violated: {0}")]
    BusinessRule(RuleViolation),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error(transparent)]
    Storage(StoreError),
}

impl From<RuleError> for CoreError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::Violation(v) => Self::BusinessRule(v),
            RuleError::NotFound { entity, id } => Self::NotFound { entity, id },
            RuleError::Storage(e) => Self::Storage(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn rule_code_serializes_as_screaming_snake() {
        let json = serde_json::to_value(RuleCode::CannotApproveOwnRequest).unwrap();
        assert_eq!(json, serde_json::json!("CANNOT_APPROVE_OWN_REQUEST"));
        assert_eq!(RuleCode::CannotApproveOwnRequest.as_str(), "CANNOT_APPROVE_OWN_REQUEST");
    }

    #[test]
    fn violation_uses_default_message() {
        let v = RuleViolation::new(RuleCode::InsufficientStock);
        assert_eq!(v.message, "Insufficient stock available");
        assert_eq!(v.to_string(), "INSUFFICIENT_STOCK: Insufficient stock available");
    }

    #[test]
    fn rule_error_maps_to_distinct_core_kinds() {
        let err: CoreError = RuleError::violation(RuleCode::AssetRetired).into();
        assert_matches!(err, CoreError::BusinessRule(v) if v.code == RuleCode::AssetRetired);

        let err: CoreError = RuleError::not_found("Asset", 9).into();
        assert_matches!(err, CoreError::NotFound { entity: "Asset", id: 9 });

        let err: CoreError = RuleError::Storage(StoreError::Poisoned).into();
        assert_matches!(err, CoreError::Storage(StoreError::Poisoned));
    }

    #[test]
    fn code_is_only_reported_for_violations() {
        assert_eq!(
            RuleError::violation(RuleCode::RequestClosed).code(),
            Some(RuleCode::RequestClosed)
        );
        assert_eq!(RuleError::not_found("Employee", 1).code(), None);
    }
}
