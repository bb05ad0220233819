//! Failure handling shared by the screen services.
//!
//! Every rejected form and every failed gateway call passes through here
//! exactly once: it is logged, turned into one notification, and handed back
//! to the caller as a domain [`DomainError`].

use tracing::{debug, error, warn};

use super::error::{DomainError, ErrorCode};
use super::forms::FormError;
use super::ports::{GatewayError, Notification, Notifier};
use super::totals::{AggregateTotals, TotalsInconsistency};

pub(crate) fn map_gateway_error(error: GatewayError) -> DomainError {
    let retryable = error.is_retryable();
    let message = error.to_string();
    match error {
        _ if retryable => DomainError::service_unavailable(message),
        GatewayError::NotFound { .. } => DomainError::not_found(message),
        GatewayError::Rejected { .. } | GatewayError::InvalidRequest { .. } => {
            DomainError::invalid_request(message)
        }
        _ => DomainError::internal(message),
    }
}

/// Log, notify and convert a gateway failure.
pub(crate) fn surface_gateway_failure<N>(
    notifier: &N,
    operation: &'static str,
    failure: GatewayError,
) -> DomainError
where
    N: Notifier + ?Sized,
{
    let mapped = map_gateway_error(failure);
    match mapped.code() {
        ErrorCode::ServiceUnavailable => {
            warn!(operation, error = %mapped, "gateway call failed; retry may succeed");
        }
        ErrorCode::InternalError => {
            error!(operation, error = %mapped, "gateway returned an unusable response");
        }
        code => debug!(operation, ?code, error = %mapped, "gateway refused the call"),
    }
    notifier.notify(Notification::Failure {
        message: format!("could not {operation}: {}", mapped.message()),
        retryable: mapped.is_retryable(),
    });
    mapped
}

/// Notify and convert a rejected form.
pub(crate) fn reject_form<N>(notifier: &N, failure: FormError) -> DomainError
where
    N: Notifier + ?Sized,
{
    let mapped = failure.into_domain();
    notifier.notify(Notification::Validation {
        message: mapped.message().to_owned(),
    });
    mapped
}

/// Warn about totals that break their arithmetic invariants.
pub(crate) fn audit_totals(totals: &AggregateTotals) {
    for inconsistency in totals.inconsistencies() {
        match inconsistency {
            TotalsInconsistency::PersonBalance {
                person_id,
                expected,
                actual,
            } => warn!(%person_id, expected, actual, "gateway person balance is not income minus expense"),
            TotalsInconsistency::OverallBalance { expected, actual } => {
                warn!(expected, actual, "gateway overall balance is not income minus expense");
            }
            TotalsInconsistency::OverallSum {
                field,
                expected,
                actual,
            } => warn!(field, expected, actual, "gateway overall total differs from sum over people"),
        }
    }
}
