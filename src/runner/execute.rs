use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use chrono::{SecondsFormat, Utc};

use crate::checker::{Check, CheckParams};
use crate::qajson::{ExecutionStatus, QajsonExecution, QajsonOutputs};
use crate::scan::Scan;

/// UTC time with millisecond precision, e.g. `2024-05-01T10:20:30.123Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Runs one check, turning an error or panic into a failed execution.
pub fn execute(check: &dyn Check, scan: &Scan, params: &CheckParams) -> QajsonOutputs {
    let start = timestamp();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| check.run(scan, params)));
    let end = timestamp();

    let (outputs, status, error) = match outcome {
        Ok(Ok(result)) => (QajsonOutputs::from_result(result), ExecutionStatus::Completed, None),
        Ok(Err(error)) => (QajsonOutputs::default(), ExecutionStatus::Failed, Some(error.chain())),
        Err(payload) => (
            QajsonOutputs::default(),
            ExecutionStatus::Failed,
            Some(format!("Check panicked: {}", panic_message(payload.as_ref()))),
        ),
    };
    if let Some(error) = &error {
        tracing::debug!(check = check.name(), %error, "check execution failed");
    }
    outputs.with_execution(QajsonExecution {
        start,
        end,
        status,
        error,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
