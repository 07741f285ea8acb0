use derive_more::{Display, Error};

/// Domain failures raised by page objects and navigation.
///
/// Failures of the browser or widget layer are not wrapped; they reach the
/// caller as they were reported.
#[derive(Debug, Display, Error)]
pub enum PageError {
    #[display("Resource pool {name} not found")]
    ResourcePoolNotFound { name: String },
    #[display("No navigation step '{step}' registered for {target}")]
    UnknownStep { target: String, step: String },
    #[display("Navigation step '{step}' is already registered for {target}")]
    DuplicateStep { target: String, step: String },
    #[display("Step {target}/{step} requires {prerequisite}, which is not registered")]
    MissingPrerequisite {
        target: String,
        step: String,
        prerequisite: String,
    },
    #[display("{target} has no attribute '{attribute}'")]
    UnresolvedAttribute { target: String, attribute: String },
    #[display("Navigation produced a view other than {expected}")]
    UnexpectedView { expected: String },
    #[display("Could not log in as {username}")]
    LoginFailed { username: String },
    #[display("Invalid {kind}: {reason}")]
    InvalidEntity { kind: String, reason: String },
}
