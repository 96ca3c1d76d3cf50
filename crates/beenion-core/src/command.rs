//! Command abstractions and the command handler template.

use crate::error::{DomainError, InputError};
use crate::event::DomainEvent;

/// Trait that all commands implement.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// The type name for this command (for logging/routing).
    fn command_type(&self) -> &'static str;
}

/// The pure pipeline every command runs through.
///
/// `handle` validates every input (stopping at the first violation), folds
/// the validated histories into snapshots, then decides which events to
/// emit. Projection only ever sees validated inputs.
pub trait CommandHandler {
    /// The raw command value.
    type Command: Command;
    /// Typed inputs produced by shape validation.
    type Inputs;
    /// Snapshots projected from the inputs.
    type Snapshots;
    /// The event family emitted.
    type Event: DomainEvent;

    /// Runs the shape validators in the command's fixed order.
    ///
    /// # Errors
    ///
    /// Returns the first `InputError` found.
    fn validate(&self, command: &Self::Command) -> Result<Self::Inputs, InputError>;

    /// Projects the snapshots the decision needs.
    fn project(&self, inputs: &Self::Inputs) -> Self::Snapshots;

    /// Evaluates the invariants and returns the events to emit.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` when the command is refused.
    fn decide(
        &self,
        command: &Self::Command,
        inputs: &Self::Inputs,
        snapshots: Self::Snapshots,
    ) -> Result<Vec<Self::Event>, DomainError>;

    /// Validates, projects and decides.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` before any projection runs, or the
    /// error raised by `decide`.
    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, DomainError> {
        let inputs = self.validate(command)?;
        let snapshots = self.project(&inputs);
        self.decide(command, &inputs, snapshots)
    }
}
