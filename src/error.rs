//! Error types for the enigma engine.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EnigmaError>;

/// Errors produced by the enigma engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnigmaError {
    /// A wiring table is not a permutation of the 26-letter alphabet.
    #[error("invalid wiring: {reason}")]
    InvalidWiring { reason: String },
    /// The rotor list does not match the model's rotor count.
    #[error("invalid number of rotors: model needs {expected}, got {actual}")]
    WrongRotorCount { expected: usize, actual: usize },
    /// A rotor name is not available for the model.
    #[error("unknown rotor '{name}'")]
    UnknownRotor { name: String },
    /// A reflector name is not available for the model.
    #[error("unknown reflector '{name}'")]
    UnknownReflector { name: String },
    /// A plugboard pairing conflicts with the existing pairs.
    #[error("invalid plug: {reason}")]
    InvalidPlug { reason: String },
    /// A rotor slot outside `1..=rotor_count` was addressed.
    #[error("invalid rotor slot {slot}: machine has {rotor_count} rotors")]
    InvalidRotorSlot { slot: usize, rotor_count: usize },
    /// The machine has not been configured yet.
    #[error("machine is not configured")]
    NotConfigured,
    /// `configure` was called on an already configured machine.
    #[error("machine is already configured")]
    AlreadyConfigured,
    /// A character outside A-Z was supplied.
    #[error("'{letter}' is not a letter of the machine alphabet")]
    InvalidLetter { letter: char },
    /// A key sheet could not be parsed or is inconsistent.
    #[error("invalid settings: {reason}")]
    InvalidSettings { reason: String },
}

impl EnigmaError {
    pub(crate) fn wiring(reason: impl Into<String>) -> Self {
        EnigmaError::InvalidWiring {
            reason: reason.into(),
        }
    }

    pub(crate) fn plug(reason: impl Into<String>) -> Self {
        EnigmaError::InvalidPlug {
            reason: reason.into(),
        }
    }

    pub(crate) fn settings(reason: impl Into<String>) -> Self {
        EnigmaError::InvalidSettings {
            reason: reason.into(),
        }
    }

    /// Returns `true` for configuration errors the caller can fix and retry.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            EnigmaError::WrongRotorCount { .. }
                | EnigmaError::UnknownRotor { .. }
                | EnigmaError::UnknownReflector { .. }
        )
    }
}
