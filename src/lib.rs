//! Signal-path engine for electromechanical rotor cipher machines.
//!
//! Emulates the wiring and stepping of Enigma-family machines: a stack of
//! wired, rotating disks between an optional plugboard and a fixed
//! reflector. Each key press first steps the rotors (including the
//! historical double step of the middle rotor) and then sends the signal
//! through the stack, off the reflector and back out.
//!
//! # Architecture
//!
//! ```text
//! WiringPermutation  (bijective contact table, forward + reverse lookups)
//!     ↳ Rotor        (wiring + ring setting + window position + notches)
//!     ↳ Reflector    (wiring, single pass)
//! Plugboard          (symmetric swaps, identity for unpaired contacts)
//! SignalPath         (orchestrator: stepping, then plugboard → rotors → reflector → rotors → plugboard)
//! ```
//!
//! # Examples
//!
//! Encrypt with the Enigma I, rotors I-II-III, reflector B:
//!
//! ```
//! use enigma_engine::{MachineModel, SignalPath};
//!
//! let mut machine = SignalPath::for_model(MachineModel::Enigma1, &["I", "II", "III"], "B").unwrap();
//! assert_eq!(machine.encrypt_text("AAAAA").unwrap(), "BDZGO");
//!
//! // The machine is self-reciprocal: back at the start, the ciphertext decrypts.
//! machine.reset();
//! assert_eq!(machine.encrypt_text("BDZGO").unwrap(), "AAAAA");
//! ```
//!
//! Ring settings, start positions and plugboard cables:
//!
//! ```
//! use enigma_engine::{Contact, MachineModel, SignalPath};
//!
//! let mut machine = SignalPath::for_model(MachineModel::Enigma1, &["I", "II", "III"], "B").unwrap();
//! for slot in 1..=3 {
//!     machine.set_ring_setting(slot, Contact::B).unwrap();
//! }
//! machine.set_rotor_position(3, Contact::A).unwrap();
//! machine.set_plug(Contact::Q, Contact::Z).unwrap();
//! let cipher = machine.encrypt_text("HELLO").unwrap();
//! machine.reset();
//! assert_eq!(machine.encrypt_text(&cipher).unwrap(), "HELLO");
//! ```

#![deny(clippy::all)]

pub mod catalogue;
pub mod contact;
pub mod error;
pub mod plugboard;
pub mod reflector;
pub mod rotor;
pub mod settings;
mod signal_path;
pub mod trace;
pub mod wiring;

pub use catalogue::{MachineModel, ModelDescriptor};
pub use contact::Contact;
pub use error::{EnigmaError, Result};
pub use plugboard::Plugboard;
pub use reflector::Reflector;
pub use rotor::Rotor;
pub use settings::MachineSettings;
pub use signal_path::SignalPath;
pub use trace::{LogTracer, NullTracer, RecordingTracer, SignalTracer, Stage};
pub use wiring::WiringPermutation;
