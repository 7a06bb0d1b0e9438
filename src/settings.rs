//! Key sheet: a serializable description of a complete machine setup.
//!
//! A key sheet names the model, the rotor order, the reflector, ring
//! settings, start positions and plugboard cables, and builds a ready
//! [`SignalPath`] from them.
//!
//! ```json
//! {
//!   "model": "Enigma1",
//!   "rotors": ["I", "II", "III"],
//!   "reflector": "B",
//!   "rings": "AAA",
//!   "positions": "AAA",
//!   "plugs": ["AB", "CD"]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::catalogue::MachineModel;
use crate::contact::{parse_letters, Contact};
use crate::error::{EnigmaError, Result};
use crate::plugboard::{parse_pair, Plugboard};
use crate::signal_path::SignalPath;
use crate::trace::SignalTracer;

/// Complete daily setup of one machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MachineSettings {
    pub model: MachineModel,
    /// Rotor names, left to right.
    pub rotors: Vec<String>,
    pub reflector: String,
    /// One letter per rotor; all `A` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rings: Option<String>,
    /// One letter per rotor; all `A` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<String>,
    /// Two-letter cable pairs.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugs: Vec<String>,
}

impl MachineSettings {
    /// Settings with rings and positions at `A` and no cables.
    pub fn new(model: MachineModel, rotors: &[&str], reflector: &str) -> Self {
        MachineSettings {
            model,
            rotors: rotors.iter().map(|r| r.to_string()).collect(),
            reflector: reflector.to_string(),
            rings: None,
            positions: None,
            plugs: Vec::new(),
        }
    }

    /// Parses a JSON key sheet.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSettings`] if the JSON is malformed or
    /// does not match the key sheet shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_engine::MachineSettings;
    ///
    /// let sheet = r#"{"model": "M3", "rotors": ["I", "II", "III"], "reflector": "B"}"#;
    /// let mut machine = MachineSettings::from_json(sheet).unwrap().build().unwrap();
    /// assert_eq!(machine.encrypt_text("AAAAA").unwrap(), "BDZGO");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| EnigmaError::settings(e.to_string()))
    }

    /// Serializes the key sheet as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSettings`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| EnigmaError::settings(e.to_string()))
    }

    /// Builds a machine tracing through the `log` facade.
    ///
    /// # Errors
    /// See [`MachineSettings::apply`].
    pub fn build(&self) -> Result<SignalPath> {
        let mut path = SignalPath::new();
        self.apply(&mut path)?;
        Ok(path)
    }

    /// Configures an unconfigured machine and applies rings, positions
    /// and cables.
    ///
    /// # Errors
    /// Configuration errors as in [`SignalPath::configure`];
    /// [`EnigmaError::InvalidSettings`] if rings or positions have the
    /// wrong length or contain non-letters; [`EnigmaError::InvalidPlug`]
    /// for a bad cable.
    ///
    /// Everything is validated before the machine is configured, so on
    /// error `path` is left unconfigured and may be retried.
    pub fn apply<T: SignalTracer>(&self, path: &mut SignalPath<T>) -> Result<()> {
        let descriptor = self.model.descriptor();
        let rings = self.letters("rings", self.rings.as_deref())?;
        let positions = self.letters("positions", self.positions.as_deref())?;
        let board = self.plugboard()?;
        if board.pair_count() > 0 && !descriptor.has_plugboard {
            return Err(EnigmaError::plug(format!(
                "{} has no plugboard",
                descriptor.short_name
            )));
        }

        path.configure(descriptor, self.rotors.as_slice(), &self.reflector)?;
        // Rotor count matched the descriptor, so every slot below exists.
        for (i, (&ring, &position)) in rings.iter().zip(positions.iter()).enumerate() {
            path.set_ring_setting(i + 1, ring)?;
            path.set_rotor_position(i + 1, position)?;
        }
        if let Some(fitted) = path.plugboard_mut() {
            *fitted = board;
        }
        Ok(())
    }

    /// Cables the key sheet's pairs into a fresh plugboard.
    fn plugboard(&self) -> Result<Plugboard> {
        let mut board = Plugboard::new();
        for pair in &self.plugs {
            let (src, dest) = parse_pair(pair)?;
            board.set_plug(src, dest)?;
        }
        Ok(board)
    }

    /// Parses a per-rotor letter string, defaulting to all `A`.
    fn letters(&self, field: &str, value: Option<&str>) -> Result<Vec<Contact>> {
        let count = self.model.descriptor().rotor_count;
        let Some(value) = value else {
            return Ok(vec![Contact::A; count]);
        };
        let letters = parse_letters(value)
            .map_err(|e| EnigmaError::settings(format!("{}: {}", field, e)))?;
        if letters.len() != count {
            return Err(EnigmaError::settings(format!(
                "{} needs {} letters, got '{}'",
                field, count, value
            )));
        }
        Ok(letters)
    }
}
