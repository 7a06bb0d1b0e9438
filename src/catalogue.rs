//! Static catalogue of rotor/reflector wirings and machine models.
//!
//! Notch letters are the letters engraved beside the notch on the ring
//! (see [`NOTCH_TO_WINDOW`](crate::rotor::NOTCH_TO_WINDOW) for how they
//! relate to the window letter at turnover).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EnigmaError, Result};

/// Catalogue entry for a rotor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotorSpec {
    pub name: &'static str,
    pub wiring: &'static str,
    pub notches: &'static str,
}

/// Catalogue entry for a reflector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectorSpec {
    pub name: &'static str,
    pub wiring: &'static str,
}

/// Every rotor known to the engine.
pub const ROTORS: [RotorSpec; 10] = [
    RotorSpec { name: "I", wiring: "EKMFLGDQVZNTOWYHXUSPAIBRCJ", notches: "Y" },
    RotorSpec { name: "II", wiring: "AJDKSIRUXBLHWTMCQGZNPYFVOE", notches: "M" },
    RotorSpec { name: "III", wiring: "BDFHJLCPRTXVZNYEIWGAKMUSQO", notches: "D" },
    RotorSpec { name: "IV", wiring: "ESOVPZJAYQUIRHXLNFTGKDCMWB", notches: "R" },
    RotorSpec { name: "V", wiring: "VZBRGITYUPSDNHLXAWMJQOFECK", notches: "H" },
    RotorSpec { name: "VI", wiring: "JPGVOUMFYQBENHZRDKASXLICTW", notches: "HU" },
    RotorSpec { name: "VII", wiring: "NZJHGRCXMYSWBOUFAIVLPEKQDT", notches: "HU" },
    RotorSpec { name: "VIII", wiring: "FKQHTLXOCBJSPDZRAMEWNIUYGV", notches: "HU" },
    RotorSpec { name: "Beta", wiring: "LEYJVCNIXWPBQMDRTAKZGFUHOS", notches: "" },
    RotorSpec { name: "Gamma", wiring: "FSOKANUERHMBTIYCWLQPZXVGJD", notches: "" },
];

/// Every reflector known to the engine.
pub const REFLECTORS: [ReflectorSpec; 5] = [
    ReflectorSpec { name: "A", wiring: "EJMZALYXVBWFCRQUONTSPIKHGD" },
    ReflectorSpec { name: "B", wiring: "YRUHQSLDPXNGOKMIEBFZCWVJAT" },
    ReflectorSpec { name: "C", wiring: "FVPJIAOYEDRZXWGCTKUQSBNMHL" },
    ReflectorSpec { name: "B-thin", wiring: "ENKQAUYWJICOPBLMDXZVFTHRGS" },
    ReflectorSpec { name: "C-thin", wiring: "RDOBJNTKVEHMLFCWZAXGYIPSUQ" },
];

/// Looks up a rotor by name.
pub fn rotor(name: &str) -> Option<&'static RotorSpec> {
    ROTORS.iter().find(|r| r.name == name)
}

/// Looks up a reflector by name, with or without a `UKW-` prefix.
pub fn reflector(name: &str) -> Option<&'static ReflectorSpec> {
    let bare = reflector_key(name);
    REFLECTORS.iter().find(|r| r.name == bare)
}

fn reflector_key(name: &str) -> &str {
    name.strip_prefix("UKW-").unwrap_or(name)
}

/// Fixed properties of a machine model, read only at configuration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub long_name: &'static str,
    pub short_name: &'static str,
    /// Rotors sitting between the entry wheel and the reflector.
    pub rotor_count: usize,
    /// How many of the rightmost rotors are driven by the stepping pawls.
    pub stepping_rotors: usize,
    pub has_plugboard: bool,
    pub rotors: &'static [&'static str],
    pub reflectors: &'static [&'static str],
}

impl ModelDescriptor {
    /// `true` if `name` may be fitted to this model.
    pub fn allows_rotor(&self, name: &str) -> bool {
        self.rotors.contains(&name)
    }

    /// `true` if the reflector `name` (optionally `UKW-` prefixed) may be fitted.
    pub fn allows_reflector(&self, name: &str) -> bool {
        self.reflectors.contains(&reflector_key(name))
    }
}

const ROTORS_I_TO_V: [&str; 5] = ["I", "II", "III", "IV", "V"];
const ROTORS_I_TO_VIII: [&str; 8] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII"];
const ROTORS_M4: [&str; 10] = [
    "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "Beta", "Gamma",
];

/// Enigma I (Wehrmacht / Luftwaffe).
pub const ENIGMA_1: ModelDescriptor = ModelDescriptor {
    long_name: "Enigma Model 1",
    short_name: "Enigma1",
    rotor_count: 3,
    stepping_rotors: 3,
    has_plugboard: true,
    rotors: &ROTORS_I_TO_V,
    reflectors: &["A", "B", "C"],
};

/// Enigma M3 (Kriegsmarine, three rotors).
pub const ENIGMA_M3: ModelDescriptor = ModelDescriptor {
    long_name: "Enigma Model M3",
    short_name: "M3",
    rotor_count: 3,
    stepping_rotors: 3,
    has_plugboard: true,
    rotors: &ROTORS_I_TO_VIII,
    reflectors: &["B", "C"],
};

/// Enigma M4 (U-boat, four rotors; the leftmost never steps).
pub const ENIGMA_M4: ModelDescriptor = ModelDescriptor {
    long_name: "German Navy 4-rotor M4 Enigma",
    short_name: "M4",
    rotor_count: 4,
    stepping_rotors: 3,
    has_plugboard: true,
    rotors: &ROTORS_M4,
    reflectors: &["B-thin", "C-thin"],
};

/// Machine models with a built-in descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MachineModel {
    Enigma1,
    M3,
    M4,
}

impl MachineModel {
    /// All built-in models.
    pub const ALL: [MachineModel; 3] = [MachineModel::Enigma1, MachineModel::M3, MachineModel::M4];

    /// Descriptor of the model.
    pub fn descriptor(self) -> &'static ModelDescriptor {
        match self {
            MachineModel::Enigma1 => &ENIGMA_1,
            MachineModel::M3 => &ENIGMA_M3,
            MachineModel::M4 => &ENIGMA_M4,
        }
    }
}

impl fmt::Display for MachineModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.descriptor().short_name)
    }
}

impl FromStr for MachineModel {
    type Err = EnigmaError;

    fn from_str(value: &str) -> Result<Self> {
        MachineModel::ALL
            .into_iter()
            .find(|m| m.descriptor().short_name.eq_ignore_ascii_case(value))
            .ok_or_else(|| EnigmaError::settings(format!("unknown machine model '{}'", value)))
    }
}
