//! Reflector (Umkehrwalze): the fixed disk that turns the signal around.

use crate::contact::Contact;
use crate::error::Result;
use crate::wiring::WiringPermutation;

/// Fixed, stateless reflecting disk.
#[derive(Debug, Clone)]
pub struct Reflector {
    name: String,
    wiring: WiringPermutation,
}

impl Reflector {
    /// Creates a reflector from a 26-letter layout.
    ///
    /// Historical reflectors pair letters (involution) and never wire a
    /// letter to itself; other layouts are accepted but logged, since the
    /// machine then stops being self-reciprocal.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`](crate::EnigmaError::InvalidWiring)
    /// if `wiring` is not a permutation.
    pub fn new(name: &str, wiring: &str) -> Result<Self> {
        let wiring = WiringPermutation::new(wiring)?;
        if !wiring.is_involution() || wiring.has_fixed_point() {
            log::warn!(
                "reflector {} is not a fixed-point-free pairing; output will not be reciprocal",
                name
            );
        }
        Ok(Reflector {
            name: name.to_string(),
            wiring,
        })
    }

    /// Catalogue name of the reflector.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Reflector wiring.
    pub fn wiring(&self) -> &WiringPermutation {
        &self.wiring
    }

    /// Sends a signal through the reflector (single pass).
    pub fn encrypt(&self, contact: Contact) -> Contact {
        self.wiring.forward(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EnigmaError;

    const UKW_B: &str = "YRUHQSLDPXNGOKMIEBFZCWVJAT";

    #[test]
    fn test_encrypt_follows_wiring() {
        let ukw = Reflector::new("B", UKW_B).unwrap();
        assert_eq!(ukw.name(), "B");
        assert_eq!(ukw.encrypt(Contact::A), Contact::Y);
        assert_eq!(ukw.encrypt(Contact::Y), Contact::A);
    }

    #[test]
    fn test_reflection_is_involution() {
        let ukw = Reflector::new("B", UKW_B).unwrap();
        for c in Contact::ALL {
            assert_eq!(ukw.encrypt(ukw.encrypt(c)), c);
            assert_ne!(ukw.encrypt(c), c);
        }
    }

    #[test]
    fn test_invalid_wiring() {
        assert!(matches!(
            Reflector::new("bad", "YRUHQ"),
            Err(EnigmaError::InvalidWiring { .. })
        ));
    }

    #[test]
    fn test_non_reciprocal_layout_is_accepted() {
        let odd = Reflector::new("rotor-like", "EKMFLGDQVZNTOWYHXUSPAIBRCJ").unwrap();
        assert_eq!(odd.encrypt(Contact::A), Contact::E);
    }
}
