//! WiringPermutation: a bijective contact table shared by rotors and reflectors.
//!
//! The table is validated once at construction and stored in both
//! directions, so [`WiringPermutation::forward`] and
//! [`WiringPermutation::reverse`] are plain array lookups.

use crate::contact::{Contact, NUM_CONTACTS};
use crate::error::{EnigmaError, Result};

/// Identity layout used when no source ordering is given.
pub const IDENTITY_LAYOUT: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Immutable bijection over the 26 contacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WiringPermutation {
    forward: [Contact; NUM_CONTACTS],
    reverse: [Contact; NUM_CONTACTS],
}

impl WiringPermutation {
    /// Builds a permutation mapping `A..Z` to the letters of `dest_layout`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`] if the layout is not a
    /// permutation of the alphabet.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_engine::{Contact, WiringPermutation};
    ///
    /// let wiring = WiringPermutation::new("EKMFLGDQVZNTOWYHXUSPAIBRCJ").unwrap();
    /// assert_eq!(wiring.forward(Contact::A), Contact::E);
    /// assert_eq!(wiring.reverse(Contact::E), Contact::A);
    /// ```
    pub fn new(dest_layout: &str) -> Result<Self> {
        Self::with_source(dest_layout, IDENTITY_LAYOUT)
    }

    /// Builds a permutation pairing `src_layout[i]` with `dest_layout[i]`.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`] if either layout is not a
    /// permutation of the alphabet.
    pub fn with_source(dest_layout: &str, src_layout: &str) -> Result<Self> {
        let dest = parse_layout(dest_layout, "destination")?;
        let src = parse_layout(src_layout, "source")?;

        let mut forward = [Contact::A; NUM_CONTACTS];
        let mut reverse = [Contact::A; NUM_CONTACTS];
        for (&s, &d) in src.iter().zip(dest.iter()) {
            forward[s.index()] = d;
            reverse[d.index()] = s;
        }
        Ok(WiringPermutation { forward, reverse })
    }

    /// Builds the identity wiring.
    pub fn identity() -> Self {
        WiringPermutation {
            forward: Contact::ALL,
            reverse: Contact::ALL,
        }
    }

    /// Destination wired to `src`.
    pub fn forward(&self, src: Contact) -> Contact {
        self.forward[src.index()]
    }

    /// Source wired to `dest`.
    pub fn reverse(&self, dest: Contact) -> Contact {
        self.reverse[dest.index()]
    }

    /// Derives the wiring seen through a ring turned by `ring` contacts.
    ///
    /// Both ends of every wire move with the ring, so the contact that
    /// used to feed `src` now feeds `src + ring` and lands `ring` further on.
    pub fn rotated(&self, ring: i32) -> Self {
        let mut forward = [Contact::A; NUM_CONTACTS];
        let mut reverse = [Contact::A; NUM_CONTACTS];
        for src in Contact::ALL {
            let dest = self.forward(src.offset(-ring)).offset(ring);
            forward[src.index()] = dest;
            reverse[dest.index()] = src;
        }
        WiringPermutation { forward, reverse }
    }

    /// `true` if applying the wiring twice gives the identity.
    pub fn is_involution(&self) -> bool {
        Contact::ALL.iter().all(|&c| self.forward(self.forward(c)) == c)
    }

    /// `true` if some contact is wired to itself.
    pub fn has_fixed_point(&self) -> bool {
        Contact::ALL.iter().any(|&c| self.forward(c) == c)
    }

    /// Destination letters in source order `A..Z`.
    pub fn layout(&self) -> String {
        self.forward.iter().map(|c| c.to_char()).collect()
    }
}

/// Parses a 26-letter layout, rejecting wrong lengths, non-letters and
/// repeated letters.
fn parse_layout(layout: &str, side: &str) -> Result<[Contact; NUM_CONTACTS]> {
    let len = layout.chars().count();
    if len != NUM_CONTACTS {
        return Err(EnigmaError::wiring(format!(
            "{} layout has {} letters, expected {}",
            side, len, NUM_CONTACTS
        )));
    }

    let mut contacts = [Contact::A; NUM_CONTACTS];
    let mut seen = [false; NUM_CONTACTS];
    for (slot, letter) in contacts.iter_mut().zip(layout.chars()) {
        let contact = Contact::from_char(letter).map_err(|_| {
            EnigmaError::wiring(format!("{} layout contains '{}'", side, letter))
        })?;
        if seen[contact.index()] {
            return Err(EnigmaError::wiring(format!(
                "{} layout repeats '{}'",
                side, contact
            )));
        }
        seen[contact.index()] = true;
        *slot = contact;
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTOR_I: &str = "EKMFLGDQVZNTOWYHXUSPAIBRCJ";
    const UKW_B: &str = "YRUHQSLDPXNGOKMIEBFZCWVJAT";

    #[test]
    fn test_forward_follows_layout() {
        let wiring = WiringPermutation::new(ROTOR_I).unwrap();
        assert_eq!(wiring.forward(Contact::A), Contact::E);
        assert_eq!(wiring.forward(Contact::B), Contact::K);
        assert_eq!(wiring.forward(Contact::Z), Contact::J);
        assert_eq!(wiring.layout(), ROTOR_I);
    }

    #[test]
    fn test_reverse_inverts_forward() {
        let wiring = WiringPermutation::new(ROTOR_I).unwrap();
        for c in Contact::ALL {
            assert_eq!(wiring.reverse(wiring.forward(c)), c);
            assert_eq!(wiring.forward(wiring.reverse(c)), c);
        }
    }

    #[test]
    fn test_source_layout() {
        // QWERTZ keyboard order feeding an identity destination.
        let wiring =
            WiringPermutation::with_source(IDENTITY_LAYOUT, "QWERTZUIOASDFGHJKPYXCVBNML").unwrap();
        assert_eq!(wiring.forward(Contact::Q), Contact::A);
        assert_eq!(wiring.forward(Contact::W), Contact::B);
        assert_eq!(wiring.reverse(Contact::A), Contact::Q);
        for c in Contact::ALL {
            assert_eq!(wiring.reverse(wiring.forward(c)), c);
        }
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(matches!(
            WiringPermutation::new("ABC"),
            Err(EnigmaError::InvalidWiring { .. })
        ));
        assert!(matches!(
            WiringPermutation::new(&format!("{}A", IDENTITY_LAYOUT)),
            Err(EnigmaError::InvalidWiring { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = WiringPermutation::new("AACDEFGHIJKLMNOPQRSTUVWXYZ").unwrap_err();
        assert_eq!(err, EnigmaError::wiring("destination layout repeats 'A'"));
        assert!(WiringPermutation::with_source(ROTOR_I, "ABCDEFGHIJKLMNOPQRSTUVWXYY").is_err());
    }

    #[test]
    fn test_rejects_non_letters() {
        assert!(WiringPermutation::new("ABCDEFGHIJKLMNOPQRSTUVWXY1").is_err());
    }

    #[test]
    fn test_lowercase_accepted() {
        let lower = WiringPermutation::new(&ROTOR_I.to_lowercase()).unwrap();
        assert_eq!(lower, WiringPermutation::new(ROTOR_I).unwrap());
    }

    #[test]
    fn test_rotated_zero_is_same() {
        let wiring = WiringPermutation::new(ROTOR_I).unwrap();
        assert_eq!(wiring.rotated(0), wiring);
        assert_eq!(wiring.rotated(26), wiring);
    }

    #[test]
    fn test_rotated_by_one() {
        // Ring B on rotor I: A enters the wire that used to start at Z
        // (Z -> J) and leaves one further on, at K.
        let wiring = WiringPermutation::new(ROTOR_I).unwrap().rotated(1);
        assert_eq!(wiring.forward(Contact::A), Contact::K);
        assert_eq!(wiring.forward(Contact::B), Contact::F);
        for c in Contact::ALL {
            assert_eq!(wiring.reverse(wiring.forward(c)), c);
        }
    }

    #[test]
    fn test_reflector_properties() {
        let ukw = WiringPermutation::new(UKW_B).unwrap();
        assert!(ukw.is_involution());
        assert!(!ukw.has_fixed_point());
        let rotor = WiringPermutation::new(ROTOR_I).unwrap();
        assert!(!rotor.is_involution());
        assert!(WiringPermutation::identity().has_fixed_point());
    }
}
