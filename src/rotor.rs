//! Rotor: a wired disk with ring setting, window position and turnover notches.
//!
//! A rotor is traversed twice per key press: right-to-left through
//! [`Rotor::encrypt_forward`] and, after the reflector, left-to-right
//! through [`Rotor::encrypt_reverse`]. Each pass shifts the incoming
//! contact into the rotor's frame by the window position, looks it up in
//! the effective wiring (static wiring turned by the ring setting) and
//! shifts the result back.

use crate::contact::{parse_letters, Contact};
use crate::error::{EnigmaError, Result};
use crate::wiring::WiringPermutation;

/// Distance, in contacts, between the letter engraved next to a notch and
/// the letter shown in the window when that notch meets the stepping pawl.
pub const NOTCH_TO_WINDOW: i32 = 8;

/// A single rotor (Walze).
#[derive(Debug, Clone)]
pub struct Rotor {
    name: String,
    wiring: WiringPermutation,
    effective: WiringPermutation,
    notches: Vec<Contact>,
    turnovers: Vec<Contact>,
    ring_setting: Contact,
    position: Contact,
    start_position: Contact,
}

impl Rotor {
    /// Creates a rotor at window position `A` with ring setting `A`.
    ///
    /// # Parameters
    /// - `name`: Catalogue name of the rotor (e.g. `"III"`).
    /// - `wiring`: 26-letter destination layout for inputs `A..Z`.
    /// - `notches`: Letters engraved beside the turnover notches; may be
    ///   empty for rotors that never drive a neighbour.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`] if `wiring` is not a
    /// permutation or `notches` contains a non-letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_engine::{Contact, Rotor};
    ///
    /// let rotor = Rotor::new("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Y").unwrap();
    /// assert_eq!(rotor.encrypt_forward(Contact::A), Contact::E);
    /// ```
    pub fn new(name: &str, wiring: &str, notches: &str) -> Result<Self> {
        Self::with_position(name, wiring, notches, Contact::A)
    }

    /// Creates a rotor at the given window position.
    ///
    /// # Errors
    /// Same as [`Rotor::new`].
    pub fn with_position(
        name: &str,
        wiring: &str,
        notches: &str,
        position: Contact,
    ) -> Result<Self> {
        let notches = parse_letters(notches).map_err(|_| {
            EnigmaError::wiring(format!("rotor {} has invalid notches '{}'", name, notches))
        })?;
        Self::from_notches(name, wiring, notches, position)
    }

    /// Creates a rotor at window position `A` from the window letters at
    /// which it turns its left neighbour over (e.g. `"Q"` for rotor I).
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidWiring`] if `wiring` is not a
    /// permutation or `turnovers` contains a non-letter.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_engine::{Contact, Rotor};
    ///
    /// let rotor = Rotor::with_turnovers("I", "EKMFLGDQVZNTOWYHXUSPAIBRCJ", "Q").unwrap();
    /// assert_eq!(rotor.notches(), &[Contact::Y]);
    /// ```
    pub fn with_turnovers(name: &str, wiring: &str, turnovers: &str) -> Result<Self> {
        let notches = parse_letters(turnovers)
            .map_err(|_| {
                EnigmaError::wiring(format!(
                    "rotor {} has invalid turnovers '{}'",
                    name, turnovers
                ))
            })?
            .into_iter()
            .map(|t| t.offset(NOTCH_TO_WINDOW))
            .collect();
        Self::from_notches(name, wiring, notches, Contact::A)
    }

    fn from_notches(
        name: &str,
        wiring: &str,
        notches: Vec<Contact>,
        position: Contact,
    ) -> Result<Self> {
        let wiring = WiringPermutation::new(wiring)?;
        let turnovers = notches
            .iter()
            .map(|n| n.offset(-NOTCH_TO_WINDOW))
            .collect();

        Ok(Rotor {
            name: name.to_string(),
            effective: wiring.clone(),
            wiring,
            notches,
            turnovers,
            ring_setting: Contact::A,
            position,
            start_position: position,
        })
    }

    /// Catalogue name of the rotor.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Static wiring with the ring at `A`.
    pub fn wiring(&self) -> &WiringPermutation {
        &self.wiring
    }

    /// Notch letters as engraved on the ring.
    pub fn notches(&self) -> &[Contact] {
        &self.notches
    }

    /// Window letters at which a notch engages the pawl to the left.
    pub fn turnovers(&self) -> &[Contact] {
        &self.turnovers
    }

    /// Current window position.
    pub fn position(&self) -> Contact {
        self.position
    }

    /// Sets the window position; it also becomes the position restored by
    /// [`Rotor::reset`].
    pub fn set_position(&mut self, position: Contact) {
        self.position = position;
        self.start_position = position;
    }

    /// Current ring setting (Ringstellung).
    pub fn ring_setting(&self) -> Contact {
        self.ring_setting
    }

    /// Sets the ring setting and re-derives the effective wiring.
    ///
    /// The notch set is untouched: notches sit on the letter ring, so the
    /// window letter at which they engage does not depend on the ring.
    pub fn set_ring_setting(&mut self, ring: Contact) {
        self.ring_setting = ring;
        self.effective = self.wiring.rotated(ring.index() as i32);
    }

    /// Advances the rotor one contact, wrapping `Z` to `A`.
    pub fn step(&mut self) {
        self.position = self.position.next();
    }

    /// Returns the rotor to the last explicitly set position.
    pub fn reset(&mut self) {
        self.position = self.start_position;
    }

    /// `true` if a notch is at the pawl, i.e. the rotor to the left will be
    /// pushed on the next key press.
    ///
    /// Must be read before any rotor steps for the key press.
    pub fn will_step_next(&self) -> bool {
        self.turnovers.contains(&self.position)
    }

    /// Passes a signal right-to-left through the rotor.
    pub fn encrypt_forward(&self, contact: Contact) -> Contact {
        let shift = self.position.index() as i32;
        let entry = contact.offset(shift);
        self.effective.forward(entry).offset(-shift)
    }

    /// Passes a signal left-to-right through the rotor.
    pub fn encrypt_reverse(&self, contact: Contact) -> Contact {
        let shift = self.position.index() as i32;
        let entry = contact.offset(shift);
        self.effective.reverse(entry).offset(-shift)
    }
}
