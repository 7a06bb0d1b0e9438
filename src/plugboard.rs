//! Plugboard (Steckerbrett): symmetric letter swaps at the machine's front.
//!
//! Each cable pairs two contacts. Unpaired contacts pass straight through,
//! so [`Plugboard::get_plug`] is total and applying it twice is always
//! the identity.

use crate::contact::{Contact, NUM_CONTACTS};
use crate::error::{EnigmaError, Result};

/// Maximum number of cables: every contact paired.
pub const MAX_PLUGS: usize = NUM_CONTACTS / 2;

/// Partial involution over the contacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plugboard {
    entries: [Option<Contact>; NUM_CONTACTS],
}

impl Plugboard {
    /// Creates a plugboard with no cables.
    pub fn new() -> Self {
        Plugboard::default()
    }

    /// Connects `src` and `dest` with a cable.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPlug`] if `src == dest` or either
    /// contact already carries a cable.
    pub fn set_plug(&mut self, src: Contact, dest: Contact) -> Result<()> {
        if src == dest {
            return Err(EnigmaError::plug(format!(
                "cannot pair {} with itself",
                src
            )));
        }
        for contact in [src, dest] {
            if let Some(other) = self.entries[contact.index()] {
                return Err(EnigmaError::plug(format!(
                    "{} is already paired with {}",
                    contact, other
                )));
            }
        }

        self.entries[src.index()] = Some(dest);
        self.entries[dest.index()] = Some(src);
        log::debug!("plugboard: {} <-> {}", src, dest);
        Ok(())
    }

    /// Connects every pair in a space-separated list such as `"AB CD EF"`.
    ///
    /// Pairs are applied in order; on error the pairs before the offending
    /// one stay connected.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPlug`] for a malformed pair and any
    /// error of [`Plugboard::set_plug`].
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_engine::{Contact, Plugboard};
    ///
    /// let mut board = Plugboard::new();
    /// board.set_plugs("AB CD").unwrap();
    /// assert_eq!(board.get_plug(Contact::D), Contact::C);
    /// assert_eq!(board.get_plug(Contact::E), Contact::E);
    /// ```
    pub fn set_plugs(&mut self, pairs: &str) -> Result<()> {
        for pair in pairs.split_whitespace() {
            let (src, dest) = parse_pair(pair)?;
            self.set_plug(src, dest)?;
        }
        Ok(())
    }

    /// Returns the contact paired with `contact`, or `contact` itself.
    pub fn get_plug(&self, contact: Contact) -> Contact {
        self.entries[contact.index()].unwrap_or(contact)
    }

    /// `true` if `contact` carries a cable.
    pub fn is_paired(&self, contact: Contact) -> bool {
        self.entries[contact.index()].is_some()
    }

    /// Number of cables plugged in.
    pub fn pair_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count() / 2
    }

    /// Plugged pairs, each listed once with the lower letter first.
    pub fn pairs(&self) -> Vec<(Contact, Contact)> {
        Contact::ALL
            .iter()
            .filter_map(|&c| match self.entries[c.index()] {
                Some(other) if c < other => Some((c, other)),
                _ => None,
            })
            .collect()
    }

    /// Removes every cable.
    pub fn reset(&mut self) {
        self.entries = [None; NUM_CONTACTS];
    }
}

/// Parses a two-letter pair such as `"AB"`.
pub(crate) fn parse_pair(pair: &str) -> Result<(Contact, Contact)> {
    let mut letters = pair.chars();
    match (letters.next(), letters.next(), letters.next()) {
        (Some(a), Some(b), None) => {
            let src = Contact::from_char(a)
                .map_err(|_| EnigmaError::plug(format!("'{}' is not a letter pair", pair)))?;
            let dest = Contact::from_char(b)
                .map_err(|_| EnigmaError::plug(format!("'{}' is not a letter pair", pair)))?;
            Ok((src, dest))
        }
        _ => Err(EnigmaError::plug(format!("'{}' is not a letter pair", pair))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_identity() {
        let board = Plugboard::new();
        for c in Contact::ALL {
            assert_eq!(board.get_plug(c), c);
        }
        assert_eq!(board.pair_count(), 0);
    }

    #[test]
    fn test_set_plug_is_symmetric() {
        let mut board = Plugboard::new();
        board.set_plug(Contact::A, Contact::T).unwrap();
        assert_eq!(board.get_plug(Contact::A), Contact::T);
        assert_eq!(board.get_plug(Contact::T), Contact::A);
        assert_eq!(board.get_plug(Contact::C), Contact::C);
        assert!(board.is_paired(Contact::T));
    }

    #[test]
    fn test_self_pair_rejected() {
        let mut board = Plugboard::new();
        assert_eq!(
            board.set_plug(Contact::F, Contact::F),
            Err(EnigmaError::plug("cannot pair F with itself"))
        );
    }

    #[test]
    fn test_reuse_rejected() {
        let mut board = Plugboard::new();
        board.set_plug(Contact::A, Contact::B).unwrap();
        assert_eq!(
            board.set_plug(Contact::C, Contact::B),
            Err(EnigmaError::plug("B is already paired with A"))
        );
        assert!(board.set_plug(Contact::A, Contact::C).is_err());
        assert!(board.set_plug(Contact::B, Contact::A).is_err());
        assert_eq!(board.get_plug(Contact::C), Contact::C);
    }

    #[test]
    fn test_involution_for_every_contact() {
        let mut board = Plugboard::new();
        board.set_plugs("AZ BY CX QW").unwrap();
        for c in Contact::ALL {
            assert_eq!(board.get_plug(board.get_plug(c)), c);
        }
    }

    #[test]
    fn test_full_board() {
        let mut board = Plugboard::new();
        board
            .set_plugs("AB CD EF GH IJ KL MN OP QR ST UV WX YZ")
            .unwrap();
        assert_eq!(board.pair_count(), MAX_PLUGS);
        for c in Contact::ALL {
            assert_ne!(board.get_plug(c), c);
        }
    }

    #[test]
    fn test_set_plugs_malformed() {
        let mut board = Plugboard::new();
        assert!(matches!(
            board.set_plugs("AB C"),
            Err(EnigmaError::InvalidPlug { .. })
        ));
        // The pair before the malformed one stays.
        assert_eq!(board.get_plug(Contact::A), Contact::B);
        assert!(board.set_plugs("A1").is_err());
        assert!(board.set_plugs("ABC").is_err());
    }

    #[test]
    fn test_pairs_listing() {
        let mut board = Plugboard::new();
        board.set_plugs("ZA QB").unwrap();
        assert_eq!(
            board.pairs(),
            vec![(Contact::A, Contact::Z), (Contact::B, Contact::Q)]
        );
    }

    #[test]
    fn test_reset() {
        let mut board = Plugboard::new();
        board.set_plugs("AB CD").unwrap();
        board.reset();
        assert_eq!(board.pair_count(), 0);
        assert_eq!(board.get_plug(Contact::A), Contact::A);
        board.set_plug(Contact::A, Contact::C).unwrap();
    }
}
