//! Contact: one of the 26 letters carried through the signal path.
//!
//! Every stage of the machine (plugboard, rotors, reflector) exchanges
//! signals as [`Contact`] values. Offsets between the frames of adjacent
//! components are circular arithmetic on the 26-contact ring.

use std::fmt;

use crate::error::{EnigmaError, Result};

/// Number of contacts on every disk, plug and key.
pub const NUM_CONTACTS: usize = 26;

/// One letter of the machine alphabet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Contact {
    #[default]
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

impl Contact {
    /// All contacts in alphabetical order.
    pub const ALL: [Contact; NUM_CONTACTS] = [
        Contact::A,
        Contact::B,
        Contact::C,
        Contact::D,
        Contact::E,
        Contact::F,
        Contact::G,
        Contact::H,
        Contact::I,
        Contact::J,
        Contact::K,
        Contact::L,
        Contact::M,
        Contact::N,
        Contact::O,
        Contact::P,
        Contact::Q,
        Contact::R,
        Contact::S,
        Contact::T,
        Contact::U,
        Contact::V,
        Contact::W,
        Contact::X,
        Contact::Y,
        Contact::Z,
    ];

    /// Returns the contact at `index`, wrapping around the ring.
    pub fn from_index(index: usize) -> Contact {
        Contact::ALL[index % NUM_CONTACTS]
    }

    /// Converts a letter (either case) to its contact.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidLetter`] for anything outside A-Z.
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_engine::Contact;
    ///
    /// assert_eq!(Contact::from_char('q').unwrap(), Contact::Q);
    /// assert!(Contact::from_char('4').is_err());
    /// ```
    pub fn from_char(letter: char) -> Result<Contact> {
        if letter.is_ascii_alphabetic() {
            let upper = letter.to_ascii_uppercase() as u8;
            Ok(Contact::from_index((upper - b'A') as usize))
        } else {
            Err(EnigmaError::InvalidLetter { letter })
        }
    }

    /// Zero-based index of the contact (A = 0).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Upper-case letter of the contact.
    pub fn to_char(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Moves the contact `by` steps around the ring (negative moves backwards).
    pub fn offset(self, by: i32) -> Contact {
        let n = NUM_CONTACTS as i32;
        Contact::from_index((self as i32 + by).rem_euclid(n) as usize)
    }

    /// The following contact, wrapping Z to A.
    pub fn next(self) -> Contact {
        self.offset(1)
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl TryFrom<char> for Contact {
    type Error = EnigmaError;

    fn try_from(letter: char) -> Result<Self> {
        Contact::from_char(letter)
    }
}

/// Parses a string of letters into contacts, one per character.
pub(crate) fn parse_letters(text: &str) -> Result<Vec<Contact>> {
    text.chars().map(Contact::from_char).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_ordered() {
        for (i, c) in Contact::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
    }

    #[test]
    fn test_char_conversion() {
        assert_eq!(Contact::from_char('A').unwrap(), Contact::A);
        assert_eq!(Contact::from_char('z').unwrap(), Contact::Z);
        assert_eq!(Contact::M.to_char(), 'M');
        assert_eq!(
            Contact::from_char('-'),
            Err(EnigmaError::InvalidLetter { letter: '-' })
        );
        assert!(Contact::from_char('Ä').is_err());
    }

    #[test]
    fn test_offset_wraps_both_ways() {
        assert_eq!(Contact::Z.offset(1), Contact::A);
        assert_eq!(Contact::A.offset(-1), Contact::Z);
        assert_eq!(Contact::C.offset(-29), Contact::Z);
        assert_eq!(Contact::B.offset(52), Contact::B);
        assert_eq!(Contact::Y.next(), Contact::Z);
    }

    #[test]
    fn test_from_index_wraps() {
        assert_eq!(Contact::from_index(26), Contact::A);
        assert_eq!(Contact::from_index(27), Contact::B);
    }

    #[test]
    fn test_parse_letters() {
        assert_eq!(
            parse_letters("AbZ").unwrap(),
            vec![Contact::A, Contact::B, Contact::Z]
        );
        assert!(parse_letters("A1").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Contact::K), "K");
    }
}
