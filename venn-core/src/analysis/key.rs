//! Set ids and region keys.
//!
//! A [`Key`] names one cell of a Venn arrangement by the sets that contain it: bit `i` is set iff the
//! cell lies inside set `i`. Keys render as the sorted concatenation of their set ids (`"AB"`,
//! `"ABC"`), so `"BA"` and `"AB"` can never name different regions.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Maximum number of sets (circles) in one diagram.
pub const MAX_SETS: usize = 4;

/// One set (circle) id, `'A'..='D'`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct SetId(u8);

impl SetId {
    pub const A: SetId = SetId(0);
    pub const B: SetId = SetId(1);
    pub const C: SetId = SetId(2);
    pub const D: SetId = SetId(3);

    pub fn new(idx: usize) -> Option<SetId> {
        if idx < MAX_SETS { Some(SetId(idx as u8)) } else { None }
    }
    pub fn idx(self) -> usize {
        self.0 as usize
    }
    pub fn bit(self) -> u8 {
        1 << self.0
    }
    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }
    /// The first `n` set ids, `A` onwards.
    pub fn first(n: usize) -> impl Iterator<Item = SetId> {
        (0..n.min(MAX_SETS)).map(|idx| SetId(idx as u8))
    }
}

impl TryFrom<char> for SetId {
    type Error = ParseError;
    fn try_from(ch: char) -> Result<Self, Self::Error> {
        match ch.to_ascii_uppercase() {
            c @ 'A'..='D' => Ok(SetId(c as u8 - b'A')),
            _ => Err(ParseError::SetId(ch)),
        }
    }
}

impl From<SetId> for char {
    fn from(id: SetId) -> char {
        id.to_char()
    }
}

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A non-empty set of [`SetId`]s, stored as a bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Key(u8);

impl Key {
    /// `None` for the empty mask and for bits beyond [`MAX_SETS`].
    pub fn from_bits(bits: u8) -> Option<Key> {
        if bits == 0 || bits >> MAX_SETS != 0 { None } else { Some(Key(bits)) }
    }
    pub fn single(id: SetId) -> Key {
        Key(id.bit())
    }
    pub fn bits(self) -> u8 {
        self.0
    }
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(self, id: SetId) -> bool {
        self.0 & id.bit() != 0
    }
    pub fn ids(self) -> impl Iterator<Item = SetId> {
        SetId::first(MAX_SETS).filter(move |id| self.contains(*id))
    }
    /// The one member of a single-set key.
    pub fn as_single(self) -> Option<SetId> {
        if self.len() == 1 { self.ids().next() } else { None }
    }
    pub fn intersects(self, o: Key) -> bool {
        self.0 & o.0 != 0
    }
    /// Number of sets in exactly one of the two keys.
    pub fn distance(self, o: Key) -> usize {
        (self.0 ^ o.0).count_ones() as usize
    }
    pub fn with(self, id: SetId) -> Key {
        Key(self.0 | id.bit())
    }
    pub fn without(self, id: SetId) -> Option<Key> {
        Key::from_bits(self.0 & !id.bit())
    }
    /// All non-empty subsets of `universe`, in [`Key`] order.
    pub fn subsets(universe: u8) -> Vec<Key> {
        let universe = universe & ((1 << MAX_SETS) - 1);
        let mut keys: Vec<Key> = (1..=universe)
            .filter(|bits| bits & !universe == 0)
            .filter_map(Key::from_bits)
            .collect();
        keys.sort();
        keys
    }
}

impl Ord for Key {
    fn cmp(&self, o: &Self) -> Ordering {
        self.len().cmp(&o.len()).then_with(|| self.0.reverse_bits().cmp(&o.0.reverse_bits()).reverse())
    }
}

impl PartialOrd for Key {
    fn partial_cmp(&self, o: &Self) -> Option<Ordering> {
        Some(self.cmp(o))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for id in self.ids() {
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

impl FromStr for Key {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = 0u8;
        for ch in s.chars() {
            let id = SetId::try_from(ch)?;
            if bits & id.bit() != 0 {
                return Err(ParseError::RepeatedSetId { id: ch, key: s.to_string() });
            }
            bits |= id.bit();
        }
        Key::from_bits(bits).ok_or(ParseError::EmptyKey)
    }
}

impl TryFrom<String> for Key {
    type Error = ParseError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> String {
        key.to_string()
    }
}

impl From<SetId> for Key {
    fn from(id: SetId) -> Key {
        Key::single(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(s: &str) -> Key {
        s.parse().unwrap()
    }

    #[test]
    fn parse_canonicalizes() {
        assert_eq!(k("BA"), k("AB"));
        assert_eq!(k("cab").to_string(), "ABC");
        assert_eq!(k("D").bits(), 0b1000);
        assert_eq!("".parse::<Key>(), Err(ParseError::EmptyKey));
        assert_eq!("AE".parse::<Key>(), Err(ParseError::SetId('E')));
        assert_eq!(
            "ABA".parse::<Key>(),
            Err(ParseError::RepeatedSetId { id: 'A', key: "ABA".to_string() }),
        );
    }

    #[test]
    fn ordering() {
        let mut keys = vec![ k("ABC"), k("BC"), k("C"), k("AB"), k("A"), k("AC"), k("B") ];
        keys.sort();
        let names: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec![ "A", "B", "C", "AB", "AC", "BC", "ABC" ]);
        assert!(k("AD") < k("BC"));
        assert!(k("D") < k("AB"));
    }

    #[test]
    fn subsets() {
        let names: Vec<String> = Key::subsets(0b0111).iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec![ "A", "B", "C", "AB", "AC", "BC", "ABC" ]);
        assert_eq!(Key::subsets(0b1111).len(), 15);
        assert_eq!(Key::subsets(0b0101).len(), 3);
        assert!(Key::subsets(0).is_empty());
    }

    #[test]
    fn set_ops() {
        assert!(k("AB").intersects(k("BC")));
        assert!(!k("A").intersects(k("BC")));
        assert_eq!(k("AB").distance(k("ABC")), 1);
        assert_eq!(k("A").distance(k("B")), 2);
        assert_eq!(k("AB").without(SetId::A), Some(k("B")));
        assert_eq!(k("A").without(SetId::A), None);
        assert_eq!(k("A").with(SetId::C), k("AC"));
        assert_eq!(k("C").as_single(), Some(SetId::C));
        assert_eq!(k("AC").as_single(), None);
    }

    #[test]
    fn serde() {
        assert_eq!(serde_json::to_string(&k("BA")).unwrap(), r#""AB""#);
        assert_eq!(serde_json::from_str::<Key>(r#""cb""#).unwrap(), k("BC"));
        assert!(serde_json::from_str::<Key>(r#""""#).is_err());
        assert_eq!(serde_json::to_string(&SetId::C).unwrap(), r#""C""#);
    }
}
