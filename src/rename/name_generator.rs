//! Short identifier generation.
//!
//! Names are drawn from an [`Alphabet`] of letters that are legal as the first
//! character of an identifier, so every generated string is a valid
//! identifier on its own and can be spliced into source without escaping.

use std::sync::Arc;

/// Code point ranges (inclusive) the default alphabet is built from.
///
/// Some ranges overlap and some contain unassigned or non-letter code points;
/// [`Alphabet::from_ranges`] merges them and keeps only alphabetic characters.
pub const DEFAULT_RANGES: &[(u32, u32)] = &[
    (0x41, 0x5A),
    (0x61, 0x7A),
    (0xC0, 0xD6),
    (0xD8, 0xF6),
    (0x100, 0x17F),
    (0x180, 0x1BF),
    (0x1C4, 0x1CC),
    (0x1CD, 0x1DC),
    (0x1DD, 0x1FF),
    (0x200, 0x217),
    (0x218, 0x21B),
    (0x21C, 0x24F),
    (0x22A, 0x233),
    (0x234, 0x236),
    (0x238, 0x240),
    (0x23A, 0x23E),
    (0x250, 0x2A8),
    (0x2A9, 0x2AD),
    (0x2AE, 0x2AF),
    (0x370, 0x3FB),
    (0x37B, 0x37D),
    (0x37F, 0x3F3),
    (0x3CF, 0x3F9),
    (0x3E2, 0x3EF),
    (0x400, 0x45F),
    (0x410, 0x44F),
    (0x460, 0x481),
    (0x48A, 0x4F9),
    (0x4FA, 0x4FF),
    (0x500, 0x52D),
    (0x531, 0x556),
    (0x560, 0x588),
    (0x10A0, 0x10C5),
    (0x10D0, 0x10F0),
    (0x13A0, 0x13F4),
    (0x1C90, 0x1CB0),
    (0x1E00, 0x1EF9),
    (0x1EA0, 0x1EF1),
    (0x1F00, 0x1FFC),
    (0x2C00, 0x2C2E),
    (0x2C30, 0x2C5E),
];

/// Ordered, duplicate-free set of characters a name may be built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    chars: Arc<[char]>,
}

impl Alphabet {
    /// Build an alphabet from inclusive code point ranges.
    ///
    /// Ranges are sorted and merged, so the result enumerates each code point
    /// once in ascending order. Code points that are not alphabetic (symbols,
    /// unassigned slots, surrogates) are dropped.
    pub fn from_ranges(ranges: &[(u32, u32)]) -> Self {
        let mut sorted: Vec<(u32, u32)> = ranges
            .iter()
            .copied()
            .filter(|(low, high)| low <= high)
            .collect();
        sorted.sort_unstable();

        let mut merged: Vec<(u32, u32)> = Vec::with_capacity(sorted.len());
        for (low, high) in sorted {
            match merged.last_mut() {
                Some(last) if low <= last.1.saturating_add(1) => last.1 = last.1.max(high),
                _ => merged.push((low, high)),
            }
        }

        let chars: Vec<char> = merged
            .into_iter()
            .flat_map(|(low, high)| low..=high)
            .filter_map(char::from_u32)
            .filter(|c| c.is_alphabetic())
            .collect();

        Self {
            chars: chars.into(),
        }
    }

    /// Alphabet over an explicit list of characters, kept in the given order
    /// with later duplicates removed.
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        let mut seen = ahash::AHashSet::new();
        let chars: Vec<char> = chars.into_iter().filter(|c| seen.insert(*c)).collect();
        Self {
            chars: chars.into(),
        }
    }

    /// Number of distinct characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::from_ranges(DEFAULT_RANGES)
    }
}

/// Infinite, non-repeating sequence of short names.
///
/// Each character position is a cursor into the alphabet; position 0 moves
/// fastest. Advancing past the end of the alphabet resets the cursor and
/// carries into the next position, and a new position is appended only when
/// every existing one overflows at once. The sequence is therefore all
/// one-character names in alphabet order, then all two-character names, and
/// so on.
#[derive(Debug, Clone)]
pub struct NameGenerator {
    alphabet: Alphabet,
    slots: Vec<usize>,
}

impl NameGenerator {
    /// Generator over the default letter alphabet.
    pub fn new() -> Self {
        Self::with_alphabet(Alphabet::default())
    }

    /// # Panics
    ///
    /// Panics if `alphabet` is empty; no names could ever be produced.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        assert!(!alphabet.is_empty(), "name alphabet must not be empty");
        Self {
            alphabet,
            slots: Vec::new(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Produce the next name in the sequence.
    pub fn next_name(&mut self) -> String {
        self.advance();
        self.slots
            .iter()
            .map(|&index| self.alphabet.chars[index])
            .collect()
    }

    fn advance(&mut self) {
        let size = self.alphabet.len();
        for slot in 0.. {
            match self.slots.get_mut(slot) {
                None => {
                    self.slots.push(0);
                    return;
                }
                Some(cursor) if *cursor + 1 < size => {
                    *cursor += 1;
                    return;
                }
                Some(cursor) => *cursor = 0,
            }
        }
    }
}

impl Default for NameGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for NameGenerator {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        Some(self.next_name())
    }
}
