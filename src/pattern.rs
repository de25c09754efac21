//! The normalized encoder output: a run of bar and space modules.

use core::fmt;

use serde::Serialize;

/// How a renderer interprets a [`Pattern`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
pub enum PatternKind {
    /// Every character is one module wide: `'1'` is a bar, `'0'` a space.
    #[default]
    Modules,
    /// Every character is one bar followed by one space of the same width:
    /// `'1'` is a full-height bar, `'0'` a half-height bar (PostNet).
    HeightModulated,
}

/// An ordered sequence of modules, stored as a string of `'1'` (bar) and
/// `'0'` (space). Wide elements are repeated modules.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct Pattern {
    modules: String,
}

impl Pattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(modules: usize) -> Self {
        Self {
            modules: String::with_capacity(modules),
        }
    }

    /// Builds a pattern from a binary module string.
    ///
    /// # Panics
    ///
    /// Panics if `bits` contains anything other than `'0'` and `'1'`.
    pub fn from_bits(bits: &str) -> Self {
        let mut pattern = Self::with_capacity(bits.len());
        pattern.append_bits(bits);
        pattern
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.modules
    }

    /// Returns true if module `i` is a bar. Out-of-range modules are spaces.
    pub fn is_bar(&self, i: usize) -> bool {
        self.modules.as_bytes().get(i) == Some(&b'1')
    }

    /// Appends a binary module string taken from a table.
    pub fn append_bits(&mut self, bits: &str) {
        assert!(
            bits.bytes().all(|b| b == b'0' || b == b'1'),
            "Module string must be binary"
        );
        self.modules.push_str(bits);
    }

    /// Appends elements given as a width string (`"211214"`): digits are
    /// element widths in modules, alternating bar and space, starting with a bar.
    pub fn append_widths(&mut self, widths: &str) {
        for (i, w) in widths.bytes().enumerate() {
            assert!(w.is_ascii_digit() && w != b'0', "Element width must be 1-9");
            let width = usize::from(w - b'0');
            if i % 2 == 0 {
                self.append_bar(width);
            } else {
                self.append_space(width);
            }
        }
    }

    pub fn append_bar(&mut self, width: usize) {
        self.modules.extend(core::iter::repeat('1').take(width));
    }

    pub fn append_space(&mut self, width: usize) {
        self.modules.extend(core::iter::repeat('0').take(width));
    }

    pub fn append(&mut self, other: &Pattern) {
        self.modules.push_str(&other.modules);
    }

    /// Iterates over maximal runs as `(is_bar, width)`.
    pub fn runs(&self) -> Runs<'_> {
        Runs {
            bytes: self.modules.as_bytes(),
            pos: 0,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.modules)
    }
}

/// Iterator returned by [`Pattern::runs`].
pub struct Runs<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Iterator for Runs<'_> {
    type Item = (bool, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let first = *self.bytes.get(self.pos)?;
        let start = self.pos;
        while self.bytes.get(self.pos) == Some(&first) {
            self.pos += 1;
        }
        Some((first == b'1', self.pos - start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_widths_alternates_bar_and_space() {
        let mut p = Pattern::new();
        p.append_widths("211214");
        assert_eq!(p.as_str(), "11010010000");
        assert_eq!(p.len(), 11);
    }

    #[test]
    fn test_runs() {
        let p = Pattern::from_bits("1101000111");
        let runs: Vec<_> = p.runs().collect();
        assert_eq!(runs, vec![(true, 2), (false, 1), (true, 1), (false, 3), (true, 3)]);
        assert!(Pattern::new().runs().next().is_none());
    }

    #[test]
    #[should_panic(expected = "binary")]
    fn test_rejects_non_binary() {
        Pattern::from_bits("10x1");
    }
}
