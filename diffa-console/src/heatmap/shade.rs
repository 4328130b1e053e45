/// Glyph for counts below the lowest threshold
pub const BLANK: char = ' ';
pub const LIGHT_SHADE: char = '░';
pub const MEDIUM_SHADE: char = '▒';
pub const DARK_SHADE: char = '▓';

/// Ordered (minimum count, glyph) pairs. Lookup scans from the highest
/// threshold down, so a count sitting exactly on a boundary gets the darker
/// glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadeThresholds {
    ascending: Vec<(u64, char)>,
}

impl ShadeThresholds {
    /// Thresholds are sorted on construction; a repeated threshold keeps the
    /// last glyph given for it.
    pub fn new(pairs: impl IntoIterator<Item = (u64, char)>) -> Self {
        let mut ascending: Vec<(u64, char)> = Vec::new();
        for (threshold, glyph) in pairs {
            match ascending.iter_mut().find(|(t, _)| *t == threshold) {
                Some(existing) => existing.1 = glyph,
                None => ascending.push((threshold, glyph)),
            }
        }
        ascending.sort_by_key(|(threshold, _)| *threshold);
        Self { ascending }
    }

    pub fn shade(&self, count: u64) -> char {
        self.ascending
            .iter()
            .rev()
            .find(|(threshold, _)| *threshold <= count)
            .map(|(_, glyph)| *glyph)
            .unwrap_or(BLANK)
    }
}

impl Default for ShadeThresholds {
    fn default() -> Self {
        Self::new([(1, LIGHT_SHADE), (4, MEDIUM_SHADE), (10, DARK_SHADE)])
    }
}
