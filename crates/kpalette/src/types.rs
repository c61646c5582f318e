use crate::color::to_hex;
use rgb::RGB8;
use serde::Serialize;

#[inline(always)]
pub(crate) fn squared_distance(x: RGB8, y: RGB8) -> u32 {
    let dr = x.r.abs_diff(y.r) as u32;
    let dg = x.g.abs_diff(y.g) as u32;
    let db = x.b.abs_diff(y.b) as u32;
    dr * dr + dg * dg + db * db
}

/// One color of the extracted palette and the number of samples it won.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub color: RGB8,
    pub count: usize,
}

impl PaletteEntry {
    pub fn hex(&self) -> String {
        to_hex(self.color)
    }

    /// Share of `total` held by this entry, in percent with one decimal.
    pub fn percent_of(&self, total: usize) -> f32 {
        let total = total.max(1) as f32;
        (self.count as f32 / total * 1000.0).round() / 10.0
    }
}

/// Serialized form of a palette entry: `{ "hex": "#RRGGBB", "rgb": [r, g, b], "count": n }`.
#[derive(Debug, Serialize)]
pub(crate) struct ExportedEntry {
    pub hex: String,
    pub rgb: [u8; 3],
    pub count: usize,
}

impl From<&PaletteEntry> for ExportedEntry {
    fn from(entry: &PaletteEntry) -> Self {
        ExportedEntry {
            hex: entry.hex(),
            rgb: [entry.color.r, entry.color.g, entry.color.b],
            count: entry.count,
        }
    }
}

/// Palette entries ordered by count, most populated first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Palette {
    /// Builds a palette from per-centroid colors and counts, given in centroid
    /// index order. Equal counts keep that order.
    pub(crate) fn from_centroids(centroids: &[RGB8], counts: &[usize]) -> Self {
        assert_eq!(centroids.len(), counts.len());

        let mut entries: Vec<PaletteEntry> = centroids
            .iter()
            .zip(counts)
            .map(|(&color, &count)| PaletteEntry { color, count })
            .collect();

        // Vec::sort_by is stable
        entries.sort_by(|a, b| b.count.cmp(&a.count));

        Palette { entries }
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PaletteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn colors(&self) -> Vec<RGB8> {
        self.entries.iter().map(|e| e.color).collect()
    }

    pub fn total_count(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn into_entries(self) -> Vec<PaletteEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a PaletteEntry;
    type IntoIter = std::slice::Iter<'a, PaletteEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
