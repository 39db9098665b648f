use read_fonts::{tables::hmtx::LongMetric, types::GlyphId, TableProvider};

/// Horizontal glyph metrics in font units.
#[derive(Clone)]
pub struct GlyphMetrics<'a> {
    h_metrics: &'a [LongMetric],
    default_advance_width: u16,
}

impl<'a> GlyphMetrics<'a> {
    /// Creates glyph metrics from the `hmtx` table of the specified font.
    pub fn new(font: &impl TableProvider<'a>) -> Self {
        let (h_metrics, default_advance_width) = font
            .hmtx()
            .map(|hmtx| {
                let h_metrics = hmtx.h_metrics();
                let default_advance_width = h_metrics.last().map(|m| m.advance()).unwrap_or(0);
                (h_metrics, default_advance_width)
            })
            .unwrap_or_default();
        Self {
            h_metrics,
            default_advance_width,
        }
    }

    /// Returns true if the font has no horizontal metrics.
    pub fn is_empty(&self) -> bool {
        self.h_metrics.is_empty()
    }

    /// Returns the advance width for the specified glyph.
    ///
    /// Glyphs past the end of the long metrics share the last advance.
    pub fn advance_width(&self, glyph_id: GlyphId) -> u16 {
        self.h_metrics
            .get(glyph_id.to_u16() as usize)
            .map(|metric| metric.advance())
            .unwrap_or(self.default_advance_width)
    }
}
