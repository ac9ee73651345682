use super::frequency::FrequencyTable;

// ---------------------------------------------------------------------------
// Word-cloud layout
// ---------------------------------------------------------------------------

/// Average glyph width relative to the font size. Rough, but stable enough
/// for collision boxes around proportional text.
const GLYPH_WIDTH_FACTOR: f32 = 0.58;
/// Line height relative to the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.2;
/// Spiral placement gives up on a word after this many steps.
const MAX_SPIRAL_STEPS: usize = 2000;

/// One word placed in the cloud. `x`/`y` are the top-left corner of its
/// bounding box in layout coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Rank of the word; the renderer maps this to a palette color.
    pub color_index: usize,
}

/// A frequency-weighted word layout. Plain data: the UI paints it, nothing
/// here touches a rendering backend.
#[derive(Debug, Clone, PartialEq)]
pub struct WordCloudLayout {
    pub width: f32,
    pub height: f32,
    pub words: Vec<PlacedWord>,
}

/// Lay out the top `max_words` tokens on an Archimedean spiral from the
/// center, font size proportional to count. Returns `None` when the
/// frequency table is empty — the "no data" outcome, never a panic.
///
/// Purely a derivative of the frequency table: same input, same layout.
pub fn generate(
    freq: &FrequencyTable,
    width: f32,
    height: f32,
    max_words: usize,
) -> Option<WordCloudLayout> {
    let ranked = freq.top(max_words);
    if ranked.is_empty() {
        return None;
    }

    let max_count = ranked[0].1 as f32;
    let min_size = (height / 30.0).max(10.0);
    let max_size = (height / 6.0).max(min_size + 1.0);

    let mut words: Vec<PlacedWord> = Vec::with_capacity(ranked.len());

    for (rank, (token, count)) in ranked.iter().enumerate() {
        let weight = *count as f32 / max_count;
        let font_size = min_size + (max_size - min_size) * weight.sqrt();
        let box_w = token.chars().count() as f32 * font_size * GLYPH_WIDTH_FACTOR;
        let box_h = font_size * LINE_HEIGHT_FACTOR;

        if let Some((x, y)) = place_on_spiral(&words, width, height, box_w, box_h) {
            words.push(PlacedWord {
                text: token.clone(),
                font_size,
                x,
                y,
                width: box_w,
                height: box_h,
                color_index: rank,
            });
        }
        // A word that finds no free spot is dropped; the rest still render.
    }

    Some(WordCloudLayout {
        width,
        height,
        words,
    })
}

/// Walk an Archimedean spiral from the canvas center until the candidate
/// box fits inside the canvas without overlapping any placed word.
fn place_on_spiral(
    placed: &[PlacedWord],
    canvas_w: f32,
    canvas_h: f32,
    box_w: f32,
    box_h: f32,
) -> Option<(f32, f32)> {
    let cx = canvas_w / 2.0;
    let cy = canvas_h / 2.0;

    for step in 0..MAX_SPIRAL_STEPS {
        let t = step as f32 * 0.35;
        let r = t * 2.0;
        let x = cx + r * t.cos() - box_w / 2.0;
        let y = cy + r * t.sin() - box_h / 2.0;

        let inside =
            x >= 0.0 && y >= 0.0 && x + box_w <= canvas_w && y + box_h <= canvas_h;
        if !inside {
            continue;
        }
        let collides = placed
            .iter()
            .any(|w| overlaps(x, y, box_w, box_h, w));
        if !collides {
            return Some((x, y));
        }
    }
    None
}

fn overlaps(x: f32, y: f32, w: f32, h: f32, other: &PlacedWord) -> bool {
    x < other.x + other.width
        && other.x < x + w
        && y < other.y + other.height
        && other.y < y + h
}
