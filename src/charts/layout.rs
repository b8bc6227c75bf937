//! Geometry helpers for the chart kinds that are not drawn on a numeric mesh.

use std::collections::HashMap;

/// An axis-aligned rectangle, origin at the lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Rect {
    pub fn area(&self) -> f64 {
        self.dx * self.dy
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.dx / 2.0, self.y + self.dy / 2.0)
    }

    fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.dx
            && other.x < self.x + self.dx
            && self.y < other.y + other.dy
            && other.y < self.y + self.dy
    }

    fn inside(&self, width: f64, height: f64) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x + self.dx <= width && self.y + self.dy <= height
    }
}

/// Squarified treemap of positive `sizes` over `bounds`, one rectangle per size in input order.
///
/// Sizes should be sorted in decreasing order for the best aspect ratios.
pub fn squarify(sizes: &[f64], bounds: Rect) -> Vec<Rect> {
    let total: f64 = sizes.iter().sum();
    if sizes.is_empty() || total <= 0.0 {
        return Vec::new();
    }
    let scale = bounds.area() / total;
    let normalized: Vec<f64> = sizes.iter().map(|s| s * scale).collect();
    let mut out = Vec::with_capacity(sizes.len());
    squarify_into(&normalized, bounds, &mut out);
    out
}

fn squarify_into(sizes: &[f64], bounds: Rect, out: &mut Vec<Rect>) {
    if sizes.is_empty() {
        return;
    }
    if sizes.len() == 1 {
        out.extend(layout(sizes, bounds));
        return;
    }
    let mut split = 1;
    while split < sizes.len()
        && worst_ratio(&sizes[..split], bounds) >= worst_ratio(&sizes[..split + 1], bounds)
    {
        split += 1;
    }
    let (current, remaining) = sizes.split_at(split);
    out.extend(layout(current, bounds));
    squarify_into(remaining, leftover(current, bounds), out);
}

fn layout(sizes: &[f64], b: Rect) -> Vec<Rect> {
    let covered: f64 = sizes.iter().sum();
    let mut rects = Vec::with_capacity(sizes.len());
    if b.dx >= b.dy {
        let width = covered / b.dy;
        let mut y = b.y;
        for s in sizes {
            let dy = s / width;
            rects.push(Rect { x: b.x, y, dx: width, dy });
            y += dy;
        }
    } else {
        let height = covered / b.dx;
        let mut x = b.x;
        for s in sizes {
            let dx = s / height;
            rects.push(Rect { x, y: b.y, dx, dy: height });
            x += dx;
        }
    }
    rects
}

fn leftover(sizes: &[f64], b: Rect) -> Rect {
    let covered: f64 = sizes.iter().sum();
    if b.dx >= b.dy {
        let width = covered / b.dy;
        Rect { x: b.x + width, y: b.y, dx: b.dx - width, dy: b.dy }
    } else {
        let height = covered / b.dx;
        Rect { x: b.x, y: b.y + height, dx: b.dx, dy: b.dy - height }
    }
}

fn worst_ratio(sizes: &[f64], bounds: Rect) -> f64 {
    layout(sizes, bounds)
        .iter()
        .map(|r| (r.dx / r.dy).max(r.dy / r.dx))
        .fold(0.0, f64::max)
}

/// Shrink each rectangle by `pad` on every side where it is large enough.
pub fn pad_rects(rects: &mut [Rect], pad: f64) {
    for r in rects {
        if r.dx > 2.0 * pad {
            r.x += pad;
            r.dx -= 2.0 * pad;
        }
        if r.dy > 2.0 * pad {
            r.y += pad;
            r.dy -= 2.0 * pad;
        }
    }
}

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "just",
    "me", "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only",
    "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "will", "with", "would", "you", "your", "yours", "yourself", "yourselves",
];

/// Word counts with stop words and pure numbers removed, most frequent first.
///
/// Ties are broken alphabetically so the order is stable.
pub fn word_frequencies(text: &str) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for raw in text.split(|c: char| !(c.is_alphanumeric() || c == '\'')) {
        let word = raw.trim_matches('\'').to_lowercase();
        let word = word.strip_suffix("'s").unwrap_or(&word).to_string();
        if word.is_empty()
            || STOPWORDS.contains(&word.as_str())
            || word.chars().all(|c| c.is_ascii_digit())
        {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }
    let mut freqs: Vec<(String, usize)> = counts.into_iter().collect();
    freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    freqs
}

/// A word placed on the cloud canvas; `bounds` uses a y-up origin at the lower-left.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f64,
    /// Frequency relative to the most frequent word, in `(0, 1]`
    pub weight: f64,
    pub bounds: Rect,
}

const MIN_FONT_SIZE: f64 = 8.0;
const SPIRAL_STEPS: usize = 2_000;

/// Estimated box of `text` at `font_size`.
fn text_extent(text: &str, font_size: f64) -> (f64, f64) {
    (0.6 * font_size * text.chars().count() as f64, font_size)
}

/// Place up to `max_words` of `freqs` on a `width x height` canvas without overlaps.
///
/// Font size scales with relative frequency; each word walks an Archimedean spiral out from the
/// center until it fits, shrinking when the canvas is too crowded. Words that cannot fit at the
/// minimum size are dropped.
pub fn place_words(freqs: &[(String, usize)], max_words: usize, width: f64, height: f64) -> Vec<PlacedWord> {
    let Some(top) = freqs.first().map(|(_, c)| *c as f64) else {
        return Vec::new();
    };
    let max_font = (height * 0.25).max(MIN_FONT_SIZE);
    let center = (width / 2.0, height / 2.0);
    let mut placed: Vec<PlacedWord> = Vec::new();

    for (word, count) in freqs.iter().take(max_words) {
        let weight = *count as f64 / top;
        let mut font_size = MIN_FONT_SIZE + (max_font - MIN_FONT_SIZE) * weight;

        while font_size >= MIN_FONT_SIZE {
            let (w, h) = text_extent(word, font_size);
            let found = (0..SPIRAL_STEPS).find_map(|step| {
                let t = step as f64 * 0.1;
                let r = 2.0 * t;
                let rect = Rect {
                    x: center.0 + r * t.cos() - w / 2.0,
                    y: center.1 + r * t.sin() - h / 2.0,
                    dx: w,
                    dy: h,
                };
                let free = rect.inside(width, height)
                    && placed.iter().all(|p| !p.bounds.overlaps(&rect));
                free.then_some(rect)
            });
            if let Some(bounds) = found {
                placed.push(PlacedWord {
                    text: word.clone(),
                    font_size,
                    weight,
                    bounds,
                });
                break;
            }
            font_size *= 0.9;
        }
    }
    placed
}
