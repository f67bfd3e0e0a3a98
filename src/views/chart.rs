//! Chart Component
//!
//! Price-over-time line chart drawn with characters.

use crate::models::PricePoint;

pub const DEFAULT_WIDTH: usize = 48;
pub const DEFAULT_HEIGHT: usize = 10;

const POINT: char = '*';
const LINE: char = '.';

/// Draw `points` as a line chart `width` columns by `height` rows
///
/// Points are spaced evenly by position, the way a category axis lays them out.
pub fn render_chart(points: &[PricePoint], width: usize, height: usize) -> String {
    if points.is_empty() {
        return "No price history yet\n".to_string();
    }

    let width = width.max(2);
    let height = height.max(2);

    let (min, max) = y_bounds(points);
    let mut grid = vec![vec![' '; width]; height];

    let column = |i: usize| -> usize {
        if points.len() == 1 {
            0
        } else {
            i * (width - 1) / (points.len() - 1)
        }
    };
    let row = |price: f64| -> usize {
        let scaled = (max - price) / (max - min) * (height - 1) as f64;
        (scaled.round().max(0.0) as usize).min(height - 1)
    };

    // Connect neighbours first so the points overwrite the line
    for (i, pair) in points.windows(2).enumerate() {
        let (start, end) = (column(i), column(i + 1));
        for col in start + 1..end {
            let t = (col - start) as f64 / (end - start) as f64;
            let price = pair[0].price + t * (pair[1].price - pair[0].price);
            grid[row(price)][col] = LINE;
        }
    }
    for (i, point) in points.iter().enumerate() {
        grid[row(point.price)][column(i)] = POINT;
    }

    let labels: Vec<String> = (0..height)
        .map(|r| {
            if r == 0 || r == height - 1 || r == height / 2 {
                let value = max - (r as f64 / (height - 1) as f64) * (max - min);
                format!("{:.2}", value)
            } else {
                String::new()
            }
        })
        .collect();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut out = String::from("Price History\n");
    for (label, cells) in labels.iter().zip(&grid) {
        let line: String = cells.iter().collect();
        out.push_str(&format!("{:>w$} |{}\n", label, line.trim_end(), w = label_width));
    }
    out.push_str(&format!("{:>w$} +{}\n", "", "-".repeat(width), w = label_width));

    let first = date_label(&points[0]);
    let last = date_label(&points[points.len() - 1]);
    let gap = width.saturating_sub(first.len() + last.len()).max(1);
    if points.len() == 1 {
        out.push_str(&format!("{:>w$}  {}\n", "", first, w = label_width));
    } else {
        out.push_str(&format!(
            "{:>w$}  {}{}{}\n",
            "",
            first,
            " ".repeat(gap),
            last,
            w = label_width
        ));
    }

    out
}

/// y-axis range padded by a tenth of the spread; flat series get one unit each way
fn y_bounds(points: &[PricePoint]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for point in points {
        min = min.min(point.price);
        max = max.max(point.price);
    }

    let spread = max - min;
    let padding = if spread > 0.0 { spread * 0.1 } else { 1.0 };
    (min - padding, max + padding)
}

fn date_label(point: &PricePoint) -> String {
    point
        .observed_at()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| point.timestamp.clone())
}
