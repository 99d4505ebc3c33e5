//! SVG price graph snapshots.

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use assistant_core::traits::{BarIndicator, GraphRenderer};
use assistant_core::types::Bar;
use assistant_indicators::Vwap;
use tracing::{error, info};

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 300.0;
const MARGIN: f64 = 40.0;

/// Renders close, VWAP and the high/low band of a bar slice to
/// `<dir>/<SYMBOL>_<label>.svg`.
#[derive(Debug, Clone)]
pub struct SvgGraphRenderer {
    dir: PathBuf,
}

impl SvgGraphRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// SVG document for the bars, or `None` if no bar is complete.
    pub fn render_svg(symbol: &str, bars: &[Bar]) -> Option<String> {
        let bars: Vec<Bar> = bars.iter().copied().filter(Bar::is_complete).collect();
        if bars.is_empty() {
            return None;
        }

        let vwap = Vwap::new().calculate(&bars);
        let lo = bars
            .iter()
            .map(|b| b.low)
            .chain(vwap.iter().copied())
            .fold(f64::INFINITY, f64::min);
        let hi = bars
            .iter()
            .map(|b| b.high)
            .chain(vwap.iter().copied())
            .fold(f64::NEG_INFINITY, f64::max);
        let span = if hi > lo { hi - lo } else { 1.0 };

        let step = if bars.len() > 1 {
            (WIDTH - 2.0 * MARGIN) / (bars.len() - 1) as f64
        } else {
            0.0
        };
        let x = |i: usize| MARGIN + i as f64 * step;
        let y = |price: f64| HEIGHT - MARGIN - (price - lo) / span * (HEIGHT - 2.0 * MARGIN);

        let line = |values: &mut dyn Iterator<Item = f64>| {
            values
                .enumerate()
                .map(|(i, v)| format!("{:.1},{:.1}", x(i), y(v)))
                .collect::<Vec<_>>()
                .join(" ")
        };

        let band: Vec<String> = bars
            .iter()
            .enumerate()
            .map(|(i, b)| format!("{:.1},{:.1}", x(i), y(b.high)))
            .chain(
                bars.iter()
                    .enumerate()
                    .rev()
                    .map(|(i, b)| format!("{:.1},{:.1}", x(i), y(b.low))),
            )
            .collect();

        let first = bars[0].datetime().format("%H:%M");
        let last = bars[bars.len() - 1].datetime().format("%H:%M");

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        );
        let _ = writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#);
        let _ = writeln!(
            svg,
            r#"<text x="{MARGIN}" y="20" font-family="sans-serif" font-size="14">{symbol} intraday snapshot</text>"#
        );
        let _ = writeln!(
            svg,
            r#"<polygon points="{}" fill="gray" fill-opacity="0.1" stroke="none"/>"#,
            band.join(" ")
        );
        let _ = writeln!(
            svg,
            r#"<polyline points="{}" fill="none" stroke="steelblue" stroke-width="1.5"/>"#,
            line(&mut bars.iter().map(|b| b.close))
        );
        let _ = writeln!(
            svg,
            r#"<polyline points="{}" fill="none" stroke="darkorange" stroke-width="1.2" stroke-dasharray="6,4"/>"#,
            line(&mut vwap.iter().copied())
        );
        let _ = writeln!(
            svg,
            r#"<text x="{MARGIN}" y="{}" font-family="sans-serif" font-size="11">{first}</text>"#,
            HEIGHT - 10.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{}" font-family="sans-serif" font-size="11" text-anchor="end">{last}</text>"#,
            WIDTH - MARGIN,
            HEIGHT - 10.0
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.1}" font-family="sans-serif" font-size="11" text-anchor="end">{hi:.2}</text>"#,
            MARGIN - 4.0,
            y(hi)
        );
        let _ = writeln!(
            svg,
            r#"<text x="{}" y="{:.1}" font-family="sans-serif" font-size="11" text-anchor="end">{lo:.2}</text>"#,
            MARGIN - 4.0,
            y(lo)
        );
        svg.push_str("</svg>\n");

        Some(svg)
    }
}

impl GraphRenderer for SvgGraphRenderer {
    fn render_price_graph(&self, symbol: &str, bars: &[Bar], label: &str) -> Option<PathBuf> {
        let svg = Self::render_svg(symbol, bars)?;
        let path = self.dir.join(format!("{symbol}_{label}.svg"));

        let written = fs::create_dir_all(&self.dir).and_then(|_| fs::write(&path, svg));
        match written {
            Ok(()) => {
                info!(symbol, path = %path.display(), "Graph saved");
                Some(path)
            }
            Err(e) => {
                error!(symbol, error = %e, "Failed to generate graph");
                if path.exists() {
                    let _ = fs::remove_file(&path);
                }
                None
            }
        }
    }
}
