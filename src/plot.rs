use std::path::{Path, PathBuf};

use plotters::prelude::*;
use thiserror::Error;

// ---------------------------------------------------------------------------
// PlotError
// ---------------------------------------------------------------------------

/// Errors from figure rendering. Preconditions are checked before the
/// output file is created, so a failed call leaves nothing behind.
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("x has {x_len} values but y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[error("overlay has {overlay_len} values but x has {x_len}")]
    OverlayMismatch { x_len: usize, overlay_len: usize },
    #[error("nothing to plot")]
    EmptySeries,
    #[error("rendering {path}: {message}")]
    Backend { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// render_scatter
// ---------------------------------------------------------------------------

/// Figure size in pixels.
const FIGURE_SIZE: (u32, u32) = (800, 600);
/// Fraction of the data span left as margin on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;
/// Dash count for the vertical reference line.
const REFERENCE_DASHES: usize = 24;

/// Render one observable as a scatter plot against its x values.
///
/// Each `(x[i], y[i])` pair becomes one unconnected filled point. A dashed
/// vertical line marks `reference_x`, drawn only where it falls inside the
/// x range. `overlay`, when given, is a reference curve over the same x
/// values drawn as a connected line. The file at `out_path` is created or
/// overwritten; repeated calls with the same inputs are idempotent.
pub fn render_scatter(
    x: &[f64],
    y: &[f64],
    reference_x: f64,
    x_label: &str,
    y_label: &str,
    out_path: &Path,
    overlay: Option<&[f64]>,
) -> Result<(), PlotError> {
    if x.len() != y.len() {
        return Err(PlotError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.is_empty() {
        return Err(PlotError::EmptySeries);
    }
    if let Some(series) = overlay {
        if series.len() != x.len() {
            return Err(PlotError::OverlayMismatch {
                x_len: x.len(),
                overlay_len: series.len(),
            });
        }
    }

    draw(x, y, reference_x, x_label, y_label, out_path, overlay).map_err(|e| {
        PlotError::Backend {
            path: out_path.to_path_buf(),
            message: e.to_string(),
        }
    })
}

fn draw(
    x: &[f64],
    y: &[f64],
    reference_x: f64,
    x_label: &str,
    y_label: &str,
    out_path: &Path,
    overlay: Option<&[f64]>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (x_lo, x_hi) = padded_range(x.iter().copied());
    let (y_lo, y_hi) = padded_range(
        y.iter()
            .copied()
            .chain(overlay.into_iter().flatten().copied()),
    );

    let root = BitMapBackend::new(out_path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(x_label)
        .y_desc(y_label)
        .draw()?;

    if reference_x >= x_lo && reference_x <= x_hi {
        let dash = (y_hi - y_lo) / (2 * REFERENCE_DASHES) as f64;
        chart.draw_series((0..REFERENCE_DASHES).map(|k| {
            let start = y_lo + (2 * k) as f64 * dash;
            PathElement::new(
                vec![(reference_x, start), (reference_x, start + dash)],
                RED.stroke_width(1),
            )
        }))?;
    }

    if let Some(series) = overlay {
        chart.draw_series(LineSeries::new(
            x.iter().zip(series.iter()).map(|(&xi, &yi)| (xi, yi)),
            &GREEN,
        ))?;
    }

    chart.draw_series(
        x.iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| Circle::new((xi, yi), 3, BLUE.filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Data range with a margin on both sides. A collapsed span (single point
/// or constant series) falls back to a unit window around the value so the
/// chart can still be built.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        if v.is_finite() {
            lo = lo.min(v);
            hi = hi.max(v);
        }
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = span * AXIS_MARGIN;
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_a_nonempty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        render_scatter(
            &[1.0, 2.0, 3.0],
            &[0.5, 0.7, 0.2],
            2.269,
            "T",
            "E / N",
            &path,
            None,
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn length_mismatch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let err =
            render_scatter(&[1.0, 2.0], &[0.5], 2.269, "T", "E / N", &path, None).unwrap_err();
        assert!(matches!(
            err,
            PlotError::LengthMismatch { x_len: 2, y_len: 1 }
        ));
        assert!(!path.exists());
    }

    #[test]
    fn overlay_must_match_x() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let err = render_scatter(
            &[1.0, 2.0],
            &[0.5, 0.6],
            1.5,
            "T",
            "|M| / N",
            &path,
            Some(&[1.0]),
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::OverlayMismatch { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn empty_series_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let err = render_scatter(&[], &[], 2.269, "T", "C / N", &path, None).unwrap_err();
        assert!(matches!(err, PlotError::EmptySeries));
        assert!(!path.exists());
    }

    #[test]
    fn single_point_renders_via_the_fallback_window() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        render_scatter(&[2.0], &[1.5], 2.269, "T", "X / N", &path, None).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn rerender_overwrites_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        render_scatter(&[1.0, 2.0], &[3.0, 4.0], 1.5, "T", "E / N", &path, None).unwrap();
        let first = std::fs::metadata(&path).unwrap().len();
        render_scatter(&[1.0, 2.0], &[3.0, 4.0], 1.5, "T", "E / N", &path, None).unwrap();
        let second = std::fs::metadata(&path).unwrap().len();

        assert!(first > 0);
        assert_eq!(first, second);
    }

    #[test]
    fn overlay_curve_renders_with_the_scatter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let x = [1.0, 1.5, 2.0];
        let y = [0.99, 0.97, 0.91];
        let exact: Vec<f64> = x
            .iter()
            .map(|&t| crate::exact::spontaneous_magnetization(t))
            .collect();

        render_scatter(
            &x,
            &y,
            crate::exact::critical_temperature(),
            "T",
            "|M| / N",
            &path,
            Some(&exact),
        )
        .unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn padded_range_handles_degenerate_input() {
        assert_eq!(padded_range([2.0].into_iter()), (1.0, 3.0));
        assert_eq!(padded_range([5.0, 5.0, 5.0].into_iter()), (4.0, 6.0));
        assert_eq!(padded_range(std::iter::empty()), (0.0, 1.0));

        let (lo, hi) = padded_range([0.0, 10.0].into_iter());
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }
}
