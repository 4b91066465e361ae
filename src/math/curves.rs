//! Parametric outlines used by the mask shapes

use std::f64::consts::TAU;

/// Point on the classic heart curve for parameter `t`
///
/// `x = 16 sin³t`, `y = -(13 cos t - 5 cos 2t - 2 cos 3t - cos 4t)`, with y
/// growing downwards so the lobes sit at the top in image coordinates.
pub fn heart_point(t: f64) -> (f64, f64) {
    let x = 16.0 * t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
    (x, y)
}

/// Sample `samples` evenly spaced points over one full turn, both ends included
pub fn sample_heart(samples: usize) -> Vec<(f64, f64)> {
    let last = samples.saturating_sub(1).max(1) as f64;
    (0..samples)
        .map(|i| heart_point(TAU * i as f64 / last))
        .collect()
}

/// Axis-aligned extent of a point set as `(min_x, min_y, max_x, max_y)`
pub fn bounds(points: &[(f64, f64)]) -> Option<(f64, f64, f64, f64)> {
    let (&(x0, y0), rest) = points.split_first()?;
    Some(rest.iter().fold(
        (x0, y0, x0, y0),
        |(min_x, min_y, max_x, max_y), &(x, y)| {
            (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
        },
    ))
}

/// Uniformly scale and translate points so their extent fits in a
/// `side` x `side` square centered on `center`
pub fn fit_to_square(points: &[(f64, f64)], side: f64, center: (f64, f64)) -> Vec<(f64, f64)> {
    let Some((min_x, min_y, max_x, max_y)) = bounds(points) else {
        return Vec::new();
    };

    let extent = (max_x - min_x).max(max_y - min_y);
    let scale = if extent > 0.0 { side / extent } else { 0.0 };
    let mid = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

    points
        .iter()
        .map(|&(x, y)| {
            (
                (x - mid.0).mul_add(scale, center.0),
                (y - mid.1).mul_add(scale, center.1),
            )
        })
        .collect()
}
