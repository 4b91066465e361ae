//! Archimedean spiral offsets for position search
//!
//! Yields integer offsets from a center along `r = step * θ`, stretched
//! horizontally by the canvas aspect ratio so wide canvases fill evenly.
//! Consecutive duplicate offsets are skipped.

/// Iterator over spiral offsets, starting at `(0, 0)`
#[derive(Debug, Clone)]
pub struct ArchimedeanSpiral {
    theta: f64,
    aspect: f64,
    direction: f64,
    max_radius: f64,
    last: Option<(i32, i32)>,
}

/// Angle increment between samples, in radians
const THETA_STEP: f64 = 0.1;
/// Radial growth per radian
const RADIAL_STEP: f64 = 1.0;

impl ArchimedeanSpiral {
    /// Spiral covering a `width` x `height` canvas from its center
    ///
    /// `clockwise` selects the winding direction.
    pub fn new(width: u32, height: u32, clockwise: bool) -> Self {
        let aspect = if height > 0 {
            width as f64 / height as f64
        } else {
            1.0
        };
        // Horizontal stretch makes both half-extents reachable at radius half_h
        let half_h = height.max(1) as f64 / 2.0;
        Self {
            theta: 0.0,
            aspect,
            direction: if clockwise { 1.0 } else { -1.0 },
            max_radius: half_h * std::f64::consts::SQRT_2,
            last: None,
        }
    }
}

impl Iterator for ArchimedeanSpiral {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let radius = RADIAL_STEP * self.theta;
            if radius > self.max_radius {
                return None;
            }

            let angle = self.theta * self.direction;
            let dx = (radius * angle.cos() * self.aspect).round() as i32;
            let dy = (radius * angle.sin()).round() as i32;
            self.theta += THETA_STEP;

            if self.last != Some((dx, dy)) {
                self.last = Some((dx, dy));
                return Some((dx, dy));
            }
        }
    }
}
