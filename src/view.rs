//! Display transform for pan and zoom. It is applied to everything drawn,
//! points and axis labels alike.

pub const MIN_SCALE: f64 = 1e-3;
pub const MAX_SCALE: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanZoom {
    pub offset: (f64, f64),
    pub scale: f64,
}

impl Default for PanZoom {
    fn default() -> Self {
        Self {
            offset: (0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl PanZoom {
    /// Plot space to screen space.
    pub fn apply(&self, p: (f64, f64)) -> (f64, f64) {
        (
            p.0 * self.scale + self.offset.0,
            p.1 * self.scale + self.offset.1,
        )
    }

    /// Screen space back to plot space.
    pub fn invert(&self, p: (f64, f64)) -> (f64, f64) {
        (
            (p.0 - self.offset.0) / self.scale,
            (p.1 - self.offset.1) / self.scale,
        )
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    /// Zoom by `factor` keeping the screen point `anchor` fixed. The resulting
    /// scale is clamped to `[MIN_SCALE, MAX_SCALE]`.
    pub fn zoom_about(&mut self, anchor: (f64, f64), factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let target = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        let applied = target / self.scale;
        self.offset.0 = anchor.0 - (anchor.0 - self.offset.0) * applied;
        self.offset.1 = anchor.1 - (anchor.1 - self.offset.1) * applied;
        self.scale = target;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
