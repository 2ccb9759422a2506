/// Continuous linear map from a `[d0, d1]` domain to a `[r0, r1]` range.
///
/// Inputs outside the domain extrapolate unless `clamp` is set. The
/// evaluation order (normalize, then `r0 * (1 - t) + r1 * t`) is fixed:
/// generated datasets depend on it down to the last bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> LinearScale {
        LinearScale { domain, range, clamp: false }
    }

    pub fn clamped(mut self) -> LinearScale {
        self.clamp = true;
        self
    }

    pub fn apply(&self, x: f64) -> f64 {
        let (mut d0, mut d1) = self.domain;
        let (mut r0, mut r1) = self.range;
        if d1 < d0 {
            std::mem::swap(&mut d0, &mut d1);
            std::mem::swap(&mut r0, &mut r1);
        }
        let x = if self.clamp { x.max(d0).min(d1) } else { x };
        let span = d1 - d0;
        let t = if span != 0.0 { (x - d0) / span } else { 0.5 };
        r0 * (1.0 - t) + r1 * t
    }
}
