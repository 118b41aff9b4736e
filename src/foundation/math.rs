use crate::foundation::error::{LayoutError, LayoutResult};

/// Absolute tolerance for geometric comparisons in scene units.
pub(crate) const EPS: f64 = 1e-6;

pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= EPS * a.abs().max(b.abs()).max(1.0)
}

/// Fail fast on extents that would turn a ratio into NaN or infinity.
pub(crate) fn ensure_positive(what: &str, v: f64) -> LayoutResult<f64> {
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(LayoutError::degenerate(format!(
            "{what} must be finite and > 0 (got {v})"
        )))
    }
}

/// Uniform factor that makes `content` fit inside `avail` on both axes.
pub(crate) fn fit_factor(avail: (f64, f64), content: (f64, f64)) -> LayoutResult<f64> {
    let aw = ensure_positive("available width", avail.0)?;
    let ah = ensure_positive("available height", avail.1)?;
    let cw = ensure_positive("content width", content.0)?;
    let ch = ensure_positive("content height", content.1)?;
    Ok((aw / cw).min(ah / ch))
}

/// Leading offset that centres `content` inside `container`; 0 when it does
/// not fit.
pub(crate) fn centre_offset(container: f64, content: f64) -> f64 {
    (container - content).max(0.0) * 0.5
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
