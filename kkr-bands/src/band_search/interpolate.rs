/// Linear estimate of the zero between `(energy - step, previous)` and `(energy, current)`
///
/// Falls back to the midpoint of the bracket when the estimate is not finite or leaves it.
pub(crate) fn linear_root(energy: f64, step: f64, previous: f64, current: f64) -> f64 {
    let root = energy - step * current / (current - previous);
    if root.is_finite() && root >= energy - step && root <= energy {
        root
    } else {
        energy - 0.5 * step
    }
}

/// Stationary point of the parabola through three equally spaced samples ending at `energy`
///
/// With `y0, y1, y2` at `energy - 2 step, energy - step, energy` the vertex sits at
/// `energy - step - step (y2 - y0) / (2 (y2 - 2 y1 + y0))`. Falls back to the middle sample when
/// the vertex is not finite or leaves the two step window.
pub(crate) fn quadratic_stationary_point(
    energy: f64,
    step: f64,
    older: f64,
    old: f64,
    current: f64,
) -> f64 {
    let middle = energy - step;
    let vertex = middle - step * (current - older) / (2. * (current - 2. * old + older));
    if vertex.is_finite() && vertex >= energy - 2. * step && vertex <= energy {
        vertex
    } else {
        middle
    }
}
