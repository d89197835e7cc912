/// Y axis range shared by every trend chart: the full tier score range with headroom above N1
pub const Y_BOUNDS: [f64; 2] = [1.0, 5.2];

pub const X_AXIS_TITLE: &str = "sentence";
pub const Y_AXIS_TITLE: &str = "mean difficulty (N5=1 ~ N1=5)";
pub const SERIES_LABEL: &str = "difficulty";

pub fn chart_title(user_id: &str) -> String {
    format!("JLPT difficulty trend: {user_id}")
}

/// Compute X (sequence index) bounds for a trend chart
pub fn compute_x_bounds(coords: &[(f64, f64)]) -> (f64, f64) {
    let mut bounds: Option<(f64, f64)> = None;
    for &(x, _) in coords {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(x), hi.max(x)),
            None => (x, x),
        });
    }

    match bounds {
        Some((lo, hi)) if hi - lo < 1.0 => (lo - 1.0, hi + 1.0),
        Some(range) => range,
        None => (0.0, 1.0),
    }
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}

pub fn average_label(average: f64) -> String {
    format!("overall average ({average:.2})")
}
