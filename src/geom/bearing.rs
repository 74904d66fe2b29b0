use geo::Point;

/// Initial great-circle bearing from `from` toward `to`, in degrees within [0, 360).
///
/// Points are (lon, lat) in degrees. Only used to orient direction markers on
/// route lines; identical points yield 0.
pub fn bearing(from: Point<f64>, to: Point<f64>) -> f64 {
    let (phi1, phi2) = (from.y().to_radians(), to.y().to_radians());
    let delta_lambda = (to.x() - from.x()).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();
    let theta = y.atan2(x).to_degrees();

    let wrapped = (theta + 360.0) % 360.0;
    // -1e-17 + 360.0 rounds to 360.0
    if wrapped >= 360.0 || !wrapped.is_finite() { 0.0 } else { wrapped }
}
