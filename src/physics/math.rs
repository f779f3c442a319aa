/// Scalar type for physics calculations (f64 for precision)
pub type Scalar = f64;

/// 2D vector type for positions, velocities, and forces
pub type Vector = bevy::math::DVec2;

/// Newtonian constant of gravitation rescaled to km³·kg⁻¹·s⁻²
pub const GRAVITATIONAL_CONSTANT: Scalar = 6.67430e-11 * 1e-9;

/// Place a body on a prograde circular-ish orbit around the origin.
///
/// Returns `(position, velocity)` for a body `distance` km from the origin at
/// `angle_degrees`, moving counter-clockwise at `speed` km/s.
pub fn orbital_state(distance: Scalar, angle_degrees: Scalar, speed: Scalar) -> (Vector, Vector) {
    let angle = angle_degrees.to_radians();
    let (sin, cos) = (libm::sin(angle), libm::cos(angle));

    (
        Vector::new(distance * cos, distance * sin),
        Vector::new(-speed * sin, speed * cos),
    )
}

/// Speed of a circular orbit at radius `r` around a point mass `m`.
pub fn circular_orbit_speed(g: Scalar, m: Scalar, r: Scalar) -> Scalar {
    libm::sqrt(g * m / r)
}
