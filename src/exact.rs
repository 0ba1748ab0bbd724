use std::f64::consts::SQRT_2;

/// Critical temperature of the square-lattice Ising model in units of
/// J / k_B: `T_c = 2 / ln(1 + sqrt(2))`, about 2.2692.
pub fn critical_temperature() -> f64 {
    2.0 / (1.0 + SQRT_2).ln()
}

/// Onsager-Yang spontaneous magnetization per site for J = 1:
/// `(1 - sinh(2/T)^-4)^(1/8)` below the critical temperature, zero at
/// and above it. Reference curve for the magnetization figure.
pub fn spontaneous_magnetization(temperature: f64) -> f64 {
    if temperature <= 0.0 {
        return 1.0;
    }
    if temperature >= critical_temperature() {
        return 0.0;
    }
    let s = (2.0 / temperature).sinh();
    (1.0 - s.powi(-4)).powf(0.125)
}
