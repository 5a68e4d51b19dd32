//! Unit conversions.

/// Hectopascals in one pound per square inch.
pub const HPA_PER_PSI: f64 = 68.947572932;

/// Kilometres per hour in one metre per second.
pub const KMH_PER_MS: f64 = 3.6;

/// Converts degrees Celsius to degrees Fahrenheit.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Converts hectopascals to pounds per square inch.
pub fn hpa_to_psi(hpa: f64) -> f64 {
    hpa / HPA_PER_PSI
}

/// Converts metres per second to kilometres per hour.
pub fn ms_to_kmh(speed: f64) -> f64 {
    speed * KMH_PER_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(-40.0), -40.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
    }

    #[test]
    fn test_hpa_to_psi() {
        assert!((hpa_to_psi(1013.25) - 14.6959).abs() < 1e-3);
        assert_eq!(hpa_to_psi(0.0), 0.0);
    }

    #[test]
    fn test_ms_to_kmh() {
        assert_eq!(ms_to_kmh(10.0), 36.0);
        assert_eq!(ms_to_kmh(0.0), 0.0);
        assert!((ms_to_kmh(3.5) - 12.6).abs() < 1e-9);
        assert!((ms_to_kmh(5.5) - 19.8).abs() < 1e-9);
    }
}
