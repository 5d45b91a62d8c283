use nom_exif::{LatLng, URational};

/// `degrees + minutes/60 + seconds/3600`.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// Southern latitudes and western longitudes are negative.
pub fn apply_reference(decimal: f64, reference: char) -> f64 {
    match reference.to_ascii_uppercase() {
        'S' | 'W' => -decimal,
        _ => decimal,
    }
}

/// Convert a nom-exif LatLng (3 URationals: deg, min, sec) to signed decimal degrees.
///
/// `None` if any component has a zero denominator.
pub fn latlng_to_decimal(latlng: &LatLng, reference: char) -> Option<f64> {
    let degrees = rational_to_f64(&latlng.0)?;
    let minutes = rational_to_f64(&latlng.1)?;
    let seconds = rational_to_f64(&latlng.2)?;
    Some(apply_reference(
        dms_to_decimal(degrees, minutes, seconds),
        reference,
    ))
}

pub(crate) fn rational_to_f64(r: &URational) -> Option<f64> {
    if r.1 == 0 {
        None
    } else {
        Some(r.0 as f64 / r.1 as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn dms_formula() {
        let v = dms_to_decimal(40.0, 44.0, 54.36);
        assert!((v - (40.0 + 44.0 / 60.0 + 54.36 / 3600.0)).abs() < EPS);
        assert!((v - 40.748433333).abs() < 1e-6);
    }

    #[test]
    fn whole_degrees() {
        assert!((dms_to_decimal(12.0, 0.0, 0.0) - 12.0).abs() < EPS);
        assert!((dms_to_decimal(0.0, 30.0, 0.0) - 0.5).abs() < EPS);
        assert!((dms_to_decimal(0.0, 0.0, 36.0) - 0.01).abs() < EPS);
    }

    #[test]
    fn reference_sign() {
        assert_eq!(apply_reference(73.5, 'W'), -73.5);
        assert_eq!(apply_reference(33.9, 'S'), -33.9);
        assert_eq!(apply_reference(33.9, 's'), -33.9);
        assert_eq!(apply_reference(48.8, 'N'), 48.8);
        assert_eq!(apply_reference(2.3, 'E'), 2.3);
    }

    #[test]
    fn latlng_conversion() {
        let latlng: LatLng = [(27, 1), (7, 1), (68, 100)].into();
        let v = latlng_to_decimal(&latlng, 'N').unwrap();
        assert!((v - dms_to_decimal(27.0, 7.0, 0.68)).abs() < EPS);

        let v = latlng_to_decimal(&latlng, 'W').unwrap();
        assert!(v < 0.0);
    }

    #[test]
    fn zero_denominator_is_none() {
        let latlng: LatLng = [(27, 1), (7, 0), (68, 100)].into();
        assert!(latlng_to_decimal(&latlng, 'N').is_none());
    }
}
