#[inline]
pub fn f64_to_ordered_u64(x: f64) -> u64 {
    let bits = x.to_bits();
    if bits & 0x8000_0000_0000_0000 != 0 {
        !bits
    } else {
        bits | 0x8000_0000_0000_0000
    }
}

#[inline]
pub fn ulp_diff(a: f64, b: f64) -> u64 {
    let ua = f64_to_ordered_u64(a);
    let ub = f64_to_ordered_u64(b);
    ua.abs_diff(ub)
}

#[track_caller]
pub fn assert_float_eq(a: f64, b: f64, max_ulp: u64) {
    if a == 0.0 && b == 0.0 {
        return;
    }
    assert!(a.is_finite() && b.is_finite());
    let d = ulp_diff(a, b);
    assert!(
        d <= max_ulp,
        "ULP={} exceeds {}, a={} (0x{:016x}) b={} (0x{:016x})",
        d,
        max_ulp,
        a,
        a.to_bits(),
        b,
        b.to_bits()
    );
}

#[track_caller]
pub fn assert_abs_diff(a: f64, b: f64, tolerance: f64, ctx: &str) {
    assert!(
        a.is_finite() && b.is_finite(),
        "non-finite value in {}",
        ctx
    );
    let d = (a - b).abs();
    assert!(
        d <= tolerance,
        "{}: |{} - {}| = {:.3e} exceeds {:.3e}",
        ctx,
        a,
        b,
        d,
        tolerance
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ulp_diff_adjacent() {
        let a = 1.0f64;
        let b = f64::from_bits(a.to_bits() + 1);
        assert_eq!(ulp_diff(a, b), 1);
    }

    #[test]
    fn test_assert_float_eq_zero() {
        assert_float_eq(0.0, 0.0, 0);
    }

    #[test]
    fn test_assert_abs_diff() {
        assert_abs_diff(1.0, 1.0 + 1e-12, 1e-9, "close values");
    }
}
