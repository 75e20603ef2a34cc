//! Legendre polynomial basis on `[-1, 1]`.
//!
//! Polynomial fits are solved in this basis rather than in raw powers of `x`.
//! Raw monomials on `[0, 1]` become nearly collinear past degree ~8, while the
//! Legendre columns stay close to orthogonal on evenly spread data.
//!
//! The span of `P_0..P_d` equals the span of `1, x, .., x^d`, so predictions
//! (and residuals) are the same as a monomial fit of the same degree.

/// Map `x ∈ [lo, hi]` affinely onto `[-1, 1]`.
///
/// A degenerate domain (`hi <= lo`) maps everything to `0`.
pub fn normalize(x: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return 0.0;
    }
    2.0 * (x - lo) / span - 1.0
}

/// Fill `out` with `P_0(u) .. P_{out.len()-1}(u)`.
///
/// Uses Bonnet's recurrence: `(k+1) P_{k+1} = (2k+1) u P_k - k P_{k-1}`.
pub fn legendre_row(u: f64, out: &mut [f64]) {
    if out.is_empty() {
        return;
    }
    out[0] = 1.0;
    if out.len() == 1 {
        return;
    }
    out[1] = u;
    for k in 1..out.len() - 1 {
        let kf = k as f64;
        out[k + 1] = ((2.0 * kf + 1.0) * u * out[k] - kf * out[k - 1]) / (kf + 1.0);
    }
}

/// Evaluate `Σ c_k P_k(u)` with Clenshaw's recurrence.
pub fn legendre_eval(u: f64, coefficients: &[f64]) -> f64 {
    let mut b1 = 0.0;
    let mut b2 = 0.0;
    for k in (0..coefficients.len()).rev() {
        let kf = k as f64;
        // alpha_k = (2k+1)/(k+1) u, beta_{k+1} = -(k+1)/(k+2)
        let alpha = (2.0 * kf + 1.0) / (kf + 1.0) * u;
        let beta = -(kf + 1.0) / (kf + 2.0);
        let b0 = coefficients[k] + alpha * b1 + beta * b2;
        b2 = b1;
        b1 = b0;
    }
    b1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legendre_matches_closed_forms() {
        let mut row = [0.0; 4];
        for &u in &[-1.0, -0.3, 0.0, 0.5, 1.0] {
            legendre_row(u, &mut row);
            assert!((row[0] - 1.0).abs() < 1e-12);
            assert!((row[1] - u).abs() < 1e-12);
            assert!((row[2] - 0.5 * (3.0 * u * u - 1.0)).abs() < 1e-12);
            assert!((row[3] - 0.5 * (5.0 * u * u * u - 3.0 * u)).abs() < 1e-12);
        }
    }

    #[test]
    fn clenshaw_agrees_with_row_dot_product() {
        let coefficients = [0.4, -1.2, 0.7, 2.5, -0.3, 0.05];
        let mut row = [0.0; 6];
        for i in 0..=20 {
            let u = -1.0 + i as f64 * 0.1;
            legendre_row(u, &mut row);
            let direct: f64 = row.iter().zip(coefficients.iter()).map(|(p, c)| p * c).sum();
            let clenshaw = legendre_eval(u, &coefficients);
            assert!((direct - clenshaw).abs() < 1e-12, "u={u}: {direct} vs {clenshaw}");
        }
    }

    #[test]
    fn normalize_maps_endpoints() {
        assert_eq!(normalize(2.0, 2.0, 6.0), -1.0);
        assert_eq!(normalize(6.0, 2.0, 6.0), 1.0);
        assert_eq!(normalize(4.0, 2.0, 6.0), 0.0);
        assert_eq!(normalize(3.0, 1.0, 1.0), 0.0);
    }
}
