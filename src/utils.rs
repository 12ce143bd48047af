//! Small numeric helpers shared by the binning, fitting and plotting code.

use num_traits::ToPrimitive;

use crate::{PlotError, PlotResult};

/// Convert a slice of numbers to `f64`, rejecting values that cannot be represented.
pub fn to_f64_vec<T: ToPrimitive>(values: &[T], parameter: &str) -> PlotResult<Vec<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| {
            v.to_f64().ok_or_else(|| {
                PlotError::invalid_value(parameter, format!("element {i} is not representable as f64"))
            })
        })
        .collect()
}

/// Minimum and maximum of the finite values in `values`, or `None` if there are none.
pub fn finite_min_max<'a, I>(values: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a f64>,
{
    values
        .into_iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Format a number like C's `%.<precision>g`.
///
/// Uses scientific notation when the decimal exponent is below `-4` or at
/// least `precision`, fixed notation otherwise, and strips trailing zeros.
///
/// ```rust
/// use plot_helpers::utils::format_general;
///
/// assert_eq!(format_general(0.26, 1), "0.3");
/// assert_eq!(format_general(1700.0, 1), "2e+03");
/// assert_eq!(format_general(1823.7, 2), "1.8e+03");
/// assert_eq!(format_general(-21.4, 2), "-21");
/// ```
pub fn format_general(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let precision = precision.max(1);
    let sci = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        strip_trailing_zeros(&format!("{value:.decimals$}")).to_string()
    }
}

/// Like [`format_general`] but always prints the sign (`%+.<precision>g`).
pub fn format_general_signed(value: f64, precision: usize) -> String {
    let body = format_general(value, precision);
    if body.starts_with('-') || value.is_nan() {
        body
    } else {
        format!("+{body}")
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_format_matches_printf() {
        assert_eq!(format_general(5.0, 1), "5");
        assert_eq!(format_general(12.0, 1), "1e+01");
        assert_eq!(format_general(9.6, 1), "1e+01");
        assert_eq!(format_general(0.05, 1), "0.05");
        assert_eq!(format_general(0.00001, 1), "1e-05");
        assert_eq!(format_general(0.0, 1), "0");
        assert_eq!(format_general(2.5, 2), "2.5");
        assert_eq!(format_general(3.0, 2), "3");
        assert_eq!(format_general(123.0, 2), "1.2e+02");
        assert_eq!(format_general(f64::NAN, 2), "nan");
    }

    #[test]
    fn signed_format() {
        assert_eq!(format_general_signed(1.5, 2), "+1.5");
        assert_eq!(format_general_signed(-1.5, 2), "-1.5");
        assert_eq!(format_general_signed(0.0, 2), "+0");
    }

    #[test]
    fn min_max_skips_non_finite() {
        let values = [3.0, f64::NAN, -1.0, f64::INFINITY, 7.5];
        assert_eq!(finite_min_max(&values), Some((-1.0, 7.5)));
        assert_eq!(finite_min_max(&[f64::NAN]), None);
    }

    #[test]
    fn conversion_to_f64() {
        assert_eq!(to_f64_vec(&[1u8, 2, 3], "x").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(to_f64_vec(&[-4i64], "x").unwrap(), vec![-4.0]);
    }
}
