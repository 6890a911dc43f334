//! Price parsing and currency rendering.

use crate::errors::ModelError;

pub const CURRENCY_SYMBOL: &str = "£";
pub const PRICE_NOT_AVAILABLE: &str = "Price Not Available";
pub const NO_VALID_PRICES: &str = "No valid prices available";

/// Render as currency with exactly two decimals, e.g. `£5.00`.
pub fn format(value: f64) -> String {
    format!("{CURRENCY_SYMBOL}{value:.2}")
}

pub fn display(value: Option<f64>) -> String {
    value.map(format).unwrap_or_else(|| PRICE_NOT_AVAILABLE.to_string())
}

/// Parse submitted text into a finite, non-negative amount.
pub fn parse(raw: &str) -> Result<f64, ModelError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ModelError::Validation(format!("price {raw:?} is not a number")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::Validation(format!("price {raw:?} must be a non-negative amount")));
    }
    Ok(value)
}

pub fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_two_decimals() {
        assert_eq!(format(5.0), "£5.00");
        assert_eq!(format(2.5), "£2.50");
        assert_eq!(format(4.25), "£4.25");
        assert_eq!(format(0.0), "£0.00");
        assert_eq!(format(1234.5), "£1234.50");
    }

    #[test]
    fn display_falls_back_to_unavailable() {
        assert_eq!(display(None), "Price Not Available");
        assert_eq!(display(Some(10.0)), "£10.00");
    }

    #[test]
    fn parse_accepts_plain_amounts() {
        assert_eq!(parse("3"), Ok(3.0));
        assert_eq!(parse(" 4.25 "), Ok(4.25));
        assert_eq!(parse("0"), Ok(0.0));
    }

    #[test]
    fn parse_rejects_bad_amounts() {
        for raw in ["", "abc", "-1", "NaN", "inf", "1e400"] {
            assert!(parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn mean_of_nothing_is_none() {
        assert_eq!(mean(Vec::new()), None);
        assert_eq!(mean(vec![10.0, 20.0]), Some(15.0));
    }
}
