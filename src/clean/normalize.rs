//! Best-effort parsers for free-text quantities.
//!
//! Both parsers are total: malformed input yields `None`, never an error.

/// Parse an odometer reading such as `"12,345 km"`.
///
/// Thousands separators and the `km` unit suffix are removed; whatever
/// remains must be an integer.
pub fn normalize_mileage(raw: Option<&str>) -> Option<i64> {
    let raw = raw?;
    let stripped = raw.replace(',', "").replace(" km", "").replace("km", "");
    stripped.trim().parse::<i64>().ok()
}

/// Parse an engine displacement such as `"1500cc"` or `"1,500 cc"`.
///
/// Every ASCII digit is kept, in order, and the result read as one integer.
pub fn normalize_engine(raw: Option<&str>) -> Option<i64> {
    let digits: String = raw?.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<i64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_in_absent_out() {
        assert_eq!(normalize_mileage(None), None);
        assert_eq!(normalize_engine(None), None);
    }

    #[test]
    fn mileage_strips_separators_and_unit() {
        assert_eq!(normalize_mileage(Some("12,345 km")), Some(12345));
        assert_eq!(normalize_mileage(Some("98000km")), Some(98000));
        assert_eq!(normalize_mileage(Some("1,000,000 km")), Some(1_000_000));
        assert_eq!(normalize_mileage(Some("  500 ")), Some(500));
    }

    #[test]
    fn mileage_rejects_malformed_text() {
        assert_eq!(normalize_mileage(Some("unknown")), None);
        assert_eq!(normalize_mileage(Some("km")), None);
        assert_eq!(normalize_mileage(Some("")), None);
        assert_eq!(normalize_mileage(Some("12.5 km")), None);
        assert_eq!(normalize_mileage(Some("12345 miles")), None);
    }

    #[test]
    fn engine_keeps_every_digit() {
        assert_eq!(normalize_engine(Some("1500cc")), Some(1500));
        assert_eq!(normalize_engine(Some("1500 cc")), Some(1500));
        assert_eq!(normalize_engine(Some("cc 660")), Some(660));
        assert_eq!(normalize_engine(Some("1,500 cc")), Some(1500));
    }

    #[test]
    fn engine_joins_separate_digit_groups() {
        assert_eq!(normalize_engine(Some("1.6L")), Some(16));
        assert_eq!(normalize_engine(Some("V6 3500cc")), Some(63500));
    }

    #[test]
    fn engine_without_digits_is_absent() {
        assert_eq!(normalize_engine(Some("electric")), None);
        assert_eq!(normalize_engine(Some("")), None);
    }

    #[test]
    fn engine_overflow_is_absent() {
        assert_eq!(normalize_engine(Some("99999999999999999999999cc")), None);
    }
}
