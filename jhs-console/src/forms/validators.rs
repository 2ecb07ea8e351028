//! Field patterns shared by the entity forms.

use once_cell::sync::Lazy;
use regex::Regex;

/// 809/829/849 area code plus seven digits, dashes or spaces optional.
pub static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(809|829|849)[- ]?\d{3}[- ]?\d{4}$").unwrap());

/// Cédula: 11 digits, optionally as 000-0000000-0.
pub static CEDULA_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{11}|\d{3}-\d{7}-\d)$").unwrap());

/// RNC: 9 digits, optionally as 0-00-00000-0.
pub static RNC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{9}|\d-\d{2}-\d{5}-\d)$").unwrap());

/// Plate: one or two letters followed by five or six digits (A123456, AB12345).
pub static PLATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{1,2}\d{5,6}$").unwrap());

/// VIN: 17 characters, letters I, O and Q excluded.
pub static VIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap());

/// Letters (accented included), spaces, apostrophes, dots and dashes.
pub static PERSON_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÜÑáéíóúüñ .'-]+$").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_numbers() {
        for ok in ["8095551234", "809-555-1234", "829 555 1234", "849-5551234"] {
            assert!(PHONE_RE.is_match(ok), "{ok}");
        }
        for bad in ["7875551234", "809555123", "809-555-12345", "(809)5551234"] {
            assert!(!PHONE_RE.is_match(bad), "{bad}");
        }
    }

    #[test]
    fn cedula_and_rnc() {
        assert!(CEDULA_RE.is_match("00112345678"));
        assert!(CEDULA_RE.is_match("001-1234567-8"));
        assert!(!CEDULA_RE.is_match("001-123456-78"));

        assert!(RNC_RE.is_match("131246795"));
        assert!(RNC_RE.is_match("1-31-24679-5"));
        assert!(!RNC_RE.is_match("13124679"));
    }

    #[test]
    fn plates_and_vins() {
        assert!(PLATE_RE.is_match("A123456"));
        assert!(PLATE_RE.is_match("AB12345"));
        assert!(!PLATE_RE.is_match("ABC1234"));

        assert!(VIN_RE.is_match("1HGCM82633A004352"));
        assert!(!VIN_RE.is_match("1HGCM82633A00435O"));
        assert!(!VIN_RE.is_match("1HGCM82633A00435"));
    }

    #[test]
    fn person_names() {
        assert!(PERSON_NAME_RE.is_match("José Peña"));
        assert!(PERSON_NAME_RE.is_match("O'Neil-Báez Jr."));
        assert!(!PERSON_NAME_RE.is_match("R2D2"));
    }
}
