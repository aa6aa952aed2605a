//! Field rules applied before a vehicle is created

use crate::vehicles::models::Vehicle;
use std::collections::BTreeMap;

pub const MIN_YEAR: i32 = 1900;

/// Field name -> violation messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Check every rule independently and collect all violations.
///
/// Years are accepted from 1900 up to and including `current_year + 1`.
pub fn validate_vehicle(vehicle: &Vehicle, current_year: i32) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if vehicle.name.trim().is_empty() {
        add(&mut errors, "name", "name is required".to_string());
    }
    if vehicle.brand.trim().is_empty() {
        add(&mut errors, "brand", "brand is required".to_string());
    }

    let max_year = current_year + 1;
    if !(MIN_YEAR..=max_year).contains(&vehicle.year) {
        add(
            &mut errors,
            "year",
            format!("year must be between {MIN_YEAR} and {max_year}"),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn add(errors: &mut FieldErrors, field: &str, message: String) {
    errors.entry(field.to_string()).or_default().push(message);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vehicle(name: &str, brand: &str, year: i32) -> Vehicle {
        Vehicle {
            id: 0,
            name: name.to_string(),
            brand: brand.to_string(),
            year,
        }
    }

    #[test]
    fn test_valid_vehicle() {
        assert!(validate_vehicle(&vehicle("Uno", "Fiat", 2010), 2026).is_ok());
        assert!(validate_vehicle(&vehicle("Uno", "Fiat", 1900), 2026).is_ok());
        assert!(validate_vehicle(&vehicle("Uno", "Fiat", 2027), 2026).is_ok());
    }

    #[test]
    fn test_all_failures_reported() {
        let errors = validate_vehicle(&vehicle("", "", 1899), 2026).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors["name"], vec!["name is required"]);
        assert_eq!(errors["brand"], vec!["brand is required"]);
        assert_eq!(errors["year"], vec!["year must be between 1900 and 2027"]);
    }

    #[test]
    fn test_only_invalid_fields_reported() {
        let errors = validate_vehicle(&vehicle("", "Fiat", 1899), 2026).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("year"));
        assert!(!errors.contains_key("brand"));
    }

    #[test]
    fn test_whitespace_is_empty() {
        let errors = validate_vehicle(&vehicle("  ", "\t", 2020), 2026).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_year_upper_bound() {
        let errors = validate_vehicle(&vehicle("Uno", "Fiat", 2028), 2026).unwrap_err();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["year"]);
    }
}
