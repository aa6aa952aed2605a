//! Vehicle records and listing parameters

use serde::{Deserialize, Serialize};

/// A vehicle record.
///
/// `id` is assigned by the store on creation; any value sent with a create
/// request is ignored. Missing text fields deserialize as empty so that
/// validation can report every invalid field at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub id: i64,
    #[serde(default, alias = "nome")]
    pub name: String,
    #[serde(default, alias = "marca")]
    pub brand: String,
    #[serde(default, alias = "ano")]
    pub year: i32,
}

/// Optional, independently applied substring filters for listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleFilter {
    pub name: Option<String>,
    pub brand: Option<String>,
}

impl VehicleFilter {
    pub fn new(name: Option<String>, brand: Option<String>) -> Self {
        // Empty filters are the same as no filter.
        Self {
            name: name.filter(|n| !n.is_empty()),
            brand: brand.filter(|b| !b.is_empty()),
        }
    }

    /// Case-insensitive substring match on every filter that is set.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        contains_ignore_case(&vehicle.name, self.name.as_deref())
            && contains_ignore_case(&vehicle.brand, self.brand.as_deref())
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
    }
}

/// Query string for `GET /veiculos`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(alias = "pagina")]
    pub page: Option<i64>,
    #[serde(alias = "nome")]
    pub name: Option<String>,
    #[serde(alias = "marca")]
    pub brand: Option<String>,
}

impl ListQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1)
    }

    pub fn filter(&self) -> VehicleFilter {
        VehicleFilter::new(self.name.clone(), self.brand.clone())
    }
}
