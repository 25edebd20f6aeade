//! Inclusive ranges for every physical quantity the service accepts.
//!
//! Both the HTTP boundary and the adapter validators read from this table, so
//! the two layers can never disagree about a bound.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuantityLimit {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl QuantityLimit {
    /// Inclusive on both ends. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for QuantityLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    Temperature,
    Humidity,
    Rainfall,
    SoilMoisture,
    FarmArea,
}

// Indexed by `Quantity as usize`.
const LIMITS: [QuantityLimit; 9] = [
    QuantityLimit { name: "n", min: 0.0, max: 200.0 },
    QuantityLimit { name: "p", min: 0.0, max: 200.0 },
    QuantityLimit { name: "k", min: 0.0, max: 250.0 },
    QuantityLimit { name: "ph", min: 3.5, max: 10.0 },
    QuantityLimit { name: "temperature", min: 0.0, max: 55.0 },
    QuantityLimit { name: "humidity", min: 0.0, max: 100.0 },
    QuantityLimit { name: "rainfall", min: 0.0, max: 500.0 },
    QuantityLimit { name: "soil_moisture", min: 0.0, max: 100.0 },
    QuantityLimit { name: "farm_area", min: 0.1, max: 100.0 },
];

impl Quantity {
    pub const ALL: [Quantity; 9] = [
        Quantity::Nitrogen,
        Quantity::Phosphorus,
        Quantity::Potassium,
        Quantity::Ph,
        Quantity::Temperature,
        Quantity::Humidity,
        Quantity::Rainfall,
        Quantity::SoilMoisture,
        Quantity::FarmArea,
    ];

    pub fn limit(self) -> QuantityLimit {
        LIMITS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.limit().name
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.key() == key)
    }
}

/// Every registered limit, in registry order.
pub fn registry() -> impl Iterator<Item = QuantityLimit> {
    Quantity::ALL.into_iter().map(Quantity::limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limits_are_inclusive() {
        let n = Quantity::Nitrogen.limit();
        assert!(n.contains(0.0));
        assert!(n.contains(200.0));
        assert!(!n.contains(200.0001));
        assert!(!n.contains(-0.5));
        assert!(!n.contains(f64::NAN));
    }

    #[test]
    fn test_registry_table() {
        assert_eq!(registry().count(), 9);
        assert_eq!(Quantity::Ph.limit().min, 3.5);
        assert_eq!(Quantity::Potassium.limit().max, 250.0);
        assert_eq!(Quantity::FarmArea.limit().min, 0.1);
        for quantity in Quantity::ALL {
            assert_eq!(Quantity::from_key(quantity.key()), Some(quantity));
        }
        assert_eq!(Quantity::from_key("salinity"), None);
    }

    #[test]
    fn test_limit_display() {
        assert_eq!(Quantity::Nitrogen.limit().to_string(), "[0, 200]");
        assert_eq!(Quantity::Ph.limit().to_string(), "[3.5, 10]");
        assert_eq!(Quantity::FarmArea.limit().to_string(), "[0.1, 100]");
    }
}
