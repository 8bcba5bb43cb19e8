//! Make/model lookups against the vehicle-data API, with fixed fallback
//! lists when the service is unreachable. Lookup failures never surface
//! to callers as errors.

use std::sync::Arc;
use tracing::warn;

use crate::clients::vpic::VpicClient;

const FALLBACK_MAKES: [&str; 8] = [
    "Toyota",
    "Honda",
    "Ford",
    "Chevrolet",
    "BMW",
    "Mercedes-Benz",
    "Audi",
    "Nissan",
];

const TOYOTA_MODELS: [&str; 5] = ["Camry", "Corolla", "RAV4", "Highlander", "Tacoma"];
const HONDA_MODELS: [&str; 5] = ["Civic", "Accord", "CR-V", "Pilot", "Odyssey"];
const FORD_MODELS: [&str; 5] = ["F-150", "Mustang", "Explorer", "Escape", "Focus"];
const GENERIC_MODELS: [&str; 5] = ["Model 1", "Model 2", "Model 3", "Model 4", "Model 5"];

pub struct VehicleService {
    client: Arc<VpicClient>,
}

impl VehicleService {
    #[must_use]
    pub const fn new(client: Arc<VpicClient>) -> Self {
        Self { client }
    }

    /// Make names for a vehicle type and model year. An unreachable or
    /// failing upstream yields the fixed manufacturer list; an empty
    /// upstream result stays empty.
    pub async fn makes(&self, vehicle_type: &str, year: &str) -> Vec<String> {
        match self.client.makes_for_vehicle_type(vehicle_type, year).await {
            Ok(makes) => makes,
            Err(e) => {
                warn!("Vehicle makes lookup failed, using fallback list: {}", e);
                FALLBACK_MAKES.iter().map(ToString::to_string).collect()
            }
        }
    }

    /// Model names for a make, year, and vehicle type, with a make-keyed
    /// fallback list on upstream failure.
    pub async fn models(&self, vehicle_type: &str, year: &str, make: &str) -> Vec<String> {
        match self
            .client
            .models_for_make_year(vehicle_type, year, make)
            .await
        {
            Ok(models) => models,
            Err(e) => {
                warn!("Vehicle models lookup failed, using fallback list: {}", e);
                fallback_models(make)
            }
        }
    }
}

fn fallback_models(make: &str) -> Vec<String> {
    let models = match make {
        "Toyota" => &TOYOTA_MODELS,
        "Honda" => &HONDA_MODELS,
        "Ford" => &FORD_MODELS,
        _ => &GENERIC_MODELS,
    };

    models.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_models_known_makes() {
        assert_eq!(fallback_models("Toyota")[0], "Camry");
        assert_eq!(fallback_models("Honda")[0], "Civic");
        assert_eq!(fallback_models("Ford")[0], "F-150");
    }

    #[test]
    fn test_fallback_models_unknown_make_is_generic() {
        let models = fallback_models("Rivian");
        assert_eq!(models.len(), 5);
        assert_eq!(models[0], "Model 1");
    }

    #[test]
    fn test_fallback_models_is_case_sensitive() {
        // Make names come back from the lookup API capitalized; only the
        // exact spelling selects a branded list.
        assert_eq!(fallback_models("toyota")[0], "Model 1");
    }
}
