use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct VpicResponse<T> {
    #[serde(rename = "Results")]
    results: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct MakeRow {
    #[serde(rename = "MakeName")]
    make_name: String,
}

#[derive(Debug, Deserialize)]
struct ModelRow {
    #[serde(rename = "Model_Name")]
    model_name: String,
}

/// Client for the government vehicle-data API (vPIC).
#[derive(Clone)]
pub struct VpicClient {
    client: Client,
    base_url: String,
}

impl VpicClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn with_shared_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Make names offered for a vehicle type in a model year.
    /// An absent `Results` field decodes as an empty list, not an error.
    pub async fn makes_for_vehicle_type(
        &self,
        vehicle_type: &str,
        year: &str,
    ) -> Result<Vec<String>> {
        let url = format!(
            "{}/vehicles/GetMakesForVehicleType/{}?format=json&modelYear={}",
            self.base_url,
            urlencoding::encode(vehicle_type),
            urlencoding::encode(year)
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("vPIC API error: {} - {}", status, body));
        }

        let response: VpicResponse<MakeRow> = response.json().await?;

        Ok(response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.make_name)
            .collect())
    }

    /// Model names for a make in a model year, narrowed to a vehicle type.
    pub async fn models_for_make_year(
        &self,
        vehicle_type: &str,
        year: &str,
        make: &str,
    ) -> Result<Vec<String>> {
        let url = format!(
            "{}/vehicles/GetModelsForMakeYear/make/{}/modelyear/{}/vehicleType/{}?format=json",
            self.base_url,
            urlencoding::encode(make),
            urlencoding::encode(year),
            urlencoding::encode(vehicle_type)
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("vPIC API error: {} - {}", status, body));
        }

        let response: VpicResponse<ModelRow> = response.json().await?;

        Ok(response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|r| r.model_name)
            .collect())
    }
}
