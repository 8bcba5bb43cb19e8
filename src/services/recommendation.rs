//! Product recommendation via an external chat-completion API.
//!
//! Builds a prompt from the search request, asks the completion endpoint
//! for exactly three JSON results, and validates the reply. Any failure
//! along the way (transport, non-2xx, unparseable or malformed reply)
//! falls back to deterministic template-generated results so the search
//! path never surfaces an upstream error.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::clients::openrouter::OpenRouterClient;

const SYSTEM_PROMPT: &str =
    "You are an automotive parts expert that responds only with JSON.";

const RESULT_COUNT: usize = 3;

const FALLBACK_IMAGE_URLS: [&str; 3] = [
    "https://images.unsplash.com/photo-1486262715619-67b85e0b08d3?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "https://images.unsplash.com/photo-1492144534655-ae79c964c9d7?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
    "https://images.unsplash.com/photo-1609752788425-2b8696381d95?ixlib=rb-1.2.1&auto=format&fit=crop&w=1350&q=80",
];

/// Rating used when a reply's conditionRating cannot be coerced.
const DEFAULT_RATING: i32 = 75;

/// Search request for a product recommendation.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pub vehicle_type: String,
    pub year: String,
    pub make: String,
    pub model: String,
    pub mileage: String,
    pub part_search: String,
}

/// A single recommended part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResult {
    pub id: String,
    pub name: String,
    pub description: String,
    pub condition_rating: i32,
    pub estimated_price: String,
    pub image_url: String,
}

pub struct RecommendationService {
    client: OpenRouterClient,
}

impl RecommendationService {
    #[must_use]
    pub const fn new(client: OpenRouterClient) -> Self {
        Self { client }
    }

    /// Produce exactly three results for the query. Infallible: upstream
    /// failures are masked by the deterministic fallback.
    pub async fn recommend(&self, query: &ProductQuery) -> Vec<ProductResult> {
        let prompt = build_prompt(query);

        let content = match self.client.complete(SYSTEM_PROMPT, &prompt).await {
            Ok(content) => content,
            Err(e) => {
                warn!("Completion request failed, using fallback results: {}", e);
                return fallback_results(query);
            }
        };

        match parse_results(&content) {
            Some(results) => results,
            None => {
                warn!("Completion reply was not a usable 3-result JSON array, using fallback");
                fallback_results(query)
            }
        }
    }
}

/// Fixed-template instruction embedding the search inputs. The reply format
/// is pinned down to a bare JSON array of three objects.
fn build_prompt(query: &ProductQuery) -> String {
    format!(
        r#"You are an automotive parts expert. Please generate detailed information for the following automotive part search:

Vehicle Details:
- Type: {vehicle_type}
- Year: {year}
- Make: {make}
- Model: {model}
- Mileage/Hours: {mileage}

Part/Product Searched: {part_search}

For each result (generate 3 results), provide:
1. Product name
2. Detailed description including compatibility and features
3. Condition rating as a percentage (between 50% and 98%)
4. Estimated price in USD

Format your response as JSON with this structure:
[
  {{
    "id": "unique-id",
    "name": "Product Name",
    "description": "Detailed product description",
    "conditionRating": 85,
    "estimatedPrice": "$XX.XX",
    "imageUrl": "https://images.unsplash.com/photo-URL"
  }}
]

Only return the JSON array with no additional text or commentary."#,
        vehicle_type = query.vehicle_type,
        year = query.year,
        make = query.make,
        model = query.model,
        mileage = query.mileage,
        part_search = query.part_search,
    )
}

/// Strict parse of the reply text. Returns `None` unless the trimmed text
/// is a JSON array holding exactly three usable result objects.
fn parse_results(content: &str) -> Option<Vec<ProductResult>> {
    let value: Value = serde_json::from_str(content.trim()).ok()?;
    let items = value.as_array()?;

    if items.len() != RESULT_COUNT {
        return None;
    }

    let mut results = Vec::with_capacity(RESULT_COUNT);
    for (index, item) in items.iter().enumerate() {
        results.push(parse_result(item, index)?);
    }

    Some(results)
}

fn parse_result(item: &Value, index: usize) -> Option<ProductResult> {
    let obj = item.as_object()?;

    let name = non_empty_str(obj.get("name"))?;
    let description = non_empty_str(obj.get("description"))?;
    let estimated_price = non_empty_str(obj.get("estimatedPrice"))?;
    let image_url = non_empty_str(obj.get("imageUrl"))?;

    let id = non_empty_str(obj.get("id")).unwrap_or_else(|| format!("result-{}", index + 1));

    Some(ProductResult {
        id,
        name,
        description,
        condition_rating: coerce_rating(obj.get("conditionRating")),
        estimated_price,
        image_url,
    })
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    let s = value?.as_str()?;
    if s.is_empty() {
        return None;
    }
    Some(s.to_string())
}

/// Coerce a reply's conditionRating into a bounded integer. Numbers pass
/// through, strings are read as leading digits, anything else becomes the
/// default. The result is clamped to [0, 100].
fn coerce_rating(value: Option<&Value>) -> i32 {
    let rating = match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map_or(DEFAULT_RATING, |n| i32::try_from(n).unwrap_or(DEFAULT_RATING)),
        Some(Value::String(s)) => {
            let digits: String = s.chars().take_while(char::is_ascii_digit).collect();
            digits.parse().unwrap_or(DEFAULT_RATING)
        }
        _ => DEFAULT_RATING,
    };

    rating.clamp(0, 100)
}

/// Deterministic template-generated results. No randomness, no clock reads:
/// equal inputs always yield byte-identical output.
pub fn fallback_results(query: &ProductQuery) -> Vec<ProductResult> {
    let ProductQuery {
        year,
        make,
        model,
        part_search,
        ..
    } = query;

    // Compatibility range for the economy kit; a non-numeric year keeps
    // the range degenerate rather than failing.
    let range_end = year
        .parse::<i32>()
        .map_or_else(|_| year.clone(), |y| (y + 5).to_string());

    vec![
        ProductResult {
            id: "fallback-1".to_string(),
            name: format!("Premium {part_search} for {year} {make} {model}"),
            description: format!(
                "High-quality {part_search} specifically designed for your {year} {make} {model}. \
                 Features enhanced durability and performance compared to standard options."
            ),
            condition_rating: 85,
            estimated_price: "$79.99".to_string(),
            image_url: FALLBACK_IMAGE_URLS[0].to_string(),
        },
        ProductResult {
            id: "fallback-2".to_string(),
            name: format!("OEM Replacement {part_search}"),
            description: format!(
                "Genuine OEM specification replacement {part_search} for {make} vehicles. \
                 Direct fit for your {year} {model} with factory-level quality."
            ),
            condition_rating: 92,
            estimated_price: "$129.99".to_string(),
            image_url: FALLBACK_IMAGE_URLS[1].to_string(),
        },
        ProductResult {
            id: "fallback-3".to_string(),
            name: format!("Economy {part_search} Kit"),
            description: format!(
                "Budget-friendly complete {part_search} kit compatible with {year}-{range_end} \
                 {make} {model} models. Includes all necessary components for installation."
            ),
            condition_rating: 78,
            estimated_price: "$59.99".to_string(),
            image_url: FALLBACK_IMAGE_URLS[2].to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_query() -> ProductQuery {
        ProductQuery {
            vehicle_type: "car".to_string(),
            year: "2018".to_string(),
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            mileage: "60000".to_string(),
            part_search: "brake pads".to_string(),
        }
    }

    #[test]
    fn test_build_prompt_embeds_inputs() {
        let prompt = build_prompt(&sample_query());

        assert!(prompt.contains("- Type: car"));
        assert!(prompt.contains("- Year: 2018"));
        assert!(prompt.contains("- Make: Toyota"));
        assert!(prompt.contains("- Model: Camry"));
        assert!(prompt.contains("- Mileage/Hours: 60000"));
        assert!(prompt.contains("Part/Product Searched: brake pads"));
        assert!(prompt.contains("Only return the JSON array"));
    }

    #[test]
    fn test_parse_results_happy_path() {
        let content = r#"[
            {"id": "a", "name": "Pad Set", "description": "Front axle", "conditionRating": 90, "estimatedPrice": "$45.00", "imageUrl": "https://img/1"},
            {"id": "b", "name": "Rotor Kit", "description": "Vented", "conditionRating": "87%", "estimatedPrice": "$120.00", "imageUrl": "https://img/2"},
            {"id": "c", "name": "Caliper", "description": "Remanufactured", "conditionRating": null, "estimatedPrice": "$80.00", "imageUrl": "https://img/3"}
        ]"#;

        let results = parse_results(content).expect("should parse");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].condition_rating, 90);
        assert_eq!(results[1].condition_rating, 87);
        assert_eq!(results[2].condition_rating, 75);
        assert_eq!(results[0].name, "Pad Set");
    }

    #[test]
    fn test_parse_results_rejects_non_array() {
        assert!(parse_results("{\"name\": \"x\"}").is_none());
        assert!(parse_results("not json at all").is_none());
        assert!(parse_results("").is_none());
    }

    #[test]
    fn test_parse_results_rejects_wrong_arity() {
        let two = r#"[
            {"id": "a", "name": "A", "description": "d", "conditionRating": 90, "estimatedPrice": "$1", "imageUrl": "u"},
            {"id": "b", "name": "B", "description": "d", "conditionRating": 90, "estimatedPrice": "$1", "imageUrl": "u"}
        ]"#;
        assert!(parse_results(two).is_none());
    }

    #[test]
    fn test_parse_results_rejects_missing_fields() {
        let missing_name = r#"[
            {"id": "a", "description": "d", "conditionRating": 90, "estimatedPrice": "$1", "imageUrl": "u"},
            {"id": "b", "name": "B", "description": "d", "conditionRating": 90, "estimatedPrice": "$1", "imageUrl": "u"},
            {"id": "c", "name": "C", "description": "d", "conditionRating": 90, "estimatedPrice": "$1", "imageUrl": "u"}
        ]"#;
        assert!(parse_results(missing_name).is_none());
    }

    #[test]
    fn test_parse_results_tolerates_leading_whitespace() {
        let content = "\n  [\n{\"id\": \"a\", \"name\": \"A\", \"description\": \"d\", \"conditionRating\": 90, \"estimatedPrice\": \"$1\", \"imageUrl\": \"u\"},\n{\"id\": \"b\", \"name\": \"B\", \"description\": \"d\", \"conditionRating\": 90, \"estimatedPrice\": \"$1\", \"imageUrl\": \"u\"},\n{\"id\": \"c\", \"name\": \"C\", \"description\": \"d\", \"conditionRating\": 90, \"estimatedPrice\": \"$1\", \"imageUrl\": \"u\"}\n]  ";
        assert!(parse_results(content).is_some());
    }

    #[test]
    fn test_coerce_rating() {
        use serde_json::json;

        assert_eq!(coerce_rating(Some(&json!(85))), 85);
        assert_eq!(coerce_rating(Some(&json!(85.9))), 85);
        assert_eq!(coerce_rating(Some(&json!("92"))), 92);
        assert_eq!(coerce_rating(Some(&json!("92% condition"))), 92);
        assert_eq!(coerce_rating(Some(&json!("like new"))), 75);
        assert_eq!(coerce_rating(Some(&json!(null))), 75);
        assert_eq!(coerce_rating(None), 75);
        // Out-of-range values are clamped to the contract bounds
        assert_eq!(coerce_rating(Some(&json!(150))), 100);
        assert_eq!(coerce_rating(Some(&json!(-3))), 0);
        assert_eq!(coerce_rating(Some(&json!("150"))), 100);
    }

    #[test]
    fn test_fallback_results_shape() {
        let results = fallback_results(&sample_query());

        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].name,
            "Premium brake pads for 2018 Toyota Camry"
        );
        assert_eq!(results[1].name, "OEM Replacement brake pads");
        assert_eq!(results[2].name, "Economy brake pads Kit");
        assert_eq!(results[0].condition_rating, 85);
        assert_eq!(results[1].condition_rating, 92);
        assert_eq!(results[2].condition_rating, 78);
        assert_eq!(results[0].estimated_price, "$79.99");
        assert_eq!(results[1].estimated_price, "$129.99");
        assert_eq!(results[2].estimated_price, "$59.99");
        assert!(results[2].description.contains("2018-2023"));

        for result in &results {
            assert!((0..=100).contains(&result.condition_rating));
            assert!(!result.name.is_empty());
            assert!(!result.description.is_empty());
            assert!(!result.estimated_price.is_empty());
            assert!(!result.image_url.is_empty());
        }
    }

    #[test]
    fn test_fallback_results_deterministic() {
        let query = sample_query();
        assert_eq!(fallback_results(&query), fallback_results(&query));

        let a = serde_json::to_vec(&fallback_results(&query)).unwrap();
        let b = serde_json::to_vec(&fallback_results(&query)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_results_non_numeric_year() {
        let mut query = sample_query();
        query.year = "unknown".to_string();

        let results = fallback_results(&query);
        assert!(results[2].description.contains("unknown-unknown"));
    }
}
