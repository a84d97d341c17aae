//! Client for the national tourism-data API (KorService).
//!
//! A retry-free passthrough: the caller gets whatever the upstream returns,
//! reshaped into flat `TourSpot` records. Upstream failures degrade to an
//! empty list.

use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::config::TourConfig;

/// Content type id for tourist attractions in the upstream taxonomy.
const CONTENT_TYPE_ATTRACTION: u32 = 12;

/// A reshaped tourism-API record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourSpot {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    /// Distance from the query point in meters, as reported upstream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

pub struct TourClient {
    client: Client,
    config: TourConfig,
}

impl TourClient {
    pub fn new(config: TourConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(format!("{}/0.1", config.app_name))
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    /// Distance-ordered attractions around a point. Any upstream problem is
    /// logged and surfaces as an empty list.
    pub async fn nearby(&self, lat: f64, lon: f64, radius_m: u32, limit: u32) -> Vec<TourSpot> {
        match self.fetch_nearby(lat, lon, radius_m, limit, 1).await {
            Ok(spots) => spots,
            Err(e) => {
                warn!("Tourism API call failed: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_nearby(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
        limit: u32,
        page_no: u32,
    ) -> Result<Vec<TourSpot>> {
        let url = Url::parse(&format!(
            "{}/locationBasedList1",
            self.config.base_url.trim_end_matches('/')
        ))
        .context("Invalid tourism API base URL")?;

        let response = self
            .client
            .get(url)
            .query(&[
                ("serviceKey", self.config.service_key.as_str()),
                ("MobileOS", "ETC"),
                ("MobileApp", self.config.app_name.as_str()),
                ("_type", "json"),
                ("listYN", "Y"),
                // E sorts by distance from the query point
                ("arrange", "E"),
            ])
            .query(&[
                ("numOfRows", limit),
                ("pageNo", page_no),
                ("radius", radius_m),
                ("contentTypeId", CONTENT_TYPE_ATTRACTION),
            ])
            .query(&[("mapX", lon), ("mapY", lat)])
            .send()
            .await
            .context("Tourism API request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Tourism API returned status {}", response.status());
        }

        let envelope: ApiEnvelope = response
            .json()
            .await
            .context("Failed to parse tourism API response")?;

        let header = &envelope.response.header;
        if header.result_code != "0000" {
            anyhow::bail!(
                "Tourism API error {}: {}",
                header.result_code,
                header.result_msg
            );
        }

        let items = envelope
            .response
            .body
            .map(|body| body.items.into_vec())
            .unwrap_or_default();

        debug!("Tourism API returned {} spots", items.len());
        Ok(items.into_iter().map(TourSpot::from).collect())
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    response: ApiResponse,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    header: ApiHeader,
    body: Option<ApiBody>,
}

#[derive(Debug, Deserialize)]
struct ApiHeader {
    #[serde(rename = "resultCode")]
    result_code: String,
    #[serde(rename = "resultMsg", default)]
    result_msg: String,
}

#[derive(Debug, Deserialize)]
struct ApiBody {
    #[serde(default)]
    items: ApiItems,
}

/// The upstream nests results as `items.item`, collapses a single result to
/// a bare object, and sends an empty string instead of the wrapper when
/// there are none.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiItems {
    Wrapped { item: OneOrMany },
    Empty(String),
}

impl Default for ApiItems {
    fn default() -> Self {
        ApiItems::Empty(String::new())
    }
}

impl ApiItems {
    fn into_vec(self) -> Vec<RawSpot> {
        match self {
            ApiItems::Wrapped {
                item: OneOrMany::Many(spots),
            } => spots,
            ApiItems::Wrapped {
                item: OneOrMany::One(spot),
            } => vec![*spot],
            ApiItems::Empty(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<RawSpot>),
    One(Box<RawSpot>),
}

/// Raw upstream record; every field arrives as a string.
#[derive(Debug, Deserialize)]
struct RawSpot {
    #[serde(rename = "contentid")]
    content_id: String,
    title: String,
    #[serde(rename = "addr1", default)]
    addr: Option<String>,
    #[serde(default)]
    tel: Option<String>,
    #[serde(rename = "firstimage", default)]
    first_image: Option<String>,
    #[serde(rename = "mapx", default)]
    map_x: Option<String>,
    #[serde(rename = "mapy", default)]
    map_y: Option<String>,
    #[serde(rename = "dist", default)]
    dist: Option<String>,
}

impl From<RawSpot> for TourSpot {
    fn from(raw: RawSpot) -> Self {
        // Blank strings mean "no value" upstream
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.is_empty())
        }

        Self {
            id: raw.content_id,
            title: raw.title,
            address: non_empty(raw.addr),
            tel: non_empty(raw.tel),
            image: non_empty(raw.first_image),
            lat: raw.map_y.as_deref().and_then(|s| s.parse().ok()),
            lon: raw.map_x.as_deref().and_then(|s| s.parse().ok()),
            distance: raw.dist.as_deref().and_then(|s| s.parse().ok()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item_array() {
        let json = r#"{
            "response": {
                "header": {"resultCode": "0000", "resultMsg": "OK"},
                "body": {
                    "items": {"item": [
                        {"contentid": "126508", "title": "경복궁",
                         "addr1": "서울특별시 종로구 사직로 161",
                         "firstimage": "http://example.com/a.jpg",
                         "mapx": "126.9767375783", "mapy": "37.5760836609",
                         "dist": "417.3"}
                    ]},
                    "numOfRows": 10, "pageNo": 1, "totalCount": 1
                }
            }
        }"#;
        let envelope: ApiEnvelope = serde_json::from_str(json).unwrap();
        let spots = envelope.response.body.unwrap().items.into_vec();
        assert_eq!(spots.len(), 1);
        let spot = TourSpot::from(spots.into_iter().next().unwrap());
        assert_eq!(spot.id, "126508");
        assert!((spot.lat.unwrap() - 37.5760836609).abs() < 1e-9);
        assert!((spot.distance.unwrap() - 417.3).abs() < 1e-9);
    }

    #[test]
    fn test_parse_single_item_collapsed() {
        let json = r#"{
            "response": {
                "header": {"resultCode": "0000", "resultMsg": "OK"},
                "body": {
                    "items": {"item": {"contentid": "1", "title": "종묘"}},
                    "totalCount": 1
                }
            }
        }"#;
        let envelope: ApiEnvelope = serde_json::from_str(json).unwrap();
        let spots = envelope.response.body.unwrap().items.into_vec();
        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].title, "종묘");
    }

    #[test]
    fn test_parse_empty_items_string() {
        let json = r#"{
            "response": {
                "header": {"resultCode": "0000", "resultMsg": "OK"},
                "body": {"items": "", "totalCount": 0}
            }
        }"#;
        let envelope: ApiEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.response.body.unwrap().items.into_vec().is_empty());
    }

    #[test]
    fn test_blank_fields_become_none() {
        let raw = RawSpot {
            content_id: "2".to_string(),
            title: "남산".to_string(),
            addr: Some(String::new()),
            tel: None,
            first_image: Some(String::new()),
            map_x: Some("not-a-number".to_string()),
            map_y: None,
            dist: None,
        };
        let spot = TourSpot::from(raw);
        assert!(spot.address.is_none());
        assert!(spot.image.is_none());
        assert!(spot.lat.is_none());
        assert!(spot.lon.is_none());
    }
}
