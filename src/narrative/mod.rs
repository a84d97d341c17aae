//! Generative narrative text about palace buildings.
//!
//! Calls an external text-generation endpoint with a fixed prompt template
//! and splits the reply into four sections. The operation is infallible:
//! any transport, status, or parse problem yields the static fallback
//! narrative built from the building's own metadata.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::NarrativeConfig;
use crate::models::LandmarkInfo;

const SECTION_PHILOSOPHY: &str = "### 건축 철학";
const SECTION_HISTORY: &str = "### 역사적 맥락";
const SECTION_CULTURE: &str = "### 문화적 가치";
const SECTION_MODERN: &str = "### 현대적 해석";

/// Optional visitor situation woven into the prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitorContext {
    pub address: Option<String>,
    pub distance_to_building: Option<f64>,
    pub heading: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Narrative {
    pub building_name: String,
    pub building_name_localized: String,
    pub generated_at: DateTime<Utc>,
    pub content: NarrativeContent,
    pub fallback: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NarrativeContent {
    pub philosophy: String,
    pub history: String,
    pub culture: String,
    pub modern: String,
}

pub struct NarrativeClient {
    client: Client,
    config: NarrativeConfig,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: String,
}

impl NarrativeClient {
    pub fn new(config: NarrativeConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to create HTTP client"),
            config,
        }
    }

    /// Generate the four-section narrative for a building. Never fails; the
    /// static fallback stands in whenever the upstream does not cooperate.
    pub async fn building_narrative(
        &self,
        building: &LandmarkInfo,
        visitor: &VisitorContext,
    ) -> Narrative {
        match self.generate(building, visitor).await {
            Ok(narrative) => narrative,
            Err(e) => {
                warn!("Narrative generation failed for {}: {:#}", building.id, e);
                fallback_narrative(building)
            }
        }
    }

    async fn generate(
        &self,
        building: &LandmarkInfo,
        visitor: &VisitorContext,
    ) -> anyhow::Result<Narrative> {
        let prompt = build_prompt(building, visitor);

        let request = GenerateRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: vec![Message {
                role: "user",
                content: &prompt,
            }],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("generation endpoint returned {}", response.status());
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .content
            .first()
            .map(|block| block.text.as_str())
            .unwrap_or_default();

        if text.is_empty() {
            anyhow::bail!("generation endpoint returned no text");
        }

        info!("Generated narrative for {}", building.id);
        Ok(Narrative {
            building_name: building.name.clone(),
            building_name_localized: building.name_localized.clone(),
            generated_at: Utc::now(),
            content: parse_sections(text, building),
            fallback: false,
        })
    }
}

fn build_prompt(building: &LandmarkInfo, visitor: &VisitorContext) -> String {
    let distance = visitor.distance_to_building.unwrap_or(0.0);
    let heading = visitor
        .heading
        .map(|h| format!("{}°", h.round()))
        .unwrap_or_else(|| "미상".to_string());
    let address = visitor.address.as_deref().unwrap_or("경복궁 내부");

    format!(
        "당신은 한국의 전통 건축과 역사에 대한 전문가입니다. \
         경복궁의 건축물에 대해 깊이 있는 철학적 해석과 역사적 맥락을 제공해주세요.\n\n\
         ## 현재 상황\n\
         - 건물명: {name_localized} ({name})\n\
         - 현재 위치: {address}\n\
         - GPS 좌표: {lat:.6}, {lon:.6}\n\
         - 건물과의 거리: {distance}m\n\
         - 방위각: {heading}\n\n\
         ## 건물 기본 정보\n\
         - 건립 연도: {build_year}\n\
         - 문화재 지정: {heritage}\n\
         - 주요 특징: {features}\n\
         - 기본 설명: {description}\n\n\
         ## 요청사항\n\
         다음 네 개의 섹션 제목을 그대로 사용해 한국어로 응답해주세요:\n\
         {s1}\n{s2}\n{s3}\n{s4}\n\n\
         응답 길이: 각 섹션당 2-3문단, 총 400-600자\n\
         톤: 교육적이면서도 흥미롭게, 전문적이지만 이해하기 쉽게",
        name_localized = building.name_localized,
        name = building.name,
        address = address,
        lat = building.center.lat,
        lon = building.center.lon,
        distance = distance,
        heading = heading,
        build_year = building.build_year,
        heritage = building.heritage,
        features = building.features.join(", "),
        description = building.description,
        s1 = SECTION_PHILOSOPHY,
        s2 = SECTION_HISTORY,
        s3 = SECTION_CULTURE,
        s4 = SECTION_MODERN,
    )
}

/// Split the generated text on the section headings. A heading the model
/// dropped falls back to a generic per-section sentence rather than failing
/// the whole response.
fn parse_sections(text: &str, building: &LandmarkInfo) -> NarrativeContent {
    NarrativeContent {
        philosophy: extract_section(text, SECTION_PHILOSOPHY, Some(SECTION_HISTORY))
            .unwrap_or_else(|| {
                format!("{}은 조선시대의 건축 철학을 담고 있습니다.", building.name_localized)
            }),
        history: extract_section(text, SECTION_HISTORY, Some(SECTION_CULTURE))
            .unwrap_or_else(|| "역사적으로 중요한 의미를 가진 건물입니다.".to_string()),
        culture: extract_section(text, SECTION_CULTURE, Some(SECTION_MODERN))
            .unwrap_or_else(|| "조선시대 문화의 정수를 보여주는 건축물입니다.".to_string()),
        modern: extract_section(text, SECTION_MODERN, None).unwrap_or_else(|| {
            "현재에도 우리에게 많은 교훈을 주는 소중한 문화유산입니다.".to_string()
        }),
    }
}

fn extract_section(text: &str, start_marker: &str, end_marker: Option<&str>) -> Option<String> {
    let start = text.find(start_marker)? + start_marker.len();
    let rest = &text[start..];
    let end = end_marker.and_then(|m| rest.find(m)).unwrap_or(rest.len());
    let section = rest[..end].trim();
    if section.is_empty() {
        None
    } else {
        Some(section.to_string())
    }
}

/// Static narrative assembled from the building's own metadata.
pub fn fallback_narrative(building: &LandmarkInfo) -> Narrative {
    Narrative {
        building_name: building.name.clone(),
        building_name_localized: building.name_localized.clone(),
        generated_at: Utc::now(),
        content: NarrativeContent {
            philosophy: format!(
                "{}은 조선시대의 건축 철학과 왕실의 권위를 상징하는 건물입니다. \
                 정교한 공간 배치와 아름다운 구조를 통해 조선 왕조의 이상과 가치관을 표현하고 있습니다.",
                building.name_localized
            ),
            history: format!(
                "{}에 건립된 이 건물은 경복궁의 중요한 구성 요소로서 왕실의 일상과 \
                 국정 운영에 핵심적인 역할을 담당했습니다.",
                building.build_year
            ),
            culture: format!(
                "{}로 지정된 이 건축물은 조선시대의 뛰어난 건축 기술과 예술적 감각을 \
                 보여주는 소중한 문화유산입니다.",
                building.heritage
            ),
            modern: format!(
                "현재 우리에게 {}은 전통과 현대를 잇는 다리 역할을 하며, 우리 조상들의 \
                 지혜와 미적 감각을 배울 수 있는 살아있는 교육장입니다.",
                building.name_localized
            ),
        },
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::LandmarkCatalog;

    fn sample_building() -> LandmarkInfo {
        LandmarkCatalog::builtin()
            .get("gyeonghoeru")
            .cloned()
            .expect("builtin catalog has gyeonghoeru")
    }

    #[test]
    fn test_extract_section_between_markers() {
        let text = "### 건축 철학\n누각의 미학.\n### 역사적 맥락\n태종 12년 창건.";
        assert_eq!(
            extract_section(text, SECTION_PHILOSOPHY, Some(SECTION_HISTORY)).as_deref(),
            Some("누각의 미학.")
        );
        assert_eq!(
            extract_section(text, SECTION_HISTORY, Some(SECTION_CULTURE)).as_deref(),
            Some("태종 12년 창건.")
        );
    }

    #[test]
    fn test_missing_section_falls_back_to_default() {
        let building = sample_building();
        let content = parse_sections("### 건축 철학\n물 위의 누각.", &building);
        assert_eq!(content.philosophy, "물 위의 누각.");
        assert!(content.history.contains("역사적으로"));
        assert!(content.modern.contains("문화유산"));
    }

    #[test]
    fn test_fallback_narrative_uses_metadata() {
        let building = sample_building();
        let narrative = fallback_narrative(&building);
        assert!(narrative.fallback);
        assert!(narrative.content.philosophy.contains("경회루"));
        assert!(narrative.content.history.contains("1412년"));
        assert!(narrative.content.culture.contains("국보 제224호"));
    }

    #[test]
    fn test_prompt_includes_building_facts() {
        let building = sample_building();
        let prompt = build_prompt(&building, &VisitorContext::default());
        assert!(prompt.contains("경회루"));
        assert!(prompt.contains("1412년 (태종 12년)"));
        assert!(prompt.contains(SECTION_MODERN));
    }
}
