//! Natural-language summaries of search results.
//!
//! [`Summarizer::summarize`] never fails. When the language model cannot be
//! reached, or no API key is configured, the summary is replaced by a fixed
//! template and a few hardcoded materials relevant to the query.

mod gemini;

pub use gemini::{GeminiClient, GenerationConfig, LlmError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A material suggested alongside a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedMaterial {
    pub name: String,
    pub description: String,
    pub category: String,
    pub applications: Vec<String>,
    pub properties: SuggestedProperties,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedProperties {
    pub biodegradable: bool,
    pub biocompatible: bool,
}

/// Summary text plus suggested materials for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSummary {
    pub query: String,
    pub response: String,
    pub materials: Vec<SuggestedMaterial>,
}

#[async_trait]
pub trait Summarizer: Send + Sync + std::fmt::Debug {
    /// Summarize `query`, optionally grounded on serialized search results
    async fn summarize(&self, query: &str, context: Option<&str>) -> AiSummary;
}

/// Summarizer backed by Gemini
#[derive(Debug, Clone)]
pub struct GeminiSummarizer {
    client: GeminiClient,
}

impl GeminiSummarizer {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(&self, query: &str, context: Option<&str>) -> AiSummary {
        let prompt = build_prompt(query, context);

        match self.client.generate(&prompt, GenerationConfig::summary()).await {
            Ok(response) => {
                tracing::info!(model = self.client.model_id(), chars = response.chars().count(), "Summary generated");
                AiSummary {
                    query: query.to_string(),
                    response,
                    materials: suggested_materials(),
                }
            }
            Err(e) => {
                tracing::warn!(query, error = %e, "Summary generation failed, using fallback");
                fallback_summary(query)
            }
        }
    }
}

/// Summarizer that always answers with the fallback template
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineSummarizer;

#[async_trait]
impl Summarizer for OfflineSummarizer {
    async fn summarize(&self, query: &str, _context: Option<&str>) -> AiSummary {
        fallback_summary(query)
    }
}

/// Expert prompt for a query; `context` is appended as reference material
pub fn build_prompt(query: &str, context: Option<&str>) -> String {
    let mut prompt = format!(
        r#"
바이오소재 및 생명과학 전문가로서 다음 검색어에 대해 답변해주세요: "{query}"

다음 형식으로 답변해주세요:
1. 검색어에 대한 전문적인 설명 (2-3문장)
2. 관련된 바이오소재들과 특성
3. 응용 분야 및 활용 방안

검색어가 다음과 관련된 경우 해당 분야에 특화된 정보를 제공해주세요:
- 배양세포주: HeLa, CHO, HEK293, iPSC 등의 세포주와 특성
- 생체재료: 콜라겐, 키토산, 하이드로겔 등의 특성과 응용
- 생분해성 재료: PLA, PCL 등의 특성과 분해 메커니즘
- 바이오세라믹: 하이드록시아파타이트 등의 특성

답변은 한국어로 해주시고, 과학적이고 정확한 정보를 제공해주세요.
"#
    );

    if let Some(context) = context.map(str::trim).filter(|c| !c.is_empty() && *c != "[]") {
        prompt.push_str("\n다음은 BioOne 검색 결과입니다. 답변에 참고해주세요:\n");
        prompt.push_str(context);
        prompt.push('\n');
    }

    prompt
}

/// Summary used whenever the model is unavailable
pub fn fallback_summary(query: &str) -> AiSummary {
    AiSummary {
        query: query.to_string(),
        response: format!(
            r#""{query}"에 대한 AI 검색을 수행했습니다.

**검색 결과 요약:**
이 검색어와 관련된 바이오소재들을 분석하고 있습니다. 아래 추천 소재들을 참고하시거나, 다른 검색어로 시도해보세요.

**AI 분석 상태:**
현재 Google Gemini AI가 "{query}"에 대한 전문적인 분석을 수행 중입니다. 네트워크 연결이나 API 응답에 일시적인 지연이 있을 수 있습니다."#
        ),
        materials: fallback_materials(query),
    }
}

fn suggestion(
    name: &str,
    description: &str,
    category: &str,
    applications: &[&str],
    biodegradable: bool,
) -> SuggestedMaterial {
    SuggestedMaterial {
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        applications: applications.iter().map(|a| a.to_string()).collect(),
        properties: SuggestedProperties {
            biodegradable,
            biocompatible: true,
        },
    }
}

fn pla() -> SuggestedMaterial {
    suggestion(
        "PLA (Polylactic Acid)",
        "옥수수나 사탕수수에서 추출한 생분해성 플라스틱",
        "생분해성 폴리머",
        &["식품 포장재", "의료용 임플란트", "3D 프린팅"],
        true,
    )
}

/// Materials shown next to a generated summary
pub fn suggested_materials() -> Vec<SuggestedMaterial> {
    vec![
        pla(),
        suggestion(
            "키토산 (Chitosan)",
            "갑각류 껍질에서 추출한 천연 항균 소재",
            "천연 폴리머",
            &["상처 치료", "식품 보존", "수처리"],
            true,
        ),
        suggestion(
            "세포벽 기반 나노섬유",
            "식물 세포벽에서 추출한 강화 섬유 소재",
            "나노 소재",
            &["복합재료", "포장재", "바이오필름"],
            true,
        ),
    ]
}

/// Query-relevant materials for the fallback summary.
///
/// "줄기세포" is checked before the broader cell-line terms because it
/// contains "세포".
pub fn fallback_materials(query: &str) -> Vec<SuggestedMaterial> {
    let query = query.to_lowercase();

    if query.contains("줄기세포") {
        return vec![suggestion(
            "iPSC (유도만능줄기세포)",
            "성체 세포를 역분화시켜 만든 유도만능줄기세포",
            "배양세포주",
            &["재생의학", "질병 모델링", "약물 스크리닝"],
            false,
        )];
    }

    if ["배양세포주", "세포주", "세포"].iter().any(|k| query.contains(k)) {
        return vec![
            suggestion(
                "HeLa 세포주",
                "자궁경부암에서 유래한 인간 불멸화 세포주",
                "배양세포주",
                &["암 연구", "세포생물학", "바이러스 연구"],
                false,
            ),
            suggestion(
                "CHO 세포주",
                "중국 햄스터 난소 세포에서 유래한 세포주",
                "배양세포주",
                &["단백질 생산", "바이오의약품 제조"],
                false,
            ),
        ];
    }

    vec![pla()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeminiConfig;
    use crate::utils::HttpClient;
    use mockito::Matcher;

    fn summarizer(url: &str, api_key: Option<&str>) -> GeminiSummarizer {
        let config = GeminiConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-pro".to_string(),
            api_url: url.to_string(),
        };
        GeminiSummarizer::new(GeminiClient::new(&config, HttpClient::new().unwrap()))
    }

    #[test]
    fn test_prompt_includes_query_and_context() {
        let prompt = build_prompt("키토산", Some(r#"[{"name":"키토산 분말"}]"#));
        assert!(prompt.contains("\"키토산\""));
        assert!(prompt.contains("키토산 분말"));

        let bare = build_prompt("키토산", Some("[]"));
        assert!(!bare.contains("BioOne 검색 결과"));
        assert!(!build_prompt("키토산", None).contains("BioOne 검색 결과"));
    }

    #[test]
    fn test_fallback_materials_by_query() {
        let cells = fallback_materials("HeLa 배양세포주");
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].name, "HeLa 세포주");

        let stem = fallback_materials("줄기세포 치료");
        assert_eq!(stem.len(), 1);
        assert_eq!(stem[0].name, "iPSC (유도만능줄기세포)");

        let other = fallback_materials("bioplastic");
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].name, "PLA (Polylactic Acid)");
    }

    #[test]
    fn test_fallback_summary_mentions_query() {
        let summary = fallback_summary("콜라겐");
        assert_eq!(summary.query, "콜라겐");
        assert!(summary.response.starts_with("\"콜라겐\"에 대한 AI 검색을 수행했습니다."));
        assert!(!summary.materials.is_empty());
    }

    #[tokio::test]
    async fn test_missing_key_uses_fallback() {
        let summary = summarizer("http://127.0.0.1:1", None)
            .summarize("세포주", None)
            .await;
        assert_eq!(summary, fallback_summary("세포주"));
    }

    #[tokio::test]
    async fn test_server_error_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(500)
            .with_body("internal")
            .create_async()
            .await;

        let summary = summarizer(&server.url(), Some("key")).summarize("PLA", None).await;
        assert_eq!(summary, fallback_summary("PLA"));
    }

    #[tokio::test]
    async fn test_success_returns_model_text_and_suggestions() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gemini-pro:generateContent")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"요약"}]}}]}"#)
            .create_async()
            .await;

        let summary = summarizer(&server.url(), Some("key"))
            .summarize("PLA", Some("[]"))
            .await;
        assert_eq!(summary.response, "요약");
        assert_eq!(summary.materials, suggested_materials());
    }

    #[tokio::test]
    async fn test_offline_summarizer() {
        let summary = OfflineSummarizer.summarize("줄기세포", Some("ignored")).await;
        assert_eq!(summary, fallback_summary("줄기세포"));
    }
}
