use chrono::{DateTime, Utc};
use url::Url;
use voxhire_session_interface::{
    Identity, SessionKind, SessionRecord, SessionRecordUpdate, SessionStatus, TurnRecord,
};

use crate::error::{Error, Result};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

#[derive(Default)]
pub struct ApiClientBuilder {
    base: Option<String>,
    api_key: Option<String>,
}

impl ApiClientBuilder {
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut base = self.base.ok_or(Error::MissingBaseUrl)?;
        if !base.ends_with('/') {
            base.push('/');
        }

        Ok(ApiClient {
            http: reqwest::Client::new(),
            base: Url::parse(&base)?,
            api_key: self.api_key,
        })
    }
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateInterviewRequest<'a> {
    #[serde(flatten)]
    kind: &'a SessionKind,
    status: SessionStatus,
    started_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeResponse {
    candidate_id: Option<String>,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    fn request(&self, method: reqwest::Method, path: &str) -> Result<reqwest::RequestBuilder> {
        let url = self.base.join(path)?;
        let mut builder = self.http.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        Ok(builder)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// `POST /interviews` — create the backing interview record.
    pub async fn create_interview(
        &self,
        kind: &SessionKind,
        started_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<SessionRecord> {
        let request = CreateInterviewRequest {
            kind,
            status: SessionStatus::InProgress,
            started_at,
            expires_at,
        };

        let response = self
            .request(reqwest::Method::POST, "interviews")?
            .json(&request)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `PATCH /interviews/{id}` — the authoritative end-of-session update.
    pub async fn update_interview(
        &self,
        id: &str,
        update: &SessionRecordUpdate,
    ) -> Result<SessionRecord> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("interviews/{id}"))?
            .json(update)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// `POST /interviews/{id}/turns` — persist one extracted turn.
    pub async fn create_interview_turn(&self, turn: &TurnRecord) -> Result<()> {
        let path = format!("interviews/{}/turns", turn.session_id);
        let response = self
            .request(reqwest::Method::POST, &path)?
            .json(turn)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// `POST /interviews/{id}/analyze` — kick off downstream analysis.
    pub async fn trigger_interview_analysis(&self, id: &str) -> Result<()> {
        let response = self
            .request(reqwest::Method::POST, &format!("interviews/{id}/analyze"))?
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// `GET /auth/me` — the current candidate, if any session exists.
    ///
    /// Auth-shaped failures (401/403/404) mean "nobody", not an error.
    pub async fn current_identity(&self) -> Result<Option<Identity>> {
        let response = self.request(reqwest::Method::GET, "auth/me")?.send().await?;

        if matches!(response.status().as_u16(), 401 | 403 | 404) {
            return Ok(None);
        }

        let me: MeResponse = Self::check(response).await?.json().await?;
        Ok(me.candidate_id.map(|candidate_id| Identity { candidate_id }))
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn record_json(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "kind": "practice",
            "applicationId": "app_1",
            "status": "in_progress",
            "startedAt": "2026-08-25T10:00:00Z",
            "expiresAt": "2026-09-01T10:00:00Z",
        })
    }

    async fn client(server: &MockServer) -> ApiClient {
        ApiClient::builder()
            .api_base(server.uri())
            .api_key("secret")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn create_interview_posts_kind_and_times() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/interviews"))
            .and(header("authorization", "Bearer secret"))
            .and(body_partial_json(serde_json::json!({
                "kind": "practice",
                "applicationId": "app_1",
                "status": "in_progress",
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(record_json("iv_1")))
            .expect(1)
            .mount(&server)
            .await;

        let record = client(&server)
            .await
            .create_interview(
                &SessionKind::Practice {
                    application_id: "app_1".into(),
                },
                Utc::now(),
                Utc::now() + chrono::Duration::days(7),
            )
            .await
            .unwrap();

        assert_eq!(record.id, "iv_1");
        assert_eq!(record.status, SessionStatus::InProgress);
    }

    #[tokio::test]
    async fn update_interview_patches_transcript() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path("/interviews/iv_1"))
            .and(body_partial_json(serde_json::json!({
                "status": "processing",
                "durationSeconds": 125,
                "fullTranscript": "user: hi",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(record_json("iv_1")))
            .expect(1)
            .mount(&server)
            .await;

        let update = SessionRecordUpdate {
            status: SessionStatus::Processing,
            ended_at: Utc::now(),
            duration_seconds: 125,
            full_transcript: "user: hi".into(),
        };

        client(&server)
            .await
            .update_interview("iv_1", &update)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn turn_write_hits_nested_route() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/interviews/iv_1/turns"))
            .and(body_partial_json(serde_json::json!({
                "orderIndex": 1,
                "questionCategory": "Q1",
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let turn = TurnRecord {
            session_id: "iv_1".into(),
            order_index: 1,
            question_text: "What is closure?".into(),
            question_category: "Q1".into(),
            answer_text: "It's...".into(),
        };

        client(&server).await.create_interview_turn(&turn).await.unwrap();
    }

    #[tokio::test]
    async fn non_2xx_maps_to_status_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/interviews/iv_1/analyze"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let error = client(&server)
            .await
            .trigger_interview_analysis("iv_1")
            .await
            .unwrap_err();

        match error {
            Error::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthenticated_identity_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let identity = client(&server).await.current_identity().await.unwrap();
        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn resolved_identity_carries_candidate_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"candidateId": "cand_1"})),
            )
            .mount(&server)
            .await;

        let identity = client(&server).await.current_identity().await.unwrap();
        assert_eq!(identity.unwrap().candidate_id, "cand_1");
    }

    #[test]
    fn build_requires_base_url() {
        assert!(matches!(
            ApiClient::builder().api_key("k").build(),
            Err(Error::MissingBaseUrl)
        ));
    }
}
