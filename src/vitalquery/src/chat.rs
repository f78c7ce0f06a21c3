use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use vitalquery_data::{DataError, MetricsProvider};

use crate::{ChatClient, ChatError, ChatRequest};

/// Step count at which an hour counts as active.
const ACTIVE_HOUR_STEPS: u32 = 250;

/// Metrics sent alongside a chat message so the assistant can ground its answer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub steps: Option<u32>,
    /// Hours asleep.
    pub sleep: Option<f64>,
    /// Active minutes.
    pub activity: Option<u32>,
    pub resting_hr: Option<u32>,
}

impl HealthSnapshot {
    pub fn for_date(provider: &MetricsProvider, date: NaiveDate) -> Result<Self, DataError> {
        let steps = provider.steps(date)?;
        let active_hours = steps.values().filter(|s| *s >= ACTIVE_HOUR_STEPS).count() as u32;

        let sleep = provider.sleep(date);
        Ok(Self {
            steps: Some(provider.total_steps(date)?),
            sleep: (!sleep.is_empty()).then(|| sleep.asleep_hours()),
            activity: Some(active_hours * 60),
            resting_hr: Some(provider.resting_heart_rate(date)?),
        })
    }
}

/// Conversation with the remote assistant, one request in flight at a time.
pub struct ChatSession {
    client: ChatClient,
    session_id: String,
}

impl ChatSession {
    /// Starts a session, generating a fresh id when none is supplied.
    pub fn new(client: ChatClient, session_id: Option<String>) -> Self {
        let session_id = session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        Self { client, session_id }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn send(
        &mut self,
        message: &str,
        snapshot: Option<&HealthSnapshot>,
    ) -> Result<String, ChatError> {
        let reply = self
            .client
            .send(&ChatRequest {
                user_message: message,
                session_id: Some(&self.session_id),
                health_data_snapshot: snapshot,
            })
            .await?;

        if !reply.session_id.is_empty() && reply.session_id != self.session_id {
            info!("chat session is now {}", reply.session_id);
            self.session_id = reply.session_id;
        }

        Ok(reply.ai_response)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use vitalquery_algos::SAMPLE_DATE;

    use super::*;
    use crate::{ChatConfig, api::tests::respond_once};

    fn client(base_url: String) -> ChatClient {
        ChatClient::new(ChatConfig {
            base_url,
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    #[test]
    fn snapshot_for_sample_day() {
        let provider = MetricsProvider::with_sample_data();
        let snapshot = HealthSnapshot::for_date(&provider, SAMPLE_DATE).unwrap();

        // 06:00 through 20:00 each reach 250 steps
        assert_eq!(
            snapshot,
            HealthSnapshot {
                steps: Some(11_000),
                sleep: None,
                activity: Some(15 * 60),
                resting_hr: Some(57),
            }
        );
    }

    #[test]
    fn snapshot_requires_data() {
        let provider = MetricsProvider::new();
        assert!(matches!(
            HealthSnapshot::for_date(&provider, SAMPLE_DATE),
            Err(DataError::NoDataForDate(_))
        ));
    }

    #[test]
    fn new_session_gets_generated_id() {
        let session = ChatSession::new(client("http://localhost:8000".to_owned()), None);
        assert!(Uuid::parse_str(session.session_id()).is_ok());

        let session = ChatSession::new(
            client("http://localhost:8000".to_owned()),
            Some("existing".to_owned()),
        );
        assert_eq!(session.session_id(), "existing");
    }

    #[tokio::test]
    async fn adopts_session_id_from_reply() {
        let (base_url, server) =
            respond_once("200 OK", r#"{"session_id":"server-id","ai_response":"Hi!"}"#).await;

        let mut session = ChatSession::new(client(base_url), Some("local-id".to_owned()));
        let snapshot = HealthSnapshot {
            steps: Some(11_000),
            ..HealthSnapshot::default()
        };
        let text = session.send("hello", Some(&snapshot)).await.unwrap();

        assert_eq!(text, "Hi!");
        assert_eq!(session.session_id(), "server-id");

        let request = server.await.unwrap();
        assert!(request.contains(r#""session_id":"local-id""#));
        assert!(request.contains(r#""steps":11000"#));
    }
}
