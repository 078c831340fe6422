//! Scripted gateway and fixed catalog for use case tests.

use crate::conversation::ThreadStore;
use crate::ports::model_catalog::ModelCatalog;
use crate::ports::model_gateway::{GatewayError, GenerateRequest, GenerateResponse, ModelGateway};
use crate::use_cases::context::ToolContext;
use async_trait::async_trait;
use relay_domain::ModelCapabilities;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub(crate) struct MockGateway {
    responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    pub(crate) requests: Mutex<Vec<GenerateRequest>>,
    delay: Option<Duration>,
}

impl MockGateway {
    pub(crate) fn new(responses: Vec<&str>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(|r| Ok(r.to_string())).collect()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(crate) fn failing(error: GatewayError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    /// Successes and failures served in order.
    pub(crate) fn scripted(responses: Vec<Result<&str, GatewayError>>) -> Self {
        Self {
            responses: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(str::to_string))
                    .collect(),
            ),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn calls(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, GatewayError> {
        self.requests.lock().unwrap().push(request);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(GenerateResponse::text(text)),
            Some(Err(e)) => Err(e),
            None => Err(GatewayError::Other("no scripted response".into())),
        }
    }
}

pub(crate) struct FixedCatalog(Vec<ModelCapabilities>);

impl ModelCatalog for FixedCatalog {
    fn models(&self) -> &[ModelCapabilities] {
        &self.0
    }
}

pub(crate) fn catalog() -> FixedCatalog {
    FixedCatalog(vec![
        ModelCapabilities::new("flash", 70).with_aliases(vec!["fast".into()]),
        ModelCapabilities::new("pro", 90)
            .with_thinking()
            .with_code_generation(),
        ModelCapabilities::new("o3", 90)
            .with_thinking()
            .with_code_generation(),
    ])
}

pub(crate) fn context(gateway: MockGateway) -> ToolContext<MockGateway, FixedCatalog> {
    ToolContext::new(
        Arc::new(gateway),
        Arc::new(catalog()),
        Arc::new(ThreadStore::with_limits(50, Duration::from_secs(3600))),
    )
}
