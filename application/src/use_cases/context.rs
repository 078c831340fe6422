//! Services shared by every tool use case.

use crate::config::{BehaviorConfig, ConversationConfig};
use crate::conversation::ThreadStore;
use crate::ports::model_catalog::ModelCatalog;
use crate::ports::model_gateway::ModelGateway;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Handles a use case needs: gateway, catalog, thread store and limits.
pub struct ToolContext<G: ModelGateway + 'static, C: ModelCatalog + 'static> {
    pub(crate) gateway: Arc<G>,
    pub(crate) catalog: Arc<C>,
    pub(crate) store: Arc<ThreadStore>,
    pub(crate) behavior: BehaviorConfig,
    pub(crate) history_token_budget: usize,
    pub(crate) cancellation_token: Option<CancellationToken>,
}

impl<G: ModelGateway + 'static, C: ModelCatalog + 'static> ToolContext<G, C> {
    pub fn new(gateway: Arc<G>, catalog: Arc<C>, store: Arc<ThreadStore>) -> Self {
        Self {
            gateway,
            catalog,
            store,
            behavior: BehaviorConfig::default(),
            history_token_budget: ConversationConfig::default().history_token_budget,
            cancellation_token: None,
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_history_token_budget(mut self, tokens: usize) -> Self {
        self.history_token_budget = tokens;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn store(&self) -> &Arc<ThreadStore> {
        &self.store
    }
}

impl<G: ModelGateway + 'static, C: ModelCatalog + 'static> Clone for ToolContext<G, C> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            catalog: Arc::clone(&self.catalog),
            store: Arc::clone(&self.store),
            behavior: self.behavior.clone(),
            history_token_budget: self.history_token_budget,
            cancellation_token: self.cancellation_token.clone(),
        }
    }
}
