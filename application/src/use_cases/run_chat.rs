//! Run Chat use case
//!
//! Single-shot conversation with one model, optionally continuing a thread.

use crate::error::ToolError;
use crate::ports::model_catalog::ModelCatalog;
use crate::ports::model_gateway::{GenerateRequest, ModelGateway};
use crate::use_cases::context::ToolContext;
use crate::use_cases::output::ToolOutput;
use crate::use_cases::shared::{choose_model, generate_cancellable};
use relay_domain::{
    ChatRequest, ConversationTurn, HistoryWindow, ModelRequirements, WorkflowPrompt,
};
use tracing::info;

pub const CHAT_TOOL: &str = "chat";

pub const CHAT_DESCRIPTION: &str =
    "General chat and collaborative thinking with a single model. Continue any thread with continuation_id.";

/// Use case for the chat tool
pub struct RunChatUseCase<G: ModelGateway + 'static, C: ModelCatalog + 'static> {
    context: ToolContext<G, C>,
}

impl<G: ModelGateway + 'static, C: ModelCatalog + 'static> RunChatUseCase<G, C> {
    pub fn new(context: ToolContext<G, C>) -> Self {
        Self { context }
    }

    pub async fn execute(&self, request: ChatRequest) -> Result<ToolOutput, ToolError> {
        let state = request.into_state()?;
        let store = &self.context.store;

        let thread = store.resolve_or_create(state.continuation_id.as_deref(), CHAT_TOOL);
        let thread_id = thread.thread_id.clone();

        let history = HistoryWindow::new(self.context.history_token_budget).select(&thread.turns);
        let summary = (!thread.turns.is_empty()).then(|| HistoryWindow::summary(&thread));

        let model = choose_model(
            self.context.catalog.as_ref(),
            state.model.as_deref(),
            &ModelRequirements::default(),
        )
        .map_err(|e| ToolError::upstream(e, &thread_id))?;

        info!(
            thread_id = %thread_id,
            model = %model.name,
            history_turns = history.len(),
            "Chat request"
        );

        let request = GenerateRequest::new(&model.name, state.full_prompt())
            .with_system_prompt(WorkflowPrompt::chat_system(summary.as_deref()))
            .with_temperature(state.temperature)
            .with_history(history)
            .with_thinking(state.thinking_depth);

        let response = generate_cancellable(
            self.context.gateway.as_ref(),
            request,
            &self.context.behavior,
            &self.context.cancellation_token,
        )
        .await
        .map_err(|e| ToolError::upstream(e, &thread_id))?;

        store.add_turn(
            &thread_id,
            ConversationTurn::user(state.prompt.clone())
                .with_tool(CHAT_TOOL)
                .with_files(state.files.clone())
                .with_images(state.images.clone()),
        )?;
        store.add_turn(
            &thread_id,
            ConversationTurn::assistant(response.content.clone())
                .with_tool(CHAT_TOOL)
                .with_model(&model.name),
        )?;

        let content = format!("{}\n\n---\ncontinuation_id: {}", response.content, thread_id);
        Ok(ToolOutput::new(content, thread_id)
            .with_meta("model_used", &model.name)
            .with_meta("tokens_used", response.tokens_used.total()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::ports::model_gateway::GatewayError;
    use crate::use_cases::test_support::{MockGateway, context};
    use relay_domain::Role;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn chat(prompt: &str) -> ChatRequest {
        ChatRequest {
            prompt: Some(prompt.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_chat_persists_both_turns() {
        let ctx = context(MockGateway::new(vec!["Use a B-tree."]));
        let store = Arc::clone(ctx.store());
        let use_case = RunChatUseCase::new(ctx);

        let output = use_case.execute(chat("Which index?")).await.unwrap();
        assert!(output.content.starts_with("Use a B-tree."));
        assert!(output.content.ends_with(&output.continuation_id));

        let turns = store.history(&output.continuation_id);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[1].model_name.as_deref(), Some("pro"));
    }

    #[tokio::test]
    async fn test_continuation_sends_history_and_summary() {
        let ctx = context(MockGateway::new(vec!["first", "second"]));
        let gateway = Arc::clone(&ctx.gateway);
        let use_case = RunChatUseCase::new(ctx);

        let first = use_case.execute(chat("one")).await.unwrap();
        let mut next = chat("two");
        next.continuation_id = Some(first.continuation_id.clone());
        let second = use_case.execute(next).await.unwrap();
        assert_eq!(second.continuation_id, first.continuation_id);

        let calls = gateway.calls();
        assert!(calls[0].history.is_empty());
        assert!(!calls[0].system_prompt.contains("Conversation Context"));
        assert_eq!(calls[1].history.len(), 2);
        assert!(calls[1].system_prompt.starts_with("## Conversation Context"));
    }

    #[tokio::test]
    async fn test_explicit_alias_and_temperature() {
        let ctx = context(MockGateway::new(vec!["ok"]));
        let gateway = Arc::clone(&ctx.gateway);
        let mut request = chat("hi");
        request.model = Some("fast".into());
        request.temperature = Some(0.2);
        RunChatUseCase::new(ctx).execute(request).await.unwrap();

        let call = &gateway.calls()[0];
        assert_eq!(call.model, "flash");
        assert_eq!(call.temperature, 0.2);
    }

    #[tokio::test]
    async fn test_unknown_model_is_upstream_and_persists_nothing() {
        let ctx = context(MockGateway::new(vec!["unused"]));
        let store = Arc::clone(ctx.store());
        let mut request = chat("hi");
        request.model = Some("gpt-unknown".into());

        let err = RunChatUseCase::new(ctx).execute(request).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Upstream);
        let id = err.continuation_id().unwrap();
        assert!(store.history(id).is_empty());
    }

    #[tokio::test]
    async fn test_gateway_failure_writes_no_turns() {
        let ctx = context(MockGateway::failing(GatewayError::RequestFailed("503".into())));
        let store = Arc::clone(ctx.store());
        let err = RunChatUseCase::new(ctx).execute(chat("hi")).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(store.stats().total_turns, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let ctx = context(MockGateway::new(vec!["late"]).with_delay(Duration::from_secs(30)))
            .with_behavior(crate::config::BehaviorConfig::with_timeout_seconds(5));
        let err = RunChatUseCase::new(ctx).execute(chat("hi")).await.unwrap_err();
        assert!(matches!(
            err,
            ToolError::Upstream {
                source: GatewayError::Timeout,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_cancelled_before_call() {
        let token = CancellationToken::new();
        token.cancel();
        let ctx = context(MockGateway::new(vec!["unused"])).with_cancellation(token);
        let err = RunChatUseCase::new(ctx).execute(chat("hi")).await.unwrap_err();
        assert!(matches!(
            err,
            ToolError::Upstream {
                source: GatewayError::Cancelled,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_prompt_is_validation() {
        let ctx = context(MockGateway::new(vec![]));
        let store = Arc::clone(ctx.store());
        let err = RunChatUseCase::new(ctx)
            .execute(ChatRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(store.stats().thread_count, 0);
    }
}
