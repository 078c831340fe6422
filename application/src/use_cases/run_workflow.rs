//! Run Workflow use case
//!
//! Drives one step of a workflow tool. Intermediate steps are recorded and
//! answered with guidance; the final step consolidates every recorded
//! finding and, unless disabled, asks an expert model to assess them.

use crate::error::ToolError;
use crate::ports::model_catalog::ModelCatalog;
use crate::ports::model_gateway::{GenerateRequest, ModelGateway};
use crate::use_cases::context::ToolContext;
use crate::use_cases::output::ToolOutput;
use crate::use_cases::shared::{choose_model, generate_cancellable};
use relay_domain::{
    ConversationTurn, ModelRequirements, ThinkingDepth, WorkflowKind, WorkflowPrompt,
    WorkflowRequest, WorkflowState, consolidate_findings,
};
use tracing::{debug, info};

/// Use case for the workflow tool family
pub struct RunWorkflowUseCase<G: ModelGateway + 'static, C: ModelCatalog + 'static> {
    kind: WorkflowKind,
    context: ToolContext<G, C>,
}

impl<G: ModelGateway + 'static, C: ModelCatalog + 'static> RunWorkflowUseCase<G, C> {
    pub fn new(kind: WorkflowKind, context: ToolContext<G, C>) -> Self {
        Self { kind, context }
    }

    pub async fn execute(&self, request: WorkflowRequest) -> Result<ToolOutput, ToolError> {
        let state = request.into_state()?;
        let tool = self.kind.name();
        let store = &self.context.store;

        let thread = store.resolve_or_create(state.continuation_id.as_deref(), tool);
        let thread_id = thread.thread_id;

        store.add_turn(&thread_id, state.to_turn(tool, self.kind.step_label()))?;
        debug!(
            tool,
            thread_id = %thread_id,
            step = state.step_number,
            total = state.total_steps,
            "Recorded workflow step"
        );

        if state.next_step_required {
            let content = WorkflowPrompt::guidance(self.kind, &state, &thread_id);
            return Ok(Self::step_output(content, thread_id, &state, "pause_for_next_step"));
        }

        let consolidated = consolidate_findings(&store.history(&thread_id));

        if !state.use_assistant {
            info!(tool, thread_id = %thread_id, "Workflow complete without expert");
            let body = WorkflowPrompt::findings_only(&state, &consolidated);
            let content =
                WorkflowPrompt::complete(self.kind.completion_heading(false), &body, &thread_id);
            return Ok(Self::step_output(content, thread_id, &state, "complete"));
        }

        let model = choose_model(
            self.context.catalog.as_ref(),
            state.model.as_deref(),
            &ModelRequirements::expert(),
        )
        .map_err(|e| ToolError::upstream(e, &thread_id))?;

        info!(tool, thread_id = %thread_id, model = %model.name, "Calling expert model");

        let request = GenerateRequest::new(
            &model.name,
            WorkflowPrompt::expert_request(self.kind, &consolidated, &state),
        )
        .with_system_prompt(self.kind.system_prompt())
        .with_temperature(state.temperature)
        .with_thinking(Some(state.thinking_depth.unwrap_or(ThinkingDepth::High)));

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
            ConversationTurn::assistant(response.content.clone())
                .with_tool(tool)
                .with_model(&model.name),
        )?;

        let content = WorkflowPrompt::complete(
            self.kind.completion_heading(true),
            &response.content,
            &thread_id,
        );
        Ok(Self::step_output(content, thread_id, &state, "complete").with_meta("model_used", &model.name))
    }

    fn step_output(content: String, thread_id: String, state: &WorkflowState, status: &str) -> ToolOutput {
        ToolOutput::new(content, thread_id)
            .with_meta("status", status)
            .with_meta("step_number", state.step_number)
            .with_meta("total_steps", state.total_steps)
            .with_meta("next_step_required", state.next_step_required)
            .with_meta("confidence", state.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::ports::model_gateway::GatewayError;
    use crate::use_cases::test_support::{MockGateway, context};
    use relay_domain::{Confidence, Role};
    use std::sync::Arc;

    fn step(n: u32, findings: &str, more: bool) -> WorkflowRequest {
        WorkflowRequest {
            step: Some(format!("Investigate part {n}")),
            step_number: Some(n),
            total_steps: Some(2),
            next_step_required: Some(more),
            findings: Some(findings.into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_continuing_step_returns_guidance_without_model_call() {
        let ctx = context(MockGateway::new(vec![]));
        let gateway = Arc::clone(&ctx.gateway);
        let store = Arc::clone(ctx.store());
        let mut request = step(1, "Cache misses spike at noon", true);
        request.confidence = Some(Confidence::Low);

        let output = RunWorkflowUseCase::new(WorkflowKind::Debug, ctx)
            .execute(request)
            .await
            .unwrap();

        assert!(output.content.starts_with("## Step 1 of 2"));
        assert!(output.content.contains(Confidence::Low.guidance()));
        assert_eq!(output.meta("status").unwrap(), "pause_for_next_step");
        assert!(gateway.calls().is_empty());
        assert_eq!(store.history(&output.continuation_id).len(), 1);
    }

    #[tokio::test]
    async fn test_final_step_consolidates_and_calls_expert() {
        let ctx = context(MockGateway::new(vec!["Root cause: TTL never set"]));
        let gateway = Arc::clone(&ctx.gateway);
        let store = Arc::clone(ctx.store());
        let use_case = RunWorkflowUseCase::new(WorkflowKind::Debug, ctx);

        let first = use_case
            .execute(step(1, "Cache misses spike at noon", true))
            .await
            .unwrap();
        let mut last = step(2, "Eviction job runs at noon", false);
        last.continuation_id = Some(first.continuation_id.clone());
        last.files_checked = vec!["src/cache.rs".into()];
        let output = use_case.execute(last).await.unwrap();

        assert!(output.content.starts_with("## Debug Analysis Complete"));
        assert!(output.content.contains("Root cause: TTL never set"));

        let call = &gateway.calls()[0];
        assert_eq!(call.model, "pro");
        assert_eq!(call.temperature, 0.3);
        assert_eq!(call.thinking_depth, Some(ThinkingDepth::High));
        assert_eq!(call.system_prompt, WorkflowKind::Debug.system_prompt());
        let a = call.prompt.find("Cache misses spike at noon").unwrap();
        let b = call.prompt.find("Eviction job runs at noon").unwrap();
        assert!(a < b);
        assert!(call.prompt.contains("- src/cache.rs"));

        let turns = store.history(&output.continuation_id);
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[2].role, Role::Assistant);
    }

    #[tokio::test]
    async fn test_final_step_without_assistant() {
        let ctx = context(MockGateway::new(vec![]));
        let gateway = Arc::clone(&ctx.gateway);
        let mut request = step(1, "Only finding", false);
        request.use_assistant_model = Some(false);
        request.hypothesis = Some("Clock skew".into());

        let output = RunWorkflowUseCase::new(WorkflowKind::ThinkDeep, ctx)
            .execute(request)
            .await
            .unwrap();
        assert!(output.content.starts_with("## Investigation Complete"));
        assert!(output.content.contains("**Hypothesis:** Clock skew"));
        assert!(output.content.contains("Findings: Only finding"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_expert_failure_keeps_step_turn() {
        let ctx = context(MockGateway::failing(GatewayError::ConnectionError("refused".into())));
        let store = Arc::clone(ctx.store());
        let err = RunWorkflowUseCase::new(WorkflowKind::CodeReview, ctx)
            .execute(step(1, "Unchecked index", false))
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Upstream);
        let turns = store.history(err.continuation_id().unwrap());
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].role, Role::User);
    }

    #[tokio::test]
    async fn test_cross_tool_findings_are_consolidated() {
        let ctx = context(MockGateway::new(vec!["done"]));
        let gateway = Arc::clone(&ctx.gateway);
        let first = RunWorkflowUseCase::new(WorkflowKind::Analyze, ctx.clone())
            .execute(step(1, "Layering is clean", true))
            .await
            .unwrap();

        let mut review = step(1, "One unchecked unwrap", false);
        review.continuation_id = Some(first.continuation_id.clone());
        let output = RunWorkflowUseCase::new(WorkflowKind::CodeReview, ctx)
            .execute(review)
            .await
            .unwrap();

        assert_eq!(output.continuation_id, first.continuation_id);
        let prompt = &gateway.calls()[0].prompt;
        assert!(prompt.contains("Analysis Step 1"));
        assert!(prompt.contains("Review Step 1"));
    }

    #[tokio::test]
    async fn test_missing_findings_mutates_nothing() {
        let ctx = context(MockGateway::new(vec![]));
        let store = Arc::clone(ctx.store());
        let mut request = step(1, "x", false);
        request.findings = None;
        let err = RunWorkflowUseCase::new(WorkflowKind::Debug, ctx)
            .execute(request)
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(store.stats().thread_count, 0);
    }
}
