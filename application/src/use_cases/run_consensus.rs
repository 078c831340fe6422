//! Run Consensus use case
//!
//! Orchestrates one call of a consensus run. The caller drives the run:
//!
//! 1. `step_number == 1`: record the proposal and the participant list
//! 2. each later call consults the participant at `current_model_index`
//! 3. the call that consults the last participant also synthesizes
//!
//! Progress is returned in the output metadata and must be sent back on the
//! next call; nothing is kept between calls except the thread.

use crate::error::ToolError;
use crate::ports::model_catalog::ModelCatalog;
use crate::ports::model_gateway::{GatewayError, GenerateRequest, ModelGateway};
use crate::use_cases::context::ToolContext;
use crate::use_cases::output::ToolOutput;
use crate::use_cases::shared::generate_cancellable;
use relay_domain::{
    ConsensusPhase, ConsensusRequest, ConsensusState, ConversationTurn, ModelRequirements,
    ModelResponseRecord, PromptTemplate, ValidationError, WorkflowPrompt,
};
use tracing::info;

pub const CONSENSUS_TOOL: &str = "consensus";

pub const CONSENSUS_DESCRIPTION: &str = "Gathers perspectives from several models, each arguing an assigned stance (for, against, neutral), then synthesizes a unified recommendation.";

/// Temperature for participant consultations
const CONSULTATION_TEMPERATURE: f64 = 0.7;
/// Temperature for the final synthesis
const SYNTHESIS_TEMPERATURE: f64 = 0.5;

/// Use case for running a consensus round
pub struct RunConsensusUseCase<G: ModelGateway + 'static, C: ModelCatalog + 'static> {
    context: ToolContext<G, C>,
}

impl<G: ModelGateway + 'static, C: ModelCatalog + 'static> RunConsensusUseCase<G, C> {
    pub fn new(context: ToolContext<G, C>) -> Self {
        Self { context }
    }

    pub async fn execute(&self, request: ConsensusRequest) -> Result<ToolOutput, ToolError> {
        let mut state = request.into_state()?;
        let store = &self.context.store;

        let phase = state.phase();
        if phase == ConsensusPhase::Synthesis && state.model_responses.is_empty() {
            return Err(ValidationError::MissingField("model_responses").into());
        }

        let thread =
            store.resolve_or_create(state.workflow.continuation_id.as_deref(), CONSENSUS_TOOL);
        let thread_id = thread.thread_id;

        match phase {
            ConsensusPhase::ProposalCapture => {
                info!(
                    thread_id = %thread_id,
                    participants = state.models.len(),
                    "Phase 1: Proposal recorded"
                );
                store.add_turn(&thread_id, state.proposal_turn(CONSENSUS_TOOL))?;
                let guidance = PromptTemplate::proposal_guidance(&state.models);
                Ok(Self::progress_output(&state, &guidance, thread_id))
            }
            ConsensusPhase::Consultation(index) => {
                state.recover_proposal(&thread.turns);
                self.consult(&mut state, index, &thread_id).await?;

                match state.participant(state.current_model_index).cloned() {
                    Some(next) => {
                        let guidance = state
                            .model_responses
                            .last()
                            .map(|last| {
                                PromptTemplate::consultation_guidance(
                                    index + 1,
                                    state.models.len(),
                                    &state.models[index],
                                    &last.response,
                                    &next,
                                )
                            })
                            .unwrap_or_default();
                        Ok(Self::progress_output(&state, &guidance, thread_id))
                    }
                    // The last consultation proceeds straight into synthesis.
                    None => self.synthesize(&state, thread_id).await,
                }
            }
            ConsensusPhase::Synthesis => {
                state.recover_proposal(&thread.turns);
                self.synthesize(&state, thread_id).await
            }
        }
    }

    /// Phase 2: ask one participant and record the answer
    async fn consult(
        &self,
        state: &mut ConsensusState,
        index: usize,
        thread_id: &str,
    ) -> Result<(), ToolError> {
        let participant = state.models[index].clone();
        let model = self
            .context
            .catalog
            .resolve(&participant.model)
            .ok_or_else(|| {
                ToolError::upstream(
                    GatewayError::ModelNotAvailable(participant.model.clone()),
                    thread_id,
                )
            })?;

        info!(
            thread_id,
            model = %model.name,
            stance = %participant.stance,
            position = index + 1,
            total = state.models.len(),
            "Phase 2: Consulting model"
        );

        let request = GenerateRequest::new(
            &model.name,
            PromptTemplate::stance_prompt(&state.proposal, &participant, &state.model_responses),
        )
        .with_system_prompt(PromptTemplate::stance_system(participant.stance))
        .with_temperature(CONSULTATION_TEMPERATURE)
        .with_thinking(state.workflow.thinking_depth);

        let response = generate_cancellable(
            self.context.gateway.as_ref(),
            request,
            &self.context.behavior,
            &self.context.cancellation_token,
        )
        .await
        .map_err(|e| ToolError::upstream(e, thread_id))?;

        self.context.store.add_turn(
            thread_id,
            ConversationTurn::assistant(format!(
                "[{} - {} stance]\n{}",
                participant.model, participant.stance, response.content
            ))
            .with_tool(CONSENSUS_TOOL)
            .with_model(&model.name),
        )?;

        state.record_response(ModelResponseRecord::new(&participant, response.content));
        Ok(())
    }

    /// Phase 3: synthesize every recorded response
    async fn synthesize(
        &self,
        state: &ConsensusState,
        thread_id: String,
    ) -> Result<ToolOutput, ToolError> {
        let requirements = ModelRequirements::synthesis();
        let model = self
            .context
            .catalog
            .select_best(&requirements)
            .ok_or_else(|| {
                ToolError::upstream(
                    GatewayError::ModelNotAvailable(format!(
                        "no model with intelligence >= {}",
                        requirements.min_intelligence
                    )),
                    &thread_id,
                )
            })?;

        info!(
            thread_id = %thread_id,
            model = %model.name,
            responses = state.model_responses.len(),
            "Phase 3: Synthesis"
        );

        let request = GenerateRequest::new(
            &model.name,
            PromptTemplate::synthesis_prompt(&state.proposal, &state.model_responses),
        )
        .with_system_prompt(PromptTemplate::synthesis_system())
        .with_temperature(SYNTHESIS_TEMPERATURE);

        let response = generate_cancellable(
            self.context.gateway.as_ref(),
            request,
            &self.context.behavior,
            &self.context.cancellation_token,
        )
        .await
        .map_err(|e| ToolError::upstream(e, &thread_id))?;

        self.context.store.add_turn(
            &thread_id,
            ConversationTurn::assistant(response.content.clone())
                .with_tool(CONSENSUS_TOOL)
                .with_model(&model.name),
        )?;

        let content =
            WorkflowPrompt::complete("Consensus Analysis Complete", &response.content, &thread_id);
        Ok(ToolOutput::new(content, thread_id)
            .with_meta("status", "complete")
            .with_meta("synthesis_model", &model.name)
            .with_meta("current_model_index", state.current_model_index)
            .with_meta("model_responses", &state.model_responses)
            .with_meta("models_consulted", state.model_responses.len())
            .with_meta("total_models", state.models.len()))
    }

    fn progress_output(state: &ConsensusState, guidance: &str, thread_id: String) -> ToolOutput {
        let content = PromptTemplate::consensus_step(
            state.workflow.step_number,
            state.workflow.total_steps,
            guidance,
            &thread_id,
            state.current_model_index,
            state.model_responses.len(),
            state.models.len(),
        );
        ToolOutput::new(content, thread_id)
            .with_meta("status", "pause_for_next_step")
            .with_meta("current_model_index", state.current_model_index)
            .with_meta("model_responses", &state.model_responses)
            .with_meta("models_consulted", state.model_responses.len())
            .with_meta("total_models", state.models.len())
            .with_meta("next_step_required", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::use_cases::test_support::{MockGateway, context};
    use relay_domain::{Role, Stance};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn request(value: Value) -> ConsensusRequest {
        serde_json::from_value(value).unwrap()
    }

    fn base(step_number: u32) -> Value {
        json!({
            "step": "Should we adopt a write-ahead log?",
            "step_number": step_number,
            "total_steps": 4,
            "next_step_required": true,
            "findings": "Recovery currently replays snapshots",
            "models": [
                {"model": "pro", "stance": "for"},
                {"model": "flash", "stance": "against"}
            ]
        })
    }

    /// Send the returned progress back, as a caller would.
    fn follow_up(previous: &ToolOutput, step_number: u32) -> Value {
        let mut next = base(step_number);
        next["step"] = json!(format!("Consult model {}", step_number - 1));
        next["continuation_id"] = json!(previous.continuation_id);
        next["current_model_index"] = previous.meta("current_model_index").cloned().unwrap();
        next["model_responses"] = previous.meta("model_responses").cloned().unwrap();
        next
    }

    #[tokio::test]
    async fn test_duplicate_participants_rejected_before_any_call() {
        let ctx = context(MockGateway::new(vec!["unused"]));
        let gateway = Arc::clone(&ctx.gateway);
        let store = Arc::clone(ctx.store());
        let mut value = base(1);
        value["models"] = json!([
            {"model": "pro", "stance": "for"},
            {"model": "pro", "stance": "for"}
        ]);

        let err = RunConsensusUseCase::new(ctx)
            .execute(request(value))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("duplicate model+stance combination"));
        assert!(gateway.calls().is_empty());
        assert_eq!(store.stats().thread_count, 0);
    }

    #[tokio::test]
    async fn test_single_participant_rejected() {
        let ctx = context(MockGateway::new(vec![]));
        let mut value = base(1);
        value["models"] = json!([{"model": "pro", "stance": "for"}]);
        let err = RunConsensusUseCase::new(ctx)
            .execute(request(value))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[tokio::test]
    async fn test_full_run_orders_consultation_and_synthesis() {
        let ctx = context(MockGateway::new(vec![
            "FOR: durability wins",
            "AGAINST: write amplification",
            "SYNTHESIS: adopt with batching",
        ]));
        let gateway = Arc::clone(&ctx.gateway);
        let store = Arc::clone(ctx.store());
        let use_case = RunConsensusUseCase::new(ctx);

        // Phase 1
        let first = use_case.execute(request(base(1))).await.unwrap();
        assert!(first.content.contains("1. pro (for)\n2. flash (against)"));
        assert_eq!(first.meta("current_model_index").unwrap(), 0);
        assert!(gateway.calls().is_empty());

        // First participant
        let second = use_case
            .execute(request(follow_up(&first, 2)))
            .await
            .unwrap();
        assert_eq!(second.continuation_id, first.continuation_id);
        assert_eq!(second.meta("current_model_index").unwrap(), 1);
        assert!(second.content.contains("Proceed to next step to consult: flash (against)"));

        // Last participant falls through to synthesis
        let third = use_case
            .execute(request(follow_up(&second, 3)))
            .await
            .unwrap();
        assert!(third.content.starts_with("## Consensus Analysis Complete"));
        assert!(third.content.contains("SYNTHESIS: adopt with batching"));
        assert_eq!(third.meta("models_consulted").unwrap(), 2);

        let calls = gateway.calls();
        assert_eq!(calls.len(), 3);

        assert_eq!(calls[0].model, "pro");
        assert_eq!(calls[0].temperature, 0.7);
        assert_eq!(calls[0].system_prompt, PromptTemplate::stance_system(Stance::For));
        assert!(calls[0].prompt.contains("Should we adopt a write-ahead log?"));
        assert!(!calls[0].prompt.contains("Previous Perspectives"));

        assert_eq!(calls[1].model, "flash");
        assert!(calls[1].prompt.contains("Should we adopt a write-ahead log?"));
        assert!(calls[1].prompt.contains("### pro (for)\nFOR: durability wins"));

        // Synthesis: highest score, first listed wins the tie with o3
        assert_eq!(calls[2].model, "pro");
        assert_eq!(calls[2].temperature, 0.5);
        let a = calls[2].prompt.find("FOR: durability wins").unwrap();
        let b = calls[2].prompt.find("AGAINST: write amplification").unwrap();
        assert!(a < b);

        let turns = store.history(&first.continuation_id);
        assert_eq!(turns.len(), 4);
        assert_eq!(turns[0].role, Role::User);
        assert!(turns[1].content.starts_with("[pro - for stance]"));
        assert!(turns[2].content.starts_with("[flash - against stance]"));
        assert_eq!(turns[3].content, "SYNTHESIS: adopt with batching");
    }

    #[tokio::test]
    async fn test_unknown_participant_model_is_upstream() {
        let ctx = context(MockGateway::new(vec![]));
        let store = Arc::clone(ctx.store());
        let mut value = base(2);
        value["models"] = json!([
            {"model": "mystery", "stance": "for"},
            {"model": "flash", "stance": "against"}
        ]);
        let err = RunConsensusUseCase::new(ctx)
            .execute(request(value))
            .await
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert!(err.to_string().contains("mystery"));
        let id = err.continuation_id().unwrap();
        assert!(store.history(id).is_empty());
    }

    #[tokio::test]
    async fn test_failure_mid_run_keeps_persisted_turns() {
        let ctx = context(MockGateway::scripted(vec![
            Ok("FOR: durability wins"),
            Err(GatewayError::RequestFailed("HTTP 502".into())),
        ]));
        let store = Arc::clone(ctx.store());
        let use_case = RunConsensusUseCase::new(ctx);

        let first = use_case.execute(request(base(1))).await.unwrap();
        let second = use_case
            .execute(request(follow_up(&first, 2)))
            .await
            .unwrap();
        let err = use_case
            .execute(request(follow_up(&second, 3)))
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.continuation_id(), Some(first.continuation_id.as_str()));

        let turns = store.history(&first.continuation_id);
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert!(turns[0].content.starts_with("Proposal: "));
        assert_eq!(turns[1].role, Role::Assistant);
        assert!(turns[1].content.starts_with("[pro - for stance]"));
    }

    #[tokio::test]
    async fn test_cancelled_consultation_keeps_proposal_turn() {
        let ctx = context(MockGateway::new(vec!["unused"]));
        let gateway = Arc::clone(&ctx.gateway);
        let store = Arc::clone(ctx.store());

        let first = RunConsensusUseCase::new(ctx.clone())
            .execute(request(base(1)))
            .await
            .unwrap();

        let token = CancellationToken::new();
        token.cancel();
        let err = RunConsensusUseCase::new(ctx.with_cancellation(token))
            .execute(request(follow_up(&first, 2)))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ToolError::Upstream {
                source: GatewayError::Cancelled,
                ..
            }
        ));
        assert_eq!(err.continuation_id(), Some(first.continuation_id.as_str()));
        assert!(gateway.calls().is_empty());
        assert_eq!(store.history(&first.continuation_id).len(), 1);
    }

    #[tokio::test]
    async fn test_synthesis_without_responses_is_validation() {
        let ctx = context(MockGateway::new(vec![]));
        let mut value = base(3);
        value["current_model_index"] = json!(2);
        let err = RunConsensusUseCase::new(ctx)
            .execute(request(value))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ToolError::Validation(ValidationError::MissingField("model_responses"))
        ));
    }
}
