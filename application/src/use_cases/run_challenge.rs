//! Run Challenge use case
//!
//! Asks one model to argue against an idea, continuing a thread if given.

use crate::error::ToolError;
use crate::ports::model_catalog::ModelCatalog;
use crate::ports::model_gateway::{GenerateRequest, ModelGateway};
use crate::use_cases::context::ToolContext;
use crate::use_cases::output::ToolOutput;
use crate::use_cases::shared::{choose_model, generate_cancellable};
use relay_domain::{
    CHALLENGE_SYSTEM_PROMPT, ChallengeRequest, ConversationTurn, HistoryWindow, ModelRequirements,
};
use tracing::info;

pub const CHALLENGE_TOOL: &str = "challenge";

pub const CHALLENGE_DESCRIPTION: &str =
    "Critically analyze ideas, code, or architecture decisions to find flaws and improvements.";

pub struct RunChallengeUseCase<G: ModelGateway + 'static, C: ModelCatalog + 'static> {
    context: ToolContext<G, C>,
}

impl<G: ModelGateway + 'static, C: ModelCatalog + 'static> RunChallengeUseCase<G, C> {
    pub fn new(context: ToolContext<G, C>) -> Self {
        Self { context }
    }

    pub async fn execute(&self, request: ChallengeRequest) -> Result<ToolOutput, ToolError> {
        let state = request.into_state()?;
        let store = &self.context.store;

        let thread = store.resolve_or_create(state.continuation_id.as_deref(), CHALLENGE_TOOL);
        let thread_id = thread.thread_id.clone();
        let history = HistoryWindow::new(self.context.history_token_budget).select(&thread.turns);

        let model = choose_model(
            self.context.catalog.as_ref(),
            state.model.as_deref(),
            &ModelRequirements::default(),
        )
        .map_err(|e| ToolError::upstream(e, &thread_id))?;

        info!(thread_id = %thread_id, model = %model.name, "Challenge request");

        let request = GenerateRequest::new(&model.name, state.prompt())
            .with_system_prompt(CHALLENGE_SYSTEM_PROMPT)
            .with_history(history);

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
            ConversationTurn::user(state.summary())
                .with_tool(CHALLENGE_TOOL)
                .with_files(state.files.clone()),
        )?;
        store.add_turn(
            &thread_id,
            ConversationTurn::assistant(response.content.clone())
                .with_tool(CHALLENGE_TOOL)
                .with_model(&model.name),
        )?;

        let content = format!("{}\n\n---\ncontinuation_id: {}", response.content, thread_id);
        Ok(ToolOutput::new(content, thread_id).with_meta("model_used", &model.name))
    }
}
