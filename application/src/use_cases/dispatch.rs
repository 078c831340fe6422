//! Closed tool dispatch.
//!
//! Every tool the process exposes is a [`ToolKind`]; arguments arrive as
//! JSON and are decoded into the tool's typed request before anything runs.

use crate::error::ToolError;
use crate::ports::model_catalog::ModelCatalog;
use crate::ports::model_gateway::ModelGateway;
use crate::use_cases::context::ToolContext;
use crate::use_cases::output::ToolOutput;
use crate::use_cases::run_challenge::{CHALLENGE_DESCRIPTION, CHALLENGE_TOOL, RunChallengeUseCase};
use crate::use_cases::run_chat::{CHAT_DESCRIPTION, CHAT_TOOL, RunChatUseCase};
use crate::use_cases::run_consensus::{CONSENSUS_DESCRIPTION, CONSENSUS_TOOL, RunConsensusUseCase};
use crate::use_cases::run_workflow::RunWorkflowUseCase;
use crate::use_cases::server_info::{
    self, LIST_MODELS_DESCRIPTION, LIST_MODELS_TOOL, VERSION_DESCRIPTION, VERSION_TOOL,
};
use relay_domain::{ValidationError, WorkflowKind};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Chat,
    Challenge,
    Workflow(WorkflowKind),
    Consensus,
    ListModels,
    Version,
}

impl ToolKind {
    /// Every tool, in listing order.
    pub fn all() -> Vec<ToolKind> {
        [ToolKind::Chat, ToolKind::Challenge]
            .into_iter()
            .chain(WorkflowKind::ALL.into_iter().map(ToolKind::Workflow))
            .chain([ToolKind::Consensus, ToolKind::ListModels, ToolKind::Version])
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Chat => CHAT_TOOL,
            ToolKind::Challenge => CHALLENGE_TOOL,
            ToolKind::Workflow(kind) => kind.name(),
            ToolKind::Consensus => CONSENSUS_TOOL,
            ToolKind::ListModels => LIST_MODELS_TOOL,
            ToolKind::Version => VERSION_TOOL,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::Chat => CHAT_DESCRIPTION,
            ToolKind::Challenge => CHALLENGE_DESCRIPTION,
            ToolKind::Workflow(kind) => kind.description(),
            ToolKind::Consensus => CONSENSUS_DESCRIPTION,
            ToolKind::ListModels => LIST_MODELS_DESCRIPTION,
            ToolKind::Version => VERSION_DESCRIPTION,
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::all()
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| ValidationError::UnknownTool(s.to_string()))
    }
}

/// Routes tool calls to their use case
pub struct ToolDispatcher<G: ModelGateway + 'static, C: ModelCatalog + 'static> {
    context: ToolContext<G, C>,
}

impl<G: ModelGateway + 'static, C: ModelCatalog + 'static> ToolDispatcher<G, C> {
    pub fn new(context: ToolContext<G, C>) -> Self {
        Self { context }
    }

    /// Look up a tool by name and run it.
    pub async fn call(&self, tool: &str, arguments: Value) -> Result<ToolOutput, ToolError> {
        let kind: ToolKind = tool.parse()?;
        self.execute(kind, arguments).await
    }

    pub async fn execute(&self, tool: ToolKind, arguments: Value) -> Result<ToolOutput, ToolError> {
        debug!(tool = %tool, "Dispatching tool call");
        let arguments = match arguments {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };
        let context = self.context.clone();
        match tool {
            ToolKind::Chat => {
                RunChatUseCase::new(context)
                    .execute(serde_json::from_value(arguments)?)
                    .await
            }
            ToolKind::Challenge => {
                RunChallengeUseCase::new(context)
                    .execute(serde_json::from_value(arguments)?)
                    .await
            }
            ToolKind::Workflow(kind) => {
                RunWorkflowUseCase::new(kind, context)
                    .execute(serde_json::from_value(arguments)?)
                    .await
            }
            ToolKind::Consensus => {
                RunConsensusUseCase::new(context)
                    .execute(serde_json::from_value(arguments)?)
                    .await
            }
            ToolKind::ListModels => Ok(server_info::list_models(context.catalog.as_ref())),
            ToolKind::Version => Ok(server_info::version()),
        }
    }
}
