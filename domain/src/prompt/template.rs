//! Prompt templates for consensus runs

use crate::consensus::entities::{ConsensusModel, ModelResponseRecord, Stance};
use crate::core::string::truncate;

/// Prior responses are cut to this many characters inside a stance prompt.
pub const PRIOR_RESPONSE_LIMIT: usize = 500;

/// Templates for generating prompts at each consensus phase
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt matching a participant's stance
    pub fn stance_system(stance: Stance) -> &'static str {
        match stance {
            Stance::For => {
                r#"You are an advocate analyzing a proposal.
Your role is to identify and articulate the strengths, benefits, and opportunities.
Be persuasive but honest. Do not invent benefits that do not exist.
Structure your response with clear arguments."#
            }
            Stance::Against => {
                r#"You are a critical analyst evaluating a proposal.
Your role is to identify risks, problems, potential failures, and downsides.
Be thorough but fair. Do not manufacture problems that are not real.
Structure your response with specific concerns and their implications."#
            }
            Stance::Neutral => {
                r#"You are an objective analyst evaluating a proposal.
Your role is to provide a balanced assessment weighing both pros and cons.
Consider multiple perspectives and be fair to all sides.
Structure your response to cover benefits, risks, and an overall recommendation."#
            }
        }
    }

    /// User prompt for one participant.
    ///
    /// Carries the proposal, the participant's own instructions and every
    /// earlier response (truncated), in consultation order.
    pub fn stance_prompt(
        proposal: &str,
        participant: &ConsensusModel,
        prior: &[ModelResponseRecord],
    ) -> String {
        let mut prompt = format!("## Proposal\n\n{}\n\n", proposal);

        if let Some(instructions) = participant
            .stance_prompt
            .as_deref()
            .filter(|s| !s.trim().is_empty())
        {
            prompt.push_str(&format!("## Specific Instructions\n\n{}\n\n", instructions));
        }

        if !prior.is_empty() {
            prompt.push_str("## Previous Perspectives\n\n");
            for resp in prior {
                prompt.push_str(&format!(
                    "### {} ({})\n{}\n\n",
                    resp.model,
                    resp.stance,
                    truncate(&resp.response, PRIOR_RESPONSE_LIMIT)
                ));
            }
        }

        prompt.push_str("## Your Task\n\n");
        prompt.push_str(&format!(
            "Evaluate this proposal from a **{}** perspective. ",
            participant.stance
        ));
        prompt.push_str(match participant.stance {
            Stance::For => {
                "Advocate for why this proposal is a good idea. Highlight benefits and opportunities."
            }
            Stance::Against => {
                "Critically analyze this proposal. Identify risks, problems, and potential issues."
            }
            Stance::Neutral => {
                "Provide a balanced evaluation. Weigh both benefits and drawbacks objectively."
            }
        });

        prompt
    }

    /// System prompt for synthesis phase
    pub fn synthesis_system() -> &'static str {
        r#"You are a senior decision-maker synthesizing multiple expert perspectives.
Your role is to:
- Understand each perspective fairly
- Identify patterns and key insights
- Synthesize a balanced, actionable recommendation
- Be clear about trade-offs and confidence levels

Structure your response clearly with the sections requested."#
    }

    /// User prompt for synthesis; responses are quoted verbatim.
    pub fn synthesis_prompt(proposal: &str, responses: &[ModelResponseRecord]) -> String {
        let mut prompt = format!("## Proposal\n\n{}\n\n## Model Perspectives\n\n", proposal);

        for resp in responses {
            prompt.push_str(&format!(
                "### {} ({} stance)\n{}\n\n",
                resp.model, resp.stance, resp.response
            ));
        }

        prompt.push_str(
            r#"## Your Task

Synthesize these perspectives into a unified recommendation:

1. **Summary of Key Points**: Main arguments from each perspective
2. **Areas of Agreement**: Where models converge
3. **Areas of Disagreement**: Where models diverge and why
4. **Unified Recommendation**: Your synthesized recommendation
5. **Confidence Level**: How confident you are in this recommendation
6. **Next Steps**: Actionable items if the recommendation is adopted"#,
        );

        prompt
    }

    /// Numbered participant list ("1. pro (for)")
    pub fn participant_list(models: &[ConsensusModel]) -> String {
        models
            .iter()
            .enumerate()
            .map(|(i, m)| format!("{}. {}", i + 1, m))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Guidance returned after the proposal is recorded
    pub fn proposal_guidance(models: &[ConsensusModel]) -> String {
        format!(
            "Proposal recorded. Ready to consult {} models.\n\n**Participants:**\n{}\n\n\
             Proceed to step 2 to consult the first model.",
            models.len(),
            Self::participant_list(models)
        )
    }

    /// Guidance returned after a participant answered and others remain
    pub fn consultation_guidance(
        position: usize,
        total: usize,
        participant: &ConsensusModel,
        response: &str,
        next: &ConsensusModel,
    ) -> String {
        format!(
            "## Model {}/{}: {}\n\n{}\n\n---\nProceed to next step to consult: {}",
            position, total, participant, response, next
        )
    }

    /// Frame an intermediate consensus result with the progress the caller
    /// must send back.
    pub fn consensus_step(
        step_number: u32,
        total_steps: u32,
        guidance: &str,
        continuation_id: &str,
        next_index: usize,
        consulted: usize,
        total: usize,
    ) -> String {
        format!(
            "## Consensus Step {}/{}\n\n{}\n\n---\ncontinuation_id: {}\ncurrent_model_index: {}\nmodels_consulted: {}/{}",
            step_number, total_steps, guidance, continuation_id, next_index, consulted, total
        )
    }
}
