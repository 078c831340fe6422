//! The closed set of workflow tools.
//!
//! All workflow tools share the same step state machine; they differ only in
//! wording: how a step is labelled, which checklist accompanies guidance,
//! what the expert model is asked for and under which system prompt.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowKind {
    Debug,
    ThinkDeep,
    Analyze,
    CodeReview,
    Planner,
    PreCommit,
    TestGen,
    Refactor,
}

impl WorkflowKind {
    pub const ALL: [WorkflowKind; 8] = [
        WorkflowKind::Debug,
        WorkflowKind::ThinkDeep,
        WorkflowKind::Analyze,
        WorkflowKind::CodeReview,
        WorkflowKind::Planner,
        WorkflowKind::PreCommit,
        WorkflowKind::TestGen,
        WorkflowKind::Refactor,
    ];

    /// Tool name as used for dispatch and turn tagging.
    pub fn name(&self) -> &'static str {
        match self {
            WorkflowKind::Debug => "debug",
            WorkflowKind::ThinkDeep => "thinkdeep",
            WorkflowKind::Analyze => "analyze",
            WorkflowKind::CodeReview => "codereview",
            WorkflowKind::Planner => "planner",
            WorkflowKind::PreCommit => "precommit",
            WorkflowKind::TestGen => "testgen",
            WorkflowKind::Refactor => "refactor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WorkflowKind::Debug => {
                "Performs systematic debugging and root cause analysis for any type of issue."
            }
            WorkflowKind::ThinkDeep => {
                "Multi-stage investigation and reasoning for complex problems."
            }
            WorkflowKind::Analyze => {
                "Step-by-step analysis of architecture, code quality and maintainability."
            }
            WorkflowKind::CodeReview => {
                "Structured code review covering security, performance and correctness."
            }
            WorkflowKind::Planner => {
                "Breaks a complex task into an ordered, reviewable implementation plan."
            }
            WorkflowKind::PreCommit => {
                "Validates staged changes for completeness and regressions before commit."
            }
            WorkflowKind::TestGen => "Generates and validates comprehensive test suites.",
            WorkflowKind::Refactor => "Plans and validates code refactoring strategies.",
        }
    }

    /// Prefix used when a step is persisted ("Step 2: ...").
    pub fn step_label(&self) -> &'static str {
        match self {
            WorkflowKind::Debug | WorkflowKind::ThinkDeep => "Step",
            WorkflowKind::Analyze => "Analysis Step",
            WorkflowKind::CodeReview => "Review Step",
            WorkflowKind::Planner => "Planning Step",
            WorkflowKind::PreCommit => "Validation Step",
            WorkflowKind::TestGen => "TestGen Step",
            WorkflowKind::Refactor => "Refactor Step",
        }
    }

    /// Tool-specific checklist appended to confidence guidance.
    pub fn checklist(&self) -> &'static str {
        match self {
            WorkflowKind::Debug => {
                "- Trace the failing code path\n- Look for recent changes near the failure"
            }
            WorkflowKind::ThinkDeep => {
                "- Separate facts from inferences\n- Challenge your own assumptions"
            }
            WorkflowKind::Analyze => {
                "- Map module boundaries and dependencies\n- Note technical debt and hotspots"
            }
            WorkflowKind::CodeReview => {
                "- Check for security vulnerabilities\n- Verify error handling\n- Assess performance impact\n- Ensure test coverage"
            }
            WorkflowKind::Planner => {
                "- Add implementation details\n- Identify dependencies between steps\n- Note open questions"
            }
            WorkflowKind::PreCommit => {
                "- Confirm every requirement is covered by the change\n- Look for accidental or unrelated edits"
            }
            WorkflowKind::TestGen => {
                "- List the public behaviour that needs coverage\n- Include edge cases and failure paths\n- Match the project's existing test framework"
            }
            WorkflowKind::Refactor => {
                "- Identify code smells and duplication\n- Keep behaviour unchanged at every step\n- Confirm tests cover the code being moved"
            }
        }
    }

    /// Numbered list of what the expert model should return.
    pub fn expert_request(&self) -> &'static str {
        match self {
            WorkflowKind::Debug => {
                "1. Root cause analysis\n2. Recommended fix\n3. Prevention strategies\n4. Any additional considerations"
            }
            WorkflowKind::ThinkDeep => {
                "1. Assessment of the investigation\n2. Validation or refinement of the hypothesis\n3. Key insights and recommendations\n4. Areas that may need further investigation"
            }
            WorkflowKind::Analyze => {
                "1. Architectural assessment\n2. Strengths worth keeping\n3. Risks and technical debt\n4. Prioritized improvements"
            }
            WorkflowKind::CodeReview => {
                "1. Summary of critical issues\n2. Security assessment\n3. Performance impact\n4. Code quality and maintainability score (1-10)\n5. Actionable recommendations"
            }
            WorkflowKind::Planner => {
                "1. Plan completeness assessment\n2. Potential gaps or missing steps\n3. Risk areas to watch\n4. Suggested order of execution\n5. Dependencies between steps"
            }
            WorkflowKind::PreCommit => {
                "1. Blocking issues\n2. Regressions risk\n3. Missing tests or documentation\n4. Commit readiness verdict"
            }
            WorkflowKind::TestGen => {
                "1. Test cases to add, grouped by behaviour\n2. Edge cases and failure scenarios\n3. Test code following the project's conventions\n4. Coverage gaps that remain"
            }
            WorkflowKind::Refactor => {
                "1. Refactoring opportunities ranked by impact\n2. Step-by-step refactoring plan\n3. Risks to existing behaviour\n4. Tests needed before and after"
            }
        }
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            WorkflowKind::Debug => {
                r#"You are an expert software debugger. Your role is to:
1. Analyze debugging investigations systematically
2. Identify root causes with precision
3. Recommend specific, actionable fixes
4. Suggest prevention strategies

Be thorough but concise. Reference specific code locations when possible.
If the evidence is inconclusive, say so clearly."#
            }
            WorkflowKind::ThinkDeep => {
                r#"You are an expert analyst providing deep insights on complex problems.
Validate or refine the hypothesis, identify patterns and root causes,
and give actionable recommendations.
Distinguish between facts, inferences, and speculation."#
            }
            WorkflowKind::Analyze => {
                r#"You are a software architect reviewing an analysis of a codebase.
Assess structure, coupling and maintainability, and recommend improvements
in order of impact. Ground every claim in the findings provided."#
            }
            WorkflowKind::CodeReview => {
                r#"You are a senior principal engineer conducting a final code review sign-off.
Prioritize correctness and security over style. Be specific about locations
and propose concrete fixes for every major issue."#
            }
            WorkflowKind::Planner => {
                r#"You are a senior software architect reviewing implementation plans.
Ensure plans are complete and actionable, identify gaps, risks and dependencies,
and validate feasibility. Do not add time estimates."#
            }
            WorkflowKind::PreCommit => {
                r#"You are a meticulous release engineer validating changes before commit.
Look for incomplete implementations, regressions and missing tests.
Give a clear verdict on whether the change is ready to commit."#
            }
            WorkflowKind::TestGen => {
                r#"You are a QA automation expert.
Design tests that pin down observable behaviour, including edge cases
and failure paths, written in the framework the project already uses."#
            }
            WorkflowKind::Refactor => {
                r#"You are a refactoring expert.
Propose behaviour-preserving changes in small, verifiable steps and
call out any step that risks changing semantics."#
            }
        }
    }

    /// Heading of the final result.
    pub fn completion_heading(&self, with_expert: bool) -> &'static str {
        match (self, with_expert) {
            (WorkflowKind::Debug, true) => "Debug Analysis Complete",
            (WorkflowKind::Debug, false) => "Debug Investigation Complete",
            (WorkflowKind::ThinkDeep, true) => "Deep Analysis Complete",
            (WorkflowKind::ThinkDeep, false) => "Investigation Complete",
            (WorkflowKind::Analyze, _) => "Analysis Complete",
            (WorkflowKind::CodeReview, true) => "Code Review Complete",
            (WorkflowKind::CodeReview, false) => "Review Complete",
            (WorkflowKind::Planner, true) => "Plan Analysis Complete",
            (WorkflowKind::Planner, false) => "Plan Complete",
            (WorkflowKind::PreCommit, _) => "Pre-Commit Validation Complete",
            (WorkflowKind::TestGen, true) => "Test Generation Complete",
            (WorkflowKind::TestGen, false) => "Test Plan Complete",
            (WorkflowKind::Refactor, true) => "Refactoring Analysis Complete",
            (WorkflowKind::Refactor, false) => "Refactoring Plan Complete",
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WorkflowKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WorkflowKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown workflow tool: {s}"))
    }
}
