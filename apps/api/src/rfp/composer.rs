//! Prompt Composer — turns the form inputs into one system instruction and one
//! user instruction per RFP section, and returns the model's prose untouched.
//!
//! The two sections are independent, stateless calls that differ only in their
//! instruction text. No history is carried between them.

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{
    CLOSING_INSTRUCTIONS, FORMAL_STYLE_INSTRUCTIONS, RFP_ASSISTANT_ROLE,
};
use crate::llm_client::TextGenerator;
use crate::rfp::models::RfpInputs;
use crate::rfp::prompts::{
    CRITERIA_INSTRUCTIONS, CRITERIA_TITLE, LIST_MARK, SCOPE_OF_WORK_INSTRUCTIONS,
    SCOPE_OF_WORK_TITLE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RfpSection {
    ScopeOfWork,
    SelectionCriteria,
}

impl RfpSection {
    pub fn title(self) -> &'static str {
        match self {
            RfpSection::ScopeOfWork => SCOPE_OF_WORK_TITLE,
            RfpSection::SelectionCriteria => CRITERIA_TITLE,
        }
    }

    fn section_instructions(self) -> &'static [&'static str] {
        match self {
            RfpSection::ScopeOfWork => SCOPE_OF_WORK_INSTRUCTIONS,
            RfpSection::SelectionCriteria => CRITERIA_INSTRUCTIONS,
        }
    }
}

/// The single-intent user turn sent alongside the system instruction.
pub fn build_user_prompt(section: RfpSection) -> String {
    format!(
        "Write a professional “{}” section for this RFP.",
        section.title()
    )
}

/// Builds the system instruction. Field values and the example text are
/// embedded verbatim in one pass, so braces in user input are never expanded.
pub fn build_system_instruction(
    section: RfpSection,
    inputs: &RfpInputs,
    example_text: &str,
) -> String {
    let title = section.title();
    let mut out = String::new();

    let _ = writeln!(out, "{RFP_ASSISTANT_ROLE}");
    let _ = writeln!(
        out,
        "Use the inputs provided below to write a well-structured and professional “{title}” section for an RFP:"
    );
    for (label, value) in [
        ("Project Name", &inputs.project_name),
        ("Scope Description", &inputs.scope_text),
        ("Duration", &inputs.duration),
        ("Evaluation Criteria Summary", &inputs.criteria_text),
        ("Requesting Department", &inputs.department),
    ] {
        let _ = writeln!(out, "{LIST_MARK} {label}: {value}");
    }

    let _ = writeln!(out, "\nInstructions:");
    for line in FORMAL_STYLE_INSTRUCTIONS
        .iter()
        .chain(section.section_instructions())
        .chain(CLOSING_INSTRUCTIONS)
    {
        let _ = writeln!(out, "{LIST_MARK} {line}");
    }

    let _ = writeln!(out, "\nExample RFP content: {example_text}");
    let _ = write!(
        out,
        "\nTask: Generate a professional and comprehensive “{title}” section based on the provided inputs."
    );
    out
}

#[derive(Clone)]
pub struct PromptComposer {
    generator: Arc<dyn TextGenerator>,
}

impl PromptComposer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Issues exactly one generation request for `section`.
    pub async fn compose(
        &self,
        section: RfpSection,
        inputs: &RfpInputs,
        example_text: &str,
    ) -> Result<String, AppError> {
        let system = build_system_instruction(section, inputs, example_text);
        let prompt = build_user_prompt(section);

        info!("Generating {} for '{}'", section.title(), inputs.project_name);
        let text = self
            .generator
            .generate(&prompt, &system)
            .await
            .map_err(|e| AppError::Llm(format!("{} generation failed: {e}", section.title())))?;
        info!("Generated {} ({} chars)", section.title(), text.len());

        Ok(text)
    }

    pub async fn compose_scope_of_work(
        &self,
        inputs: &RfpInputs,
        example_text: &str,
    ) -> Result<String, AppError> {
        self.compose(RfpSection::ScopeOfWork, inputs, example_text)
            .await
    }

    pub async fn compose_criteria(
        &self,
        inputs: &RfpInputs,
        example_text: &str,
    ) -> Result<String, AppError> {
        self.compose(RfpSection::SelectionCriteria, inputs, example_text)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::RecordingGenerator;

    fn inputs() -> RfpInputs {
        RfpInputs {
            project_name: "AI Call Center Agent".to_string(),
            scope_text: "Design and deploy a {duration} voice agent".to_string(),
            duration: "Kickoff: July 1; Draft Review: July 15".to_string(),
            department: "IT Department".to_string(),
            criteria_text: "Cost, Experience, Technical Merit".to_string(),
        }
    }

    #[test]
    fn test_system_instruction_embeds_inputs_verbatim() {
        let system =
            build_system_instruction(RfpSection::ScopeOfWork, &inputs(), "EXAMPLE BODY");

        assert!(system.starts_with(RFP_ASSISTANT_ROLE));
        assert!(system.contains("• Project Name: AI Call Center Agent"));
        assert!(system.contains("• Scope Description: Design and deploy a {duration} voice agent"));
        assert!(system.contains("• Duration: Kickoff: July 1; Draft Review: July 15"));
        assert!(system.contains("• Evaluation Criteria Summary: Cost, Experience, Technical Merit"));
        assert!(system.contains("• Requesting Department: IT Department"));
        assert!(system.contains("Example RFP content: EXAMPLE BODY"));
        assert!(system.contains("DO NOT copy any content from the example RFP"));
        assert!(system.ends_with("“SCOPE OF WORK” section based on the provided inputs."));
    }

    #[test]
    fn test_only_scope_of_work_asks_for_deliverables_and_timeline() {
        let scope = build_system_instruction(RfpSection::ScopeOfWork, &inputs(), "");
        let criteria = build_system_instruction(RfpSection::SelectionCriteria, &inputs(), "");

        for line in SCOPE_OF_WORK_INSTRUCTIONS {
            assert!(scope.contains(line));
            assert!(!criteria.contains(line));
        }
        assert!(criteria.contains("“CRITERIA FOR SELECTING THE WINNER”"));
        assert!(!criteria.contains(SCOPE_OF_WORK_TITLE));
    }

    #[test]
    fn test_user_prompt_is_single_intent() {
        assert_eq!(
            build_user_prompt(RfpSection::SelectionCriteria),
            "Write a professional “CRITERIA FOR SELECTING THE WINNER” section for this RFP."
        );
    }

    #[tokio::test]
    async fn test_compose_returns_completion_unmodified() {
        let generator = Arc::new(RecordingGenerator::echo());
        let composer = PromptComposer::new(generator.clone());

        let text = composer
            .compose_scope_of_work(&inputs(), "past rfp")
            .await
            .unwrap();

        let prompt = build_user_prompt(RfpSection::ScopeOfWork);
        assert_eq!(text, format!("**Draft:** {prompt}\n* first point\n"));

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, prompt);
        assert!(calls[0].1.contains("Example RFP content: past rfp"));
    }

    #[tokio::test]
    async fn test_calls_are_independent() {
        let generator = Arc::new(RecordingGenerator::echo());
        let composer = PromptComposer::new(generator.clone());

        composer.compose_scope_of_work(&inputs(), "").await.unwrap();
        composer.compose_criteria(&inputs(), "").await.unwrap();

        let calls = generator.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].0.contains(SCOPE_OF_WORK_TITLE));
        assert!(calls[1].0.contains(CRITERIA_TITLE));
        assert!(!calls[1].1.contains(&calls[0].0));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates_as_llm_error() {
        let composer = PromptComposer::new(Arc::new(RecordingGenerator::failing()));

        let err = composer.compose_criteria(&inputs(), "").await.unwrap_err();
        match err {
            AppError::Llm(msg) => {
                assert!(msg.contains(CRITERIA_TITLE));
                assert!(msg.contains("Resource has been exhausted"));
            }
            other => panic!("expected LLM error, got {other:?}"),
        }
    }
}
