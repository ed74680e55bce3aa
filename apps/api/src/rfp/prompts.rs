// Section-specific prompt wording for RFP drafting.
// Shared fragments come from llm_client::prompts.

pub const SCOPE_OF_WORK_TITLE: &str = "SCOPE OF WORK";

pub const CRITERIA_TITLE: &str = "CRITERIA FOR SELECTING THE WINNER";

/// Extra rules only the Scope of Work section gets.
pub const SCOPE_OF_WORK_INSTRUCTIONS: &[&str] = &[
    "Clearly define the objectives, deliverables, services to be performed, and the expected outcomes of the project.",
    "Mention the duration and timeline for the execution of the work.",
];

pub const CRITERIA_INSTRUCTIONS: &[&str] = &[];

/// Bullet used for input fields and instruction lines in the system prompt.
pub const LIST_MARK: &str = "•";
