// Shared prompt fragments for every RFP drafting call.
// Section-specific wording lives in rfp/prompts.rs.

/// Opening line of every system instruction.
pub const RFP_ASSISTANT_ROLE: &str = "You are a professional assistant tasked with drafting \
    formal RFP (Request for Proposal) documentation.";

/// Tone and layout rules shared by all sections.
pub const FORMAL_STYLE_INSTRUCTIONS: &[&str] = &[
    "Structure the section using clear headings and bullet points where appropriate.",
    "Write in a formal and business-like tone, suitable for government or enterprise procurement use.",
];

/// Rules appended after the section-specific ones.
pub const CLOSING_INSTRUCTIONS: &[&str] = &[
    "If relevant, include responsibilities of the vendor and the requesting department.",
    "Keep the language precise, unambiguous, and action-oriented.",
    "DO NOT copy any content from the example RFP. Use the formatting and structural style \
     of the provided example RFP document only to guide tone, layout, and organization.",
];

/// Response format requested from the model.
pub const PLAIN_TEXT_MIME: &str = "text/plain";
