// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting prompt fragments.

/// Appended to every document-generation prompt.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond with the finished document only, as plain text. \
    Do NOT use markdown, code fences, or commentary about the document.";

/// Guards against invented experience.
pub const FACTUALITY_INSTRUCTION: &str = "\
    Use ONLY experience, skills and qualifications present in the candidate's material. \
    Do NOT invent employers, titles, dates, degrees or metrics.";
