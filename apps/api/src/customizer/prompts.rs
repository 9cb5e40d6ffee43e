// LLM prompt constants for the document customizer.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{FACTUALITY_INSTRUCTION, PLAIN_TEXT_INSTRUCTION};
use crate::models::job::JobListing;

pub const RESUME_SYSTEM: &str = "You are a professional resume writer who specializes in \
    customizing resumes for specific job applications.";

/// Replace: {job_title}, {company}, {job_description}, {requirements},
///          {original_resume}, {factuality}, {format}
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Please customize this resume for a {job_title} position at {company}.

Job Description:
{job_description}

Requirements:
{requirements}

Original Resume:
{original_resume}

Instructions:
1. Analyze the job description and requirements
2. Identify key skills and experiences that match
3. Rewrite the resume summary and experience sections to highlight relevant experience
4. Use industry-specific keywords from the job description
5. Maintain a professional tone
6. Format the output as a clean text document

{factuality}
{format}"#;

pub const COVER_LETTER_SYSTEM: &str = "You are a professional cover letter writer who creates \
    compelling, personalized cover letters.";

/// Replace: {job_title}, {company}, {job_description}, {requirements},
///          {experience}, {factuality}, {format}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a compelling cover letter for a {job_title} position at {company}.

Job Description:
{job_description}

Requirements:
{requirements}

Candidate's Relevant Experience:
{experience}

Instructions:
1. Write a professional cover letter
2. Address the key requirements from the job description
3. Highlight specific experiences that match the role
4. Show enthusiasm for the company and role
5. Keep it concise (max 400 words)
6. Use a professional business letter format

{factuality}
{format}"#;

fn fill(template: &str, job: &JobListing, candidate_key: &str, candidate_text: &str) -> String {
    template
        .replace("{job_title}", &job.job_title)
        .replace("{company}", &job.company)
        .replace("{job_description}", &job.job_description)
        .replace("{requirements}", &job.requirements)
        .replace("{factuality}", FACTUALITY_INSTRUCTION)
        .replace("{format}", PLAIN_TEXT_INSTRUCTION)
        // Last, so placeholder-like text inside the résumé is left alone.
        .replace(candidate_key, candidate_text)
}

pub fn resume_prompt(job: &JobListing, original_resume: &str) -> String {
    fill(RESUME_PROMPT_TEMPLATE, job, "{original_resume}", original_resume)
}

pub fn cover_letter_prompt(job: &JobListing, experience: &str) -> String {
    fill(COVER_LETTER_PROMPT_TEMPLATE, job, "{experience}", experience)
}
