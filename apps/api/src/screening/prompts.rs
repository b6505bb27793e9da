//! All LLM prompt constants for the screening pipeline, plus the builders
//! that fill their placeholders. Stages never assemble prompt text themselves.

use serde_json::json;

use crate::screening::oracle::{CandidateProfile, ExperienceEntry, MatchResult};

/// System prompt for profile extraction — enforces JSON-only output.
pub const EXTRACTION_SYSTEM: &str = "You are an expert resume parser. \
    Extract key information from resume text. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Extraction prompt template. Replace `{resume_text}` before sending.
const EXTRACTION_PROMPT_TEMPLATE: &str = r#"Extract structured information from the resume text below.

Return a JSON object with this EXACT schema (no extra fields):
{
  "skills": ["skill1", "skill2"],
  "experience": [
    {"company": "Company Name", "role": "Job Title", "duration": "Years"}
  ],
  "education": [
    {"degree": "Degree Name", "institution": "School Name"}
  ]
}

Rules:
- skills: every technical and professional skill the resume names
- experience: work history entries with company, role, and duration
- education: qualifications with degree and institution
- Use empty lists for sections the resume does not contain. Never invent entries.

RESUME TEXT:
{resume_text}"#;

/// System prompt for JD matching — enforces JSON-only output.
pub const MATCHING_SYSTEM: &str = "You are an expert recruiter comparing a candidate's \
    extracted profile against a job description. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Matching prompt template. Replace `{jd}`, `{skills}`, `{experience}`,
/// `{education}` before sending.
const MATCHING_PROMPT_TEMPLATE: &str = r#"Compare the candidate's profile to the job description.

Identify:
1. Matches — skills, experience, and education that align with the JD
2. Gaps — requirements from the JD the candidate does not cover

Return a JSON object with this EXACT schema (no extra fields):
{
  "matches": ["match1", "match2"],
  "gaps": ["gap1", "gap2"]
}

JOB DESCRIPTION:
{jd}

CANDIDATE PROFILE:
Skills: {skills}
Experience: {experience}
Education: {education}"#;

/// System prompt for fit scoring — enforces JSON-only output.
pub const SCORING_SYSTEM: &str = "You are an expert recruiter scoring a candidate's \
    fit for a role on a 0-100 scale. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Scoring prompt template. Replace `{jd}`, `{matches}`, `{gaps}`,
/// `{experience}` before sending.
const SCORING_PROMPT_TEMPLATE: &str = r#"Score the candidate's fit for the job from 0 to 100.

Weigh the evidence as:
- Skill alignment: 40%
- Experience relevance: 40%
- Education requirements: 20%

Return a JSON object with this EXACT schema (no extra fields):
{
  "score": 75,
  "reasons": [
    "Strong match: 8/10 required skills present",
    "Relevant experience in a similar role",
    "Gap: missing certification X"
  ],
  "suggestions": ["Acquire skill Y", "Gain experience in Z"]
}

`score` must be an integer. Provide 3-5 concise reasons. Provide suggestions
only where the candidate has concrete room to improve for this role.

JOB DESCRIPTION:
{jd}

MATCHES:
{matches}

GAPS:
{gaps}

CANDIDATE EXPERIENCE:
{experience}"#;

/// Fills the extraction template with the raw resume text.
pub fn extraction_prompt(resume_text: &str) -> String {
    EXTRACTION_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}

/// Fills the matching template with the JD and the profile's sections,
/// serialized as JSON so list structure survives into the prompt.
pub fn matching_prompt(job_description: &str, profile: &CandidateProfile) -> String {
    MATCHING_PROMPT_TEMPLATE
        .replace("{jd}", job_description)
        .replace("{skills}", &json!(profile.skills).to_string())
        .replace("{experience}", &json!(profile.experience).to_string())
        .replace("{education}", &json!(profile.education).to_string())
}

/// Fills the scoring template with the JD, the match result, and the
/// candidate's experience entries.
pub fn scoring_prompt(
    job_description: &str,
    match_result: &MatchResult,
    experience: &[ExperienceEntry],
) -> String {
    SCORING_PROMPT_TEMPLATE
        .replace("{jd}", job_description)
        .replace("{matches}", &json!(match_result.matches).to_string())
        .replace("{gaps}", &json!(match_result.gaps).to_string())
        .replace("{experience}", &json!(experience).to_string())
}
