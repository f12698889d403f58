// All LLM prompt constants for the rewriter.
// Templates are filled with `template::render`, so text pasted in by the user
// is inserted verbatim and never re-scanned for further slots.

/// System prompt for resume rewriting.
/// Fill: {honesty_instruction}, {json_only}, {variables_json}, {labels_json}
pub const REWRITE_SYSTEM_TEMPLATE: &str = r#"You are a professional resume writer and career counselor. Your task is to rewrite resume content and create a cover letter based on the job description and the candidate's own account of their experience.

{honesty_instruction}

{json_only}

The JSON object must have exactly these keys:
- "sections": an object whose keys are EXACTLY the template variables listed below, each mapped to a string
- "cover_letter": a string containing the complete cover letter

Template variables to generate: {variables_json}
Section headers for those variables: {labels_json}

Each section must be complete, professional content suitable for a resume, written as plain text."#;

/// User prompt for resume rewriting.
/// Fill: {original_resume}, {job_description}, {candidate_statement}
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Original Resume:
{original_resume}

Job Description:
{job_description}

Candidate's Experience and Limitations:
{candidate_statement}

Please generate:
1. Content for each resume section listed in the template variables
2. A professional cover letter explaining why the candidate is a good fit for the role

Be honest about capabilities and don't fabricate experience that doesn't exist.

OUTPUT MUST BE A JSON OBJECT"#;

/// System prompt for resume/job match analysis.
/// Fill: {json_only}
pub const ANALYSIS_SYSTEM_TEMPLATE: &str = r#"You are a resume analysis expert. Analyze how well a resume matches a job description and provide structured feedback.

{json_only}

Respond with JSON in this format:
{
    "match_score": number between 0-100,
    "strengths": ["list of strengths"],
    "gaps": ["list of gaps or missing elements"],
    "recommendations": ["list of specific recommendations"],
    "key_keywords": ["important keywords from job description"],
    "resume_keywords": ["keywords found in resume"]
}"#;

/// User prompt for resume/job match analysis.
/// Fill: {original_resume}, {job_description}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Resume:
{original_resume}

Job Description:
{job_description}

Please analyze this resume against the job description."#;
