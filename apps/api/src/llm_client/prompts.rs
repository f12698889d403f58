// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it and pulls cross-cutting pieces from here.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Honesty rules appended to every prompt that writes on the candidate's behalf.
pub const HONESTY_INSTRUCTION: &str = "\
CRITICAL INSTRUCTIONS:
1. BE HONEST - Do not exaggerate or lie about capabilities
2. If the candidate mentions lacking experience in certain areas, acknowledge this appropriately
3. Focus on transferable skills and genuine strengths
4. Use keywords from the job description naturally
5. Quantify achievements when the source material supports it
6. Maintain a professional tone";
