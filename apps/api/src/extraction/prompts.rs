// All model prompt constants for the extraction pipeline.
// Each step prompt embeds the résumé text via `{resume_text}` and spells out
// the exact JSON shape expected back, so a step can be re-issued verbatim.

/// System prompt shared by every extraction call — enforces JSON-only output.
pub const PARSE_SYSTEM: &str =
    "You are an expert resume parser that extracts structured information from resumes. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Résumé classification prompt. Replace `{resume_text}` before sending.
pub const VALIDATE_PROMPT_TEMPLATE: &str = r#"Decide whether the following document text is a resume (also called a CV).

A resume describes one person's professional profile: typically contact details plus some combination of work experience, education, skills, certifications, or projects. Cover letters, invoices, reports, articles, and forms are NOT resumes.

Return a JSON object with this EXACT schema:
{"is_resume": true, "reason": null}

If the document is not a resume, set "is_resume" to false and "reason" to one short sentence naming what the document appears to be instead.

DOCUMENT TEXT:
{resume_text}"#;

/// Step 1: contact information.
pub const CONTACT_PROMPT_TEMPLATE: &str = r#"Extract the contact information from the resume below.

How to find it:
- The name is usually at the very top
- Email addresses contain an @ symbol
- Phone numbers come in many formats: +91..., (xxx) xxx-xxxx, etc.
- LinkedIn profiles are URLs containing linkedin.com
- Location is a city/country line near the name if present

Return a JSON object with this EXACT schema (use null for anything absent):
{
  "name": "Full Name",
  "email": "email@example.com",
  "phone": "+1234567890",
  "linkedin": "linkedin.com/in/profile",
  "location": "City, Country"
}

RESUME TEXT:
{resume_text}"#;

/// Step 2: education history.
pub const EDUCATION_PROMPT_TEMPLATE: &str = r#"Extract the education history from the resume below.

Look for a section with keywords like Education, Academic, or Qualification. For each entry capture the institution, degree type (Bachelor's, Master's, PhD, ...), field of study, graduation year (or expected year), and GPA/percentage if mentioned.

Return a JSON array with this EXACT schema (empty array if no education is listed; null for absent fields):
[
  {
    "institution": "University Name",
    "degree": "Bachelor's",
    "field_of_study": "Computer Science",
    "graduation_year": "2023",
    "gpa": "3.8/4.0"
  }
]

RESUME TEXT:
{resume_text}"#;

/// Step 3: work experience.
pub const EXPERIENCE_PROMPT_TEMPLATE: &str = r#"Extract the work experience from the resume below.

Look for a section with keywords like Experience, Employment, or Work History. For each role capture the company, job title, duration (start - end or "Present"), key responsibilities and achievements, and location if mentioned.

Return a JSON array with this EXACT schema (empty array if none; null for absent fields):
[
  {
    "company": "Company Name",
    "position": "Job Title",
    "duration": "Jan 2020 - Dec 2022",
    "description": "Key responsibilities and achievements",
    "location": "City, Country"
  }
]

RESUME TEXT:
{resume_text}"#;

/// Step 4: skills.
pub const SKILLS_PROMPT_TEMPLATE: &str = r#"Extract the skills from the resume below.

Look for a section with keywords like Skills, Technical Skills, or Core Competencies. Include both technical and soft skills: programming languages, tools, frameworks, methodologies.

Return a JSON array of strings (empty array if none):
["Python", "Machine Learning", "Kubernetes"]

RESUME TEXT:
{resume_text}"#;

/// Step 5: certifications.
pub const CERTIFICATIONS_PROMPT_TEMPLATE: &str = r#"Extract the certifications from the resume below.

For each certification capture its name, the issuing organization, and the date if mentioned.

Return a JSON array with this EXACT schema (empty array if none; null for absent fields):
[
  {
    "name": "Certification Name",
    "issuer": "Issuing Organization",
    "date": "2023"
  }
]

RESUME TEXT:
{resume_text}"#;

/// Step 6: projects.
pub const PROJECTS_PROMPT_TEMPLATE: &str = r#"Extract the projects from the resume below.

For each project capture its name, a brief description, the technologies used, and a link if present.

Return a JSON array with this EXACT schema (empty array if none; null for absent fields):
[
  {
    "name": "Project Name",
    "description": "Brief description",
    "technologies": ["Tech1", "Tech2"],
    "link": "github.com/project"
  }
]

RESUME TEXT:
{resume_text}"#;

/// Step 7: professional summary.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Extract the professional summary or career objective from the resume below.

It usually appears near the top, under a heading like Summary, Profile, or Objective. Do not invent one: if the resume has no summary section, return null.

Return a JSON object with this EXACT schema:
{"summary": "Professional summary or objective"}

RESUME TEXT:
{resume_text}"#;

/// Repair prompt issued once when a step completion fails to parse.
/// Replace `{invalid_output}` and `{original_prompt}` before sending.
pub const REPAIR_PROMPT_TEMPLATE: &str = r#"Your previous reply could not be parsed as JSON.

PREVIOUS REPLY:
{invalid_output}

Answer the original request again. Reply with EXACTLY one valid JSON value in the schema the request describes — no surrounding text, no code fences.

ORIGINAL REQUEST:
{original_prompt}"#;

/// Renders the repair prompt for a failed step.
pub fn repair_prompt(original_prompt: &str, invalid_output: &str) -> String {
    REPAIR_PROMPT_TEMPLATE
        .replace("{invalid_output}", invalid_output)
        .replace("{original_prompt}", original_prompt)
}
