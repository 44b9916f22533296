// Prompt constants for portfolio generation.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Portfolio generation prompt template.
/// Replace: {design_direction}, {profile_details}, {single_file_instruction}
pub const PORTFOLIO_PROMPT_TEMPLATE: &str = r#"Create a complete, modern, responsive personal portfolio website for the person described below.

DESIGN REQUIREMENTS:
- Modern, professional look with a cohesive color palette and clear typography
- Fully responsive layout that works on mobile, tablet and desktop
- Smooth scrolling navigation with a sticky header
- Subtle animations on scroll and hover; never distracting
- Accessible markup: semantic HTML5 elements, alt text, sufficient contrast
- {design_direction}

REQUIRED SECTIONS:
1. Hero section with the person's name, title and a short tagline
2. About section built from the bio
3. Skills section
4. Work experience timeline with achievements
5. Projects section with cards showing tech stack and links
6. Education section
7. Contact section and footer

Only use the information provided. Do not invent employers, projects, degrees or links.
Sections whose data reads "none provided" should be omitted or kept minimal.

{single_file_instruction}

PROFILE DATA:
{profile_details}"#;

/// Used when the profile carries a reference site.
pub const REFERENCE_SITE_DIRECTION: &str = "Take visual inspiration from the layout and style of {reference_site}, without copying its content";

/// Used when no reference site was given.
pub const DEFAULT_DESIGN_DIRECTION: &str =
    "No reference site was provided: choose a clean, modern style suited to the person's field";

/// Rendered in place of any empty section or missing value.
pub const NONE_PROVIDED: &str = "none provided";
