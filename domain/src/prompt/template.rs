//! Prompt templates for the scan pipelines
//!
//! Pure functions: brand metadata in, [`QueryRequest`] out. Inputs are
//! embedded verbatim; nothing here can fail.

use crate::brand::Project;
use crate::extraction::ResultSchema;
use crate::query::QueryRequest;
use crate::scan::{PromptSuggestionsSchema, SentimentSchema, VisibilitySchema};

/// Builds the query sent to every provider in a run
pub struct PromptBuilder;

impl PromptBuilder {
    /// System instructions shared by all structured pipelines
    pub fn structured_system() -> &'static str {
        r#"You are a brand perception analyst.
You answer strictly with a single JSON document and nothing else.
Do not wrap the JSON in prose. Do not add comments."#
    }

    /// Brand-sentiment scan query
    pub fn sentiment(
        brand_name: &str,
        brand_variants: &[String],
        domain: &str,
        business_context: Option<&str>,
    ) -> QueryRequest {
        let mut prompt = format!(
            "Analyze how the brand \"{}\"{} (website: {}) is perceived.",
            brand_name,
            Self::variants_clause(brand_variants),
            domain
        );

        if let Some(context) = business_context {
            prompt.push_str(&format!("\nBusiness context: {}", context));
        }

        prompt.push_str(
            r#"

Respond with JSON using exactly these keys:
- "s": overall sentiment score, an integer from 0 (very negative) to 100 (very positive)
- "t": 1 to 10 recurring themes; each either a short string or an object {"name": string, "sentiment": "positive" | "negative" | "neutral", "weight": integer 0-100}
- "kp": 1 to 10 keywords associated with positive perception
- "kn": 1 to 10 keywords associated with negative perception"#,
        );

        Self::structured(prompt, &SentimentSchema)
    }

    /// Visibility scan query: does the brand come up for its own category?
    pub fn visibility(
        brand_name: &str,
        brand_variants: &[String],
        domain: &str,
        business_context: Option<&str>,
    ) -> QueryRequest {
        let mut prompt = format!(
            "A user asks for recommendations in the market served by {}.",
            domain
        );

        if let Some(context) = business_context {
            prompt.push_str(&format!(" The market is described as: {}.", context));
        }

        prompt.push_str(&format!(
            r#"
List the brands you would recommend, then report whether "{}"{} is among them.

Respond with JSON using exactly these keys:
- "mentioned": true if the brand appears in your recommendations
- "position": its 1-based rank in your list, or null if not mentioned
- "competitors": up to 10 other brands you recommended"#,
            brand_name,
            Self::variants_clause(brand_variants),
        ));

        Self::structured(prompt, &VisibilitySchema)
    }

    /// Onboarding query: questions real users would ask that should surface the brand
    pub fn onboarding(
        brand_name: &str,
        brand_variants: &[String],
        domain: &str,
        business_context: Option<&str>,
    ) -> QueryRequest {
        let mut prompt = format!(
            "Suggest questions that people ask AI assistants where \"{}\"{} (website: {}) would be a relevant answer.",
            brand_name,
            Self::variants_clause(brand_variants),
            domain
        );

        if let Some(context) = business_context {
            prompt.push_str(&format!("\nBusiness context: {}", context));
        }

        prompt.push_str(
            r#"
Do not mention the brand name in the questions.

Respond with JSON: {"prompts": [1 to 10 questions as strings]}"#,
        );

        Self::structured(prompt, &PromptSuggestionsSchema)
    }

    /// Sentiment query for a stored project
    pub fn sentiment_for(project: &Project) -> QueryRequest {
        Self::sentiment(
            &project.brand_name,
            &project.brand_variants,
            &project.domain,
            project.business_context.as_deref(),
        )
    }

    /// Visibility query for a stored project
    pub fn visibility_for(project: &Project) -> QueryRequest {
        Self::visibility(
            &project.brand_name,
            &project.brand_variants,
            &project.domain,
            project.business_context.as_deref(),
        )
    }

    /// Onboarding query for a stored project
    pub fn onboarding_for(project: &Project) -> QueryRequest {
        Self::onboarding(
            &project.brand_name,
            &project.brand_variants,
            &project.domain,
            project.business_context.as_deref(),
        )
    }

    fn variants_clause(variants: &[String]) -> String {
        if variants.is_empty() {
            return String::new();
        }
        format!(" (also known as: {})", variants.join(", "))
    }

    fn structured<S: ResultSchema>(prompt: String, schema: &S) -> QueryRequest {
        QueryRequest::new(prompt)
            .with_system_instructions(Self::structured_system())
            .with_response_format(schema.response_format())
    }
}
