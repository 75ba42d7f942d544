/*!
 * Instruction template for marker replacement.
 *
 * The instruction is built once per run and sent alongside the verbatim
 * document. It is parameterized only by the marker text and the language
 * the marker names.
 */

use crate::markers::{TARGET_LANGUAGE, TRANSLATION_MARKER};

/// System instruction template for document localization.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default instruction for marker replacement.
    pub const DOCUMENT_LOCALIZER: &'static str = r#"You are a translation assistant that specializes in {target_language}.
You are given a document that contains tags like "{marker}".
For each occurrence of this tag, replace the tag with a {target_language} translation of
the text that comes immediately before it.
Return the entire document with all tags replaced by appropriate {target_language} translations.
Never remove existing text or formatting, you are simply to augment the doc by adding
the {target_language} translations.
Respond only with the translated document, without any other text, comments or formatting."#;

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default document localizer template.
    pub fn document_localizer() -> Self {
        Self::new(Self::DOCUMENT_LOCALIZER)
    }

    /// Render the template with the given marker and language.
    pub fn render(&self, marker: &str, target_language: &str) -> String {
        self.template
            .replace("{marker}", marker)
            .replace("{target_language}", target_language)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::document_localizer()
    }
}

/// Render the instruction for the built-in marker
pub fn build_instruction() -> String {
    PromptTemplate::document_localizer().render(TRANSLATION_MARKER, TARGET_LANGUAGE)
}
