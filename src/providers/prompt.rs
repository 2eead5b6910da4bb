use crate::images::ImageData;

/// Shape of the answer every prompt asks for.
pub const RESPONSE_FORMAT: &str = r#"Respond with ONLY a JSON object and nothing else:
{ "analysis": "...", "recommendation": "...", "films": ["Film1", "Film2", "Film3"] }"#;

const MOOD_INSTRUCTIONS: &str = "You are a cinema therapist. Analyse the feeling the user describes and recommend exactly 3 films.";

const STYLE_INSTRUCTIONS: &str = "Look at the style, colours and atmosphere of this image and recommend exactly 3 films that match it.";

/// A request for the generative model: instructions plus an optional image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub text: String,
    pub image: Option<ImageData>,
}

impl PromptRequest {
    /// Ask the model to write `analysis` and `recommendation` in `language`.
    /// Blank languages leave the request untouched.
    pub fn with_language(mut self, language: Option<&str>) -> Self {
        if let Some(lang) = language.map(str::trim).filter(|lang| !lang.is_empty()) {
            self.text.push_str(&format!(
                "\n\nWrite the analysis and the recommendation in {lang}. Keep film titles as they are commonly known."
            ));
        }
        self
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }
}

/// Build the text-only prompt for a mood description.
///
/// Returns `None` for blank input: an empty mood is ignored, not an error.
pub fn build_mood_prompt(mood: &str) -> Option<PromptRequest> {
    let mood = mood.trim();
    if mood.is_empty() {
        return None;
    }

    Some(PromptRequest {
        text: format!("{MOOD_INSTRUCTIONS}\nUser: '{mood}'\n\n{RESPONSE_FORMAT}"),
        image: None,
    })
}

/// Build the text+image prompt for a style picture.
pub fn build_style_prompt(image: ImageData) -> PromptRequest {
    PromptRequest {
        text: format!("{STYLE_INSTRUCTIONS}\n\n{RESPONSE_FORMAT}"),
        image: Some(image),
    }
}
