use crate::error::AttributionError;
use crate::model::{AttributionDocument, Image, Recipe};
use crate::outputs::Artifact;

/// One markdown bullet per image, for reading attributions at a glance.
pub struct CompactListing {
    /// File name of the attribution document, quoted in the provenance line
    pub source_name: String,
}

impl CompactListing {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }
}

/// Missing fields render as empty strings so every line has the same shape.
pub fn compact_line(recipe: &Recipe, image: &Image) -> String {
    format!(
        "- Recipe {} (index {}) — {}: Image {} — {} — {} — {} ({}) — Source: {} — Changes: {}",
        recipe.recipe_number,
        recipe.index,
        recipe.name,
        image.image_number,
        image.title(),
        image.creator(),
        image.license(),
        image.license_url(),
        image.source(),
        image.changes(),
    )
}

impl Artifact for CompactListing {
    fn name(&self) -> &'static str {
        "compact listing"
    }

    fn render(&self, document: &AttributionDocument) -> Result<String, AttributionError> {
        let mut lines = vec![
            "# Image attributions (compact)".to_string(),
            String::new(),
            format!("Source: {}", self.source_name),
            String::new(),
        ];
        lines.extend(
            document
                .images()
                .map(|(recipe, image)| compact_line(recipe, image)),
        );

        Ok(lines.join("\n") + "\n")
    }
}
