use serde::{Deserialize, Serialize};

/// Root of the structured dump: every recipe in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionDocument {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_number: u32,
    pub index: u32,
    pub name: String,
    pub images: Vec<Image>,
}

impl Recipe {
    pub fn new(recipe_number: u32, index: u32, name: impl Into<String>) -> Self {
        Recipe {
            recipe_number,
            index,
            name: name.into(),
            images: Vec::new(),
        }
    }
}

/// A single image and whatever attribution fields were present in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub image_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changes: Option<String>,
}

impl Image {
    pub fn new(image_number: u32) -> Self {
        Image {
            image_number,
            ..Default::default()
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn creator(&self) -> &str {
        self.creator.as_deref().unwrap_or_default()
    }

    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or_default()
    }

    pub fn license(&self) -> &str {
        self.license.as_deref().unwrap_or_default()
    }

    pub fn license_url(&self) -> &str {
        self.license_url.as_deref().unwrap_or_default()
    }

    pub fn changes(&self) -> &str {
        self.changes.as_deref().unwrap_or_default()
    }
}

impl AttributionDocument {
    /// Iterates every image paired with its owning recipe, in document order.
    pub fn images(&self) -> impl Iterator<Item = (&Recipe, &Image)> {
        self.recipes
            .iter()
            .flat_map(|recipe| recipe.images.iter().map(move |image| (recipe, image)))
    }

    pub fn image_count(&self) -> usize {
        self.recipes.iter().map(|recipe| recipe.images.len()).sum()
    }
}
