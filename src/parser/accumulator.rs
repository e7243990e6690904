use crate::model::{Image, Recipe};

/// The attribution field an accepted field line is stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Creator,
    Source,
    License,
    LicenseUrl,
    Changes,
}

impl Field {
    /// Maps a raw field label (`License URL`, ` title `, ...) onto a known field.
    ///
    /// Labels are trimmed, lowercased and stripped of spaces before lookup;
    /// anything else is unknown.
    pub fn from_label(label: &str) -> Option<Field> {
        let key: String = label
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| *c != ' ')
            .collect();

        match key.as_str() {
            "title" => Some(Field::Title),
            "creator" => Some(Field::Creator),
            "source" => Some(Field::Source),
            "license" => Some(Field::License),
            "licenseurl" => Some(Field::LicenseUrl),
            "changes" => Some(Field::Changes),
            _ => None,
        }
    }

    fn slot<'a>(&self, image: &'a mut Image) -> &'a mut Option<String> {
        match self {
            Field::Title => &mut image.title,
            Field::Creator => &mut image.creator,
            Field::Source => &mut image.source,
            Field::License => &mut image.license,
            Field::LicenseUrl => &mut image.license_url,
            Field::Changes => &mut image.changes,
        }
    }
}

/// A recipe still receiving images, with the image still receiving fields.
#[derive(Debug)]
struct OpenRecipe {
    recipe: Recipe,
    image: Option<Image>,
}

impl OpenRecipe {
    fn close_image(&mut self) {
        if let Some(image) = self.image.take() {
            self.recipe.images.push(image);
        }
    }

    fn close(mut self) -> Recipe {
        self.close_image();
        self.recipe
    }
}

/// Two-level parse state: an optional open image nested in an optional open
/// recipe. Finalized recipes are append-only.
#[derive(Debug, Default)]
pub struct Accumulator {
    finished: Vec<Recipe>,
    open: Option<OpenRecipe>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes whatever is open and starts a new recipe with no images.
    pub fn open_recipe(&mut self, recipe: Recipe) {
        self.close_recipe();
        self.open = Some(OpenRecipe {
            recipe,
            image: None,
        });
    }

    /// Closes the open image into its recipe and opens a new one.
    ///
    /// Returns `false` when no recipe is open; the header is then dropped.
    pub fn open_image(&mut self, image_number: u32) -> bool {
        match self.open.as_mut() {
            Some(open) => {
                open.close_image();
                open.image = Some(Image::new(image_number));
                true
            }
            None => false,
        }
    }

    /// Stores a value on the open image, replacing any earlier value.
    ///
    /// Returns `false` when there is no open image to attach it to.
    pub fn apply_field(&mut self, field: Field, value: &str) -> bool {
        match self.open.as_mut().and_then(|open| open.image.as_mut()) {
            Some(image) => {
                *field.slot(image) = Some(value.trim().to_string());
                true
            }
            None => false,
        }
    }

    pub fn has_open_image(&self) -> bool {
        self.open.as_ref().is_some_and(|open| open.image.is_some())
    }

    /// Recipes finalized so far.
    pub fn finished(&self) -> &[Recipe] {
        &self.finished
    }

    /// Closes any open image and recipe, exactly as a new recipe header would.
    pub fn finish(mut self) -> Vec<Recipe> {
        self.close_recipe();
        self.finished
    }

    fn close_recipe(&mut self) {
        if let Some(open) = self.open.take() {
            self.finished.push(open.close());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_labels() {
        assert_eq!(Field::from_label("Title"), Some(Field::Title));
        assert_eq!(Field::from_label("License URL"), Some(Field::LicenseUrl));
        assert_eq!(Field::from_label("  license url "), Some(Field::LicenseUrl));
        assert_eq!(Field::from_label("Changes"), Some(Field::Changes));
        assert_eq!(Field::from_label("Author"), None);
        assert_eq!(Field::from_label("License Name"), None);
    }

    #[test]
    fn test_new_recipe_closes_open_image() {
        let mut acc = Accumulator::new();
        acc.open_recipe(Recipe::new(1, 4, "Calendula Salve"));
        assert!(acc.open_image(1));
        assert!(acc.apply_field(Field::Title, "Calendula.jpg"));
        assert!(acc.finished().is_empty());

        acc.open_recipe(Recipe::new(2, 5, "Yarrow Tea"));
        assert_eq!(acc.finished().len(), 1);
        assert_eq!(acc.finished()[0].images.len(), 1);
        assert_eq!(
            acc.finished()[0].images[0].title.as_deref(),
            Some("Calendula.jpg")
        );
        assert!(!acc.has_open_image());
    }

    #[test]
    fn test_finish_closes_last_recipe() {
        let mut acc = Accumulator::new();
        acc.open_recipe(Recipe::new(9, 1, "Rose Water"));
        acc.open_image(1);
        acc.open_image(2);
        acc.apply_field(Field::Creator, "Someone");

        let recipes = acc.finish();
        assert_eq!(recipes.len(), 1);
        let numbers: Vec<u32> = recipes[0].images.iter().map(|i| i.image_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(recipes[0].images[1].creator.as_deref(), Some("Someone"));
    }

    #[test]
    fn test_field_without_image_is_dropped() {
        let mut acc = Accumulator::new();
        assert!(!acc.apply_field(Field::Title, "orphan"));

        acc.open_recipe(Recipe::new(1, 1, "Mint"));
        assert!(!acc.apply_field(Field::Title, "still orphan"));

        let recipes = acc.finish();
        assert!(recipes[0].images.is_empty());
    }

    #[test]
    fn test_image_without_recipe_is_dropped() {
        let mut acc = Accumulator::new();
        assert!(!acc.open_image(1));
        assert!(!acc.has_open_image());
        assert!(acc.finish().is_empty());
    }

    #[test]
    fn test_last_value_wins() {
        let mut acc = Accumulator::new();
        acc.open_recipe(Recipe::new(1, 1, "Sage"));
        acc.open_image(1);
        acc.apply_field(Field::License, "CC0");
        acc.apply_field(Field::License, "  CC BY 4.0 ");

        let recipes = acc.finish();
        assert_eq!(recipes[0].images[0].license.as_deref(), Some("CC BY 4.0"));
    }
}
