//! Line-oriented parser for the hand-written attribution document.
//!
//! Three line shapes are recognized; everything else, including blank lines
//! and stray markdown, is ignored:
//!
//! ```text
//! ## Recipe 3 (index 7) — Dried Mugwort
//! ### Image 1
//! - License URL: https://example.org/cc-by-sa-4.0
//! ```

mod accumulator;

pub use self::accumulator::{Accumulator, Field};

use crate::model::{AttributionDocument, Recipe};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

static RECIPE_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^## Recipe ([0-9]+) \(index ([0-9]+)\) — (.+)$").expect("valid recipe regex")
});

static IMAGE_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^### Image ([0-9]+)$").expect("valid image regex"));

static FIELD_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- ([A-Za-z ]+): (.+)$").expect("valid field regex"));

/// A single classified line of the attribution document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    RecipeHeader {
        recipe_number: u32,
        index: u32,
        name: &'a str,
    },
    ImageHeader {
        image_number: u32,
    },
    Field {
        label: &'a str,
        value: &'a str,
    },
}

impl<'a> Line<'a> {
    /// Classifies an already trimmed line. Numbers that overflow `u32` make the
    /// line unrecognized.
    pub fn classify(line: &'a str) -> Option<Line<'a>> {
        if let Some(caps) = RECIPE_HEADER.captures(line) {
            let recipe_number = caps.get(1)?.as_str().parse().ok()?;
            let index = caps.get(2)?.as_str().parse().ok()?;
            return Some(Line::RecipeHeader {
                recipe_number,
                index,
                name: caps.get(3)?.as_str(),
            });
        }

        if let Some(caps) = IMAGE_HEADER.captures(line) {
            let image_number = caps.get(1)?.as_str().parse().ok()?;
            return Some(Line::ImageHeader { image_number });
        }

        let caps = FIELD_LINE.captures(line)?;
        Some(Line::Field {
            label: caps.get(1)?.as_str(),
            value: caps.get(2)?.as_str(),
        })
    }
}

/// Every line terminator, not only `\n`. A `\r\n` pair leaves an empty piece
/// that the blank-line check drops.
const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Parses the full text of an attribution document in a single forward pass.
pub fn parse_document(text: &str) -> AttributionDocument {
    let mut acc = Accumulator::new();

    for raw in text.split(LINE_BREAKS) {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        match Line::classify(line) {
            Some(Line::RecipeHeader {
                recipe_number,
                index,
                name,
            }) => acc.open_recipe(Recipe::new(recipe_number, index, name)),
            Some(Line::ImageHeader { image_number }) => {
                if !acc.open_image(image_number) {
                    debug!("Ignoring image {} outside of any recipe", image_number);
                }
            }
            Some(Line::Field { label, value }) => match Field::from_label(label) {
                Some(field) => {
                    acc.apply_field(field, value);
                }
                None => trace!("Ignoring unknown field label '{}'", label),
            },
            None => {}
        }
    }

    AttributionDocument {
        recipes: acc.finish(),
    }
}
