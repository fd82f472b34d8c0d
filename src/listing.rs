// App store listing input and the built-in demo listing.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// The three text sections of an app store listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppListing {
    pub title: String,
    pub short_description: String,
    pub long_description: String,
}

impl AppListing {
    pub fn new(
        title: impl Into<String>,
        short_description: impl Into<String>,
        long_description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            short_description: short_description.into(),
            long_description: long_description.into(),
        }
    }

    /// Read a listing from a JSON file with `title`, `short_description`
    /// and `long_description` fields.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read listing file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid listing JSON in {}", path.display()))
    }
}

/// Keyword the demo listing is scored against.
pub const EXAMPLE_KEYWORD: &str = "edit photos";

const EXAMPLE_LONG_DESCRIPTION: &str = "
Photo Editor Pro is the ultimate photo editing app for everyone! Whether you're a beginner or a pro, you can easily enhance your images with our powerful tools. 

**Key Features:**

*   **Filters:** Apply stunning filters to give your photos a unique look. Choose from vintage, black and white, cinematic, and more!
*   **Effects:** Add cool effects like blur, glitch, light leaks, and overlays.
*   **Collage Maker:** Create beautiful photo collages with various layouts and backgrounds.
*   **Stickers & Text:** Personalize your photos with fun stickers and custom text.
*   **Adjustment Tools:** Fine-tune brightness, contrast, saturation, and more.
*   **Retouching:** Remove blemishes, whiten teeth, and enhance facial features.

Download Photo Editor Pro now and start creating amazing photos!
";

/// A photo editor listing used by `semscore demo`.
pub fn example_listing() -> AppListing {
    AppListing::new(
        "Photo Editor Pro - Filters & Effects",
        "Edit photos with amazing filters, effects, and collage maker. Enhance your images easily!",
        EXAMPLE_LONG_DESCRIPTION,
    )
}
