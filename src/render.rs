//! # Document Rendering Module
//!
//! Turns the document models into text that can be printed or saved, and
//! writes the results to disk.
//!
//! ## Formats
//!
//! - **text**: checkbox cells (`[ ] 500 g Flour`) laid out in columns
//! - **markdown**: GitHub-style task lists
//! - **json**: the document models as pretty-printed JSON

use crate::catering_errors::{ConfigError, RenderError};
use crate::documents::{ChecklistItem, RecipeGuideDocument, ShoppingListDocument};
use crate::quantity_display::QuantityPrecision;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Default number of checkbox columns in the text shopping list
pub const DEFAULT_COLUMNS: usize = 3;
/// Default width of one checkbox column, in characters
pub const DEFAULT_COLUMN_WIDTH: usize = 30;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: "output format".to_string(),
                value: value.to_string(),
            }),
        }
    }
}

/// Layout options shared by the renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub columns: usize,
    pub column_width: usize,
    pub precision: QuantityPrecision,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            column_width: DEFAULT_COLUMN_WIDTH,
            precision: QuantityPrecision::Raw,
        }
    }
}

/// A rendering backend for the two documents
pub trait DocumentRenderer {
    /// File extension of the produced documents
    fn extension(&self) -> &'static str;

    fn render_shopping_list(&self, document: &ShoppingListDocument) -> Result<String, RenderError>;

    fn render_recipe_guides(&self, document: &RecipeGuideDocument) -> Result<String, RenderError>;
}

/// Pick the renderer for a format
pub fn renderer_for(format: OutputFormat, options: RenderOptions) -> Box<dyn DocumentRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { options }),
        OutputFormat::Markdown => Box::new(MarkdownRenderer { options }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

fn underline(title: &str, marker: char) -> String {
    marker.to_string().repeat(title.chars().count())
}

/// Plain text with checkbox columns
pub struct TextRenderer {
    pub options: RenderOptions,
}

impl TextRenderer {
    fn cell(&self, item: &ChecklistItem) -> String {
        match item {
            ChecklistItem::Checkbox { .. } => format!("[ ] {}", item.text()),
            ChecklistItem::Raw(text) => text.clone(),
        }
    }
}

impl DocumentRenderer for TextRenderer {
    fn extension(&self) -> &'static str {
        "txt"
    }

    fn render_shopping_list(&self, document: &ShoppingListDocument) -> Result<String, RenderError> {
        let columns = self.options.columns.max(1);
        let width = self.options.column_width;
        let mut out = String::new();

        writeln!(out, "{}", document.title)?;
        writeln!(out, "{}", underline(&document.title, '='))?;

        for section in &document.sections {
            writeln!(out)?;
            writeln!(out, "{}", section.title)?;

            let cells: Vec<String> = section
                .lines
                .iter()
                .filter(|line| !line.trim().is_empty())
                .map(|line| self.cell(&ChecklistItem::parse(line, self.options.precision)))
                .collect();

            for row in cells.chunks(columns) {
                let mut text = String::new();
                for cell in row {
                    write!(text, "{cell:<width$}  ")?;
                }
                writeln!(out, "{}", text.trim_end())?;
            }
        }

        Ok(out)
    }

    fn render_recipe_guides(&self, document: &RecipeGuideDocument) -> Result<String, RenderError> {
        let mut out = String::new();

        writeln!(out, "{}", document.title)?;
        writeln!(out, "{}", underline(&document.title, '='))?;

        for page in &document.pages {
            writeln!(out)?;
            writeln!(out, "{}", page.title)?;
            writeln!(out, "{}", underline(&page.title, '-'))?;
            writeln!(out, "{}", page.servings_note)?;
            writeln!(out)?;
            writeln!(out, "{}", page.ingredients_heading)?;
            for line in &page.ingredients {
                writeln!(out, "- {line}")?;
            }
            writeln!(out)?;
            writeln!(out, "{}", page.method_heading)?;
            writeln!(out, "{}", page.method)?;
        }

        Ok(out)
    }
}

/// Markdown task lists
pub struct MarkdownRenderer {
    pub options: RenderOptions,
}

impl DocumentRenderer for MarkdownRenderer {
    fn extension(&self) -> &'static str {
        "md"
    }

    fn render_shopping_list(&self, document: &ShoppingListDocument) -> Result<String, RenderError> {
        let mut out = String::new();
        writeln!(out, "# {}", document.title)?;

        for section in &document.sections {
            writeln!(out)?;
            writeln!(out, "## {}", section.title)?;
            writeln!(out)?;
            for line in section.lines.iter().filter(|line| !line.trim().is_empty()) {
                match ChecklistItem::parse(line, self.options.precision) {
                    item @ ChecklistItem::Checkbox { .. } => {
                        writeln!(out, "- [ ] {}", item.text())?;
                    }
                    ChecklistItem::Raw(text) => {
                        writeln!(out, "- {text}")?;
                    }
                }
            }
        }

        Ok(out)
    }

    fn render_recipe_guides(&self, document: &RecipeGuideDocument) -> Result<String, RenderError> {
        let mut out = String::new();
        writeln!(out, "# {}", document.title)?;

        for page in &document.pages {
            writeln!(out)?;
            writeln!(out, "## {}", page.title)?;
            writeln!(out)?;
            writeln!(out, "_{}_", page.servings_note)?;
            writeln!(out)?;
            writeln!(out, "### {}", page.ingredients_heading)?;
            writeln!(out)?;
            for line in &page.ingredients {
                writeln!(out, "- {line}")?;
            }
            writeln!(out)?;
            writeln!(out, "### {}", page.method_heading)?;
            writeln!(out)?;
            writeln!(out, "{}", page.method)?;
        }

        Ok(out)
    }
}

/// Pretty-printed JSON of the document models
pub struct JsonRenderer;

impl DocumentRenderer for JsonRenderer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn render_shopping_list(&self, document: &ShoppingListDocument) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(document)?)
    }

    fn render_recipe_guides(&self, document: &RecipeGuideDocument) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(document)?)
    }
}

/// Paths of the documents written for one plan
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenDocuments {
    pub shopping_list: PathBuf,
    pub recipe_guides: PathBuf,
}

/// Render both documents and write them out
///
/// With an output directory the files are named `shopping_list.<ext>` and
/// `recipe_guides.<ext>`, overwriting earlier runs. Without one they go to
/// uniquely named files in the system temp directory that are kept after the
/// process exits.
pub fn write_documents(
    renderer: &dyn DocumentRenderer,
    shopping_list: &ShoppingListDocument,
    recipe_guides: &RecipeGuideDocument,
    output_dir: Option<&Path>,
) -> Result<WrittenDocuments, RenderError> {
    let shopping_text = renderer.render_shopping_list(shopping_list)?;
    let guides_text = renderer.render_recipe_guides(recipe_guides)?;
    let extension = renderer.extension();

    let written = match output_dir {
        Some(dir) => {
            fs::create_dir_all(dir).map_err(|source| RenderError::Write {
                path: dir.to_path_buf(),
                source,
            })?;
            WrittenDocuments {
                shopping_list: write_file(dir, "shopping_list", extension, &shopping_text)?,
                recipe_guides: write_file(dir, "recipe_guides", extension, &guides_text)?,
            }
        }
        None => WrittenDocuments {
            shopping_list: write_temp_file("shopping_list_", extension, &shopping_text)?,
            recipe_guides: write_temp_file("recipe_guides_", extension, &guides_text)?,
        },
    };

    info!(
        shopping_list = %written.shopping_list.display(),
        recipe_guides = %written.recipe_guides.display(),
        "Documents written"
    );
    Ok(written)
}

fn write_file(
    dir: &Path,
    stem: &str,
    extension: &str,
    contents: &str,
) -> Result<PathBuf, RenderError> {
    let path = dir.join(format!("{stem}.{extension}"));
    debug!(path = %path.display(), bytes = contents.len(), "Writing document");
    fs::write(&path, contents).map_err(|source| RenderError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn write_temp_file(prefix: &str, extension: &str, contents: &str) -> Result<PathBuf, RenderError> {
    let temp_dir = std::env::temp_dir();
    let suffix = format!(".{extension}");

    let mut temp_file = tempfile::Builder::new()
        .prefix(prefix)
        .suffix(&suffix)
        .tempfile()
        .map_err(|source| RenderError::Write {
            path: temp_dir.clone(),
            source,
        })?;

    temp_file
        .write_all(contents.as_bytes())
        .map_err(|source| RenderError::Write {
            path: temp_file.path().to_path_buf(),
            source,
        })?;

    let (_file, path) = temp_file.keep().map_err(|e| RenderError::Write {
        path: temp_dir,
        source: e.error,
    })?;

    debug!(path = %path.display(), bytes = contents.len(), "Wrote temporary document");
    Ok(path)
}
