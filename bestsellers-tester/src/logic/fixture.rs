use anyhow::{Context, Result};
use bestsellers_core::{FormField, SectionData};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Section payload plus the product form fields the page would submit.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub name: String,
    pub data: SectionData,
    pub form: Vec<FormField>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Full {
        section: SectionData,
        #[serde(default)]
        form: Vec<FormField>,
    },
    /// A bare `SectionData-<id>` payload copied from a page.
    Payload(SectionData),
}

impl Fixture {
    /// Fixture shipped with the tester.
    ///
    /// # Errors
    /// Returns an error if the bundled JSON is malformed.
    pub fn load_default() -> Result<Self> {
        Self::from_json("bundled", include_str!("../../fixtures/section.json"))
    }

    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let json =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&path.display().to_string(), &json)
    }

    /// # Errors
    /// Returns an error if `json` is neither a fixture object nor a section payload.
    pub fn from_json(name: &str, json: &str) -> Result<Self> {
        let file: FixtureFile =
            serde_json::from_str(json).with_context(|| format!("parsing fixture {name}"))?;
        let (data, form) = match file {
            FixtureFile::Full { section, form } => (section, form),
            FixtureFile::Payload(section) => {
                let form = default_form(&section);
                (section, form)
            }
        };
        Ok(Self {
            name: name.to_string(),
            data,
            form,
        })
    }
}

/// Form for the first product when the fixture carries none.
fn default_form(data: &SectionData) -> Vec<FormField> {
    data.product(0)
        .map(|product| {
            let id = match &product.id {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            vec![FormField::new("id", id)]
        })
        .unwrap_or_default()
}
