use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Output template families a conversion can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    SinglePart,
    Bundle,
    SupplierLoader,
}

impl TemplateType {
    pub const ALL: [TemplateType; 3] = [
        TemplateType::SinglePart,
        TemplateType::Bundle,
        TemplateType::SupplierLoader,
    ];

    pub fn keyword(&self) -> &'static str {
        match self {
            TemplateType::SinglePart => "single_part",
            TemplateType::Bundle => "bundle",
            TemplateType::SupplierLoader => "supplier_loader",
        }
    }

    fn crosswalk_file(&self) -> &'static str {
        match self {
            TemplateType::SinglePart => "config/mappings/crosswalk_single_part.csv",
            TemplateType::Bundle => "config/mappings/crosswalk_bundle_single_part_single_labor.csv",
            TemplateType::SupplierLoader => "config/mappings/crosswalk_supplier_loader.csv",
        }
    }

    fn base_template_file(&self) -> &'static str {
        match self {
            TemplateType::SinglePart => "samples/base-templates/Single part template.xlsx",
            TemplateType::Bundle => "samples/base-templates/Single part single labor template.xlsx",
            TemplateType::SupplierLoader => {
                "samples/base-templates/Supplier Loader Template JUN2024.xlsx"
            }
        }
    }
}

impl FromStr for TemplateType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateType::ALL
            .into_iter()
            .find(|t| t.keyword() == s.trim())
            .ok_or_else(|| ConfigError::UnknownTemplateType(s.to_string()))
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Resolves template keywords to their default crosswalk and base workbook.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    root: PathBuf,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new(".")
    }
}

impl TemplateRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn crosswalk_path(&self, template: TemplateType) -> PathBuf {
        self.root.join(template.crosswalk_file())
    }

    pub fn base_template_path(&self, template: TemplateType) -> PathBuf {
        self.root.join(template.base_template_file())
    }

    pub fn infer_crosswalk_path(&self, keyword: &str) -> Result<PathBuf, ConfigError> {
        Ok(self.crosswalk_path(keyword.parse()?))
    }

    pub fn infer_base_template_path(&self, keyword: &str) -> Result<PathBuf, ConfigError> {
        Ok(self.base_template_path(keyword.parse()?))
    }
}
