use crate::core::spatial::ContactParams;
use crate::core::topology::registry::{TemplateLoadError, TemplateRegistry};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Remark number under which structures describe site and ligand pairings.
pub const DEFAULT_SITE_REMARK_NUMBER: u16 = 800;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{parameter}': {value}")]
    InvalidValue {
        parameter: &'static str,
        value: String,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Template loading failed: {source}")]
    Templates {
        #[from]
        source: TemplateLoadError,
    },
}

/// Settings applied while assembling models from records.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyConfig {
    pub site_remark_number: u16,
    pub contacts: ContactParams,
    pub templates: TemplateRegistry,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            site_remark_number: DEFAULT_SITE_REMARK_NUMBER,
            contacts: ContactParams::default(),
            templates: TemplateRegistry::standard(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct AssemblyConfigFile {
    site_remark_number: u16,
    contacts: ContactParams,
    /// Extra template files, relative to the configuration file.
    template_files: Vec<PathBuf>,
}

impl Default for AssemblyConfigFile {
    fn default() -> Self {
        Self {
            site_remark_number: DEFAULT_SITE_REMARK_NUMBER,
            contacts: ContactParams::default(),
            template_files: Vec::new(),
        }
    }
}

impl AssemblyConfig {
    /// Loads settings from a TOML file; omitted keys take their defaults.
    ///
    /// ```toml
    /// site_remark_number = 800
    /// template_files = ["modified_residues.toml"]
    ///
    /// [contacts]
    /// exclusion_depth = 3
    /// nearby_residue_cutoff = 3.0
    /// nearby_residue_exclusion_depth = 1
    /// ```
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: AssemblyConfigFile = toml::from_str(&content).map_err(|e| ConfigError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut builder = AssemblyConfigBuilder::new()
            .site_remark_number(file.site_remark_number)
            .exclusion_depth(file.contacts.exclusion_depth)
            .nearby_residue_cutoff(file.contacts.nearby_residue_cutoff)
            .nearby_residue_exclusion_depth(file.contacts.nearby_residue_exclusion_depth);
        for template_file in &file.template_files {
            builder = builder.extra_templates(TemplateRegistry::load(&base_dir.join(template_file))?);
        }
        builder.build()
    }
}

#[derive(Default)]
pub struct AssemblyConfigBuilder {
    site_remark_number: Option<u16>,
    exclusion_depth: Option<usize>,
    nearby_residue_cutoff: Option<f64>,
    nearby_residue_exclusion_depth: Option<usize>,
    templates: Option<TemplateRegistry>,
    extra_templates: Vec<TemplateRegistry>,
}

impl AssemblyConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn site_remark_number(mut self, number: u16) -> Self {
        self.site_remark_number = Some(number);
        self
    }
    pub fn exclusion_depth(mut self, depth: usize) -> Self {
        self.exclusion_depth = Some(depth);
        self
    }
    pub fn nearby_residue_cutoff(mut self, cutoff: f64) -> Self {
        self.nearby_residue_cutoff = Some(cutoff);
        self
    }
    pub fn nearby_residue_exclusion_depth(mut self, depth: usize) -> Self {
        self.nearby_residue_exclusion_depth = Some(depth);
        self
    }
    /// Replaces the standard templates entirely.
    pub fn templates(mut self, registry: TemplateRegistry) -> Self {
        self.templates = Some(registry);
        self
    }
    /// Merges templates over the base set; later registries win on name clashes.
    pub fn extra_templates(mut self, registry: TemplateRegistry) -> Self {
        self.extra_templates.push(registry);
        self
    }

    pub fn build(self) -> Result<AssemblyConfig, ConfigError> {
        let defaults = ContactParams::default();
        let nearby_residue_cutoff = self
            .nearby_residue_cutoff
            .unwrap_or(defaults.nearby_residue_cutoff);
        if !nearby_residue_cutoff.is_finite() || nearby_residue_cutoff < 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "nearby_residue_cutoff",
                value: nearby_residue_cutoff.to_string(),
            });
        }

        let mut templates = self.templates.unwrap_or_else(TemplateRegistry::standard);
        for extra in self.extra_templates {
            templates.extend(extra);
        }

        Ok(AssemblyConfig {
            site_remark_number: self
                .site_remark_number
                .unwrap_or(DEFAULT_SITE_REMARK_NUMBER),
            contacts: ContactParams {
                exclusion_depth: self.exclusion_depth.unwrap_or(defaults.exclusion_depth),
                nearby_residue_cutoff,
                nearby_residue_exclusion_depth: self
                    .nearby_residue_exclusion_depth
                    .unwrap_or(defaults.nearby_residue_exclusion_depth),
            },
            templates,
        })
    }
}
