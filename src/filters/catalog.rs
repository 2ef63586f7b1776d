use tracing::{debug, warn};

use crate::{
    config::Config,
    error::ConfigurationError,
    filters::{
        ColorClampParams, ColorControlsParams, FilterDefinition, FilterKind, SepiaToneParams,
    },
    imaging::ProcessingContext,
};

/// The built-in visual effects, in the order they are offered
pub static DEFAULT_FILTERS: [FilterDefinition; 6] = [
    FilterDefinition::ColorClamp(ColorClampParams::new([0.2, 0.2, 0.2, 0.2], [0.9, 0.9, 0.9, 0.9])),
    FilterDefinition::ColorControls(ColorControlsParams::with_saturation(0.1)),
    FilterDefinition::PhotoEffectInstant,
    FilterDefinition::PhotoEffectProcess,
    FilterDefinition::PhotoEffectNoir,
    FilterDefinition::SepiaTone(SepiaToneParams::new(0.7)),
];

/// The built-in filter definitions
pub fn default_filters() -> &'static [FilterDefinition] {
    &DEFAULT_FILTERS
}

/// An ordered set of filters checked against a processing context
///
/// Building a catalog is where a missing backend operation or a bad parameter is caught,
/// before any image is rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCatalog {
    filters: Vec<FilterDefinition>,
}

impl FilterCatalog {
    /// The built-in catalog
    pub fn builtin(context: &ProcessingContext) -> Result<Self, ConfigurationError> {
        Self::from_definitions(context, default_filters().to_vec())
    }

    /// A catalog of caller-supplied definitions, kept in the given order
    pub fn from_definitions(
        context: &ProcessingContext,
        filters: Vec<FilterDefinition>,
    ) -> Result<Self, ConfigurationError> {
        for filter in &filters {
            if !context.supports(filter.kind()) {
                warn!("Processing context does not provide {}", filter.kind());
                return Err(ConfigurationError::UnsupportedOperation {
                    operation: filter.name().to_string(),
                });
            }
            filter.validate()?;
        }

        debug!("Built filter catalog with {} entries", filters.len());
        Ok(Self { filters })
    }

    /// The catalog named by a configuration: its override list if present, else the built-ins
    pub fn from_config(context: &ProcessingContext, config: &Config) -> Result<Self, ConfigurationError> {
        match &config.filters {
            Some(filters) => Self::from_definitions(context, filters.clone()),
            None => Self::builtin(context),
        }
    }

    /// Keep only the named operations, in catalog order
    pub fn select(&self, kinds: &[FilterKind]) -> Self {
        Self {
            filters: self
                .filters
                .iter()
                .filter(|filter| kinds.contains(&filter.kind()))
                .copied()
                .collect(),
        }
    }

    pub fn filters(&self) -> &[FilterDefinition] {
        &self.filters
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterDefinition> {
        self.filters.iter()
    }

    /// Get the first definition of an operation
    pub fn get(&self, kind: FilterKind) -> Option<&FilterDefinition> {
        self.filters.iter().find(|filter| filter.kind() == kind)
    }

    /// Names of all filters, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(FilterDefinition::name).collect()
    }

    /// Get the number of filters
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<'a> IntoIterator for &'a FilterCatalog {
    type Item = &'a FilterDefinition;
    type IntoIter = std::slice::Iter<'a, FilterDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
