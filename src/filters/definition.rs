use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    error::ConfigurationError,
    filters::{
        photo_effect::{INSTANT, NOIR, PROCESS},
        ColorClampParams, ColorControlsParams, FilterMetadata, PixelOperation, SepiaToneParams,
    },
};

/// Name of a filter operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    ColorClamp,
    ColorControls,
    PhotoEffectInstant,
    PhotoEffectProcess,
    PhotoEffectNoir,
    SepiaTone,
}

impl FilterKind {
    /// Every operation, in catalog order
    pub const ALL: [FilterKind; 6] = [
        FilterKind::ColorClamp,
        FilterKind::ColorControls,
        FilterKind::PhotoEffectInstant,
        FilterKind::PhotoEffectProcess,
        FilterKind::PhotoEffectNoir,
        FilterKind::SepiaTone,
    ];

    /// Machine name, as used in configuration files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Self::ColorClamp => "color_clamp",
            Self::ColorControls => "color_controls",
            Self::PhotoEffectInstant => "photo_effect_instant",
            Self::PhotoEffectProcess => "photo_effect_process",
            Self::PhotoEffectNoir => "photo_effect_noir",
            Self::SepiaTone => "sepia_tone",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ColorClamp => "Color Clamp",
            Self::ColorControls => "Color Controls",
            Self::PhotoEffectInstant => "Photo Effect: Instant",
            Self::PhotoEffectProcess => "Photo Effect: Process",
            Self::PhotoEffectNoir => "Photo Effect: Noir",
            Self::SepiaTone => "Sepia Tone",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownOperation { name: s.to_string() })
    }
}

/// A named filter operation together with its parameter values
///
/// Serialized with an `operation` tag and the parameters alongside it:
///
/// ```toml
/// [[filters]]
/// operation = "sepia_tone"
/// intensity = 0.7
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum FilterDefinition {
    ColorClamp(ColorClampParams),
    ColorControls(ColorControlsParams),
    PhotoEffectInstant,
    PhotoEffectProcess,
    PhotoEffectNoir,
    SepiaTone(SepiaToneParams),
}

impl FilterDefinition {
    /// Which operation this definition names
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::ColorClamp(_) => FilterKind::ColorClamp,
            Self::ColorControls(_) => FilterKind::ColorControls,
            Self::PhotoEffectInstant => FilterKind::PhotoEffectInstant,
            Self::PhotoEffectProcess => FilterKind::PhotoEffectProcess,
            Self::PhotoEffectNoir => FilterKind::PhotoEffectNoir,
            Self::SepiaTone(_) => FilterKind::SepiaTone,
        }
    }

    /// Machine name of the operation
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// The definition with the operation's default parameters
    pub fn with_defaults(kind: FilterKind) -> Self {
        match kind {
            FilterKind::ColorClamp => Self::ColorClamp(ColorClampParams::default()),
            FilterKind::ColorControls => Self::ColorControls(ColorControlsParams::default()),
            FilterKind::PhotoEffectInstant => Self::PhotoEffectInstant,
            FilterKind::PhotoEffectProcess => Self::PhotoEffectProcess,
            FilterKind::PhotoEffectNoir => Self::PhotoEffectNoir,
            FilterKind::SepiaTone => Self::SepiaTone(SepiaToneParams::default()),
        }
    }

    /// The pixel operation that renders this definition
    pub fn operation(&self) -> &dyn PixelOperation {
        match self {
            Self::ColorClamp(params) => params,
            Self::ColorControls(params) => params,
            Self::PhotoEffectInstant => &INSTANT,
            Self::PhotoEffectProcess => &PROCESS,
            Self::PhotoEffectNoir => &NOIR,
            Self::SepiaTone(params) => params,
        }
    }

    /// Check that the parameters can be rendered
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.operation().validate()
    }

    pub fn metadata(&self) -> FilterMetadata {
        self.operation().metadata()
    }
}

impl fmt::Display for FilterDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(kind.name().parse::<FilterKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind() {
        let err = "CIColorInvert".parse::<FilterKind>().unwrap_err();
        assert_eq!(err, ConfigurationError::UnknownOperation { name: "CIColorInvert".to_string() });
    }

    #[test]
    fn test_definition_kind_matches_operation() {
        for kind in FilterKind::ALL {
            let definition = FilterDefinition::with_defaults(kind);
            assert_eq!(definition.kind(), kind);
            assert_eq!(definition.operation().kind(), kind);
            assert!(definition.validate().is_ok());
        }
    }

    #[test]
    fn test_metadata_display_names() {
        let definition = FilterDefinition::SepiaTone(SepiaToneParams::new(0.7));
        let metadata = definition.metadata();
        assert_eq!(metadata.display_name, "Sepia Tone");
        assert_eq!(metadata.parameters.len(), 1);

        assert!(FilterDefinition::PhotoEffectNoir.metadata().parameters.is_empty());
    }

    #[test]
    fn test_parse_tagged_definition() {
        #[derive(Deserialize)]
        struct Wrapper {
            filters: Vec<FilterDefinition>,
        }

        let wrapper: Wrapper = toml::from_str(
            r#"
            [[filters]]
            operation = "sepia_tone"
            intensity = 0.5

            [[filters]]
            operation = "photo_effect_noir"

            [[filters]]
            operation = "color_controls"
            saturation = 0.1
            "#,
        )
        .unwrap();

        assert_eq!(
            wrapper.filters,
            vec![
                FilterDefinition::SepiaTone(SepiaToneParams::new(0.5)),
                FilterDefinition::PhotoEffectNoir,
                FilterDefinition::ColorControls(ColorControlsParams::with_saturation(0.1)),
            ]
        );
    }

    #[test]
    fn test_parse_unknown_operation_fails() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Wrapper {
            filters: Vec<FilterDefinition>,
        }

        let result: Result<Wrapper, _> = toml::from_str(
            r#"
            [[filters]]
            operation = "posterize"
            "#,
        );
        assert!(result.is_err());
    }
}
