use crate::{GenerationScheme, build_grid_view, compose};

/// Number of locations above which a preview carries a warning.
pub const RECOMMENDED_LIMIT: usize = 500;

/// The result of the risk-free preview phase. Never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GenerationPreview {
    /// The scheme this preview was built from.
    pub scheme: GenerationScheme,
    /// Every name the scheme implies, in composition order.
    pub names: Vec<String>,
    /// Rows for display. Empty for `Single` and `Row` schemes.
    pub grid_view: Vec<Vec<String>>,
    pub total_count: usize,
    pub warning: Option<String>,
}

impl GenerationPreview {
    /// Composes `scheme` and lays it out, warning when the result exceeds
    /// `recommended_limit`.
    pub fn build(scheme: &GenerationScheme, recommended_limit: usize) -> Self {
        let names = compose(scheme);
        let grid_view = build_grid_view(scheme, &names);
        let total_count = names.len();
        let warning = (total_count > recommended_limit).then(|| {
            format!(
                "This will generate {total_count} locations, which exceeds the recommended limit \
                 of {recommended_limit}. This may take some time and consume significant resources."
            )
        });

        Self {
            scheme: scheme.clone(),
            names,
            grid_view,
            total_count,
            warning,
        }
    }

    pub const fn has_warning(&self) -> bool {
        self.warning.is_some()
    }
}
