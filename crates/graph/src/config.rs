use crate::error::{GraphError, Result};
use crate::layout::MAX_JITTER_BOUND;
use crate::types::ArtifactType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for layout computation
///
/// Every numeric constant the strategies use lives here. Missing fields in a
/// TOML file fall back to [`LayoutConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Canvas width in layout units
    pub width: f64,

    /// Canvas height in layout units
    pub height: f64,

    pub hierarchical: HierarchicalConfig,
    pub grid: GridConfig,
    pub circular: CircularConfig,
    pub radial: RadialConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchicalConfig {
    /// Y coordinate of the first row
    pub margin_top: f64,

    /// Vertical distance between rows
    pub row_height: f64,

    /// Minimum horizontal distance between nodes in one row
    pub min_spacing: f64,

    /// Horizontal jitter bound (±)
    pub jitter_x: f64,

    /// Vertical jitter bound (±)
    pub jitter_y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Category order, top to bottom
    pub category_priority: Vec<ArtifactType>,

    /// Upper bound on columns per category block
    pub max_columns: usize,

    pub column_spacing: f64,
    pub row_spacing: f64,

    /// Extra vertical space between category blocks
    pub category_gap: f64,

    pub margin_top: f64,

    /// Cosmetic shift applied to the focus node (x, y)
    pub focus_offset: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircularConfig {
    /// Maximum nodes per ring
    pub ring_capacity: usize,

    /// Radius of the innermost ring
    pub base_radius: f64,

    /// Radius added per ring
    pub ring_increment: f64,

    /// Angle jitter bound in radians (±)
    pub angle_jitter: f64,

    /// Radius jitter bound (±)
    pub radius_jitter: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialConfig {
    /// Radius of the dependency/dependent arcs
    pub inner_radius: f64,

    /// Radius of the ring holding unrelated nodes
    pub outer_radius: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            hierarchical: HierarchicalConfig::default(),
            grid: GridConfig::default(),
            circular: CircularConfig::default(),
            radial: RadialConfig::default(),
        }
    }
}

impl Default for HierarchicalConfig {
    fn default() -> Self {
        Self {
            margin_top: 100.0,
            row_height: 150.0,
            min_spacing: 120.0,
            jitter_x: 30.0,
            jitter_y: 20.0,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            category_priority: vec![
                ArtifactType::PrimaryUnit,
                ArtifactType::Trigger,
                ArtifactType::UiComponent,
                ArtifactType::Test,
                ArtifactType::Other,
            ],
            max_columns: 6,
            column_spacing: 180.0,
            row_spacing: 120.0,
            category_gap: 80.0,
            margin_top: 80.0,
            focus_offset: (0.0, -15.0),
        }
    }
}

impl Default for CircularConfig {
    fn default() -> Self {
        Self {
            ring_capacity: 12,
            base_radius: 200.0,
            ring_increment: 150.0,
            angle_jitter: 0.1,
            radius_jitter: 20.0,
        }
    }
}

impl Default for RadialConfig {
    fn default() -> Self {
        Self {
            inner_radius: 250.0,
            outer_radius: 450.0,
        }
    }
}

impl LayoutConfig {
    /// Create config for small canvases (dense packing)
    pub fn compact() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            hierarchical: HierarchicalConfig {
                row_height: 100.0,
                min_spacing: 80.0,
                ..Default::default()
            },
            grid: GridConfig {
                column_spacing: 120.0,
                row_spacing: 80.0,
                category_gap: 50.0,
                focus_offset: (0.0, -10.0),
                ..Default::default()
            },
            circular: CircularConfig {
                base_radius: 120.0,
                ring_increment: 90.0,
                radius_jitter: 10.0,
                ..Default::default()
            },
            radial: RadialConfig {
                inner_radius: 160.0,
                outer_radius: 280.0,
            },
        }
    }

    /// Create config for large graphs (more air between nodes)
    pub fn spacious() -> Self {
        Self {
            width: 1800.0,
            height: 1200.0,
            hierarchical: HierarchicalConfig {
                row_height: 200.0,
                min_spacing: 160.0,
                ..Default::default()
            },
            circular: CircularConfig {
                base_radius: 260.0,
                ring_increment: 200.0,
                ..Default::default()
            },
            radial: RadialConfig {
                inner_radius: 350.0,
                outer_radius: 650.0,
            },
            ..Default::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.numeric_fields() {
            if !value.is_finite() {
                return Err(GraphError::invalid_config(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        for (name, bound) in self.jitter_bounds() {
            if bound > MAX_JITTER_BOUND {
                return Err(GraphError::invalid_config(format!(
                    "{name} ({bound}) exceeds the largest usable jitter bound"
                )));
            }
        }

        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(GraphError::invalid_config(format!(
                "canvas must be positive, got {}x{}",
                self.width, self.height
            )));
        }

        let h = &self.hierarchical;
        if h.row_height <= 0.0 || h.min_spacing <= 0.0 {
            return Err(GraphError::invalid_config(
                "hierarchical row_height and min_spacing must be > 0",
            ));
        }
        if h.jitter_x < 0.0 || h.jitter_y < 0.0 {
            return Err(GraphError::invalid_config("jitter bounds cannot be negative"));
        }
        if h.jitter_y * 2.0 >= h.row_height {
            return Err(GraphError::invalid_config(format!(
                "jitter_y ({}) must be less than half of row_height ({})",
                h.jitter_y, h.row_height
            )));
        }

        let g = &self.grid;
        if g.max_columns == 0 {
            return Err(GraphError::invalid_config("grid max_columns must be > 0"));
        }
        if g.column_spacing <= 0.0 || g.row_spacing <= 0.0 || g.category_gap < 0.0 {
            return Err(GraphError::invalid_config(
                "grid spacing must be > 0 and category_gap >= 0",
            ));
        }
        let (dx, dy) = g.focus_offset;
        if dx.abs() * 2.0 >= g.column_spacing || dy.abs() * 2.0 >= g.row_spacing {
            return Err(GraphError::invalid_config(format!(
                "focus_offset ({dx}, {dy}) must stay within half a grid cell"
            )));
        }

        let c = &self.circular;
        if c.ring_capacity == 0 {
            return Err(GraphError::invalid_config("ring_capacity must be > 0"));
        }
        if c.base_radius <= 0.0 || c.ring_increment <= 0.0 {
            return Err(GraphError::invalid_config(
                "base_radius and ring_increment must be > 0",
            ));
        }
        if c.angle_jitter < 0.0 || c.radius_jitter < 0.0 {
            return Err(GraphError::invalid_config("jitter bounds cannot be negative"));
        }
        if c.radius_jitter * 2.0 >= c.ring_increment {
            return Err(GraphError::invalid_config(format!(
                "radius_jitter ({}) must be less than half of ring_increment ({})",
                c.radius_jitter, c.ring_increment
            )));
        }

        let r = &self.radial;
        if r.inner_radius <= 0.0 || r.outer_radius <= r.inner_radius {
            return Err(GraphError::invalid_config(format!(
                "radial radii must satisfy 0 < inner ({}) < outer ({})",
                r.inner_radius, r.outer_radius
            )));
        }

        Ok(())
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 19] {
        let (h, g, c, r) = (&self.hierarchical, &self.grid, &self.circular, &self.radial);
        [
            ("width", self.width),
            ("height", self.height),
            ("hierarchical.margin_top", h.margin_top),
            ("hierarchical.row_height", h.row_height),
            ("hierarchical.min_spacing", h.min_spacing),
            ("hierarchical.jitter_x", h.jitter_x),
            ("hierarchical.jitter_y", h.jitter_y),
            ("grid.column_spacing", g.column_spacing),
            ("grid.row_spacing", g.row_spacing),
            ("grid.category_gap", g.category_gap),
            ("grid.margin_top", g.margin_top),
            ("grid.focus_offset.x", g.focus_offset.0),
            ("grid.focus_offset.y", g.focus_offset.1),
            ("circular.base_radius", c.base_radius),
            ("circular.ring_increment", c.ring_increment),
            ("circular.angle_jitter", c.angle_jitter),
            ("circular.radius_jitter", c.radius_jitter),
            ("radial.inner_radius", r.inner_radius),
            ("radial.outer_radius", r.outer_radius),
        ]
    }

    fn jitter_bounds(&self) -> [(&'static str, f64); 4] {
        [
            ("hierarchical.jitter_x", self.hierarchical.jitter_x),
            ("hierarchical.jitter_y", self.hierarchical.jitter_y),
            ("circular.angle_jitter", self.circular.angle_jitter),
            ("circular.radius_jitter", self.circular.radius_jitter),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn test_preset_configs_valid() {
        assert!(LayoutConfig::compact().validate().is_ok());
        assert!(LayoutConfig::spacious().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = LayoutConfig::default();

        // Invalid: rings could overlap after jitter
        config.circular.radius_jitter = 80.0;
        assert!(config.validate().is_err());
        config.circular.radius_jitter = 20.0;

        // Invalid: focus would leave its cell
        config.grid.focus_offset = (100.0, 0.0);
        assert!(config.validate().is_err());
        config.grid.focus_offset = (0.0, -15.0);

        // Invalid: outer ring inside inner arcs
        config.radial.outer_radius = 100.0;
        assert!(config.validate().is_err());
        config.radial.outer_radius = 450.0;

        config.grid.max_columns = 0;
        assert!(config.validate().is_err());
        config.grid.max_columns = 6;

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_row_jitter_stays_inside_its_row() {
        let mut config = LayoutConfig::default();

        // Invalid: a jittered row could cross the focus row
        config.hierarchical.jitter_y = 75.0;
        assert!(config.validate().is_err());

        config.hierarchical.jitter_y = 74.0;
        assert!(config.validate().is_ok());

        let err = LayoutConfig::from_toml_str("[hierarchical]\nrow_height = 40.0\n").unwrap_err();
        assert!(err.to_string().contains("jitter_y"));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        for text in [
            "[circular]\nangle_jitter = inf\n",
            "[circular]\nangle_jitter = nan\n",
            "[hierarchical]\njitter_x = 1e308\n",
            "[hierarchical]\njitter_x = nan\n",
            "[hierarchical]\nmargin_top = -inf\n",
            "[grid]\nfocus_offset = [nan, 0.0]\n",
            "[radial]\nouter_radius = inf\n",
            "height = nan\n",
        ] {
            assert!(
                LayoutConfig::from_toml_str(text).is_err(),
                "accepted {text:?}"
            );
        }
    }

    #[test]
    fn test_accepted_config_lays_out_without_panicking() {
        use crate::layout::{Jitter, LayoutStrategy};
        use crate::view::GraphView;

        let view = GraphView::from_json_str(
            r#"{
                "nodes": [{"id": "r:A.cls"}, {"id": "r:B.cls"}, {"id": "r:C.cls"}],
                "links": [
                    {"source": "r:A.cls", "target": "r:B.cls", "type": "import"},
                    {"source": "r:C.cls", "target": "r:A.cls", "type": "import"}
                ]
            }"#,
        )
        .unwrap();

        // Largest bounds validation lets through
        let mut config = LayoutConfig::default();
        config.hierarchical.jitter_x = MAX_JITTER_BOUND;
        config.circular.angle_jitter = MAX_JITTER_BOUND;
        config.validate().unwrap();

        for strategy in LayoutStrategy::ALL {
            let positions = view.layout(strategy, &config, &mut Jitter::seeded(1));
            assert_eq!(positions.len(), 3);
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = LayoutConfig::from_toml_str(
            r#"
            width = 1000.0

            [grid]
            category_priority = ["test", "primary-unit"]

            [circular]
            ring_capacity = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.width, 1000.0);
        assert_eq!(config.height, 800.0);
        assert_eq!(
            config.grid.category_priority,
            vec![ArtifactType::Test, ArtifactType::PrimaryUnit]
        );
        assert_eq!(config.grid.max_columns, 6);
        assert_eq!(config.circular.ring_capacity, 8);
        assert_eq!(config.circular.base_radius, 200.0);
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        assert!(LayoutConfig::from_toml_str("[circular]\nring_capacity = 0\n").is_err());
        assert!(LayoutConfig::from_toml_str("width = \"wide\"").is_err());
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.toml");
        std::fs::write(&path, "[radial]\ninner_radius = 100.0\nouter_radius = 300.0\n").unwrap();

        let config = LayoutConfig::from_path(&path).unwrap();
        assert_eq!(config.radial.inner_radius, 100.0);
        assert!(LayoutConfig::from_path(dir.path().join("missing.toml")).is_err());
    }
}
