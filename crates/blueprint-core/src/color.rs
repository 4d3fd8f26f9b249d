/*
 * color.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Color classification for dependency-graph nodes.
 */

//! Color classification.
//!
//! A [`ColorScheme`] maps symbolic tags to colors and their
//! human-readable descriptions, and classifies nodes: the outline color
//! reflects the statement's status (priority `mathlibok` > `leanok` >
//! `can_state` > `notready`), the fill color the proof's status, with a
//! dedicated branch for definitions. Both classifiers are pure; a node
//! no rule matches gets the empty color.
//!
//! Documents may override individual tags (`\graphcolor`); looking up a
//! tag that is not in the table logs a warning and yields the empty
//! color.

use blueprint_depgraph::Node;
use indexmap::IndexMap;
use serde::Serialize;

use crate::document::LegendEntry;

/// A color and its description as shown in the legend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorSpec {
    pub color: String,
    pub description: String,
}

impl ColorSpec {
    pub fn new(color: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            description: description.into(),
        }
    }
}

/// Tag → color table plus the two node classifiers.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    colors: IndexMap<String, ColorSpec>,
}

impl Default for ColorScheme {
    fn default() -> Self {
        let mut colors = IndexMap::new();
        colors.insert("mathlib".to_string(), ColorSpec::new("darkgreen", "Dark green"));
        colors.insert("stated".to_string(), ColorSpec::new("green", "Green"));
        colors.insert("can_state".to_string(), ColorSpec::new("blue", "Blue"));
        colors.insert("not_ready".to_string(), ColorSpec::new("#FFAA33", "Orange"));
        colors.insert("proved".to_string(), ColorSpec::new("#9CEC8B", "Green"));
        colors.insert("can_prove".to_string(), ColorSpec::new("#A3D6FF", "Blue"));
        colors.insert("defined".to_string(), ColorSpec::new("#B0ECA3", "Light green"));
        colors.insert("fully_proved".to_string(), ColorSpec::new("#1CAC78", "Dark green"));
        Self { colors }
    }
}

impl ColorScheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, tag: &str) -> Option<&ColorSpec> {
        self.colors.get(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorSpec)> {
        self.colors.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Override a tag's color and description.
    ///
    /// An unknown tag is recorded anyway so custom tags keep working,
    /// but logged since it usually indicates a typo in the document.
    pub fn set(
        &mut self,
        tag: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) {
        let tag = tag.into();
        if !self.colors.contains_key(&tag) {
            tracing::warn!(tag = %tag, "Unknown color tag");
        }
        let color: String = color.into();
        let description: String = description.into();
        self.colors
            .insert(tag, ColorSpec::new(color.trim(), description.trim()));
    }

    /// The color of a tag, empty when the tag is missing.
    fn color_of(&self, tag: &str) -> &str {
        match self.colors.get(tag) {
            Some(spec) => &spec.color,
            None => {
                tracing::warn!(tag = %tag, "Color tag not in table");
                ""
            }
        }
    }

    /// The legend description of a tag, empty when the tag is missing.
    fn description_of(&self, tag: &str) -> &str {
        match self.colors.get(tag) {
            Some(spec) => &spec.description,
            None => "",
        }
    }

    /// Outline color of a node, from the status of its statement.
    pub fn outline_color(&self, node: &Node) -> &str {
        let meta = &node.meta;
        if meta.mathlibok {
            self.color_of("mathlib")
        } else if meta.leanok {
            self.color_of("stated")
        } else if meta.can_state {
            self.color_of("can_state")
        } else if meta.notready {
            self.color_of("not_ready")
        } else {
            ""
        }
    }

    /// Fill color of a node, from the status of its proof.
    ///
    /// Definitions get their own branch and override the
    /// `fully_proved` fill.
    pub fn fill_color(&self, node: &Node) -> &str {
        let meta = &node.meta;

        let mut fill = "";
        if meta.proved {
            fill = self.color_of("proved");
        } else if meta.can_prove && (meta.can_state || meta.leanok) {
            fill = self.color_of("can_prove");
        }
        if node.kind.is_definition() {
            if meta.leanok {
                fill = self.color_of("defined");
            } else if meta.can_state {
                fill = self.color_of("can_prove");
            }
        } else if meta.fully_proved {
            fill = self.color_of("fully_proved");
        }
        fill
    }

    /// Legend entries describing what the colors mean, appended to the
    /// graph legend after parsing so color overrides are picked up.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        vec![
            LegendEntry::new(
                format!("{} border", self.description_of("can_state")),
                "the <em>statement</em> of this result is ready to be formalized; all prerequisites are done",
            ),
            LegendEntry::new(
                format!("{} border", self.description_of("not_ready")),
                "the <em>statement</em> of this result is not ready to be formalized; the blueprint needs more work",
            ),
            LegendEntry::new(
                format!("{} background", self.description_of("can_state")),
                "the <em>proof</em> of this result is ready to be formalized; all prerequisites are done",
            ),
            LegendEntry::new(
                format!("{} border", self.description_of("proved")),
                "the <em>statement</em> of this result is formalized",
            ),
            LegendEntry::new(
                format!("{} background", self.description_of("proved")),
                "the <em>proof</em> of this result is formalized",
            ),
            LegendEntry::new(
                format!("{} background", self.description_of("fully_proved")),
                "the <em>proof</em> of this result and all its ancestors are formalized",
            ),
            LegendEntry::new(
                format!("{} border", self.description_of("mathlib")),
                "this is in Mathlib",
            ),
        ]
    }
}
