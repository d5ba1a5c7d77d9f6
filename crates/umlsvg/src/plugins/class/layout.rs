//! Class diagram layout algorithm
//!
//! Connectivity-ranked radial placement: the most connected class sits at the
//! canvas centre and every other class is spread evenly around an ellipse.
//! Layout works on its own positioned values and never reorders the diagram.

use std::collections::HashMap;
use std::f32::consts::PI;

use tracing::{debug, span, trace, Level};
use unicode_width::UnicodeWidthStr;

use super::database::{Attribute, ClassEntity, Diagram, Method, RelationshipKind};
use crate::core::{DiagramError, RenderConfig};

/// Approximate advance of one label character, in pixels
const LABEL_CHAR_WIDTH: f32 = 7.0;
/// Padding below the header and below each member section
const SECTION_PADDING: u32 = 10;
/// Padding at the bottom of a class box
const BOX_PADDING: u32 = 5;

/// Positioned class box for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedClass {
    pub name: String,
    pub is_abstract: bool,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Relationship endpoints naming this class
    pub connections: usize,
    pub attributes: Vec<String>,
    pub methods: Vec<String>,
}

impl PositionedClass {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Positioned relationship for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedRelationship {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
    pub label: Option<String>,
    pub from_x: f32,
    pub from_y: f32,
    pub to_x: f32,
    pub to_y: f32,
}

impl PositionedRelationship {
    pub fn midpoint(&self) -> (f32, f32) {
        (
            ((self.from_x + self.to_x) / 2.0).trunc(),
            ((self.from_y + self.to_y) / 2.0).trunc(),
        )
    }

    /// Width of the label background box
    pub fn label_width(&self) -> f32 {
        self.label
            .as_deref()
            .map(|label| UnicodeWidthStr::width(label) as f32 * LABEL_CHAR_WIDTH)
            .unwrap_or(0.0)
    }
}

/// Layout result containing all positioned elements
#[derive(Debug, Clone, PartialEq)]
pub struct ClassLayoutResult {
    /// Classes in placement order, most connected first
    pub classes: Vec<PositionedClass>,
    /// Relationships whose endpoints are both declared, in declaration order
    pub relationships: Vec<PositionedRelationship>,
    pub width: f32,
    pub height: f32,
}

impl ClassLayoutResult {
    /// First placed class named `name`
    pub fn class(&self, name: &str) -> Option<&PositionedClass> {
        self.classes.iter().find(|c| c.name == name)
    }
}

/// Class diagram layout algorithm
pub struct ClassLayoutAlgorithm {
    config: RenderConfig,
}

impl ClassLayoutAlgorithm {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Format an attribute line: `"<vis> name : Type"`
    pub fn format_attribute(attribute: &Attribute) -> String {
        match attribute.visibility {
            Some(v) => format!("{} {} : {}", v.to_char(), attribute.name, attribute.declared_type),
            None => format!("{} : {}", attribute.name, attribute.declared_type),
        }
    }

    /// Format a method line: `"<vis> name() : Return"`
    pub fn format_method(method: &Method) -> String {
        match method.visibility {
            Some(v) => format!("{} {}() : {}", v.to_char(), method.name, method.return_type),
            None => format!("{}() : {}", method.name, method.return_type),
        }
    }

    /// Height of a class box for its member counts
    pub fn class_height(&self, class: &ClassEntity) -> u32 {
        let line = self.config.line_height;
        let attributes = class.attributes.len() as u32 * line + SECTION_PADDING;
        let methods = class.methods.len() as u32 * line + SECTION_PADDING;
        self.config.header_height + attributes + methods + BOX_PADDING
    }

    /// Layout the diagram
    pub fn layout(&self, diagram: &Diagram) -> Result<ClassLayoutResult, DiagramError> {
        let layout_span = span!(Level::DEBUG, "layout", classes = diagram.class_count());
        let _enter = layout_span.enter();

        if self.config.width == 0 || self.config.height == 0 {
            return Err(DiagramError::layout_error(format!(
                "canvas must have a positive size, got {}x{}",
                self.config.width, self.config.height
            )));
        }
        if self.config.box_width == 0 {
            return Err(DiagramError::layout_error(
                "class box width must be positive".to_string(),
            ));
        }

        let mut connections: HashMap<&str, usize> = HashMap::new();
        for relationship in diagram.relationships() {
            *connections.entry(relationship.source.as_str()).or_default() += 1;
            *connections.entry(relationship.target.as_str()).or_default() += 1;
        }

        let mut ranked: Vec<(&ClassEntity, usize)> = diagram
            .classes()
            .iter()
            .map(|c| (c, connections.get(c.name.as_str()).copied().unwrap_or(0)))
            .collect();
        // Stable: ties keep declaration order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let classes = self.place(&ranked);
        let relationships = self.route(diagram, &classes);

        debug!(
            classes = classes.len(),
            relationships = relationships.len(),
            "Layout completed"
        );

        Ok(ClassLayoutResult {
            classes,
            relationships,
            width: self.config.width as f32,
            height: self.config.height as f32,
        })
    }

    fn place(&self, ranked: &[(&ClassEntity, usize)]) -> Vec<PositionedClass> {
        let center_x = (self.config.width / 2) as f32;
        let center_y = (self.config.height / 2) as f32;
        let radius_x = self.config.radius_x as f32;
        let radius_y = self.config.radius_y as f32;
        let box_width = self.config.box_width as f32;
        let ring = ranked.len().saturating_sub(1).max(1) as f32;

        ranked
            .iter()
            .enumerate()
            .map(|(i, (class, connections))| {
                let height = self.class_height(class);
                let half_width = (self.config.box_width / 2) as f32;
                let half_height = (height / 2) as f32;

                let (x, y) = if i == 0 {
                    (center_x - half_width, center_y - half_height)
                } else {
                    let angle = 2.0 * PI * (i - 1) as f32 / ring;
                    (
                        (center_x + radius_x * angle.cos()).trunc() - half_width,
                        (center_y + radius_y * angle.sin()).trunc() - half_height,
                    )
                };
                trace!(class = %class.name, x, y, connections, "Placed class");

                PositionedClass {
                    name: class.name.clone(),
                    is_abstract: class.is_abstract,
                    x,
                    y,
                    width: box_width,
                    height: height as f32,
                    connections: *connections,
                    attributes: class.attributes.iter().map(Self::format_attribute).collect(),
                    methods: class.methods.iter().map(Self::format_method).collect(),
                }
            })
            .collect()
    }

    fn route(&self, diagram: &Diagram, classes: &[PositionedClass]) -> Vec<PositionedRelationship> {
        let mut routed = Vec::new();

        for relationship in diagram.relationships() {
            let source = classes.iter().find(|c| c.name == relationship.source);
            let target = classes.iter().find(|c| c.name == relationship.target);
            let (Some(from), Some(to)) = (source, target) else {
                trace!(relationship = %relationship, "Skipping relationship with undeclared endpoint");
                continue;
            };

            let (from_x, from_y, to_x, to_y) = Self::border_points(from, to);
            routed.push(PositionedRelationship {
                source: relationship.source.clone(),
                target: relationship.target.clone(),
                kind: relationship.kind,
                label: Some(relationship.label.clone()).filter(|l| !l.is_empty()),
                from_x,
                from_y,
                to_x,
                to_y,
            });
        }

        routed
    }

    /// Border-to-border segment, leaving by the side facing the dominant axis
    fn border_points(from: &PositionedClass, to: &PositionedClass) -> (f32, f32, f32, f32) {
        let (from_cx, from_cy) = from.center();
        let (to_cx, to_cy) = to.center();
        let dx = to_cx - from_cx;
        let dy = to_cy - from_cy;

        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                (from.x + from.width, from_cy, to.x, to_cy)
            } else {
                (from.x, from_cy, to.x + to.width, to_cy)
            }
        } else if dy > 0.0 {
            (from_cx, from.y + from.height, to_cx, to.y)
        } else {
            (from_cx, from.y, to_cx, to.y + to.height)
        }
    }
}

impl Default for ClassLayoutAlgorithm {
    fn default() -> Self {
        Self::new()
    }
}
