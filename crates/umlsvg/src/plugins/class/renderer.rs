//! Class diagram SVG renderer
//!
//! Draws a laid-out class diagram as a standalone SVG document.

use anyhow::Result;
use svg::node::element::{
    Definitions, Filter, FilterEffectBlend, FilterEffectGaussianBlur, FilterEffectOffset, Group,
    Line, Marker, Path, Rectangle, Style, Text,
};
use svg::Document;
use tracing::{debug, span, Level};

use super::database::{Diagram, RelationshipKind};
use super::layout::{ClassLayoutAlgorithm, ClassLayoutResult, PositionedClass, PositionedRelationship};
use crate::core::{RenderConfig, Renderer};

const SHADOW_FILTER_ID: &str = "shadow";
const OPEN_ARROW_ID: &str = "arrow-open";
const TRIANGLE_ID: &str = "arrow-triangle";
const HOLLOW_DIAMOND_ID: &str = "diamond-hollow";
const FILLED_DIAMOND_ID: &str = "diamond-filled";

const STYLESHEET: &str = "\
.member { font-family: Arial, sans-serif; font-size: 12px; fill: #333; }
.class-name { font-family: Arial, sans-serif; font-size: 14px; font-weight: bold; fill: black; }
.diagram-title { font-family: Arial, sans-serif; font-size: 18px; font-weight: bold; fill: black; }
.box { fill: #fff; stroke: #333; stroke-width: 1; filter: url(#shadow); }
.header { fill: #f0f0f0; stroke: #333; stroke-width: 1; }
.edge { stroke: #333; stroke-width: 1.5; }
.label-bg { fill: white; opacity: 0.9; }
";

/// Marker drawn at the target end of a relationship, if any
pub fn marker_for(kind: RelationshipKind) -> Option<&'static str> {
    match kind {
        RelationshipKind::Inheritance | RelationshipKind::Realization => Some(TRIANGLE_ID),
        RelationshipKind::Aggregation => Some(HOLLOW_DIAMOND_ID),
        RelationshipKind::Composition => Some(FILLED_DIAMOND_ID),
        RelationshipKind::Association => Some(OPEN_ARROW_ID),
        RelationshipKind::Link => None,
    }
}

/// SVG renderer for class diagrams
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    config: RenderConfig,
}

impl SvgRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build the SVG document for an already laid-out diagram
    pub fn document(&self, title: Option<&str>, layout: &ClassLayoutResult) -> Document {
        let mut document = Document::new()
            .set("width", layout.width)
            .set("height", layout.height)
            .add(Self::definitions())
            .add(Style::new(STYLESHEET));

        if let Some(title) = title {
            document = document.add(
                Text::new(title)
                    .set("x", (layout.width / 2.0).trunc())
                    .set("y", 30)
                    .set("class", "diagram-title")
                    .set("text-anchor", "middle"),
            );
        }

        for class in &layout.classes {
            document = document.add(self.class_box(class));
        }
        for relationship in &layout.relationships {
            document = document.add(Self::edge(relationship));
        }

        document
    }

    fn definitions() -> Definitions {
        let shadow = Filter::new()
            .set("id", SHADOW_FILTER_ID)
            .set("x", 0)
            .set("y", 0)
            .set("width", "200%")
            .set("height", "200%")
            .add(
                FilterEffectOffset::new()
                    .set("result", "offOut")
                    .set("in", "SourceAlpha")
                    .set("dx", 3)
                    .set("dy", 3),
            )
            .add(
                FilterEffectGaussianBlur::new()
                    .set("result", "blurOut")
                    .set("in", "offOut")
                    .set("stdDeviation", 2),
            )
            .add(
                FilterEffectBlend::new()
                    .set("in", "SourceGraphic")
                    .set("in2", "blurOut")
                    .set("mode", "normal"),
            );

        Definitions::new()
            .add(shadow)
            .add(Self::marker(OPEN_ARROW_ID, (12, 12), (9, 3), "M0,0 L0,6 L9,3 z", "black"))
            .add(Self::marker(TRIANGLE_ID, (16, 16), (14, 7), "M0,0 L14,7 L0,14 L0,0", "white"))
            .add(Self::marker(HOLLOW_DIAMOND_ID, (18, 12), (16, 5), "M0,5 L8,0 L16,5 L8,10 z", "white"))
            .add(Self::marker(FILLED_DIAMOND_ID, (18, 12), (16, 5), "M0,5 L8,0 L16,5 L8,10 z", "black"))
    }

    fn marker(id: &str, size: (u32, u32), reference: (u32, u32), path: &str, fill: &str) -> Marker {
        Marker::new()
            .set("id", id)
            .set("markerWidth", size.0)
            .set("markerHeight", size.1)
            .set("refX", reference.0)
            .set("refY", reference.1)
            .set("orient", "auto")
            .add(
                Path::new()
                    .set("d", path)
                    .set("fill", fill)
                    .set("stroke", "black"),
            )
    }

    fn class_box(&self, class: &PositionedClass) -> Group {
        let header_height = self.config.header_height as f32;
        let line_height = self.config.line_height as f32;

        let mut name = Text::new(class.name.as_str())
            .set("x", class.x + (class.width / 2.0).trunc())
            .set("y", class.y + 20.0)
            .set("class", "class-name")
            .set("text-anchor", "middle");
        if class.is_abstract {
            name = name.set("font-style", "italic");
        }

        let mut group = Group::new()
            .set("class", "uml-class")
            .add(
                Rectangle::new()
                    .set("x", class.x)
                    .set("y", class.y)
                    .set("width", class.width)
                    .set("height", class.height)
                    .set("class", "box"),
            )
            .add(
                Rectangle::new()
                    .set("x", class.x)
                    .set("y", class.y)
                    .set("width", class.width)
                    .set("height", header_height)
                    .set("class", "header"),
            )
            .add(name)
            .add(Self::separator(class, class.y + header_height));

        let mut cursor = class.y + header_height + line_height;
        for attribute in &class.attributes {
            group = group.add(Self::member(class, cursor, attribute).set("class", "member"));
            cursor += line_height;
        }

        if !class.methods.is_empty() {
            group = group.add(Self::separator(class, cursor - 5.0));
            cursor += 10.0;
        }

        for method in &class.methods {
            group = group.add(
                Self::member(class, cursor, method)
                    .set("class", "member")
                    .set("font-style", "italic"),
            );
            cursor += line_height;
        }

        group
    }

    fn member(class: &PositionedClass, y: f32, content: &str) -> Text {
        Text::new(content).set("x", class.x + 10.0).set("y", y)
    }

    fn separator(class: &PositionedClass, y: f32) -> Line {
        Line::new()
            .set("x1", class.x)
            .set("y1", y)
            .set("x2", class.x + class.width)
            .set("y2", y)
            .set("class", "edge")
    }

    fn edge(relationship: &PositionedRelationship) -> Group {
        let mut line = Line::new()
            .set("x1", relationship.from_x)
            .set("y1", relationship.from_y)
            .set("x2", relationship.to_x)
            .set("y2", relationship.to_y)
            .set("class", "edge");
        if relationship.kind.is_dashed() {
            line = line.set("stroke-dasharray", "5,5");
        }
        if let Some(marker) = marker_for(relationship.kind) {
            line = line.set("marker-end", format!("url(#{})", marker));
        }

        let mut group = Group::new()
            .set("class", format!("relationship {}", relationship.kind))
            .add(line);

        if let Some(label) = &relationship.label {
            let (mid_x, mid_y) = relationship.midpoint();
            let width = relationship.label_width();
            group = group
                .add(
                    Rectangle::new()
                        .set("x", mid_x - (width / 2.0).trunc())
                        .set("y", mid_y - 10.0)
                        .set("width", width)
                        .set("height", 14)
                        .set("class", "label-bg"),
                )
                .add(
                    Text::new(label.as_str())
                        .set("x", mid_x)
                        .set("y", mid_y)
                        .set("class", "member")
                        .set("fill", "blue")
                        .set("text-anchor", "middle"),
                );
        }

        group
    }
}

impl Renderer<Diagram> for SvgRenderer {
    type Output = String;

    fn render(&self, diagram: &Diagram) -> Result<Self::Output> {
        let render_span = span!(
            Level::INFO,
            "render",
            classes = diagram.class_count(),
            relationships = diagram.relationship_count()
        );
        let _enter = render_span.enter();

        let layout = ClassLayoutAlgorithm::with_config(self.config).layout(diagram)?;
        let output = self.document(diagram.title(), &layout).to_string();

        debug!(output_len = output.len(), "SVG rendering completed");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "svg"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "svg"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::database::{Attribute, ClassEntity, Method, Relationship, Visibility};

    fn render(diagram: &Diagram) -> String {
        SvgRenderer::new().render(diagram).unwrap()
    }

    #[test]
    fn test_render_empty() {
        let output = render(&Diagram::default());

        assert!(output.starts_with("<svg"));
        assert!(output.contains("width=\"1400\""));
        assert!(output.contains("height=\"1200\""));
        assert!(output.contains("id=\"shadow\""));
        assert!(output.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_marker_definitions() {
        let output = render(&Diagram::default());
        for id in [OPEN_ARROW_ID, TRIANGLE_ID, HOLLOW_DIAMOND_ID, FILLED_DIAMOND_ID] {
            assert!(output.contains(&format!("id=\"{}\"", id)), "missing marker {}", id);
        }
    }

    #[test]
    fn test_render_class_members() {
        let class = ClassEntity::new("Person")
            .with_attribute(
                Attribute::new("name")
                    .with_visibility(Visibility::Public)
                    .with_type("String"),
            )
            .with_method(Method::new("greet").with_visibility(Visibility::Protected));
        let output = render(&Diagram::new(None, vec![class], Vec::new()));

        assert!(output.contains("Person"));
        assert!(output.contains("+ name : String"));
        assert!(output.contains("# greet() : void"));
    }

    #[test]
    fn test_abstract_class_name_is_italic() {
        let diagram = Diagram::new(None, vec![ClassEntity::new("Shape").with_abstract(true)], Vec::new());
        let output = render(&diagram);
        assert!(output.contains("font-style=\"italic\""));
    }

    #[test]
    fn test_title_is_rendered() {
        let diagram = Diagram::new(Some("Library".to_string()), Vec::new(), Vec::new());
        let output = render(&diagram);

        assert!(output.contains("class=\"diagram-title\""));
        assert!(output.contains("Library"));
    }

    #[test]
    fn test_relationship_styles() {
        let diagram = Diagram::new(
            None,
            vec![ClassEntity::new("A"), ClassEntity::new("B")],
            vec![
                Relationship::new("A", "B", RelationshipKind::Realization),
                Relationship::new("B", "A", RelationshipKind::Composition),
            ],
        );
        let output = render(&diagram);

        assert!(output.contains("stroke-dasharray=\"5,5\""));
        assert!(output.contains("marker-end=\"url(#arrow-triangle)\""));
        assert!(output.contains("marker-end=\"url(#diamond-filled)\""));
    }

    #[test]
    fn test_link_has_no_marker() {
        let diagram = Diagram::new(
            None,
            vec![ClassEntity::new("A"), ClassEntity::new("B")],
            vec![Relationship::new("A", "B", RelationshipKind::Link)],
        );
        let output = render(&diagram);

        assert!(!output.contains("marker-end"));
        assert!(output.contains("stroke-dasharray"));
    }

    #[test]
    fn test_label_has_background() {
        let diagram = Diagram::new(
            None,
            vec![ClassEntity::new("A"), ClassEntity::new("B")],
            vec![Relationship::new("A", "B", RelationshipKind::Association).with_label("owns")],
        );
        let output = render(&diagram);

        assert!(output.contains("class=\"label-bg\""));
        assert!(output.contains("owns"));
    }

    #[test]
    fn test_undeclared_endpoint_not_drawn() {
        let diagram = Diagram::new(
            None,
            vec![ClassEntity::new("A")],
            vec![Relationship::new("A", "Ghost", RelationshipKind::Association)],
        );
        let output = render(&diagram);
        assert!(!output.contains("marker-end"));
    }

    #[test]
    fn test_marker_for_each_kind() {
        assert_eq!(marker_for(RelationshipKind::Inheritance), Some(TRIANGLE_ID));
        assert_eq!(marker_for(RelationshipKind::Realization), Some(TRIANGLE_ID));
        assert_eq!(marker_for(RelationshipKind::Aggregation), Some(HOLLOW_DIAMOND_ID));
        assert_eq!(marker_for(RelationshipKind::Composition), Some(FILLED_DIAMOND_ID));
        assert_eq!(marker_for(RelationshipKind::Association), Some(OPEN_ARROW_ID));
        assert_eq!(marker_for(RelationshipKind::Link), None);
    }

    #[test]
    fn test_custom_canvas() {
        let renderer = SvgRenderer::with_config(RenderConfig::default().with_canvas(800, 600));
        let output = renderer.render(&Diagram::default()).unwrap();
        assert!(output.contains("width=\"800\""));
    }

    #[test]
    fn test_renderer_metadata() {
        let renderer = SvgRenderer::new();
        assert_eq!(Renderer::<Diagram>::name(&renderer), "svg");
        assert_eq!(Renderer::<Diagram>::format(&renderer), "svg");
    }
}
