//! Public API tests
//!
//! Exercise the crate the way a library user would: through the top-level
//! functions, the prelude and the orchestrator.

use umlsvg::prelude::*;
use umlsvg::{compile, render};

const SHOP: &str = r#"@startuml
title Online Shop
abstract class Product {
  +name : String
  -price : double
  +discount(rate) : double
}
class Book
class Order {
  +total() : double
}
class Customer {
  ~email
}
Book <|-- Product
Order o-- Product : contains
Customer --> Order : places
Order *-- Customer
@enduml
"#;

#[test]
fn test_compile_full_diagram() {
    let compilation = compile(SHOP).unwrap();
    let diagram = &compilation.diagram;

    assert_eq!(diagram.title(), Some("Online Shop"));
    assert_eq!(diagram.class_count(), 4);
    assert_eq!(diagram.relationship_count(), 4);
    assert!(compilation.diagnostics.is_empty());

    let product = diagram.get_class("Product").unwrap();
    assert!(product.is_abstract);
    assert_eq!(product.attributes.len(), 2);
    assert_eq!(product.methods[0].name, "discount");
    assert_eq!(product.methods[0].return_type, "double");

    let customer = diagram.get_class("Customer").unwrap();
    assert_eq!(customer.attributes[0].declared_type, "String");
}

#[test]
fn test_relationship_labels_and_kinds() {
    let diagram = umlsvg::parse(SHOP).unwrap();
    let relationships = diagram.relationships();

    assert_eq!(relationships[0].kind, RelationshipKind::Inheritance);
    assert_eq!(relationships[0].label, "");
    assert_eq!(relationships[1].kind, RelationshipKind::Aggregation);
    assert_eq!(relationships[1].label, "contains");
    assert_eq!(relationships[2].label, "places");
    assert_eq!(relationships[3].kind, RelationshipKind::Composition);
}

#[test]
fn test_render_full_diagram() {
    let svg = render(SHOP).unwrap();

    assert!(svg.starts_with("<svg"));
    for name in ["Product", "Book", "Order", "Customer", "Online Shop"] {
        assert!(svg.contains(name), "missing {}", name);
    }
    assert!(svg.contains("+ name : String"));
    assert!(svg.contains("- price : double"));
    assert!(svg.contains("+ discount() : double"));
    assert!(svg.contains("url(#diamond-hollow)"));
    assert!(svg.contains("url(#diamond-filled)"));
    assert!(svg.contains("url(#arrow-triangle)"));
    assert!(svg.contains("url(#arrow-open)"));
}

#[test]
fn test_stages_individually() {
    let scanned = scan(SHOP);
    assert!(scanned.diagnostics.is_empty());
    assert_eq!(scanned.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));

    let parsed = parse(&scanned.tokens).unwrap();
    assert!(validate(&parsed.diagram).is_ok());

    let layout = ClassLayoutAlgorithm::new().layout(&parsed.diagram).unwrap();
    // Order has three relationship endpoints, more than any other class
    assert_eq!(layout.classes[0].name, "Order");
}

#[test]
fn test_database_view() {
    let diagram = umlsvg::parse(SHOP).unwrap();

    assert_eq!(diagram.node_count(), 4);
    assert_eq!(diagram.edge_count(), 4);
    assert!(diagram.get_node("Book").is_some());
    assert!(diagram.get_node("Missing").is_none());

    let names: Vec<&str> = diagram.nodes().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Product", "Book", "Order", "Customer"]);
}

#[test]
fn test_orchestrator_with_config() {
    let orchestrator = Orchestrator::with_config(RenderConfig::default().with_canvas(1000, 800));
    let compilation = orchestrator.process(SHOP).unwrap();
    let svg = compilation.svg.unwrap();

    assert!(svg.contains("width=\"1000\""));
    assert!(svg.contains("height=\"800\""));
}

#[test]
fn test_strict_orchestrator() {
    let orchestrator = Orchestrator::new().with_options(PipelineOptions::strict());
    assert!(orchestrator.options().strict);

    let err = orchestrator
        .process("@startuml\nclass A\nA --> Nowhere\n@enduml")
        .unwrap_err();
    assert_eq!(err.to_string(), "Diagram rejected: 1 semantic diagnostic(s)");
}

#[test]
fn test_renderer_trait_object_metadata() {
    let renderer = SvgRenderer::new();
    assert_eq!(Renderer::<Diagram>::name(&renderer), "svg");
    assert_eq!(Renderer::<Diagram>::format(&renderer), "svg");
    assert!(!Renderer::<Diagram>::version(&renderer).is_empty());
}

#[test]
fn test_keyword_named_members_render() {
    let source = "@startuml\ntitle Library\nabstract class Item {\n  +title : String\n  +checkOut() : boolean\n}\nclass Book\nclass Member\nBook <|-- Item\nMember --> Book : borrows\n@enduml\n";

    let compilation = compile(source).unwrap();
    let item = compilation.diagram.get_class("Item").unwrap();
    assert_eq!(item.attributes[0].name, "title");
    assert!(compilation.diagnostics.is_empty());

    let svg = render(source).unwrap();
    assert!(svg.contains("+ title : String"));
}
