//! Class diagram model
//!
//! The intermediate representation produced by the parser: classes with their
//! ordered members, relationships referring to classes by name, and an optional
//! title. A [`Diagram`] has no mutating methods; it is read-only once built.

use crate::core::Database;

/// Type recorded for an attribute declared without `: Type`
pub const DEFAULT_ATTRIBUTE_TYPE: &str = "String";

/// Type recorded for a method declared without `: ReturnType`
pub const DEFAULT_RETURN_TYPE: &str = "void";

/// Visibility modifier for class members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
    Package,   // ~
}

impl Visibility {
    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Private => '-',
            Visibility::Protected => '#',
            Visibility::Package => '~',
        }
    }
}

/// A class attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub visibility: Option<Visibility>,
    pub name: String,
    pub declared_type: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            visibility: None,
            name: name.into(),
            declared_type: DEFAULT_ATTRIBUTE_TYPE.to_string(),
        }
    }

    pub fn with_visibility(mut self, v: Visibility) -> Self {
        self.visibility = Some(v);
        self
    }

    pub fn with_type(mut self, t: impl Into<String>) -> Self {
        self.declared_type = t.into();
        self
    }
}

/// A class method; parameter lists are not modeled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub visibility: Option<Visibility>,
    pub name: String,
    pub return_type: String,
}

impl Method {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            visibility: None,
            name: name.into(),
            return_type: DEFAULT_RETURN_TYPE.to_string(),
        }
    }

    pub fn with_visibility(mut self, v: Visibility) -> Self {
        self.visibility = Some(v);
        self
    }

    pub fn with_return_type(mut self, t: impl Into<String>) -> Self {
        self.return_type = t.into();
        self
    }
}

/// A class in the diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassEntity {
    pub name: String,
    pub is_abstract: bool,
    pub attributes: Vec<Attribute>,
    pub methods: Vec<Method>,
}

impl ClassEntity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_abstract: false,
            attributes: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn with_abstract(mut self, is_abstract: bool) -> Self {
        self.is_abstract = is_abstract;
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }
}

/// Relationship type between classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Inheritance, // <|--
    Realization, // <|..
    Association, // -->
    Aggregation, // o--
    Composition, // *--
    Link,        // --
}

impl RelationshipKind {
    /// Canonical source operator
    pub fn operator(self) -> &'static str {
        match self {
            RelationshipKind::Inheritance => "<|--",
            RelationshipKind::Realization => "<|..",
            RelationshipKind::Association => "-->",
            RelationshipKind::Aggregation => "o--",
            RelationshipKind::Composition => "*--",
            RelationshipKind::Link => "--",
        }
    }

    /// Whether the relationship is drawn with a dashed line
    pub fn is_dashed(self) -> bool {
        matches!(self, RelationshipKind::Realization | RelationshipKind::Link)
    }
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipKind::Inheritance => write!(f, "inheritance"),
            RelationshipKind::Realization => write!(f, "realization"),
            RelationshipKind::Association => write!(f, "association"),
            RelationshipKind::Aggregation => write!(f, "aggregation"),
            RelationshipKind::Composition => write!(f, "composition"),
            RelationshipKind::Link => write!(f, "link"),
        }
    }
}

/// A relationship between classes
///
/// Endpoints are class names, resolved against the diagram's classes only when
/// validating or rendering. They may name classes declared later, or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    pub kind: RelationshipKind,
    pub label: String,
}

impl Relationship {
    pub fn new(source: impl Into<String>, target: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.source, self.kind.operator(), self.target)
    }
}

/// A parsed class diagram
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagram {
    title: Option<String>,
    classes: Vec<ClassEntity>,
    relationships: Vec<Relationship>,
}

impl Diagram {
    pub fn new(
        title: Option<String>,
        classes: Vec<ClassEntity>,
        relationships: Vec<Relationship>,
    ) -> Self {
        Self {
            title,
            classes,
            relationships,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Classes in declaration order, duplicates included
    pub fn classes(&self) -> &[ClassEntity] {
        &self.classes
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    /// First class declared under `name`
    pub fn get_class(&self, name: &str) -> Option<&ClassEntity> {
        self.classes.iter().find(|c| c.name == name)
    }
}

impl Database for Diagram {
    type Node = ClassEntity;
    type Edge = Relationship;

    fn get_node(&self, id: &str) -> Option<&Self::Node> {
        self.get_class(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Self::Edge> {
        self.relationships.iter()
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn edge_count(&self) -> usize {
        self.relationships.len()
    }
}
