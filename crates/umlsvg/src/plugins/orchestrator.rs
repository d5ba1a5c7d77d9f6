//! Orchestrator for the class diagram pipeline
//!
//! Scanner → Parser → Validator → Layout → Renderer

use tracing::{debug, info, span, warn, Level};

use crate::core::{Diagnostic, DiagramError, PipelineOptions, RenderConfig, Renderer, Stage};
use crate::plugins::class::{parse, scan, validate, Diagram, SvgRenderer};

/// Everything one pipeline run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    pub diagram: Diagram,
    /// Lexical, then syntax, then semantic diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Rendered document, present after [`Orchestrator::process`]
    pub svg: Option<String>,
}

impl Compilation {
    /// Diagnostics raised at `stage`
    pub fn diagnostics_at(&self, stage: Stage) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.stage() == stage)
    }

    pub fn semantic_count(&self) -> usize {
        self.diagnostics_at(Stage::Semantic).count()
    }

    /// Diagnostics as plain human-readable strings
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(ToString::to_string).collect()
    }
}

/// Runs source text through every stage of the class diagram pipeline
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    renderer: SvgRenderer,
    options: PipelineOptions,
}

impl Orchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Orchestrator rendering with the given geometry
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            renderer: SvgRenderer::with_config(config),
            options: PipelineOptions::default(),
        }
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> PipelineOptions {
        self.options
    }

    /// Scan, parse and validate `source`
    ///
    /// Semantic diagnostics do not stop the pipeline unless strict mode is on,
    /// in which case they become [`DiagramError::Rejected`].
    pub fn compile(&self, source: &str) -> Result<Compilation, DiagramError> {
        let compile_span = span!(Level::INFO, "compile", input_len = source.len());
        let _enter = compile_span.enter();

        let scanned = scan(source);
        let parsed = parse(&scanned.tokens)?;
        let validation = validate(&parsed.diagram);

        let mut diagnostics = scanned.diagnostics;
        diagnostics.extend(parsed.diagnostics);
        diagnostics.extend(validation.diagnostics);

        let compilation = Compilation {
            diagram: parsed.diagram,
            diagnostics,
            svg: None,
        };

        let semantic = compilation.semantic_count();
        if semantic > 0 {
            if self.options.strict {
                warn!(count = semantic, "Rejecting diagram in strict mode");
                return Err(DiagramError::rejected(semantic));
            }
            warn!(count = semantic, "Proceeding despite semantic diagnostics");
        }

        debug!(
            classes = compilation.diagram.class_count(),
            relationships = compilation.diagram.relationship_count(),
            diagnostics = compilation.diagnostics.len(),
            "Compilation completed"
        );
        Ok(compilation)
    }

    /// Run the full pipeline, rendering the diagram to SVG
    pub fn process(&self, source: &str) -> Result<Compilation, DiagramError> {
        let process_span = span!(Level::INFO, "process_diagram", input_len = source.len());
        let _enter = process_span.enter();

        info!("Starting diagram processing pipeline");
        let mut compilation = self.compile(source)?;

        let svg = self
            .renderer
            .render(&compilation.diagram)
            .map_err(|err| match err.downcast::<DiagramError>() {
                Ok(diagram_error) => diagram_error,
                Err(other) => DiagramError::render_error(other.to_string()),
            })?;
        compilation.svg = Some(svg);

        info!("Pipeline completed successfully");
        Ok(compilation)
    }
}
