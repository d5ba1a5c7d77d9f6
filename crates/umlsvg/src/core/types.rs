//! Core configuration types
//!
//! Geometry for the SVG output and options controlling how the pipeline treats
//! semantic diagnostics.

/// Geometry used by the class layout and the SVG renderer
///
/// All values are in SVG user units (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Canvas width
    pub width: u32,
    /// Canvas height
    pub height: u32,
    /// Width of every class box
    pub box_width: u32,
    /// Horizontal radius of the ellipse non-central classes sit on
    pub radius_x: f64,
    /// Vertical radius of the ellipse non-central classes sit on
    pub radius_y: f64,
    /// Height of the class name header
    pub header_height: u32,
    /// Height of one attribute or method line
    pub line_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 1200,
            box_width: 220,
            radius_x: 550.0,
            radius_y: 450.0,
            header_height: 30,
            line_height: 15,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the canvas size, scaling the ellipse radii to keep the default proportions
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        let defaults = Self::default();
        self.radius_x = defaults.radius_x * f64::from(width) / f64::from(defaults.width);
        self.radius_y = defaults.radius_y * f64::from(height) / f64::from(defaults.height);
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_box_width(mut self, box_width: u32) -> Self {
        self.box_width = box_width;
        self
    }

    pub fn with_radii(mut self, radius_x: f64, radius_y: f64) -> Self {
        self.radius_x = radius_x;
        self.radius_y = radius_y;
        self
    }

    pub fn with_line_height(mut self, line_height: u32) -> Self {
        self.line_height = line_height;
        self
    }
}

/// Options for a full pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineOptions {
    /// Refuse to render diagrams that carry semantic diagnostics
    pub strict: bool,
}

impl PipelineOptions {
    pub fn strict() -> Self {
        Self { strict: true }
    }
}
