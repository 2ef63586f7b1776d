use std::sync::Arc;

use image::{imageops, ImageBuffer, Rgba, Rgba32FImage};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    config::RenderConfig,
    error::{ConfigurationError, PipelineError, RenderError, Result},
    filters::{FilterCatalog, FilterDefinition},
    imaging::{ProcessingContext, RenderedImage, SourceImage},
};

/// Outcome of rendering a single filter
pub type RenderResult = std::result::Result<RenderedImage, RenderError>;

/// Applies filter definitions to a source image
///
/// Every render is independent: the source and the processing context are only read, so
/// a batch may render its filters in parallel and the results never depend on what was
/// rendered before.
#[derive(Clone)]
pub struct Renderer {
    context: ProcessingContext,
    parallel: bool,
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl Renderer {
    /// Create a renderer on the given context, rendering batches on the global rayon pool
    pub fn new(context: ProcessingContext) -> Self {
        Self {
            context,
            parallel: true,
            pool: None,
        }
    }

    /// Create a renderer using the `[render]` configuration section
    pub fn with_config(context: ProcessingContext, config: &RenderConfig) -> Result<Self> {
        let pool = if config.parallel {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .thread_name(|i| format!("snap-render-{}", i))
                .build()
                .map_err(|e| PipelineError::generic(format!("failed to start render threads: {}", e)))?;
            Some(Arc::new(pool))
        } else {
            None
        };

        Ok(Self {
            context,
            parallel: config.parallel,
            pool,
        })
    }

    /// Render every filter of a batch on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self.pool = None;
        self
    }

    pub fn context(&self) -> &ProcessingContext {
        &self.context
    }

    /// Apply one filter to the source
    ///
    /// The output is cropped to the source's exact pixel extent.
    pub fn render(&self, source: &SourceImage, filter: &FilterDefinition) -> RenderResult {
        let kind = filter.kind();
        if !self.context.supports(kind) {
            return Err(RenderError::Unsupported { filter: kind.name().to_string() });
        }

        filter.validate().map_err(|e| RenderError::InvalidParameters {
            filter: kind.name().to_string(),
            details: e.to_string(),
        })?;

        let extent = source.extent();
        if extent.is_empty() {
            return Err(RenderError::NoOutput {
                filter: kind.name().to_string(),
                reason: format!("source has an empty extent ({}x{})", extent.width, extent.height),
            });
        }

        let layout = self.context.canvas_layout(extent).ok_or_else(|| RenderError::NoOutput {
            filter: kind.name().to_string(),
            reason: format!("working canvas for {}x{} does not fit in memory", extent.width, extent.height),
        })?;

        debug!(
            "Rendering {} on {}x{} canvas ({}x{} source)",
            kind, layout.canvas.width, layout.canvas.height, extent.width, extent.height
        );

        let input = source.to_working();
        let operation = filter.operation();
        let space = self.context.working_space();

        // Padding is transparent black, which some operations turn visible
        let mut canvas: Rgba32FImage = ImageBuffer::new(layout.canvas.width, layout.canvas.height);
        imageops::replace(&mut canvas, &*input, i64::from(layout.source.x), i64::from(layout.source.y));

        for pixel in canvas.pixels_mut() {
            let working = space.encode(pixel.0.map(zero_nan));
            let filtered = space.decode(operation.apply_pixel(working));
            *pixel = Rgba(filtered.map(to_display_range));
        }

        let cropped = imageops::crop_imm(
            &canvas,
            layout.source.x,
            layout.source.y,
            layout.source.width,
            layout.source.height,
        )
        .to_image();

        Ok(RenderedImage::new(kind, cropped))
    }

    /// Apply each filter independently, keeping the input order
    ///
    /// A filter that fails only fills its own slot with the error.
    pub fn render_all(&self, source: &SourceImage, filters: &[FilterDefinition]) -> RenderBatch {
        let results: Vec<_> = if self.parallel && filters.len() > 1 {
            let run = || -> Vec<RenderResult> {
                filters
                    .par_iter()
                    .map(|filter| self.render(source, filter))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        } else {
            filters.iter().map(|filter| self.render(source, filter)).collect()
        };

        let batch = RenderBatch { results };
        for error in batch.failures() {
            warn!("Filter {} failed: {}", error.filter(), error);
        }
        info!(
            "Rendered {}/{} filters on {}x{} source",
            batch.success_count(),
            batch.len(),
            source.width(),
            source.height()
        );
        batch
    }

    /// Render every filter of a catalog
    pub fn render_catalog(&self, source: &SourceImage, catalog: &FilterCatalog) -> RenderBatch {
        self.render_all(source, catalog.filters())
    }

    /// Render the built-in catalog
    ///
    /// Fails before rendering anything when this renderer's context lacks a built-in operation.
    pub fn render_defaults(&self, source: &SourceImage) -> std::result::Result<RenderBatch, ConfigurationError> {
        let catalog = FilterCatalog::builtin(&self.context)?;
        Ok(self.render_catalog(source, &catalog))
    }
}

/// NaN source components render as zero
fn zero_nan(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

/// Clamp into [0, 1]; NaN maps to 0
fn to_display_range(value: f32) -> f32 {
    value.max(0.0).min(1.0)
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(ProcessingContext::default())
    }
}

/// Results of a batch render, one slot per requested filter in request order
#[derive(Debug, Clone)]
pub struct RenderBatch {
    results: Vec<RenderResult>,
}

impl RenderBatch {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Get the slot at the given position
    pub fn get(&self, index: usize) -> Option<&RenderResult> {
        self.results.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderResult> {
        self.results.iter()
    }

    /// Successfully rendered images, in order
    pub fn successes(&self) -> impl Iterator<Item = &RenderedImage> {
        self.results.iter().filter_map(|result| result.as_ref().ok())
    }

    /// Errors of the failed slots, in order
    pub fn failures(&self) -> impl Iterator<Item = &RenderError> {
        self.results.iter().filter_map(|result| result.as_ref().err())
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    /// Whether every slot rendered
    pub fn is_complete(&self) -> bool {
        self.results.iter().all(|result| result.is_ok())
    }

    /// Take the slots out of the batch
    pub fn into_results(self) -> Vec<RenderResult> {
        self.results
    }

    /// All images, or the first failure
    pub fn into_images(self) -> std::result::Result<Vec<RenderedImage>, RenderError> {
        self.results.into_iter().collect()
    }
}

impl IntoIterator for RenderBatch {
    type Item = RenderResult;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}
