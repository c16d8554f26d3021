#![forbid(unsafe_code)]

//! One-shot page initialization.

use docpane_dom::Document;

use crate::collapse::CollapseController;
use crate::config::WidgetConfig;
use crate::error::SetupError;
use crate::search::SearchController;

/// Both widgets, attached to one document.
#[derive(Debug, Clone)]
pub struct Page<N> {
    /// Search filter.
    pub search: SearchController<N>,
    /// Collapse groups.
    pub collapse: CollapseController<N>,
}

impl<N: Clone + PartialEq + core::fmt::Debug> Page<N> {
    /// Attach search, then collapse groups.
    ///
    /// Run once when the document is ready. If search setup fails, no collapse
    /// trigger has been synthesized yet.
    ///
    /// # Errors
    ///
    /// Whatever [`SearchController::attach`] or [`CollapseController::attach`]
    /// reports.
    pub fn init<D>(doc: &mut D, config: &WidgetConfig) -> Result<Self, SetupError>
    where
        D: Document<Node = N>,
    {
        let span = tracing::debug_span!("page_init");
        let _guard = span.enter();

        let search = SearchController::attach(doc, &config.search)?;
        let collapse = CollapseController::attach(doc, &config.collapse)?;
        tracing::debug!(
            entries = search.index().len(),
            groups = collapse.triggers().len(),
            "page ready"
        );
        Ok(Self { search, collapse })
    }
}
