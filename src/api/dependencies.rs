use std::sync::Arc;

use crate::config::BurrCounterConfig;
use crate::workflows::{ApplicationBuilder, CounterApplicationBuilder};

/// Shared, read-only handles every request needs.
///
/// The workflow builder sits behind a trait object so tests can hand the
/// router a fake instead of the real counting machine.
#[derive(Clone)]
pub struct AppDependencies {
    builder: Arc<dyn ApplicationBuilder>,
    title: String,
}

impl AppDependencies {
    pub fn new(builder: Arc<dyn ApplicationBuilder>, title: impl Into<String>) -> Self {
        Self {
            builder,
            title: title.into(),
        }
    }

    /// Production wiring: the real counting workflow
    pub fn from_config(config: &BurrCounterConfig) -> Self {
        Self::new(Arc::new(CounterApplicationBuilder), config.app.title.clone())
    }

    pub fn builder(&self) -> Arc<dyn ApplicationBuilder> {
        Arc::clone(&self.builder)
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl std::fmt::Debug for AppDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppDependencies")
            .field("builder", &"Arc<dyn ApplicationBuilder>")
            .field("title", &self.title)
            .finish()
    }
}
