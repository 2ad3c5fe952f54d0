//! Runs an [`ExportPlan`] against a [`TransformEngine`].

use tokio::sync::Mutex;

use crate::error::{ExportError, StepKind};

use super::{ExportPlan, ExportRequest, ExportResult, ExportStep, TransformEngine};

/// One session's export runner. At most one export is in flight at a time;
/// a second request while one runs is rejected with [`ExportError::Busy`].
#[derive(Debug)]
pub struct ExportPipeline<E> {
    engine: E,
    in_flight: Mutex<()>,
}

impl<E: TransformEngine> ExportPipeline<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            in_flight: Mutex::new(()),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// True while an export is running.
    pub fn is_busy(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Plan and run an export.
    pub async fn export(&self, request: &ExportRequest) -> Result<ExportResult, ExportError> {
        let plan = ExportPlan::build(request)?;
        self.run(&plan).await
    }

    /// Run a prepared plan. Any failing primitive aborts the export and
    /// the intermediate image is dropped.
    pub async fn run(&self, plan: &ExportPlan) -> Result<ExportResult, ExportError> {
        let _guard = self.in_flight.try_lock().map_err(|_| {
            tracing::warn!(uri = plan.source_uri(), "Export rejected: already running");
            ExportError::Busy
        })?;

        tracing::info!(
            uri = plan.source_uri(),
            crop_width = plan.crop().width,
            crop_height = plan.crop().height,
            steps = plan.steps().len(),
            "Export started"
        );

        let result = self.execute(plan).await;
        match &result {
            Ok(output) => tracing::info!(
                uri = %output.uri,
                width = output.width,
                height = output.height,
                "Export finished"
            ),
            Err(err) => tracing::warn!(error = %err, "Export failed"),
        }
        result
    }

    async fn execute(&self, plan: &ExportPlan) -> Result<ExportResult, ExportError> {
        let engine = &self.engine;

        let mut image = engine
            .load(plan.source_uri())
            .await
            .map_err(|e| ExportError::primitive(StepKind::Load, e))?;

        let actual = engine.dimensions(&image);
        if actual != plan.source_size() {
            return Err(ExportError::SourceMismatch {
                expected: plan.source_size(),
                actual,
            });
        }

        for step in plan.steps() {
            tracing::debug!(step = %step.kind(), "Export step");
            let next = match *step {
                ExportStep::Rotate { degrees } => engine.rotate(image, degrees).await,
                ExportStep::FlipHorizontal => engine.flip_horizontal(image).await,
                ExportStep::Crop { rect } => engine.crop(image, rect).await,
                ExportStep::Resize { target } => engine.resize(image, target).await,
            };
            image = next.map_err(|e| ExportError::primitive(step.kind(), e))?;
        }

        let settings = plan.encode();
        tracing::debug!(step = %StepKind::Encode, format = ?settings.format, "Export step");
        engine
            .encode(image, settings.quality, settings.format)
            .await
            .map_err(|e| ExportError::primitive(StepKind::Encode, e))
    }
}
