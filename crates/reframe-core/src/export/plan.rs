//! Turning the final edit state into an ordered list of primitive calls.
//!
//! Building a plan is pure. It validates the request, clamps the view the
//! same way a gesture end would, computes the crop rectangle in effective
//! pixel space, and fixes the step order:
//!
//! 1. Rotate by `rotate90 + straighten` (skipped at zero)
//! 2. Flip (only when `flipX`)
//! 3. Crop
//! 4. Resize (only when the crop's longest edge exceeds `maxEdge`)
//! 5. Encode
//!
//! Crop must follow rotate and flip: its rectangle only exists in that space.

use serde::{Deserialize, Serialize};

use crate::edit::{EditSession, OutputFormat, Snapshot};
use crate::error::{StepKind, ValidationError};
use crate::geometry::{
    clamp_pan, crop_rect_pixels, effective_dimensions, min_scale, CropParams, CropRect,
    Dimensions, FrameSize, ResizeTarget, ViewTransform,
};
use crate::transform::target_dimensions;

/// Everything a commit needs, captured when the user taps export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub source_uri: String,
    pub source_size: Dimensions,
    pub snapshot: Snapshot,
    /// Crop frame size at commit time.
    pub frame: FrameSize,
    /// Final live view from the crop surface.
    pub view: ViewTransform,
}

impl ExportRequest {
    /// Capture `session` with its stored view.
    pub fn from_session(session: &EditSession, frame: FrameSize) -> Self {
        Self {
            source_uri: session.source_uri().to_string(),
            source_size: session.source_size(),
            snapshot: *session.snapshot(),
            frame,
            view: session.view(),
        }
    }

    /// Replace the view with the crop surface's final transform.
    pub fn with_view(mut self, view: ViewTransform) -> Self {
        self.view = view;
        self
    }
}

/// One pixel-transform call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum ExportStep {
    /// Clockwise, quarter turn and straighten combined.
    Rotate { degrees: f64 },
    FlipHorizontal,
    Crop { rect: CropRect },
    Resize { target: ResizeTarget },
}

impl ExportStep {
    pub fn kind(&self) -> StepKind {
        match self {
            ExportStep::Rotate { .. } => StepKind::Rotate,
            ExportStep::FlipHorizontal => StepKind::Flip,
            ExportStep::Crop { .. } => StepKind::Crop,
            ExportStep::Resize { .. } => StepKind::Resize,
        }
    }
}

/// Settings for the closing encode call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncodeSettings {
    pub quality: f64,
    pub format: OutputFormat,
}

/// A validated, ordered export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlan {
    source_uri: String,
    source_size: Dimensions,
    effective: Dimensions,
    view: ViewTransform,
    crop: CropRect,
    output_size: Dimensions,
    steps: Vec<ExportStep>,
    encode: EncodeSettings,
}

impl ExportPlan {
    /// Validate `request` and derive the steps.
    ///
    /// # Errors
    ///
    /// `ValidationError` for zero-sized sources or frames and non-finite
    /// view or straighten values. Nothing else can fail here.
    pub fn build(request: &ExportRequest) -> Result<Self, ValidationError> {
        let source = Dimensions::new(request.source_size.width, request.source_size.height)?;
        let frame = FrameSize::new(request.frame.width, request.frame.height)?;
        let view = request.view.validated()?;
        let snapshot = &request.snapshot;
        if !snapshot.straighten.is_finite() {
            return Err(ValidationError::NonFinite {
                what: "straighten",
                value: snapshot.straighten,
            });
        }

        let effective: Dimensions = effective_dimensions(
            source.width,
            source.height,
            snapshot.rotate90,
            snapshot.straighten,
        )
        .into();

        let scale = view.scale.max(min_scale(effective, frame));
        let (tx, ty) = clamp_pan(view.tx, view.ty, effective, frame, scale);
        let view = ViewTransform { scale, tx, ty };

        let crop = crop_rect_pixels(&CropParams {
            effective,
            frame,
            view,
        });

        let mut steps = Vec::with_capacity(4);
        let degrees = snapshot.total_rotation();
        if degrees != 0.0 {
            steps.push(ExportStep::Rotate { degrees });
        }
        if snapshot.flip_x {
            steps.push(ExportStep::FlipHorizontal);
        }
        steps.push(ExportStep::Crop { rect: crop });

        let mut output_size = crop.dimensions();
        if let Some(target) = resize_target(output_size, snapshot.output.max_edge) {
            output_size = target_dimensions(output_size.width, output_size.height, target).into();
            steps.push(ExportStep::Resize { target });
        }

        Ok(Self {
            source_uri: request.source_uri.clone(),
            source_size: source,
            effective,
            view,
            crop,
            output_size,
            steps,
            encode: EncodeSettings {
                quality: snapshot.output.quality,
                format: snapshot.output.format,
            },
        })
    }

    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    pub fn source_size(&self) -> Dimensions {
        self.source_size
    }

    /// Dimensions after rotate and straighten; the crop's coordinate space.
    pub fn effective(&self) -> Dimensions {
        self.effective
    }

    /// The view after clamping to cover fit and pan bounds.
    pub fn view(&self) -> ViewTransform {
        self.view
    }

    pub fn crop(&self) -> CropRect {
        self.crop
    }

    /// Expected size of the encoded image.
    pub fn output_size(&self) -> Dimensions {
        self.output_size
    }

    /// Transform steps in execution order. Encoding always follows.
    pub fn steps(&self) -> &[ExportStep] {
        &self.steps
    }

    pub fn encode(&self) -> EncodeSettings {
        self.encode
    }

    /// Every primitive the plan calls, including load and encode.
    pub fn step_kinds(&self) -> Vec<StepKind> {
        std::iter::once(StepKind::Load)
            .chain(self.steps.iter().map(ExportStep::kind))
            .chain(std::iter::once(StepKind::Encode))
            .collect()
    }
}

/// Landscape and square crops are pinned by width, portrait ones by height.
fn resize_target(crop: Dimensions, max_edge: Option<u32>) -> Option<ResizeTarget> {
    let max_edge = max_edge.filter(|edge| *edge > 0)?;
    if crop.longest_edge() <= max_edge {
        return None;
    }
    Some(if crop.is_landscape_or_square() {
        ResizeTarget::Width(max_edge)
    } else {
        ResizeTarget::Height(max_edge)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::{EditAction, OutputOptions, OutputPatch};
    use crate::geometry::QuarterTurn;

    fn request(snapshot: Snapshot) -> ExportRequest {
        ExportRequest {
            source_uri: "memory://source".to_string(),
            source_size: Dimensions {
                width: 1000,
                height: 1000,
            },
            snapshot,
            frame: FrameSize {
                width: 400.0,
                height: 500.0,
            },
            view: ViewTransform::new(0.5, 0.0, 0.0),
        }
    }

    #[test]
    fn test_cover_fit_plan() {
        let plan = ExportPlan::build(&request(Snapshot::default())).unwrap();

        assert_eq!(
            plan.crop(),
            CropRect {
                origin_x: 100,
                origin_y: 0,
                width: 800,
                height: 1000
            }
        );
        // No rotation, no flip, no max edge
        assert_eq!(plan.steps(), &[ExportStep::Crop { rect: plan.crop() }]);
        assert_eq!(
            plan.step_kinds(),
            vec![StepKind::Load, StepKind::Crop, StepKind::Encode]
        );
        assert_eq!(plan.output_size(), Dimensions { width: 800, height: 1000 });
    }

    #[test]
    fn test_full_step_order() {
        let snapshot = Snapshot {
            rotate90: QuarterTurn::Deg90,
            straighten: 5.0,
            flip_x: true,
            output: OutputOptions {
                max_edge: Some(300),
                ..Default::default()
            },
            ..Default::default()
        };
        let plan = ExportPlan::build(&request(snapshot)).unwrap();

        assert_eq!(
            plan.step_kinds(),
            vec![
                StepKind::Load,
                StepKind::Rotate,
                StepKind::Flip,
                StepKind::Crop,
                StepKind::Resize,
                StepKind::Encode
            ]
        );
        assert_eq!(plan.steps()[0], ExportStep::Rotate { degrees: 95.0 });
    }

    #[test]
    fn test_crop_uses_effective_dimensions() {
        let mut req = request(Snapshot {
            rotate90: QuarterTurn::Deg90,
            ..Default::default()
        });
        req.source_size = Dimensions {
            width: 1000,
            height: 800,
        };
        req.view = ViewTransform::IDENTITY;
        let plan = ExportPlan::build(&req).unwrap();

        assert_eq!(plan.effective(), Dimensions { width: 800, height: 1000 });
        assert!(plan.crop().fits_within(plan.effective()));
    }

    #[test]
    fn test_view_below_cover_fit_is_clamped() {
        let mut req = request(Snapshot::default());
        req.view = ViewTransform::new(0.2, 300.0, -300.0);
        let plan = ExportPlan::build(&req).unwrap();

        assert_eq!(plan.view(), ViewTransform::new(0.5, 50.0, 0.0));
        // Panned fully right shows the left edge of the image
        assert_eq!(plan.crop().origin_x, 0);
    }

    #[test]
    fn test_resize_by_width_for_landscape() {
        let mut req = request(Snapshot {
            output: OutputOptions {
                max_edge: Some(100),
                ..Default::default()
            },
            ..Default::default()
        });
        req.frame = FrameSize {
            width: 500.0,
            height: 250.0,
        };
        let plan = ExportPlan::build(&req).unwrap();

        // 1000x500 crop, landscape
        assert_eq!(plan.crop().dimensions(), Dimensions { width: 1000, height: 500 });
        assert_eq!(
            plan.steps().last(),
            Some(&ExportStep::Resize {
                target: ResizeTarget::Width(100)
            })
        );
        assert_eq!(plan.output_size(), Dimensions { width: 100, height: 50 });
    }

    #[test]
    fn test_resize_by_height_for_portrait() {
        let req = request(Snapshot {
            output: OutputOptions {
                max_edge: Some(500),
                ..Default::default()
            },
            ..Default::default()
        });
        let plan = ExportPlan::build(&req).unwrap();

        assert_eq!(
            plan.steps().last(),
            Some(&ExportStep::Resize {
                target: ResizeTarget::Height(500)
            })
        );
        assert_eq!(plan.output_size(), Dimensions { width: 400, height: 500 });
    }

    #[test]
    fn test_no_resize_when_within_max_edge() {
        let req = request(Snapshot {
            output: OutputOptions {
                max_edge: Some(1000),
                ..Default::default()
            },
            ..Default::default()
        });
        let plan = ExportPlan::build(&req).unwrap();
        assert!(plan.steps().iter().all(|s| s.kind() != StepKind::Resize));
    }

    #[test]
    fn test_invalid_requests_rejected() {
        let mut req = request(Snapshot::default());
        req.source_size = Dimensions {
            width: 0,
            height: 10,
        };
        assert!(matches!(
            ExportPlan::build(&req),
            Err(ValidationError::NonPositiveDimension { .. })
        ));

        let mut req = request(Snapshot::default());
        req.frame.height = f64::NAN;
        assert!(matches!(
            ExportPlan::build(&req),
            Err(ValidationError::NonFinite { .. })
        ));

        let mut req = request(Snapshot::default());
        req.view.tx = f64::INFINITY;
        assert!(ExportPlan::build(&req).is_err());

        let mut req = request(Snapshot::default());
        req.snapshot.straighten = f64::NAN;
        assert!(ExportPlan::build(&req).is_err());
    }

    #[test]
    fn test_request_from_session() {
        let mut session = EditSession::new(
            "file:///photo.jpg",
            Dimensions {
                width: 4000,
                height: 3000,
            },
        )
        .unwrap();
        session.dispatch(EditAction::FlipX);
        session.dispatch(EditAction::SetOutput {
            patch: OutputPatch {
                format: Some(OutputFormat::Png),
                ..Default::default()
            },
        });

        let frame = FrameSize {
            width: 300.0,
            height: 300.0,
        };
        let req = ExportRequest::from_session(&session, frame).with_view(ViewTransform::new(
            0.1, 0.0, 0.0,
        ));
        assert_eq!(req.source_uri, "file:///photo.jpg");
        assert!(req.snapshot.flip_x);

        let plan = ExportPlan::build(&req).unwrap();
        assert_eq!(plan.encode().format, OutputFormat::Png);
        // Cover fit on a 4000x3000 source in a square frame: 3000x3000 centred
        assert_eq!(
            plan.crop(),
            CropRect {
                origin_x: 500,
                origin_y: 0,
                width: 3000,
                height: 3000
            }
        );
    }

    #[test]
    fn test_plan_wire_format() {
        let plan = ExportPlan::build(&request(Snapshot {
            flip_x: true,
            ..Default::default()
        }))
        .unwrap();
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["steps"][0]["op"], "flipHorizontal");
        assert_eq!(json["steps"][1]["op"], "crop");
        assert_eq!(json["steps"][1]["rect"]["originX"], 100);
        assert_eq!(json["encode"]["format"], "jpeg");
        assert_eq!(json["outputSize"]["width"], 800);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::QuarterTurn;
    use proptest::prelude::*;

    fn quarter_strategy() -> impl Strategy<Value = QuarterTurn> {
        prop_oneof![
            Just(QuarterTurn::Deg0),
            Just(QuarterTurn::Deg90),
            Just(QuarterTurn::Deg180),
            Just(QuarterTurn::Deg270),
        ]
    }

    proptest! {
        /// Property: whatever the view, the planned crop lies inside the
        /// effective image and the resize never exceeds maxEdge.
        #[test]
        fn prop_plan_crop_contained(
            w in 1u32..=8_000,
            h in 1u32..=8_000,
            rotate90 in quarter_strategy(),
            straighten in -45.0f64..=45.0,
            frame_w in 50.0f64..=1_200.0,
            frame_h in 50.0f64..=1_200.0,
            scale in 0.001f64..=20.0,
            tx in -5_000.0f64..=5_000.0,
            ty in -5_000.0f64..=5_000.0,
            max_edge in prop::option::of(1u32..=4_000),
            flip_x in any::<bool>(),
        ) {
            let snapshot = Snapshot {
                rotate90,
                straighten,
                flip_x,
                output: crate::edit::OutputOptions { max_edge, ..Default::default() },
                ..Default::default()
            };
            let req = ExportRequest {
                source_uri: "memory://p".to_string(),
                source_size: Dimensions { width: w, height: h },
                snapshot,
                frame: FrameSize { width: frame_w, height: frame_h },
                view: ViewTransform::new(scale, tx, ty),
            };
            let plan = ExportPlan::build(&req).unwrap();

            prop_assert!(plan.crop().fits_within(plan.effective()));
            prop_assert!(plan.crop().width >= 1 && plan.crop().height >= 1);
            if let Some(edge) = max_edge {
                prop_assert!(plan.output_size().longest_edge() <= edge.max(1));
            }

            // Crop always comes after rotate and flip
            let kinds = plan.step_kinds();
            let crop_at = kinds.iter().position(|k| *k == StepKind::Crop).unwrap();
            for (i, kind) in kinds.iter().enumerate() {
                match kind {
                    StepKind::Rotate | StepKind::Flip => prop_assert!(i < crop_at),
                    StepKind::Resize | StepKind::Encode => prop_assert!(i > crop_at),
                    _ => {}
                }
            }
        }
    }
}
