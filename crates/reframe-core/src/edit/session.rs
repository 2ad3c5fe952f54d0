//! The edit session and its reducer.

use crate::config::EditorConfig;
use crate::error::ValidationError;
use crate::geometry::{effective_dimensions, Dimensions, ViewTransform};

use super::{EditAction, History, Snapshot};

/// One editing session over a single source asset.
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    source_uri: String,
    source_size: Dimensions,
    current: Snapshot,
    history: History<Snapshot>,
    config: EditorConfig,
}

impl EditSession {
    /// Open a session with the default configuration.
    pub fn new(
        source_uri: impl Into<String>,
        source_size: Dimensions,
    ) -> Result<Self, ValidationError> {
        Self::with_config(source_uri, source_size, EditorConfig::default())
    }

    /// Open a session. Fails fast on zero-sized sources and non-finite
    /// configuration values.
    pub fn with_config(
        source_uri: impl Into<String>,
        source_size: Dimensions,
        config: EditorConfig,
    ) -> Result<Self, ValidationError> {
        let source_size = Dimensions::new(source_size.width, source_size.height)?;
        config.validate()?;
        let source_uri = source_uri.into();
        tracing::debug!(
            uri = %source_uri,
            width = source_size.width,
            height = source_size.height,
            "Edit session opened"
        );
        Ok(Self {
            source_uri,
            source_size,
            current: Snapshot::with_output(config.default_output),
            history: History::new(config.history_depth),
            config,
        })
    }

    pub fn source_uri(&self) -> &str {
        &self.source_uri
    }

    pub fn source_size(&self) -> Dimensions {
        self.source_size
    }

    /// Current values of every undo-tracked field.
    pub fn snapshot(&self) -> &Snapshot {
        &self.current
    }

    pub fn view(&self) -> ViewTransform {
        self.current.view
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Source dimensions with the current quarter turn and straighten angle
    /// baked in.
    pub fn effective_size(&self) -> Dimensions {
        effective_dimensions(
            self.source_size.width,
            self.source_size.height,
            self.current.rotate90,
            self.current.straighten,
        )
        .into()
    }

    /// Defaults a `RESET` restores.
    pub fn defaults(&self) -> Snapshot {
        Snapshot::with_output(self.config.default_output)
    }

    /// Apply `action` in place.
    ///
    /// Every tracked mutation records the pre-mutation snapshot and clears
    /// the redo branch. `SET_VIEW` leaves history alone, and `UNDO`/`REDO`
    /// on an empty stack do nothing.
    pub fn dispatch(&mut self, action: EditAction) {
        let current = self.current;
        let next = match action {
            EditAction::SetView { view } => {
                self.current.view = view;
                return;
            }
            EditAction::Undo => {
                if let Some(previous) = self.history.undo(current) {
                    self.current = previous;
                }
                return;
            }
            EditAction::Redo => {
                if let Some(next) = self.history.redo(current) {
                    self.current = next;
                }
                return;
            }
            EditAction::SetAspect { preset } => Snapshot {
                aspect_preset: preset,
                ..current
            },
            EditAction::RotateCw => Snapshot {
                rotate90: current.rotate90.clockwise(),
                view: ViewTransform::IDENTITY,
                ..current
            },
            EditAction::SetStraighten { degrees } => Snapshot {
                straighten: clamp_straighten(degrees, self.config.straighten_limit),
                ..current
            },
            EditAction::FlipX => Snapshot {
                flip_x: !current.flip_x,
                ..current
            },
            EditAction::SetOutput { patch } => Snapshot {
                output: current.output.merged(&patch),
                ..current
            },
            EditAction::Reset => self.defaults(),
        };

        tracing::debug!(action = action.name(), "Edit applied");
        self.history.record(current);
        self.current = next;
    }
}

/// Pure reduction: the session after `action`, leaving `session` untouched.
pub fn apply(session: &EditSession, action: EditAction) -> EditSession {
    let mut next = session.clone();
    next.dispatch(action);
    next
}

/// Clamp a straighten angle into `[-limit, limit]`; NaN becomes 0.
///
/// A non-finite limit falls back to 45 degrees.
fn clamp_straighten(degrees: f64, limit: f64) -> f64 {
    if degrees.is_nan() {
        return 0.0;
    }
    let limit = if limit.is_finite() { limit.abs() } else { 45.0 };
    degrees.max(-limit).min(limit)
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::edit::{OutputFormat, OutputPatch};
    use crate::geometry::AspectPreset;
    use proptest::prelude::*;

    fn tracked_action_strategy() -> impl Strategy<Value = EditAction> {
        prop_oneof![
            prop::sample::select(AspectPreset::ALL.to_vec())
                .prop_map(|preset| EditAction::SetAspect { preset }),
            Just(EditAction::RotateCw),
            (-90.0f64..=90.0).prop_map(|degrees| EditAction::SetStraighten { degrees }),
            Just(EditAction::FlipX),
            (0.0f64..=1.0, prop::option::of(1u32..=4096)).prop_map(|(quality, edge)| {
                EditAction::SetOutput {
                    patch: OutputPatch {
                        max_edge: Some(edge),
                        quality: Some(quality),
                        format: Some(OutputFormat::Webp),
                    },
                }
            }),
            Just(EditAction::Reset),
        ]
    }

    fn any_action_strategy() -> impl Strategy<Value = EditAction> {
        prop_oneof![
            4 => tracked_action_strategy(),
            1 => (0.1f64..=5.0, -500.0f64..=500.0, -500.0f64..=500.0)
                .prop_map(|(s, x, y)| EditAction::SetView { view: ViewTransform::new(s, x, y) }),
            1 => Just(EditAction::Undo),
            1 => Just(EditAction::Redo),
        ]
    }

    fn fresh() -> EditSession {
        EditSession::new("asset://1", Dimensions { width: 1200, height: 900 }).unwrap()
    }

    proptest! {
        /// Property: UNDO then REDO returns to the state right before UNDO.
        #[test]
        fn prop_undo_redo_symmetry(
            actions in prop::collection::vec(tracked_action_strategy(), 1..30),
        ) {
            let mut s = fresh();
            for action in actions {
                s.dispatch(action);
            }
            let before_undo = *s.snapshot();

            s.dispatch(EditAction::Undo);
            s.dispatch(EditAction::Redo);

            prop_assert_eq!(*s.snapshot(), before_undo);
        }

        /// Property: SET_VIEW never changes either stack.
        #[test]
        fn prop_view_isolation(
            actions in prop::collection::vec(any_action_strategy(), 0..30),
            scale in 0.1f64..=5.0,
            tx in -500.0f64..=500.0,
        ) {
            let mut s = fresh();
            for action in actions {
                s.dispatch(action);
            }
            let history_before = s.history().clone();

            s.dispatch(EditAction::SetView { view: ViewTransform::new(scale, tx, 0.0) });

            prop_assert_eq!(s.history(), &history_before);
        }

        /// Property: ROTATE_CW always leaves the identity view.
        #[test]
        fn prop_rotation_resets_view(
            actions in prop::collection::vec(any_action_strategy(), 0..20),
        ) {
            let mut s = fresh();
            for action in actions {
                s.dispatch(action);
            }
            s.dispatch(EditAction::RotateCw);
            prop_assert_eq!(s.view(), ViewTransform::IDENTITY);
        }

        /// Property: straighten stays within the limit whatever is dispatched.
        #[test]
        fn prop_straighten_always_in_range(
            actions in prop::collection::vec(any_action_strategy(), 0..40),
        ) {
            let mut s = fresh();
            for action in actions {
                s.dispatch(action);
                prop_assert!(s.snapshot().straighten.abs() <= 45.0);
            }
        }

        /// Property: both stacks stay within the configured depth.
        #[test]
        fn prop_history_bounded(
            actions in prop::collection::vec(any_action_strategy(), 0..200),
        ) {
            let mut s = fresh();
            for action in actions {
                s.dispatch(action);
            }
            prop_assert!(s.history().undo_depth() <= 50);
            prop_assert!(s.history().redo_depth() <= 50);
        }
    }
}
