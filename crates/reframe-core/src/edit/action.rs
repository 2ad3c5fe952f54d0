//! Actions dispatched into the edit state machine.

use serde::{Deserialize, Serialize};

use crate::geometry::{AspectPreset, ViewTransform};

use super::OutputPatch;

/// Everything the toolbar and crop surface can ask the session to do.
///
/// Serialized as `{"type": "SET_STRAIGHTEN", "degrees": 3.5}` and so on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EditAction {
    /// Replace the view transform. Never recorded in history.
    SetView { view: ViewTransform },
    SetAspect { preset: AspectPreset },
    /// Quarter turn clockwise; also resets the view to identity.
    RotateCw,
    /// Clamped to the configured straighten limit.
    SetStraighten { degrees: f64 },
    FlipX,
    SetOutput { patch: OutputPatch },
    Undo,
    Redo,
    /// Restore every tracked field to the session defaults.
    Reset,
}

impl EditAction {
    /// Whether applying this action records an undo entry.
    pub fn is_recorded(&self) -> bool {
        !matches!(
            self,
            EditAction::SetView { .. } | EditAction::Undo | EditAction::Redo
        )
    }

    /// Short label for logs.
    pub fn name(&self) -> &'static str {
        match self {
            EditAction::SetView { .. } => "SET_VIEW",
            EditAction::SetAspect { .. } => "SET_ASPECT",
            EditAction::RotateCw => "ROTATE_CW",
            EditAction::SetStraighten { .. } => "SET_STRAIGHTEN",
            EditAction::FlipX => "FLIP_X",
            EditAction::SetOutput { .. } => "SET_OUTPUT",
            EditAction::Undo => "UNDO",
            EditAction::Redo => "REDO",
            EditAction::Reset => "RESET",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::OutputFormat;

    #[test]
    fn test_action_wire_format() {
        let json = serde_json::to_string(&EditAction::RotateCw).unwrap();
        assert_eq!(json, r#"{"type":"ROTATE_CW"}"#);

        let action: EditAction =
            serde_json::from_str(r#"{"type":"SET_STRAIGHTEN","degrees":-3.5}"#).unwrap();
        assert_eq!(action, EditAction::SetStraighten { degrees: -3.5 });

        let action: EditAction =
            serde_json::from_str(r#"{"type":"SET_ASPECT","preset":"16:9"}"#).unwrap();
        assert_eq!(
            action,
            EditAction::SetAspect {
                preset: AspectPreset::Wide16x9
            }
        );

        let action: EditAction =
            serde_json::from_str(r#"{"type":"SET_OUTPUT","patch":{"format":"png"}}"#).unwrap();
        assert_eq!(
            action,
            EditAction::SetOutput {
                patch: OutputPatch {
                    format: Some(OutputFormat::Png),
                    ..Default::default()
                }
            }
        );

        let action: EditAction =
            serde_json::from_str(r#"{"type":"SET_VIEW","view":{"scale":2.0,"tx":1.0,"ty":-1.0}}"#)
                .unwrap();
        assert_eq!(
            action,
            EditAction::SetView {
                view: ViewTransform::new(2.0, 1.0, -1.0)
            }
        );
    }

    #[test]
    fn test_recorded_actions() {
        assert!(!EditAction::SetView {
            view: ViewTransform::IDENTITY
        }
        .is_recorded());
        assert!(!EditAction::Undo.is_recorded());
        assert!(!EditAction::Redo.is_recorded());
        assert!(EditAction::RotateCw.is_recorded());
        assert!(EditAction::FlipX.is_recorded());
        assert!(EditAction::Reset.is_recorded());
        assert_eq!(EditAction::FlipX.name(), "FLIP_X");
    }
}
