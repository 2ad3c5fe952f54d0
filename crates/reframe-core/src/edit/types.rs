//! Undo-tracked values of an edit session.

use serde::{Deserialize, Serialize};

use crate::geometry::{AspectPreset, QuarterTurn, ViewTransform};

/// Encoded output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputOptions {
    /// Longest edge of the exported image; larger crops are scaled down.
    pub max_edge: Option<u32>,
    /// Encoder quality in `[0, 1]`. Only JPEG is lossy.
    pub quality: f64,
    pub format: OutputFormat,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            max_edge: None,
            quality: 0.9,
            format: OutputFormat::Jpeg,
        }
    }
}

impl OutputOptions {
    /// Shallow-merge `patch` into these options.
    ///
    /// Quality is clamped to `[0, 1]` (non-finite values are ignored) and a
    /// zero `maxEdge` means no limit.
    pub fn merged(self, patch: &OutputPatch) -> Self {
        let mut out = self;
        if let Some(max_edge) = patch.max_edge {
            out.max_edge = max_edge.filter(|edge| *edge > 0);
        }
        if let Some(quality) = patch.quality.filter(|q| q.is_finite()) {
            out.quality = quality.clamp(0.0, 1.0);
        }
        if let Some(format) = patch.format {
            out.format = format;
        }
        out
    }
}

/// Partial update for [`OutputOptions`]; absent fields are left alone.
///
/// `maxEdge: null` clears the limit, an absent `maxEdge` keeps it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputPatch {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "double_option"
    )]
    pub max_edge: Option<Option<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<OutputFormat>,
}

/// Full copy of every undo-tracked field.
///
/// The source reference, source size and the history itself are deliberately
/// absent, so snapshots never nest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub view: ViewTransform,
    pub aspect_preset: AspectPreset,
    pub rotate90: QuarterTurn,
    /// Degrees, always within the configured straighten limit.
    pub straighten: f64,
    pub flip_x: bool,
    pub output: OutputOptions,
}

impl Snapshot {
    /// Session defaults: identity view, original aspect, no rotation or flip.
    pub fn with_output(output: OutputOptions) -> Self {
        Self {
            view: ViewTransform::IDENTITY,
            aspect_preset: AspectPreset::Original,
            rotate90: QuarterTurn::Deg0,
            straighten: 0.0,
            flip_x: false,
            output,
        }
    }

    /// Combined clockwise rotation applied at export.
    pub fn total_rotation(&self) -> f64 {
        self.rotate90.degrees() as f64 + self.straighten
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::with_output(OutputOptions::default())
    }
}

/// Distinguishes an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
