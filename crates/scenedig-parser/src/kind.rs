//! Record kinds
//!
//! Typed view over a record's class id. Only the kinds the scene graph needs
//! are named; every other class id is carried as [`RecordKind::Other`] so new
//! engine versions never break splitting.

pub const GAME_OBJECT_TAG: i32 = 1;
pub const TRANSFORM_TAG: i32 = 4;
pub const MONO_BEHAVIOUR_TAG: i32 = 114;
pub const RECT_TRANSFORM_TAG: i32 = 224;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    GameObject,
    Transform,
    /// UI transform, same hierarchy fields as `Transform`
    RectTransform,
    /// Script component
    MonoBehaviour,
    Other(i32),
}

impl RecordKind {
    pub fn from_tag(tag: i32) -> Self {
        match tag {
            GAME_OBJECT_TAG => Self::GameObject,
            TRANSFORM_TAG => Self::Transform,
            RECT_TRANSFORM_TAG => Self::RectTransform,
            MONO_BEHAVIOUR_TAG => Self::MonoBehaviour,
            other => Self::Other(other),
        }
    }

    pub fn tag(self) -> i32 {
        match self {
            Self::GameObject => GAME_OBJECT_TAG,
            Self::Transform => TRANSFORM_TAG,
            Self::RectTransform => RECT_TRANSFORM_TAG,
            Self::MonoBehaviour => MONO_BEHAVIOUR_TAG,
            Self::Other(tag) => tag,
        }
    }

    /// Both transform flavours take part in the hierarchy
    pub fn is_transform(self) -> bool {
        matches!(self, Self::Transform | Self::RectTransform)
    }
}
