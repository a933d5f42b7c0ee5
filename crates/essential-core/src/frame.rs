//! # Frame Records
//!
//! A frame is one node of the vocabulary export. Every frame has a name,
//! its own type, and an ordered list of supertypes; classes additionally
//! declare superclasses and template slots, and any frame may carry own
//! slot values.
//!
//! ## Variants
//!
//! | Variant | `frametype` |
//! |---|---|
//! | [`Frame::Base`] | `frame` (also the default when absent) |
//! | [`Frame::Class`] | `class` |
//! | [`Frame::Slot`] | `slot` |
//! | [`Frame::Facet`] | `facet` |
//! | [`Frame::SimpleInstance`] | `simple_instance` |
//!
//! All five variants currently carry the same [`FrameData`] field set.
//! Slot, facet, and simple-instance records are not narrowed.

use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use crate::error::EssentialError;

/// Number of `frametype` literals.
pub const FRAME_TYPE_COUNT: usize = 5;

/// The `frametype` discriminator of a frame record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    /// Untyped frame. Records without a `frametype` resolve here.
    #[default]
    Frame,
    /// A class declaration.
    Class,
    /// A slot (property type) declaration.
    Slot,
    /// A facet attached to a slot on a class template.
    Facet,
    /// A concrete individual.
    SimpleInstance,
}

impl FrameType {
    /// Returns all frame types in declaration order.
    pub fn all() -> &'static [FrameType] {
        &[
            Self::Frame,
            Self::Class,
            Self::Slot,
            Self::Facet,
            Self::SimpleInstance,
        ]
    }

    /// Returns the literal used in the `frametype` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frame => "frame",
            Self::Class => "class",
            Self::Slot => "slot",
            Self::Facet => "facet",
            Self::SimpleInstance => "simple_instance",
        }
    }
}

impl std::fmt::Display for FrameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrameType {
    type Err = EssentialError;

    /// Parse a frame type from its `frametype` literal. Case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "frame" => Ok(Self::Frame),
            "class" => Ok(Self::Class),
            "slot" => Ok(Self::Slot),
            "facet" => Ok(Self::Facet),
            "simple_instance" => Ok(Self::SimpleInstance),
            other => Err(EssentialError::UnknownFrameType(other.to_string())),
        }
    }
}

/// One component of a slot or facet value.
///
/// Values may have several components, e.g. one per language of a
/// multilingual string, or a datatype tag next to a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValueComponent {
    pub value_type: String,
    pub value_content: String,
}

/// A value assigned to a slot on the frame itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OwnSlotValue {
    /// Name of the slot frame.
    pub slot_reference: String,
    pub value: Vec<ValueComponent>,
}

/// A facet value a class template declares for one of its slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateFacetValue {
    /// Name of the slot frame the facet constrains.
    pub slot_reference: String,
    /// Name of the facet frame.
    pub facet_reference: String,
    pub value: Vec<ValueComponent>,
}

/// Fields shared by every frame variant.
///
/// `supertype`, `superclass`, `slot_reference` and `facet_reference` name
/// other frames by `name`. They are not resolved or checked for cycles
/// here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameData {
    pub name: String,
    /// The frame's own type, serialized as `type`.
    #[serde(rename = "type")]
    pub frame_type: String,
    /// Direct supertypes. Required, may be empty.
    pub supertype: Vec<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub own_slot_value: Option<Vec<OwnSlotValue>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub superclass: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub template_slot: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub template_facet_value: Option<Vec<TemplateFacetValue>>,
}

impl FrameData {
    /// Create frame data with the required fields and no optional ones.
    pub fn new(
        name: impl Into<String>,
        frame_type: impl Into<String>,
        supertype: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            frame_type: frame_type.into(),
            supertype,
            ..Self::default()
        }
    }
}

/// A validated frame record, tagged by its resolved `frametype`.
///
/// Serializes to the flat record shape with `frametype` always present.
/// Deserializing accepts a missing `frametype` and resolves it to
/// [`FrameType::Frame`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FrameRecord", into = "FrameRecord")]
pub enum Frame {
    Base(FrameData),
    Class(FrameData),
    Slot(FrameData),
    Facet(FrameData),
    SimpleInstance(FrameData),
}

impl Frame {
    /// Build the variant matching `frametype`.
    pub fn new(frametype: FrameType, data: FrameData) -> Self {
        match frametype {
            FrameType::Frame => Self::Base(data),
            FrameType::Class => Self::Class(data),
            FrameType::Slot => Self::Slot(data),
            FrameType::Facet => Self::Facet(data),
            FrameType::SimpleInstance => Self::SimpleInstance(data),
        }
    }

    /// The resolved `frametype` of this record.
    pub fn frametype(&self) -> FrameType {
        match self {
            Self::Base(_) => FrameType::Frame,
            Self::Class(_) => FrameType::Class,
            Self::Slot(_) => FrameType::Slot,
            Self::Facet(_) => FrameType::Facet,
            Self::SimpleInstance(_) => FrameType::SimpleInstance,
        }
    }

    pub fn data(&self) -> &FrameData {
        match self {
            Self::Base(d)
            | Self::Class(d)
            | Self::Slot(d)
            | Self::Facet(d)
            | Self::SimpleInstance(d) => d,
        }
    }

    pub fn into_data(self) -> FrameData {
        match self {
            Self::Base(d)
            | Self::Class(d)
            | Self::Slot(d)
            | Self::Facet(d)
            | Self::SimpleInstance(d) => d,
        }
    }

    pub fn name(&self) -> &str {
        &self.data().name
    }

    pub fn is_class(&self) -> bool {
        matches!(self, Self::Class(_))
    }

    pub fn is_slot(&self) -> bool {
        matches!(self, Self::Slot(_))
    }

    pub fn is_facet(&self) -> bool {
        matches!(self, Self::Facet(_))
    }

    pub fn is_simple_instance(&self) -> bool {
        matches!(self, Self::SimpleInstance(_))
    }

    /// Narrow to a class payload.
    pub fn as_class(&self) -> Option<&FrameData> {
        match self {
            Self::Class(d) => Some(d),
            _ => None,
        }
    }

    /// Narrow to a slot payload.
    pub fn as_slot(&self) -> Option<&FrameData> {
        match self {
            Self::Slot(d) => Some(d),
            _ => None,
        }
    }

    /// Narrow to a facet payload.
    pub fn as_facet(&self) -> Option<&FrameData> {
        match self {
            Self::Facet(d) => Some(d),
            _ => None,
        }
    }

    /// Narrow to a simple-instance payload.
    pub fn as_simple_instance(&self) -> Option<&FrameData> {
        match self {
            Self::SimpleInstance(d) => Some(d),
            _ => None,
        }
    }

    /// Render this frame back into its untyped record form.
    pub fn to_record(&self) -> Result<serde_json::Value, EssentialError> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Returns true iff the frame's `frametype` is `class`.
pub fn is_class(frame: &Frame) -> bool {
    frame.is_class()
}

/// Returns true iff the frame's `frametype` is `slot`.
pub fn is_slot(frame: &Frame) -> bool {
    frame.is_slot()
}

/// Returns true iff the frame's `frametype` is `facet`.
pub fn is_facet(frame: &Frame) -> bool {
    frame.is_facet()
}

/// Returns true iff the frame's `frametype` is `simple_instance`.
pub fn is_simple_instance(frame: &Frame) -> bool {
    frame.is_simple_instance()
}

/// Optional list fields may be absent but never `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Vec::<T>::deserialize(deserializer).map(Some)
}

/// Flat wire form of a frame. `deny_unknown_fields` cannot be combined
/// with `#[serde(flatten)]`, so the fields of [`FrameData`] are repeated.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct FrameRecord {
    #[serde(default)]
    frametype: FrameType,
    name: String,
    #[serde(rename = "type")]
    frame_type: String,
    supertype: Vec<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    own_slot_value: Option<Vec<OwnSlotValue>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    superclass: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    template_slot: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    template_facet_value: Option<Vec<TemplateFacetValue>>,
}

impl From<FrameRecord> for Frame {
    fn from(r: FrameRecord) -> Self {
        Frame::new(
            r.frametype,
            FrameData {
                name: r.name,
                frame_type: r.frame_type,
                supertype: r.supertype,
                own_slot_value: r.own_slot_value,
                superclass: r.superclass,
                template_slot: r.template_slot,
                template_facet_value: r.template_facet_value,
            },
        )
    }
}

impl From<Frame> for FrameRecord {
    fn from(frame: Frame) -> Self {
        let frametype = frame.frametype();
        let d = frame.into_data();
        FrameRecord {
            frametype,
            name: d.name,
            frame_type: d.frame_type,
            supertype: d.supertype,
            own_slot_value: d.own_slot_value,
            superclass: d.superclass,
            template_slot: d.template_slot,
            template_facet_value: d.template_facet_value,
        }
    }
}
