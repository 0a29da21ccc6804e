use crate::key::SetId;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid set id {0:?}, expected one of 'A'..='D'")]
    SetId(char),

    #[error("Empty region key")]
    EmptyKey,

    #[error("Repeated set id {id:?} in region key {key:?}")]
    RepeatedSetId { id: char, key: String },

    #[error("Unrecognized {kind} {value:?}, expected one of: {expected}")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    #[error("Expected {min}..={max} circles, found {count}")]
    CircleCount { count: usize, min: usize, max: usize },

    #[error("Duplicate circle id {0}")]
    DuplicateId(SetId),

    #[error("Circle {id} has invalid radius {r}")]
    InvalidRadius { id: SetId, r: f64 },

    #[error("Circle {id} has a non-finite center")]
    InvalidCenter { id: SetId },
}
