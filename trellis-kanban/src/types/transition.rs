//! The outcome of a pure model operation

use super::board::Task;
use super::ids::BoardId;
use super::model::Model;

/// What an operation did to the model.
///
/// Operations never mutate their input; a change comes back as a new model.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Nothing to do; the input model stands
    Unchanged,
    Changed(Model),
    /// Tasks left the model and should be archived
    Removed {
        model: Model,
        board: BoardId,
        tasks: Vec<Task>,
    },
}

impl Transition {
    pub fn is_changed(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// The new model, if there is one
    pub fn model(&self) -> Option<&Model> {
        match self {
            Self::Unchanged => None,
            Self::Changed(model) | Self::Removed { model, .. } => Some(model),
        }
    }

    pub fn into_model(self) -> Option<Model> {
        match self {
            Self::Unchanged => None,
            Self::Changed(model) | Self::Removed { model, .. } => Some(model),
        }
    }
}
