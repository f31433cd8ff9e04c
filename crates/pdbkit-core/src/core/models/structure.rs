use super::model::Model;

/// A parsed macromolecular structure: one or more models of the same molecule.
///
/// Crystal structures carry a single model; NMR ensembles carry one per
/// conformer. Callers that do not care about ensembles use [`Structure::model`].
#[derive(Debug, Clone)]
pub struct Structure {
    models: Vec<Model>,
}

impl Structure {
    /// Wraps assembled models. Returns `None` for an empty list.
    pub(crate) fn new(models: Vec<Model>) -> Option<Self> {
        if models.is_empty() {
            None
        } else {
            Some(Self { models })
        }
    }

    /// The first model, which every structure has.
    pub fn model(&self) -> &Model {
        &self.models[0]
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
