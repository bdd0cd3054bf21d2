use crate::constraints::Constraint;
use crate::model::Model;

/// Labelled pattern vertices only map onto target vertices with the same
/// label.
pub(crate) struct LabelConstraint<'a> {
    model: &'a Model<'a>,
}

impl<'a> LabelConstraint<'a> {
    pub(crate) fn new(model: &'a Model<'a>) -> Self {
        LabelConstraint { model }
    }
}

impl Constraint for LabelConstraint<'_> {
    fn d_candidate_is_valid(&self, p: usize, t: usize) -> bool {
        match self.model.pattern_labels[p] {
            None => true,
            label => label == self.model.target_labels[t],
        }
    }
}
