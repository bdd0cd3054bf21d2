use crate::constraints::Constraint;
use crate::model::Model;

/// A self-loop must map onto a self-loop. In induced mode the converse holds
/// as well.
pub(crate) struct LoopConstraint<'a> {
    model: &'a Model<'a>,
    induced: bool,
}

impl<'a> LoopConstraint<'a> {
    pub(crate) fn new(model: &'a Model<'a>, induced: bool) -> Self {
        LoopConstraint { model, induced }
    }
}

impl Constraint for LoopConstraint<'_> {
    fn d_candidate_is_valid(&self, p: usize, t: usize) -> bool {
        let p_loop = self.model.pattern.loops.contains(p);
        let t_loop = self.model.target.loops.contains(t);
        if p_loop {
            t_loop
        } else {
            !(self.induced && t_loop)
        }
    }
}
