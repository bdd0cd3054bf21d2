use crate::constraints::Constraint;
use crate::model::Model;

/// Under injective and locally injective morphisms the neighbours of a
/// pattern vertex map onto distinct neighbours of its image, so no degree
/// may shrink.
pub(crate) struct DegreeConstraint<'a> {
    model: &'a Model<'a>,
}

impl<'a> DegreeConstraint<'a> {
    pub(crate) fn new(model: &'a Model<'a>) -> Self {
        DegreeConstraint { model }
    }
}

impl Constraint for DegreeConstraint<'_> {
    fn d_candidate_is_valid(&self, p: usize, t: usize) -> bool {
        let (pat, tar) = (&self.model.pattern, &self.model.target);
        pat.out_degrees[p] <= tar.out_degrees[t]
            && pat.in_degrees[p] <= tar.in_degrees[t]
            && pat.degrees[p] <= tar.degrees[t]
    }
}

/// Neighbourhood degree sequence dominance.
pub(crate) struct NdsConstraint<'a> {
    model: &'a Model<'a>,
}

impl<'a> NdsConstraint<'a> {
    pub(crate) fn new(model: &'a Model<'a>) -> Self {
        NdsConstraint { model }
    }
}

impl Constraint for NdsConstraint<'_> {
    fn d_candidate_is_valid(&self, p: usize, t: usize) -> bool {
        let p_seq = &self.model.pattern.nds[p];
        let t_seq = &self.model.target.nds[t];
        p_seq.len() <= t_seq.len() && p_seq.iter().zip(t_seq).all(|(a, b)| a <= b)
    }
}
