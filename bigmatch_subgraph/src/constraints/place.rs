use std::collections::HashSet;

use crate::constraints::Constraint;
use crate::model::Model;

/// Place-graph constraints of bigraph matching.
///
/// A child of a root must map onto a child of a root, a parent of a site
/// onto a parent of a site, and every explicit root or site edge of the
/// pattern must exist with the same root or site index in the target.
pub(crate) struct PlaceConstraint<'a> {
    model: &'a Model<'a>,
    pattern_roots: Vec<Vec<usize>>,
    pattern_sites: Vec<Vec<usize>>,
    target_root_edges: HashSet<(usize, usize)>,
    target_site_edges: HashSet<(usize, usize)>,
}

impl<'a> PlaceConstraint<'a> {
    pub(crate) fn new(model: &'a Model<'a>) -> Self {
        let mut pattern_roots = vec![Vec::new(); model.pattern_size()];
        for &(r, v) in model.pattern_input.pattern_root_edges() {
            pattern_roots[v].push(r);
        }
        let mut pattern_sites = vec![Vec::new(); model.pattern_size()];
        for &(v, s) in model.pattern_input.pattern_site_edges() {
            pattern_sites[v].push(s);
        }
        PlaceConstraint {
            model,
            pattern_roots,
            pattern_sites,
            target_root_edges: model.target_input.pattern_root_edges().iter().copied().collect(),
            target_site_edges: model.target_input.pattern_site_edges().iter().copied().collect(),
        }
    }
}

impl Constraint for PlaceConstraint<'_> {
    fn d_candidate_is_valid(&self, p: usize, t: usize) -> bool {
        let (p_child_of_root, p_parent_of_site) = self.model.pattern_input.big_constraint(p);
        let (t_child_of_root, t_parent_of_site) = self.model.target_input.big_constraint(t);
        if (p_child_of_root && !t_child_of_root) || (p_parent_of_site && !t_parent_of_site) {
            return false;
        }
        self.pattern_roots[p]
            .iter()
            .all(|&r| self.target_root_edges.contains(&(r, t)))
            && self.pattern_sites[p]
                .iter()
                .all(|&s| self.target_site_edges.contains(&(t, s)))
    }
}
