use crate::constraints::Constraint;
use crate::model::{LinkMap, Model};

/// Equality mode: the interface is fixed. `ROOT<k>` maps onto `ROOT<k>` and
/// every open LINK port onto a port with the same number. Targets whose
/// name carries no port number are not constrained.
pub(crate) struct InterfaceConstraint<'a> {
    links: &'a LinkMap,
}

impl<'a> InterfaceConstraint<'a> {
    pub(crate) fn new(links: &'a LinkMap) -> Self {
        InterfaceConstraint { links }
    }

    pub(crate) fn from_model(model: &'a Model<'a>) -> Option<Self> {
        model.links.as_ref().map(Self::new)
    }
}

impl Constraint for InterfaceConstraint<'_> {
    fn d_candidate_is_valid(&self, p: usize, t: usize) -> bool {
        let root_ok = match self.links.pattern_roots[p] {
            Some(root) => self.links.target_roots[t] == Some(root),
            None => true,
        };
        let port_ok = match self.links.pattern_ports[p] {
            Some(port) => self.links.target_ports[t].is_none_or(|q| q == port),
            None => true,
        };
        root_ok && port_ok
    }
}
