use fixedbitset::FixedBitSet;

use crate::state::{Conflict, State};

/// Hall-set pruning over every domain.
///
/// Domains are visited smallest first while accumulating the union of their
/// values. Fewer values than domains is a conflict. When the counts are equal
/// the accumulated values form a Hall set and are removed from every domain
/// visited later.
pub(crate) fn cheap_all_different(state: &mut State, width: usize) -> Result<(), Conflict> {
    let mut order: Vec<usize> = (0..state.len()).collect();
    order.sort_by_key(|&u| (state.domains().count(u), u));

    let mut hall = FixedBitSet::with_capacity(width);
    let mut union = FixedBitSet::with_capacity(width);
    let mut vars = 0;

    for u in order {
        state.difference(u, &hall)?;
        union.union_with(state.domains().get(u));
        vars += 1;

        let values = union.count_ones(..);
        if values < vars {
            return Err(Conflict);
        }
        if values == vars {
            hall.union_with(&union);
            union.clear();
            vars = 0;
        }
    }
    Ok(())
}
