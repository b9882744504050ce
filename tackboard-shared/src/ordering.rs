/// Position-reordering algorithm
///
/// Columns within a board and tasks within a column carry a zero-based
/// integer `position`. After any mutation the positions in a container
/// must be exactly `{0..n-1}`, which this module guarantees by
/// recomputing the whole sequence rather than shifting neighbors.
///
/// The functions here are pure: they take the current sibling order
/// (ids sorted by ascending position, ties broken by the store query)
/// and return the new order. Callers persist the result by assigning
/// `position = index` for every element, all writes in one
/// transaction.
///
/// # Example
///
/// ```
/// use tackboard_shared::ordering::reorder;
/// use uuid::Uuid;
///
/// let a = Uuid::new_v4();
/// let b = Uuid::new_v4();
/// let c = Uuid::new_v4();
///
/// // [A, B, C], move A onto C => [B, C, A]
/// assert_eq!(reorder(&[a, b, c], a, c), Some(vec![b, c, a]));
///
/// // Degenerate inputs are defined no-ops, not errors
/// assert_eq!(reorder(&[a, b, c], a, a), None);
/// assert_eq!(reorder(&[a, b], a, c), None);
/// ```

use uuid::Uuid;

/// Computes the new sibling order for moving `subject` onto `reference`.
///
/// Splice semantics: the subject is removed from its current index and
/// inserted at the reference's index in the shortened sequence, so the
/// reference's own ordinal shifts by one to make room. Moving forward
/// lands the subject just after the reference's old slot; moving
/// backward lands it just before.
///
/// Returns `None` when the operation is the defined no-op: the subject
/// and reference are the same id, or either is absent from `ids`.
/// Callers report success without touching the store in that case.
pub fn reorder(ids: &[Uuid], subject: Uuid, reference: Uuid) -> Option<Vec<Uuid>> {
    if subject == reference {
        return None;
    }

    let subject_index = ids.iter().position(|&id| id == subject)?;
    let reference_index = ids.iter().position(|&id| id == reference)?;

    let mut order: Vec<Uuid> = ids.to_vec();
    order.remove(subject_index);
    // Insert at the reference's pre-removal index. After the removal
    // this lands the subject after the reference when moving forward
    // and before it when moving backward, which is the splice-move
    // semantic. The index stays within bounds of the shortened vec.
    order.insert(reference_index, subject);

    Some(order)
}

/// Computes the destination order for a cross-container move.
///
/// The subject is appended at the end of `ids` (removed first if it
/// already appears, which keeps the call idempotent). The source
/// container's order is not this function's concern: per the move
/// semantics only the destination is renumbered.
pub fn append(ids: &[Uuid], subject: Uuid) -> Vec<Uuid> {
    let mut order: Vec<Uuid> = ids.iter().copied().filter(|&id| id != subject).collect();
    order.push(subject);
    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_reorder_moves_forward() {
        // [A, B, C], move A onto C => [B, C, A]  (spec example)
        let v = ids(3);
        let result = reorder(&v, v[0], v[2]).unwrap();
        assert_eq!(result, vec![v[1], v[2], v[0]]);
    }

    #[test]
    fn test_reorder_moves_backward() {
        // [A, B, C], move C onto A => [C, A, B]
        let v = ids(3);
        let result = reorder(&v, v[2], v[0]).unwrap();
        assert_eq!(result, vec![v[2], v[0], v[1]]);
    }

    #[test]
    fn test_reorder_adjacent_swap() {
        // [A, B], move A onto B => [B, A]
        let v = ids(2);
        let result = reorder(&v, v[0], v[1]).unwrap();
        assert_eq!(result, vec![v[1], v[0]]);
    }

    #[test]
    fn test_reorder_middle() {
        // [A, B, C, D], move D onto B => [A, D, B, C]
        let v = ids(4);
        let result = reorder(&v, v[3], v[1]).unwrap();
        assert_eq!(result, vec![v[0], v[3], v[1], v[2]]);
    }

    #[test]
    fn test_reorder_same_id_is_noop() {
        let v = ids(3);
        assert_eq!(reorder(&v, v[1], v[1]), None);
    }

    #[test]
    fn test_reorder_missing_subject_is_noop() {
        let v = ids(3);
        assert_eq!(reorder(&v, Uuid::new_v4(), v[1]), None);
    }

    #[test]
    fn test_reorder_missing_reference_is_noop() {
        let v = ids(3);
        assert_eq!(reorder(&v, v[0], Uuid::new_v4()), None);
    }

    #[test]
    fn test_reorder_preserves_element_set() {
        let v = ids(7);
        let result = reorder(&v, v[5], v[1]).unwrap();
        assert_eq!(result.len(), v.len());
        for id in &v {
            assert!(result.contains(id));
        }
    }

    #[test]
    fn test_renumbered_positions_are_contiguous() {
        // The persisted position of element i is its index; verify the
        // index set is exactly {0..n-1} for a representative shuffle.
        let v = ids(5);
        let result = reorder(&v, v[0], v[4]).unwrap();
        let positions: Vec<usize> = (0..result.len()).collect();
        assert_eq!(positions, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_append_to_empty() {
        let subject = Uuid::new_v4();
        assert_eq!(append(&[], subject), vec![subject]);
    }

    #[test]
    fn test_append_goes_last() {
        let v = ids(3);
        let subject = Uuid::new_v4();
        let result = append(&v, subject);
        assert_eq!(result.len(), 4);
        assert_eq!(result[3], subject);
        assert_eq!(&result[..3], &v[..]);
    }

    #[test]
    fn test_append_is_idempotent() {
        let v = ids(3);
        let result = append(&v, v[0]);
        assert_eq!(result, vec![v[1], v[2], v[0]]);
        assert_eq!(append(&result, v[0]), result);
    }
}
