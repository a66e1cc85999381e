use crate::{Error, Result};

/// Capacity a buffer grows to once it is full: `initial` for an unallocated
/// buffer, double the current capacity otherwise.
pub(crate) fn next_capacity(capacity: usize, initial: usize) -> usize {
    if capacity > 0 {
        capacity.saturating_mul(2)
    } else {
        initial.max(1)
    }
}

/// Reserve room in `buf` for `capacity` elements without aborting on
/// allocation failure.
pub(crate) fn reserve_to<T>(buf: &mut Vec<T>, capacity: usize) -> Result<()> {
    let additional = capacity.saturating_sub(buf.len());
    let bytes = capacity.saturating_mul(std::mem::size_of::<T>());
    buf.try_reserve_exact(additional)
        .map_err(|_| Error::AllocationFailure(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_capacity_starts_at_initial() {
        assert_eq!(next_capacity(0, 1024), 1024);
        assert_eq!(next_capacity(0, 0), 1);
    }

    #[test]
    fn test_next_capacity_doubles() {
        assert_eq!(next_capacity(1024, 1024), 2048);
        assert_eq!(next_capacity(usize::MAX, 1), usize::MAX);
    }

    #[test]
    fn test_reserve_to() {
        let mut buf: Vec<u64> = Vec::new();
        reserve_to(&mut buf, 64).unwrap();
        assert!(buf.capacity() >= 64);

        let err = reserve_to(&mut buf, usize::MAX).unwrap_err();
        assert!(matches!(err, Error::AllocationFailure(_)));
    }
}
