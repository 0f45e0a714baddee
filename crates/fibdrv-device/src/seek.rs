//! Seek semantics: the session position is the Fibonacci index.

/// Origin of a seek, mirroring `SEEK_SET`, `SEEK_CUR`, and `SEEK_END`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Whence {
    /// Position becomes `offset`.
    Set,
    /// Position becomes `current + offset`.
    Cur,
    /// Position becomes `max_index - offset`.
    End,
}

impl Whence {
    /// Decode the raw `lseek` origin (0, 1, 2).
    #[must_use]
    pub fn from_raw(origin: i32) -> Option<Self> {
        match origin {
            0 => Some(Self::Set),
            1 => Some(Self::Cur),
            2 => Some(Self::End),
            _ => None,
        }
    }
}

/// Resolve a seek against `current`, clamping the result into `[0, max_index]`.
///
/// # Example
/// ```
/// use fibdrv_device::seek::{resolve, Whence};
///
/// assert_eq!(resolve(0, 42, Whence::Set, 500), 42);
/// assert_eq!(resolve(10, -20, Whence::Cur, 500), 0);
/// assert_eq!(resolve(0, 100, Whence::End, 500), 400);
/// assert_eq!(resolve(0, 9_000, Whence::Set, 500), 500);
/// ```
#[must_use]
pub fn resolve(current: u64, offset: i64, whence: Whence, max_index: u64) -> u64 {
    let offset = i128::from(offset);
    let target = match whence {
        Whence::Set => offset,
        Whence::Cur => i128::from(current) + offset,
        Whence::End => i128::from(max_index) - offset,
    };
    let clamped = target.clamp(0, i128::from(max_index));
    u64::try_from(clamped).unwrap_or(max_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_origins() {
        assert_eq!(Whence::from_raw(0), Some(Whence::Set));
        assert_eq!(Whence::from_raw(1), Some(Whence::Cur));
        assert_eq!(Whence::from_raw(2), Some(Whence::End));
        assert_eq!(Whence::from_raw(3), None);
    }

    #[test]
    fn set_clamps_both_ends() {
        assert_eq!(resolve(7, -1, Whence::Set, 500), 0);
        assert_eq!(resolve(7, 501, Whence::Set, 500), 500);
        assert_eq!(resolve(7, 500, Whence::Set, 500), 500);
    }

    #[test]
    fn cur_is_relative() {
        assert_eq!(resolve(100, 25, Whence::Cur, 500), 125);
        assert_eq!(resolve(100, -25, Whence::Cur, 500), 75);
        assert_eq!(resolve(490, 25, Whence::Cur, 500), 500);
    }

    #[test]
    fn end_subtracts_offset() {
        assert_eq!(resolve(0, 0, Whence::End, 500), 500);
        assert_eq!(resolve(0, 1, Whence::End, 500), 499);
        assert_eq!(resolve(0, -10, Whence::End, 500), 500);
        assert_eq!(resolve(0, 600, Whence::End, 500), 0);
    }

    #[test]
    fn extreme_offsets_do_not_overflow() {
        assert_eq!(resolve(u64::MAX, i64::MAX, Whence::Cur, 500), 500);
        assert_eq!(resolve(0, i64::MIN, Whence::End, 500), 500);
        assert_eq!(resolve(0, i64::MIN, Whence::Set, 500), 0);
    }
}
