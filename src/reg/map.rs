use super::{RegAccess, RegRaw};
use core::fmt;

/// Composition of fields forming one register.
///
/// Types which implement this trait should be zero-sized. A map carries no
/// address, it can be bound to a fixed address by a [`FixedReg`](super::FixedReg)
/// or to a run-time address by a [`DynReg`](super::DynReg).
pub trait RegMap: Sized + Send + Sync + 'static {
    /// Backing integer of the register.
    type Raw: RegRaw;

    /// Access tag of the register.
    type Access: RegAccess;

    /// Bits of all fields.
    const FIELDS: &'static [FieldSpan];
}

/// Disambiguation for `RegMap::Raw`.
pub type MapRaw<M> = <M as RegMap>::Raw;

/// Bits occupied by one field.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldSpan {
    /// Name of the field.
    pub name: &'static str,
    /// Bits owned by the field. Zero for a span that can't exist.
    pub mask: u64,
}

impl FieldSpan {
    /// Creates a span of `width` adjacent bits starting at `offset`.
    pub const fn new(name: &'static str, offset: u32, width: u32) -> Self {
        let mask = match offset.checked_add(width) {
            Some(end) if width > 0 && end <= u64::BITS => {
                u64::MAX >> (u64::BITS - width) << offset
            }
            _ => 0,
        };
        Self { name, mask }
    }

    /// Creates a span owning exactly the bits of `mask`, which may have gaps.
    pub const fn from_mask(name: &'static str, mask: u64) -> Self {
        Self { name, mask }
    }

    /// Checks whether the span is not empty and fits in a register of `width`
    /// bits.
    pub const fn fits(&self, width: u32) -> bool {
        self.mask != 0 && (width >= u64::BITS || self.mask >> width == 0)
    }

    /// Checks whether two spans share a bit.
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.mask & other.mask != 0
    }
}

impl fmt::Debug for FieldSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpan")
            .field("name", &self.name)
            .field("mask", &format_args!("{:#x}", self.mask))
            .finish()
    }
}

/// Inconsistent register map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// Two fields claim the same bit.
    Overlap {
        /// Field declared first.
        first: &'static str,
        /// Field declared second.
        second: &'static str,
    },
    /// A field is empty or extends past the register width.
    OutOfRange {
        /// Offending field.
        field: &'static str,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlap { first, second } => {
                write!(f, "field `{second}` overlaps field `{first}`")
            }
            Self::OutOfRange { field } => {
                write!(f, "field `{field}` doesn't fit in the register")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FieldError {}

/// Checks that every field fits in `width` bits and no two fields overlap.
pub const fn validate_fields(fields: &[FieldSpan], width: u32) -> Result<(), FieldError> {
    let mut i = 0;
    while i < fields.len() {
        if !fields[i].fits(width) {
            return Err(FieldError::OutOfRange { field: fields[i].name });
        }
        let mut j = 0;
        while j < i {
            if fields[j].overlaps(&fields[i]) {
                return Err(FieldError::Overlap { first: fields[j].name, second: fields[i].name });
            }
            j += 1;
        }
        i += 1;
    }
    Ok(())
}

/// Returns `true` if the fields are consistent for a register of `width` bits.
///
/// Intended for compile-time assertions on hand-written maps:
///
/// ```
/// use drone_mmio::reg::{fields_disjoint, FieldSpan};
///
/// const FIELDS: &[FieldSpan] = &[FieldSpan::new("EN", 0, 1), FieldSpan::new("DIV", 1, 4)];
/// const _: () = assert!(fields_disjoint(FIELDS, 8));
/// ```
pub const fn fields_disjoint(fields: &[FieldSpan], width: u32) -> bool {
    validate_fields(fields, width).is_ok()
}

/// Validates the fields of the map `M`.
pub fn validate_map<M: RegMap>() -> Result<(), FieldError> {
    validate_fields(M::FIELDS, <M::Raw as RegRaw>::WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[FieldSpan] = &[
        FieldSpan::new("FLAGS", 0, 3),
        FieldSpan::new("MODE", 4, 1),
        FieldSpan::new("VALUE", 8, 8),
    ];

    const _: () = assert!(fields_disjoint(FIELDS, 16));

    #[test]
    fn disjoint_fields() {
        assert_eq!(validate_fields(FIELDS, 32), Ok(()));
        assert_eq!(validate_fields(&[], 8), Ok(()));
    }

    #[test]
    fn overlapping_fields() {
        let fields = [FieldSpan::new("A", 0, 4), FieldSpan::new("B", 8, 2), FieldSpan::new("C", 3, 2)];
        assert_eq!(validate_fields(&fields, 32), Err(FieldError::Overlap { first: "A", second: "C" }));
    }

    #[test]
    fn out_of_range_fields() {
        assert_eq!(
            validate_fields(FIELDS, 12),
            Err(FieldError::OutOfRange { field: "VALUE" })
        );
        assert_eq!(
            validate_fields(&[FieldSpan::new("EMPTY", 0, 0)], 8),
            Err(FieldError::OutOfRange { field: "EMPTY" })
        );
        assert!(!fields_disjoint(&[FieldSpan::new("HUGE", u32::MAX, 2)], 64));
    }

    #[test]
    fn span_mask() {
        assert_eq!(FieldSpan::new("A", 4, 2).mask, 0b11_0000);
        assert_eq!(FieldSpan::new("A", 0, 64).mask, u64::MAX);
        assert_eq!(FieldSpan::new("A", 63, 2).mask, 0);
        assert_eq!(FieldSpan::new("A", 1, 3), FieldSpan::from_mask("A", 0b1110));
    }

    #[test]
    fn interleaved_fields() {
        let fields = [
            FieldSpan::from_mask("IRQ", 0b1001),
            FieldSpan::new("MID", 1, 2),
            FieldSpan::from_mask("ERR", 0b1_0000_0100),
        ];
        assert_eq!(validate_fields(&fields[..2], 8), Ok(()));
        assert_eq!(
            validate_fields(&fields, 16),
            Err(FieldError::Overlap { first: "MID", second: "ERR" })
        );
        assert_eq!(validate_fields(&fields[2..], 8), Err(FieldError::OutOfRange { field: "ERR" }));
    }

    #[test]
    fn display() {
        use std::string::ToString;
        assert_eq!(
            FieldError::Overlap { first: "A", second: "B" }.to_string(),
            "field `B` overlaps field `A`"
        );
        assert_eq!(
            FieldError::OutOfRange { field: "A" }.to_string(),
            "field `A` doesn't fit in the register"
        );
    }
}
