//! Enum support for typed columns.
//!
//! A column whose values are enum members is compared in the host by
//! ordinal but stored by name. [`EnumType`] is the identity the compiler
//! carries on such a column so it can turn the ordinal on the other side
//! of a comparison into the stored name.

/// Identity of an enum type: its name and its `(ordinal, name)` table.
///
/// Usually produced by `#[derive(SqlEnum)]`, but it is a plain value and
/// can be written out by hand:
///
/// ```
/// use sqlpred::EnumType;
///
/// static COLOR: EnumType = EnumType::new("Color", &[(0, "Red"), (1, "Blue")]);
///
/// assert_eq!(COLOR.name_of(1), Some("Blue"));
/// assert_eq!(COLOR.ordinal_of("Red"), Some(0));
/// assert_eq!(COLOR.name_of(7), None);
/// ```
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EnumType {
    name: &'static str,
    members: &'static [(i64, &'static str)],
}

impl EnumType {
    /// Creates an enum identity.
    pub const fn new(name: &'static str, members: &'static [(i64, &'static str)]) -> Self {
        EnumType { name, members }
    }

    /// The enum's type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// All `(ordinal, name)` pairs in declaration order.
    pub fn members(&self) -> &'static [(i64, &'static str)] {
        self.members
    }

    /// The member name for an ordinal.
    pub fn name_of(&self, ordinal: i64) -> Option<&'static str> {
        self.members
            .iter()
            .find(|(o, _)| *o == ordinal)
            .map(|(_, name)| *name)
    }

    /// The ordinal for a member name.
    pub fn ordinal_of(&self, name: &str) -> Option<i64> {
        self.members
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(o, _)| *o)
    }
}

/// Enums that can be stored in a typed column.
///
/// Derive it with `#[derive(SqlEnum)]`, or implement it by hand:
///
/// ```
/// use sqlpred::{EnumType, SqlEnum};
///
/// #[derive(Clone, Copy)]
/// enum Status {
///     Pending = 1,
///     Done = 2,
/// }
///
/// impl SqlEnum for Status {
///     fn enum_type() -> &'static EnumType {
///         static STATUS: EnumType = EnumType::new("Status", &[(1, "Pending"), (2, "Done")]);
///         &STATUS
///     }
///
///     fn ordinal(&self) -> i64 {
///         *self as i64
///     }
/// }
///
/// assert_eq!(Status::enum_type().name_of(Status::Done.ordinal()), Some("Done"));
/// ```
pub trait SqlEnum {
    /// The identity shared by every member of this enum.
    fn enum_type() -> &'static EnumType;

    /// The ordinal of this member.
    fn ordinal(&self) -> i64;

    /// The stored name of this member.
    fn sql_name(&self) -> Option<&'static str> {
        Self::enum_type().name_of(self.ordinal())
    }
}
