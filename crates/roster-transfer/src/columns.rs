/// Canonical CSV column order, shared by export and import.
/// The profile picture reference is deliberately not part of
/// the interchange format.
pub const COLUMNS: [&str; 12] = [
    "name",
    "memberNumber",
    "email",
    "phoneNumber",
    "occupation",
    "country",
    "address",
    "zipCode",
    "birthDate",
    "addedDate",
    "paidDate",
    "endDate",
];

/// Columns carrying numeric content.
pub fn is_numeric_column(column: &str) -> bool {
    matches!(column, "memberNumber" | "endDate")
}
