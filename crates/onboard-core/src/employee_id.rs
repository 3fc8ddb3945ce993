//! Employee ID derivation.

/// Derives `DEP-NNN` from a department and the number of employees already
/// in it.
///
/// The prefix is the first three characters of the department, uppercased
/// and padded with `X`; the sequence is `existing_count + 1`, zero-padded to
/// three digits.
pub fn generate_employee_id(department: &str, existing_count: usize) -> String {
    let mut prefix: String = department.to_uppercase().chars().take(3).collect();
    while prefix.chars().count() < 3 {
        prefix.push('X');
    }
    format!("{prefix}-{:03}", existing_count + 1)
}
