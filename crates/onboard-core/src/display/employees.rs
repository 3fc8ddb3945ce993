//! Employee table and suggestion list formatting.

use std::fmt;

use crate::{
    listing::MISSING_TEXT,
    models::{Employee, Page, SuggestOption},
};

/// Formats one page of employees as a markdown table with a page footer.
///
/// # Examples
///
/// ```rust
/// use onboard_core::{display::EmployeeTable, models::{Employee, Page}};
///
/// let page: Page<Employee> = Page::paginate(Vec::new(), 1, 10);
/// assert!(EmployeeTable(&page).to_string().contains("No employees found."));
/// ```
pub struct EmployeeTable<'a>(pub &'a Page<Employee>);

impl EmployeeTable<'_> {
    /// 1-based number of the page being shown.
    pub fn current_page(&self) -> u32 {
        let page = self.0;
        match (page.prev, page.next) {
            (Some(prev), _) => prev + 1,
            (None, Some(next)) => next.saturating_sub(1).max(1),
            (None, None) => page.first,
        }
    }
}

impl fmt::Display for EmployeeTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.0;
        writeln!(f, "# Employees")?;
        writeln!(f)?;

        if page.data.is_empty() {
            return writeln!(f, "No employees found.");
        }

        writeln!(
            f,
            "| Employee ID | Name | Department | Job role | Type | Office location | Photo |"
        )?;
        writeln!(f, "|---|---|---|---|---|---|---|")?;
        for employee in &page.data {
            writeln!(
                f,
                "| {} | {} | {} | {} | {} | {} | {} |",
                cell(&employee.employee_id),
                cell(&employee.full_name),
                cell(&employee.department),
                cell(&employee.job_role),
                optional_cell(employee.employment_type.as_deref()),
                optional_cell(employee.office_location.as_deref()),
                if employee.photo.is_some() { "yes" } else { MISSING_TEXT },
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "Page {} of {} ({} employees)",
            self.current_page(),
            page.pages,
            page.items
        )
    }
}

fn cell(value: &str) -> String {
    value.replace('|', "\\|")
}

fn optional_cell(value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => cell(value),
        _ => MISSING_TEXT.to_string(),
    }
}

/// Formats autocomplete options as a list.
pub struct Suggestions<'a>(pub &'a [SuggestOption]);

impl fmt::Display for Suggestions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No suggestions.");
        }
        for option in self.0 {
            writeln!(f, "- {} (ID: {})", option.label, option.id)?;
        }
        Ok(())
    }
}
