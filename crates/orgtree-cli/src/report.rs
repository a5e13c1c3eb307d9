//! Plain-text rendering of lookup results.

use orgtree_core::{Lookup, OrgNode, OrgSummary};

pub fn render_summary(summary: &OrgSummary) -> String {
    format!(
        "Cities: {}. Departments: {}. Employees: {}.",
        summary.cities, summary.departments, summary.employees
    )
}

fn names(nodes: &[OrgNode]) -> String {
    nodes
        .iter()
        .map(|node| node.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_lookup(lookup: &Lookup) -> String {
    match lookup {
        Lookup::NotFound { id } => format!("No entity with id {id}."),
        Lookup::City(city) => format!("Id {} belongs to the city {}.", city.id, city.name),
        Lookup::Department(dept) => {
            format!("Id {} belongs to the department {}.", dept.id, dept.name)
        }
        Lookup::Employee {
            employee,
            department,
            city,
        } => {
            let mut out = format!("{}\nDepartment: {}.", employee.name, names(department));
            match city {
                Some(colleagues) => out.push_str(&format!(
                    "\nEmployees in {}: {}.",
                    colleagues.city_name(),
                    names(&colleagues.employees)
                )),
                None => out.push_str("\nNo enclosing city."),
            }
            out
        }
    }
}
