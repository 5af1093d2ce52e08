//! Getting Started with orgdir
//!
//! Builds a small directory by hand and walks through the main lookups:
//! the activity tree, name search, recursive activity search and the
//! building listing.

use orgdir::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("orgdir - Getting Started");
    println!("========================\n");

    let mut dir = Directory::memory()?;

    // Activity taxonomy, at most three levels deep
    let food = dir.create_activity("Food", None)?;
    let meat = dir.create_activity("Meat", Some(food.id))?;
    let dairy = dir.create_activity("Dairy", Some(food.id))?;
    let cars = dir.create_activity("Cars", None)?;
    let passenger = dir.create_activity("Passenger", Some(cars.id))?;
    let parts = dir.create_activity("Parts", Some(passenger.id))?;

    match dir.create_activity("Tyres", Some(parts.id)) {
        Err(DirectoryError::Validation(msg)) => println!("Rejected fourth level: {}", msg),
        other => println!("Unexpected result: {:?}", other),
    }

    println!("\nActivity tree:");
    for root in dir.activity_forest()? {
        print_node(&root, 0);
    }

    // Buildings and organizations
    let office = dir.create_building("1 Lenina St, office 3", 55.7558, 37.6173)?;
    let garage = dir.create_building("32/1 Blyukhera St", 55.7935, 37.7015)?;

    dir.create_organization(
        NewOrganization::new("Horns & Hooves LLC", office.id)
            .with_phones(["2-222-222", "3-333-333"])
            .with_activities([meat.id, dairy.id]),
    )?;
    dir.create_organization(
        NewOrganization::new("Auto Service", garage.id)
            .with_phones(["4-444-444"])
            .with_activities([parts.id]),
    )?;

    println!("\nOrganizations under \"Food\" (including sub-activities):");
    for org in dir.search_organizations_by_activity("Food")? {
        println!(
            "  {} at {} | phones: {} | activities: {}",
            org.name,
            org.building.address,
            org.phones.join(", "),
            org.activities
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    println!("\nSearch by name \"service\":");
    for org in dir.search_organizations_by_name("service")? {
        println!("  #{} {}", org.id, org.name);
    }

    println!("\nBuildings:");
    for building in dir.buildings()? {
        println!(
            "  #{} {} ({:.4}, {:.4})",
            building.id,
            building.address,
            building.latitude(),
            building.longitude()
        );
    }

    println!("\n{:?}", dir.stats());
    Ok(())
}

fn print_node(node: &ActivityNode, depth: usize) {
    println!("{}- {}", "  ".repeat(depth), node.activity.name);
    for child in &node.children {
        print_node(child, depth + 1);
    }
}
