//! Nearby search
//!
//! Seeds the demo data set and runs radius and box searches around the
//! office on Lenina St, then the same searches from raw request-style
//! parameters.

use orgdir::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut dir = Directory::memory()?;
    dir.seed_demo()?;

    let center = Point::new(37.6173, 55.7558);

    for radius in [500.0, 5_000.0, 10_000.0] {
        let orgs = dir.organizations_near(&center, ProximityQuery::radius(radius))?;
        println!("Within {:>6} m: {}", radius, names(&orgs));
    }

    let boxed = dir.organizations_near(&center, ProximityQuery::rect(12_000.0, 10_000.0))?;
    println!("In a 12 x 10 km box: {}", names(&boxed));

    println!("\nRequest-style parameters:");
    let requests = [
        (Some(1_000.0), None, None),
        (None, Some(200.0), Some(200.0)),
        (None, Some(200.0), None),
        (None, None, None),
    ];
    for (radius, width, height) in requests {
        match dir.near(&center, radius, width, height) {
            Ok(orgs) => println!("  {:?} -> {}", (radius, width, height), names(&orgs)),
            Err(e) => println!("  {:?} -> error: {}", (radius, width, height), e),
        }
    }

    let empty = dir
        .organizations_near(&Point::new(30.3141, 59.9386), ProximityQuery::radius(1_000.0))?
        .require_non_empty("organizations near St Petersburg");
    if let Err(e) = empty {
        println!("\n{}", e);
    }

    Ok(())
}

fn names(orgs: &[Organization]) -> String {
    if orgs.is_empty() {
        return "(none)".to_string();
    }
    orgs.iter()
        .map(|org| org.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
