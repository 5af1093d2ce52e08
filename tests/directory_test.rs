use orgdir::{
    ActivityId, BuildingId, Config, Directory, DirectoryError, EntityKind, NewOrganization,
    OrganizationId, Point, ProximityQuery, RequireNonEmpty,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn seeded() -> Directory {
    init_logging();
    let mut dir = Directory::memory().unwrap();
    dir.seed_demo().unwrap();
    dir
}

#[test]
fn test_organization_read_back_is_fully_populated() {
    let dir = seeded();

    let org = dir.organization(OrganizationId(1)).unwrap();
    assert_eq!(org.name, "ООО Рога и Копыта");
    assert_eq!(org.building.address, "г. Москва, ул. Ленина 1, офис 3");
    assert_eq!(org.building.id, org.building_id);
    assert_eq!(org.phones, vec!["2-222-222", "3-333-333", "8-923-666-13-13"]);

    let activity_names: Vec<_> = org.activities.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(activity_names, vec!["Мясная продукция", "Молочная продукция"]);
}

#[test]
fn test_missing_organization_is_not_found() {
    let dir = seeded();
    let err = dir.organization(OrganizationId(42)).unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::NotFound {
            entity: EntityKind::Organization,
            id: 42
        }
    ));
}

#[test]
fn test_taxonomy_depth_limit() {
    let mut dir = seeded();
    let parts = dir.find_activity_by_name("Запчасти").unwrap().unwrap();
    assert_eq!(dir.activity_depth(parts.id).unwrap(), 3);

    let err = dir.create_activity("Шины", Some(parts.id)).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(dir.stats().activities, 7);

    // A node under a depth-2 parent is still allowed
    let passenger = dir.find_activity_by_name("Легковые").unwrap().unwrap();
    let sibling = dir.create_activity("Аксессуары", Some(passenger.id)).unwrap();
    assert_eq!(dir.activity_depth(sibling.id).unwrap(), 3);
}

#[test]
fn test_descendants_include_self_and_all_levels() {
    let dir = seeded();
    let cars = dir.find_activity_by_name("Автомобили").unwrap().unwrap();
    let names: Vec<_> = dir
        .activity_descendants(cars.id)
        .unwrap()
        .into_iter()
        .map(|id| dir.activity(id).unwrap().name)
        .collect();
    assert_eq!(names, vec!["Автомобили", "Грузовые", "Легковые", "Запчасти"]);

    assert!(dir.activity_descendants(ActivityId(99)).unwrap().is_empty());
}

#[test]
fn test_recursive_activity_search() {
    let dir = seeded();

    let food: Vec<_> = dir
        .search_organizations_by_activity("Еда")
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(food, vec![OrganizationId(1), OrganizationId(3)]);

    let dairy = dir
        .search_organizations_by_activity("Молочная продукция")
        .unwrap();
    assert_eq!(dairy.len(), 2);

    let none = dir.search_organizations_by_activity("Игрушки").unwrap();
    assert!(none.is_empty());
    assert!(matches!(
        none.require_non_empty("organizations for Игрушки"),
        Err(DirectoryError::EmptyResult(_))
    ));
}

#[test]
fn test_organizations_in_building() {
    let dir = seeded();
    let names: Vec<_> = dir
        .organizations_in_building(BuildingId(1))
        .unwrap()
        .into_iter()
        .map(|o| o.name)
        .collect();
    assert_eq!(names, vec!["ООО Рога и Копыта", "МолокоФерма"]);
    assert!(dir.organizations_in_building(BuildingId(9)).unwrap().is_empty());
}

#[test]
fn test_radius_and_box_searches() {
    let dir = seeded();
    let center = Point::new(37.6173, 55.7558);

    let close = dir
        .organizations_near(&center, ProximityQuery::radius(500.0))
        .unwrap();
    assert_eq!(close.len(), 2);
    assert!(close.iter().all(|o| o.building_id == BuildingId(1)));

    // The second building is roughly 6.5 km away
    let wide = dir
        .organizations_near(&center, ProximityQuery::radius(10_000.0))
        .unwrap();
    assert_eq!(wide.len(), 3);

    let buildings = dir.buildings_within_radius(&center, 10_000.0).unwrap();
    assert_eq!(buildings[0].id, BuildingId(1));
    assert_eq!(buildings[1].id, BuildingId(2));

    let small_box = dir.buildings_within_box(&center, 100.0, 100.0).unwrap();
    assert_eq!(small_box.len(), 1);
    let big_box = dir.buildings_within_box(&center, 20_000.0, 20_000.0).unwrap();
    assert_eq!(big_box.len(), 2);
}

#[test]
fn test_near_parameter_validation() {
    let dir = seeded();
    let center = Point::new(37.6173, 55.7558);

    assert_eq!(dir.near(&center, Some(500.0), None, None).unwrap().len(), 2);
    assert_eq!(
        dir.near(&center, None, Some(200.0), Some(200.0)).unwrap().len(),
        2
    );

    for (radius, width, height) in [
        (None, None, None),
        (None, Some(100.0), None),
        (None, None, Some(100.0)),
        (Some(100.0), Some(100.0), Some(100.0)),
        (Some(-1.0), None, None),
        (Some(f64::NAN), None, None),
    ] {
        let err = dir.near(&center, radius, width, height).unwrap_err();
        assert!(err.is_validation(), "{:?} gave {}", (radius, width, height), err);
    }

    let bad_center = Point::new(37.6, 95.0);
    assert!(dir.near(&bad_center, Some(100.0), None, None).unwrap_err().is_validation());
}

#[test]
fn test_delete_then_queries_forget_organization() {
    let mut dir = seeded();
    dir.delete_organization(OrganizationId(3)).unwrap();

    let dairy = dir
        .search_organizations_by_activity("Молочная продукция")
        .unwrap();
    assert_eq!(dairy.len(), 1);
    assert_eq!(dir.stats().phones, 4);
    assert_eq!(dir.organizations().unwrap().len(), 2);
}

#[test]
fn test_custom_depth_configuration() {
    init_logging();
    let mut dir = Directory::memory_with_config(Config::default().with_max_activity_depth(1)).unwrap();
    let root = dir.create_activity("Root", None).unwrap();
    assert!(dir.create_activity("Child", Some(root.id)).unwrap_err().is_validation());
}

#[test]
fn test_create_organization_with_unknown_activity_is_atomic() {
    let mut dir = seeded();
    let before = dir.stats();

    let err = dir
        .create_organization(
            NewOrganization::new("Призрак", BuildingId(1))
                .with_phones(["0-000-000"])
                .with_activities([ActivityId(1), ActivityId(500)]),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::NotFound {
            entity: EntityKind::Activity,
            id: 500
        }
    ));

    let after = dir.stats();
    assert_eq!(after.organizations, before.organizations);
    assert_eq!(after.phones, before.phones);
    assert_eq!(after.operations_count, before.operations_count);
}
