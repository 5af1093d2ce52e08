use super::Directory;
use crate::error::Result;
use orgdir_types::organization::NewOrganization;

impl Directory {
    /// Populate an empty directory with a small Moscow demo data set.
    ///
    /// Seven activities in two trees, two buildings and three
    /// organizations. Useful for demos and tests.
    pub fn seed_demo(&mut self) -> Result<()> {
        let food = self.create_activity("Еда", None)?;
        let meat = self.create_activity("Мясная продукция", Some(food.id))?;
        let dairy = self.create_activity("Молочная продукция", Some(food.id))?;
        let cars = self.create_activity("Автомобили", None)?;
        self.create_activity("Грузовые", Some(cars.id))?;
        let passenger = self.create_activity("Легковые", Some(cars.id))?;
        let parts = self.create_activity("Запчасти", Some(passenger.id))?;

        let lenina = self.create_building("г. Москва, ул. Ленина 1, офис 3", 55.7558, 37.6173)?;
        let bluhera = self.create_building("г. Москва, ул. Блюхера 32/1", 55.7935, 37.7015)?;

        self.create_organization(
            NewOrganization::new("ООО Рога и Копыта", lenina.id)
                .with_phones(["2-222-222", "3-333-333", "8-923-666-13-13"])
                .with_activities([meat.id, dairy.id]),
        )?;
        self.create_organization(
            NewOrganization::new("АвтоСервис", bluhera.id)
                .with_phones(["4-444-444"])
                .with_activities([parts.id]),
        )?;
        self.create_organization(
            NewOrganization::new("МолокоФерма", lenina.id)
                .with_phones(["5-555-555"])
                .with_activities([dairy.id]),
        )?;

        log::info!("Seeded demo directory");
        Ok(())
    }
}
