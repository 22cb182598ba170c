use chrono::NaiveDate;

use crate::{
    CatalogService, ConfigError, CreateError, EntryService, ExerciseCatalog, Name, NewEntry,
    ReadError, TrendRow, Weight, WorkoutEntry,
};

/// Context of one user interaction.
///
/// Binds the selected user to the service for the duration of a single request, so that
/// operations never fall back to some globally selected user.
pub struct Session<'a, S> {
    user: Name,
    service: &'a S,
}

impl<'a, S> Session<'a, S> {
    pub fn new(user: Name, service: &'a S) -> Self {
        Self { user, service }
    }

    pub fn user(&self) -> &Name {
        &self.user
    }

    pub fn service(&self) -> &'a S {
        self.service
    }
}

impl<S: EntryService> Session<'_, S> {
    pub async fn entries(&self) -> Result<Vec<WorkoutEntry>, ReadError> {
        self.service.get_user_entries(&self.user).await
    }

    pub async fn series(&self, exercise: &str) -> Result<Vec<TrendRow>, ReadError> {
        self.service.get_series(&self.user, exercise).await
    }

    pub async fn add_entry(
        &self,
        exercise: Name,
        weight: Weight,
        date: NaiveDate,
    ) -> Result<(), CreateError> {
        self.service
            .create_entry(NewEntry {
                user: self.user.clone(),
                exercise,
                weight,
                date,
            })
            .await
    }
}

impl<S: CatalogService> Session<'_, S> {
    pub fn catalog(&self) -> Result<ExerciseCatalog, ConfigError> {
        self.service.get_catalog()
    }

    pub fn add_exercise(&self, group: &Name, exercise: &Name) -> Result<bool, ConfigError> {
        self.service.add_exercise(group, exercise)
    }

    pub fn remove_exercise(&self, group: &str, exercise: &str) -> Result<bool, ConfigError> {
        self.service.remove_exercise(group, exercise)
    }

    pub fn add_muscle_group(&self, group: &Name) -> Result<bool, ConfigError> {
        self.service.add_muscle_group(group)
    }

    pub fn remove_muscle_group(&self, group: &str) -> Result<bool, ConfigError> {
        self.service.remove_muscle_group(group)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        Service, Trend,
        tests::repository::{Repository, entry},
    };

    use super::*;

    #[tokio::test]
    async fn test_session_scopes_user() {
        let service = Service::new(Repository::with_entries(vec![
            entry("Alice", "Squats", 100.0, "2024-01-01"),
            entry("Bob", "Squats", 140.0, "2024-01-02"),
        ]));
        let alice = Session::new(Name::new("Alice").unwrap(), &service);
        let bob = Session::new(Name::new("Bob").unwrap(), &service);

        assert_eq!(alice.entries().await.unwrap().len(), 1);
        assert_eq!(bob.series("Squats").await.unwrap()[0].weight, 140.0);
        assert_eq!(alice.user().as_str(), "Alice");
    }

    #[tokio::test]
    async fn test_session_add_entry() {
        let service = Service::new(Repository::default());
        let session = Session::new(Name::new("Alice").unwrap(), &service);

        for (weight, day) in [(100.0, 1), (110.0, 8)] {
            session
                .add_entry(
                    Name::new("Squats").unwrap(),
                    Weight::new(weight).unwrap(),
                    NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                )
                .await
                .unwrap();
        }

        let series = session.series("Squats").await.unwrap();
        assert_eq!(
            series.iter().map(|row| row.trend).collect::<Vec<_>>(),
            [Trend::None, Trend::Up]
        );
        assert_eq!(service.repository().entries.borrow()[0].user, "Alice");
        assert_eq!(service.repository().entries.borrow()[0].date, "2024-01-01");
    }

    #[test]
    fn test_session_catalog() {
        let service = Service::new(Repository::default());
        let session = Session::new(Name::new("Alice").unwrap(), &service);
        let legs = Name::new("Legs").unwrap();

        assert!(session.add_muscle_group(&legs).unwrap());
        assert!(session.add_exercise(&legs, &Name::new("Squats").unwrap()).unwrap());
        assert_eq!(session.catalog().unwrap().exercises("Legs"), ["Squats"]);
        assert!(session.remove_exercise("Legs", "Squats").unwrap());
        assert!(session.remove_muscle_group("Legs").unwrap());
        assert!(session.catalog().unwrap().is_empty());
    }
}
