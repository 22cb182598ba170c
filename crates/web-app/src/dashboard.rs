//! Page model of the dashboard.
//!
//! One render pass reads the store once and derives everything the page shows for the selected
//! user from that read. Any storage or catalog failure aborts the pass.

use chrono::NaiveDate;
use liftlog_domain::{
    CatalogService, ConfigError, CreateError, EntryService, Name, ReadError, Session, Trend,
    ValidationError, Weight, compute_series, display_order, distinct_users, format_for_chart,
};
use log::info;

use crate::{Theme, chart};

pub const ENTRY_ADDED: &str = "Entry added!";

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub users: Vec<String>,
    pub user: String,
    pub tabs: Vec<GroupTab>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupTab {
    pub group: String,
    pub panels: Vec<ExercisePanel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExercisePanel {
    pub exercise: String,
    pub chart: Option<String>,
    pub rows: Vec<TableRow>,
    pub form: EntryForm,
}

/// Row of the history table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub time: NaiveDate,
    pub weight: f64,
    pub status: Trend,
}

#[derive(thiserror::Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to plot chart: {0}")]
    Chart(String),
}

impl Dashboard {
    pub async fn load<S: EntryService + CatalogService>(
        session: &Session<'_, S>,
        theme: Theme,
        chart_width: u32,
        today: NaiveDate,
    ) -> Result<Self, DashboardError> {
        let entries = session.service().get_entries().await?;
        let mut users = distinct_users(&entries);
        let user = session.user().to_string();
        if !users.contains(&user) {
            users.push(user.clone());
            users.sort();
        }

        let catalog = session.catalog()?;
        let mut tabs = vec![];

        for (group, exercises) in catalog.groups() {
            let mut panels = vec![];
            for exercise in exercises {
                let series = compute_series(&entries, &user, exercise);
                let chart = chart::plot_trend(&format_for_chart(&series), theme, chart_width)
                    .map_err(|err| DashboardError::Chart(err.to_string()))?;
                panels.push(ExercisePanel {
                    exercise: exercise.clone(),
                    chart,
                    rows: display_order(&series)
                        .into_iter()
                        .map(|row| TableRow {
                            time: row.date,
                            weight: row.weight,
                            status: row.trend,
                        })
                        .collect(),
                    form: EntryForm::new(exercise, today),
                });
            }
            tabs.push(GroupTab {
                group: group.to_string(),
                panels,
            });
        }

        Ok(Self { users, user, tabs })
    }
}

/// Raw input of the entry form of one exercise.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct EntryForm {
    pub exercise: String,
    pub weight: String,
    pub date: String,
}

#[derive(thiserror::Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Create(#[from] CreateError),
}

impl EntryForm {
    #[must_use]
    pub fn new(exercise: &str, today: NaiveDate) -> Self {
        Self {
            exercise: exercise.to_string(),
            weight: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn validate(
        &self,
        service: &impl EntryService,
    ) -> Result<(Name, Weight, NaiveDate), ValidationError> {
        Ok((
            service.validate_name(&self.exercise)?,
            service.validate_weight(&self.weight)?,
            service.validate_date(&self.date)?,
        ))
    }

    /// Write the entry for the user of the session.
    ///
    /// Invalid input is rejected before anything is written.
    pub async fn submit<S: EntryService>(
        &self,
        session: &Session<'_, S>,
    ) -> Result<&'static str, SubmitError> {
        let (exercise, weight, date) = self.validate(session.service())?;
        session.add_entry(exercise, weight, date).await?;
        info!("added entry for {} ({})", session.user(), self.exercise);
        Ok(ENTRY_ADDED)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use liftlog_domain::{
        CatalogRepository, EntryRepository, ExerciseCatalog, NewEntry, Service, StorageError,
        WeightError, WorkoutEntry,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[derive(Default)]
    pub struct Repository {
        pub entries: RefCell<Vec<WorkoutEntry>>,
        pub catalog: RefCell<ExerciseCatalog>,
        pub reads: Cell<usize>,
        pub offline: Cell<bool>,
    }

    impl EntryRepository for Repository {
        async fn read_entries(&self) -> Result<Vec<WorkoutEntry>, ReadError> {
            if self.offline.get() {
                return Err(StorageError::NoConnection.into());
            }
            self.reads.set(self.reads.get() + 1);
            Ok(self.entries.borrow().clone())
        }

        async fn create_entry(&self, entry: NewEntry) -> Result<(), CreateError> {
            if self.offline.get() {
                return Err(StorageError::NoConnection.into());
            }
            let mut entries = self.entries.borrow_mut();
            let id = entries.len().to_string();
            entries.push(WorkoutEntry {
                id: id.into(),
                user: entry.user.into(),
                exercise: entry.exercise.into(),
                weight: *entry.weight,
                date: entry.date.to_string(),
            });
            Ok(())
        }
    }

    impl CatalogRepository for Repository {
        fn read_catalog(&self) -> Result<ExerciseCatalog, ConfigError> {
            Ok(self.catalog.borrow().clone())
        }

        fn write_catalog(&self, catalog: &ExerciseCatalog) -> Result<(), ConfigError> {
            *self.catalog.borrow_mut() = catalog.clone();
            Ok(())
        }
    }

    fn entry(user: &str, exercise: &str, weight: f64, date: &str) -> WorkoutEntry {
        WorkoutEntry {
            id: date.into(),
            user: user.to_string(),
            exercise: exercise.to_string(),
            weight,
            date: date.to_string(),
        }
    }

    fn service() -> Service<Repository> {
        let repository = Repository::default();
        *repository.entries.borrow_mut() = vec![
            entry("Alice", "Squats", 100.0, "2024-01-01"),
            entry("Alice", "Squats", 110.0, "2024-01-08"),
            entry("Bob", "Bench Press", 60.0, "2024-01-10"),
            entry("Alice", "Deadlift", 140.0, "not a date"),
        ];
        {
            let mut catalog = repository.catalog.borrow_mut();
            catalog.add_exercise("Legs", "Squats");
            catalog.add_exercise("Legs", "Lunges");
            catalog.add_exercise("Chest", "Bench Press");
        }
        Service::new(repository)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    #[tokio::test]
    async fn test_load() {
        let service = service();
        let session = Session::new(Name::new("Alice").unwrap(), &service);

        let dashboard = Dashboard::load(&session, Theme::Light, chart::DEFAULT_WIDTH, today())
            .await
            .unwrap();

        assert_eq!(dashboard.users, ["Alice", "Bob"]);
        assert_eq!(dashboard.user, "Alice");
        assert_eq!(
            dashboard
                .tabs
                .iter()
                .map(|tab| (
                    tab.group.as_str(),
                    tab.panels
                        .iter()
                        .map(|panel| panel.exercise.as_str())
                        .collect::<Vec<_>>()
                ))
                .collect::<Vec<_>>(),
            [("Legs", vec!["Squats", "Lunges"]), ("Chest", vec!["Bench Press"])]
        );

        let squats = &dashboard.tabs[0].panels[0];
        assert_eq!(
            squats.rows,
            [
                TableRow {
                    time: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
                    weight: 110.0,
                    status: Trend::Up,
                },
                TableRow {
                    time: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    weight: 100.0,
                    status: Trend::None,
                },
            ]
        );
        assert!(squats.chart.is_some());
        assert_eq!(squats.form, EntryForm::new("Squats", today()));

        let lunges = &dashboard.tabs[0].panels[1];
        assert!(lunges.rows.is_empty());
        assert!(lunges.chart.is_none());

        assert!(dashboard.tabs[1].panels[0].rows.is_empty());
        assert_eq!(service.repository().reads.get(), 1);
    }

    #[tokio::test]
    async fn test_load_new_user() {
        let service = service();
        let session = Session::new(Name::new("Carol").unwrap(), &service);

        let dashboard = Dashboard::load(&session, Theme::Dark, chart::DEFAULT_WIDTH, today())
            .await
            .unwrap();

        assert_eq!(dashboard.users, ["Alice", "Bob", "Carol"]);
        assert!(
            dashboard
                .tabs
                .iter()
                .flat_map(|tab| &tab.panels)
                .all(|panel| panel.rows.is_empty() && panel.chart.is_none())
        );
        assert_eq!(service.repository().reads.get(), 1);
    }

    #[tokio::test]
    async fn test_load_no_connection() {
        let service = service();
        service.repository().offline.set(true);
        let session = Session::new(Name::new("Alice").unwrap(), &service);

        assert!(matches!(
            Dashboard::load(&session, Theme::Light, chart::DEFAULT_WIDTH, today()).await,
            Err(DashboardError::Read(ReadError::Storage(
                StorageError::NoConnection
            )))
        ));
    }

    #[tokio::test]
    async fn test_submit() {
        let service = service();
        let session = Session::new(Name::new("Alice").unwrap(), &service);
        assert_eq!(session.series("Squats").await.unwrap().len(), 2);

        let form = EntryForm {
            weight: "105,5".to_string(),
            ..EntryForm::new("Squats", today())
        };

        assert_eq!(form.submit(&session).await.unwrap(), ENTRY_ADDED);

        let series = session.series("Squats").await.unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series[2].weight, 105.5);
        assert_eq!(series[2].trend, Trend::Down);
    }

    #[rstest]
    #[case("", "2024-02-01", ValidationError::Weight(WeightError::ParseError))]
    #[case("-5", "2024-02-01", ValidationError::Weight(WeightError::NonPositive))]
    #[case("0", "2024-02-01", ValidationError::Weight(WeightError::NonPositive))]
    #[case("100", "01.02.2024", ValidationError::Date)]
    #[case("100", "2024-02-30", ValidationError::Date)]
    #[tokio::test]
    async fn test_submit_invalid_input(
        #[case] weight: &str,
        #[case] date: &str,
        #[case] expected: ValidationError,
    ) {
        let service = service();
        let session = Session::new(Name::new("Alice").unwrap(), &service);
        let form = EntryForm {
            exercise: "Squats".to_string(),
            weight: weight.to_string(),
            date: date.to_string(),
        };

        match form.submit(&session).await {
            Err(SubmitError::Validation(err)) => assert_eq!(err, expected),
            result => panic!("unexpected result: {result:?}"),
        }
        assert_eq!(service.repository().entries.borrow().len(), 4);
    }

    #[tokio::test]
    async fn test_submit_no_connection() {
        let service = service();
        service.repository().offline.set(true);
        let session = Session::new(Name::new("Alice").unwrap(), &service);
        let form = EntryForm {
            weight: "100".to_string(),
            ..EntryForm::new("Squats", today())
        };

        assert!(matches!(
            form.submit(&session).await,
            Err(SubmitError::Create(CreateError::Storage(
                StorageError::NoConnection
            )))
        ));
    }
}
