// Purpose: assemble daily, weekly and monthly statistics for a user.
// Responsibilities: translate a period into a date window, load completed
// entries joined with their tasks, and hand the grouping to aggregate.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, TimeDelta};
use thiserror::Error;
use uuid::Uuid;

use crate::modules::stats::aggregate::{self, CompletedEntry};
use crate::modules::stats::response::{DailyStats, MonthlyStats, WeeklyStats};
use crate::modules::time_entries::core::ports::{StoreError, TaskDirectory, TaskRef, TimerStore};

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("invalid period: {0}")]
    InvalidWindow(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct StatsHandler {
    store: Arc<dyn TimerStore>,
    tasks: Arc<dyn TaskDirectory>,
}

impl StatsHandler {
    pub fn new(store: Arc<dyn TimerStore>, tasks: Arc<dyn TaskDirectory>) -> Self {
        Self { store, tasks }
    }

    async fn completed(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CompletedEntry>, StatsError> {
        let owned = self.tasks.owned_by(user_id).await?;
        let ids: Vec<Uuid> = owned.iter().map(|task| task.id).collect();
        let by_id: HashMap<Uuid, TaskRef> =
            owned.into_iter().map(|task| (task.id, task)).collect();

        let rows = self.store.completed_in_window(&ids, from, to).await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                let end_time = row.end_time?;
                let task = by_id.get(&row.task_id)?.clone();
                Some(CompletedEntry {
                    start_time: row.start_time,
                    end_time,
                    task,
                })
            })
            .collect())
    }

    pub async fn daily(&self, user_id: Uuid, date: NaiveDate) -> Result<DailyStats, StatsError> {
        let entries = self
            .completed(user_id, date, date + TimeDelta::days(1))
            .await?;

        let total_minutes = aggregate::total_minutes(&entries);
        Ok(DailyStats {
            date,
            total_minutes,
            total_hours: total_minutes / 60.0,
            project_breakdown: aggregate::by_project(&entries),
            task_breakdown: aggregate::by_task(&entries),
        })
    }

    pub async fn weekly(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
    ) -> Result<WeeklyStats, StatsError> {
        let entries = self
            .completed(user_id, start_date, start_date + TimeDelta::days(7))
            .await?;

        let total_minutes = aggregate::total_minutes(&entries);
        Ok(WeeklyStats {
            start_date,
            end_date: start_date + TimeDelta::days(6),
            total_minutes,
            total_hours: total_minutes / 60.0,
            project_breakdown: aggregate::by_project(&entries),
            task_breakdown: aggregate::by_task(&entries),
            daily_breakdown: aggregate::by_day(&entries),
        })
    }

    pub async fn monthly(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<MonthlyStats, StatsError> {
        let start_date = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| StatsError::InvalidWindow(format!("{year}-{month:02}")))?;
        let window_end = first_of_next_month(year, month);
        let entries = self.completed(user_id, start_date, window_end).await?;

        let total_minutes = aggregate::total_minutes(&entries);
        Ok(MonthlyStats {
            year,
            month,
            start_date,
            end_date: window_end - TimeDelta::days(1),
            total_minutes,
            total_hours: total_minutes / 60.0,
            project_breakdown: aggregate::by_project(&entries),
            task_breakdown: aggregate::by_task(&entries),
            daily_breakdown: aggregate::by_day(&entries),
            weekly_breakdown: aggregate::by_week(&entries),
        })
    }
}

fn first_of_next_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    // Both arms are always a valid first-of-month.
    NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap_or_default()
}

#[cfg(test)]
mod stats_tests {
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::modules::time_entries::adapters::in_memory_store::InMemoryTimerStore;
    use crate::modules::time_entries::adapters::in_memory_tasks::InMemoryTaskDirectory;
    use crate::modules::time_entries::core::entry::TimeEntry;
    use crate::modules::time_entries::core::ports::ProjectRef;

    struct World {
        store: Arc<InMemoryTimerStore>,
        tasks: Arc<InMemoryTaskDirectory>,
        handler: StatsHandler,
        task_id: Uuid,
        user_id: Uuid,
    }

    #[fixture]
    async fn before_each() -> World {
        let store = Arc::new(InMemoryTimerStore::new());
        let tasks = Arc::new(InMemoryTaskDirectory::new());
        let task_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        tasks
            .insert(TaskRef {
                id: task_id,
                user_id,
                title: "Design review".into(),
                color: "#f59e0b".into(),
                status: "active".into(),
                project: Some(ProjectRef {
                    id: Uuid::now_v7(),
                    name: "Website relaunch".into(),
                    color: "#2563eb".into(),
                }),
            })
            .await;
        World {
            store: Arc::clone(&store),
            tasks: Arc::clone(&tasks),
            handler: StatsHandler::new(store, tasks),
            task_id,
            user_id,
        }
    }

    async fn seed_completed(world: &World, task_id: Uuid, day: NaiveDate, hour: u32, minutes: i64) {
        let start = Utc.from_utc_datetime(&day.and_hms_opt(hour, 0, 0).unwrap());
        let entry = TimeEntry::started(task_id, start);
        world.store.insert_running(entry.clone()).await.unwrap();
        world
            .store
            .finalize(entry.id, start + TimeDelta::minutes(minutes))
            .await
            .unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_report_zeroes_for_an_empty_day(#[future] before_each: World) {
        let world = before_each.await;
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();

        let stats = world.handler.daily(world.user_id, day).await.unwrap();

        assert_eq!(stats.total_minutes, 0.0);
        assert_eq!(stats.total_hours, 0.0);
        assert!(stats.project_breakdown.is_empty());
        assert!(stats.task_breakdown.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_total_a_day_of_work(#[future] before_each: World) {
        let world = before_each.await;
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        seed_completed(&world, world.task_id, day, 9, 90).await;
        seed_completed(&world, world.task_id, day, 14, 30).await;

        let stats = world.handler.daily(world.user_id, day).await.unwrap();

        assert_eq!(stats.total_minutes, 120.0);
        assert_eq!(stats.total_hours, 2.0);
        assert_eq!(stats.project_breakdown.len(), 1);
        assert_eq!(stats.project_breakdown[0].percentage, 100.0);
        assert_eq!(stats.task_breakdown[0].session_count, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_only_count_entries_starting_on_the_requested_day(
        #[future] before_each: World,
    ) {
        let world = before_each.await;
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        seed_completed(&world, world.task_id, day - TimeDelta::days(1), 23, 30).await;
        seed_completed(&world, world.task_id, day, 23, 30).await;

        let stats = world.handler.daily(world.user_id, day).await.unwrap();

        assert_eq!(stats.total_minutes, 30.0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_skip_running_entries_and_foreign_tasks(#[future] before_each: World) {
        let world = before_each.await;
        let day = Utc::now().date_naive();
        let running = TimeEntry::started(world.task_id, Utc::now());
        world.store.insert_running(running).await.unwrap();

        let foreign_task = Uuid::now_v7();
        world
            .tasks
            .insert(TaskRef {
                id: foreign_task,
                user_id: Uuid::now_v7(),
                title: "Not yours".into(),
                color: "#ef4444".into(),
                status: "active".into(),
                project: None,
            })
            .await;
        seed_completed(&world, foreign_task, day, 9, 60).await;

        let stats = world.handler.daily(world.user_id, day).await.unwrap();

        assert_eq!(stats.total_minutes, 0.0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_break_a_week_down_by_day(#[future] before_each: World) {
        let world = before_each.await;
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        seed_completed(&world, world.task_id, monday, 9, 60).await;
        seed_completed(&world, world.task_id, monday + TimeDelta::days(2), 9, 30).await;

        let stats = world.handler.weekly(world.user_id, monday).await.unwrap();

        assert_eq!(stats.end_date, monday + TimeDelta::days(6));
        assert_eq!(stats.total_minutes, 90.0);
        assert_eq!(stats.daily_breakdown.len(), 2);
        assert_eq!(stats.daily_breakdown[0].date, monday);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_break_a_month_down_by_week(#[future] before_each: World) {
        let world = before_each.await;
        let first = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        seed_completed(&world, world.task_id, first + TimeDelta::days(3), 9, 60).await;
        seed_completed(&world, world.task_id, first + TimeDelta::days(10), 9, 60).await;

        let stats = world.handler.monthly(world.user_id, 2024, 3).await.unwrap();

        assert_eq!(stats.start_date, first);
        assert_eq!(stats.end_date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(stats.weekly_breakdown.len(), 2);
        assert_eq!(stats.total_hours, 2.0);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_invalid_month(#[future] before_each: World) {
        let world = before_each.await;

        let result = world.handler.monthly(world.user_id, 2024, 13).await;

        assert!(matches!(result, Err(StatsError::InvalidWindow(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_roll_december_into_january(#[future] before_each: World) {
        let world = before_each.await;
        let new_years_eve = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        seed_completed(&world, world.task_id, new_years_eve, 22, 60).await;

        let stats = world.handler.monthly(world.user_id, 2024, 12).await.unwrap();

        assert_eq!(stats.end_date, new_years_eve);
        assert_eq!(stats.total_minutes, 60.0);
    }
}
