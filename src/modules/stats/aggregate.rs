// Purpose: pure grouping math over completed entries.
// Responsibilities: bucket minutes by project, task, day and ISO week.
// Entries without a project land in a shared "No Project" bucket.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use uuid::Uuid;

use crate::modules::stats::response::{DayTotal, ProjectTime, TaskTime, WeekTotal};
use crate::modules::time_entries::core::ports::TaskRef;

#[derive(Debug, Clone)]
pub struct CompletedEntry {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub task: TaskRef,
}

fn minutes_of(entry: &CompletedEntry) -> f64 {
    (entry.end_time - entry.start_time).num_milliseconds() as f64 / 60_000.0
}

pub fn total_minutes(entries: &[CompletedEntry]) -> f64 {
    entries.iter().map(minutes_of).sum()
}

pub fn by_project(entries: &[CompletedEntry]) -> Vec<ProjectTime> {
    let total = total_minutes(entries);
    let mut groups: BTreeMap<Option<Uuid>, ProjectTime> = BTreeMap::new();

    for entry in entries {
        let (key, name, color) = match &entry.task.project {
            Some(project) => (Some(project.id), project.name.clone(), project.color.clone()),
            None => (None, "No Project".to_string(), "#9ca3af".to_string()),
        };
        groups
            .entry(key)
            .or_insert_with(|| ProjectTime {
                project_id: key,
                project_name: name,
                color,
                total_minutes: 0.0,
                percentage: 0.0,
            })
            .total_minutes += minutes_of(entry);
    }

    let mut breakdown: Vec<ProjectTime> = groups.into_values().collect();
    if total > 0.0 {
        for group in &mut breakdown {
            group.percentage = group.total_minutes / total * 100.0;
        }
    }
    breakdown.sort_by(|a, b| b.total_minutes.total_cmp(&a.total_minutes));
    breakdown
}

pub fn by_task(entries: &[CompletedEntry]) -> Vec<TaskTime> {
    let mut groups: BTreeMap<Uuid, TaskTime> = BTreeMap::new();

    for entry in entries {
        let group = groups.entry(entry.task.id).or_insert_with(|| TaskTime {
            task_id: entry.task.id,
            task_title: entry.task.title.clone(),
            task_color: entry.task.color.clone(),
            total_minutes: 0.0,
            session_count: 0,
        });
        group.total_minutes += minutes_of(entry);
        group.session_count += 1;
    }

    let mut breakdown: Vec<TaskTime> = groups.into_values().collect();
    breakdown.sort_by(|a, b| b.total_minutes.total_cmp(&a.total_minutes));
    breakdown
}

pub fn by_day(entries: &[CompletedEntry]) -> Vec<DayTotal> {
    let mut groups: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for entry in entries {
        *groups.entry(entry.start_time.date_naive()).or_insert(0.0) += minutes_of(entry);
    }

    groups
        .into_iter()
        .map(|(date, total_minutes)| DayTotal {
            date,
            total_minutes,
            total_hours: total_minutes / 60.0,
        })
        .collect()
}

pub fn by_week(entries: &[CompletedEntry]) -> Vec<WeekTotal> {
    let mut groups: BTreeMap<(i32, u32), WeekTotal> = BTreeMap::new();

    for entry in entries {
        let date = entry.start_time.date_naive();
        let week = date.iso_week();
        let group = groups
            .entry((week.year(), week.week()))
            .or_insert_with(|| WeekTotal {
                week_number: week.week(),
                start_date: date,
                end_date: date,
                total_minutes: 0.0,
                total_hours: 0.0,
            });
        group.start_date = group.start_date.min(date);
        group.end_date = group.end_date.max(date);
        group.total_minutes += minutes_of(entry);
    }

    let mut breakdown: Vec<WeekTotal> = groups.into_values().collect();
    for group in &mut breakdown {
        group.total_hours = group.total_minutes / 60.0;
    }
    breakdown.sort_by_key(|group| group.start_date);
    breakdown
}
