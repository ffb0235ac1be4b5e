// Purpose: serialized shapes for the stats endpoints.

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTime {
    pub project_id: Option<Uuid>,
    pub project_name: String,
    pub color: String,
    pub total_minutes: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskTime {
    pub task_id: Uuid,
    pub task_title: String,
    pub task_color: String,
    pub total_minutes: f64,
    pub session_count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub date: NaiveDate,
    pub total_minutes: f64,
    pub total_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTotal {
    pub week_number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_minutes: f64,
    pub total_hours: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub date: NaiveDate,
    pub total_minutes: f64,
    pub total_hours: f64,
    pub project_breakdown: Vec<ProjectTime>,
    pub task_breakdown: Vec<TaskTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStats {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_minutes: f64,
    pub total_hours: f64,
    pub project_breakdown: Vec<ProjectTime>,
    pub task_breakdown: Vec<TaskTime>,
    pub daily_breakdown: Vec<DayTotal>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyStats {
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_minutes: f64,
    pub total_hours: f64,
    pub project_breakdown: Vec<ProjectTime>,
    pub task_breakdown: Vec<TaskTime>,
    pub daily_breakdown: Vec<DayTotal>,
    pub weekly_breakdown: Vec<WeekTotal>,
}
