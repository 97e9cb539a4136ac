//! `medtrack remind`: schedule reminder tasks for a medication.
//!
//! The task is attached to the configured application's medication plan,
//! which is created on first use.

use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use medtrack_core::{
    application::ReminderRequest,
    domain::{ActionPlanTask, ScheduledDay},
};

use crate::{
    cli::{GlobalArgs, RemindArgs},
    commands::{action_plan_service, medication_service, parse_id},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Serialize)]
struct Scheduled<'a> {
    application_id: Uuid,
    task: &'a ActionPlanTask,
}

#[instrument(skip_all, fields(id = %args.id))]
pub fn execute(
    args: RemindArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let id = parse_id(&args.id)?;
    let record = medication_service(global, config).get(&id)?;

    let request = ReminderRequest {
        window: args.window.into(),
        reminder: args.reminder.into(),
        days: args.days.into_iter().map(ScheduledDay::from).collect(),
        times: args.at,
    };

    let application_id = config.application.id;
    let task = action_plan_service(global, config).schedule_medication(
        &application_id,
        &record,
        &request,
    )?;

    if output.is_json() {
        return output.json(&Scheduled {
            application_id,
            task: &task,
        });
    }

    output.success(&format!("Scheduled '{}'", task.name))?;
    if let Some(metrics) = &task.completion_metrics {
        output.data(&format!("  window     {}", metrics.window_type))?;
    }
    for schedule in &task.schedules {
        let days: Vec<String> = schedule
            .scheduled_days
            .iter()
            .map(ToString::to_string)
            .collect();
        output.data(&format!(
            "  at {}   {}   reminder {}",
            schedule.scheduled_time.format("%H:%M"),
            days.join(", "),
            schedule.reminder_state,
        ))?;
    }
    Ok(())
}
