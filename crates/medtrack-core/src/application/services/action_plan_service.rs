//! Action Plan Service - reminders for medications.
//!
//! Each application owns at most one medication plan. The plan is looked up
//! by application id and created from the default template on first use.

use chrono::NaiveTime;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, ports::ActionPlanClient},
    domain::{
        ActionPlan, ActionPlanTask, ActionPlanTaskBuilder, MedicationRecord, ReminderState,
        ScheduledDay, WindowType, find_plan_for_application,
    },
    error::MedtrackResult,
};

/// What the user asked to be reminded about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRequest {
    pub window: WindowType,
    pub reminder: ReminderState,
    pub days: Vec<ScheduledDay>,
    pub times: Vec<NaiveTime>,
}

/// Service for action plans and their tasks.
pub struct ActionPlanService {
    client: Box<dyn ActionPlanClient>,
}

impl ActionPlanService {
    pub fn new(client: Box<dyn ActionPlanClient>) -> Self {
        Self { client }
    }

    /// The application's plan, created from the template if missing.
    #[instrument(skip(self))]
    pub fn get_or_create(&self, application_id: &Uuid) -> MedtrackResult<ActionPlan> {
        let plans = self.client.list_plans()?;
        debug!(count = plans.len(), "Plans fetched");

        if let Some(plan) = find_plan_for_application(&plans, application_id) {
            debug!(plan = %plan.id, "Existing plan found");
            return Ok(plan.clone());
        }

        let created = self
            .client
            .create_plan(ActionPlan::medication_template(*application_id))?;
        info!(plan = %created.id, "Action plan created");
        Ok(created)
    }

    /// Create `task` and attach it to the application's plan.
    #[instrument(skip(self, task), fields(task = %task.name))]
    pub fn attach_task(
        &self,
        application_id: &Uuid,
        task: ActionPlanTask,
    ) -> MedtrackResult<ActionPlanTask> {
        let plan = self.get_or_create(application_id)?;
        let created = self.client.create_task(&plan.id, task)?;
        info!(plan = %plan.id, task_id = %created.id, "Task attached");
        Ok(created)
    }

    /// Assemble a task for `medication` from `request`.
    pub fn build_task(
        &self,
        medication: &MedicationRecord,
        request: &ReminderRequest,
    ) -> MedtrackResult<ActionPlanTask> {
        let mut builder = ActionPlanTaskBuilder::new();
        if !builder.for_medication(medication) {
            return Err(ApplicationError::ValidationFailed(format!(
                "medication {} has no name",
                medication.id
            ))
            .into());
        }
        builder.frequency_metric(request.window);

        let days = if request.days.is_empty() {
            vec![ScheduledDay::Everyday]
        } else {
            request.days.clone()
        };
        for time in &request.times {
            builder.schedule(request.reminder, days.clone(), *time);
        }

        builder.try_construct().map_err(Into::into)
    }

    /// Build and attach a reminder task in one step.
    pub fn schedule_medication(
        &self,
        application_id: &Uuid,
        medication: &MedicationRecord,
        request: &ReminderRequest,
    ) -> MedtrackResult<ActionPlanTask> {
        let task = self.build_task(medication, request)?;
        self.attach_task(application_id, task)
    }
}
