//! In-memory action plan backend.

use std::sync::{Arc, RwLock};

use tracing::debug;
use uuid::Uuid;

use medtrack_core::{
    application::{ApplicationError, ports::ActionPlanClient},
    domain::{ActionPlan, ActionPlanTask},
    error::MedtrackResult,
};

/// Thread-safe in-memory action plan client.
#[derive(Clone, Default)]
pub struct InMemoryActionPlanClient {
    plans: Arc<RwLock<Vec<ActionPlan>>>,
}

impl InMemoryActionPlanClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plans(plans: impl IntoIterator<Item = ActionPlan>) -> Self {
        Self {
            plans: Arc::new(RwLock::new(plans.into_iter().collect())),
        }
    }
}

impl ActionPlanClient for InMemoryActionPlanClient {
    fn list_plans(&self) -> MedtrackResult<Vec<ActionPlan>> {
        let plans = self
            .plans
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(plans.clone())
    }

    fn create_plan(&self, plan: ActionPlan) -> MedtrackResult<ActionPlan> {
        let mut plans = self
            .plans
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        debug!(plan = %plan.id, "Plan created");
        plans.push(plan.clone());
        Ok(plan)
    }

    fn create_task(&self, plan_id: &Uuid, task: ActionPlanTask) -> MedtrackResult<ActionPlanTask> {
        let mut plans = self
            .plans
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        let plan = plans
            .iter_mut()
            .find(|p| p.id == *plan_id)
            .ok_or_else(|| ApplicationError::ActionPlanUnavailable {
                reason: format!("no plan with id {plan_id}"),
            })?;
        plan.tasks.push(task.clone());
        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medtrack_core::application::ActionPlanService;

    #[test]
    fn service_creates_plan_once() {
        let client = InMemoryActionPlanClient::new();
        let service = ActionPlanService::new(Box::new(client.clone()));
        let app = Uuid::new_v4();

        let first = service.get_or_create(&app).unwrap();
        let second = service.get_or_create(&app).unwrap();
        assert_eq!(first.id, second.id);
        assert_eq!(client.list_plans().unwrap().len(), 1);
    }

    #[test]
    fn preloaded_plan_of_other_application_is_ignored() {
        let other = ActionPlan::medication_template(Uuid::new_v4());
        let client = InMemoryActionPlanClient::with_plans([other]);
        let service = ActionPlanService::new(Box::new(client.clone()));

        service.get_or_create(&Uuid::new_v4()).unwrap();
        assert_eq!(client.list_plans().unwrap().len(), 2);
    }
}
