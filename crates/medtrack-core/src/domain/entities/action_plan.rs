//! Action plans: reminder schedules attached to a medication.
//!
//! A plan belongs to one application (matched by `organization_id`) and owns
//! the tasks created for it. Tasks are assembled by [`ActionPlanTaskBuilder`],
//! which follows the same bool-reporting convention as the medication builder.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{entities::medication::MedicationRecord, error::DomainError};

/// Element of a medication thing that completes a tracked task.
pub const MEDICATION_NAME_XPATH: &str = "/thing/data-xml/medication/name/text";

// ── Plan ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub name: String,
    pub outcome_name: String,
    pub outcome_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub organization_id: Uuid,
    pub objectives: Vec<Objective>,
    #[serde(default)]
    pub tasks: Vec<ActionPlanTask>,
}

impl ActionPlan {
    /// The plan created for an application that has none yet.
    pub fn medication_template(application_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Medication".into(),
            description: "Track your medication".into(),
            category: "Health".into(),
            organization_id: application_id,
            objectives: vec![Objective {
                name: "Take your medication".into(),
                outcome_name: "Medication trends per week".into(),
                outcome_type: "Other".into(),
            }],
            tasks: Vec::new(),
        }
    }

    pub fn belongs_to(&self, application_id: &Uuid) -> bool {
        self.organization_id == *application_id
    }
}

/// First plan owned by `application_id`.
pub fn find_plan_for_application<'a>(
    plans: &'a [ActionPlan],
    application_id: &Uuid,
) -> Option<&'a ActionPlan> {
    plans.iter().find(|plan| plan.belongs_to(application_id))
}

// ── Task ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetEvent {
    pub element_xpath: String,
    pub element_values: Vec<String>,
    pub is_negated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceMetrics {
    pub evaluate_targets: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingPolicy {
    pub is_auto_trackable: bool,
    pub target_events: Vec<TargetEvent>,
    pub occurrence_metrics: OccurrenceMetrics,
}

impl TrackingPolicy {
    /// Auto-tracks any medication entry whose name equals `medication_name`.
    pub fn for_medication_name(medication_name: &str) -> Self {
        Self {
            is_auto_trackable: true,
            target_events: vec![TargetEvent {
                element_xpath: MEDICATION_NAME_XPATH.into(),
                element_values: vec![medication_name.to_string()],
                is_negated: false,
            }],
            occurrence_metrics: OccurrenceMetrics::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionMetrics {
    pub window_type: WindowType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub reminder_state: ReminderState,
    pub scheduled_days: Vec<ScheduledDay>,
    pub scheduled_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlanTask {
    pub id: Uuid,
    pub name: String,
    pub signup_name: String,
    pub short_description: String,
    pub long_description: String,
    pub task_type: Option<String>,
    pub tracking_policy: Option<TrackingPolicy>,
    pub completion_metrics: Option<CompletionMetrics>,
    pub schedules: Vec<Schedule>,
}

impl ActionPlanTask {
    fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            signup_name: String::new(),
            short_description: String::new(),
            long_description: String::new(),
            task_type: None,
            tracking_policy: None,
            completion_metrics: None,
            schedules: Vec::new(),
        }
    }

    /// Names of the parts a task needs before it can be created.
    pub fn missing_parts(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.task_type.is_none() {
            missing.push("task type");
        }
        if self.completion_metrics.is_none() {
            missing.push("window type");
        }
        if self.schedules.is_empty() {
            missing.push("schedule");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_parts().is_empty()
    }
}

// ── Enumerations ──────────────────────────────────────────────────────────────

/// Period over which task completions are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    Daily,
    Weekly,
}

impl fmt::Display for WindowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        })
    }
}

impl FromStr for WindowType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "daily" | "day" => Ok(Self::Daily),
            "weekly" | "week" => Ok(Self::Weekly),
            _ => Err(invalid_choice("window", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderState {
    #[default]
    Off,
    Short,
    Medium,
    Long,
}

impl fmt::Display for ReminderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        })
    }
}

impl FromStr for ReminderState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(invalid_choice("reminder", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduledDay {
    Everyday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl fmt::Display for ScheduledDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Everyday => "everyday",
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        })
    }
}

impl FromStr for ScheduledDay {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "everyday" | "daily" | "all" => Ok(Self::Everyday),
            "mon" | "monday" => Ok(Self::Monday),
            "tue" | "tuesday" => Ok(Self::Tuesday),
            "wed" | "wednesday" => Ok(Self::Wednesday),
            "thu" | "thursday" => Ok(Self::Thursday),
            "fri" | "friday" => Ok(Self::Friday),
            "sat" | "saturday" => Ok(Self::Saturday),
            "sun" | "sunday" => Ok(Self::Sunday),
            _ => Err(invalid_choice("day", s)),
        }
    }
}

fn invalid_choice(field: &str, value: &str) -> DomainError {
    DomainError::InvalidChoice {
        field: field.to_string(),
        value: value.to_string(),
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Assembles an [`ActionPlanTask`] for a medication.
#[derive(Debug, Clone)]
pub struct ActionPlanTaskBuilder {
    task: ActionPlanTask,
}

impl ActionPlanTaskBuilder {
    pub fn new() -> Self {
        Self {
            task: ActionPlanTask::empty(),
        }
    }

    /// Fill names, descriptions and tracking from `medication`.
    ///
    /// Returns `false` and leaves the task untouched when the medication has
    /// no name.
    pub fn for_medication(&mut self, medication: &MedicationRecord) -> bool {
        let Some(name) = medication.name.as_deref().filter(|n| !n.is_empty()) else {
            return false;
        };

        let take = format!("Take {name}");
        self.task.signup_name = match &medication.dose {
            Some(dose) if !dose.display_text().is_empty() => {
                format!("Take {} of {name}", dose.display_text())
            }
            _ => take.clone(),
        };
        self.task.name = take;
        self.task.short_description = "Remember to take your medication".into();
        self.task.long_description =
            "Taking your medication on time can help maintain your health".into();
        self.task.task_type = Some("Other".into());
        self.task.tracking_policy = Some(TrackingPolicy::for_medication_name(name));
        true
    }

    pub fn frequency_metric(&mut self, window_type: WindowType) -> bool {
        self.task.completion_metrics = Some(CompletionMetrics { window_type });
        true
    }

    /// Append a schedule. Earlier schedules are kept.
    pub fn schedule(
        &mut self,
        reminder_state: ReminderState,
        scheduled_days: Vec<ScheduledDay>,
        scheduled_time: NaiveTime,
    ) -> bool {
        self.task.schedules.push(Schedule {
            reminder_state,
            scheduled_days,
            scheduled_time,
        });
        true
    }

    pub fn task(&self) -> &ActionPlanTask {
        &self.task
    }

    /// The task and whether it has a type, a window and a schedule.
    pub fn construct(self) -> (ActionPlanTask, bool) {
        let complete = self.task.is_complete();
        (self.task, complete)
    }

    pub fn try_construct(self) -> Result<ActionPlanTask, DomainError> {
        let missing = self.task.missing_parts();
        if missing.is_empty() {
            Ok(self.task)
        } else {
            Err(DomainError::IncompleteActionPlanTask { missing })
        }
    }
}

impl Default for ActionPlanTaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::medication::MedicationRecordBuilder;

    fn advil(with_dose: bool) -> MedicationRecord {
        let mut b = MedicationRecordBuilder::new().attach(MedicationRecord::new());
        b.update_name(Some("Advil"));
        if with_dose {
            b.update_dose("2", Some("Tablets"));
        }
        b.build()
    }

    fn nine_am() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn medication_task_names() {
        let mut b = ActionPlanTaskBuilder::new();
        assert!(b.for_medication(&advil(false)));
        assert_eq!(b.task().name, "Take Advil");
        assert_eq!(b.task().signup_name, "Take Advil");

        let mut b = ActionPlanTaskBuilder::new();
        assert!(b.for_medication(&advil(true)));
        assert_eq!(b.task().signup_name, "Take 2 Tablets of Advil");
    }

    #[test]
    fn medication_task_tracks_by_name() {
        let mut b = ActionPlanTaskBuilder::new();
        b.for_medication(&advil(false));
        let policy = b.task().tracking_policy.as_ref().unwrap();
        assert!(policy.is_auto_trackable);
        assert_eq!(policy.target_events[0].element_xpath, MEDICATION_NAME_XPATH);
        assert_eq!(policy.target_events[0].element_values, vec!["Advil"]);
        assert!(!policy.occurrence_metrics.evaluate_targets);
    }

    #[test]
    fn unnamed_medication_is_rejected() {
        let mut b = ActionPlanTaskBuilder::new();
        assert!(!b.for_medication(&MedicationRecord::new()));
        assert!(b.task().task_type.is_none());
    }

    #[test]
    fn construct_reports_completeness() {
        let mut b = ActionPlanTaskBuilder::new();
        b.for_medication(&advil(false));
        b.frequency_metric(WindowType::Daily);
        let (_, ok) = b.clone().construct();
        assert!(!ok);

        b.schedule(ReminderState::Short, vec![ScheduledDay::Everyday], nine_am());
        let (task, ok) = b.construct();
        assert!(ok);
        assert_eq!(task.schedules.len(), 1);
    }

    #[test]
    fn schedules_accumulate() {
        let mut b = ActionPlanTaskBuilder::new();
        b.schedule(ReminderState::Off, vec![ScheduledDay::Monday], nine_am());
        b.schedule(ReminderState::Long, vec![ScheduledDay::Friday], nine_am());
        assert_eq!(b.task().schedules.len(), 2);
        assert_eq!(b.task().schedules[1].reminder_state, ReminderState::Long);
    }

    #[test]
    fn try_construct_lists_missing_parts() {
        let err = ActionPlanTaskBuilder::new().try_construct().unwrap_err();
        assert_eq!(
            err,
            DomainError::IncompleteActionPlanTask {
                missing: vec!["task type", "window type", "schedule"]
            }
        );
    }

    #[test]
    fn find_plan_returns_first_match() {
        let app = Uuid::new_v4();
        let other = ActionPlan::medication_template(Uuid::new_v4());
        let first = ActionPlan::medication_template(app);
        let second = ActionPlan::medication_template(app);
        let plans = vec![other, first.clone(), second];

        assert_eq!(find_plan_for_application(&plans, &app).map(|p| p.id), Some(first.id));
        assert!(find_plan_for_application(&plans, &Uuid::new_v4()).is_none());
        assert!(find_plan_for_application(&[], &app).is_none());
    }

    #[test]
    fn enums_parse_from_cli_words() {
        assert_eq!("Weekly".parse::<WindowType>().unwrap(), WindowType::Weekly);
        assert_eq!("mon".parse::<ScheduledDay>().unwrap(), ScheduledDay::Monday);
        assert_eq!("medium".parse::<ReminderState>().unwrap(), ReminderState::Medium);
        assert!("hourly".parse::<WindowType>().is_err());
    }

    #[test]
    fn template_plan_has_one_objective() {
        let app = Uuid::new_v4();
        let plan = ActionPlan::medication_template(app);
        assert_eq!(plan.name, "Medication");
        assert_eq!(plan.objectives.len(), 1);
        assert!(plan.belongs_to(&app));
        assert!(plan.tasks.is_empty());
    }
}
