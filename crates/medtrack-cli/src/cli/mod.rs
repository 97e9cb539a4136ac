//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use chrono::NaiveTime;
use clap::{Args, Parser, Subcommand, ValueEnum};

use medtrack_core::domain::{ReminderState, ScheduledDay, UnitVocabulary, WindowType};

pub mod global;
pub use global::{GlobalArgs, LogFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "medtrack",
    bin_name = "medtrack",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Record medications and schedule reminders",
    long_about = "Medtrack keeps a local list of medications with their dose, \
                  strength and frequency, and turns them into reminder tasks.",
    after_help = "EXAMPLES:\n\
        \x20 medtrack add --name Advil --strength 200 --strength-unit 'Milligram (mg)'\n\
        \x20 medtrack list --format json\n\
        \x20 medtrack remind <ID> --at 08:00 --at 20:00\n\
        \x20 medtrack completions bash > /usr/share/bash-completion/completions/medtrack",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a new medication.
    #[command(
        visible_alias = "a",
        about = "Record a new medication",
        after_help = "EXAMPLES:\n\
            \x20 medtrack add --name Advil --dose 2 --dose-unit Tablets\n\
            \x20 medtrack add --name Amoxicillin --strength 500 --strength-unit 'Milligram (mg)' \\\n\
            \x20     --frequency-amount 3 --frequency-unit 'times per day'\n\
            \x20 medtrack add --name Insulin --frequency 'before meals'"
    )]
    Add(AddArgs),

    /// Change a stored medication.
    #[command(
        visible_alias = "e",
        about = "Edit a medication",
        after_help = "EXAMPLES:\n\
            \x20 medtrack edit <ID> --dose 1\n\
            \x20 medtrack edit <ID> --frequency 'as needed'"
    )]
    Edit(EditArgs),

    /// List stored medications.
    #[command(
        visible_alias = "ls",
        about = "List medications",
        after_help = "EXAMPLES:\n\
            \x20 medtrack list\n\
            \x20 medtrack list --format csv > medications.csv"
    )]
    List(ListArgs),

    /// Show one medication.
    #[command(about = "Show a medication")]
    Show(ShowArgs),

    /// Delete a stored medication.
    #[command(
        visible_alias = "rm",
        about = "Remove a medication",
        after_help = "EXAMPLES:\n\
            \x20 medtrack remove <ID>\n\
            \x20 medtrack remove <ID> --yes"
    )]
    Remove(RemoveArgs),

    /// Print the unit vocabularies offered by the pickers.
    #[command(
        about = "List unit choices",
        after_help = "EXAMPLES:\n\
            \x20 medtrack units\n\
            \x20 medtrack units dose"
    )]
    Units(UnitsArgs),

    /// Run the field validator on a single input.
    #[command(
        about = "Validate an input value",
        after_help = "EXAMPLES:\n\
            \x20 medtrack check --numeric 12.5\n\
            \x20 medtrack check --required ''"
    )]
    Check(CheckArgs),

    /// Schedule a reminder task for a medication.
    #[command(
        about = "Schedule medication reminders",
        after_help = "EXAMPLES:\n\
            \x20 medtrack remind <ID> --at 08:00\n\
            \x20 medtrack remind <ID> --window weekly --day mon,thu --at 09:30 --reminder short"
    )]
    Remind(RemindArgs),

    /// Initialise a Medtrack configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 medtrack init\n\
            \x20 medtrack init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 medtrack completions bash > ~/.local/share/bash-completion/completions/medtrack\n\
            \x20 medtrack completions zsh  > ~/.zfunc/_medtrack\n\
            \x20 medtrack completions fish > ~/.config/fish/completions/medtrack.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Medtrack configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 medtrack config get storage.path\n\
            \x20 medtrack config list\n\
            \x20 medtrack config path"
    )]
    Config(ConfigCommands),
}

// ── medication inputs ─────────────────────────────────────────────────────────

/// Form inputs shared by `add` and `edit`.
///
/// Values are taken as raw text so that the form validator, not clap,
/// decides whether an amount is a number.
#[derive(Debug, Default, Args)]
pub struct MedicationArgs {
    /// Medication name.
    #[arg(short = 'n', long = "name", value_name = "NAME", help = "Medication name")]
    pub name: Option<String>,

    #[arg(
        long = "strength",
        visible_alias = "strength-amount",
        value_name = "AMOUNT",
        allow_hyphen_values = true,
        help = "Strength amount, e.g. 200"
    )]
    pub strength: Option<String>,

    #[arg(
        long = "strength-unit",
        value_name = "UNIT",
        help = "Strength unit, see `medtrack units strength`"
    )]
    pub strength_unit: Option<String>,

    #[arg(
        short = 'd',
        long = "dose",
        visible_alias = "dose-amount",
        value_name = "AMOUNT",
        allow_hyphen_values = true,
        help = "Dose amount, e.g. 2"
    )]
    pub dose: Option<String>,

    #[arg(
        long = "dose-unit",
        value_name = "UNIT",
        help = "Dose unit, see `medtrack units dose`"
    )]
    pub dose_unit: Option<String>,

    #[arg(
        long = "frequency-amount",
        value_name = "N",
        allow_hyphen_values = true,
        help = "How many times per frequency unit (1-7)"
    )]
    pub frequency_amount: Option<String>,

    #[arg(
        long = "frequency-unit",
        value_name = "UNIT",
        help = "Frequency unit, see `medtrack units frequency`"
    )]
    pub frequency_unit: Option<String>,

    /// Free-text frequency. Ignored when an amount and unit are given.
    #[arg(
        short = 'f',
        long = "frequency",
        value_name = "TEXT",
        help = "Free-text frequency, e.g. 'as needed'"
    )]
    pub frequency: Option<String>,
}

impl MedicationArgs {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.strength.is_none()
            && self.strength_unit.is_none()
            && self.dose.is_none()
            && self.dose_unit.is_none()
            && self.frequency_amount.is_none()
            && self.frequency_unit.is_none()
            && self.frequency.is_none()
    }
}

// ── add / edit ────────────────────────────────────────────────────────────────

/// Arguments for `medtrack add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    #[command(flatten)]
    pub fields: MedicationArgs,
}

/// Arguments for `medtrack edit`.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Record id as printed by `medtrack list`.
    #[arg(value_name = "ID", help = "Medication id")]
    pub id: String,

    #[command(flatten)]
    pub fields: MedicationArgs,
}

// ── list / show / remove ──────────────────────────────────────────────────────

/// Arguments for `medtrack list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One medication per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

/// Arguments for `medtrack show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(value_name = "ID", help = "Medication id")]
    pub id: String,
}

/// Arguments for `medtrack remove`.
#[derive(Debug, Args)]
pub struct RemoveArgs {
    #[arg(value_name = "ID", help = "Medication id")]
    pub id: String,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long = "yes", help = "Remove without asking")]
    pub yes: bool,
}

// ── units / check ─────────────────────────────────────────────────────────────

/// Arguments for `medtrack units`.
#[derive(Debug, Args)]
pub struct UnitsArgs {
    /// Only print this vocabulary.
    #[arg(value_enum, help = "Vocabulary to print (default: all)")]
    pub vocabulary: Option<VocabularyArg>,
}

/// Unit vocabularies by their short names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VocabularyArg {
    Dose,
    Strength,
    Frequency,
}

impl From<VocabularyArg> for UnitVocabulary {
    fn from(arg: VocabularyArg) -> Self {
        match arg {
            VocabularyArg::Dose => Self::DoseUnits,
            VocabularyArg::Strength => Self::StrengthUnit,
            VocabularyArg::Frequency => Self::FrequencyUnits,
        }
    }
}

/// Arguments for `medtrack check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Text to validate.
    #[arg(value_name = "TEXT", allow_hyphen_values = true)]
    pub text: String,

    /// Reject empty or whitespace-only text.
    #[arg(long = "required", help = "Value must not be empty")]
    pub required: bool,

    /// Reject text that is not a number.
    #[arg(long = "numeric", help = "Value must be a number")]
    pub numeric: bool,
}

// ── remind ────────────────────────────────────────────────────────────────────

/// Arguments for `medtrack remind`.
#[derive(Debug, Args)]
pub struct RemindArgs {
    #[arg(value_name = "ID", help = "Medication id")]
    pub id: String,

    /// Reminder times, 24-hour `HH:MM`. One schedule is created per time.
    #[arg(
        long = "at",
        value_name = "HH:MM",
        required = true,
        value_parser = parse_time,
        help = "Reminder time (repeatable)"
    )]
    pub at: Vec<NaiveTime>,

    #[arg(
        long = "window",
        value_enum,
        default_value = "daily",
        help = "Completion window"
    )]
    pub window: WindowArg,

    /// Days to remind on. Defaults to every day.
    #[arg(
        long = "day",
        value_enum,
        value_delimiter = ',',
        help = "Days to remind on (comma separated)"
    )]
    pub days: Vec<DayArg>,

    #[arg(
        long = "reminder",
        value_enum,
        default_value = "off",
        help = "Reminder notification"
    )]
    pub reminder: ReminderArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WindowArg {
    Daily,
    Weekly,
}

impl From<WindowArg> for WindowType {
    fn from(arg: WindowArg) -> Self {
        match arg {
            WindowArg::Daily => Self::Daily,
            WindowArg::Weekly => Self::Weekly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReminderArg {
    Off,
    Short,
    Medium,
    Long,
}

impl From<ReminderArg> for ReminderState {
    fn from(arg: ReminderArg) -> Self {
        match arg {
            ReminderArg::Off => Self::Off,
            ReminderArg::Short => Self::Short,
            ReminderArg::Medium => Self::Medium,
            ReminderArg::Long => Self::Long,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DayArg {
    Everyday,
    #[value(alias = "mon")]
    Monday,
    #[value(alias = "tue")]
    Tuesday,
    #[value(alias = "wed")]
    Wednesday,
    #[value(alias = "thu")]
    Thursday,
    #[value(alias = "fri")]
    Friday,
    #[value(alias = "sat")]
    Saturday,
    #[value(alias = "sun")]
    Sunday,
}

impl From<DayArg> for ScheduledDay {
    fn from(arg: DayArg) -> Self {
        match arg {
            DayArg::Everyday => Self::Everyday,
            DayArg::Monday => Self::Monday,
            DayArg::Tuesday => Self::Tuesday,
            DayArg::Wednesday => Self::Wednesday,
            DayArg::Thursday => Self::Thursday,
            DayArg::Friday => Self::Friday,
            DayArg::Saturday => Self::Saturday,
            DayArg::Sunday => Self::Sunday,
        }
    }
}

fn parse_time(s: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| format!("'{s}' is not a time, expected HH:MM"))
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `medtrack init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `medtrack completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `medtrack config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `storage.path`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
