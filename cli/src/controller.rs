//! Form controller
//!
//! Holds the raw text of every form field, the active tab, inline field errors
//! and the last result of each computation. Actions validate their fields in
//! order and stop at the first failure; a failed action leaves every stored
//! result untouched.

use crate::error::CliError;
use health_calculator_shared::health_metrics::{
    calculate_bmi_result, calculate_body_fat_result, calculate_ideal_weight_range,
    calculate_metabolism_result, calculate_muscle_mass_result, resolve_activity_multiplier,
    BodyMeasurements, BmiResult, BodyFatResult, IdealWeightRange, MetabolismInput,
    MetabolismResult, MuscleMassResult,
};
use health_calculator_shared::validation::{optional_measurement, validate_field};
use health_calculator_shared::{ActivityLevel, BiologicalSex, Calculator, Field, FieldError, Key};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// UI tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    /// BMI, body fat, muscle mass and ideal weight
    Body,
    Metabolism,
    Calculator,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Body, Tab::Metabolism, Tab::Calculator];

    pub fn key(&self) -> &'static str {
        match self {
            Tab::Body => "body",
            Tab::Metabolism => "metabolism",
            Tab::Calculator => "calculator",
        }
    }

    /// Fields the tab's form carries, in display order
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Tab::Body => &[
                Field::Height,
                Field::Weight,
                Field::Age,
                Field::Sex,
                Field::Waist,
                Field::Neck,
                Field::Hip,
            ],
            Tab::Metabolism => &[
                Field::Height,
                Field::Weight,
                Field::Age,
                Field::Sex,
                Field::ActivityLevel,
            ],
            Tab::Calculator => &[],
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl std::str::FromStr for Tab {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "body" | "metrics" => Ok(Tab::Body),
            "metabolism" | "bmr" | "tdee" => Ok(Tab::Metabolism),
            "calculator" | "calc" => Ok(Tab::Calculator),
            _ => Err(CliError::UnknownTab(s.to_string())),
        }
    }
}

/// Computations a user can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Bmi,
    BodyFat,
    MuscleMass,
    IdealWeight,
    Metabolism,
}

impl Action {
    /// Tab whose form feeds this action
    pub fn tab(&self) -> Tab {
        match self {
            Action::Metabolism => Tab::Metabolism,
            _ => Tab::Body,
        }
    }
}

impl std::str::FromStr for Action {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "bmi" => Ok(Action::Bmi),
            "body-fat" | "bodyfat" => Ok(Action::BodyFat),
            "muscle" | "muscle-mass" => Ok(Action::MuscleMass),
            "ideal-weight" | "ideal" => Ok(Action::IdealWeight),
            "metabolism" | "bmr" | "tdee" => Ok(Action::Metabolism),
            _ => Err(CliError::UnknownCommand(s.to_string())),
        }
    }
}

/// Raw field text of one form
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormFields {
    pub height: String,
    pub weight: String,
    pub age: String,
    pub sex: BiologicalSex,
    pub waist: String,
    pub neck: String,
    pub hip: String,
    /// Activity level name or a raw multiplier
    pub activity: String,
}

impl FormFields {
    pub fn get(&self, field: Field) -> String {
        match field {
            Field::Height => self.height.clone(),
            Field::Weight => self.weight.clone(),
            Field::Age => self.age.clone(),
            Field::Sex => self.sex.to_string(),
            Field::Waist => self.waist.clone(),
            Field::Neck => self.neck.clone(),
            Field::Hip => self.hip.clone(),
            Field::ActivityLevel => self.activity.clone(),
            Field::BodyFat => String::new(),
        }
    }
}

/// Last successful result of each computation
#[derive(Debug, Clone, Default, Serialize)]
pub struct Results {
    pub bmi: Option<BmiResult>,
    pub body_fat: Option<BodyFatResult>,
    pub muscle_mass: Option<MuscleMassResult>,
    pub ideal_weight: Option<IdealWeightRange>,
    pub metabolism: Option<MetabolismResult>,
}

/// Tabbed form state and the actions that run against it
#[derive(Debug, Clone)]
pub struct Controller {
    active_tab: Tab,
    body: FormFields,
    metabolism: FormFields,
    calculator: Calculator,
    errors: HashMap<(Tab, Field), FieldError>,
    results: Results,
    /// Body fat percentage text supplied directly; takes precedence over an estimate
    known_body_fat: Option<String>,
    default_activity: ActivityLevel,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(BiologicalSex::default(), ActivityLevel::default())
    }
}

impl Controller {
    pub fn new(default_sex: BiologicalSex, default_activity: ActivityLevel) -> Self {
        let body = FormFields {
            sex: default_sex,
            ..FormFields::default()
        };
        let metabolism = FormFields {
            sex: default_sex,
            activity: default_activity.key().to_string(),
            ..FormFields::default()
        };
        Self {
            active_tab: Tab::Body,
            body,
            metabolism,
            calculator: Calculator::new(),
            errors: HashMap::new(),
            results: Results::default(),
            known_body_fat: None,
            default_activity,
        }
    }

    // ------------------------------------------------------------------
    // Tabs and fields
    // ------------------------------------------------------------------

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        debug!(from = %self.active_tab, to = %tab, "Switching tab");
        self.active_tab = tab;
    }

    pub fn form(&self, tab: Tab) -> Option<&FormFields> {
        match tab {
            Tab::Body => Some(&self.body),
            Tab::Metabolism => Some(&self.metabolism),
            Tab::Calculator => None,
        }
    }

    fn form_mut(&mut self, tab: Tab) -> Option<&mut FormFields> {
        match tab {
            Tab::Body => Some(&mut self.body),
            Tab::Metabolism => Some(&mut self.metabolism),
            Tab::Calculator => None,
        }
    }

    /// The hip field only shows for women
    pub fn hip_visible(&self) -> bool {
        self.body.sex == BiologicalSex::Female
    }

    /// Fields currently shown on a tab
    pub fn visible_fields(&self, tab: Tab) -> Vec<Field> {
        tab.fields()
            .iter()
            .copied()
            .filter(|field| *field != Field::Hip || self.hip_visible())
            .collect()
    }

    /// Set a field on the active tab
    pub fn set_field(&mut self, field: Field, raw: &str) -> Result<(), CliError> {
        self.set_field_on(self.active_tab, field, raw)
    }

    /// Set a field on a specific tab
    pub fn set_field_on(&mut self, tab: Tab, field: Field, raw: &str) -> Result<(), CliError> {
        if !tab.fields().contains(&field) {
            return Err(CliError::FieldNotOnTab { field, tab });
        }
        let form = self
            .form_mut(tab)
            .ok_or(CliError::FieldNotOnTab { field, tab })?;

        let value = raw.trim().to_string();
        match field {
            Field::Height => form.height = value,
            Field::Weight => form.weight = value,
            Field::Age => form.age = value,
            Field::Sex => form.sex = value.parse()?,
            Field::Waist => form.waist = value,
            Field::Neck => form.neck = value,
            Field::Hip => form.hip = value,
            Field::ActivityLevel => form.activity = value,
            Field::BodyFat => return Err(CliError::FieldNotOnTab { field, tab }),
        }
        Ok(())
    }

    /// Inline error currently shown next to a field
    pub fn field_error(&self, tab: Tab, field: Field) -> Option<&FieldError> {
        self.errors.get(&(tab, field))
    }

    /// Inline errors on a tab, in display order
    pub fn field_errors(&self, tab: Tab) -> Vec<FieldError> {
        tab.fields()
            .iter()
            .filter_map(|field| self.errors.get(&(tab, *field)).copied())
            .collect()
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    /// Use a measured body fat percentage for muscle mass; checked when muscle mass runs
    pub fn set_known_body_fat(&mut self, raw: Option<&str>) {
        self.known_body_fat = raw.map(|raw| raw.trim().to_string());
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Run a computation against the form state
    pub fn run(&mut self, action: Action) -> Result<(), FieldError> {
        let outcome = match action {
            Action::Bmi => self.run_bmi(),
            Action::BodyFat => self.run_body_fat(),
            Action::MuscleMass => self.run_muscle_mass(),
            Action::IdealWeight => self.run_ideal_weight(),
            Action::Metabolism => self.run_metabolism(),
        };

        match &outcome {
            Ok(()) => debug!(?action, "Computation finished"),
            Err(err) => warn!(?action, field = %err.field, error = %err.kind, "Input rejected"),
        }
        outcome
    }

    /// Validate one field, updating its inline error
    fn check(&mut self, tab: Tab, field: Field) -> Result<f64, FieldError> {
        let raw = self.form(tab).map(|form| form.get(field)).unwrap_or_default();
        self.record(tab, field, validate_field(field, &raw))
    }

    fn record(
        &mut self,
        tab: Tab,
        field: Field,
        outcome: Result<f64, FieldError>,
    ) -> Result<f64, FieldError> {
        match outcome {
            Ok(value) => {
                self.errors.remove(&(tab, field));
                Ok(value)
            }
            Err(err) => {
                self.errors.insert((tab, field), err);
                Err(err)
            }
        }
    }

    fn run_bmi(&mut self) -> Result<(), FieldError> {
        let height = self.check(Tab::Body, Field::Height)?;
        let weight = self.check(Tab::Body, Field::Weight)?;
        self.results.bmi = Some(calculate_bmi_result(weight, height)?);
        Ok(())
    }

    fn run_body_fat(&mut self) -> Result<(), FieldError> {
        let height = self.check(Tab::Body, Field::Height)?;
        let weight = self.check(Tab::Body, Field::Weight)?;
        let age = self.check(Tab::Body, Field::Age)?;

        let measurements = BodyMeasurements {
            height_cm: height,
            weight_kg: weight,
            age_years: age,
            sex: self.body.sex,
            waist_cm: optional_measurement(&self.body.waist),
            neck_cm: optional_measurement(&self.body.neck),
            hip_cm: optional_measurement(&self.body.hip),
        };
        self.results.body_fat = Some(calculate_body_fat_result(&measurements)?);
        Ok(())
    }

    fn run_muscle_mass(&mut self) -> Result<(), FieldError> {
        let weight = self.check(Tab::Body, Field::Weight)?;
        let prior = match self.known_body_fat.clone() {
            Some(raw) => {
                let outcome = validate_field(Field::BodyFat, &raw);
                Some(self.record(Tab::Body, Field::BodyFat, outcome)?)
            }
            None => self.results.body_fat.map(|result| result.percent),
        };
        self.results.muscle_mass = Some(calculate_muscle_mass_result(weight, self.body.sex, prior)?);
        Ok(())
    }

    fn run_ideal_weight(&mut self) -> Result<(), FieldError> {
        let height = self.check(Tab::Body, Field::Height)?;
        self.results.ideal_weight = Some(calculate_ideal_weight_range(height)?);
        Ok(())
    }

    fn run_metabolism(&mut self) -> Result<(), FieldError> {
        let height = self.check(Tab::Metabolism, Field::Height)?;
        let weight = self.check(Tab::Metabolism, Field::Weight)?;
        let age = self.check(Tab::Metabolism, Field::Age)?;
        let multiplier = self.activity_multiplier();
        let multiplier = self.record(Tab::Metabolism, Field::ActivityLevel, multiplier)?;

        let input = MetabolismInput {
            height_cm: height,
            weight_kg: weight,
            age_years: age,
            sex: self.metabolism.sex,
            activity_multiplier: multiplier,
        };
        self.results.metabolism = Some(calculate_metabolism_result(&input)?);
        Ok(())
    }

    /// Resolve the activity field: a level name, a multiplier, or the default
    fn activity_multiplier(&self) -> Result<f64, FieldError> {
        resolve_activity_multiplier(&self.metabolism.activity, self.default_activity)
    }

    // ------------------------------------------------------------------
    // Calculator
    // ------------------------------------------------------------------

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn press_keys(&mut self, keys: &[Key]) {
        for key in keys {
            self.calculator.press(*key);
        }
        debug!(
            current = self.calculator.current(),
            history = %self.calculator.history_line(),
            "Calculator updated"
        );
    }
}
