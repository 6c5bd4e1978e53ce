//! Result rendering
//!
//! Each result panel is a list of `caption: value` lines, followed by a gauge
//! bar where the metric has one.

use crate::controller::{Action, Controller, Results, Tab};
use health_calculator_shared::{Calculator, Caption, Field, FieldError, Gauge, Locale};
use serde_json::{json, Value};

/// Draw a gauge as `[#####.....] 50%`
pub fn gauge_bar(gauge: Gauge, width: usize) -> String {
    let filled = ((gauge.ratio() * width as f64).round() as usize).min(width);
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        ".".repeat(width - filled),
        gauge.percent
    )
}

/// Lines for the stored result of an action; empty if it has not run yet
pub fn result_lines(action: Action, results: &Results, locale: Locale, width: usize) -> Vec<String> {
    let c = |caption| locale.caption(caption);

    match action {
        Action::Bmi => results.bmi.map_or_else(Vec::new, |r| {
            vec![
                format!("{}: {:.2}", c(Caption::Bmi), r.value),
                format!("{}: {}", c(Caption::Category), r.category.label(locale)),
                gauge_bar(r.gauge, width),
            ]
        }),
        Action::BodyFat => results.body_fat.map_or_else(Vec::new, |r| {
            vec![
                format!("{}: {:.1}%", c(Caption::BodyFat), r.percent),
                format!("{}: {}", c(Caption::Method), r.method.label(locale)),
                format!("{}: {}", c(Caption::Category), r.category.label(locale)),
                gauge_bar(r.gauge, width),
            ]
        }),
        Action::MuscleMass => results.muscle_mass.map_or_else(Vec::new, |r| {
            vec![
                format!("{}: {:.1} kg", c(Caption::MuscleMass), r.muscle_mass_kg),
                format!("{}: {:.1}%", c(Caption::MuscleShare), r.share_percent),
            ]
        }),
        Action::IdealWeight => results.ideal_weight.map_or_else(Vec::new, |r| {
            vec![format!(
                "{}: {:.1} kg - {:.1} kg",
                c(Caption::IdealWeightRange),
                r.min_kg,
                r.max_kg
            )]
        }),
        Action::Metabolism => results.metabolism.map_or_else(Vec::new, |r| {
            let unit = c(Caption::KcalPerDay);
            vec![
                format!("{}: {:.0} {}", c(Caption::Bmr), r.bmr, unit),
                format!("{}: {:.0} {}", c(Caption::Tdee), r.tdee, unit),
            ]
        }),
    }
}

/// One line per rejected field, prefixed with its label
pub fn error_lines(errors: &[FieldError], locale: Locale) -> Vec<String> {
    errors.iter().map(|err| err.user_message(locale)).collect()
}

/// Two-line calculator display: pending operation above the entry buffer
pub fn calculator_lines(calculator: &Calculator) -> Vec<String> {
    vec![calculator.history_line(), calculator.current().to_string()]
}

/// Current form of a tab with any inline errors
pub fn form_lines(controller: &Controller, tab: Tab, locale: Locale) -> Vec<String> {
    let Some(form) = controller.form(tab) else {
        return calculator_lines(controller.calculator());
    };

    controller
        .visible_fields(tab)
        .into_iter()
        .map(|field| {
            let value = match field {
                Field::Sex => form.sex.label(locale).to_string(),
                _ => form.get(field),
            };
            match controller.field_error(tab, field) {
                Some(err) => format!("{}: {}  ! {}", field.label(locale), value, err.message(locale)),
                None => format!("{}: {}", field.label(locale), value),
            }
        })
        .collect()
}

/// JSON document for a successful action
pub fn result_json(action: Action, results: &Results, locale: Locale, width: usize) -> Value {
    let result = match action {
        Action::Bmi => json!(results.bmi),
        Action::BodyFat => json!(results.body_fat),
        Action::MuscleMass => json!(results.muscle_mass),
        Action::IdealWeight => json!(results.ideal_weight),
        Action::Metabolism => json!(results.metabolism),
    };
    json!({
        "ok": true,
        "action": action,
        "result": result,
        "lines": result_lines(action, results, locale, width),
    })
}

/// JSON document for rejected input
pub fn errors_json(errors: &[FieldError], locale: Locale) -> Value {
    let errors: Vec<Value> = errors
        .iter()
        .map(|err| {
            json!({
                "field": err.field,
                "label": err.field.label(locale),
                "message": err.message(locale),
                "detail": err,
            })
        })
        .collect();
    json!({ "ok": false, "errors": errors })
}

/// JSON document for the calculator display
pub fn calculator_json(calculator: &Calculator) -> Value {
    json!({
        "ok": true,
        "current": calculator.current(),
        "previous": calculator.previous(),
        "operator": calculator.operator(),
        "history": calculator.history_line(),
    })
}
