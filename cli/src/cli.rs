//! CLI argument definitions

use clap::{ArgAction, Parser, Subcommand};
use health_calculator_shared::Locale;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "health-calc", version, about = "Health metrics calculator")]
pub struct Cli {
    /// Path to a config TOML (defaults to config/{RUST_ENV}.toml if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print results as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Display locale (zh|en); overrides display.locale
    #[arg(long, value_name = "LOCALE")]
    pub locale: Option<Locale>,

    /// Log filter (error|warn|info|debug|trace); overrides logging.level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute; starts an interactive session when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Body Mass Index with category
    Bmi {
        /// Height in cm (100-250)
        #[arg(long)]
        height: String,
        /// Weight in kg (20-200)
        #[arg(long)]
        weight: String,
    },
    /// Body fat estimate (Navy formula when circumferences are given)
    BodyFat {
        #[arg(long)]
        height: String,
        #[arg(long)]
        weight: String,
        /// Age in years (10-100)
        #[arg(long)]
        age: String,
        /// male or female
        #[arg(long)]
        sex: Option<String>,
        /// Waist circumference in cm
        #[arg(long)]
        waist: Option<String>,
        /// Neck circumference in cm
        #[arg(long)]
        neck: Option<String>,
        /// Hip circumference in cm (female only)
        #[arg(long)]
        hip: Option<String>,
    },
    /// Muscle mass estimate
    Muscle {
        #[arg(long)]
        weight: String,
        #[arg(long)]
        sex: Option<String>,
        /// Known body fat percentage (5-50); per-sex default otherwise
        #[arg(long = "body-fat")]
        body_fat: Option<String>,
    },
    /// Healthy weight range for a height (BMI 18.5-24.9)
    IdealWeight {
        #[arg(long)]
        height: String,
    },
    /// Basal metabolic rate and total daily energy expenditure
    Metabolism {
        #[arg(long)]
        height: String,
        #[arg(long)]
        weight: String,
        #[arg(long)]
        age: String,
        #[arg(long)]
        sex: Option<String>,
        /// Activity level name (sedentary, lightly_active, ...) or a multiplier (1.2-1.9)
        #[arg(long, visible_alias = "factor")]
        activity: Option<String>,
    },
    /// Four-function calculator, e.g. `calc 12.5 × 4 =` or `calc 5+3=`
    Calc {
        #[arg(
            required = true,
            allow_hyphen_values = true,
            trailing_var_arg = true,
            value_name = "KEYS"
        )]
        keys: Vec<String>,
    },
    /// Interactive tabbed session
    Interactive,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_body_fat() {
        let cli = Cli::try_parse_from([
            "health-calc",
            "--locale",
            "en",
            "body-fat",
            "--height",
            "180",
            "--weight",
            "80",
            "--age",
            "35",
            "--waist",
            "90",
        ])
        .unwrap();
        assert_eq!(cli.locale, Some(Locale::En));
        match cli.command {
            Some(Command::BodyFat { waist, hip, .. }) => {
                assert_eq!(waist.as_deref(), Some("90"));
                assert!(hip.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_calc_keys_with_minus() {
        let cli = Cli::try_parse_from(["health-calc", "calc", "9", "-", "4", "="]).unwrap();
        match cli.command {
            Some(Command::Calc { keys }) => assert_eq!(keys, vec!["9", "-", "4", "="]),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_factor_is_an_activity_alias() {
        let cli = Cli::try_parse_from([
            "health-calc", "metabolism", "--height", "175", "--weight", "70", "--age", "30",
            "--factor", "1.55",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Metabolism { activity, .. }) => assert_eq!(activity.as_deref(), Some("1.55")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["health-calc"]).unwrap();
        assert!(cli.command.is_none());
    }
}
