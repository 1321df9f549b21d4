//! Preference CLI commands: monthly budget and theme

use clap::Subcommand;

use crate::config::Settings;
use crate::error::TrackerResult;
use crate::models::Theme;
use crate::sync::Tracker;

/// Budget subcommands
#[derive(Subcommand, Debug)]
pub enum BudgetCommands {
    /// Set the monthly budget
    Set {
        /// Amount (e.g., "2000" or "2,000.00")
        amount: String,
    },
    /// Show the monthly budget
    Show,
}

/// Theme subcommands
#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Show the current theme
    Show,
    /// Switch to the light theme
    Light,
    /// Switch to the dark theme
    Dark,
    /// Switch between light and dark
    Toggle,
}

/// Handle a budget command
pub fn handle_budget_command(tracker: &Tracker, settings: &Settings, cmd: BudgetCommands) -> TrackerResult<()> {
    let symbol = &settings.currency_symbol;
    match cmd {
        BudgetCommands::Set { amount } => {
            let budget = tracker.set_budget_from_input(&amount)?;
            println!("Budget saved: {}", budget.format_with_symbol(symbol));
        }
        BudgetCommands::Show => match tracker.budget()? {
            Some(budget) => println!("Monthly budget: {}", budget.format_with_symbol(symbol)),
            None => println!("No monthly budget set."),
        },
    }
    Ok(())
}

/// Handle a theme command; no subcommand shows the current theme
pub fn handle_theme_command(tracker: &Tracker, cmd: Option<ThemeCommands>) -> TrackerResult<()> {
    let theme = match cmd.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => tracker.theme()?,
        ThemeCommands::Light => {
            tracker.set_theme(Theme::Light)?;
            Theme::Light
        }
        ThemeCommands::Dark => {
            tracker.set_theme(Theme::Dark)?;
            Theme::Dark
        }
        ThemeCommands::Toggle => tracker.toggle_theme()?,
    };
    println!("Theme: {}", theme);
    Ok(())
}
