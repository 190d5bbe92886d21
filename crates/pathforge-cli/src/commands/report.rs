//! Completion history report.

use crate::common;

const WEEKDAYS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (_db, engine) = common::open()?;
    let today = common::today();
    let history = &engine.state().history;

    println!("Completions by weekday:");
    for (name, count) in WEEKDAYS.iter().zip(history.weekly.iter()) {
        println!("  {name}  {count}");
    }
    println!(
        "Totals: week {} | month {} | year {}",
        history.weekly_total(),
        history.monthly_total(),
        history.yearly_total()
    );
    println!("XP gained in the last 7 days: {}", history.weekly_xp_gain(today));

    if !history.failure_reasons.is_empty() {
        println!("Failure reasons:");
        for record in &history.failure_reasons {
            println!("  {} {}", record.recorded_on, record.reason.as_str());
        }
    }
    Ok(())
}
