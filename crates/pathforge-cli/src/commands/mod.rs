pub mod data;
pub mod day;
pub mod generate;
pub mod intent;
pub mod onboard;
pub mod premium;
pub mod protocol;
pub mod remind;
pub mod report;
pub mod settings;
pub mod setup;
pub mod status;
