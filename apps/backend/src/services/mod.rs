pub mod documents;
pub mod reminders;
