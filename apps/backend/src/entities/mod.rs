pub mod documents;
pub mod users;
