pub mod academic;
pub mod auth;
pub mod status;
pub mod students;
