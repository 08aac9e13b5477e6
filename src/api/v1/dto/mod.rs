pub mod me;
pub mod profiles;
pub mod search;
