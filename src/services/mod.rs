pub mod activities;
pub mod normalize;
pub mod seed;
pub mod users;
pub mod weekly;
