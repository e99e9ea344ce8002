pub mod baths;
pub mod leaderboard;
pub mod settings;
pub mod users;
pub mod visits;
