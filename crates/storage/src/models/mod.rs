pub mod bath;
pub mod point;
pub mod user;
pub mod visit;

pub use bath::{Bath, Country, Region};
pub use point::{AwardReason, ConfigEntry, PointAward};
pub use user::User;
pub use visit::{Visit, VisitStatus};
