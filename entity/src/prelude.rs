pub use super::application::Entity as Application;
pub use super::document::Entity as Document;
pub use super::grant_call::Entity as GrantCall;
pub use super::project::Entity as Project;
pub use super::user::Entity as User;
