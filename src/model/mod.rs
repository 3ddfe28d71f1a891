pub mod api;
pub mod application;
pub mod document;
pub mod grant_call;
pub mod project;
pub mod user;
