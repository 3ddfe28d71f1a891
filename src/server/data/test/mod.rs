mod application;
mod document;
mod grant_call;
mod project;
mod user;
