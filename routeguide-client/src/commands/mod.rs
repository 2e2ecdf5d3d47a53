pub mod chat;
pub mod demo;
pub mod feature;
pub mod features;
pub mod route;
