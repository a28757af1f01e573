pub mod controller;
pub mod directory;
pub mod models;
pub mod projection;
pub mod render;
pub mod resolver;
