pub mod anilist;
pub mod app;
pub mod config;
pub mod duration;
pub mod franchise;
pub mod page;
