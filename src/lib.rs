pub mod animation;
pub mod app;
pub mod asset;
pub mod atlas;
pub mod color;
pub mod engine;
pub mod errors;
pub mod handle;
pub mod input;
pub mod perf;
pub mod platform;
pub mod prelude;
pub mod sheet;
pub mod sprite;
pub mod types;
pub mod world;
