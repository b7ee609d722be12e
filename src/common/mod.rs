pub mod desktop;
pub mod paths;
