pub mod clip_boundary;
pub mod clip_planner;
