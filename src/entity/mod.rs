pub mod action;
pub mod filesystem;
pub mod geometry;
pub mod plan;
pub mod report;
pub mod split;
