pub mod render;
pub mod top;
