pub mod charge;
pub mod viewport;
