pub mod dual;
pub mod serial;
