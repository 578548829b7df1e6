pub mod recovery;
pub mod timeout;
