pub mod artist;
pub mod genre;
pub mod show;
pub mod state_code;
pub mod venue;
