pub mod clock;
pub mod mail;
pub mod mock;
pub mod postgres;
