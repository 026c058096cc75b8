pub mod collection;
pub mod connector;
pub mod locale;
