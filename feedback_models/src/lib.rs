pub mod email_address;
pub mod form;
pub mod page;
pub mod submission;
