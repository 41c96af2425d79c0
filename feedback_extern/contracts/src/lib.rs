pub mod form_backend;
