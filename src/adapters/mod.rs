pub(crate) mod controls;
pub mod default_element;
pub mod field_model;
pub mod form_assembler;
pub mod introspection;
pub mod page;
pub mod preview_handler;
pub mod specified_element;
