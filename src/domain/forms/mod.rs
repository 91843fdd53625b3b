pub mod register_form;
