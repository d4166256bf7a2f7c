pub mod fields;
pub mod login_form;
pub mod qr_scanner;
pub mod registration_form;
