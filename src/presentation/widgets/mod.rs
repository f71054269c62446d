mod form;
mod input;
mod otp_input;
mod status_bar;

pub use form::{FIELD_HEIGHT, Form};
pub use input::TextInput;
pub use otp_input::OtpInput;
pub use status_bar::{KeyHints, StatusBar};
