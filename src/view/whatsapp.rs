use url::Url;

pub const DEFAULT_WHATSAPP_NUMBER: &str = "+919924555520";
pub const DEFAULT_WHATSAPP_MESSAGE: &str = "Hello! I'm interested in your properties. Could you please provide more information?";

/// Click-to-chat link; the number is reduced to its digits.
pub fn whatsapp_url(phone: &str, message: &str) -> Result<Url, url::ParseError> {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    Url::parse_with_params(&format!("https://wa.me/{digits}"), [("text", message)])
}
